//! Gaze aversion - easing into and out of the "looking away" pose.
//!
//! While the password is visible the characters look away from the form.
//! Rather than swapping poses, a spring-smoothed factor sweeps between 0
//! (normal tracking) and 1 (fully averted) and every tracked offset is
//! blended:
//!
//! ```text
//! final = normal * (1 - factor) + averted * factor
//! ```

use crate::types::Point;

use super::spring::{Spring, SpringConfig};

/// Convex blend of the tracking offset and the averted offset.
///
/// `factor` is clamped to `[0, 1]`, so the result always lies on the
/// segment between the two offsets.
#[inline]
pub fn blend(normal: Point, averted: Point, factor: f32) -> Point {
    let factor = factor.clamp(0.0, 1.0);
    normal * (1.0 - factor) + averted * factor
}

/// Blend factor driven by the password-visible flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeAversion {
    factor: Spring,
}

impl GazeAversion {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            factor: Spring::new(config, 0.0),
        }
    }

    /// Target fully averted (`true`) or normal tracking (`false`).
    pub fn set_averted(&mut self, averted: bool) {
        self.factor.set_target(if averted { 1.0 } else { 0.0 });
    }

    /// Snap straight to a state (used on mount).
    pub fn reset(&mut self, averted: bool) {
        self.factor.jump_to(if averted { 1.0 } else { 0.0 });
    }

    pub fn step(&mut self, dt: f32) -> bool {
        self.factor.step(dt)
    }

    /// Current blend factor. Spring overshoot is clamped away.
    pub fn factor(&self) -> f32 {
        self.factor.value().clamp(0.0, 1.0)
    }

    /// Blend with the current factor.
    pub fn apply(&self, normal: Point, averted: Point) -> Point {
        blend(normal, averted, self.factor())
    }
}

impl Default for GazeAversion {
    fn default() -> Self {
        Self::new(SpringConfig::GAZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_blend_endpoints() {
        let normal = Point::new(3.0, -2.0);
        let averted = Point::new(-5.0, -4.0);
        assert_eq!(blend(normal, averted, 0.0), normal);
        assert_eq!(blend(normal, averted, 1.0), averted);
        assert_eq!(blend(normal, averted, 1.7), averted);
        assert_eq!(blend(normal, averted, -0.3), normal);
    }

    #[test]
    fn test_aversion_eases_in_and_out() {
        let mut gaze = GazeAversion::default();
        assert_eq!(gaze.factor(), 0.0);

        gaze.set_averted(true);
        gaze.step(1.0 / 60.0);
        let early = gaze.factor();
        assert!(early > 0.0 && early < 0.5, "factor jumped to {early}");

        for _ in 0..120 {
            gaze.step(1.0 / 60.0);
        }
        assert!((gaze.factor() - 1.0).abs() < 0.01);

        gaze.set_averted(false);
        for _ in 0..120 {
            gaze.step(1.0 / 60.0);
        }
        assert!(gaze.factor() < 0.01);
    }

    proptest! {
        #[test]
        fn prop_blend_is_convex(
            nx in -20.0f32..20.0, ny in -20.0f32..20.0,
            ax in -20.0f32..20.0, ay in -20.0f32..20.0,
            factor in 0.0f32..=1.0,
        ) {
            let normal = Point::new(nx, ny);
            let averted = Point::new(ax, ay);
            let out = blend(normal, averted, factor);
            // On the segment: distances to both ends add up to its length.
            let total = normal.distance(averted);
            let split = normal.distance(out) + out.distance(averted);
            prop_assert!((split - total).abs() < 1e-3);
        }

        #[test]
        fn prop_blend_is_continuous(
            nx in -20.0f32..20.0, ny in -20.0f32..20.0,
            ax in -20.0f32..20.0, ay in -20.0f32..20.0,
            factor in 0.0f32..0.99,
        ) {
            let normal = Point::new(nx, ny);
            let averted = Point::new(ax, ay);
            let step = 0.01;
            let jump = blend(normal, averted, factor).distance(blend(normal, averted, factor + step));
            prop_assert!(jump <= normal.distance(averted) * step + 1e-3);
        }
    }
}
