//! Entrance animation - the staggered fade-in after mount.
//!
//! Each character fades from transparent to opaque over `duration`, after
//! its own `delay`. While fading it either drops in from `rise` units above
//! its resting place or grows from `scale_from` about its body centre.
//!
//! Like blinking, the entrance is a pure function of scene time.
//!
//! ```text
//! opacity
//!  1.0            ╭──────
//!                ╱
//!  0.0 ─────────╯
//!          delay   delay + duration
//! ```

use serde::{Deserialize, Serialize};

/// How a character appears after mount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entrance {
    /// Seconds after mount before the fade starts.
    pub delay: f32,
    /// Seconds the fade takes. Zero appears instantly.
    pub duration: f32,
    /// Vertical offset at the start, negative is above.
    pub rise: f32,
    /// Scale at the start.
    pub scale_from: f32,
}

impl Default for Entrance {
    fn default() -> Self {
        Self::INSTANT
    }
}

impl Entrance {
    /// Already in place at mount.
    pub const INSTANT: Self = Self {
        delay: 0.0,
        duration: 0.0,
        rise: 0.0,
        scale_from: 1.0,
    };

    /// Fade in while dropping `rise` units into place.
    pub const fn drop_in(delay: f32, duration: f32, rise: f32) -> Self {
        Self {
            delay,
            duration,
            rise,
            scale_from: 1.0,
        }
    }

    /// Fade in while growing from `scale_from`.
    pub const fn grow_in(delay: f32, duration: f32, scale_from: f32) -> Self {
        Self {
            delay,
            duration,
            rise: 0.0,
            scale_from,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.delay.is_finite()
            && self.delay >= 0.0
            && self.duration.is_finite()
            && self.duration >= 0.0
            && self.rise.is_finite()
            && self.scale_from.is_finite()
            && self.scale_from > 0.0
    }

    /// Seconds after mount when the character is fully in place.
    pub fn end(&self) -> f32 {
        self.delay + self.duration
    }

    /// Eased progress in `[0, 1]` at `elapsed` seconds after mount.
    pub fn progress(&self, elapsed: f32) -> f32 {
        if elapsed >= self.end() {
            return 1.0;
        }
        if elapsed <= self.delay {
            return 0.0;
        }
        let t = (elapsed - self.delay) / self.duration;
        // Ease in and out.
        t * t * (3.0 - 2.0 * t)
    }

    /// Opacity, offset and scale at `elapsed`.
    pub fn at(&self, elapsed: f32) -> EntranceFrame {
        let p = self.progress(elapsed);
        EntranceFrame {
            opacity: p,
            offset_y: self.rise * (1.0 - p),
            scale: self.scale_from + (1.0 - self.scale_from) * p,
        }
    }
}

/// One sample of an [`Entrance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntranceFrame {
    pub opacity: f32,
    pub offset_y: f32,
    pub scale: f32,
}

impl Default for EntranceFrame {
    fn default() -> Self {
        Self::SETTLED
    }
}

impl EntranceFrame {
    /// Fully in place.
    pub const SETTLED: Self = Self {
        opacity: 1.0,
        offset_y: 0.0,
        scale: 1.0,
    };

    pub fn is_settled(&self) -> bool {
        *self == Self::SETTLED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_instant_is_settled_at_mount() {
        assert!(Entrance::INSTANT.at(0.0).is_settled());
        assert!(Entrance::default().at(0.0).is_settled());
    }

    #[test]
    fn test_hidden_until_delay() {
        let entrance = Entrance::drop_in(0.2, 0.5, -20.0);
        let frame = entrance.at(0.1);
        assert_eq!(frame.opacity, 0.0);
        assert_eq!(frame.offset_y, -20.0);
        assert_eq!(frame.scale, 1.0);
    }

    #[test]
    fn test_drop_in_midway() {
        let entrance = Entrance::drop_in(0.1, 0.5, -20.0);
        let frame = entrance.at(0.35);
        assert!((frame.opacity - 0.5).abs() < EPS);
        assert!((frame.offset_y + 10.0).abs() < EPS);
    }

    #[test]
    fn test_grow_in_reaches_full_size() {
        let entrance = Entrance::grow_in(0.4, 0.5, 0.8);
        assert!((entrance.at(0.4).scale - 0.8).abs() < EPS);
        assert!(entrance.at(0.9).is_settled());
        assert!(entrance.at(5.0).is_settled());
    }

    #[test]
    fn test_progress_is_monotonic() {
        let entrance = Entrance::grow_in(0.3, 0.5, 0.8);
        let mut last = 0.0;
        let mut t = 0.0;
        while t < 1.0 {
            let p = entrance.progress(t);
            assert!(p >= last, "progress fell at {t}");
            last = p;
            t += 0.01;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn test_validity() {
        assert!(Entrance::drop_in(0.1, 0.5, -20.0).is_valid());
        assert!(!Entrance::grow_in(0.1, 0.5, 0.0).is_valid());
        assert!(!Entrance::drop_in(-0.1, 0.5, 0.0).is_valid());
    }
}
