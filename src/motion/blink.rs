//! Blink animation - per-character staggered eye blinks.
//!
//! A blink squashes the eyes vertically to 10% and back over 0.2 s. Each
//! character repeats it on its own period, starting after its own delay, so
//! the cast never blinks in unison.
//!
//! Blinks are a pure function of scene time: the scene clock is the only
//! timer and nothing runs between frames.
//!
//! # Pattern
//!
//! ```text
//! scale
//!  1.0 ─────┐  ┌──────────────┐  ┌────
//!           └┘                └┘
//!  0.1     delay          delay + period
//! ```

use serde::{Deserialize, Serialize};

/// Length of one blink in seconds.
pub const BLINK_DURATION: f32 = 0.2;

/// Vertical scale at the middle of a blink.
pub const BLINK_MIN_SCALE: f32 = 0.1;

/// One blink plus a two second pause.
pub const BLINK_PERIOD: f32 = 2.2;

/// When a character blinks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkSchedule {
    /// Seconds before the first blink.
    pub delay: f32,
    /// Seconds from the start of one blink to the start of the next.
    pub period: f32,
    /// Seconds a blink takes.
    pub duration: f32,
}

impl Default for BlinkSchedule {
    fn default() -> Self {
        Self::new(0.0, BLINK_PERIOD)
    }
}

impl BlinkSchedule {
    pub const fn new(delay: f32, period: f32) -> Self {
        Self {
            delay,
            period,
            duration: BLINK_DURATION,
        }
    }

    /// A schedule that can run: positive duration and a period long enough
    /// to fit one blink.
    pub fn is_valid(&self) -> bool {
        self.delay.is_finite()
            && self.delay >= 0.0
            && self.duration.is_finite()
            && self.duration > 0.0
            && self.period.is_finite()
            && self.period >= self.duration
    }

    /// Vertical eye scale at `elapsed` seconds of scene time.
    ///
    /// Keyframes `1 → 0.1 → 1`, linear, over `duration`.
    pub fn scale_at(&self, elapsed: f32) -> f32 {
        if elapsed < self.delay || self.period <= 0.0 || self.duration <= 0.0 {
            return 1.0;
        }

        let phase = (elapsed - self.delay) % self.period;
        if phase >= self.duration {
            return 1.0;
        }

        let half = self.duration / 2.0;
        let t = if phase < half {
            phase / half
        } else {
            1.0 - (phase - half) / half
        };
        1.0 - (1.0 - BLINK_MIN_SCALE) * t
    }

    /// Whether a blink is in progress at `elapsed`.
    pub fn is_blinking(&self, elapsed: f32) -> bool {
        self.scale_at(elapsed) < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_no_blink_before_delay() {
        let schedule = BlinkSchedule::new(1.5, 4.0);
        assert_eq!(schedule.scale_at(0.0), 1.0);
        assert_eq!(schedule.scale_at(1.49), 1.0);
    }

    #[test]
    fn test_blink_keyframes() {
        let schedule = BlinkSchedule::new(0.5, 4.0);
        assert!((schedule.scale_at(0.5) - 1.0).abs() < EPS);
        assert!((schedule.scale_at(0.6) - BLINK_MIN_SCALE).abs() < EPS);
        assert!((schedule.scale_at(0.55) - 0.55).abs() < EPS);
        assert_eq!(schedule.scale_at(0.75), 1.0);
    }

    #[test]
    fn test_blink_repeats_on_period() {
        let schedule = BlinkSchedule::default();
        assert!(schedule.is_blinking(0.1));
        assert!(!schedule.is_blinking(1.0));
        assert!(!schedule.is_blinking(2.15));
        assert!(schedule.is_blinking(2.3));
        assert!(schedule.is_blinking(4.5));
    }

    #[test]
    fn test_staggered_delays_do_not_overlap() {
        let schedules: Vec<_> = [0.0, 0.5, 1.0, 1.5]
            .into_iter()
            .map(|delay| BlinkSchedule::new(delay, BLINK_PERIOD))
            .collect();

        let mut t = 0.0;
        while t < 8.0 {
            let blinking = schedules.iter().filter(|s| s.is_blinking(t)).count();
            assert!(blinking <= 1, "{blinking} characters blinking at {t}");
            t += 0.01;
        }
    }

    #[test]
    fn test_validity() {
        assert!(BlinkSchedule::new(0.0, 4.0).is_valid());
        assert!(!BlinkSchedule::new(0.0, 0.1).is_valid());
        assert!(!BlinkSchedule::new(-1.0, 4.0).is_valid());
    }
}
