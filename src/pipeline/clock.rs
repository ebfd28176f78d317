//! Frame clock - wall time to per-frame deltas.
//!
//! Springs are stable at any step, but a long stall (terminal suspended,
//! debugger paused) would otherwise make the scene jump straight to its
//! targets. Deltas are clamped to [`MAX_FRAME_DELTA`].
//!
//! # Example
//!
//! ```
//! use login_monsters::pipeline::FrameClock;
//! use std::time::{Duration, Instant};
//!
//! let mut clock = FrameClock::new(60);
//! let start = Instant::now();
//!
//! assert_eq!(clock.tick_at(start), 0.0);
//! let dt = clock.tick_at(start + Duration::from_millis(16));
//! assert!((dt - 0.016).abs() < 1e-6);
//! ```

use std::time::{Duration, Instant};

/// Longest step a single frame may take, in seconds.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Clamp a raw delta into `[0, MAX_FRAME_DELTA]`.
#[inline]
pub fn clamp_delta(dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, MAX_FRAME_DELTA)
}

/// Tracks the previous frame and the target frame rate.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    last: Option<Instant>,
    frames: u64,
}

impl FrameClock {
    /// Clock for `fps` frames per second (at least 1).
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            last: None,
            frames: 0,
        }
    }

    /// Target time between frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Frames ticked so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Delta since the previous tick, clamped. The first tick returns 0.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => clamp_delta(now.saturating_duration_since(last).as_secs_f32()),
            None => 0.0,
        };
        self.last = Some(now);
        self.frames += 1;
        dt
    }

    /// How long to wait for input before the next frame is due.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => self.interval.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60)
    }
}
