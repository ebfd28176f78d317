//! Spring smoothing - damped second-order filters for every moving part.
//!
//! A `Spring` holds `(value, velocity, target)` and persists across frames.
//! Targets change whenever the inputs change; the frame loop calls
//! [`Spring::step`] once per frame and the renderer samples
//! [`Spring::value`] whenever it draws. Nothing is pushed downstream.
//!
//! Each step uses the closed-form solution of the damped harmonic
//! oscillator, so any frame delta is stable. This matters for the lean
//! profile (stiffness 1000, mass 0.1), where a fixed-step integrator would
//! need sub-millisecond steps.
//!
//! # Profiles
//!
//! | Profile | Stiffness | Damping | Mass |
//! |---------|-----------|---------|------|
//! | Pupil   | 150       | 15      | 1    |
//! | Face    | 120       | 20      | 1    |
//! | Lean    | 1000      | 50      | 0.1  |
//! | Gaze    | 120       | 20      | 1    |

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Damping ratios this close to 1 use the critically damped branch.
const CRITICAL_EPSILON: f32 = 1e-3;

// =============================================================================
// CONFIG
// =============================================================================

/// Physical parameters of a spring plus its rest thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Snap to target once closer than this...
    pub rest_delta: f32,
    /// ...and slower than this.
    pub rest_speed: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::FACE
    }
}

impl SpringConfig {
    /// Pupils inside the eye: quick and a little bouncy.
    pub const PUPIL: Self = Self::new(150.0, 15.0, 1.0);

    /// Whole face or eye group shift: smoother and slower.
    pub const FACE: Self = Self::new(120.0, 20.0, 1.0);

    /// Lean/skew reaction to focus: effectively a snap.
    pub const LEAN: Self = Self::new(1000.0, 50.0, 0.1);

    /// Gaze-aversion blend factor.
    pub const GAZE: Self = Self::new(120.0, 20.0, 1.0);

    /// Profile head turn: looser than the face shift.
    pub const ROTATION: Self = Self::new(100.0, 15.0, 1.0);

    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            rest_delta: 0.001,
            rest_speed: 0.001,
        }
    }

    /// Undamped angular frequency `sqrt(k / m)`.
    pub fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    /// `c / (2 * sqrt(k * m))`: below 1 oscillates, 1 is critical, above 1
    /// creeps.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Parameters a spring can actually run with.
    pub fn is_valid(&self) -> bool {
        self.stiffness.is_finite()
            && self.damping.is_finite()
            && self.mass.is_finite()
            && self.stiffness > 0.0
            && self.damping >= 0.0
            && self.mass > 0.0
            && self.rest_delta >= 0.0
            && self.rest_speed >= 0.0
    }
}

/// The smoothing profiles a character uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringProfiles {
    pub pupil: SpringConfig,
    pub face: SpringConfig,
    pub lean: SpringConfig,
    pub gaze: SpringConfig,
    /// Profile rotation of characters that turn their head.
    pub rotation: SpringConfig,
}

impl Default for SpringProfiles {
    fn default() -> Self {
        Self {
            pupil: SpringConfig::PUPIL,
            face: SpringConfig::FACE,
            lean: SpringConfig::LEAN,
            gaze: SpringConfig::GAZE,
            rotation: SpringConfig::ROTATION,
        }
    }
}

impl SpringProfiles {
    /// Name of the first profile that cannot run, if any.
    pub fn first_invalid(&self) -> Option<&'static str> {
        [
            ("pupil", &self.pupil),
            ("face", &self.face),
            ("lean", &self.lean),
            ("gaze", &self.gaze),
            ("rotation", &self.rotation),
        ]
        .into_iter()
        .find(|(_, config)| !config.is_valid())
        .map(|(name, _)| name)
    }
}

// =============================================================================
// SCALAR SPRING
// =============================================================================

/// A single damped spring channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// A spring resting at `initial`.
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Current interpolated value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Drive toward a new target. Value and velocity carry over, so an
    /// abrupt target change still produces continuous motion.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Place the spring at rest on `value` (used on mount).
    pub fn jump_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advance by `dt` seconds. Returns true while still moving.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.is_at_rest() {
            return false;
        }
        if !(dt > 0.0) {
            return true;
        }

        let (displacement, velocity) = solve(&self.config, self.value - self.target, self.velocity, dt);
        self.value = self.target + displacement;
        self.velocity = velocity;

        if displacement.abs() < self.config.rest_delta && velocity.abs() < self.config.rest_speed {
            self.jump_to(self.target);
            return false;
        }
        true
    }
}

/// Closed-form damped oscillator. Takes displacement from the target and
/// velocity, returns both after `t` seconds.
fn solve(config: &SpringConfig, x0: f32, v0: f32, t: f32) -> (f32, f32) {
    let omega = config.natural_frequency();
    let zeta = config.damping_ratio();

    if (zeta - 1.0).abs() < CRITICAL_EPSILON {
        // x(t) = e^(-wt) (x0 + (v0 + w x0) t)
        let c = v0 + omega * x0;
        let decay = (-omega * t).exp();
        let x = decay * (x0 + c * t);
        let v = decay * (v0 - omega * c * t);
        (x, v)
    } else if zeta < 1.0 {
        let decay_rate = zeta * omega;
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let b = (v0 + decay_rate * x0) / omega_d;
        let decay = (-decay_rate * t).exp();
        let (sin, cos) = (omega_d * t).sin_cos();
        let x = decay * (x0 * cos + b * sin);
        let v = decay * (v0 * cos - (decay_rate * b + omega_d * x0) * sin);
        (x, v)
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega * (zeta - root);
        let r2 = -omega * (zeta + root);
        let c1 = (v0 - r2 * x0) / (r1 - r2);
        let c2 = x0 - c1;
        let e1 = (r1 * t).exp();
        let e2 = (r2 * t).exp();
        let x = c1 * e1 + c2 * e2;
        let v = r1 * c1 * e1 + r2 * c2 * e2;
        (x, v)
    }
}

// =============================================================================
// 2D SPRING
// =============================================================================

/// Two independent spring channels driving a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring2 {
    x: Spring,
    y: Spring,
}

impl Spring2 {
    pub fn new(config: SpringConfig, initial: Point) -> Self {
        Self {
            x: Spring::new(config, initial.x),
            y: Spring::new(config, initial.y),
        }
    }

    #[inline]
    pub fn value(&self) -> Point {
        Point::new(self.x.value(), self.y.value())
    }

    #[inline]
    pub fn target(&self) -> Point {
        Point::new(self.x.target(), self.y.target())
    }

    pub fn set_target(&mut self, target: Point) {
        self.x.set_target(target.x);
        self.y.set_target(target.y);
    }

    pub fn jump_to(&mut self, value: Point) {
        self.x.jump_to(value.x);
        self.y.jump_to(value.y);
    }

    pub fn is_at_rest(&self) -> bool {
        self.x.is_at_rest() && self.y.is_at_rest()
    }

    pub fn step(&mut self, dt: f32) -> bool {
        let moving_x = self.x.step(dt);
        let moving_y = self.y.step(dt);
        moving_x || moving_y
    }
}

// =============================================================================
// TESTS
// =============================================================================
