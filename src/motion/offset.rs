//! Directional offsets - how far a feature leans toward the cursor.
//!
//! Every tracked feature has an anchor. The cursor's direction from the
//! anchor gives the angle, its distance (divided by a sensitivity divisor
//! and capped at 1) gives how much of the feature's `max_shift` is used.
//!
//! ```text
//! angle      = atan2(cy - ay, cx - ax)
//! normalized = min(distance / divisor, 1)
//! offset     = (cos(angle), sin(angle)) * normalized * max_shift
//! ```
//!
//! # Example
//!
//! ```
//! use login_monsters::motion::offset::{directional_offset, Tracking};
//! use login_monsters::types::Point;
//!
//! let pupil = Tracking::pupil(5.0);
//! let offset = directional_offset(Point::new(100.0, 100.0), Point::new(300.0, 100.0), &pupil);
//! assert!((offset.x - 5.0).abs() < 1e-4);
//! assert!(offset.y.abs() < 1e-4);
//! ```

use serde::{Deserialize, Serialize};

use crate::types::Point;

// =============================================================================
// SENSITIVITY DIVISORS
// =============================================================================

/// Pupil-only tracking (eyes without a face shift).
pub const PUPIL_DIVISOR: f32 = 50.0;

/// Pupil inside an eye that itself moves with the face.
pub const EYE_IN_FACE_DIVISOR: f32 = 100.0;

/// Whole face or body shift.
pub const FACE_DIVISOR: f32 = 150.0;

// =============================================================================
// TRACKING CONFIG
// =============================================================================

/// How a single anchor reacts to the cursor.
///
/// A larger `divisor` makes the feature less sensitive: the cursor has to be
/// farther away before the full `max_shift` is reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tracking {
    pub divisor: f32,
    pub max_shift: f32,
}

impl Default for Tracking {
    fn default() -> Self {
        Self::face(10.0)
    }
}

impl Tracking {
    pub const fn new(divisor: f32, max_shift: f32) -> Self {
        Self { divisor, max_shift }
    }

    pub const fn pupil(max_shift: f32) -> Self {
        Self::new(PUPIL_DIVISOR, max_shift)
    }

    pub const fn eye_in_face(max_shift: f32) -> Self {
        Self::new(EYE_IN_FACE_DIVISOR, max_shift)
    }

    pub const fn face(max_shift: f32) -> Self {
        Self::new(FACE_DIVISOR, max_shift)
    }
}

// =============================================================================
// CALCULATOR
// =============================================================================

/// Direction from anchor to cursor, radians, standard `atan2` convention
/// (y grows downward on the canvas, so positive angles point down).
#[inline]
pub fn angle(anchor: Point, cursor: Point) -> f32 {
    (cursor.y - anchor.y).atan2(cursor.x - anchor.x)
}

/// Distance factor in `[0, 1]`.
#[inline]
pub fn normalized_distance(anchor: Point, cursor: Point, divisor: f32) -> f32 {
    (anchor.distance(cursor) / divisor).min(1.0)
}

/// Raw (unsmoothed) offset of a feature toward the cursor.
///
/// The magnitude never exceeds `tracking.max_shift`. A cursor sitting
/// exactly on the anchor gives a zero offset.
pub fn directional_offset(anchor: Point, cursor: Point, tracking: &Tracking) -> Point {
    let theta = angle(anchor, cursor);
    let magnitude = normalized_distance(anchor, cursor, tracking.divisor) * tracking.max_shift;
    Point::new(theta.cos() * magnitude, theta.sin() * magnitude)
}

// =============================================================================
// TESTS
// =============================================================================
