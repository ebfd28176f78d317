//! Character configuration records.
//!
//! One `CharacterConfig` describes everything that makes a character look
//! and move the way it does. The four built-in characters are plain values
//! of this type (see [`super::presets`]).

use serde::{Deserialize, Serialize};

use crate::error::{MonsterError, Result};
use crate::motion::{BlinkSchedule, Entrance, Tracking};
use crate::types::{Point, Rgba};

use super::pose::{EyeVariant, MouthVariant};
use super::profile::ProfileRotation;

// =============================================================================
// BODY
// =============================================================================

/// Fixed body silhouette, canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyShape {
    /// Rectangle with rounded top corners, standing on its bottom edge.
    ///
    /// A radius of half the width gives a semicircular cap.
    RoundedTop {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
    },
    /// Two quadratic curves meeting at the top centre, flat base:
    ///
    /// ```text
    /// M cx-hw base  Q cx-hw top, cx top  Q cx+hw top, cx+hw base  Z
    /// ```
    Dome {
        center_x: f32,
        base_y: f32,
        half_width: f32,
        height: f32,
    },
}

impl BodyShape {
    pub fn left(&self) -> f32 {
        match *self {
            BodyShape::RoundedTop { x, .. } => x,
            BodyShape::Dome {
                center_x,
                half_width,
                ..
            } => center_x - half_width,
        }
    }

    pub fn right(&self) -> f32 {
        match *self {
            BodyShape::RoundedTop { x, width, .. } => x + width,
            BodyShape::Dome {
                center_x,
                half_width,
                ..
            } => center_x + half_width,
        }
    }

    pub fn top(&self) -> f32 {
        match *self {
            BodyShape::RoundedTop { y, .. } => y,
            BodyShape::Dome { base_y, height, .. } => base_y - height,
        }
    }

    /// Bottom-centre. Leaning pivots here so the body stays planted.
    pub fn base(&self) -> Point {
        match *self {
            BodyShape::RoundedTop {
                x,
                y,
                width,
                height,
                ..
            } => Point::new(x + width / 2.0, y + height),
            BodyShape::Dome {
                center_x, base_y, ..
            } => Point::new(center_x, base_y),
        }
    }

    /// Centre of the bounding box. Entrance scaling grows from here.
    pub fn center(&self) -> Point {
        Point::new(
            (self.left() + self.right()) / 2.0,
            (self.top() + self.base().y) / 2.0,
        )
    }

    pub fn is_valid(&self) -> bool {
        match *self {
            BodyShape::RoundedTop {
                width,
                height,
                radius,
                ..
            } => width > 0.0 && height > 0.0 && radius >= 0.0 && radius * 2.0 <= width.min(height * 2.0),
            BodyShape::Dome {
                half_width, height, ..
            } => half_width > 0.0 && height > 0.0,
        }
    }
}

// =============================================================================
// FEATURES
// =============================================================================

/// Eye placement at rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeConfig {
    pub left: Point,
    pub right: Point,
    /// Sclera radius, or dot radius for dot eyes.
    pub radius: f32,
    /// Pupil radius inside each sclera, `[left, right]`.
    pub pupil_radii: [f32; 2],
}

/// Mouth placement and shape at rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouthConfig {
    pub center: Point,
    /// End to end.
    pub width: f32,
    /// Drop of the smile's control point below its ends. Zero draws a
    /// straight line.
    #[serde(default)]
    pub depth: f32,
    /// Closed, filled smile instead of a stroked curve.
    #[serde(default)]
    pub filled: bool,
    /// Centre of the attentive dot or bar, relative to `center`.
    #[serde(default)]
    pub attentive_offset: Point,
    /// Radius of the attentive dot, or length of the attentive bar.
    pub attentive_size: f32,
}

/// Which shape each reactive state picks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseTable {
    /// Eyes while idle or focused.
    pub eyes: EyeVariant,
    /// Eyes while the password is visible.
    pub password_eyes: EyeVariant,
    /// Mouth while the form is focused.
    pub attentive_mouth: MouthVariant,
}

/// Where everything points while the password is visible.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AvertedPose {
    /// Face shift.
    pub face: Point,
    /// Pupil offset inside each eye.
    pub pupil: Point,
    /// Extra mouth displacement, blended in with the gaze.
    pub mouth: Point,
    /// Profile rotation `(r, v)` for characters that rotate.
    pub rotation: Point,
}

/// Colours of one character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub body: Rgba,
    pub eye_white: Rgba,
    pub pupil: Rgba,
    pub mouth: Rgba,
}

/// Fixed rotation of the whole character, clockwise degrees about `pivot`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tilt {
    pub degrees: f32,
    pub pivot: Point,
}

impl Tilt {
    pub const fn new(degrees: f32, pivot: Point) -> Self {
        Self { degrees, pivot }
    }

    pub fn is_identity(&self) -> bool {
        self.degrees == 0.0
    }

    /// Rotate a character-local point onto the canvas.
    pub fn apply(&self, p: Point) -> Point {
        self.rotate(p, self.degrees)
    }

    /// Canvas point back into the character's untilted frame.
    pub fn undo(&self, p: Point) -> Point {
        self.rotate(p, -self.degrees)
    }

    fn rotate(&self, p: Point, degrees: f32) -> Point {
        if degrees == 0.0 {
            return p;
        }
        // Screen y points down, so a positive angle turns clockwise.
        let (sin, cos) = degrees.to_radians().sin_cos();
        let d = p - self.pivot;
        Point::new(
            self.pivot.x + d.x * cos - d.y * sin,
            self.pivot.y + d.x * sin + d.y * cos,
        )
    }
}

// =============================================================================
// CHARACTER
// =============================================================================

/// Everything one character needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterConfig {
    pub name: String,
    pub body: BodyShape,
    pub palette: Palette,
    /// Origin for the whole-face shift.
    pub face_anchor: Point,
    pub face: Tracking,
    pub eyes: EyeConfig,
    /// Pupil tracking, anchored at each eye's rest centre.
    pub pupil: Tracking,
    pub mouth: MouthConfig,
    pub poses: PoseTable,
    /// Skew in degrees while the form is focused.
    pub focus_lean: f32,
    #[serde(default)]
    pub averted: AvertedPose,
    #[serde(default)]
    pub blink: BlinkSchedule,
    /// Fade-in after mount.
    #[serde(default)]
    pub entrance: Entrance,
    #[serde(default)]
    pub tilt: Tilt,
    /// Pseudo-3D profile rotation in place of the face shift.
    #[serde(default)]
    pub profile: Option<ProfileRotation>,
}

impl CharacterConfig {
    /// Check the record can be animated. Returns the first problem found.
    pub fn validate(&self) -> Result<()> {
        let name = &self.name;
        let invalid = |what: String| Err(MonsterError::Invalid(format!("{name}: {what}")));

        if name.trim().is_empty() {
            return Err(MonsterError::Invalid("character name is empty".to_string()));
        }
        if !self.body.is_valid() {
            return invalid("body shape has no area or an oversized corner radius".to_string());
        }
        for (what, tracking) in [("face", &self.face), ("pupil", &self.pupil)] {
            if !(tracking.divisor.is_finite() && tracking.divisor > 0.0) {
                return invalid(format!("{what} divisor must be positive"));
            }
            if !(tracking.max_shift.is_finite() && tracking.max_shift >= 0.0) {
                return invalid(format!("{what} max_shift must be non-negative"));
            }
        }
        if self.eyes.radius <= 0.0 || self.eyes.pupil_radii.iter().any(|r| *r < 0.0) {
            return invalid("eye radii must be positive".to_string());
        }
        if self.mouth.width <= 0.0 || self.mouth.attentive_size <= 0.0 {
            return invalid("mouth width and attentive size must be positive".to_string());
        }
        if !self.focus_lean.is_finite() || self.focus_lean.abs() >= 60.0 {
            return invalid("focus_lean must be within ±60 degrees".to_string());
        }
        if !self.blink.is_valid() {
            return invalid("blink period must be at least the blink duration".to_string());
        }
        if !self.entrance.is_valid() {
            return invalid("entrance needs a non-negative delay and duration and a positive start scale".to_string());
        }
        if !self.tilt.degrees.is_finite() {
            return invalid("tilt must be finite".to_string());
        }
        if let Some(profile) = &self.profile {
            profile.validate().map_err(|err| match err {
                MonsterError::Invalid(msg) => MonsterError::Invalid(format!("{name}: {msg}")),
                other => other,
            })?;
        }
        Ok(())
    }
}
