//! Profile rotation - a pseudo-3D head turn.
//!
//! Instead of sliding the whole face, a rotating character maps the cursor's
//! offset from its face centre to a rotation factor `r` in `[-1, 1]`
//! (horizontal) and `v` in `[-1, 1]` (vertical). Eyes slide sideways with `r` and disappear once they would
//! be drawn past the silhouette's edge; the mouth slides and narrows as the
//! head turns away from the viewer.
//!
//! ```text
//! r       = clamp((cursor_x - face_x) / range, -1, 1)
//! left_x  = face_x - spread + r * travel     visible iff left_x  >  body_left  + margin
//! right_x = face_x + spread + r * travel     visible iff right_x <  body_right - margin
//! mouth_w = width * (1 - foreshortening * |r|)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{MonsterError, Result};
use crate::types::Point;

use super::config::{BodyShape, MouthConfig};

/// Geometry of the head turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRotation {
    pub face_center: Point,
    /// Cursor distance from the face centre that gives full rotation.
    pub rotation_range: f32,
    /// Half the distance between the eyes at rest.
    pub eye_spread: f32,
    /// Horizontal eye travel at full rotation.
    pub eye_travel: f32,
    /// How far inside the silhouette an eye must stay to be drawn.
    pub edge_margin: f32,
    /// Horizontal mouth travel at full rotation.
    pub mouth_shift: f32,
    /// Mouth width lost at full rotation, as a fraction.
    pub foreshortening: f32,
    /// Vertical eye travel at full `v`.
    pub vertical_shift: f32,
    /// Vertical mouth travel at full `v`.
    pub mouth_vertical_shift: f32,
}

impl Default for ProfileRotation {
    fn default() -> Self {
        Self {
            face_center: Point::new(370.0, 230.0),
            rotation_range: 150.0,
            eye_spread: 35.0,
            eye_travel: 40.0,
            edge_margin: 10.0,
            mouth_shift: 30.0,
            foreshortening: 0.3,
            vertical_shift: 10.0,
            mouth_vertical_shift: 5.0,
        }
    }
}

impl ProfileRotation {
    /// Cursor position → `(r, v)`, each clamped to `[-1, 1]`, zero with the
    /// cursor on the face centre.
    pub fn rotation_factor(&self, cursor: Point) -> Point {
        let delta = cursor - self.face_center;
        Point::new(
            (delta.x / self.rotation_range).clamp(-1.0, 1.0),
            (delta.y / self.rotation_range).clamp(-1.0, 1.0),
        )
    }

    /// Eye x positions `[left, right]` for rotation `r`.
    pub fn eye_x(&self, r: f32) -> [f32; 2] {
        let base = self.face_center.x + r * self.eye_travel;
        [base - self.eye_spread, base + self.eye_spread]
    }

    /// Visibility `[left, right]`: an eye is hidden once it reaches the
    /// silhouette edge minus the margin.
    pub fn eye_visibility(&self, r: f32, body_left: f32, body_right: f32) -> [bool; 2] {
        let [left, right] = self.eye_x(r);
        [
            left > body_left + self.edge_margin,
            right < body_right - self.edge_margin,
        ]
    }

    /// Eye centres and visibility for a rotation `(r, v)`.
    pub fn eyes(&self, rotation: Point, body: &BodyShape) -> [(Point, bool); 2] {
        let [left_x, right_x] = self.eye_x(rotation.x);
        let [left_visible, right_visible] = self.eye_visibility(rotation.x, body.left(), body.right());
        let y = self.face_center.y + rotation.y * self.vertical_shift;
        [
            (Point::new(left_x, y), left_visible),
            (Point::new(right_x, y), right_visible),
        ]
    }

    /// Mouth centre and width for a rotation `(r, v)`.
    pub fn mouth(&self, rotation: Point, mouth: &MouthConfig) -> (Point, f32) {
        let center = Point::new(
            mouth.center.x + rotation.x * self.mouth_shift,
            mouth.center.y + rotation.y * self.mouth_vertical_shift,
        );
        let width = mouth.width * (1.0 - self.foreshortening * rotation.x.abs().min(1.0));
        (center, width)
    }

    pub fn validate(&self) -> Result<()> {
        let problem = if !(self.rotation_range.is_finite() && self.rotation_range > 0.0) {
            "profile rotation_range must be positive"
        } else if !(0.0..1.0).contains(&self.foreshortening) {
            "profile foreshortening must be in [0, 1)"
        } else if self.eye_spread < 0.0 || self.eye_travel < 0.0 || self.edge_margin < 0.0 {
            "profile distances must be non-negative"
        } else {
            return Ok(());
        };
        Err(MonsterError::Invalid(problem.to_string()))
    }
}
