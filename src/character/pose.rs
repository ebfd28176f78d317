//! Resolved poses - what a character looks like in one frame.

use serde::{Deserialize, Serialize};

use crate::motion::EntranceFrame;
use crate::types::{Point, ReactiveFlags};

use super::config::{BodyShape, Palette, Tilt};

// =============================================================================
// VARIANTS
// =============================================================================

/// How the eyes are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyeVariant {
    /// A solid dot that moves with the gaze.
    TrackingDot,
    /// A white sclera with a pupil moving inside it.
    TrackingPupilInSclera,
    /// Closed, upward arc.
    SquintArc,
}

/// How the mouth is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouthVariant {
    SmileCurve,
    AttentiveDot,
    VerticalBar,
    SmallCircle,
}

/// Which branch of the decision table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseState {
    /// Neither flag set: smile, tracking, blinking.
    Idle,
    /// Form focused, password hidden: attentive mouth, lean.
    Attentive,
    /// Password visible: looking away, small mouth, no lean.
    Averted,
}

impl PoseState {
    /// Password visible beats form focused beats idle.
    pub fn resolve(flags: ReactiveFlags) -> Self {
        if flags.password_visible() {
            PoseState::Averted
        } else if flags.form_focused() {
            PoseState::Attentive
        } else {
            PoseState::Idle
        }
    }
}

// =============================================================================
// POSES
// =============================================================================

/// One eye, absolute canvas position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyePose {
    pub variant: EyeVariant,
    /// Eye centre with the face shift applied.
    pub center: Point,
    /// Pupil (or dot) displacement from `center`.
    pub pupil_offset: Point,
    pub radius: f32,
    pub pupil_radius: f32,
    /// Vertical scale, below 1 mid-blink.
    pub scale_y: f32,
    /// False once the eye has rotated behind the silhouette.
    pub visible: bool,
}

impl EyePose {
    /// Where the pupil or dot is drawn.
    pub fn pupil_center(&self) -> Point {
        self.center + self.pupil_offset
    }
}

/// The mouth, absolute canvas position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouthPose {
    pub variant: MouthVariant,
    pub center: Point,
    /// Smile width, end to end.
    pub width: f32,
    /// Smile control-point drop; zero is a straight line.
    pub depth: f32,
    pub filled: bool,
    /// Attentive dot or bar centre relative to `center`.
    pub attentive_offset: Point,
    pub attentive_size: f32,
}

/// Everything a renderer needs for one character in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterPose {
    pub name: String,
    pub state: PoseState,
    pub body: BodyShape,
    pub palette: Palette,
    /// Skew in degrees, pivoting at `pivot`.
    pub lean: f32,
    pub pivot: Point,
    pub face_offset: Point,
    pub eyes: [EyePose; 2],
    pub mouth: MouthPose,
    /// Fade-in state; settled once the entrance is over.
    pub entrance: EntranceFrame,
    pub tilt: Tilt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_idle() {
        assert_eq!(PoseState::resolve(ReactiveFlags::empty()), PoseState::Idle);
    }

    #[test]
    fn test_resolve_focused() {
        assert_eq!(PoseState::resolve(ReactiveFlags::FORM_FOCUSED), PoseState::Attentive);
    }

    #[test]
    fn test_password_overrides_focus() {
        let both = ReactiveFlags::FORM_FOCUSED | ReactiveFlags::PASSWORD_VISIBLE;
        assert_eq!(PoseState::resolve(both), PoseState::Averted);
        assert_eq!(PoseState::resolve(ReactiveFlags::PASSWORD_VISIBLE), PoseState::Averted);
    }
}
