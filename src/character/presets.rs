//! The built-in cast.
//!
//! | Character | Body              | Eyes            | Focus lean | First blink | Enters    |
//! |-----------|-------------------|-----------------|------------|-------------|-----------|
//! | Violetto  | tall purple block | pupils          | -8°        | 0 s         | drops in  |
//! | Inky      | dark block        | pupils          | -8°        | 1 s         | drops in  |
//! | Gloop     | orange dome       | dots            | -3°        | 0.5 s       | grows in  |
//! | Nugget    | yellow gumdrop    | profile dots    | -5°        | 1.5 s       | grows in  |
//!
//! Everyone blinks every 2.2 s. Nugget's body pokes past the right edge of
//! the canvas and is clipped there.

use crate::motion::blink::BLINK_PERIOD;
use crate::motion::{BlinkSchedule, Entrance, Tracking};
use crate::types::{Point, Rgba};

use super::config::{
    AvertedPose, BodyShape, CharacterConfig, EyeConfig, MouthConfig, Palette, PoseTable, Tilt,
};
use super::pose::{EyeVariant, MouthVariant};
use super::profile::ProfileRotation;

const ENTRANCE_DURATION: f32 = 0.5;
const DROP: f32 = -20.0;
const GROW_FROM: f32 = 0.8;

fn palette(body: u32, mouth: Rgba) -> Palette {
    Palette {
        body: Rgba::from_rgb_int(body),
        eye_white: Rgba::WHITE,
        pupil: Rgba::BLACK,
        mouth,
    }
}

/// Tall purple block at the back.
pub fn violetto() -> CharacterConfig {
    let face = Point::new(217.5, 60.0);
    CharacterConfig {
        name: "Violetto".to_string(),
        body: BodyShape::RoundedTop {
            x: 135.0,
            y: 20.0,
            width: 165.0,
            height: 340.0,
            radius: 2.0,
        },
        palette: palette(0x7e27ff, Rgba::BLACK),
        face_anchor: face,
        face: Tracking::face(20.0),
        eyes: EyeConfig {
            left: face + Point::new(-25.0, -8.0),
            right: face + Point::new(25.0, -8.0),
            radius: 8.0,
            pupil_radii: [4.0, 4.0],
        },
        pupil: Tracking::eye_in_face(4.0),
        mouth: MouthConfig {
            center: face + Point::new(0.0, 20.0),
            width: 16.0,
            depth: 4.0,
            filled: false,
            attentive_offset: Point::new(0.5, -8.0),
            attentive_size: 28.0,
        },
        poses: PoseTable {
            eyes: EyeVariant::TrackingPupilInSclera,
            password_eyes: EyeVariant::TrackingPupilInSclera,
            attentive_mouth: MouthVariant::VerticalBar,
        },
        focus_lean: -8.0,
        averted: AvertedPose {
            face: Point::new(-15.0, 0.0),
            pupil: Point::new(-4.0, 0.0),
            mouth: Point::new(-4.0, 0.0),
            rotation: Point::ZERO,
        },
        blink: BlinkSchedule::new(0.0, BLINK_PERIOD),
        entrance: Entrance::drop_in(0.1, ENTRANCE_DURATION, DROP),
        tilt: Tilt::default(),
        profile: None,
    }
}

/// Dark block in the middle, right of Violetto.
pub fn inky() -> CharacterConfig {
    let face = Point::new(300.0, 150.0);
    CharacterConfig {
        name: "Inky".to_string(),
        body: BodyShape::RoundedTop {
            x: 250.0,
            y: 120.0,
            width: 100.0,
            height: 240.0,
            radius: 2.0,
        },
        palette: palette(0x1d2025, Rgba::WHITE),
        face_anchor: face,
        face: Tracking::face(15.0),
        eyes: EyeConfig {
            left: face + Point::new(-15.0, -5.0),
            right: face + Point::new(15.0, -5.0),
            radius: 10.0,
            pupil_radii: [5.0, 6.0],
        },
        pupil: Tracking::eye_in_face(5.0),
        mouth: MouthConfig {
            center: face + Point::new(0.0, 20.0),
            width: 14.0,
            depth: 3.0,
            filled: false,
            attentive_offset: Point::new(0.0, -2.0),
            attentive_size: 14.0,
        },
        poses: PoseTable {
            eyes: EyeVariant::TrackingPupilInSclera,
            password_eyes: EyeVariant::TrackingPupilInSclera,
            attentive_mouth: MouthVariant::VerticalBar,
        },
        focus_lean: -8.0,
        averted: AvertedPose {
            face: Point::new(-12.0, 0.0),
            pupil: Point::new(-5.0, 0.0),
            mouth: Point::new(-3.0, 0.0),
            rotation: Point::ZERO,
        },
        blink: BlinkSchedule::new(1.0, BLINK_PERIOD),
        entrance: Entrance::drop_in(0.2, ENTRANCE_DURATION, DROP),
        tilt: Tilt::default(),
        profile: None,
    }
}

/// Orange dome at the front left.
pub fn gloop() -> CharacterConfig {
    let face = Point::new(160.0, 270.0);
    CharacterConfig {
        name: "Gloop".to_string(),
        body: BodyShape::Dome {
            center_x: 160.0,
            base_y: 360.0,
            half_width: 100.0,
            height: 130.0,
        },
        palette: palette(0xff8a28, Rgba::BLACK),
        face_anchor: face,
        face: Tracking::face(15.0),
        eyes: EyeConfig {
            left: face + Point::new(-25.0, 0.0),
            right: face + Point::new(25.0, 0.0),
            radius: 6.0,
            pupil_radii: [6.0, 6.0],
        },
        // Dot eyes ride on the face shift only.
        pupil: Tracking::pupil(0.0),
        mouth: MouthConfig {
            center: face + Point::new(0.0, 20.0),
            width: 22.0,
            depth: 19.0,
            filled: true,
            attentive_offset: Point::new(0.0, 8.0),
            attentive_size: 6.0,
        },
        poses: PoseTable {
            eyes: EyeVariant::TrackingDot,
            password_eyes: EyeVariant::TrackingDot,
            attentive_mouth: MouthVariant::AttentiveDot,
        },
        focus_lean: -3.0,
        averted: AvertedPose {
            face: Point::new(-12.0, 0.0),
            pupil: Point::ZERO,
            mouth: Point::new(-3.0, 0.0),
            rotation: Point::ZERO,
        },
        blink: BlinkSchedule::new(0.5, BLINK_PERIOD),
        entrance: Entrance::grow_in(0.3, ENTRANCE_DURATION, GROW_FROM),
        tilt: Tilt::default(),
        profile: None,
    }
}

/// Yellow gumdrop at the front right, tilted 10°. Turns its head instead
/// of sliding its face.
pub fn nugget() -> CharacterConfig {
    let profile = ProfileRotation::default();
    let face = profile.face_center;
    CharacterConfig {
        name: "Nugget".to_string(),
        body: BodyShape::RoundedTop {
            x: 320.0,
            y: 180.0,
            width: 100.0,
            height: 180.0,
            radius: 50.0,
        },
        palette: palette(0xf3d300, Rgba::BLACK),
        face_anchor: face,
        face: Tracking::face(0.0),
        eyes: EyeConfig {
            left: Point::new(face.x - profile.eye_spread, face.y),
            right: Point::new(face.x + profile.eye_spread, face.y),
            radius: 4.0,
            pupil_radii: [4.0, 4.0],
        },
        pupil: Tracking::pupil(0.0),
        mouth: MouthConfig {
            center: face + Point::new(0.0, 25.0),
            width: 80.0,
            depth: 0.0,
            filled: false,
            attentive_offset: Point::ZERO,
            attentive_size: 5.0,
        },
        poses: PoseTable {
            eyes: EyeVariant::TrackingDot,
            password_eyes: EyeVariant::TrackingDot,
            attentive_mouth: MouthVariant::AttentiveDot,
        },
        focus_lean: -5.0,
        averted: AvertedPose {
            rotation: Point::new(-0.6, -0.3),
            ..AvertedPose::default()
        },
        blink: BlinkSchedule::new(1.5, BLINK_PERIOD),
        entrance: Entrance::grow_in(0.4, ENTRANCE_DURATION, GROW_FROM),
        tilt: Tilt::new(10.0, Point::new(370.0, 300.0)),
        profile: Some(profile),
    }
}

/// Violetto, Inky, Gloop, Nugget: back to front.
pub fn default_cast() -> Vec<CharacterConfig> {
    vec![violetto(), inky(), gloop(), nugget()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_order() {
        let names: Vec<_> = default_cast().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["Violetto", "Inky", "Gloop", "Nugget"]);
    }

    #[test]
    fn test_presets_validate() {
        for config in default_cast() {
            assert!(config.validate().is_ok(), "{}", config.name);
        }
    }

    #[test]
    fn test_blink_delays_are_staggered() {
        let delays: Vec<f32> = default_cast().iter().map(|c| c.blink.delay).collect();
        assert_eq!(delays, [0.0, 1.0, 0.5, 1.5]);
        assert!(default_cast().iter().all(|c| c.blink.period == 2.2));
    }

    #[test]
    fn test_entrances_are_staggered() {
        let delays: Vec<f32> = default_cast().iter().map(|c| c.entrance.delay).collect();
        assert_eq!(delays, [0.1, 0.2, 0.3, 0.4]);

        let drops: Vec<bool> = default_cast().iter().map(|c| c.entrance.rise < 0.0).collect();
        assert_eq!(drops, [true, true, false, false]);
        assert!(gloop().entrance.scale_from < 1.0);
    }

    #[test]
    fn test_focus_leans() {
        let leans: Vec<f32> = default_cast().iter().map(|c| c.focus_lean).collect();
        assert_eq!(leans, [-8.0, -8.0, -3.0, -5.0]);
    }

    #[test]
    fn test_averted_gaze_looks_left() {
        // Total pupil displacement is the face shift plus the pupil's own.
        let totals: Vec<f32> = [violetto(), inky()]
            .iter()
            .map(|c| c.averted.face.x + c.averted.pupil.x)
            .collect();
        assert_eq!(totals, [-19.0, -17.0]);
        assert_eq!(violetto().averted.face.y, 0.0);
    }

    #[test]
    fn test_pupils_fit_inside_sclera() {
        for config in [violetto(), inky()] {
            let smallest = config.eyes.pupil_radii[0].min(config.eyes.pupil_radii[1]);
            assert!(config.pupil.max_shift <= config.eyes.radius - smallest, "{}", config.name);
        }
    }

    #[test]
    fn test_only_nugget_rotates_and_tilts() {
        let rotating: Vec<_> = default_cast()
            .into_iter()
            .filter(|c| c.profile.is_some())
            .map(|c| c.name)
            .collect();
        assert_eq!(rotating, ["Nugget"]);

        let tilted: Vec<_> = default_cast()
            .into_iter()
            .filter(|c| !c.tilt.is_identity())
            .map(|c| c.name)
            .collect();
        assert_eq!(tilted, ["Nugget"]);
    }

    #[test]
    fn test_nugget_face_matches_profile() {
        let nugget = nugget();
        let Some(profile) = nugget.profile else {
            panic!("nugget has no profile");
        };
        assert_eq!(profile.face_center, Point::new(370.0, 230.0));
        assert_eq!(nugget.body.left(), 320.0);
        assert_eq!(nugget.body.right(), 420.0);
        assert_eq!(nugget.body.top(), 180.0);
    }
}
