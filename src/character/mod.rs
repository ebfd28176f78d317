//! Character - one parametrized animated monster.
//!
//! A [`Character`] is built from a [`CharacterConfig`] and the scene's shared
//! [`CursorSampler`]. Raw tracking targets are `spark_signals` deriveds over
//! the cursor signal; springs chase those targets once per frame; the
//! reactive flags pick the pose branch.
//!
//! ```text
//! cursor ──derived──► raw offsets ──update()──► spring targets
//!                                                   │ step(dt)
//! flags ──PoseState::resolve──────────────────────► pose(elapsed)
//! ```
//!
//! # Example
//!
//! ```
//! use login_monsters::character::{presets, Character, PoseState};
//! use login_monsters::motion::SpringProfiles;
//! use login_monsters::state::cursor::CursorSampler;
//! use login_monsters::types::ReactiveFlags;
//!
//! let cursor = CursorSampler::new();
//! let mut inky = Character::new(presets::inky(), &SpringProfiles::default(), &cursor);
//!
//! inky.update(ReactiveFlags::FORM_FOCUSED);
//! for _ in 0..60 {
//!     inky.step(1.0 / 60.0);
//! }
//! let pose = inky.pose(1.0);
//! assert_eq!(pose.state, PoseState::Attentive);
//! assert!((pose.lean + 8.0).abs() < 0.01);
//! ```

pub mod config;
pub mod pose;
pub mod presets;
pub mod profile;

pub use config::{
    AvertedPose, BodyShape, CharacterConfig, EyeConfig, MouthConfig, Palette, PoseTable, Tilt,
};
pub use pose::{CharacterPose, EyePose, EyeVariant, MouthPose, MouthVariant, PoseState};
pub use profile::ProfileRotation;

use spark_signals::{Derived, derived};

use crate::motion::{GazeAversion, Spring, Spring2, SpringProfiles, directional_offset};
use crate::state::cursor::CursorSampler;
use crate::types::{Point, ReactiveFlags};

/// A raw target computed from the cursor signal.
type TargetDerived = Derived<Point>;

fn target_derived(compute: impl Fn() -> Point + 'static) -> TargetDerived {
    let compute: Box<dyn Fn() -> Point> = Box::new(compute);
    derived(compute)
}

// =============================================================================
// RAW TARGETS
// =============================================================================

/// Unsmoothed tracking targets. Recomputed only when the cursor changes.
struct Targets {
    face: TargetDerived,
    pupils: [TargetDerived; 2],
    /// Profile rotation `(r, v)`, zero for characters that don't rotate.
    rotation: TargetDerived,
}

impl Targets {
    fn new(config: &CharacterConfig, cursor: &CursorSampler) -> Self {
        let face = {
            let cursor = cursor.signal();
            let (anchor, tracking) = (config.face_anchor, config.face);
            target_derived(move || directional_offset(anchor, cursor.get(), &tracking))
        };

        let pupil = |anchor: Point| {
            let cursor = cursor.signal();
            let tracking = config.pupil;
            target_derived(move || directional_offset(anchor, cursor.get(), &tracking))
        };
        let pupils = [pupil(config.eyes.left), pupil(config.eyes.right)];

        let rotation = match config.profile {
            Some(profile) => {
                let cursor = cursor.signal();
                target_derived(move || profile.rotation_factor(cursor.get()))
            }
            None => target_derived(|| Point::ZERO),
        };

        Self {
            face,
            pupils,
            rotation,
        }
    }
}

// =============================================================================
// CHARACTER
// =============================================================================

/// One animated character: config, spring state, and current pose branch.
pub struct Character {
    config: CharacterConfig,
    targets: Targets,
    face: Spring2,
    pupils: [Spring2; 2],
    rotation: Spring2,
    lean: Spring,
    gaze: GazeAversion,
    state: PoseState,
}

impl Character {
    /// Build a character at rest on the current cursor position.
    pub fn new(config: CharacterConfig, springs: &SpringProfiles, cursor: &CursorSampler) -> Self {
        let targets = Targets::new(&config, cursor);
        let mut character = Self {
            face: Spring2::new(springs.face, Point::ZERO),
            pupils: [
                Spring2::new(springs.pupil, Point::ZERO),
                Spring2::new(springs.pupil, Point::ZERO),
            ],
            rotation: Spring2::new(springs.rotation, Point::ZERO),
            lean: Spring::new(springs.lean, 0.0),
            gaze: GazeAversion::new(springs.gaze),
            state: PoseState::Idle,
            config,
            targets,
        };
        character.reset(ReactiveFlags::empty());
        character
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }

    /// Pose branch chosen by the last [`Character::update`].
    pub fn state(&self) -> PoseState {
        self.state
    }

    /// Current lean in degrees.
    pub fn lean(&self) -> f32 {
        self.lean.value()
    }

    /// Current gaze-aversion factor in `[0, 1]`.
    pub fn gaze_factor(&self) -> f32 {
        self.gaze.factor()
    }

    /// Raw (unsmoothed) face target for the current cursor.
    pub fn face_target(&self) -> Point {
        self.targets.face.get()
    }

    /// True once every spring has come to rest.
    pub fn is_settled(&self) -> bool {
        self.face.is_at_rest()
            && self.pupils.iter().all(Spring2::is_at_rest)
            && self.rotation.is_at_rest()
            && self.lean.is_at_rest()
            && self.gaze.factor() == self.gaze_target()
    }

    fn gaze_target(&self) -> f32 {
        if self.state == PoseState::Averted { 1.0 } else { 0.0 }
    }

    fn lean_target(&self) -> f32 {
        if self.state == PoseState::Attentive {
            self.config.focus_lean
        } else {
            0.0
        }
    }

    /// Read the flags and the raw targets, and point every spring at them.
    pub fn update(&mut self, flags: ReactiveFlags) {
        let state = PoseState::resolve(flags);
        if state != self.state {
            tracing::trace!(character = %self.config.name, from = ?self.state, to = ?state, "pose change");
            self.state = state;
        }

        self.face.set_target(self.targets.face.get());
        for (spring, target) in self.pupils.iter_mut().zip(&self.targets.pupils) {
            spring.set_target(target.get());
        }
        self.rotation.set_target(self.targets.rotation.get());
        let lean = self.lean_target();
        self.lean.set_target(lean);
        self.gaze.set_averted(state == PoseState::Averted);
    }

    /// Advance every spring by `dt` seconds. Returns true while anything
    /// is still moving.
    pub fn step(&mut self, dt: f32) -> bool {
        let mut moving = self.face.step(dt);
        for spring in &mut self.pupils {
            moving |= spring.step(dt);
        }
        moving |= self.rotation.step(dt);
        moving |= self.lean.step(dt);
        moving |= self.gaze.step(dt);
        moving
    }

    /// Snap every spring onto its target for `flags` (mount).
    pub fn reset(&mut self, flags: ReactiveFlags) {
        self.update(flags);
        self.face.jump_to(self.face.target());
        for spring in &mut self.pupils {
            spring.jump_to(spring.target());
        }
        self.rotation.jump_to(self.rotation.target());
        let lean = self.lean_target();
        self.lean.jump_to(lean);
        let averted = self.state == PoseState::Averted;
        self.gaze.reset(averted);
    }

    /// Resolve the pose at `elapsed` seconds of scene time.
    pub fn pose(&self, elapsed: f32) -> CharacterPose {
        let config = &self.config;
        let averted = &config.averted;

        let eye_variant = match self.state {
            PoseState::Averted => config.poses.password_eyes,
            _ => config.poses.eyes,
        };
        let mouth_variant = match self.state {
            PoseState::Idle => MouthVariant::SmileCurve,
            PoseState::Attentive => config.poses.attentive_mouth,
            PoseState::Averted => MouthVariant::SmallCircle,
        };
        let scale_y = match self.state {
            PoseState::Idle => config.blink.scale_at(elapsed),
            _ => 1.0,
        };

        let eye = |side: usize, center: Point, pupil_offset: Point, visible: bool| EyePose {
            variant: eye_variant,
            center,
            pupil_offset,
            radius: config.eyes.radius,
            pupil_radius: config.eyes.pupil_radii[side],
            scale_y,
            visible,
        };

        let (face_offset, eyes, mouth_center, mouth_width) = match &config.profile {
            Some(profile) => {
                let rotation = self.gaze.apply(self.rotation.value(), averted.rotation);
                let [(left, left_visible), (right, right_visible)] =
                    profile.eyes(rotation, &config.body);
                let (mouth_center, mouth_width) = profile.mouth(rotation, &config.mouth);
                (
                    Point::ZERO,
                    [
                        eye(0, left, Point::ZERO, left_visible),
                        eye(1, right, Point::ZERO, right_visible),
                    ],
                    mouth_center,
                    mouth_width,
                )
            }
            None => {
                let face_offset = self.gaze.apply(self.face.value(), averted.face);
                let [left, right] = self
                    .pupils
                    .map(|spring| self.gaze.apply(spring.value(), averted.pupil));
                // Eases in and out with the gaze factor.
                let mouth_shift = averted.mouth * self.gaze.factor();
                (
                    face_offset,
                    [
                        eye(0, config.eyes.left + face_offset, left, true),
                        eye(1, config.eyes.right + face_offset, right, true),
                    ],
                    config.mouth.center + face_offset + mouth_shift,
                    config.mouth.width,
                )
            }
        };

        CharacterPose {
            name: config.name.clone(),
            state: self.state,
            body: config.body,
            palette: config.palette,
            lean: self.lean.value(),
            pivot: config.body.base(),
            face_offset,
            eyes,
            mouth: MouthPose {
                variant: mouth_variant,
                center: mouth_center,
                width: mouth_width,
                depth: config.mouth.depth,
                filled: config.mouth.filled,
                attentive_offset: config.mouth.attentive_offset,
                attentive_size: config.mouth.attentive_size,
            },
            entrance: config.entrance.at(elapsed),
            tilt: config.tilt,
        }
    }
}

impl std::fmt::Debug for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Character")
            .field("name", &self.config.name)
            .field("state", &self.state)
            .field("face", &self.face.value())
            .field("lean", &self.lean.value())
            .field("gaze", &self.gaze.factor())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::SpringConfig;
    use crate::types::{Bounds, CANVAS_CENTER};

    const FRAME: f32 = 1.0 / 60.0;

    fn setup() -> CursorSampler {
        let cursor = CursorSampler::new();
        cursor.set_bounds(Some(Bounds::new(0.0, 0.0, 400.0, 400.0)));
        cursor
    }

    fn run(character: &mut Character, flags: ReactiveFlags, seconds: f32) {
        let frames = (seconds / FRAME).round() as usize;
        for _ in 0..frames {
            character.update(flags);
            character.step(FRAME);
        }
    }

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < 0.01
    }

    #[test]
    fn test_new_character_is_at_rest() {
        let cursor = setup();
        let character = Character::new(presets::violetto(), &SpringProfiles::default(), &cursor);
        assert!(character.is_settled());
        assert_eq!(character.state(), PoseState::Idle);
        assert_eq!(character.lean(), 0.0);
    }

    #[test]
    fn test_face_follows_cursor() {
        let cursor = setup();
        let mut character = Character::new(presets::violetto(), &SpringProfiles::default(), &cursor);

        cursor.sample(400.0, 60.0);
        let target = character.face_target();
        assert!((target.x - 20.0).abs() < 1e-3);
        assert!(target.y.abs() < 1e-3);

        run(&mut character, ReactiveFlags::empty(), 2.0);
        let pose = character.pose(2.0);
        assert!(close(pose.face_offset, target));
        assert!(close(pose.eyes[0].center, Point::new(192.5, 52.0) + target));
    }

    #[test]
    fn test_springs_do_not_jump() {
        let cursor = setup();
        let mut character = Character::new(presets::inky(), &SpringProfiles::default(), &cursor);

        cursor.sample(0.0, 0.0);
        character.update(ReactiveFlags::empty());
        character.step(FRAME);
        let pose = character.pose(0.0);
        assert!(pose.face_offset.length() < character.face_target().length());
    }

    #[test]
    fn test_focus_leans_and_changes_mouth() {
        let cursor = setup();
        let mut character = Character::new(presets::gloop(), &SpringProfiles::default(), &cursor);

        run(&mut character, ReactiveFlags::FORM_FOCUSED, 1.0);
        let pose = character.pose(1.0);
        assert_eq!(pose.state, PoseState::Attentive);
        assert!((pose.lean + 3.0).abs() < 0.01);
        assert_eq!(pose.mouth.variant, MouthVariant::AttentiveDot);
        assert_eq!(pose.pivot, Point::new(160.0, 360.0));

        run(&mut character, ReactiveFlags::empty(), 1.0);
        assert!(character.lean().abs() < 0.01);
        assert_eq!(character.pose(3.0).mouth.variant, MouthVariant::SmileCurve);
    }

    #[test]
    fn test_password_averts_regardless_of_cursor() {
        let profiles = SpringProfiles::default();
        let flags = ReactiveFlags::FORM_FOCUSED | ReactiveFlags::PASSWORD_VISIBLE;

        for (x, y) in [(0.0, 0.0), (400.0, 400.0), (200.0, 0.0)] {
            let cursor = setup();
            let mut character = Character::new(presets::violetto(), &profiles, &cursor);
            cursor.sample(x, y);
            run(&mut character, flags, 2.0);

            let pose = character.pose(2.0);
            let averted = &character.config().averted;
            assert_eq!(pose.state, PoseState::Averted);
            assert!(close(pose.eyes[0].pupil_offset, averted.pupil));
            assert!(close(pose.eyes[1].pupil_offset, averted.pupil));
            assert!(close(pose.face_offset, averted.face));
            assert_eq!(pose.mouth.variant, MouthVariant::SmallCircle);
            assert!(pose.lean.abs() < 0.01);
        }
    }

    #[test]
    fn test_dot_eyes_keep_shape_when_averted() {
        let cursor = setup();
        let mut character = Character::new(presets::gloop(), &SpringProfiles::default(), &cursor);
        cursor.sample(400.0, 270.0);
        run(&mut character, ReactiveFlags::PASSWORD_VISIBLE, 2.0);

        let pose = character.pose(2.0);
        let config = character.config();
        assert!(pose.eyes.iter().all(|e| e.variant == EyeVariant::TrackingDot));
        assert!(close(pose.face_offset, config.averted.face));
        assert!(close(pose.eyes[0].center, config.eyes.left + config.averted.face));
        assert!(close(pose.eyes[1].pupil_offset, Point::ZERO));
    }

    #[test]
    fn test_mouth_shift_eases_out_with_gaze() {
        let cursor = setup();
        let mut character = Character::new(presets::violetto(), &SpringProfiles::default(), &cursor);
        character.reset(ReactiveFlags::PASSWORD_VISIBLE);

        character.update(ReactiveFlags::empty());
        character.step(FRAME);
        let pose = character.pose(2.0);
        let factor = character.gaze_factor();
        assert_eq!(pose.state, PoseState::Idle);
        assert!(factor > 0.5, "gaze snapped back to {factor}");

        let config = character.config().clone();
        let shift = pose.mouth.center - config.mouth.center - pose.face_offset;
        assert!(close(shift, config.averted.mouth * factor));
        assert!(shift.x < 0.0);

        run(&mut character, ReactiveFlags::empty(), 2.0);
        let pose = character.pose(4.0);
        assert!(close(pose.mouth.center, config.mouth.center + pose.face_offset));
    }

    #[test]
    fn test_blink_only_when_idle() {
        let cursor = setup();
        let mut character = Character::new(presets::violetto(), &SpringProfiles::default(), &cursor);

        // Violetto blinks at t = 0.1 in its first period.
        assert!(character.pose(0.1).eyes[0].scale_y < 0.2);

        character.update(ReactiveFlags::FORM_FOCUSED);
        assert_eq!(character.pose(0.1).eyes[0].scale_y, 1.0);
    }

    #[test]
    fn test_entrance_follows_scene_time() {
        let cursor = setup();
        let character = Character::new(presets::violetto(), &SpringProfiles::default(), &cursor);

        let start = character.pose(0.0).entrance;
        assert_eq!(start.opacity, 0.0);
        assert_eq!(start.offset_y, -20.0);

        let middle = character.pose(0.35).entrance;
        assert!(middle.opacity > 0.0 && middle.opacity < 1.0);
        assert!(character.pose(0.6).entrance.is_settled());
    }

    #[test]
    fn test_nugget_rotates_instead_of_shifting() {
        let cursor = setup();
        let mut nugget = Character::new(presets::nugget(), &SpringProfiles::default(), &cursor);

        cursor.sample(400.0, 290.0);
        run(&mut nugget, ReactiveFlags::empty(), 2.0);
        let pose = nugget.pose(2.0);
        assert_eq!(pose.face_offset, Point::ZERO);
        assert!(pose.eyes[0].visible);
        assert!(!pose.eyes[1].visible);
        assert!(pose.mouth.width < 80.0);
        assert!(pose.mouth.center.x > 370.0);
        assert_eq!(pose.tilt, Tilt::new(10.0, Point::new(370.0, 300.0)));

        cursor.sample(370.0, 230.0);
        run(&mut nugget, ReactiveFlags::empty(), 2.0);
        let pose = nugget.pose(4.0);
        assert!(pose.eyes.iter().all(|e| e.visible));
        assert!((pose.mouth.width - 80.0).abs() < 0.01);
    }

    #[test]
    fn test_rotation_uses_its_own_spring() {
        let cursor = setup();
        let stiff_face = SpringProfiles {
            face: SpringConfig::LEAN,
            ..SpringProfiles::default()
        };
        let stiff_rotation = SpringProfiles {
            rotation: SpringConfig::LEAN,
            ..SpringProfiles::default()
        };
        let mut nuggets = [
            Character::new(presets::nugget(), &SpringProfiles::default(), &cursor),
            Character::new(presets::nugget(), &stiff_face, &cursor),
            Character::new(presets::nugget(), &stiff_rotation, &cursor),
        ];

        cursor.sample(0.0, 230.0);
        for nugget in &mut nuggets {
            run(nugget, ReactiveFlags::empty(), 0.1);
        }
        let mouths: Vec<f32> = nuggets.iter().map(|n| n.pose(2.0).mouth.center.x).collect();
        assert_eq!(mouths[0], mouths[1]);
        assert!(mouths[2] < mouths[0], "{mouths:?}");
    }

    #[test]
    fn test_reset_snaps_to_flags() {
        let cursor = setup();
        let mut character = Character::new(presets::inky(), &SpringProfiles::default(), &cursor);
        character.reset(ReactiveFlags::PASSWORD_VISIBLE);
        assert_eq!(character.gaze_factor(), 1.0);
        assert!(character.is_settled());
        assert_eq!(cursor.position(), CANVAS_CENTER);
    }
}
