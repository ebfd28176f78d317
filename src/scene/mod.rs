//! Scene Composer - the whole cast in one coordinate frame.
//!
//! Characters are kept in back-to-front order (Violetto, Inky, Gloop,
//! Nugget for the built-in cast) and all read the same cursor signal. The
//! scene owns the clock used for blinking; the host drives it:
//!
//! 1. [`Scene::mount`] resets the cursor to the canvas centre, snaps every
//!    character to rest and starts listening to pointer moves.
//! 2. Each frame, [`SceneHandle::tick`] advances the springs and the
//!    staggered entrance, which starts from transparent at mount.
//! 3. [`SceneHandle::frame`] samples the current poses for rendering.
//! 4. [`SceneHandle::unmount`] (or drop) stops listening.
//!
//! # Example
//!
//! ```
//! use login_monsters::config::SceneConfig;
//! use login_monsters::scene::Scene;
//! use login_monsters::state::pointer::{dispatch, PointerEvent};
//! use login_monsters::types::{Bounds, ReactiveFlags};
//!
//! let scene = Scene::new(&SceneConfig::default(), ReactiveFlags::empty().into()).unwrap();
//! let mut handle = scene.mount();
//! handle.set_bounds(Some(Bounds::new(0.0, 0.0, 400.0, 400.0)));
//!
//! dispatch(PointerEvent::new(0.0, 0.0));
//! handle.tick(1.0 / 60.0);
//!
//! let frame = handle.frame();
//! assert_eq!(frame.characters.len(), 4);
//! assert_eq!(frame.characters[0].name, "Violetto");
//! handle.unmount();
//! ```

use crate::character::{Character, CharacterPose};
use crate::config::SceneConfig;
use crate::error::Result;
use crate::pipeline::clamp_delta;
use crate::props::PropValue;
use crate::state::cursor::CursorSampler;
use crate::state::pointer::PointerSubscription;
use crate::types::{Bounds, Point, ReactiveFlags, Rgba};

// =============================================================================
// FRAME
// =============================================================================

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub background: Rgba,
    /// Back to front.
    pub characters: Vec<CharacterPose>,
    /// Cursor in canvas units.
    pub cursor: Point,
    /// Seconds since mount.
    pub elapsed: f32,
    pub flags: ReactiveFlags,
}

// =============================================================================
// SCENE
// =============================================================================

/// The cast plus the shared cursor and the host's flags.
pub struct Scene {
    characters: Vec<Character>,
    cursor: CursorSampler,
    flags: PropValue<ReactiveFlags>,
    background: Rgba,
    elapsed: f32,
}

impl Scene {
    /// Build the cast from a validated config.
    pub fn new(config: &SceneConfig, flags: PropValue<ReactiveFlags>) -> Result<Self> {
        config.validate()?;

        let cursor = CursorSampler::new();
        let characters = config
            .cast
            .iter()
            .cloned()
            .map(|character| Character::new(character, &config.springs, &cursor))
            .collect();

        Ok(Self {
            characters,
            cursor,
            flags,
            background: config.background,
            elapsed: 0.0,
        })
    }

    /// A scene with no cast, left behind in a handle after unmount.
    fn empty() -> Self {
        Self {
            characters: Vec::new(),
            cursor: CursorSampler::new(),
            flags: PropValue::default(),
            background: Rgba::TERMINAL_DEFAULT,
            elapsed: 0.0,
        }
    }

    /// Back to front.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn character(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name() == name)
    }

    pub fn cursor(&self) -> &CursorSampler {
        &self.cursor
    }

    /// Current value of the host's flags.
    pub fn flags(&self) -> ReactiveFlags {
        self.flags.get()
    }

    /// Swap the flag source.
    pub fn set_flags(&mut self, flags: PropValue<ReactiveFlags>) {
        self.flags = flags;
    }

    /// Seconds of scene time.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// True until every character has faded in.
    pub fn is_entering(&self) -> bool {
        self.characters
            .iter()
            .any(|character| self.elapsed < character.config().entrance.end())
    }

    /// Advance everything by `dt` seconds (clamped). Returns true while any
    /// character is still moving or fading in.
    pub fn tick(&mut self, dt: f32) -> bool {
        let dt = clamp_delta(dt);
        let flags = self.flags.get();
        self.elapsed += dt;

        let mut moving = false;
        for character in &mut self.characters {
            character.update(flags);
            moving |= character.step(dt);
        }
        moving || self.is_entering()
    }

    /// Sample every character's current pose.
    pub fn frame(&self) -> SceneFrame {
        SceneFrame {
            background: self.background,
            characters: self
                .characters
                .iter()
                .map(|character| character.pose(self.elapsed))
                .collect(),
            cursor: self.cursor.position(),
            elapsed: self.elapsed,
            flags: self.flags.get(),
        }
    }

    /// Reset to the mount state and start tracking the pointer.
    pub fn mount(mut self) -> SceneHandle {
        self.cursor.reset();
        self.elapsed = 0.0;
        let flags = self.flags.get();
        for character in &mut self.characters {
            character.reset(flags);
        }

        let subscription = self.cursor.attach();
        tracing::debug!(characters = self.characters.len(), ?flags, "scene mounted");

        SceneHandle {
            scene: self,
            subscription: Some(subscription),
        }
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("characters", &self.characters)
            .field("elapsed", &self.elapsed)
            .finish()
    }
}

// =============================================================================
// MOUNT HANDLE
// =============================================================================

/// A mounted scene. Dropping it stops pointer tracking.
#[must_use = "dropping the handle unmounts the scene"]
pub struct SceneHandle {
    scene: Scene,
    subscription: Option<PointerSubscription>,
}

impl SceneHandle {
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Where the canvas is on screen, in client units. `None` while it has
    /// no layout; pointer moves are ignored until it has one.
    pub fn set_bounds(&self, bounds: Option<Bounds>) {
        self.scene.cursor.set_bounds(bounds);
    }

    pub fn tick(&mut self, dt: f32) -> bool {
        self.scene.tick(dt)
    }

    pub fn frame(&self) -> SceneFrame {
        self.scene.frame()
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.as_ref().is_some_and(PointerSubscription::is_active)
    }

    /// Stop tracking the pointer and hand the scene back.
    pub fn unmount(mut self) -> Scene {
        self.release();
        std::mem::replace(&mut self.scene, Scene::empty())
    }

    fn release(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
            self.scene.cursor.set_bounds(None);
            tracing::debug!("scene unmounted");
        }
    }
}

impl Drop for SceneHandle {
    fn drop(&mut self) {
        self.release();
    }
}

// =============================================================================
// TESTS
// =============================================================================
