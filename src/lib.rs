//! # login-monsters
//!
//! Four cartoon monsters that watch the cursor on a login screen.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! reactivity: the cursor is a signal, every raw tracking target is a
//! derived over it, and springs smooth the targets frame by frame.
//!
//! ## Architecture
//!
//! ```text
//! pointer event → CursorSampler (signal) → tracking deriveds → springs
//!     → pose table (focus / password flags) → CharacterPose → SVG | terminal
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Points, bounds, colours, cells, reactive flags
//! - [`motion`] - Offsets, springs, gaze aversion, blinking
//! - [`state`] - Pointer registry, cursor sampler, terminal input
//! - [`character`] - Per-character config, pose table, Nugget's rotation
//! - [`scene`] - The cast composed in one 400×400 frame
//! - [`render`] - SVG writer, half-block rasterizer, diff renderer
//! - [`layout`] - Taffy placement of scene and form in a terminal
//! - [`form`] - Terminal login form that drives the flags
//! - [`config`] - TOML scene configuration

pub mod character;
pub mod config;
pub mod error;
pub mod form;
pub mod layout;
pub mod motion;
pub mod pipeline;
pub mod props;
pub mod render;
pub mod scene;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::{Bounds, CANVAS_CENTER, CANVAS_SIZE, Point, ReactiveFlags, Rgba};

pub use error::{MonsterError, Result};

pub use character::{Character, CharacterConfig, CharacterPose, PoseState, presets};

pub use config::SceneConfig;

pub use form::{Field, FormAction, LoginForm};

pub use layout::{LoginLayout, compute_login_layout};

pub use pipeline::FrameClock;

pub use props::PropValue;

pub use render::{DiffRenderer, FrameBuffer, TerminalGuard, rasterize, render_svg};

pub use scene::{Scene, SceneFrame, SceneHandle};

pub use state::cursor::CursorSampler;
