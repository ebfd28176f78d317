//! Motion Model
//!
//! The math every character shares:
//!
//! - **offset** - anchor + cursor → raw directional offset
//! - **spring** - damped smoothing of raw targets, sampled per frame
//! - **gaze** - password-visible blend toward an averted pose
//! - **blink** - staggered periodic eye blinks
//! - **entrance** - staggered fade-in after mount

pub mod blink;
pub mod entrance;
pub mod gaze;
pub mod offset;
pub mod spring;

pub use blink::BlinkSchedule;
pub use entrance::{Entrance, EntranceFrame};
pub use gaze::{blend, GazeAversion};
pub use offset::{directional_offset, Tracking};
pub use spring::{Spring, Spring2, SpringConfig, SpringProfiles};
