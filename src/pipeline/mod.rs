//! Frame Pipeline
//!
//! The scene is pull-based: nothing renders until the host asks for a frame.
//!
//! ```text
//! pointer events → CursorSignal ─┐
//!                                ├─► Scene::tick(dt) → Scene::frame() → SVG / FrameBuffer
//! FrameClock ──── dt (clamped) ──┘
//! ```
//!
//! [`FrameClock`] turns wall time into per-frame deltas and paces the loop.

pub mod clock;

pub use clock::{FrameClock, MAX_FRAME_DELTA, clamp_delta};
