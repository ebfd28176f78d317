//! State Module - input plumbing between the host and the scene
//!
//! - **Pointer** - global pointer-move registry, the `window` listener
//! - **Cursor** - client → canvas mapping into the shared cursor signal
//! - **Input** - crossterm events → pointer moves, clicks and form keys

pub mod cursor;
pub mod input;
pub mod pointer;
