//! Renderers
//!
//! Every renderer works from a [`SceneFrame`](crate::scene::SceneFrame) and
//! the same shape geometry:
//!
//! - **svg** - standalone SVG document, one `<g>` per character
//! - **raster** - half-block pixels into a [`FrameBuffer`]
//! - **terminal** - diff renderer and terminal mode guard (crossterm)

pub mod buffer;
pub mod raster;
pub mod shapes;
pub mod svg;
pub mod terminal;

pub use buffer::FrameBuffer;
pub use raster::rasterize;
pub use svg::render_svg;
pub use terminal::{DiffRenderer, TerminalGuard};
