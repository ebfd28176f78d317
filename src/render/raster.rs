//! Half-block rasterizer.
//!
//! Each terminal cell shows two vertically stacked pixels using `▀`: the
//! foreground paints the upper pixel, the background the lower one. A
//! `w×h` cell area is therefore a `w×2h` pixel grid, which is square when
//! the area is twice as wide as it is tall.
//!
//! Pixels are sampled at their centres, mapped into canvas units, and
//! tested against every character's shapes front to back. Cells have no
//! alpha, so a character fading in shows up once it is half opaque.

use crate::character::CharacterPose;
use crate::scene::SceneFrame;
use crate::types::{Bounds, CANVAS_SIZE, Cell, Point, Rgba};

use super::buffer::FrameBuffer;
use super::shapes::{Shape, character_shapes, to_local};

/// Upper half block.
pub const HALF_BLOCK: char = '▀';

/// Opacity at which a fading character starts being drawn.
pub const VISIBLE_OPACITY: f32 = 0.5;

/// One character's shapes plus the pose needed to hit-test them.
struct Layer<'a> {
    pose: &'a CharacterPose,
    shapes: Vec<Shape>,
}

impl<'a> Layer<'a> {
    fn new(pose: &'a CharacterPose) -> Self {
        let shapes = if pose.entrance.opacity >= VISIBLE_OPACITY {
            character_shapes(pose)
        } else {
            Vec::new()
        };
        Self { pose, shapes }
    }

    /// Topmost colour of this character at canvas point `p`.
    fn sample(&self, p: Point) -> Option<Rgba> {
        if self.shapes.is_empty() {
            return None;
        }
        let local = to_local(self.pose, p);
        self.shapes
            .iter()
            .rev()
            .find(|shape| shape.contains(local))
            .map(Shape::color)
    }
}

/// Colour of the frame at canvas point `p`, or `None` where nothing is
/// drawn.
pub fn sample(frame: &SceneFrame, p: Point) -> Option<Rgba> {
    frame
        .characters
        .iter()
        .rev()
        .find_map(|pose| Layer::new(pose).sample(p))
}

/// Draw `frame` into the cells covered by `area`.
///
/// Cells outside the buffer are skipped. Empty pixels take the frame
/// background.
pub fn rasterize(frame: &SceneFrame, buffer: &mut FrameBuffer, area: Bounds) {
    if area.is_degenerate() {
        return;
    }

    let layers: Vec<Layer> = frame.characters.iter().map(Layer::new).collect();
    let pick = |p: Point| {
        layers
            .iter()
            .rev()
            .find_map(|layer| layer.sample(p))
            .unwrap_or(frame.background)
    };

    let columns = area.width.floor() as u16;
    let rows = area.height.floor() as u16;
    let (left, top) = (area.left.max(0.0) as u16, area.top.max(0.0) as u16);
    let pixel_w = CANVAS_SIZE / columns as f32;
    let pixel_h = CANVAS_SIZE / (rows as f32 * 2.0);

    for row in 0..rows {
        for column in 0..columns {
            let x = (column as f32 + 0.5) * pixel_w;
            let upper = pick(Point::new(x, (row as f32 * 2.0 + 0.5) * pixel_h));
            let lower = pick(Point::new(x, (row as f32 * 2.0 + 1.5) * pixel_h));

            let cell = if upper == lower {
                Cell {
                    char: ' ' as u32,
                    fg: Rgba::TERMINAL_DEFAULT,
                    bg: upper,
                    bold: false,
                }
            } else {
                Cell {
                    char: HALF_BLOCK as u32,
                    fg: upper,
                    bg: lower,
                    bold: false,
                }
            };
            buffer.set_cell(left.saturating_add(column), top.saturating_add(row), cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Tilt;
    use crate::config::SceneConfig;
    use crate::scene::{Scene, SceneHandle};
    use crate::state::pointer::reset_pointer_state;
    use crate::types::ReactiveFlags;

    const VIOLET: u32 = 0x7e27ff;
    const INK: u32 = 0x1d2025;
    const ORANGE: u32 = 0xff8a28;
    const YELLOW: u32 = 0xf3d300;

    fn mounted() -> SceneHandle {
        reset_pointer_state();
        Scene::new(&SceneConfig::default(), ReactiveFlags::empty().into())
            .unwrap()
            .mount()
    }

    /// A frame after everyone has faded in.
    fn frame() -> SceneFrame {
        let mut handle = mounted();
        for _ in 0..60 {
            handle.tick(1.0 / 60.0);
        }
        handle.frame()
    }

    fn color(rgb: u32) -> Option<Rgba> {
        Some(Rgba::from_rgb_int(rgb))
    }

    #[test]
    fn test_sample_hits_bodies() {
        let frame = frame();
        assert_eq!(sample(&frame, Point::new(150.0, 40.0)), color(VIOLET));
        assert_eq!(sample(&frame, Point::new(270.0, 300.0)), color(INK));
        assert_eq!(sample(&frame, Point::new(380.0, 50.0)), None);
    }

    #[test]
    fn test_front_character_wins() {
        let frame = frame();
        // Gloop's dome overlaps Violetto's lower left.
        assert_eq!(sample(&frame, Point::new(150.0, 340.0)), color(ORANGE));
    }

    #[test]
    fn test_lean_moves_the_top() {
        let mut frame = frame();
        // Just left of Violetto's top edge.
        let p = Point::new(130.0, 30.0);
        assert_eq!(sample(&frame, p), None);

        frame.characters[0].lean = 8.0;
        assert_eq!(sample(&frame, p), color(VIOLET));
    }

    #[test]
    fn test_tilt_swings_nugget_left_at_the_base() {
        let mut frame = frame();
        // Left of Nugget's untilted base, inside the tilted one.
        let p = Point::new(315.0, 345.0);
        assert_eq!(sample(&frame, p), color(YELLOW));

        frame.characters[3].tilt = Tilt::default();
        assert_eq!(sample(&frame, p), color(INK));
    }

    #[test]
    fn test_nothing_drawn_before_entrance() {
        let handle = mounted();
        let frame = handle.frame();
        assert_eq!(sample(&frame, Point::new(150.0, 40.0)), None);

        let mut buffer = FrameBuffer::new(20, 10);
        rasterize(&frame, &mut buffer, Bounds::new(0.0, 0.0, 20.0, 10.0));
        assert!(buffer.iter().all(|(_, _, cell)| cell.bg.is_terminal_default()));
    }

    #[test]
    fn test_rasterize_fills_area() {
        let frame = frame();
        let mut buffer = FrameBuffer::new(50, 22);
        rasterize(&frame, &mut buffer, Bounds::new(1.0, 1.0, 40.0, 20.0));

        // Outside the area stays untouched.
        assert_eq!(buffer.get(0, 0), Some(&Cell::default()));
        assert_eq!(buffer.get(45, 5), Some(&Cell::default()));

        // Inside: the top-right of the canvas is empty background.
        let corner = buffer.get(40, 1).copied().unwrap_or_default();
        assert_eq!(corner.char, ' ' as u32);
        assert!(corner.bg.is_terminal_default());

        let painted = buffer
            .iter()
            .filter(|(_, _, cell)| !cell.bg.is_terminal_default() || cell.char == HALF_BLOCK as u32)
            .count();
        assert!(painted > 100);
    }

    #[test]
    fn test_degenerate_area_draws_nothing() {
        let frame = frame();
        let mut buffer = FrameBuffer::new(10, 10);
        rasterize(&frame, &mut buffer, Bounds::new(0.0, 0.0, 0.0, 0.0));
        assert!(buffer.iter().all(|(_, _, cell)| *cell == Cell::default()));
    }
}
