//! Layout Module - terminal placement of the scene and the login form.
//!
//! Uses [Taffy](https://github.com/DioxusLabs/taffy) for a single flex row:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │ ┌──────────────────────┐  ┌──────────────────────┐  │
//! │ │ scene (2:1 cells,    │  │ form (grows, min 32) │  │
//! │ │ square in half-block │  └──────────────────────┘  │
//! │ │ pixels)              │                            │
//! │ └──────────────────────┘                            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The scene rectangle is what pointer cells are mapped through, so the
//! cursor sampler always sees the canvas where it is actually drawn.
//!
//! # Example
//!
//! ```
//! use login_monsters::layout::compute_login_layout;
//!
//! let layout = compute_login_layout(120, 40).unwrap();
//! assert_eq!(layout.scene.width, layout.scene.height * 2.0);
//! assert!(layout.form.width >= 32.0);
//! ```

use taffy::{
    AlignItems, AvailableSpace, Dimension, Display, FlexDirection, LengthPercentage, NodeId,
    Rect, Size, Style, TaffyTree,
};

use crate::error::Result;
use crate::types::Bounds;

/// Narrowest the form may get, in columns.
pub const FORM_MIN_WIDTH: f32 = 32.0;

/// Rows the form occupies: title, two labelled fields, hint.
pub const FORM_HEIGHT: f32 = 9.0;

/// Border around everything, in cells.
const PADDING: f32 = 1.0;

/// Columns between the scene and the form.
const GAP: f32 = 2.0;

/// Computed placement, terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoginLayout {
    pub scene: Bounds,
    pub form: Bounds,
}

/// Largest square canvas (in half-block pixels) that still leaves the form
/// its minimum width. Returns the canvas height in rows.
fn scene_rows(width: f32, height: f32) -> f32 {
    let inner_width = width - PADDING * 2.0 - GAP - FORM_MIN_WIDTH;
    let inner_height = height - PADDING * 2.0;
    (inner_width / 2.0).min(inner_height).floor().max(0.0)
}

fn bounds_of(tree: &TaffyTree<()>, node: NodeId) -> Result<Bounds> {
    let layout = tree.layout(node)?;
    Ok(Bounds::new(
        layout.location.x,
        layout.location.y,
        layout.size.width,
        layout.size.height,
    ))
}

/// Lay out a `width`×`height` terminal.
pub fn compute_login_layout(width: u16, height: u16) -> Result<LoginLayout> {
    let (width, height) = (width as f32, height as f32);
    let rows = scene_rows(width, height);

    let mut tree: TaffyTree<()> = TaffyTree::new();

    let scene = tree.new_leaf(Style {
        size: Size {
            width: Dimension::Length(rows * 2.0),
            height: Dimension::Length(rows),
        },
        flex_shrink: 0.0,
        ..Default::default()
    })?;

    let form = tree.new_leaf(Style {
        flex_grow: 1.0,
        min_size: Size {
            width: Dimension::Length(FORM_MIN_WIDTH),
            height: Dimension::Auto,
        },
        size: Size {
            width: Dimension::Auto,
            height: Dimension::Length(FORM_HEIGHT.min((height - PADDING * 2.0).max(0.0))),
        },
        ..Default::default()
    })?;

    let root = tree.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            align_items: Some(AlignItems::Center),
            size: Size {
                width: Dimension::Length(width),
                height: Dimension::Length(height),
            },
            padding: Rect {
                left: LengthPercentage::Length(PADDING),
                right: LengthPercentage::Length(PADDING),
                top: LengthPercentage::Length(PADDING),
                bottom: LengthPercentage::Length(PADDING),
            },
            gap: Size {
                width: LengthPercentage::Length(GAP),
                height: LengthPercentage::Length(0.0),
            },
            ..Default::default()
        },
        &[scene, form],
    )?;

    tree.compute_layout(
        root,
        Size {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::Definite(height),
        },
    )?;

    let layout = LoginLayout {
        scene: bounds_of(&tree, scene)?,
        form: bounds_of(&tree, form)?,
    };
    tracing::trace!(?layout, "login layout");
    Ok(layout)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_terminal() {
        let layout = compute_login_layout(120, 40).unwrap();
        assert_eq!(layout.scene, Bounds::new(1.0, 1.0, 76.0, 38.0));
        assert_eq!(layout.form.left, 79.0);
        assert_eq!(layout.form.width, 40.0);
        assert_eq!(layout.form.height, FORM_HEIGHT);
    }

    #[test]
    fn test_height_limits_scene() {
        let layout = compute_login_layout(200, 20).unwrap();
        assert_eq!(layout.scene.height, 18.0);
        assert_eq!(layout.scene.width, 36.0);
        assert_eq!(layout.form.width, 200.0 - 2.0 - 36.0 - 2.0);
    }

    #[test]
    fn test_narrow_terminal_keeps_form_width() {
        let layout = compute_login_layout(40, 10).unwrap();
        assert_eq!(layout.scene.height, 2.0);
        assert_eq!(layout.form.width, FORM_MIN_WIDTH);
    }

    #[test]
    fn test_tiny_terminal_has_no_scene() {
        let layout = compute_login_layout(20, 5).unwrap();
        assert!(layout.scene.is_degenerate());
    }
}
