//! Shape geometry shared by the SVG writer and the rasterizer.
//!
//! A [`CharacterPose`] becomes a short list of primitive shapes in the
//! character's local frame, back to front. On the way to the canvas each
//! point is skewed by the lean, then scaled and offset by the entrance,
//! then rotated by the tilt:
//!
//! ```text
//! skew:      x' = x + tan(lean) * (y - pivot.y)
//! entrance:  p' = center + (p - center) * scale + (0, offset_y)
//! tilt:      rotate(degrees) about tilt.pivot
//! ```

use crate::character::{BodyShape, CharacterPose, EyePose, EyeVariant, MouthPose, MouthVariant};
use crate::motion::EntranceFrame;
use crate::types::{Point, Rgba};

/// Stroke width for arcs, curves and rings, canvas units.
pub const STROKE: f32 = 4.0;

/// Width of the attentive bar mouth.
pub const BAR_WIDTH: f32 = 4.0;

/// Corner radius of the attentive bar mouth.
pub const BAR_CORNER: f32 = 1.5;

/// One primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// The character's silhouette.
    Body { shape: BodyShape, fill: Rgba },
    /// Filled ellipse.
    Ellipse {
        center: Point,
        rx: f32,
        ry: f32,
        fill: Rgba,
    },
    /// Upper half of a circle outline (closed eye).
    Arch {
        center: Point,
        radius: f32,
        color: Rgba,
    },
    /// Quadratic curve from `(cx ± width/2, cy)` with its control point at
    /// `(cx, cy + depth)`. Filled smiles close the curve with a chord.
    Smile {
        center: Point,
        width: f32,
        depth: f32,
        filled: bool,
        color: Rgba,
    },
    /// Filled rounded bar.
    Bar {
        center: Point,
        width: f32,
        height: f32,
        fill: Rgba,
    },
    /// Circle outline.
    Ring {
        center: Point,
        radius: f32,
        color: Rgba,
    },
}

impl Shape {
    /// Whether `p` (character-local, canvas units) is painted by this shape.
    pub fn contains(&self, p: Point) -> bool {
        match *self {
            Shape::Body { shape, .. } => body_contains(&shape, p),
            Shape::Ellipse { center, rx, ry, .. } => {
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let dx = (p.x - center.x) / rx;
                let dy = (p.y - center.y) / ry;
                dx * dx + dy * dy <= 1.0
            }
            Shape::Arch { center, radius, .. } => {
                p.y <= center.y && (p.distance(center) - radius).abs() <= STROKE / 2.0
            }
            Shape::Smile {
                center,
                width,
                depth,
                filled,
                ..
            } => smile_contains(center, width / 2.0, depth, filled, p),
            Shape::Bar {
                center,
                width,
                height,
                ..
            } => (p.x - center.x).abs() <= width / 2.0 && (p.y - center.y).abs() <= height / 2.0,
            Shape::Ring { center, radius, .. } => {
                (p.distance(center) - radius).abs() <= STROKE / 2.0
            }
        }
    }

    pub fn color(&self) -> Rgba {
        match *self {
            Shape::Body { fill, .. }
            | Shape::Ellipse { fill, .. }
            | Shape::Bar { fill, .. } => fill,
            Shape::Arch { color, .. } | Shape::Smile { color, .. } | Shape::Ring { color, .. } => {
                color
            }
        }
    }
}

fn body_contains(body: &BodyShape, p: Point) -> bool {
    match *body {
        BodyShape::RoundedTop {
            x,
            y,
            width,
            height,
            radius,
        } => {
            if p.x < x || p.x > x + width || p.y < y || p.y > y + height {
                return false;
            }
            if p.y >= y + radius {
                return true;
            }
            let corner_y = y + radius;
            let corner_x = if p.x < x + radius {
                x + radius
            } else if p.x > x + width - radius {
                x + width - radius
            } else {
                return true;
            };
            p.distance(Point::new(corner_x, corner_y)) <= radius
        }
        BodyShape::Dome {
            center_x,
            base_y,
            half_width,
            height,
        } => {
            let dx = (p.x - center_x).abs();
            if p.y > base_y || dx > half_width {
                return false;
            }
            // Each half is a quadratic with a vertical start tangent:
            // x = t² * hw from the edge, y = base - (2t - t²) * height.
            let t = ((half_width - dx) / half_width).sqrt();
            p.y >= base_y - (2.0 * t - t * t) * height
        }
    }
}

fn smile_contains(center: Point, half: f32, depth: f32, filled: bool, p: Point) -> bool {
    if half <= 0.0 {
        return false;
    }
    let dx = p.x - center.x;
    if dx.abs() > half {
        // Round caps on stroked ends.
        let end = Point::new(center.x + half.copysign(dx), center.y);
        return !filled && p.distance(end) <= STROKE / 2.0;
    }
    // The curve's x is linear in t, so its height at u = dx / half is
    // depth * (1 - u²) / 2.
    let u = dx / half;
    let curve_y = center.y + depth * (1.0 - u * u) / 2.0;
    if filled {
        let (low, high) = (center.y.min(curve_y), center.y.max(curve_y));
        p.y >= low && p.y <= high
    } else {
        (p.y - curve_y).abs() <= STROKE / 2.0
    }
}

// =============================================================================
// POSE → SHAPES
// =============================================================================

fn eye_shapes(eye: &EyePose, pose: &CharacterPose, shapes: &mut Vec<Shape>) {
    if !eye.visible {
        return;
    }
    let palette = &pose.palette;
    match eye.variant {
        EyeVariant::TrackingPupilInSclera => {
            shapes.push(Shape::Ellipse {
                center: eye.center,
                rx: eye.radius,
                ry: eye.radius * eye.scale_y,
                fill: palette.eye_white,
            });
            shapes.push(Shape::Ellipse {
                center: eye.pupil_center(),
                rx: eye.pupil_radius,
                ry: eye.pupil_radius * eye.scale_y,
                fill: palette.pupil,
            });
        }
        EyeVariant::TrackingDot => shapes.push(Shape::Ellipse {
            center: eye.pupil_center(),
            rx: eye.radius,
            ry: eye.radius * eye.scale_y,
            fill: palette.pupil,
        }),
        EyeVariant::SquintArc => shapes.push(Shape::Arch {
            center: eye.center + Point::new(0.0, eye.radius / 2.0),
            radius: eye.radius,
            color: palette.pupil,
        }),
    }
}

fn mouth_shape(mouth: &MouthPose, color: Rgba) -> Shape {
    let attentive = mouth.center + mouth.attentive_offset;
    match mouth.variant {
        MouthVariant::SmileCurve => Shape::Smile {
            center: mouth.center,
            width: mouth.width,
            depth: mouth.depth,
            filled: mouth.filled,
            color,
        },
        MouthVariant::AttentiveDot => Shape::Ellipse {
            center: attentive,
            rx: mouth.attentive_size,
            ry: mouth.attentive_size,
            fill: color,
        },
        MouthVariant::VerticalBar => Shape::Bar {
            center: attentive,
            width: BAR_WIDTH,
            height: mouth.attentive_size,
            fill: color,
        },
        MouthVariant::SmallCircle => Shape::Ring {
            center: mouth.center,
            radius: (mouth.width * 0.2).clamp(3.0, 6.0),
            color,
        },
    }
}

/// Shapes for one character, back to front, before lean.
pub fn character_shapes(pose: &CharacterPose) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(6);
    shapes.push(Shape::Body {
        shape: pose.body,
        fill: pose.palette.body,
    });
    for eye in &pose.eyes {
        eye_shapes(eye, pose, &mut shapes);
    }
    shapes.push(mouth_shape(&pose.mouth, pose.palette.mouth));
    shapes
}

/// Undo a character's lean: canvas point → character-local point.
#[inline]
pub fn unskew(p: Point, lean_degrees: f32, pivot: Point) -> Point {
    Point::new(p.x - lean_degrees.to_radians().tan() * (p.y - pivot.y), p.y)
}

/// Undo the entrance offset and scale about `center`.
#[inline]
pub fn unenter(p: Point, entrance: &EntranceFrame, center: Point) -> Point {
    let p = Point::new(p.x, p.y - entrance.offset_y);
    if entrance.scale == 1.0 || entrance.scale <= 0.0 {
        return p;
    }
    center + (p - center) * (1.0 / entrance.scale)
}

/// Canvas point → the character's local frame, undoing tilt, entrance and
/// lean in that order.
pub fn to_local(pose: &CharacterPose, p: Point) -> Point {
    let p = pose.tilt.undo(p);
    let p = unenter(p, &pose.entrance, pose.body.center());
    unskew(p, pose.lean, pose.pivot)
}
