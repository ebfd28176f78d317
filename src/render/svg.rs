//! SVG output.
//!
//! One document per frame: a 400×400 `viewBox` that scales to fill its
//! container, two nested `<g>` per character in back-to-front order. The
//! outer group carries the tilt and the entrance; the inner one the lean,
//! as a skew about the body's bottom-centre:
//!
//! ```text
//! <g data-name="Nugget" opacity="0.5" transform="rotate(10 370 300) translate(0 -4)">
//!   <g transform="translate(px py) skewX(deg) translate(-px -py)">
//! ```

use std::borrow::Cow;
use std::fmt::Write;

use crate::character::{BodyShape, CharacterPose};
use crate::scene::SceneFrame;
use crate::types::{CANVAS_SIZE, Rgba};

use super::shapes::{BAR_CORNER, STROKE, Shape, character_shapes};

/// Accessible name of the illustration.
pub const ARIA_LABEL: &str = "Interactive monster characters";

/// Format a coordinate with at most two decimals and no trailing zeros.
fn num(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{:.2}", if rounded == 0.0 { 0.0 } else { rounded });
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn paint(color: Rgba) -> String {
    color.to_hex()
}

/// Escape text for a double-quoted attribute.
fn escape_attr(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn body_path(body: &BodyShape) -> String {
    match *body {
        BodyShape::RoundedTop {
            x,
            y,
            width,
            height,
            radius,
        } => format!(
            "M {x0} {bottom} L {x0} {yr} A {r} {r} 0 0 1 {xr} {y0} L {xwr} {y0} A {r} {r} 0 0 1 {x1} {yr} L {x1} {bottom} Z",
            x0 = num(x),
            x1 = num(x + width),
            xr = num(x + radius),
            xwr = num(x + width - radius),
            y0 = num(y),
            yr = num(y + radius),
            bottom = num(y + height),
            r = num(radius),
        ),
        BodyShape::Dome {
            center_x,
            base_y,
            half_width,
            height,
        } => format!(
            "M {left} {base} Q {left} {top} {cx} {top} Q {right} {top} {right} {base} Z",
            left = num(center_x - half_width),
            right = num(center_x + half_width),
            cx = num(center_x),
            top = num(base_y - height),
            base = num(base_y),
        ),
    }
}

fn write_shape(out: &mut String, shape: &Shape) {
    let stroke = num(STROKE);
    // Writing into a String cannot fail.
    let _ = match *shape {
        Shape::Body { shape, fill } => {
            writeln!(out, r#"    <path d="{}" fill="{}"/>"#, body_path(&shape), paint(fill))
        }
        Shape::Ellipse { center, rx, ry, fill } => writeln!(
            out,
            r#"    <ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="{}"/>"#,
            num(center.x),
            num(center.y),
            num(rx),
            num(ry),
            paint(fill)
        ),
        Shape::Arch { center, radius, color } => writeln!(
            out,
            r#"    <path d="M {} {} A {r} {r} 0 0 1 {} {}" fill="none" stroke="{}" stroke-width="{stroke}" stroke-linecap="round"/>"#,
            num(center.x - radius),
            num(center.y),
            num(center.x + radius),
            num(center.y),
            paint(color),
            r = num(radius),
        ),
        Shape::Smile {
            center,
            width,
            depth,
            filled,
            color,
        } => {
            let d = format!(
                "M {} {} Q {} {} {} {}",
                num(center.x - width / 2.0),
                num(center.y),
                num(center.x),
                num(center.y + depth),
                num(center.x + width / 2.0),
                num(center.y),
            );
            if filled {
                writeln!(out, r#"    <path d="{d} Z" fill="{}"/>"#, paint(color))
            } else {
                writeln!(
                    out,
                    r#"    <path d="{d}" fill="none" stroke="{}" stroke-width="{stroke}" stroke-linecap="round"/>"#,
                    paint(color),
                )
            }
        }
        Shape::Bar {
            center,
            width,
            height,
            fill,
        } => writeln!(
            out,
            r#"    <rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}"/>"#,
            num(center.x - width / 2.0),
            num(center.y - height / 2.0),
            num(width),
            num(height),
            num(BAR_CORNER.min(width / 2.0)),
            paint(fill)
        ),
        Shape::Ring {
            center,
            radius,
            color,
        } => writeln!(
            out,
            r#"    <circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{stroke}"/>"#,
            num(center.x),
            num(center.y),
            num(radius),
            paint(color)
        ),
    };
}

/// Tilt, then entrance offset, then entrance scale about the body centre.
fn placement(pose: &CharacterPose) -> String {
    let mut parts = Vec::with_capacity(3);
    let tilt = &pose.tilt;
    if !tilt.is_identity() {
        parts.push(format!(
            "rotate({} {} {})",
            num(tilt.degrees),
            num(tilt.pivot.x),
            num(tilt.pivot.y)
        ));
    }
    let entrance = &pose.entrance;
    if entrance.offset_y != 0.0 {
        parts.push(format!("translate(0 {})", num(entrance.offset_y)));
    }
    if entrance.scale != 1.0 {
        let center = pose.body.center();
        let (cx, cy) = (num(center.x), num(center.y));
        parts.push(format!(
            "translate({cx} {cy}) scale({}) translate(-{cx} -{cy})",
            num(entrance.scale)
        ));
    }
    parts.join(" ")
}

fn write_character(out: &mut String, pose: &CharacterPose) {
    let _ = write!(out, r#"  <g data-name="{}""#, escape_attr(&pose.name));
    if pose.entrance.opacity < 1.0 {
        let _ = write!(out, r#" opacity="{}""#, num(pose.entrance.opacity));
    }
    let placement = placement(pose);
    if !placement.is_empty() {
        let _ = write!(out, r#" transform="{placement}""#);
    }
    out.push_str(">\n");

    let (px, py) = (num(pose.pivot.x), num(pose.pivot.y));
    let _ = writeln!(
        out,
        r#"   <g transform="translate({px} {py}) skewX({}) translate(-{px} -{py})">"#,
        num(pose.lean),
    );
    for shape in character_shapes(pose) {
        write_shape(out, &shape);
    }
    out.push_str("   </g>\n  </g>\n");
}

/// Render one frame as a standalone SVG document.
pub fn render_svg(frame: &SceneFrame) -> String {
    let size = num(CANVAS_SIZE);
    let mut out = String::with_capacity(4096);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}" width="100%" height="100%" preserveAspectRatio="xMidYMid meet" role="img" aria-label="{ARIA_LABEL}">"#
    );
    if !frame.background.is_terminal_default() {
        let _ = writeln!(
            out,
            r#"  <rect width="{size}" height="{size}" fill="{}"/>"#,
            paint(frame.background)
        );
    }
    for pose in &frame.characters {
        write_character(&mut out, pose);
    }
    out.push_str("</svg>\n");
    out
}
