//! Core types for login-monsters.
//!
//! Geometry, colour and flag types shared by the motion model, the
//! characters and both renderers.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

// =============================================================================
// Canvas
// =============================================================================

/// Side length of the logical canvas. Every character lives in a
/// `CANVAS_SIZE` × `CANVAS_SIZE` square, y pointing down.
pub const CANVAS_SIZE: f32 = 400.0;

/// Centre of the canvas, the cursor position before the first pointer event.
pub const CANVAS_CENTER: Point = Point::new(CANVAS_SIZE / 2.0, CANVAS_SIZE / 2.0);

// =============================================================================
// Point
// =============================================================================

/// A 2D point or displacement in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length when used as a displacement.
    #[inline]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

// =============================================================================
// Bounds
// =============================================================================

/// On-screen rectangle of the scene, in the host's client coordinates
/// (pixels in a browser, cells in a terminal).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rectangle that cannot be mapped through (zero, negative or
    /// non-finite extent).
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
            || !self.left.is_finite()
            || !self.top.is_finite()
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Check if a point is inside (right and bottom edges excluded).
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }
}

// =============================================================================
// Reactive flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Login form state handed to the scene by the embedding page.
    ///
    /// The scene only ever reads these.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct ReactiveFlags: u8 {
        const FORM_FOCUSED = 1 << 0;
        const PASSWORD_VISIBLE = 1 << 1;
    }
}

impl ReactiveFlags {
    pub fn form_focused(self) -> bool {
        self.contains(Self::FORM_FOCUSED)
    }

    pub fn password_visible(self) -> bool {
        self.contains(Self::PASSWORD_VISIBLE)
    }

    /// Build from the two booleans the login form tracks.
    pub fn from_form(form_focused: bool, password_visible: bool) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::FORM_FOCUSED, form_focused);
        flags.set(Self::PASSWORD_VISIBLE, password_visible);
        flags
    }
}

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Integers for exact comparison. Alpha 255 = fully opaque.
/// Special value: r=-1 means "terminal default" (let terminal pick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    /// Create from 0xRRGGBB integer format.
    ///
    /// ```
    /// use login_monsters::types::Rgba;
    ///
    /// let violet = Rgba::from_rgb_int(0x7e27ff);
    /// assert_eq!(violet, Rgba::rgb(126, 39, 255));
    /// ```
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// Parse hex color string (#RGB, #RRGGBB, #RRGGBBAA).
    ///
    /// Returns None for invalid format.
    ///
    /// ```
    /// use login_monsters::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#ff8a28"), Some(Rgba::rgb(255, 138, 40)));
    /// assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::WHITE));
    /// assert_eq!(Rgba::from_hex("#ff000080"), Some(Rgba::new(255, 0, 0, 128)));
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        fn hex_digit(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> Option<u8> {
            let high = hex_digit(s[i])?;
            let low = hex_digit(s[i + 1])?;
            Some((high << 4) | low)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => {
                let r = hex_digit(bytes[0])?;
                let g = hex_digit(bytes[1])?;
                let b = hex_digit(bytes[2])?;
                Some(Self::rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
            }
            6 => {
                let r = hex_byte(bytes, 0)?;
                let g = hex_byte(bytes, 2)?;
                let b = hex_byte(bytes, 4)?;
                Some(Self::rgb(r, g, b))
            }
            8 => {
                let r = hex_byte(bytes, 0)?;
                let g = hex_byte(bytes, 2)?;
                let b = hex_byte(bytes, 4)?;
                let a = hex_byte(bytes, 6)?;
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not opaque.
    ///
    /// Terminal default has no hex form and formats as `currentColor`.
    pub fn to_hex(&self) -> String {
        if self.is_terminal_default() {
            return "currentColor".to_string();
        }
        let channel = |c: i16| c.clamp(0, 255) as u8;
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", channel(self.r), channel(self.g), channel(self.b))
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                channel(self.r),
                channel(self.g),
                channel(self.b),
                channel(self.a)
            )
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "currentColor" || value == "default" {
            return Ok(Self::TERMINAL_DEFAULT);
        }
        Self::from_hex(&value).ok_or_else(|| format!("invalid hex color `{value}`"))
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}

// =============================================================================
// Cell - The atomic unit of terminal rendering
// =============================================================================

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Unicode codepoint (32 for space).
    pub char: u32,
    /// Foreground color.
    pub fg: Rgba,
    /// Background color.
    pub bg: Rgba,
    /// Bold text.
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: b' ' as u32,
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            bold: false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
