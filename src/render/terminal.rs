//! Terminal output.
//!
//! [`DiffRenderer`] compares each frame to the previous one and only writes
//! cells that changed, inside a synchronized update so the terminal never
//! shows half a frame. [`TerminalGuard`] owns raw mode, the alternate screen
//! and mouse capture, and gives them back on drop.
//!
//! # Algorithm
//!
//! 1. Begin synchronized update
//! 2. For each cell in the new frame:
//!    - If the previous frame has the same size and the cell is unchanged: skip
//!    - Otherwise: move there, set colours and attributes if they differ from
//!      the last cell written, print the character
//! 3. End synchronized update and flush once
//! 4. Keep the frame for the next comparison

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, EnterAlternateScreen,
    LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{execute, queue};

use super::buffer::FrameBuffer;
use crate::types::{Cell, Rgba};

/// crossterm colour for an `Rgba`. Terminal default maps to `Reset`.
pub fn to_color(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r.clamp(0, 255) as u8,
            g: color.g.clamp(0, 255) as u8,
            b: color.b.clamp(0, 255) as u8,
        }
    }
}

// =============================================================================
// DIFF RENDERER
// =============================================================================

/// Colours and attributes of the last cell written, to skip redundant
/// escape sequences.
#[derive(Debug, Default, Clone, Copy)]
struct PenState {
    fg: Option<Rgba>,
    bg: Option<Rgba>,
    bold: Option<bool>,
}

/// Differential renderer for fullscreen mode.
#[derive(Debug, Default)]
pub struct DiffRenderer {
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a frame, writing only changed cells.
    ///
    /// Returns true if any cells were written.
    pub fn render<W: Write>(&mut self, out: &mut W, buffer: &FrameBuffer) -> io::Result<bool> {
        queue!(out, BeginSynchronizedUpdate)?;

        let same_size = self
            .previous
            .as_ref()
            .is_some_and(|prev| prev.width() == buffer.width() && prev.height() == buffer.height());

        let mut pen = PenState::default();
        let mut cursor: Option<(u16, u16)> = None;
        let mut changed = 0usize;

        for (x, y, cell) in buffer.iter() {
            if same_size && self.previous.as_ref().and_then(|prev| prev.get(x, y)) == Some(cell) {
                continue;
            }
            if cursor != Some((x, y)) {
                queue!(out, MoveTo(x, y))?;
            }
            write_cell(out, cell, &mut pen)?;
            cursor = Some((x.saturating_add(1), y));
            changed += 1;
        }

        queue!(out, SetAttribute(Attribute::Reset), ResetColor, EndSynchronizedUpdate)?;
        out.flush()?;

        if changed > 0 {
            tracing::trace!(changed, "frame written");
        }
        self.previous = Some(buffer.clone());
        Ok(changed > 0)
    }

    /// Invalidate the previous frame. Next render will be a full redraw.
    ///
    /// Use this after terminal resize or when the screen is corrupted.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Check if we have a previous frame to diff against.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

fn write_cell<W: Write>(out: &mut W, cell: &Cell, pen: &mut PenState) -> io::Result<()> {
    if pen.bold != Some(cell.bold) {
        let attribute = if cell.bold {
            Attribute::Bold
        } else {
            Attribute::NormalIntensity
        };
        queue!(out, SetAttribute(attribute))?;
        pen.bold = Some(cell.bold);
    }
    if pen.fg != Some(cell.fg) {
        queue!(out, SetForegroundColor(to_color(cell.fg)))?;
        pen.fg = Some(cell.fg);
    }
    if pen.bg != Some(cell.bg) {
        queue!(out, SetBackgroundColor(to_color(cell.bg)))?;
        pen.bg = Some(cell.bg);
    }
    let ch = char::from_u32(cell.char).unwrap_or(' ');
    queue!(out, Print(ch))
}

// =============================================================================
// TERMINAL GUARD
// =============================================================================

/// Raw mode + alternate screen + mouse capture for as long as it lives.
#[derive(Debug)]
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide, Clear(ClearType::All)) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        tracing::debug!("terminal entered fullscreen");
        Ok(Self { active: true })
    }

    /// Restore the terminal now instead of on drop.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let mut stdout = io::stdout();
        execute!(stdout, SetAttribute(Attribute::Reset), ResetColor, Show, DisableMouseCapture, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        tracing::debug!("terminal restored");
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best effort.
        let _ = self.restore();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn render(renderer: &mut DiffRenderer, buffer: &FrameBuffer) -> (bool, String) {
        let mut out = Vec::new();
        let changed = renderer.render(&mut out, buffer).unwrap();
        (changed, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_to_color() {
        assert_eq!(to_color(Rgba::TERMINAL_DEFAULT), Color::Reset);
        assert_eq!(to_color(Rgba::rgb(1, 2, 3)), Color::Rgb { r: 1, g: 2, b: 3 });
    }

    #[test]
    fn test_first_frame_writes_everything() {
        let mut renderer = DiffRenderer::new();
        let mut buffer = FrameBuffer::new(3, 1);
        buffer.draw_text(0, 0, "abc", Rgba::WHITE, false, 3);

        let (changed, output) = render(&mut renderer, &buffer);
        assert!(changed);
        assert!(output.contains("abc"));
        assert!(renderer.has_previous());
    }

    #[test]
    fn test_unchanged_frame_writes_no_cells() {
        let mut renderer = DiffRenderer::new();
        let mut buffer = FrameBuffer::new(3, 1);
        buffer.draw_text(0, 0, "abc", Rgba::WHITE, false, 3);
        render(&mut renderer, &buffer);

        let (changed, output) = render(&mut renderer, &buffer);
        assert!(!changed);
        assert!(!output.contains('a'));
    }

    #[test]
    fn test_only_changed_cell_is_written() {
        let mut renderer = DiffRenderer::new();
        let mut buffer = FrameBuffer::new(3, 1);
        buffer.draw_text(0, 0, "abc", Rgba::WHITE, false, 3);
        render(&mut renderer, &buffer);

        buffer.draw_text(1, 0, "X", Rgba::WHITE, false, 1);
        let (changed, output) = render(&mut renderer, &buffer);
        assert!(changed);
        assert!(output.contains('X'));
        assert!(!output.contains('a'));
        assert!(!output.contains('c'));
    }

    #[test]
    fn test_invalidate_forces_full_redraw() {
        let mut renderer = DiffRenderer::new();
        let mut buffer = FrameBuffer::new(2, 1);
        buffer.draw_text(0, 0, "hi", Rgba::WHITE, false, 2);
        render(&mut renderer, &buffer);

        renderer.invalidate();
        assert!(!renderer.has_previous());
        let (changed, output) = render(&mut renderer, &buffer);
        assert!(changed);
        assert!(output.contains("hi"));
    }
}
