//! FrameBuffer - a 2D grid of terminal cells.
//!
//! Flat storage, row-major: `index = y * width + x`. The rasterizer and the
//! form both draw into it; the diff renderer writes it to the terminal.

use crate::types::{Cell, Rgba};

/// A 2D buffer of terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Get a mutable cell reference (returns None if out of bounds).
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Iterate over cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let x = (i % self.width as usize) as u16;
            let y = (i / self.width as usize) as u16;
            (x, y, cell)
        })
    }

    /// Clear the entire buffer to default cells.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize the buffer (clears content).
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.resize(width as usize * height as usize, Cell::default());
        self.clear();
    }

    /// Set a single cell. Returns true if it was inside the buffer.
    pub fn set_cell(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        match self.get_mut(x, y) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Draw a single line of text starting at `(x, y)`, clipped to the
    /// buffer and to `max_width` columns. Returns the columns written.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgba, bold: bool, max_width: u16) -> u16 {
        let mut written = 0;
        for ch in text.chars() {
            if written >= max_width {
                break;
            }
            let col = x.saturating_add(written);
            let Some(cell) = self.get_mut(col, y) else {
                break;
            };
            cell.char = ch as u32;
            cell.fg = fg;
            cell.bold = bold;
            written += 1;
        }
        written
    }

    /// Fill a rectangle's background, keeping characters.
    pub fn fill_bg(&mut self, x: u16, y: u16, width: u16, height: u16, bg: Rgba) {
        for row in y..y.saturating_add(height).min(self.height) {
            for col in x..x.saturating_add(width).min(self.width) {
                if let Some(cell) = self.get_mut(col, row) {
                    cell.bg = bg;
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
