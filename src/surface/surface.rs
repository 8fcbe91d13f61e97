//! Surface: a grid of cells that render units paint into.
//!
//! Cells are stored contiguously in row-major order for cache efficiency.

use super::cell::{Cell, Rgb, Style};
use crate::layout::Rect;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// A grid of cells representing a paint target.
///
/// Access is in row-major order: `index = y * width + x`.
///
/// # Overflow Storage
///
/// Complex graphemes (> 4 bytes) are stored in a separate `HashMap`. The
/// cell contains an index into this overflow storage when its `OVERFLOW`
/// flag is set.
#[derive(Clone)]
pub struct Surface {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
    /// Overflow storage for complex graphemes.
    overflow: HashMap<u32, String>,
    /// Next overflow index to assign.
    next_overflow_index: u32,
}

impl Surface {
    /// Create a new surface with the given dimensions.
    ///
    /// All cells are initialized to empty (space with default colors).
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Surface dimensions must be non-zero");
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![Cell::EMPTY; size],
            width,
            height,
            overflow: HashMap::new(),
            next_overflow_index: 0,
        }
    }

    /// Get the surface width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the surface height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Set a single grapheme at (x, y), handling overflow automatically.
    ///
    /// For wide characters (CJK), this also sets a continuation cell at
    /// (x+1, y). Returns the display width of the grapheme, or 0 if out of
    /// bounds.
    pub fn set_grapheme(&mut self, x: u16, y: u16, grapheme: &str, style: Style) -> u8 {
        let Some(idx) = self.index_of(x, y) else {
            return 0;
        };

        let width = u8::try_from(unicode_width::UnicodeWidthStr::width(grapheme)).unwrap_or(1);

        let cell = if let Some(cell) = Cell::styled(grapheme, style) {
            cell
        } else {
            // Overflow: store in the side table
            let overflow_idx = self.next_overflow_index;
            self.next_overflow_index += 1;
            self.overflow.insert(overflow_idx, grapheme.to_owned());
            Cell::overflow(overflow_idx, width, style)
        };

        self.cells[idx] = cell;

        // Wide characters (CJK) occupy a second, continuation column
        if width == 2 {
            if let Some(next_idx) = self.index_of(x + 1, y) {
                self.cells[next_idx] = Cell::wide_continuation(style.bg);
            }
        }

        width
    }

    /// Draw a text run at (x, y), clipping at the right edge.
    ///
    /// Returns the number of columns consumed.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        let mut col = x;
        for grapheme in text.graphemes(true) {
            if col >= self.width {
                break;
            }
            let width = self.set_grapheme(col, y, grapheme, style);
            if width == 0 {
                break;
            }
            col += u16::from(width);
        }
        col - x
    }

    /// Get the grapheme at (x, y), including overflow lookup.
    ///
    /// Returns `None` if out of bounds or if it's a continuation cell.
    pub fn get_grapheme(&self, x: u16, y: u16) -> Option<&str> {
        let cell = self.get(x, y)?;

        if cell.is_wide_continuation() {
            return None;
        }

        if let Some(idx) = cell.overflow_index() {
            self.overflow.get(&idx).map(String::as_str)
        } else {
            cell.grapheme()
        }
    }

    /// Get an overflow grapheme by its index.
    ///
    /// Used by the ANSI serializer when emitting overflow cells.
    #[inline]
    pub fn get_overflow(&self, index: u32) -> Option<&str> {
        self.overflow.get(&index).map(String::as_str)
    }

    /// Fill a rectangular region with a cell.
    pub fn fill_rect(&mut self, rect: Rect, cell: Cell) {
        for row in rect.y..rect.bottom().min(self.height) {
            for col in rect.x..rect.right().min(self.width) {
                if let Some(idx) = self.index_of(col, row) {
                    self.cells[idx] = cell;
                }
            }
        }
    }

    /// Clear the entire surface (fill with empty cells).
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
        self.overflow.clear();
        self.next_overflow_index = 0;
    }

    /// Resize the surface, preserving content where possible.
    ///
    /// New cells are initialized to empty.
    pub fn resize(&mut self, new_width: u16, new_height: u16) {
        if new_width == self.width && new_height == self.height {
            return;
        }

        let new_size = (new_width as usize) * (new_height as usize);
        let mut new_cells = vec![Cell::EMPTY; new_size];

        let copy_width = self.width.min(new_width) as usize;
        let copy_height = self.height.min(new_height) as usize;

        for y in 0..copy_height {
            let old_start = y * (self.width as usize);
            let new_start = y * (new_width as usize);
            new_cells[new_start..new_start + copy_width]
                .copy_from_slice(&self.cells[old_start..old_start + copy_width]);
        }

        self.cells = new_cells;
        self.width = new_width;
        self.height = new_height;
    }

    /// Extract a row's visible text (trailing spaces trimmed).
    ///
    /// Useful for assertions in tests and for plain-text dumps.
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::new();
        for x in 0..self.width {
            if let Some(g) = self.get_grapheme(x, y) {
                out.push_str(g);
            }
        }
        out.trim_end().to_owned()
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("overflow_count", &self.overflow.len())
            .finish()
    }
}
