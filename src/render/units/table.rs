//! Table rendering: sized columns, aligned cells, a rule under the header.

use crate::block::{Block, BlockData, ColumnAlignment};
use crate::layout::Point;
use crate::render::inline;
use crate::render::unit::{span_width, RenderUnit};
use crate::surface::Surface;
use crate::theme::Theme;

const CELL_GAP: &str = " │ ";

/// Renders a pipe table.
///
/// Column widths come from the widest cell in each column; rows never wrap,
/// so a table wider than the layout width clips at the right edge.
pub struct TableUnit {
    block: Block,
    theme: Theme,
    widths: Vec<u16>,
    max_width: u16,
}

impl TableUnit {
    /// Create a unit for `block`.
    pub fn new(block: &Block, theme: &Theme) -> Self {
        Self {
            block: block.clone(),
            theme: theme.clone(),
            widths: Vec::new(),
            max_width: 0,
        }
    }

    fn rows(&self) -> &[Vec<String>] {
        match &self.block.data {
            BlockData::Table { rows, .. } => rows,
            _ => &[],
        }
    }

    fn alignments(&self) -> &[ColumnAlignment] {
        match &self.block.data {
            BlockData::Table { alignments, .. } => alignments,
            _ => &[],
        }
    }

    fn alignment(&self, col: usize) -> ColumnAlignment {
        self.alignments().get(col).copied().unwrap_or_default()
    }

    fn paint_row(&self, surface: &mut Surface, origin: Point, y: u16, row: &[String], header: bool) {
        let style = if header {
            self.theme.table_header
        } else {
            self.theme.base
        };
        let mut x = origin.x;
        let right = origin.x.saturating_add(self.max_width);
        for (col, width) in self.widths.iter().enumerate() {
            if col > 0 {
                if x.saturating_add(span_width(CELL_GAP)) > right {
                    return;
                }
                x += surface.draw_text(x, y, CELL_GAP, self.theme.table_border);
            }
            let cell = row.get(col).map_or("", String::as_str);
            let text = inline::strip(cell);
            let pad = width.saturating_sub(span_width(&text));
            let (lead, trail) = match self.alignment(col) {
                ColumnAlignment::Left => (0, pad),
                ColumnAlignment::Right => (pad, 0),
                ColumnAlignment::Center => (pad / 2, pad - pad / 2),
            };
            if x.saturating_add(*width) > right {
                return;
            }
            x += surface.draw_text(x, y, &" ".repeat(usize::from(lead)), style);
            x += surface.draw_text(x, y, &text, style);
            x += surface.draw_text(x, y, &" ".repeat(usize::from(trail)), style);
        }
    }
}

impl RenderUnit for TableUnit {
    fn update(&mut self, block: &Block, theme: &Theme) {
        self.block = block.clone();
        self.theme = theme.clone();
    }

    fn layout(&mut self, max_width: u16) {
        self.max_width = max_width;
        let mut widths: Vec<u16> = Vec::new();
        for row in self.rows() {
            for (col, cell) in row.iter().enumerate() {
                let w = span_width(&inline::strip(cell));
                if col == widths.len() {
                    widths.push(w);
                } else if w > widths[col] {
                    widths[col] = w;
                }
            }
        }
        self.widths = widths;
    }

    fn height(&self) -> Option<u16> {
        let rows = self.rows().len();
        if rows == 0 {
            return None;
        }
        // Header, separator rule, then data rows.
        Some(u16::try_from(rows + 1).unwrap_or(u16::MAX))
    }

    fn paint(&self, surface: &mut Surface, origin: Point) {
        let Some((header, body)) = self.rows().split_first() else {
            return;
        };
        self.paint_row(surface, origin, origin.y, header, true);

        let mut rule = String::new();
        for (col, width) in self.widths.iter().enumerate() {
            if col > 0 {
                rule.push_str("─┼─");
            }
            rule.push_str(&"─".repeat(usize::from(*width)));
        }
        let clipped: String = {
            let mut used = 0;
            rule.chars()
                .take_while(|_| {
                    used += 1;
                    used <= usize::from(self.max_width)
                })
                .collect()
        };
        surface.draw_text(origin.x, origin.y + 1, &clipped, self.theme.table_border);

        for (i, row) in body.iter().enumerate() {
            let y = origin.y + 2 + u16::try_from(i).unwrap_or(u16::MAX);
            self.paint_row(surface, origin, y, row, false);
        }
    }

    fn plain_text(&self) -> String {
        self.rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| inline::strip(c))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
