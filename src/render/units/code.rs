//! Code block rendering: verbatim lines on a filled background.

use unicode_segmentation::UnicodeSegmentation;

use crate::block::{Block, BlockData};
use crate::layout::{Point, Rect};
use crate::render::unit::{span_width, RenderUnit};
use crate::surface::{Cell, Surface};
use crate::theme::Theme;

/// Renders fenced and indented code blocks.
///
/// Content is never wrapped; lines wider than the layout width clip. A
/// fenced block with a language tag gets a single tag line above the body.
pub struct CodeUnit {
    block: Block,
    theme: Theme,
    width: u16,
}

impl CodeUnit {
    /// Create a unit for `block`.
    pub fn new(block: &Block, theme: &Theme) -> Self {
        Self {
            block: block.clone(),
            theme: theme.clone(),
            width: 0,
        }
    }

    fn language(&self) -> Option<&str> {
        match &self.block.data {
            BlockData::Code { language, .. } => language.as_deref(),
            _ => None,
        }
    }

    fn body_lines(&self) -> std::str::Split<'_, char> {
        self.block.content.split('\n')
    }

    fn tag_rows(&self) -> u16 {
        u16::from(self.language().is_some())
    }

    fn last_line(&self) -> &str {
        self.block.content.rsplit('\n').next().unwrap_or("")
    }
}

impl RenderUnit for CodeUnit {
    fn update(&mut self, block: &Block, theme: &Theme) {
        self.block = block.clone();
        self.theme = theme.clone();
    }

    fn layout(&mut self, max_width: u16) {
        self.width = max_width;
    }

    fn height(&self) -> Option<u16> {
        let rows = u16::try_from(self.body_lines().count()).unwrap_or(u16::MAX);
        Some(rows + self.tag_rows())
    }

    fn paint(&self, surface: &mut Surface, origin: Point) {
        let mut y = origin.y;
        if let Some(lang) = self.language() {
            surface.fill_rect(
                Rect::new(origin.x, y, self.width, 1),
                Cell::blank(self.theme.code_language),
            );
            surface.draw_text(origin.x, y, lang, self.theme.code_language);
            y += 1;
        }
        for line in self.body_lines() {
            surface.fill_rect(
                Rect::new(origin.x, y, self.width, 1),
                Cell::blank(self.theme.code),
            );
            let clipped = clip_to_width(line, self.width);
            surface.draw_text(origin.x, y, clipped, self.theme.code);
            y += 1;
        }
    }

    fn cursor_anchor(&self) -> Option<Point> {
        let rows = u16::try_from(self.body_lines().count()).unwrap_or(u16::MAX);
        let last = clip_to_width(self.last_line(), self.width);
        Some(Point::new(
            span_width(last),
            rows.saturating_sub(1) + self.tag_rows(),
        ))
    }

    fn plain_text(&self) -> String {
        self.block.content.clone()
    }
}

/// Longest prefix of `line` that fits in `width` columns.
fn clip_to_width(line: &str, width: u16) -> &str {
    let mut used: u16 = 0;
    let mut end = 0;
    for (idx, g) in line.grapheme_indices(true) {
        let w = span_width(g);
        if used + w > width {
            break;
        }
        used += w;
        end = idx + g.len();
    }
    &line[..end]
}
