//! Header rendering.

use crate::block::{Block, BlockData};
use crate::layout::Point;
use crate::render::inline;
use crate::render::unit::{
    content_hash, line_width, paint_lines, wrap_spans, RenderUnit, StyledLine, WrapCache,
};
use crate::surface::Surface;
use crate::theme::Theme;

/// Renders an ATX header with its level's theme style.
pub struct HeaderUnit {
    block: Block,
    theme: Theme,
    cache: WrapCache,
}

impl HeaderUnit {
    /// Create a unit for `block`.
    pub fn new(block: &Block, theme: &Theme) -> Self {
        Self {
            block: block.clone(),
            theme: theme.clone(),
            cache: WrapCache::new(),
        }
    }

    fn level(&self) -> u8 {
        match self.block.data {
            BlockData::Header { level } => level,
            _ => 1,
        }
    }

    fn lines(&self) -> &[StyledLine] {
        self.cache.lines()
    }
}

impl RenderUnit for HeaderUnit {
    fn update(&mut self, block: &Block, theme: &Theme) {
        self.block = block.clone();
        self.theme = theme.clone();
    }

    fn layout(&mut self, max_width: u16) {
        let level = self.level();
        let hash = content_hash(&[&self.block.content, &level.to_string()]);
        let block = &self.block;
        let theme = &self.theme;
        self.cache.lines_for(hash, max_width, || {
            let base = theme.header(level);
            let spans = inline::resolve_with(&inline::scan(&block.content), theme, base);
            wrap_spans(&spans, max_width)
        });
    }

    fn height(&self) -> Option<u16> {
        if self.block.content.is_empty() {
            return None;
        }
        Some(u16::try_from(self.lines().len()).unwrap_or(u16::MAX))
    }

    fn paint(&self, surface: &mut Surface, origin: Point) {
        paint_lines(self.lines(), surface, origin);
    }

    fn cursor_anchor(&self) -> Option<Point> {
        let lines = self.lines();
        let last = lines.last()?;
        let y = u16::try_from(lines.len() - 1).unwrap_or(u16::MAX);
        Some(Point::new(line_width(last), y))
    }

    fn plain_text(&self) -> String {
        inline::strip(&self.block.content)
    }
}
