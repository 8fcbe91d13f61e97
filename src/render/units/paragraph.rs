//! Paragraph rendering: inline-styled, word-wrapped body text.

use crate::block::Block;
use crate::layout::Point;
use crate::render::inline;
use crate::render::unit::{
    content_hash, line_width, paint_lines, span_at, HitContent, RenderUnit, StyledLine,
    WrapCache,
};
use crate::surface::Surface;
use crate::theme::Theme;

/// Renders paragraph, HTML, and unresolved custom blocks as wrapped text.
pub struct ParagraphUnit {
    block: Block,
    theme: Theme,
    cache: WrapCache,
}

impl ParagraphUnit {
    /// Create a unit for `block`.
    pub fn new(block: &Block, theme: &Theme) -> Self {
        Self {
            block: block.clone(),
            theme: theme.clone(),
            cache: WrapCache::new(),
        }
    }

    fn lines(&self) -> &[StyledLine] {
        self.cache.lines()
    }
}

impl RenderUnit for ParagraphUnit {
    fn update(&mut self, block: &Block, theme: &Theme) {
        self.block = block.clone();
        self.theme = theme.clone();
    }

    fn layout(&mut self, max_width: u16) {
        let hash = content_hash(&[&self.block.content]);
        let block = &self.block;
        let theme = &self.theme;
        self.cache.lines_for(hash, max_width, || {
            let spans = inline::resolve(&inline::scan(&block.content), theme);
            crate::render::unit::wrap_spans(&spans, max_width)
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

    fn hit_content(&self, local: Point) -> HitContent {
        let Some(line) = self.lines().get(usize::from(local.y)) else {
            return HitContent::Plain;
        };
        match span_at(line, local.x).and_then(|s| s.link.clone()) {
            Some(url) => HitContent::Link(url),
            None => HitContent::Plain,
        }
    }
}
