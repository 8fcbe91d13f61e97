//! LaTeX block rendering.
//!
//! No math layout happens here: the source is shown verbatim in a muted
//! style, which keeps equations legible without a typesetting pass.

use crate::block::Block;
use crate::layout::Point;
use crate::render::unit::{
    content_hash, line_width, paint_lines, wrap_spans, RenderUnit, StyledLine, StyledSpan,
    WrapCache,
};
use crate::surface::Surface;
use crate::theme::Theme;

/// Renders `$$...$$` blocks as styled placeholder text.
pub struct LatexUnit {
    block: Block,
    theme: Theme,
    cache: WrapCache,
}

impl LatexUnit {
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

impl RenderUnit for LatexUnit {
    fn update(&mut self, block: &Block, theme: &Theme) {
        self.block = block.clone();
        self.theme = theme.clone();
    }

    fn layout(&mut self, max_width: u16) {
        let hash = content_hash(&[&self.block.content]);
        let block = &self.block;
        let style = self.theme.latex;
        self.cache.lines_for(hash, max_width, || {
            wrap_spans(&[StyledSpan::new(block.content.clone(), style)], max_width)
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
        self.block.content.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockData, BlockKind};

    #[test]
    fn test_latex_renders_source_verbatim() {
        let theme = Theme::default();
        let block = Block::new(
            BlockKind::Latex,
            0,
            r"E = mc^2".to_string(),
            BlockData::None,
        );
        let mut unit = LatexUnit::new(&block, &theme);
        unit.layout(40);
        let mut surface = Surface::new(40, 1);
        unit.paint(&mut surface, Point::ORIGIN);
        assert_eq!(surface.row_text(0), "E = mc^2");
        assert_eq!(unit.lines()[0][0].style, theme.latex);
    }
}
