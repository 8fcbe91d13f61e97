//! Thematic break rendering.

use crate::block::Block;
use crate::layout::Point;
use crate::render::unit::RenderUnit;
use crate::surface::Surface;
use crate::theme::Theme;

/// Renders a thematic break as a full-width rule.
pub struct RuleUnit {
    theme: Theme,
    width: u16,
}

impl RuleUnit {
    /// Create a unit for `block`.
    pub fn new(_block: &Block, theme: &Theme) -> Self {
        Self {
            theme: theme.clone(),
            width: 0,
        }
    }
}

impl RenderUnit for RuleUnit {
    fn update(&mut self, _block: &Block, theme: &Theme) {
        self.theme = theme.clone();
    }

    fn layout(&mut self, max_width: u16) {
        self.width = max_width;
    }

    fn height(&self) -> Option<u16> {
        Some(1)
    }

    fn paint(&self, surface: &mut Surface, origin: Point) {
        let rule = self.theme.rule_glyph.repeat(usize::from(self.width));
        surface.draw_text(origin.x, origin.y, &rule, self.theme.rule);
    }

    fn plain_text(&self) -> String {
        "---".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockData, BlockKind};

    #[test]
    fn test_rule_spans_width() {
        let theme = Theme::default();
        let block = Block::new(
            BlockKind::ThematicBreak,
            0,
            "---".to_string(),
            BlockData::None,
        );
        let mut unit = RuleUnit::new(&block, &theme);
        unit.layout(8);
        let mut surface = Surface::new(10, 1);
        unit.paint(&mut surface, Point::ORIGIN);
        assert_eq!(surface.row_text(0), theme.rule_glyph.repeat(8));
        assert_eq!(unit.height(), Some(1));
    }
}
