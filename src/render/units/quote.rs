//! Blockquote rendering: a gutter bar with nested child units behind it.

use crate::block::Block;
use crate::layout::Point;
use crate::render::unit::{HitContent, RenderUnit};
use crate::surface::Surface;
use crate::theme::Theme;

use super::create_builtin;

/// One nested child unit with its reconcile key and laid-out row offset.
struct QuoteChild {
    id: String,
    unit: Box<dyn RenderUnit>,
    y: u16,
    height: u16,
}

/// Renders a blockquote by composing units for its child blocks, indented
/// behind a gutter bar.
///
/// Children carry forward across updates by block ID, the same way the
/// render tree carries top-level units, so a streaming paragraph inside a
/// quote keeps its unit.
pub struct QuoteUnit {
    theme: Theme,
    children: Vec<QuoteChild>,
    height: u16,
}

impl QuoteUnit {
    /// Create a unit for `block`.
    pub fn new(block: &Block, theme: &Theme) -> Self {
        let mut unit = Self {
            theme: theme.clone(),
            children: Vec::new(),
            height: 0,
        };
        unit.reconcile_children(block, theme);
        unit
    }

    fn reconcile_children(&mut self, block: &Block, theme: &Theme) {
        let mut old: Vec<QuoteChild> = std::mem::take(&mut self.children);
        for child in &block.children {
            let unit = match old.iter().position(|c| c.id == child.id) {
                Some(pos) => {
                    let mut kept = old.swap_remove(pos);
                    kept.unit.update(child, theme);
                    kept.unit
                }
                None => create_builtin(child, theme),
            };
            self.children.push(QuoteChild {
                id: child.id.clone(),
                unit,
                y: 0,
                height: 0,
            });
        }
    }

    fn inner_width(&self, max_width: u16) -> u16 {
        max_width.saturating_sub(self.theme.quote_indent).max(1)
    }

    fn child_at(&self, y: u16) -> Option<(&QuoteChild, u16)> {
        self.children
            .iter()
            .filter(|c| c.height > 0)
            .find(|c| y >= c.y && y < c.y + c.height)
            .map(|c| (c, y - c.y))
    }
}

impl RenderUnit for QuoteUnit {
    fn update(&mut self, block: &Block, theme: &Theme) {
        self.theme = theme.clone();
        self.reconcile_children(block, theme);
    }

    fn layout(&mut self, max_width: u16) {
        let inner = self.inner_width(max_width);
        let mut y = 0;
        for child in &mut self.children {
            child.unit.layout(inner);
            let h = child.unit.height().unwrap_or(0);
            child.y = y;
            child.height = h;
            if h > 0 {
                y += h + 1;
            }
        }
        self.height = y.saturating_sub(1);
    }

    fn height(&self) -> Option<u16> {
        if self.height == 0 {
            return None;
        }
        Some(self.height)
    }

    fn paint(&self, surface: &mut Surface, origin: Point) {
        for row in 0..self.height {
            surface.draw_text(
                origin.x,
                origin.y + row,
                self.theme.quote_glyph,
                self.theme.quote_bar,
            );
        }
        for child in &self.children {
            if child.height == 0 {
                continue;
            }
            child.unit.paint(
                surface,
                origin.offset(self.theme.quote_indent, child.y),
            );
        }
    }

    fn cursor_anchor(&self) -> Option<Point> {
        let last = self.children.iter().rev().find(|c| c.height > 0)?;
        let anchor = last.unit.cursor_anchor()?;
        Some(anchor.offset(self.theme.quote_indent, last.y))
    }

    fn plain_text(&self) -> String {
        self.children
            .iter()
            .map(|c| c.unit.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn hit_content(&self, local: Point) -> HitContent {
        if local.x < self.theme.quote_indent {
            return HitContent::Plain;
        }
        match self.child_at(local.y) {
            Some((child, row)) => child
                .unit
                .hit_content(Point::new(local.x - self.theme.quote_indent, row)),
            None => HitContent::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockData, BlockKind};

    fn quote(children: Vec<Block>) -> Block {
        Block::new(
            BlockKind::Blockquote,
            0,
            children
                .iter()
                .map(|c| c.content.clone())
                .collect::<Vec<_>>()
                .join("\n"),
            BlockData::None,
        )
        .with_children(children)
    }

    fn para(index: usize, text: &str) -> Block {
        Block::new(
            BlockKind::Paragraph,
            index,
            text.to_string(),
            BlockData::None,
        )
    }

    #[test]
    fn test_gutter_and_indent() {
        let theme = Theme::default();
        let block = quote(vec![para(0, "quoted text")]);
        let mut unit = QuoteUnit::new(&block, &theme);
        unit.layout(30);
        let mut surface = Surface::new(30, 2);
        unit.paint(&mut surface, Point::ORIGIN);
        assert_eq!(surface.get_grapheme(0, 0), Some(theme.quote_glyph));
        assert_eq!(
            surface.row_text(0),
            format!("{} quoted text", theme.quote_glyph)
        );
    }

    #[test]
    fn test_children_spaced_one_row() {
        let theme = Theme::default();
        let block = quote(vec![para(0, "first"), para(1, "second")]);
        let mut unit = QuoteUnit::new(&block, &theme);
        unit.layout(30);
        assert_eq!(unit.height(), Some(3));
        let mut surface = Surface::new(30, 4);
        unit.paint(&mut surface, Point::ORIGIN);
        assert_eq!(surface.row_text(2), format!("{} second", theme.quote_glyph));
    }

    #[test]
    fn test_child_units_carry_forward() {
        let theme = Theme::default();
        let first = para(0, "stable child");
        let block = quote(vec![first.clone()]);
        let mut unit = QuoteUnit::new(&block, &theme);
        let before = std::ptr::from_ref(unit.children[0].unit.as_ref()).cast::<u8>();

        unit.update(&quote(vec![first]), &theme);
        let after = std::ptr::from_ref(unit.children[0].unit.as_ref()).cast::<u8>();
        assert_eq!(before, after);
    }

    #[test]
    fn test_plain_text_joins_children() {
        let theme = Theme::default();
        let block = quote(vec![para(0, "a"), para(1, "b")]);
        let unit = QuoteUnit::new(&block, &theme);
        assert_eq!(unit.plain_text(), "a\nb");
    }
}
