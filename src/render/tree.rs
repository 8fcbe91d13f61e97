//! The render tree: stable-identity reconciliation of blocks into units,
//! vertical layout, and painting.

use std::collections::HashMap;

use crate::block::Block;
use crate::layout::Point;
use crate::surface::Surface;
use crate::theme::Theme;

use super::registry::UnitRegistry;
use super::unit::{HitContent, RenderUnit};

/// Counts from one reconcile pass, for instrumentation and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileStats {
    /// Units created for blocks with no existing unit.
    pub created: usize,
    /// Units updated in place for matching IDs.
    pub updated: usize,
    /// Units dropped because their block disappeared.
    pub removed: usize,
}

impl ReconcileStats {
    /// True when the pass changed nothing.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.created == 0 && self.updated == 0 && self.removed == 0
    }
}

/// What sits under a hit-tested point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitTarget {
    /// Stable ID of the block under the point.
    pub block_id: String,
    /// What the point resolves to inside the unit.
    pub content: HitContent,
}

/// One laid-out entry: unit key plus its vertical slot.
#[derive(Debug, Clone)]
struct Slot {
    id: String,
    y: u16,
    height: u16,
}

/// Owns one render unit per live block and keeps them across parses.
///
/// `reconcile` diffs a fresh parse against the previous one by block ID:
/// unchanged IDs keep their unit (and its wrapped-line cache), new IDs get
/// units from the registry, and vanished IDs drop theirs. A parse identical
/// to the previous one short-circuits before touching any unit.
pub struct RenderTree {
    registry: UnitRegistry,
    theme: Theme,
    blocks: Vec<Block>,
    units: HashMap<String, Box<dyn RenderUnit>>,
    order: Vec<String>,
    slots: Vec<Slot>,
    width: u16,
    total_height: u16,
}

impl RenderTree {
    /// An empty tree with the default theme.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(UnitRegistry::new(), Theme::default())
    }

    /// An empty tree with a caller-supplied registry and theme.
    #[must_use]
    pub fn with_registry(registry: UnitRegistry, theme: Theme) -> Self {
        Self {
            registry,
            theme,
            blocks: Vec::new(),
            units: HashMap::new(),
            order: Vec::new(),
            slots: Vec::new(),
            width: 0,
            total_height: 0,
        }
    }

    /// The active theme.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Swap the theme and restyle every unit in place.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        for block in &self.blocks {
            if let Some(unit) = self.units.get_mut(&block.id) {
                unit.update(block, &self.theme);
            }
        }
        // Wrap caches key on content, so force a rebuild through layout.
        for unit in self.units.values_mut() {
            unit.layout(self.width.max(1));
        }
        self.relayout();
    }

    /// Diff `blocks` against the previous parse and bring units in sync.
    pub fn reconcile(&mut self, blocks: Vec<Block>) -> ReconcileStats {
        if blocks == self.blocks {
            return ReconcileStats::default();
        }

        let mut stats = ReconcileStats::default();
        let mut next: HashMap<String, Box<dyn RenderUnit>> =
            HashMap::with_capacity(blocks.len());
        let mut order = Vec::with_capacity(blocks.len());

        for block in &blocks {
            let unit = match self.units.remove(&block.id) {
                Some(mut unit) => {
                    unit.update(block, &self.theme);
                    stats.updated += 1;
                    unit
                }
                None => {
                    stats.created += 1;
                    self.registry.create(block, &self.theme)
                }
            };
            next.insert(block.id.clone(), unit);
            order.push(block.id.clone());
        }

        stats.removed = self.units.len();
        self.units = next;
        self.order = order;
        self.blocks = blocks;
        stats
    }

    /// Lay out all units at `width`. Returns the total height in rows,
    /// including inter-block spacing.
    pub fn layout(&mut self, width: u16) -> u16 {
        self.width = width.max(1);
        for id in &self.order {
            if let Some(unit) = self.units.get_mut(id) {
                unit.layout(self.width);
            }
        }
        self.relayout();
        self.total_height
    }

    fn relayout(&mut self) {
        let spacing = self.theme.block_spacing;
        let mut slots = Vec::with_capacity(self.order.len());
        let mut y: u16 = 0;
        for id in &self.order {
            let Some(height) = self.units.get(id).and_then(|u| u.height()) else {
                continue;
            };
            if height == 0 {
                continue;
            }
            if !slots.is_empty() {
                y = y.saturating_add(spacing);
            }
            slots.push(Slot {
                id: id.clone(),
                y,
                height,
            });
            y = y.saturating_add(height);
        }
        self.slots = slots;
        self.total_height = y;
    }

    /// Total height from the last layout.
    #[must_use]
    pub const fn total_height(&self) -> u16 {
        self.total_height
    }

    /// Paint every laid-out unit, with the tree's top-left at `origin`.
    /// When the tail block is still streaming, the cursor glyph is painted
    /// at its anchor.
    pub fn paint(&self, surface: &mut Surface, origin: Point) {
        for slot in &self.slots {
            if let Some(unit) = self.units.get(&slot.id) {
                unit.paint(surface, origin.offset(0, slot.y));
            }
        }
        if let Some(anchor) = self.streaming_cursor() {
            surface.draw_text(
                origin.x + anchor.x,
                origin.y + anchor.y,
                self.theme.cursor_glyph,
                self.theme.cursor_style,
            );
        }
    }

    /// Tree-relative cursor position for the streaming tail block, if the
    /// last block is partial.
    #[must_use]
    pub fn streaming_cursor(&self) -> Option<Point> {
        let last = self.blocks.last()?;
        if !last.is_partial {
            return None;
        }
        let slot = self.slots.iter().rev().find(|s| s.id == last.id)?;
        let anchor = self.units.get(&slot.id)?.cursor_anchor()?;
        Some(anchor.offset(0, slot.y))
    }

    /// Resolve a tree-relative point to the block and content under it.
    #[must_use]
    pub fn hit_test(&self, p: Point) -> Option<HitTarget> {
        let slot = self
            .slots
            .iter()
            .find(|s| p.y >= s.y && p.y < s.y + s.height)?;
        let unit = self.units.get(&slot.id)?;
        Some(HitTarget {
            block_id: slot.id.clone(),
            content: unit.hit_content(Point::new(p.x, p.y - slot.y)),
        })
    }

    /// Plain-text rendition of the whole tree, one block per line group,
    /// joined with `\n`.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.order
            .iter()
            .filter_map(|id| self.units.get(id))
            .map(|u| u.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Byte ranges of each block's text within [`Self::plain_text`], paired
    /// with the block ID. Supports copy extraction of a single block.
    #[must_use]
    pub fn plain_text_ranges(&self) -> Vec<(String, std::ops::Range<usize>)> {
        let mut ranges = Vec::with_capacity(self.order.len());
        let mut offset = 0;
        for (i, id) in self.order.iter().enumerate() {
            let Some(unit) = self.units.get(id) else {
                continue;
            };
            if i > 0 {
                offset += 1; // "\n"
            }
            let len = unit.plain_text().len();
            ranges.push((id.clone(), offset..offset + len));
            offset += len;
        }
        ranges
    }

    /// Blocks from the last reconcile, in document order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The unit keyed by `id`, if it exists.
    #[must_use]
    pub fn unit(&self, id: &str) -> Option<&dyn RenderUnit> {
        self.units.get(id).map(AsRef::as_ref)
    }

    /// Drop all blocks and units, as when a new stream attaches.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.units.clear();
        self.order.clear();
        self.slots.clear();
        self.total_height = 0;
    }
}

impl Default for RenderTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RenderTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderTree")
            .field("blocks", &self.blocks.len())
            .field("width", &self.width)
            .field("total_height", &self.total_height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MarkdownParser;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Vec<Block> {
        MarkdownParser::new().parse(text)
    }

    fn unit_ptr(tree: &RenderTree, id: &str) -> *const u8 {
        std::ptr::from_ref(tree.unit(id).expect("unit")).cast::<u8>()
    }

    #[test]
    fn test_identical_parse_is_noop() {
        let mut tree = RenderTree::new();
        let stats = tree.reconcile(parse("# Title\n\nbody\n\n"));
        assert_eq!(stats.created, 2);

        let stats = tree.reconcile(parse("# Title\n\nbody\n\n"));
        assert!(stats.is_noop());
    }

    #[test]
    fn test_stable_blocks_keep_their_unit_instance() {
        let mut tree = RenderTree::new();
        tree.reconcile(parse("# Title\n\nstreaming body"));
        let header_id = tree.blocks()[0].id.clone();
        let before = unit_ptr(&tree, &header_id);

        // The paragraph grows; the header block is byte-identical.
        tree.reconcile(parse("# Title\n\nstreaming body grew"));
        assert_eq!(unit_ptr(&tree, &header_id), before);
    }

    #[test]
    fn test_changed_content_creates_new_unit_key() {
        let mut tree = RenderTree::new();
        tree.reconcile(parse("plain one\n\n"));
        let old_id = tree.blocks()[0].id.clone();

        let stats = tree.reconcile(parse("plain two\n\n"));
        assert_eq!(stats.created, 1);
        assert_eq!(stats.removed, 1);
        assert_ne!(tree.blocks()[0].id, old_id);
    }

    #[test]
    fn test_layout_totals_heights_plus_spacing() {
        let mut tree = RenderTree::new();
        tree.reconcile(parse("# A\n\none\n\ntwo\n\n"));
        // Three one-row blocks, two spacing rows between them.
        assert_eq!(tree.layout(40), 5);
    }

    #[test]
    fn test_paint_and_streaming_cursor() {
        let mut tree = RenderTree::new();
        tree.reconcile(parse("# Title\n\ntail"));
        tree.layout(40);
        let cursor = tree.streaming_cursor().expect("partial tail");
        assert_eq!(cursor, Point::new(4, 2));

        let mut surface = Surface::new(40, 6);
        tree.paint(&mut surface, Point::ORIGIN);
        assert_eq!(surface.row_text(0), "Title");
        assert_eq!(
            surface.row_text(2),
            format!("tail{}", tree.theme().cursor_glyph)
        );
    }

    #[test]
    fn test_finalized_tail_has_no_cursor() {
        let mut tree = RenderTree::new();
        tree.reconcile(parse("done\n\n"));
        tree.layout(40);
        assert_eq!(tree.streaming_cursor(), None);
    }

    #[test]
    fn test_hit_test_resolves_block_and_link() {
        let mut tree = RenderTree::new();
        tree.reconcile(parse("# Head\n\nsee [it](https://x.y)\n\n"));
        tree.layout(40);

        let hit = tree.hit_test(Point::new(0, 0)).expect("header hit");
        assert!(hit.block_id.starts_with("header_0_"));
        assert_eq!(hit.content, HitContent::Plain);

        // Row 2 is the paragraph: "see it"; columns 4..6 are the link.
        let hit = tree.hit_test(Point::new(4, 2)).expect("link hit");
        assert_eq!(hit.content, HitContent::Link("https://x.y".to_string()));

        assert_eq!(tree.hit_test(Point::new(0, 1)), None);
    }

    #[test]
    fn test_plain_text_and_ranges() {
        let mut tree = RenderTree::new();
        tree.reconcile(parse("# Head\n\nbody text\n\n"));
        tree.layout(40);

        let text = tree.plain_text();
        assert_eq!(text, "Head\nbody text");

        let ranges = tree.plain_text_ranges();
        assert_eq!(ranges.len(), 2);
        assert_eq!(&text[ranges[0].1.clone()], "Head");
        assert_eq!(&text[ranges[1].1.clone()], "body text");
    }

    #[test]
    fn test_clear_empties_tree() {
        let mut tree = RenderTree::new();
        tree.reconcile(parse("# A\n\n"));
        tree.layout(40);
        tree.clear();
        assert_eq!(tree.total_height(), 0);
        assert!(tree.blocks().is_empty());
        assert_eq!(tree.plain_text(), "");
    }

    #[test]
    fn test_reordered_lists_reuse_moved_units() {
        let mut tree = RenderTree::new();
        tree.reconcile(parse("# Keep\n\n- a\n- b\n\n"));
        let header_id = tree.blocks()[0].id.clone();
        let before = unit_ptr(&tree, &header_id);

        // Inserting a paragraph shifts the list's index and thus its ID,
        // but the header survives by content identity.
        tree.reconcile(parse("# Keep\n\nintro\n\n- a\n- b\n\n"));
        assert_eq!(unit_ptr(&tree, &header_id), before);
    }
}
