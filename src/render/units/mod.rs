//! Built-in render units, one per block kind.

mod code;
mod header;
mod latex;
mod list;
mod paragraph;
mod quote;
mod rule;
mod table;

pub use code::CodeUnit;
pub use header::HeaderUnit;
pub use latex::LatexUnit;
pub use list::ListUnit;
pub use paragraph::ParagraphUnit;
pub use quote::QuoteUnit;
pub use rule::RuleUnit;
pub use table::TableUnit;

use crate::block::{Block, BlockKind};
use crate::theme::Theme;

use super::unit::RenderUnit;

/// Construct the built-in unit for a block's kind.
///
/// HTML blocks render as literal paragraphs, and custom blocks that did not
/// resolve against a registration degrade the same way.
pub fn create_builtin(block: &Block, theme: &Theme) -> Box<dyn RenderUnit> {
    match block.kind {
        BlockKind::Header => Box::new(HeaderUnit::new(block, theme)),
        BlockKind::CodeBlock => Box::new(CodeUnit::new(block, theme)),
        BlockKind::Blockquote => Box::new(QuoteUnit::new(block, theme)),
        BlockKind::OrderedList | BlockKind::UnorderedList => {
            Box::new(ListUnit::new(block, theme))
        }
        BlockKind::Table => Box::new(TableUnit::new(block, theme)),
        BlockKind::ThematicBreak => Box::new(RuleUnit::new(block, theme)),
        BlockKind::Latex => Box::new(LatexUnit::new(block, theme)),
        BlockKind::Paragraph | BlockKind::Html | BlockKind::Custom => {
            Box::new(ParagraphUnit::new(block, theme))
        }
    }
}
