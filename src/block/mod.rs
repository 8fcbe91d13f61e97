//! The block model: immutable values describing one parsed Markdown block.

mod id;
mod model;

pub use id::{block_id, fnv1a64, to_base36};
pub use model::{Block, BlockData, BlockKind, ColumnAlignment, ListItem};
