//! # Tidemark
//!
//! An incremental Markdown block renderer for streaming AI output.
//!
//! Tidemark re-parses the full accumulated response on every snapshot, but
//! gives each block a content-derived stable ID so the render layer can diff
//! by identity: finished blocks keep their render unit (and its wrapped-line
//! cache) while only the streaming tail block churns.
//!
//! ## Core Concepts
//!
//! - **Stateless parsing**: same text in, same blocks out, every snapshot
//! - **Stable block IDs**: `{kind}_{index}_{content hash}` keys unit reuse
//! - **Render units**: one per-kind renderer per live block, reconciled by ID
//! - **Streaming tolerance**: half-typed markup renders as literal text
//!
//! ## Example
//!
//! ```rust
//! use tidemark::{MarkdownParser, Point, RenderTree, Surface};
//!
//! let mut tree = RenderTree::new();
//! tree.reconcile(MarkdownParser::new().parse("# Hello\n\nstreaming **wor"));
//! tree.layout(40);
//!
//! let mut surface = Surface::new(40, 8);
//! tree.paint(&mut surface, Point::ORIGIN);
//! assert_eq!(surface.row_text(0), "Hello");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod block;
pub mod layout;
pub mod parser;
pub mod render;
pub mod stream;
pub mod surface;
pub mod theme;

// Re-exports for convenience
pub use block::{Block, BlockData, BlockKind, ColumnAlignment, ListItem};
pub use layout::{Point, Rect};
pub use parser::MarkdownParser;
pub use render::{
    HitContent, HitTarget, ReconcileStats, RenderTree, RenderUnit, UnitRegistry,
};
pub use stream::{FrameTick, FrameTicker, StreamController, StreamEvent, Typewriter};
pub use surface::{Cell, CellFlags, Modifiers, Rgb, Style, Surface};
pub use theme::Theme;
