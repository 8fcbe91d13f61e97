//! Block value types.
//!
//! A [`Block`] is created fresh on every parser invocation and never mutated
//! in place; "changing" a block means producing a new value. The render tree
//! matches blocks across parses by [`Block::id`] and decides whether an
//! update is needed with structural equality.

use super::id::block_id;

/// The kind of a top-level Markdown block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Plain paragraph text.
    Paragraph,
    /// ATX header (`#` through `######`).
    Header,
    /// Fenced or indented code block.
    CodeBlock,
    /// `>`-prefixed blockquote with recursively parsed children.
    Blockquote,
    /// Numbered list (`1.`).
    OrderedList,
    /// Bulleted list (`-`, `*`, `+`).
    UnorderedList,
    /// Pipe-delimited table with a delimiter row.
    Table,
    /// Thematic break (`---`, `***`, `___`).
    ThematicBreak,
    /// Block LaTeX (`$$...$$`), rendered as placeholder text.
    Latex,
    /// HTML block; rendered as a paragraph.
    Html,
    /// Sentinel-delimited custom block resolved via registered patterns.
    Custom,
}

impl BlockKind {
    /// Short lowercase name used in block IDs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Header => "header",
            Self::CodeBlock => "code",
            Self::Blockquote => "quote",
            Self::OrderedList => "ol",
            Self::UnorderedList => "ul",
            Self::Table => "table",
            Self::ThematicBreak => "hr",
            Self::Latex => "latex",
            Self::Html => "html",
            Self::Custom => "custom",
        }
    }
}

/// Per-column alignment of a table, derived from the delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnAlignment {
    /// `---` or `:---`
    #[default]
    Left,
    /// `:--:`
    Center,
    /// `---:`
    Right,
}

/// One item of an ordered or unordered list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListItem {
    /// The item's text (continuation lines joined with `\n`).
    pub content: String,
    /// Checkbox state if the item carried a `[ ]`/`[x]` prefix.
    pub checked: Option<bool>,
    /// Nested sub-items, one indent level deeper.
    pub children: Vec<ListItem>,
}

impl ListItem {
    /// Create a plain item with the given content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            checked: None,
            children: Vec::new(),
        }
    }
}

/// Kind-specific structured data. One block kind, one shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BlockData {
    /// No extra data (paragraph, blockquote, thematic break, LaTeX, HTML).
    #[default]
    None,
    /// Header level 1-6.
    Header {
        /// Number of leading `#` characters.
        level: u8,
    },
    /// Code block info.
    Code {
        /// Language tag from the opening fence, if any.
        language: Option<String>,
        /// True for fenced blocks, false for indented ones.
        fenced: bool,
    },
    /// List items and numbering.
    List {
        /// Top-level items in document order.
        items: Vec<ListItem>,
        /// Starting number for ordered lists (1 for unordered).
        start: u64,
    },
    /// Table rows and alignments.
    Table {
        /// All rows including the header row; cells are raw text.
        rows: Vec<Vec<String>>,
        /// One alignment per column, from the delimiter row.
        alignments: Vec<ColumnAlignment>,
    },
    /// Custom block pattern resolution.
    Custom {
        /// Index of the first registered pattern whose regex matched, if any.
        pattern: Option<usize>,
    },
}

/// One parsed Markdown block.
///
/// Blocks are ordered by document position. At most one block per parse
/// result is partial, and it is always the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Stable identifier: `{kind}_{index}_{base36(content hash)}`.
    ///
    /// Two parses of the same logical block (same kind, position, content)
    /// produce the same ID; a content change produces a different ID. Table
    /// IDs are keyed by row count instead of the content hash so a partially
    /// streamed cell does not churn the table's identity.
    pub id: String,
    /// The block kind.
    pub kind: BlockKind,
    /// Raw block-level source text (pre-inline-parsing).
    pub content: String,
    /// Kind-specific structured data.
    pub data: BlockData,
    /// Recursively parsed children; only populated for blockquotes.
    pub children: Vec<Block>,
    /// True when this is the trailing block and its terminator (blank line or
    /// closing fence) has not arrived yet.
    pub is_partial: bool,
}

impl Block {
    /// Build a block, deriving its stable ID from kind, position, and content.
    pub fn new(kind: BlockKind, index: usize, content: impl Into<String>, data: BlockData) -> Self {
        let content = content.into();
        let id = block_id(kind, index, &content, &data);
        Self {
            id,
            kind,
            content,
            data,
            children: Vec::new(),
            is_partial: false,
        }
    }

    /// Attach recursively parsed children (builder pattern).
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// Copy of this block with the partial flag set.
    #[must_use]
    pub fn into_partial(mut self) -> Self {
        self.is_partial = true;
        self
    }

    /// Number of rows if this is a table block.
    pub fn table_row_count(&self) -> Option<usize> {
        match &self.data {
            BlockData::Table { rows, .. } => Some(rows.len()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_same_content_same_id() {
        let a = Block::new(BlockKind::Paragraph, 0, "hello", BlockData::None);
        let b = Block::new(BlockKind::Paragraph, 0, "hello", BlockData::None);
        assert_eq!(a.id, b.id);
        assert_eq!(a, b);
    }

    #[test]
    fn test_content_change_changes_id() {
        let a = Block::new(BlockKind::Paragraph, 0, "hello", BlockData::None);
        let b = Block::new(BlockKind::Paragraph, 0, "hello!", BlockData::None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_position_change_changes_id() {
        let a = Block::new(BlockKind::Paragraph, 0, "hello", BlockData::None);
        let b = Block::new(BlockKind::Paragraph, 1, "hello", BlockData::None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_partial_flag_does_not_change_id() {
        let a = Block::new(BlockKind::Paragraph, 0, "hello", BlockData::None);
        let b = Block::new(BlockKind::Paragraph, 0, "hello", BlockData::None).into_partial();
        assert_eq!(a.id, b.id);
        assert_ne!(a, b);
    }

    #[test]
    fn test_table_id_keyed_by_row_count() {
        let rows2 = vec![
            vec!["a".to_owned(), "b".to_owned()],
            vec!["1".to_owned(), "2".to_owned()],
        ];
        let mut rows2_edited = rows2.clone();
        rows2_edited[1][1] = "2x".to_owned();
        let mut rows3 = rows2.clone();
        rows3.push(vec!["3".to_owned(), "4".to_owned()]);

        let data = |rows: Vec<Vec<String>>| BlockData::Table {
            rows,
            alignments: vec![ColumnAlignment::Left; 2],
        };

        let a = Block::new(BlockKind::Table, 0, "a|b", data(rows2));
        let b = Block::new(BlockKind::Table, 0, "a|b edited", data(rows2_edited));
        let c = Block::new(BlockKind::Table, 0, "a|b more", data(rows3));

        // Cell edits keep the ID; a new row changes it
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }
}
