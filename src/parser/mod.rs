//! The incremental Markdown parser.
//!
//! [`MarkdownParser::parse`] converts a complete markdown string into an
//! ordered block list with stable IDs. It retains no state between calls:
//! the streaming controller always passes the full accumulated text, and the
//! parser re-derives everything, so two calls with the same text are
//! guaranteed to produce list-equal results (the render tree's no-op fast
//! path depends on this).
//!
//! Parsing is line-oriented: a single forward pass with per-block-type
//! matchers tried in fixed precedence order. Malformed or unclosed
//! constructs are never errors; they fall through to the most permissive
//! interpretation, usually a paragraph. A token stream is by definition
//! syntactically incomplete at every step except the last, so the parser
//! must always produce something renderable.

mod list;
mod table;

use crate::block::{Block, BlockData, BlockKind};
use regex::Regex;

/// Default maximum blockquote nesting depth.
const DEFAULT_MAX_DEPTH: usize = 10;

/// Default custom-block sentinel: first code point of the private use area.
pub const DEFAULT_SENTINEL: char = '\u{E000}';

/// A matched block before its positional ID is assigned.
pub(crate) struct BlockSeed {
    pub kind: BlockKind,
    pub content: String,
    pub data: BlockData,
    pub children: Vec<Block>,
}

impl BlockSeed {
    pub(crate) fn new(kind: BlockKind, content: impl Into<String>, data: BlockData) -> Self {
        Self {
            kind,
            content: content.into(),
            data,
            children: Vec::new(),
        }
    }

    fn into_block(self, index: usize) -> Block {
        Block::new(self.kind, index, self.content, self.data).with_children(self.children)
    }
}

/// Outcome of one matcher dispatch: an optional block seed plus the next
/// line cursor. A `None` seed with an advanced cursor means "consume, emit
/// nothing" (blank line, degenerate empty blockquote).
type Match = (Option<BlockSeed>, usize);

/// Line-oriented, streaming-tolerant Markdown parser.
///
/// # Example
/// ```
/// use tidemark::{BlockKind, MarkdownParser};
///
/// let parser = MarkdownParser::new();
/// let blocks = parser.parse("# Hello\n\nworld");
/// assert_eq!(blocks[0].kind, BlockKind::Header);
/// assert_eq!(blocks[1].kind, BlockKind::Paragraph);
/// ```
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    max_depth: usize,
    sentinel: char,
    custom_patterns: Vec<Regex>,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    /// Create a parser with default settings.
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            sentinel: DEFAULT_SENTINEL,
            custom_patterns: Vec::new(),
        }
    }

    /// Override the custom-block sentinel code point.
    #[must_use]
    pub const fn with_sentinel(mut self, sentinel: char) -> Self {
        self.sentinel = sentinel;
        self
    }

    /// Register a custom-block content pattern.
    ///
    /// Patterns are tried in registration order against the content of each
    /// sentinel-delimited block; the first match's index is recorded in the
    /// block's [`BlockData::Custom`]. The same order must be used when
    /// registering unit constructors on the registry.
    #[must_use]
    pub fn with_custom_pattern(mut self, pattern: Regex) -> Self {
        self.custom_patterns.push(pattern);
        self
    }

    /// Parse a complete markdown document into an ordered block list.
    ///
    /// If the produced list is non-empty and the text does not end with a
    /// blank line (`"\n\n"`, or its CRLF form), the last block is marked
    /// partial: its closing delimiter may still be in flight.
    pub fn parse(&self, text: &str) -> Vec<Block> {
        let mut blocks = self.parse_at_depth(text, 0);

        if !ends_with_blank_line(text) {
            if let Some(last) = blocks.pop() {
                blocks.push(last.into_partial());
            }
        }

        blocks
    }

    /// Parse without partial-flag handling; used recursively for blockquote
    /// content with an explicit depth counter.
    fn parse_at_depth(&self, text: &str, depth: usize) -> Vec<Block> {
        if depth > self.max_depth {
            log::debug!("blockquote nesting exceeded depth {}, truncating", self.max_depth);
            return Vec::new();
        }
        if text.is_empty() {
            return Vec::new();
        }

        let lines: Vec<&str> = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect();

        let mut blocks: Vec<Block> = Vec::new();
        let mut i = 0;
        while i < lines.len() {
            if lines[i].trim().is_empty() {
                i += 1;
                continue;
            }

            let (seed, next) = self.match_block(&lines, i, depth);
            debug_assert!(next > i, "matcher must advance the cursor");

            if let Some(seed) = seed {
                let index = blocks.len();
                blocks.push(seed.into_block(index));
            }
            i = next;
        }

        blocks
    }

    /// Dispatch matchers in fixed precedence order.
    fn match_block(&self, lines: &[&str], i: usize, depth: usize) -> Match {
        let line = lines[i];

        if let Some(m) = self.try_custom(lines, i) {
            return m;
        }
        if let Some(seed) = try_thematic_break(line) {
            return (Some(seed), i + 1);
        }
        if let Some(seed) = try_header(line) {
            return (Some(seed), i + 1);
        }
        if let Some(m) = try_fenced_code(lines, i) {
            return m;
        }
        if let Some(m) = try_indented_code(lines, i) {
            return m;
        }
        if let Some(m) = self.try_blockquote(lines, i, depth) {
            return m;
        }
        if let Some(m) = try_latex(lines, i) {
            return m;
        }
        if let Some(m) = table::try_table(lines, i) {
            return m;
        }
        if let Some(m) = list::try_list(lines, i) {
            return m;
        }
        if let Some(m) = try_html(lines, i) {
            return m;
        }

        self.paragraph(lines, i)
    }

    /// Sentinel-delimited custom block.
    ///
    /// Content between two occurrences of the sentinel code point becomes a
    /// `Custom` block; the first registered pattern that matches the content
    /// is recorded so the registry can pick the corresponding constructor.
    fn try_custom(&self, lines: &[&str], i: usize) -> Option<Match> {
        let rest = lines[i].trim_start().strip_prefix(self.sentinel)?;

        // Closing sentinel on the same line?
        if let Some(end) = rest.find(self.sentinel) {
            let content = rest[..end].to_owned();
            return Some((Some(self.custom_seed(content)), i + 1));
        }

        let mut content = String::from(rest);
        let mut j = i + 1;
        while j < lines.len() {
            if let Some(end) = lines[j].find(self.sentinel) {
                content.push('\n');
                content.push_str(&lines[j][..end]);
                return Some((Some(self.custom_seed(content)), j + 1));
            }
            content.push('\n');
            content.push_str(lines[j]);
            j += 1;
        }

        // Unclosed sentinel: the block is still streaming in
        Some((Some(self.custom_seed(content)), lines.len()))
    }

    fn custom_seed(&self, content: String) -> BlockSeed {
        let pattern = self
            .custom_patterns
            .iter()
            .position(|re| re.is_match(&content));
        BlockSeed::new(BlockKind::Custom, content, BlockData::Custom { pattern })
    }

    /// Blockquote: contiguous `>`-prefixed lines, recursively re-parsed.
    fn try_blockquote(&self, lines: &[&str], i: usize, depth: usize) -> Option<Match> {
        if !lines[i].trim_start().starts_with('>') {
            return None;
        }

        let mut stripped: Vec<&str> = Vec::new();
        let mut j = i;
        while j < lines.len() {
            let trimmed = lines[j].trim_start();
            let Some(rest) = trimmed.strip_prefix('>') else {
                break;
            };
            stripped.push(rest.strip_prefix(' ').unwrap_or(rest));
            j += 1;
        }

        let inner = stripped.join("\n");
        let children = self.parse_at_depth(&inner, depth + 1);
        if children.is_empty() {
            // Degenerate quote (`>` with no content): consume, emit nothing
            return Some((None, j));
        }

        let seed = BlockSeed {
            kind: BlockKind::Blockquote,
            content: inner,
            data: BlockData::None,
            children,
        };
        Some((Some(seed), j))
    }

    /// Default matcher: consume contiguous lines until a blank line or the
    /// start of any other block type.
    fn paragraph(&self, lines: &[&str], i: usize) -> Match {
        let mut collected = vec![lines[i]];
        let mut j = i + 1;
        while j < lines.len() {
            let line = lines[j];
            if line.trim().is_empty() || self.starts_new_block(lines, j) {
                break;
            }
            collected.push(line);
            j += 1;
        }

        let seed = BlockSeed::new(BlockKind::Paragraph, collected.join("\n"), BlockData::None);
        (Some(seed), j)
    }

    /// Would a higher-precedence matcher fire at this line? Used to
    /// terminate paragraph accumulation.
    fn starts_new_block(&self, lines: &[&str], i: usize) -> bool {
        let line = lines[i];
        let trimmed = line.trim_start();

        trimmed.starts_with(self.sentinel)
            || try_thematic_break(line).is_some()
            || try_header(line).is_some()
            || fence_open(line).is_some()
            || strip_code_indent(line).is_some()
            || trimmed.starts_with('>')
            || trimmed.starts_with("$$")
            || table::is_table_start(lines, i)
            || list::is_list_line(line)
            || is_html_open(line)
    }
}

/// A closing blank line, with either LF or CRLF line endings.
fn ends_with_blank_line(text: &str) -> bool {
    text.ends_with("\n\n") || text.ends_with("\r\n\r\n")
}

/// Thematic break: three or more of the same `-`, `*`, or `_`, optionally
/// space-separated, and nothing else on the line.
fn try_thematic_break(line: &str) -> Option<BlockSeed> {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.len() < 3 {
        return None;
    }
    let first = compact.chars().next()?;
    if !matches!(first, '-' | '*' | '_') || !compact.chars().all(|c| c == first) {
        return None;
    }
    Some(BlockSeed::new(
        BlockKind::ThematicBreak,
        line.trim(),
        BlockData::None,
    ))
}

/// ATX header: 1-6 `#` followed by a space.
fn try_header(line: &str) -> Option<BlockSeed> {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = &trimmed[hashes..];
    if !rest.starts_with(' ') {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let level = hashes as u8;
    Some(BlockSeed::new(
        BlockKind::Header,
        rest.trim(),
        BlockData::Header { level },
    ))
}

/// Detect a fence opener; returns (fence char, fence length, info string).
fn fence_open(line: &str) -> Option<(char, usize, &str)> {
    let trimmed = line.trim_start();
    let first = trimmed.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }
    let count = trimmed.chars().take_while(|&c| c == first).count();
    if count < 3 {
        return None;
    }
    Some((first, count, trimmed[count..].trim()))
}

/// Fenced code block: consume until a matching closing fence or EOF.
fn try_fenced_code(lines: &[&str], i: usize) -> Option<Match> {
    let (fence_char, fence_len, info) = fence_open(lines[i])?;
    let language = if info.is_empty() {
        None
    } else {
        // Only the first word of the info string is the language tag
        info.split_whitespace().next().map(str::to_owned)
    };

    let mut body: Vec<&str> = Vec::new();
    let mut j = i + 1;
    while j < lines.len() {
        let trimmed = lines[j].trim_start();
        let closing = trimmed.chars().take_while(|&c| c == fence_char).count();
        if closing >= fence_len && trimmed.chars().all(|c| c == fence_char || c.is_whitespace()) {
            // Closed fence
            let seed = BlockSeed::new(
                BlockKind::CodeBlock,
                body.join("\n"),
                BlockData::Code {
                    language,
                    fenced: true,
                },
            );
            return Some((Some(seed), j + 1));
        }
        body.push(lines[j]);
        j += 1;
    }

    // EOF without a closing fence: still a code block; the top-level parse
    // will mark it partial
    let seed = BlockSeed::new(
        BlockKind::CodeBlock,
        body.join("\n"),
        BlockData::Code {
            language,
            fenced: true,
        },
    );
    Some((Some(seed), lines.len()))
}

/// Strip the 4-space or tab prefix that marks an indented code line.
fn strip_code_indent(line: &str) -> Option<&str> {
    line.strip_prefix("    ").or_else(|| line.strip_prefix('\t'))
}

/// Indented code block: contiguous lines prefixed by 4 spaces or a tab.
fn try_indented_code(lines: &[&str], i: usize) -> Option<Match> {
    strip_code_indent(lines[i])?;

    let mut body: Vec<&str> = Vec::new();
    let mut j = i;
    while j < lines.len() {
        if let Some(rest) = strip_code_indent(lines[j]) {
            body.push(rest);
            j += 1;
        } else {
            break;
        }
    }

    let seed = BlockSeed::new(
        BlockKind::CodeBlock,
        body.join("\n"),
        BlockData::Code {
            language: None,
            fenced: false,
        },
    );
    Some((Some(seed), j))
}

/// Block LaTeX: `$$...$$`, single-line or spanning until a closing `$$`.
fn try_latex(lines: &[&str], i: usize) -> Option<Match> {
    let trimmed = lines[i].trim();
    let rest = trimmed.strip_prefix("$$")?;

    // Single line: `$$ ... $$`
    if let Some(inner) = rest.strip_suffix("$$") {
        if !inner.is_empty() {
            let seed = BlockSeed::new(BlockKind::Latex, inner.trim(), BlockData::None);
            return Some((Some(seed), i + 1));
        }
    }

    let mut body: Vec<&str> = Vec::new();
    if !rest.is_empty() {
        body.push(rest);
    }
    let mut j = i + 1;
    while j < lines.len() {
        let t = lines[j].trim();
        if let Some(prefix) = t.strip_suffix("$$") {
            if !prefix.is_empty() {
                body.push(prefix);
            }
            let seed = BlockSeed::new(BlockKind::Latex, body.join("\n"), BlockData::None);
            return Some((Some(seed), j + 1));
        }
        body.push(lines[j]);
        j += 1;
    }

    // Unclosed math: still a latex block, marked partial at top level
    let seed = BlockSeed::new(BlockKind::Latex, body.join("\n"), BlockData::None);
    Some((Some(seed), lines.len()))
}

/// Does the line open an HTML tag (`<div`, `</p>`, `<!--`)?
fn is_html_open(line: &str) -> bool {
    let trimmed = line.trim_start();
    let mut chars = trimmed.chars();
    if chars.next() != Some('<') {
        return false;
    }
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '/' || c == '!')
}

/// HTML block: contiguous non-blank lines starting at an opening tag.
/// Rendered as a paragraph downstream; only recognized so it does not merge
/// into surrounding text.
fn try_html(lines: &[&str], i: usize) -> Option<Match> {
    if !is_html_open(lines[i]) {
        return None;
    }

    let mut collected = vec![lines[i]];
    let mut j = i + 1;
    while j < lines.len() && !lines[j].trim().is_empty() {
        collected.push(lines[j]);
        j += 1;
    }

    let seed = BlockSeed::new(BlockKind::Html, collected.join("\n"), BlockData::None);
    Some((Some(seed), j))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::ColumnAlignment;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Vec<Block> {
        MarkdownParser::new().parse(text)
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n\n").is_empty());
    }

    #[test]
    fn test_header_partial() {
        let blocks = parse("# Hello");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Header);
        assert_eq!(blocks[0].content, "Hello");
        assert_eq!(blocks[0].data, BlockData::Header { level: 1 });
        assert!(blocks[0].is_partial);
    }

    #[test]
    fn test_header_finalized() {
        let blocks = parse("# Hello\n\n");
        assert_eq!(blocks.len(), 1);
        assert!(!blocks[0].is_partial);
        // Same logical block, same ID as the partial parse
        assert_eq!(blocks[0].id, parse("# Hello")[0].id);
    }

    #[test]
    fn test_idempotence() {
        let text = "# Title\n\npara text\n\n- a\n- b\n\n```rust\nfn x() {}\n```\n\n> quote\n";
        assert_eq!(parse(text), parse(text));
    }

    #[test]
    fn test_append_monotonicity() {
        let before = parse("# Title\n\nfirst paragraph\n\n");
        let after = parse("# Title\n\nfirst paragraph\n\nsecond paragraph");
        assert_eq!(after.len(), 3);
        for (old, new) in before.iter().zip(&after) {
            assert_eq!(old.id, new.id);
        }
    }

    #[test]
    fn test_list_reidentified_header_stable() {
        let two = parse("# T\n\n- a\n- b\n");
        let three = parse("# T\n\n- a\n- b\n- c\n");

        assert_eq!(two[0].id, three[0].id); // header keeps its ID
        assert_eq!(three[1].kind, BlockKind::UnorderedList);
        let BlockData::List { items, .. } = &three[1].data else {
            panic!("expected list data");
        };
        assert_eq!(items.len(), 3);
        assert_ne!(two[1].id, three[1].id); // list content changed, new ID
    }

    #[test]
    fn test_unclosed_fence() {
        let blocks = parse("```dart\nvoid main(){");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::CodeBlock);
        assert_eq!(blocks[0].content, "void main(){");
        assert_eq!(
            blocks[0].data,
            BlockData::Code {
                language: Some("dart".to_owned()),
                fenced: true
            }
        );
        assert!(blocks[0].is_partial);
    }

    #[test]
    fn test_closed_fence() {
        let blocks = parse("```rust\nfn main() {}\n```\n\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, "fn main() {}");
        assert!(!blocks[0].is_partial);
    }

    #[test]
    fn test_indented_line_interrupts_paragraph() {
        let blocks = parse("lead text\n    let x = 1;\n\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
        assert_eq!(blocks[0].content, "lead text");
        assert_eq!(blocks[1].kind, BlockKind::CodeBlock);
        assert_eq!(blocks[1].content, "let x = 1;");
    }

    #[test]
    fn test_indented_code() {
        let blocks = parse("    let x = 1;\n    let y = 2;\n\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::CodeBlock);
        assert_eq!(blocks[0].content, "let x = 1;\nlet y = 2;");
        assert_eq!(
            blocks[0].data,
            BlockData::Code {
                language: None,
                fenced: false
            }
        );
    }

    #[test]
    fn test_thematic_break() {
        for text in ["---\n\n", "***\n\n", "___\n\n", "- - -\n\n"] {
            let blocks = parse(text);
            assert_eq!(blocks.len(), 1, "input: {text:?}");
            assert_eq!(blocks[0].kind, BlockKind::ThematicBreak);
        }
    }

    #[test]
    fn test_blockquote_nested() {
        let blocks = parse("> outer\n> > inner\n\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Blockquote);
        let children = &blocks[0].children;
        assert_eq!(children[0].kind, BlockKind::Paragraph);
        assert_eq!(children[0].content, "outer");
        assert_eq!(children[1].kind, BlockKind::Blockquote);
        assert_eq!(children[1].children[0].content, "inner");
    }

    #[test]
    fn test_blockquote_depth_guard() {
        // 12 levels of nesting; the guard caps recursion without panicking
        let mut text = String::new();
        for depth in 0..12 {
            text.push_str(&"> ".repeat(depth + 1));
            text.push_str("deep\n");
        }
        let blocks = MarkdownParser::new().parse(&text);
        assert!(!blocks.is_empty());
    }

    #[test]
    fn test_empty_blockquote_emits_nothing() {
        let blocks = parse(">\n>\n\n");
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_latex_single_line() {
        let blocks = parse("$$E = mc^2$$\n\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Latex);
        assert_eq!(blocks[0].content, "E = mc^2");
    }

    #[test]
    fn test_latex_multi_line() {
        let blocks = parse("$$\nx = 1\ny = 2\n$$\n\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, "x = 1\ny = 2");
    }

    #[test]
    fn test_table_streamed_rows() {
        // Header + delimiter alone: table (two structural rows present)
        let blocks = parse("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert_eq!(blocks[0].kind, BlockKind::Table);
        assert_eq!(blocks[0].table_row_count(), Some(2));
        let id_two = blocks[0].id.clone();

        let blocks = parse("| a | b |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |\n");
        assert_eq!(blocks[0].table_row_count(), Some(3));
        assert_ne!(blocks[0].id, id_two);
    }

    #[test]
    fn test_table_id_stable_while_cell_streams() {
        let a = parse("| a | b |\n|---|---|\n| 1 | 2 |\n");
        let b = parse("| a | b |\n|---|---|\n| 1 | 2 |\n| 3 | 4");
        // The half-streamed fourth row already counts as a row; compare
        // cell-edits instead:
        let c = parse("| a | b |\n|---|---|\n| 1 | 2x |\n");
        assert_eq!(a[0].id, c[0].id);
        assert_ne!(a[0].id, b[0].id);
    }

    #[test]
    fn test_pipe_line_without_delimiter_is_paragraph() {
        let blocks = parse("a | b\nplain text\n\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_table_alignments() {
        let blocks = parse("| l | c | r |\n|:--|:-:|--:|\n| 1 | 2 | 3 |\n\n");
        let BlockData::Table { alignments, .. } = &blocks[0].data else {
            panic!("expected table");
        };
        assert_eq!(
            alignments,
            &[
                ColumnAlignment::Left,
                ColumnAlignment::Center,
                ColumnAlignment::Right
            ]
        );
    }

    #[test]
    fn test_html_block() {
        let blocks = parse("<div class=\"x\">\nhello\n</div>\n\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Html);
    }

    #[test]
    fn test_paragraph_stops_at_header() {
        let blocks = parse("some text\n# Header\n\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
        assert_eq!(blocks[0].content, "some text");
        assert_eq!(blocks[1].kind, BlockKind::Header);
    }

    #[test]
    fn test_custom_sentinel_single_line() {
        let re = Regex::new(r"^chart:").unwrap();
        let parser = MarkdownParser::new().with_custom_pattern(re);
        let blocks = parser.parse("\u{E000}chart:bar 1,2,3\u{E000}\n\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Custom);
        assert_eq!(blocks[0].content, "chart:bar 1,2,3");
        assert_eq!(blocks[0].data, BlockData::Custom { pattern: Some(0) });
    }

    #[test]
    fn test_custom_sentinel_no_pattern_match() {
        let re = Regex::new(r"^chart:").unwrap();
        let parser = MarkdownParser::new().with_custom_pattern(re);
        let blocks = parser.parse("\u{E000}unknown payload\u{E000}\n\n");
        assert_eq!(blocks[0].data, BlockData::Custom { pattern: None });
    }

    #[test]
    fn test_custom_sentinel_multi_line() {
        let blocks = parse("\u{E000}line one\nline two\u{E000}\n\n");
        assert_eq!(blocks[0].kind, BlockKind::Custom);
        assert_eq!(blocks[0].content, "line one\nline two");
    }

    #[test]
    fn test_partial_only_last_block() {
        let blocks = parse("# One\n\npara\n\n- item");
        assert_eq!(blocks.len(), 3);
        assert!(!blocks[0].is_partial);
        assert!(!blocks[1].is_partial);
        assert!(blocks[2].is_partial);
    }

    #[test]
    fn test_crlf_blank_line_closes_tail() {
        let blocks = parse("# One\r\n\r\npara\r\n\r\n");
        assert_eq!(blocks.len(), 2);
        assert!(!blocks[1].is_partial);

        let blocks = parse("# One\r\n\r\npara");
        assert!(blocks[1].is_partial);
    }

    #[test]
    fn test_ids_unique_within_parse() {
        let blocks = parse("a\n\na\n\na\n\n");
        let mut ids: Vec<_> = blocks.iter().map(|b| b.id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), blocks.len());
    }
}
