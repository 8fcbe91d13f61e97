//! The render unit contract and shared text layout helpers.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::block::{fnv1a64, Block};
use crate::layout::Point;
use crate::surface::{Style, Surface};
use crate::theme::Theme;

/// A paint-ready run of text with a resolved style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledSpan {
    /// Literal text.
    pub text: String,
    /// Resolved style.
    pub style: Style,
    /// Link destination, carried through wrapping for hit-testing.
    pub link: Option<String>,
}

impl StyledSpan {
    /// A plain span with no link.
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            link: None,
        }
    }

    /// Display width in terminal columns.
    pub fn width(&self) -> u16 {
        span_width(&self.text)
    }
}

/// One laid-out row of spans.
pub type StyledLine = Vec<StyledSpan>;

/// What lives under a point inside a unit, for input routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitContent {
    /// Ordinary text.
    Plain,
    /// A link with its destination URL.
    Link(String),
    /// A task-list checkbox: depth-first item index and the state a click
    /// would toggle it to.
    Checkbox {
        /// Depth-first index of the item within its list block.
        index: usize,
        /// The checked state a toggle would produce.
        checked: bool,
    },
}

/// A renderer for one block kind.
///
/// Units are owned by the render tree, keyed by block ID, and survive across
/// reconcile passes as long as their block's ID is stable. `update` may be
/// called many times per second while a block streams; `layout` only when
/// content or width changed.
pub trait RenderUnit {
    /// Absorb new block state. Called on every reconcile where the block's
    /// ID matched an existing unit.
    fn update(&mut self, block: &Block, theme: &Theme);

    /// Compute wrapped lines for the given width.
    fn layout(&mut self, max_width: u16);

    /// Height in rows after layout. `None` means the unit has nothing to
    /// paint yet and occupies no space.
    fn height(&self) -> Option<u16>;

    /// Paint into `surface` with the unit's top-left at `origin`.
    fn paint(&self, surface: &mut Surface, origin: Point);

    /// Position just past the last painted grapheme, unit-relative. The
    /// tree paints the streaming cursor there for the active block.
    fn cursor_anchor(&self) -> Option<Point> {
        None
    }

    /// Plain-text rendition for copy extraction.
    fn plain_text(&self) -> String;

    /// What is under `local` (unit-relative), for input routing.
    fn hit_content(&self, local: Point) -> HitContent {
        let _ = local;
        HitContent::Plain
    }
}

/// Wrapped lines cached against `(content hash, width)`.
///
/// Streaming repaints call `layout` far more often than content changes; the
/// cache turns the common no-change case into a hash compare. A new content
/// hash or width invalidates the entry automatically.
#[derive(Debug, Default)]
pub struct WrapCache {
    key: Option<(u64, u16)>,
    lines: Vec<StyledLine>,
}

impl WrapCache {
    /// An empty cache.
    pub const fn new() -> Self {
        Self {
            key: None,
            lines: Vec::new(),
        }
    }

    /// Return cached lines for `(hash, width)`, rebuilding via `build` on a
    /// key miss.
    pub fn lines_for(
        &mut self,
        hash: u64,
        width: u16,
        build: impl FnOnce() -> Vec<StyledLine>,
    ) -> &[StyledLine] {
        if self.key != Some((hash, width)) {
            self.lines = build();
            self.key = Some((hash, width));
        }
        &self.lines
    }

    /// Cached lines from the last build, if any.
    pub fn lines(&self) -> &[StyledLine] {
        &self.lines
    }

    /// Drop the cached entry.
    pub fn clear(&mut self) {
        self.key = None;
        self.lines.clear();
    }
}

/// Hash content together with anything else that feeds the wrap, so themed
/// restyles invalidate too.
pub fn content_hash(parts: &[&str]) -> u64 {
    let mut joined = String::new();
    for part in parts {
        joined.push_str(part);
        joined.push('\u{1f}');
    }
    fnv1a64(joined.as_bytes())
}

/// Display width of a string in terminal columns.
pub fn span_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

/// Word-wrap styled spans to `width` columns.
///
/// Soft line breaks in the source collapse to spaces. Words wider than the
/// full width hard-break at grapheme boundaries. Always yields at least one
/// (possibly empty) line.
pub fn wrap_spans(spans: &[StyledSpan], width: u16) -> Vec<StyledLine> {
    let width = width.max(1);
    let mut lines: Vec<StyledLine> = Vec::new();
    let mut line: StyledLine = Vec::new();
    let mut used: u16 = 0;

    let mut push_run = |run: StyledSpan,
                        lines: &mut Vec<StyledLine>,
                        line: &mut StyledLine,
                        used: &mut u16| {
        let w = run.width();
        if *used > 0 && *used + w > width {
            while line.last().is_some_and(|s| s.text == " ") {
                line.pop();
            }
            lines.push(std::mem::take(line));
            *used = 0;
        }
        if *used == 0 && w > width {
            // Hard-break an over-long word across rows.
            let mut piece = String::new();
            let mut piece_w: u16 = 0;
            for g in run.text.graphemes(true) {
                let gw = span_width(g);
                if piece_w + gw > width && piece_w > 0 {
                    lines.push(vec![StyledSpan {
                        text: std::mem::take(&mut piece),
                        style: run.style,
                        link: run.link.clone(),
                    }]);
                    piece_w = 0;
                }
                piece.push_str(g);
                piece_w += gw;
            }
            line.push(StyledSpan {
                text: piece,
                style: run.style,
                link: run.link,
            });
            *used = piece_w;
        } else {
            *used += w;
            line.push(run);
        }
    };

    for span in spans {
        for word in split_words(&span.text) {
            match word {
                Word::Space => {
                    // Spaces at a line start are dropped by the wrap.
                    if used > 0 && used < width {
                        line.push(StyledSpan {
                            text: " ".to_string(),
                            style: span.style,
                            link: span.link.clone(),
                        });
                        used += 1;
                    }
                }
                Word::Text(text) => {
                    push_run(
                        StyledSpan {
                            text: text.to_string(),
                            style: span.style,
                            link: span.link.clone(),
                        },
                        &mut lines,
                        &mut line,
                        &mut used,
                    );
                }
            }
        }
    }

    // Trailing spaces would paint past the cursor anchor.
    while line.last().is_some_and(|s| s.text == " ") {
        line.pop();
    }
    lines.push(line);
    lines
}

/// Paint wrapped lines at `origin`, one row per line.
pub fn paint_lines(lines: &[StyledLine], surface: &mut Surface, origin: Point) {
    for (row, line) in lines.iter().enumerate() {
        let y = origin.y + u16::try_from(row).unwrap_or(u16::MAX);
        let mut x = origin.x;
        for span in line {
            x += surface.draw_text(x, y, &span.text, span.style);
        }
    }
}

/// Width of a laid-out line in columns.
pub fn line_width(line: &StyledLine) -> u16 {
    line.iter().map(StyledSpan::width).sum()
}

/// Resolve a column within a line to the span under it.
pub fn span_at(line: &StyledLine, x: u16) -> Option<&StyledSpan> {
    let mut cursor = 0;
    for span in line {
        let w = span.width();
        if x < cursor + w {
            return Some(span);
        }
        cursor += w;
    }
    None
}

enum Word<'a> {
    Space,
    Text(&'a str),
}

/// Split text into whitespace-collapsed words. Newlines count as spaces
/// (markdown soft breaks).
fn split_words(text: &str) -> impl Iterator<Item = Word<'_>> {
    let mut out = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let split = rest
            .find(|c: char| c.is_whitespace())
            .unwrap_or(rest.len());
        if split > 0 {
            out.push(Word::Text(&rest[..split]));
            rest = &rest[split..];
        } else {
            let end = rest
                .find(|c: char| !c.is_whitespace())
                .unwrap_or(rest.len());
            out.push(Word::Space);
            rest = &rest[end..];
        }
    }
    out.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &StyledLine) -> String {
        line.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_wrap_fits_in_width() {
        let spans = vec![StyledSpan::new("hello wide world", Style::DEFAULT)];
        let lines = wrap_spans(&spans, 11);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["hello wide", "world"]);
    }

    #[test]
    fn test_wrap_hard_breaks_long_word() {
        let spans = vec![StyledSpan::new("abcdefghij", Style::DEFAULT)];
        let lines = wrap_spans(&spans, 4);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_collapses_newlines() {
        let spans = vec![StyledSpan::new("one\ntwo", Style::DEFAULT)];
        let lines = wrap_spans(&spans, 20);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "one two");
    }

    #[test]
    fn test_wrap_empty_yields_one_line() {
        let lines = wrap_spans(&[], 10);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_empty());
    }

    #[test]
    fn test_wrap_preserves_link_across_break() {
        let mut span = StyledSpan::new("click right here", Style::DEFAULT);
        span.link = Some("https://example.com".to_string());
        let lines = wrap_spans(&[span], 6);
        assert!(lines.len() > 1);
        for line in &lines {
            for s in line {
                assert_eq!(s.link.as_deref(), Some("https://example.com"));
            }
        }
    }

    #[test]
    fn test_cache_rebuilds_only_on_key_change() {
        let mut cache = WrapCache::new();
        let mut builds = 0;
        for _ in 0..3 {
            cache.lines_for(42, 80, || {
                builds += 1;
                vec![vec![StyledSpan::new("x", Style::DEFAULT)]]
            });
        }
        assert_eq!(builds, 1);

        cache.lines_for(42, 60, || {
            builds += 1;
            Vec::new()
        });
        assert_eq!(builds, 2);

        cache.lines_for(43, 60, || {
            builds += 1;
            Vec::new()
        });
        assert_eq!(builds, 3);
    }

    #[test]
    fn test_span_at_resolves_by_column() {
        let line = vec![
            StyledSpan::new("ab", Style::DEFAULT),
            StyledSpan::new("cd", Style::DEFAULT),
        ];
        assert_eq!(span_at(&line, 0).map(|s| s.text.as_str()), Some("ab"));
        assert_eq!(span_at(&line, 1).map(|s| s.text.as_str()), Some("ab"));
        assert_eq!(span_at(&line, 2).map(|s| s.text.as_str()), Some("cd"));
        assert_eq!(span_at(&line, 4), None);
    }
}
