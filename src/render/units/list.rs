//! List rendering: bullets, ordered numbering, checkboxes, nesting.

use std::fmt::Write as _;

use crate::block::{fnv1a64, Block, BlockData, BlockKind, ListItem};
use crate::layout::Point;
use crate::render::inline;
use crate::render::unit::{
    line_width, paint_lines, span_at, span_width, wrap_spans, HitContent, RenderUnit,
    StyledLine, StyledSpan,
};
use crate::surface::Surface;
use crate::theme::Theme;

const NEST_INDENT: u16 = 2;

/// A clickable checkbox region recorded during layout.
#[derive(Debug, Clone)]
struct CheckboxZone {
    row: u16,
    x0: u16,
    x1: u16,
    /// Depth-first item index within the block.
    index: usize,
    checked: bool,
}

/// Renders ordered and unordered lists.
///
/// Top-level items carry the block's numbering or bullet; nested levels
/// always render with bullets, indented two columns per depth. Task-list
/// checkboxes become hit-testable toggle zones.
pub struct ListUnit {
    block: Block,
    theme: Theme,
    key: Option<(u64, u16)>,
    lines: Vec<StyledLine>,
    checkboxes: Vec<CheckboxZone>,
}

impl ListUnit {
    /// Create a unit for `block`.
    pub fn new(block: &Block, theme: &Theme) -> Self {
        Self {
            block: block.clone(),
            theme: theme.clone(),
            key: None,
            lines: Vec::new(),
            checkboxes: Vec::new(),
        }
    }

    fn items(&self) -> &[ListItem] {
        match &self.block.data {
            BlockData::List { items, .. } => items,
            _ => &[],
        }
    }

    fn start(&self) -> u64 {
        match &self.block.data {
            BlockData::List { start, .. } => *start,
            _ => 1,
        }
    }

    fn fingerprint(&self) -> u64 {
        let mut buf = String::new();
        let _ = write!(buf, "{}:{}", self.block.kind.name(), self.start());
        fingerprint_items(self.items(), &mut buf);
        fnv1a64(buf.as_bytes())
    }

    fn build(&mut self, max_width: u16) {
        let mut lines = Vec::new();
        let mut checkboxes = Vec::new();
        let mut index = 0;
        let ordered = self.block.kind == BlockKind::OrderedList;
        emit_items(
            self.items(),
            0,
            ordered.then(|| self.start()),
            &self.theme,
            max_width,
            &mut lines,
            &mut checkboxes,
            &mut index,
        );
        self.lines = lines;
        self.checkboxes = checkboxes;
    }
}

impl RenderUnit for ListUnit {
    fn update(&mut self, block: &Block, theme: &Theme) {
        self.block = block.clone();
        self.theme = theme.clone();
    }

    fn layout(&mut self, max_width: u16) {
        let key = (self.fingerprint(), max_width);
        if self.key != Some(key) {
            self.build(max_width);
            self.key = Some(key);
        }
    }

    fn height(&self) -> Option<u16> {
        if self.items().is_empty() {
            return None;
        }
        Some(u16::try_from(self.lines.len()).unwrap_or(u16::MAX))
    }

    fn paint(&self, surface: &mut Surface, origin: Point) {
        paint_lines(&self.lines, surface, origin);
    }

    fn cursor_anchor(&self) -> Option<Point> {
        let last = self.lines.last()?;
        let y = u16::try_from(self.lines.len() - 1).unwrap_or(u16::MAX);
        Some(Point::new(line_width(last), y))
    }

    fn plain_text(&self) -> String {
        let mut out = String::new();
        let ordered = self.block.kind == BlockKind::OrderedList;
        plain_items(
            self.items(),
            0,
            ordered.then(|| self.start()),
            &self.theme,
            &mut out,
        );
        out.trim_end().to_string()
    }

    fn hit_content(&self, local: Point) -> HitContent {
        for zone in &self.checkboxes {
            if zone.row == local.y && local.x >= zone.x0 && local.x < zone.x1 {
                return HitContent::Checkbox {
                    index: zone.index,
                    checked: !zone.checked,
                };
            }
        }
        match self
            .lines
            .get(usize::from(local.y))
            .and_then(|line| span_at(line, local.x))
            .and_then(|s| s.link.clone())
        {
            Some(url) => HitContent::Link(url),
            None => HitContent::Plain,
        }
    }
}

fn fingerprint_items(items: &[ListItem], buf: &mut String) {
    for item in items {
        buf.push('|');
        buf.push_str(&item.content);
        buf.push(match item.checked {
            Some(true) => 'x',
            Some(false) => 'o',
            None => '-',
        });
        buf.push('>');
        fingerprint_items(&item.children, buf);
        buf.push('<');
    }
}

#[allow(clippy::too_many_arguments)]
fn emit_items(
    items: &[ListItem],
    depth: u16,
    numbering: Option<u64>,
    theme: &Theme,
    max_width: u16,
    lines: &mut Vec<StyledLine>,
    checkboxes: &mut Vec<CheckboxZone>,
    index: &mut usize,
) {
    let indent = depth * NEST_INDENT;
    for (i, item) in items.iter().enumerate() {
        let marker = match numbering {
            Some(start) => {
                let number = start.saturating_add(u64::try_from(i).unwrap_or(u64::MAX));
                format!("{number}. ")
            }
            None => format!("{} ", theme.bullet),
        };

        let mut prefix = " ".repeat(usize::from(indent));
        prefix.push_str(&marker);
        let checkbox_x0 = span_width(&prefix);
        if let Some(checked) = item.checked {
            let glyph = if checked {
                theme.checkbox_checked
            } else {
                theme.checkbox_unchecked
            };
            checkboxes.push(CheckboxZone {
                row: u16::try_from(lines.len()).unwrap_or(u16::MAX),
                x0: checkbox_x0,
                x1: checkbox_x0 + span_width(glyph),
                index: *index,
                checked,
            });
            prefix.push_str(glyph);
            prefix.push(' ');
        }

        let hang = span_width(&prefix);
        let body = inline::resolve(&inline::scan(&item.content), theme);
        let wrapped = wrap_spans(&body, max_width.saturating_sub(hang));
        for (row, line) in wrapped.into_iter().enumerate() {
            let lead = if row == 0 {
                StyledSpan::new(prefix.clone(), theme.base)
            } else {
                StyledSpan::new(" ".repeat(usize::from(hang)), theme.base)
            };
            let mut full = vec![lead];
            full.extend(line);
            lines.push(full);
        }

        *index += 1;
        // Nested levels drop the parent's numbering.
        emit_items(
            &item.children,
            depth + 1,
            None,
            theme,
            max_width,
            lines,
            checkboxes,
            index,
        );
    }
}

fn plain_items(
    items: &[ListItem],
    depth: usize,
    numbering: Option<u64>,
    theme: &Theme,
    out: &mut String,
) {
    for (i, item) in items.iter().enumerate() {
        out.push_str(&"  ".repeat(depth));
        match numbering {
            Some(start) => {
                let number = start.saturating_add(u64::try_from(i).unwrap_or(u64::MAX));
                let _ = write!(out, "{number}. ");
            }
            None => {
                out.push_str(theme.bullet);
                out.push(' ');
            }
        }
        if let Some(checked) = item.checked {
            out.push_str(if checked {
                theme.checkbox_checked
            } else {
                theme.checkbox_unchecked
            });
            out.push(' ');
        }
        out.push_str(&inline::strip(&item.content));
        out.push('\n');
        plain_items(&item.children, depth + 1, None, theme, out);
    }
}
