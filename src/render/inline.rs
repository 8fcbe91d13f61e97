//! Inline markup scanner.
//!
//! A single greedy forward pass over block content that resolves emphasis,
//! inline code, strikethrough, and links into styled spans. Delimiters with
//! no closing partner are emitted as literal text, which keeps a half-typed
//! `**bold` stable while its closing marker is still in flight.

use crate::surface::{Modifiers, Style};
use crate::theme::Theme;

use super::unit::StyledSpan;

/// One run of text with uniform inline attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InlineSpan {
    /// The literal text, markup stripped.
    pub text: String,
    /// Emphasis accumulated from enclosing delimiters.
    pub emphasis: Modifiers,
    /// True inside a backtick code span.
    pub code: bool,
    /// Link destination when inside `[label](url)`.
    pub link: Option<String>,
}

/// Scan `text` into inline spans. Unclosed delimiters stay literal.
pub fn scan(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    scan_into(text, Modifiers::empty(), None, &mut spans);
    spans
}

/// Resolve inline spans against a theme, producing paint-ready styled runs.
pub fn resolve(spans: &[InlineSpan], theme: &Theme) -> Vec<StyledSpan> {
    resolve_with(spans, theme, theme.base)
}

/// Like [`resolve`], with a caller-chosen style for plain runs. Headers and
/// list bodies pass their own base.
pub fn resolve_with(spans: &[InlineSpan], theme: &Theme, base: Style) -> Vec<StyledSpan> {
    spans
        .iter()
        .map(|span| {
            let mut style = if span.code {
                theme.code_span
            } else if span.link.is_some() {
                theme.link
            } else {
                base
            };
            style = style.add_modifiers(span.emphasis);
            StyledSpan {
                text: span.text.clone(),
                style,
                link: span.link.clone(),
            }
        })
        .collect()
}

/// The plain-text rendition of a block's content: markup stripped, links
/// reduced to their labels.
pub fn strip(text: &str) -> String {
    scan(text).iter().map(|s| s.text.as_str()).collect()
}

fn scan_into(
    text: &str,
    emphasis: Modifiers,
    link: Option<&str>,
    out: &mut Vec<InlineSpan>,
) {
    let bytes = text.as_bytes();
    let mut literal = String::new();
    let mut i = 0;

    while i < bytes.len() {
        let rest = &text[i..];

        // Backslash escapes a single ASCII punctuation character.
        if bytes[i] == b'\\' && i + 1 < bytes.len() && bytes[i + 1].is_ascii_punctuation() {
            literal.push(bytes[i + 1] as char);
            i += 2;
            continue;
        }

        if let Some((delim, mods)) = open_delimiter(rest) {
            if let Some(end) = find_close(&rest[delim.len()..], delim) {
                let inner = &rest[delim.len()..delim.len() + end];
                if !inner.is_empty() {
                    flush(&mut literal, emphasis, link, out);
                    scan_into(inner, emphasis | mods, link, out);
                    i += delim.len() * 2 + inner.len();
                    continue;
                }
            }
            // No closing partner: fall through and keep the marker literal.
        }

        if bytes[i] == b'`' {
            if let Some(end) = rest[1..].find('`') {
                flush(&mut literal, emphasis, link, out);
                out.push(InlineSpan {
                    text: rest[1..=end].to_string(),
                    emphasis,
                    code: true,
                    link: link.map(str::to_string),
                });
                i += end + 2;
                continue;
            }
        }

        if bytes[i] == b'[' {
            if let Some((label, url, consumed)) = match_link(rest) {
                flush(&mut literal, emphasis, link, out);
                scan_into(label, emphasis, Some(url), out);
                i += consumed;
                continue;
            }
        }

        let ch_len = rest.chars().next().map_or(1, char::len_utf8);
        literal.push_str(&rest[..ch_len]);
        i += ch_len;
    }

    flush(&mut literal, emphasis, link, out);
}

/// Emphasis delimiters, longest first so `**` wins over `*`.
fn open_delimiter(rest: &str) -> Option<(&'static str, Modifiers)> {
    const DELIMS: [(&str, Modifiers); 5] = [
        ("**", Modifiers::BOLD),
        ("__", Modifiers::BOLD),
        ("~~", Modifiers::STRIKETHROUGH),
        ("*", Modifiers::ITALIC),
        ("_", Modifiers::ITALIC),
    ];
    DELIMS
        .iter()
        .find(|(d, _)| rest.starts_with(d))
        .map(|&(d, m)| (d, m))
}

/// Find the closing occurrence of `delim` in `hay`.
///
/// A candidate immediately followed by the delimiter character is skipped in
/// favor of the next overlapping position, so `***` closes as `*` + `**`
/// rather than splitting a nested run mid-delimiter.
fn find_close(hay: &str, delim: &str) -> Option<usize> {
    let hay = hay.as_bytes();
    let delim = delim.as_bytes();
    let mut fallback = None;
    let mut j = 0;
    while j + delim.len() <= hay.len() {
        if &hay[j..j + delim.len()] == delim {
            if hay.get(j + delim.len()) != Some(&delim[0]) {
                return Some(j);
            }
            fallback.get_or_insert(j);
        }
        j += 1;
    }
    fallback
}

/// Match `[label](url)` at the start of `rest`.
fn match_link(rest: &str) -> Option<(&str, &str, usize)> {
    let close = rest.find(']')?;
    let label = &rest[1..close];
    let after = &rest[close + 1..];
    if !after.starts_with('(') {
        return None;
    }
    let paren = after.find(')')?;
    let url = &after[1..paren];
    if label.is_empty() || url.is_empty() {
        return None;
    }
    Some((label, url, close + 1 + paren + 1))
}

fn flush(
    literal: &mut String,
    emphasis: Modifiers,
    link: Option<&str>,
    out: &mut Vec<InlineSpan>,
) {
    if literal.is_empty() {
        return;
    }
    out.push(InlineSpan {
        text: std::mem::take(literal),
        emphasis,
        code: false,
        link: link.map(str::to_string),
    });
}
