//! List matcher: ordered and unordered lists with nesting, continuation
//! lines, checkbox items, and single-blank-line tolerance.
//!
//! Nesting is positional: a line indented exactly one nest level (2 spaces)
//! deeper that itself carries a list marker opens a sub-list. Indented lines
//! that are not nested list items merge into the previous item's content;
//! a fenced code block inside a list item is absorbed as continuation text
//! (a documented simplification).

use super::{BlockSeed, Match};
use crate::block::{BlockData, BlockKind, ListItem};

/// Spaces per nesting level.
const NEST_STEP: usize = 2;

/// A parsed list marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    /// `1.` — carries the item number.
    Ordered(u64),
    /// `-`, `*`, or `+`.
    Unordered,
}

impl Marker {
    const fn same_family(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Ordered(_), Self::Ordered(_)) | (Self::Unordered, Self::Unordered)
        )
    }
}

/// Count leading spaces (a tab counts as one nest step).
fn indent_of(line: &str) -> usize {
    let mut indent = 0;
    for c in line.chars() {
        match c {
            ' ' => indent += 1,
            '\t' => indent += NEST_STEP,
            _ => break,
        }
    }
    indent
}

/// Parse a list marker at the start of an indent-stripped line.
///
/// Returns the marker and the text after it. The marker must be followed by
/// whitespace, so `---` and `*emphasis*` do not read as items.
fn parse_marker(text: &str) -> Option<(Marker, &str)> {
    if let Some(rest) = text.strip_prefix(['-', '*', '+']) {
        let content = rest.strip_prefix(' ')?;
        return Some((Marker::Unordered, content.trim_start()));
    }

    let digits = text.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = text[digits..].strip_prefix('.')?;
    let content = rest.strip_prefix(' ')?;
    let number = text[..digits].parse().ok()?;
    Some((Marker::Ordered(number), content.trim_start()))
}

/// Strip a leading `[ ]` / `[x]` / `[X]` checkbox from item content.
fn strip_checkbox(content: &str) -> (Option<bool>, &str) {
    for (prefix, checked) in [("[ ]", false), ("[x]", true), ("[X]", true)] {
        if let Some(rest) = content.strip_prefix(prefix) {
            if rest.is_empty() || rest.starts_with(' ') {
                return (Some(checked), rest.trim_start());
            }
        }
    }
    (None, content)
}

/// Does this line carry a list marker (at any indent)? Used to terminate
/// paragraph accumulation.
pub(super) fn is_list_line(line: &str) -> bool {
    parse_marker(line.trim_start()).is_some()
}

/// Match a list starting at the given line.
pub(super) fn try_list(lines: &[&str], i: usize) -> Option<Match> {
    let (items, family, next) = parse_items(lines, i, 0)?;

    let start = items_start_number(family);
    let kind = match family {
        Marker::Ordered(_) => BlockKind::OrderedList,
        Marker::Unordered => BlockKind::UnorderedList,
    };

    let content = lines[i..next].join("\n");
    let seed = BlockSeed::new(kind, content, BlockData::List { items, start });
    Some((Some(seed), next))
}

const fn items_start_number(family: Marker) -> u64 {
    match family {
        Marker::Ordered(n) => n,
        Marker::Unordered => 1,
    }
}

/// Parse contiguous items at one nesting level.
///
/// Returns the items, the family marker of the first item (which carries the
/// start number for ordered lists), and the next line cursor.
fn parse_items(lines: &[&str], start_idx: usize, level: usize) -> Option<(Vec<ListItem>, Marker, usize)> {
    let item_indent = level * NEST_STEP;

    // The first line must be an item at exactly this level
    let first = lines[start_idx];
    if indent_of(first) != item_indent {
        return None;
    }
    let (family, _) = parse_marker(first.trim_start())?;

    let mut items: Vec<ListItem> = Vec::new();
    let mut j = start_idx;

    while j < lines.len() {
        let line = lines[j];

        if line.trim().is_empty() {
            // Single blank-line tolerance: continue only if the next line is
            // another item of this list
            match lines.get(j + 1) {
                Some(next) if indent_of(next) == item_indent => {
                    match parse_marker(next.trim_start()) {
                        Some((marker, _)) if marker.same_family(family) => {
                            j += 1;
                            continue;
                        }
                        _ => break,
                    }
                }
                _ => break,
            }
        }

        let indent = indent_of(line);

        if indent == item_indent {
            let Some((marker, content)) = parse_marker(line.trim_start()) else {
                break;
            };
            if !marker.same_family(family) {
                break;
            }
            let (checked, content) = strip_checkbox(content);
            items.push(ListItem {
                content: content.to_owned(),
                checked,
                children: Vec::new(),
            });
            j += 1;
        } else if indent == item_indent + NEST_STEP && is_list_line(line) {
            // Exactly one level deeper with a marker: nested sub-list
            let Some(last) = items.last_mut() else {
                break;
            };
            let (children, _, next) = parse_items(lines, j, level + 1)?;
            last.children = children;
            j = next;
        } else if indent > item_indent {
            // Indented non-list content: continuation of the previous item
            let Some(last) = items.last_mut() else {
                break;
            };
            last.content.push('\n');
            last.content.push_str(line.trim_start());
            j += 1;
        } else {
            break;
        }
    }

    if items.is_empty() {
        return None;
    }
    Some((items, family, j))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_marker() {
        assert_eq!(parse_marker("- item"), Some((Marker::Unordered, "item")));
        assert_eq!(parse_marker("* item"), Some((Marker::Unordered, "item")));
        assert_eq!(parse_marker("3. item"), Some((Marker::Ordered(3), "item")));
        assert_eq!(parse_marker("-no space"), None);
        assert_eq!(parse_marker("1.no space"), None);
        assert_eq!(parse_marker("plain"), None);
    }

    #[test]
    fn test_simple_unordered() {
        let lines = vec!["- a", "- b", "- c", ""];
        let (seed, next) = try_list(&lines, 0).unwrap();
        let seed = seed.unwrap();
        assert_eq!(next, 3);
        assert_eq!(seed.kind, BlockKind::UnorderedList);
        let BlockData::List { items, start } = seed.data else {
            panic!("expected list data");
        };
        assert_eq!(start, 1);
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].content, "b");
    }

    #[test]
    fn test_ordered_start_number() {
        let lines = vec!["4. four", "5. five", ""];
        let (seed, _) = try_list(&lines, 0).unwrap();
        let BlockData::List { start, .. } = seed.unwrap().data else {
            panic!("expected list data");
        };
        assert_eq!(start, 4);
    }

    #[test]
    fn test_nested_sublist() {
        let lines = vec!["- a", "  - a1", "  - a2", "- b", ""];
        let (seed, next) = try_list(&lines, 0).unwrap();
        assert_eq!(next, 4);
        let BlockData::List { items, .. } = seed.unwrap().data else {
            panic!("expected list data");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].children.len(), 2);
        assert_eq!(items[0].children[0].content, "a1");
        assert!(items[1].children.is_empty());
    }

    #[test]
    fn test_continuation_line_merges() {
        let lines = vec!["- a", "  wrapped tail", "- b", ""];
        let (seed, _) = try_list(&lines, 0).unwrap();
        let BlockData::List { items, .. } = seed.unwrap().data else {
            panic!("expected list data");
        };
        assert_eq!(items[0].content, "a\nwrapped tail");
        assert_eq!(items[1].content, "b");
    }

    #[test]
    fn test_blank_line_tolerance() {
        let lines = vec!["- a", "", "- b", ""];
        let (seed, next) = try_list(&lines, 0).unwrap();
        assert_eq!(next, 3);
        let BlockData::List { items, .. } = seed.unwrap().data else {
            panic!("expected list data");
        };
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_blank_then_non_list_terminates() {
        let lines = vec!["- a", "", "plain paragraph", ""];
        let (seed, next) = try_list(&lines, 0).unwrap();
        assert_eq!(next, 1);
        let BlockData::List { items, .. } = seed.unwrap().data else {
            panic!("expected list data");
        };
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_family_change_terminates() {
        let lines = vec!["- a", "1. b", ""];
        let (_, next) = try_list(&lines, 0).unwrap();
        assert_eq!(next, 1);
    }

    #[test]
    fn test_checkboxes() {
        let lines = vec!["- [ ] todo", "- [x] done", "- [X] also done", "- plain", ""];
        let (seed, _) = try_list(&lines, 0).unwrap();
        let BlockData::List { items, .. } = seed.unwrap().data else {
            panic!("expected list data");
        };
        assert_eq!(items[0].checked, Some(false));
        assert_eq!(items[0].content, "todo");
        assert_eq!(items[1].checked, Some(true));
        assert_eq!(items[2].checked, Some(true));
        assert_eq!(items[3].checked, None);
    }

    #[test]
    fn test_not_a_list() {
        let lines = vec!["plain text", ""];
        assert!(try_list(&lines, 0).is_none());
    }
}
