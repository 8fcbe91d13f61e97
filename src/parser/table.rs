//! Table matcher: header row + alignment-delimiter row + data rows.
//!
//! The two-line lookahead is the table gate: a pipe-bearing line whose next
//! line is not a valid delimiter row falls through to paragraph treatment,
//! and a table is only emitted once it has at least one data row, so a
//! half-streamed structure never flickers into a one-row table.

use super::{BlockSeed, Match};
use crate::block::{BlockData, BlockKind, ColumnAlignment};

/// Does the line look like a pipe-delimited row?
fn is_row(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.contains('|')
}

/// Is the line a valid alignment-delimiter row (`[\s|:-]+` with at least one
/// dash)?
fn is_delimiter_row(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| c == '|' || c == ':' || c == '-' || c.is_whitespace())
}

/// Split a pipe row into trimmed cells, ignoring the outer pipes.
fn split_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed.split('|').map(|cell| cell.trim().to_owned()).collect()
}

/// Derive per-column alignment from the delimiter row's colons.
fn parse_alignments(line: &str) -> Vec<ColumnAlignment> {
    split_row(line)
        .iter()
        .map(|cell| {
            let leading = cell.starts_with(':');
            let trailing = cell.ends_with(':');
            match (leading, trailing) {
                (true, true) => ColumnAlignment::Center,
                (false, true) => ColumnAlignment::Right,
                _ => ColumnAlignment::Left,
            }
        })
        .collect()
}

/// Does a complete table start at this line?
pub(super) fn is_table_start(lines: &[&str], i: usize) -> bool {
    try_table(lines, i).is_some()
}

/// Match a table at the given line.
pub(super) fn try_table(lines: &[&str], i: usize) -> Option<Match> {
    if !is_row(lines[i]) {
        return None;
    }
    let delimiter = lines.get(i + 1)?;
    if !is_delimiter_row(delimiter) || is_delimiter_row(lines[i]) {
        return None;
    }

    let header = split_row(lines[i]);
    let alignments = parse_alignments(delimiter);

    let mut rows = vec![header];
    let mut j = i + 2;
    while j < lines.len() && is_row(lines[j]) && !is_delimiter_row(lines[j]) {
        rows.push(split_row(lines[j]));
        j += 1;
    }

    // A table needs at least one data row below the structural pair;
    // until then the text stays a paragraph
    if rows.len() < 2 {
        return None;
    }

    let content = lines[i..j].join("\n");
    let seed = BlockSeed::new(
        BlockKind::Table,
        content,
        BlockData::Table { rows, alignments },
    );
    Some((Some(seed), j))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_delimiter_row_detection() {
        assert!(is_delimiter_row("|---|---|"));
        assert!(is_delimiter_row(":--- | :--: | ---:"));
        assert!(!is_delimiter_row("| a | b |"));
        assert!(!is_delimiter_row("|:::|"));
        assert!(!is_delimiter_row(""));
    }

    #[test]
    fn test_split_row() {
        assert_eq!(split_row("| a | b |"), vec!["a", "b"]);
        assert_eq!(split_row("a | b"), vec!["a", "b"]);
        assert_eq!(split_row("| a | | c |"), vec!["a", "", "c"]);
    }

    #[test]
    fn test_no_data_row_no_table() {
        let lines = vec!["| a | b |", "|---|---|"];
        assert!(try_table(&lines, 0).is_none());
    }

    #[test]
    fn test_table_with_data() {
        let lines = vec!["| a | b |", "|---|---|", "| 1 | 2 |", "| 3 | 4 |", ""];
        let (seed, next) = try_table(&lines, 0).unwrap();
        let seed = seed.unwrap();
        assert_eq!(next, 4);
        let BlockData::Table { rows, alignments } = seed.data else {
            panic!("expected table data");
        };
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["a", "b"]);
        assert_eq!(rows[2], vec!["3", "4"]);
        assert_eq!(alignments.len(), 2);
    }

    #[test]
    fn test_alignments() {
        assert_eq!(
            parse_alignments("|:--|:-:|--:|---|"),
            vec![
                ColumnAlignment::Left,
                ColumnAlignment::Center,
                ColumnAlignment::Right,
                ColumnAlignment::Left,
            ]
        );
    }

    #[test]
    fn test_half_streamed_last_row_still_counts() {
        let lines = vec!["| a | b |", "|---|---|", "| 1 | 2 |", "| 3 |"];
        let (seed, next) = try_table(&lines, 0).unwrap();
        assert_eq!(next, 4);
        let BlockData::Table { rows, .. } = seed.unwrap().data else {
            panic!("expected table data");
        };
        assert_eq!(rows.len(), 3);
    }
}
