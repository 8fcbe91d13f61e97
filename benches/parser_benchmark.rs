//! Parser benchmark: full re-parse cost as a document grows.
//!
//! Target: < 1ms for a 100-block document

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tidemark::MarkdownParser;

/// Build a mixed document with roughly `blocks` top-level blocks.
fn build_document(blocks: usize) -> String {
    let mut text = String::new();
    for i in 0..blocks {
        match i % 5 {
            0 => text.push_str(&format!("## Section {i}\n\n")),
            1 => text.push_str(&format!(
                "Paragraph {i} with **bold**, `code`, and a [link](https://example.com/{i}).\n\n"
            )),
            2 => text.push_str("```rust\nfn main() {\n    println!(\"hi\");\n}\n```\n\n"),
            3 => text.push_str("- first item\n- second item\n  - nested item\n\n"),
            _ => text.push_str("| a | b |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |\n\n"),
        }
    }
    text
}

fn parse_growing_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_full");
    for blocks in [10, 100, 500] {
        let text = build_document(blocks);
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &text, |b, text| {
            let parser = MarkdownParser::new();
            b.iter(|| parser.parse(black_box(text)));
        });
    }
    group.finish();
}

fn parse_streaming_suffix(c: &mut Criterion) {
    // The streaming hot path: a stable prefix plus a growing tail paragraph.
    let prefix = build_document(50);
    c.bench_function("parse_50_blocks_partial_tail", |b| {
        let parser = MarkdownParser::new();
        let text = format!("{prefix}and the answer keeps stream");
        b.iter(|| parser.parse(black_box(&text)));
    });
}

fn parse_deep_blockquote(c: &mut Criterion) {
    let mut text = String::new();
    for depth in 0..8 {
        text.push_str(&"> ".repeat(depth + 1));
        text.push_str("nested quote line\n");
    }
    text.push('\n');
    c.bench_function("parse_nested_quotes", |b| {
        let parser = MarkdownParser::new();
        b.iter(|| parser.parse(black_box(&text)));
    });
}

criterion_group!(
    benches,
    parse_growing_document,
    parse_streaming_suffix,
    parse_deep_blockquote,
);
criterion_main!(benches);
