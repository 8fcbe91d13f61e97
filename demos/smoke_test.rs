//! Smoke test: parses a document exercising every block kind, renders it
//! once, and prints the result with block IDs.
//!
//! Run with: `cargo run --example smoke_test`

use tidemark::{MarkdownParser, Point, RenderTree, Surface};

const DOCUMENT: &str = "\
# Every Block Kind

A paragraph with **bold**, *italic*, `code`, ~~strike~~, and a
[link](https://example.com).

## Code

```python
def greet(name):
    return f\"hello {name}\"
```

    indented code line

## Lists

1. first
2. second
  - nested bullet
- [x] shipped
- [ ] pending

## Quote and Rule

> Quoted paragraph.
>
> > Nested quote.

---

## Table and Math

| left | center | right |
|:-----|:------:|------:|
| a | b | c |

$$
e^{i\\pi} + 1 = 0
$$

<div>raw html passes through</div>
";

const WIDTH: u16 = 50;

fn main() {
    let parser = MarkdownParser::new();
    let blocks = parser.parse(DOCUMENT);

    println!("parsed {} top-level blocks:", blocks.len());
    for block in &blocks {
        println!(
            "  {:30} partial={} children={}",
            block.id,
            block.is_partial,
            block.children.len()
        );
    }

    let mut tree = RenderTree::new();
    let stats = tree.reconcile(blocks);
    let height = tree.layout(WIDTH);
    println!(
        "\nreconcile: {} created, {} updated, {} removed; height {height}\n",
        stats.created, stats.updated, stats.removed
    );

    let mut surface = Surface::new(WIDTH, height.max(1));
    tree.paint(&mut surface, Point::ORIGIN);
    for y in 0..height {
        println!("{}", surface.row_text(y));
    }
}
