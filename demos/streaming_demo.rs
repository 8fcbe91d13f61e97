//! Streaming demo: replays a canned AI response token by token and prints
//! each frame's rendered output.
//!
//! Run with: `cargo run --example streaming_demo`

use std::thread;
use std::time::Duration;

use crossbeam_channel::unbounded;
use tidemark::surface::ansi::{render_full, AnsiState};
use tidemark::{
    FrameTicker, MarkdownParser, Point, RenderTree, StreamController, StreamEvent, Surface,
    Typewriter,
};

const RESPONSE: &str = "\
# Sorting in Rust

The standard library gives you two options:

- `sort()` for a **stable** sort
- `sort_unstable()` when order of equal elements does not matter

```rust
let mut v = vec![3, 1, 2];
v.sort();
```

| Method | Stable | Allocates |
|--------|:------:|----------:|
| sort | yes | yes |
| sort_unstable | no | no |

> Prefer `sort_unstable` in hot paths; it is usually faster.
";

const WIDTH: u16 = 60;

fn main() {
    let (tx, rx) = unbounded();

    // Producer: drip the response in uneven chunks, like a token stream.
    let producer = thread::spawn(move || {
        let mut sent = 0;
        while sent < RESPONSE.len() {
            let mut next = (sent + 7).min(RESPONSE.len());
            while !RESPONSE.is_char_boundary(next) {
                next += 1;
            }
            sent = next;
            if tx
                .send(StreamEvent::Snapshot(RESPONSE[..sent].to_string()))
                .is_err()
            {
                return;
            }
            thread::sleep(Duration::from_millis(12));
        }
        let _ = tx.send(StreamEvent::Done);
    });

    let mut controller = StreamController::new(MarkdownParser::new(), RenderTree::new())
        .with_typewriter(Typewriter::new(6));
    controller.attach(rx);

    let ticker = FrameTicker::spawn(Duration::from_millis(16));
    while ticker.receiver().recv().is_ok() {
        let changed = controller.pump(WIDTH);
        if changed {
            let height = controller.tree().total_height().max(1);
            let mut surface = Surface::new(WIDTH, height);
            controller.tree().paint(&mut surface, Point::ORIGIN);

            // Clear and repaint the whole frame as one ANSI write.
            let mut frame = Vec::with_capacity(4096);
            frame.extend_from_slice(b"\x1b[2J\x1b[H");
            let mut state = AnsiState::new();
            render_full(&surface, &mut frame, &mut state);
            std::io::Write::write_all(&mut std::io::stdout(), &frame).expect("stdout");
            println!();
        } else if controller.is_done() {
            break;
        }
    }
    ticker.join();

    producer.join().expect("producer thread");
    println!("\n--- plain text extraction ---\n{}", controller.tree().plain_text());
}
