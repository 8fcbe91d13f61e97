//! Stream controller: turns channel snapshots into render tree updates.

use crossbeam_channel::{Receiver, TryRecvError};

use crate::parser::MarkdownParser;
use crate::render::RenderTree;

use super::typewriter::Typewriter;

/// One event from a text producer.
///
/// Producers send the full accumulated text each time, not deltas; the
/// parser is stateless and the tree diffs by block identity, so snapshots
/// keep the protocol trivially resumable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// The complete text so far.
    Snapshot(String),
    /// The producer finished; the tail block finalizes.
    Done,
    /// The producer failed. Rendered content stays on screen.
    Error(String),
}

/// Drives a parse → reconcile → layout cycle from a stream of snapshots.
///
/// `pump` is called once per frame. It drains whatever events have queued
/// since the last frame and coalesces them: only the newest snapshot is
/// parsed, so a burst of small deltas costs one parse, not many.
pub struct StreamController {
    parser: MarkdownParser,
    tree: RenderTree,
    events: Option<Receiver<StreamEvent>>,
    text: String,
    typewriter: Option<Typewriter>,
    done: bool,
    width: u16,
}

impl StreamController {
    /// A controller over the given parser and tree.
    #[must_use]
    pub fn new(parser: MarkdownParser, tree: RenderTree) -> Self {
        Self {
            parser,
            tree,
            events: None,
            text: String::new(),
            typewriter: None,
            done: false,
            width: 0,
        }
    }

    /// Enable typewriter pacing for revealed text.
    #[must_use]
    pub fn with_typewriter(mut self, typewriter: Typewriter) -> Self {
        self.typewriter = Some(typewriter);
        self
    }

    /// Attach a new event stream.
    ///
    /// Any previously attached stream is dropped mid-flight and the tree is
    /// cleared, so a host can cancel one response and start the next with a
    /// single call.
    pub fn attach(&mut self, events: Receiver<StreamEvent>) {
        self.events = Some(events);
        self.text.clear();
        self.done = false;
        if let Some(tw) = &mut self.typewriter {
            tw.set_target("");
        }
        self.tree.clear();
    }

    /// Drain pending events, re-parse if needed, and lay out at `width`.
    /// Returns true when the tree changed and a repaint is due.
    pub fn pump(&mut self, width: u16) -> bool {
        let mut latest = None;
        let mut finished = false;

        if let Some(events) = &self.events {
            loop {
                match events.try_recv() {
                    Ok(StreamEvent::Snapshot(text)) => latest = Some(text),
                    Ok(StreamEvent::Done) => finished = true,
                    Ok(StreamEvent::Error(message)) => {
                        log::warn!("stream failed: {message}");
                        finished = true;
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        finished = true;
                        break;
                    }
                }
            }
        }

        // Idle frame: no snapshot, no done transition, nothing left for the
        // typewriter to reveal, and the width is unchanged. Skip the parse
        // so a finished document costs nothing per tick.
        let revealing = self
            .typewriter
            .as_ref()
            .is_some_and(|tw| !tw.drained());
        if latest.is_none() && !finished && !revealing && width == self.width {
            return false;
        }
        self.width = width;

        if let Some(text) = latest {
            self.text = text;
        }
        if finished {
            self.done = true;
            self.events = None;
        }

        let mut revealed_more = false;
        let visible = match &mut self.typewriter {
            Some(tw) => {
                tw.set_target(&self.text);
                if self.done {
                    revealed_more = !tw.drained();
                    tw.flush();
                } else {
                    revealed_more = tw.tick();
                }
                tw.visible().to_string()
            }
            None => self.text.clone(),
        };

        let mut blocks = self.parser.parse(&visible);
        if self.done {
            if let Some(last) = blocks.last_mut() {
                last.is_partial = false;
            }
        }

        let stats = self.tree.reconcile(blocks);
        let before = self.tree.total_height();
        let after = self.tree.layout(width);

        revealed_more || !stats.is_noop() || before != after
    }

    /// True after `Done`, an error, or producer disconnect.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// The full text received so far, regardless of typewriter pacing.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The render tree.
    #[must_use]
    pub const fn tree(&self) -> &RenderTree {
        &self.tree
    }

    /// The render tree, mutably.
    pub fn tree_mut(&mut self) -> &mut RenderTree {
        &mut self.tree
    }
}

impl std::fmt::Debug for StreamController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamController")
            .field("attached", &self.events.is_some())
            .field("done", &self.done)
            .field("text_len", &self.text.len())
            .finish_non_exhaustive()
    }
}
