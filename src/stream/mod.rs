//! Streaming: channel-fed snapshot ingestion, pacing, and frame timing.

mod controller;
mod ticker;
mod typewriter;

pub use controller::{StreamController, StreamEvent};
pub use ticker::{FrameTick, FrameTicker};
pub use typewriter::Typewriter;
