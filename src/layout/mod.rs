//! Geometry primitives for block layout and hit-testing.

mod rect;

pub use rect::{Point, Rect};
