//! Rendering: inline styling, per-block render units, and the reconciling
//! render tree.

pub mod inline;
pub mod registry;
pub mod tree;
pub mod unit;
pub mod units;

pub use registry::{UnitCtor, UnitRegistry};
pub use tree::{HitTarget, ReconcileStats, RenderTree};
pub use unit::{HitContent, RenderUnit, StyledLine, StyledSpan, WrapCache};
