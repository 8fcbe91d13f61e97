//! The cell-grid canvas that render units paint into.
//!
//! A [`Surface`] is a row-major grid of [`Cell`]s. Block render units paint
//! styled text runs into a surface; the host either hands the surface to its
//! own compositor or serializes it to ANSI with [`ansi::render_region`].

pub mod ansi;
mod cell;
#[allow(clippy::module_inception)]
mod surface;

pub use cell::{Cell, CellFlags, Modifiers, Rgb, Style};
pub use surface::Surface;
