//! ANSI serialization: turn a painted surface region into escape sequences.
//!
//! The serializer tracks the last emitted foreground, background, and
//! modifier state so redundant SGR sequences are skipped. Hosts that manage
//! their own terminal session can ignore this module and consume the
//! [`Surface`] cell grid directly.

use super::{Cell, Modifiers, Rgb, Surface};
use crate::layout::Rect;
use std::io::Write;

/// Serializer state: the colors and modifiers last written to the output.
#[derive(Debug, Clone, Default)]
pub struct AnsiState {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    modifiers: Option<Modifiers>,
}

impl AnsiState {
    /// Create a new state with unknown terminal attributes.
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            modifiers: None,
        }
    }

    /// Forget all tracked attributes (e.g., after the host reset the screen).
    pub const fn reset(&mut self) {
        self.fg = None;
        self.bg = None;
        self.modifiers = None;
    }
}

/// Serialize a rectangular region of a surface to ANSI.
///
/// Rows are separated by `\r\n`; no cursor addressing is emitted, so the
/// output can be written at whatever position the host's cursor is at. The
/// region is clamped to the surface bounds.
pub fn render_region(surface: &Surface, region: Rect, output: &mut Vec<u8>, state: &mut AnsiState) {
    let x_end = region.right().min(surface.width());
    let y_end = region.bottom().min(surface.height());

    for y in region.y..y_end {
        if y > region.y {
            output.extend_from_slice(b"\r\n");
        }

        for x in region.x..x_end {
            let Some(cell) = surface.get(x, y) else {
                continue;
            };

            // Continuation columns are covered by the wide cell before them
            if cell.is_wide_continuation() {
                continue;
            }

            emit_attributes(output, cell, state);
            emit_grapheme(output, cell, surface);
        }
    }

    // Leave the terminal in a clean state
    output.extend_from_slice(b"\x1b[0m");
    state.reset();
}

/// Serialize the full surface to ANSI.
pub fn render_full(surface: &Surface, output: &mut Vec<u8>, state: &mut AnsiState) {
    render_region(
        surface,
        Rect::from_size(surface.width(), surface.height()),
        output,
        state,
    );
}

/// Emit color/modifier changes for a cell if they differ from the tracked
/// state.
fn emit_attributes(output: &mut Vec<u8>, cell: &Cell, state: &mut AnsiState) {
    let next_mods = cell.modifiers();
    let current_mods = state.modifiers.unwrap_or(Modifiers::empty());

    // Dropping any modifier requires a full reset, which also clears colors
    if !current_mods.difference(next_mods).is_empty() {
        output.extend_from_slice(b"\x1b[0m");
        state.fg = None;
        state.bg = None;
        state.modifiers = None;
    }

    if state.fg != Some(cell.fg()) {
        let c = cell.fg();
        let _ = write!(output, "\x1b[38;2;{};{};{}m", c.r, c.g, c.b);
        state.fg = Some(c);
    }

    if state.bg != Some(cell.bg()) {
        let c = cell.bg();
        let _ = write!(output, "\x1b[48;2;{};{};{}m", c.r, c.g, c.b);
        state.bg = Some(c);
    }

    if state.modifiers != Some(next_mods) {
        let previous = state.modifiers.unwrap_or(Modifiers::empty());
        emit_modifier_set(output, next_mods.difference(previous));
        state.modifiers = Some(next_mods);
    }
}

/// Emit SGR sequences for a set of modifiers.
fn emit_modifier_set(output: &mut Vec<u8>, modifiers: Modifiers) {
    if modifiers.contains(Modifiers::BOLD) {
        output.extend_from_slice(b"\x1b[1m");
    }
    if modifiers.contains(Modifiers::DIM) {
        output.extend_from_slice(b"\x1b[2m");
    }
    if modifiers.contains(Modifiers::ITALIC) {
        output.extend_from_slice(b"\x1b[3m");
    }
    if modifiers.contains(Modifiers::UNDERLINE) {
        output.extend_from_slice(b"\x1b[4m");
    }
    if modifiers.contains(Modifiers::REVERSED) {
        output.extend_from_slice(b"\x1b[7m");
    }
    if modifiers.contains(Modifiers::STRIKETHROUGH) {
        output.extend_from_slice(b"\x1b[9m");
    }
}

/// Emit a cell's grapheme, resolving overflow storage.
#[inline]
fn emit_grapheme(output: &mut Vec<u8>, cell: &Cell, surface: &Surface) {
    if let Some(idx) = cell.overflow_index() {
        if let Some(grapheme) = surface.get_overflow(idx) {
            output.extend_from_slice(grapheme.as_bytes());
        } else {
            output.extend_from_slice("\u{fffd}".as_bytes());
        }
    } else if let Some(grapheme) = cell.grapheme() {
        output.extend_from_slice(grapheme.as_bytes());
    } else {
        output.push(b' ');
    }
}
