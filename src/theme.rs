//! Theme: the visual parameters render units paint with.

use crate::surface::{Modifiers, Rgb, Style};

/// Visual parameters for block rendering.
///
/// The default theme targets a dark true-color terminal and is usable as-is;
/// hosts override individual fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Base paragraph text style.
    pub base: Style,
    /// Per-header-level styles (index 0 = `#`).
    pub headers: [Style; 6],
    /// Code block body style.
    pub code: Style,
    /// Style of the language tag line above a fenced code block.
    pub code_language: Style,
    /// Inline code span style.
    pub code_span: Style,
    /// Link style.
    pub link: Style,
    /// Blockquote gutter bar style.
    pub quote_bar: Style,
    /// Blockquote gutter glyph.
    pub quote_glyph: &'static str,
    /// Columns reserved for the blockquote gutter.
    pub quote_indent: u16,
    /// Unordered list bullet glyph.
    pub bullet: &'static str,
    /// Checked / unchecked checkbox glyphs.
    pub checkbox_checked: &'static str,
    /// Unchecked checkbox glyph.
    pub checkbox_unchecked: &'static str,
    /// Table border style.
    pub table_border: Style,
    /// Table header row style.
    pub table_header: Style,
    /// Thematic break style.
    pub rule: Style,
    /// Thematic break glyph, repeated across the width.
    pub rule_glyph: &'static str,
    /// Style for LaTeX placeholder text.
    pub latex: Style,
    /// Rows of spacing between consecutive blocks.
    pub block_spacing: u16,
    /// Streaming cursor glyph painted at the tail of the active block.
    pub cursor_glyph: &'static str,
    /// Streaming cursor style.
    pub cursor_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let base = Style::fg(Rgb::new(220, 220, 220));
        let accent = Rgb::new(130, 170, 255);
        let code_bg = Rgb::new(30, 30, 38);

        let header = |fg: Rgb| Style::fg(fg).with_modifiers(Modifiers::BOLD);

        Self {
            base,
            headers: [
                header(Rgb::new(255, 255, 255)).add_modifiers(Modifiers::UNDERLINE),
                header(Rgb::new(255, 255, 255)),
                header(Rgb::new(230, 230, 230)),
                header(Rgb::new(210, 210, 210)),
                header(Rgb::new(190, 190, 190)),
                header(Rgb::new(170, 170, 170)),
            ],
            code: Style::fg(Rgb::new(212, 212, 190)).with_bg(code_bg),
            code_language: Style::fg(Rgb::new(140, 140, 150))
                .with_bg(code_bg)
                .with_modifiers(Modifiers::ITALIC),
            code_span: Style::fg(Rgb::new(255, 200, 120)),
            link: Style::fg(accent).with_modifiers(Modifiers::UNDERLINE),
            quote_bar: Style::fg(Rgb::new(110, 110, 120)),
            quote_glyph: "│",
            quote_indent: 2,
            bullet: "•",
            checkbox_checked: "[x]",
            checkbox_unchecked: "[ ]",
            table_border: Style::fg(Rgb::new(110, 110, 120)),
            table_header: base.add_modifiers(Modifiers::BOLD),
            rule: Style::fg(Rgb::new(110, 110, 120)),
            rule_glyph: "─",
            latex: base.add_modifiers(Modifiers::DIM | Modifiers::ITALIC),
            block_spacing: 1,
            cursor_glyph: "▌",
            cursor_style: Style::fg(accent),
        }
    }
}

impl Theme {
    /// Style for a header of the given 1-based level.
    pub fn header(&self, level: u8) -> Style {
        let idx = usize::from(level.clamp(1, 6)) - 1;
        self.headers[idx]
    }
}
