//! Cell: the atomic unit of the paint surface.
//!
//! # Memory Layout
//!
//! The `Cell` struct is 16 bytes, four cells per cache line:
//! - Inline grapheme storage covers 99%+ of real-world characters
//! - Complex graphemes (emoji ZWJ sequences) spill to the surface's
//!   overflow table
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  Cell Layout (16 bytes)                                              │
//! ├────────────┬──────────────┬──────────┬──────────┬─────┬───────┬──────┤
//! │  grapheme  │  len + width │    fg    │    bg    │ mod │ flags │ pad  │
//! │  [u8; 4]   │  u8 + u8     │ [u8; 3]  │ [u8; 3]  │ u8  │  u8   │ [2]  │
//! └────────────┴──────────────┴──────────┴──────────┴─────┴───────┴──────┘
//! ```

use bitflags::bitflags;

/// True-color RGB representation.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Default foreground (white)
    pub const DEFAULT_FG: Self = Self::WHITE;
    /// Default background (black)
    pub const DEFAULT_BG: Self = Self::BLACK;

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<u32> for Rgb {
    /// Convert from a 24-bit hex color (e.g., 0xFF5500)
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use tidemark::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::ITALIC;
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0001_0000;
        /// Strikethrough text
        const STRIKETHROUGH = 0b0010_0000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

bitflags! {
    /// Cell-level flags for special states.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// Grapheme overflows inline storage; check the surface overflow table
        const OVERFLOW = 0b0000_0001;
        /// This cell is a continuation of a wide character
        const WIDE_CONTINUATION = 0b0000_0010;
    }
}

impl std::fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A complete text style: foreground, background, and modifiers.
///
/// Render units receive styles from the [`Theme`](crate::Theme) and apply
/// them to whole text runs, so the three attributes travel together.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    /// Foreground color.
    pub fg: Rgb,
    /// Background color.
    pub bg: Rgb,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Style {
    /// Default style: white on black, no modifiers.
    pub const DEFAULT: Self = Self {
        fg: Rgb::DEFAULT_FG,
        bg: Rgb::DEFAULT_BG,
        modifiers: Modifiers::empty(),
    };

    /// Create a style with the given foreground over the default background.
    #[inline]
    pub const fn fg(fg: Rgb) -> Self {
        Self {
            fg,
            bg: Rgb::DEFAULT_BG,
            modifiers: Modifiers::empty(),
        }
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    /// Set the modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Union this style's modifiers with additional ones.
    #[inline]
    #[must_use]
    pub const fn add_modifiers(mut self, extra: Modifiers) -> Self {
        self.modifiers = self.modifiers.union(extra);
        self
    }
}

impl std::fmt::Debug for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Style({:?} on {:?} {:?})", self.fg, self.bg, self.modifiers)
    }
}

/// A single surface cell.
///
/// Each cell contains a grapheme, a foreground/background color pair, and
/// style modifiers. Most graphemes (ASCII, Latin, CJK) fit within 4 bytes of
/// inline storage; longer clusters set the `OVERFLOW` flag and store an index
/// into the surface's overflow table instead.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct Cell {
    /// Inline grapheme storage (UTF-8 bytes).
    /// For overflowed graphemes, this contains a u32 index.
    grapheme: [u8; 4],
    /// Actual byte length of the grapheme (0-4, or 0 if overflowed).
    grapheme_len: u8,
    /// Display width of the grapheme (0=continuation, 1=normal, 2=wide CJK).
    display_width: u8,
    /// Foreground color.
    fg: Rgb,
    /// Background color.
    bg: Rgb,
    /// Text modifiers (bold, italic, etc.).
    modifiers: Modifiers,
    /// Cell flags (overflow, continuation).
    flags: CellFlags,
    /// Padding to reach 16 bytes (power of 2, cache-friendly).
    _padding: [u8; 2],
}

// Compile-time assertion: Cell must be exactly 16 bytes
const _: () = assert!(
    std::mem::size_of::<Cell>() == 16,
    "Cell must be exactly 16 bytes for cache efficiency"
);

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell (space character with default colors).
    pub const EMPTY: Self = Self {
        grapheme: [b' ', 0, 0, 0],
        grapheme_len: 1,
        display_width: 1,
        fg: Rgb::DEFAULT_FG,
        bg: Rgb::DEFAULT_BG,
        modifiers: Modifiers::empty(),
        flags: CellFlags::empty(),
        _padding: [0, 0],
    };

    /// An empty cell carrying the given style's colors.
    #[inline]
    pub const fn blank(style: Style) -> Self {
        Self {
            grapheme: [b' ', 0, 0, 0],
            grapheme_len: 1,
            display_width: 1,
            fg: style.fg,
            bg: style.bg,
            modifiers: Modifiers::empty(),
            flags: CellFlags::empty(),
            _padding: [0, 0],
        }
    }

    /// Create a styled cell from a grapheme string.
    ///
    /// Returns `None` if the grapheme's UTF-8 encoding exceeds 4 bytes; the
    /// caller should then allocate a slot in the surface overflow table and
    /// use [`Cell::overflow`].
    #[inline]
    #[allow(clippy::missing_panics_doc)]
    pub fn styled(grapheme: &str, style: Style) -> Option<Self> {
        let bytes = grapheme.as_bytes();
        if bytes.len() > 4 {
            return None;
        }

        let mut storage = [0u8; 4];
        storage[..bytes.len()].copy_from_slice(bytes);
        let width = u8::try_from(unicode_width::UnicodeWidthStr::width(grapheme)).unwrap_or(1);

        Some(Self {
            grapheme: storage,
            grapheme_len: u8::try_from(bytes.len()).unwrap(),
            display_width: width,
            fg: style.fg,
            bg: style.bg,
            modifiers: style.modifiers,
            flags: CellFlags::empty(),
            _padding: [0, 0],
        })
    }

    /// Create an overflow cell with an index into the surface overflow table.
    ///
    /// The index is stored in the grapheme bytes as a little-endian u32.
    #[inline]
    pub const fn overflow(index: u32, display_width: u8, style: Style) -> Self {
        Self {
            grapheme: index.to_le_bytes(),
            grapheme_len: 0, // Indicates overflow
            display_width,
            fg: style.fg,
            bg: style.bg,
            modifiers: style.modifiers,
            flags: CellFlags::OVERFLOW,
            _padding: [0, 0],
        }
    }

    /// Create a wide-character continuation cell.
    ///
    /// This is placed after a wide CJK character that takes 2 columns.
    #[inline]
    pub const fn wide_continuation(bg: Rgb) -> Self {
        Self {
            grapheme: [0, 0, 0, 0],
            grapheme_len: 0,
            display_width: 0,
            fg: Rgb::DEFAULT_FG,
            bg,
            modifiers: Modifiers::empty(),
            flags: CellFlags::WIDE_CONTINUATION,
            _padding: [0, 0],
        }
    }

    /// Get the grapheme as a string slice.
    ///
    /// Returns `None` for overflow cells (look the grapheme up in the surface
    /// overflow table via [`Cell::overflow_index`]).
    #[inline]
    pub fn grapheme(&self) -> Option<&str> {
        if self.flags.contains(CellFlags::OVERFLOW) {
            return None;
        }
        // Only valid UTF-8 is ever stored in the grapheme bytes
        std::str::from_utf8(&self.grapheme[..self.grapheme_len as usize]).ok()
    }

    /// Get the overflow index if this is an overflow cell.
    #[inline]
    pub const fn overflow_index(&self) -> Option<u32> {
        if self.flags.contains(CellFlags::OVERFLOW) {
            Some(u32::from_le_bytes(self.grapheme))
        } else {
            None
        }
    }

    /// Check if this cell uses overflow storage.
    #[inline]
    pub const fn is_overflow(&self) -> bool {
        self.flags.contains(CellFlags::OVERFLOW)
    }

    /// Check if this is a wide-character continuation.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.flags.contains(CellFlags::WIDE_CONTINUATION)
    }

    /// Get the display width (0, 1, or 2).
    #[inline]
    pub const fn display_width(&self) -> u8 {
        self.display_width
    }

    /// Get the style of this cell.
    #[inline]
    pub const fn style(&self) -> Style {
        Style {
            fg: self.fg,
            bg: self.bg,
            modifiers: self.modifiers,
        }
    }

    /// Get the foreground color.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Get the background color.
    #[inline]
    pub const fn bg(&self) -> Rgb {
        self.bg
    }

    /// Get the modifiers.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Get the flags.
    #[inline]
    pub const fn flags(&self) -> CellFlags {
        self.flags
    }
}

impl PartialEq for Cell {
    /// Compare in order of most likely difference: grapheme first, then
    /// colors, then modifiers and flags.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.grapheme == other.grapheme
            && self.grapheme_len == other.grapheme_len
            && self.fg == other.fg
            && self.bg == other.bg
            && self.modifiers == other.modifiers
            && self.flags == other.flags
            && self.display_width == other.display_width
    }
}

impl Eq for Cell {}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let grapheme = self.grapheme().unwrap_or("<overflow>");
        f.debug_struct("Cell")
            .field("grapheme", &grapheme)
            .field("width", &self.display_width)
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("modifiers", &self.modifiers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size() {
        assert_eq!(std::mem::size_of::<Cell>(), 16);
    }

    #[test]
    fn test_rgb_from_hex() {
        let rgb: Rgb = 0xFF8000.into();
        assert_eq!(rgb.r, 255);
        assert_eq!(rgb.g, 128);
        assert_eq!(rgb.b, 0);
    }

    #[test]
    fn test_cell_styled_ascii() {
        let cell = Cell::styled("A", Style::DEFAULT).unwrap();
        assert_eq!(cell.grapheme(), Some("A"));
        assert_eq!(cell.display_width(), 1);
    }

    #[test]
    fn test_cell_styled_cjk() {
        let cell = Cell::styled("日", Style::DEFAULT).unwrap();
        assert_eq!(cell.grapheme(), Some("日"));
        assert_eq!(cell.display_width(), 2);
    }

    #[test]
    fn test_cell_styled_overflows() {
        // This emoji ZWJ sequence is > 4 bytes
        assert!(Cell::styled("👨‍👩‍👧", Style::DEFAULT).is_none());
    }

    #[test]
    fn test_cell_overflow_roundtrip() {
        let cell = Cell::overflow(42, 2, Style::DEFAULT);
        assert!(cell.is_overflow());
        assert_eq!(cell.overflow_index(), Some(42));
        assert_eq!(cell.grapheme(), None);
    }

    #[test]
    fn test_cell_equality() {
        let red = Style::fg(Rgb::new(255, 0, 0));
        let green = Style::fg(Rgb::new(0, 255, 0));
        let a = Cell::styled("A", red).unwrap();
        let b = Cell::styled("A", red).unwrap();
        let c = Cell::styled("A", green).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_style_builder() {
        let style = Style::fg(Rgb::new(255, 0, 0))
            .with_bg(Rgb::new(0, 0, 255))
            .with_modifiers(Modifiers::BOLD | Modifiers::ITALIC);

        assert_eq!(style.fg, Rgb::new(255, 0, 0));
        assert_eq!(style.bg, Rgb::new(0, 0, 255));
        assert!(style.modifiers.contains(Modifiers::BOLD));
        assert!(style.modifiers.contains(Modifiers::ITALIC));
    }

    #[test]
    fn test_style_add_modifiers() {
        let style = Style::DEFAULT
            .with_modifiers(Modifiers::BOLD)
            .add_modifiers(Modifiers::UNDERLINE);
        assert!(style.modifiers.contains(Modifiers::BOLD | Modifiers::UNDERLINE));
    }

    #[test]
    fn test_wide_continuation() {
        let cont = Cell::wide_continuation(Rgb::BLACK);
        assert!(cont.is_wide_continuation());
        assert_eq!(cont.display_width(), 0);
    }
}
