//! Character-paced reveal of streamed text.

/// Re-drips an already-received snapshot a few characters per tick, for the
/// classic typewriter feel even when the producer sends large chunks.
///
/// The target text may grow at any rate; the visible prefix only ever
/// advances, by `chars_per_tick` characters per [`tick`](Self::tick), and
/// always lands on a character boundary.
#[derive(Debug, Clone)]
pub struct Typewriter {
    target: String,
    /// Byte length of the visible prefix.
    visible: usize,
    chars_per_tick: usize,
}

impl Typewriter {
    /// A typewriter revealing `chars_per_tick` characters per tick.
    #[must_use]
    pub const fn new(chars_per_tick: usize) -> Self {
        Self {
            target: String::new(),
            visible: 0,
            chars_per_tick,
        }
    }

    /// Replace the target text. The visible prefix is clamped to the new
    /// length but never rewinds otherwise, so append-only growth reveals
    /// smoothly across snapshots.
    pub fn set_target(&mut self, text: &str) {
        self.visible = floor_char_boundary(text, self.visible);
        self.target.clear();
        self.target.push_str(text);
    }

    /// Advance the visible prefix by one tick's worth of characters.
    /// Returns true if anything new was revealed.
    pub fn tick(&mut self) -> bool {
        if self.visible >= self.target.len() {
            return false;
        }
        let mut advanced = self.visible;
        for _ in 0..self.chars_per_tick {
            match self.target[advanced..].chars().next() {
                Some(c) => advanced += c.len_utf8(),
                None => break,
            }
        }
        self.visible = advanced;
        true
    }

    /// Reveal everything immediately.
    pub fn flush(&mut self) {
        self.visible = self.target.len();
    }

    /// The currently revealed prefix.
    #[must_use]
    pub fn visible(&self) -> &str {
        &self.target[..self.visible]
    }

    /// True when the whole target is revealed.
    #[must_use]
    pub const fn drained(&self) -> bool {
        self.visible >= self.target.len()
    }
}

/// Largest char-boundary offset `<= at` in `text`.
fn floor_char_boundary(text: &str, at: usize) -> usize {
    let mut i = at.min(text.len());
    while i > 0 && !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveals_in_steps() {
        let mut tw = Typewriter::new(3);
        tw.set_target("abcdefg");
        assert!(tw.tick());
        assert_eq!(tw.visible(), "abc");
        assert!(tw.tick());
        assert_eq!(tw.visible(), "abcdef");
        assert!(tw.tick());
        assert_eq!(tw.visible(), "abcdefg");
        assert!(tw.drained());
        assert!(!tw.tick());
    }

    #[test]
    fn test_growth_does_not_rewind() {
        let mut tw = Typewriter::new(2);
        tw.set_target("abcd");
        tw.tick();
        tw.tick();
        assert_eq!(tw.visible(), "abcd");

        tw.set_target("abcdef");
        assert_eq!(tw.visible(), "abcd");
        tw.tick();
        assert_eq!(tw.visible(), "abcdef");
    }

    #[test]
    fn test_flush() {
        let mut tw = Typewriter::new(1);
        tw.set_target("hello world");
        tw.flush();
        assert_eq!(tw.visible(), "hello world");
    }

    #[test]
    fn test_multibyte_boundaries() {
        let mut tw = Typewriter::new(2);
        tw.set_target("héllo");
        tw.tick();
        assert_eq!(tw.visible(), "hé");
    }

    #[test]
    fn test_shrinking_target_clamps() {
        let mut tw = Typewriter::new(10);
        tw.set_target("long text here");
        tw.flush();
        tw.set_target("short");
        assert_eq!(tw.visible(), "short");
    }
}
