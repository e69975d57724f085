// crates/nt-cli/src/tui/layout.rs - Responsive sizing and soft wrapping

/// Size of the browser used before the first resize event arrives
pub const DEFAULT_WIDTH: u16 = 70;
pub const DEFAULT_HEIGHT: u16 = 22;

const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Terminal dimensions plus the derived sizes every mode renders with
///
/// All derived sizes are clamped to a small positive floor so a tiny (or
/// zero-sized) terminal never produces an empty or negative layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Width of the note list (border and padding taken off)
    pub fn list_width(&self) -> u16 {
        self.width.saturating_sub(6).max(10)
    }

    /// Rows of the note list visible at once
    pub fn list_rows(&self) -> u16 {
        self.height.saturating_sub(8).max(3)
    }

    /// Width of the wrapped body in the detail view
    pub fn content_width(&self) -> u16 {
        self.width.saturating_sub(8).max(10)
    }

    /// Width of the title input in add mode
    pub fn input_width(&self) -> u16 {
        self.list_width().saturating_sub(6).max(4)
    }
}

/// Make long unbroken runs breakable by the wrapper
///
/// A zero-width space is inserted after every `max_run` consecutive
/// non-whitespace characters. The visible text is unchanged; the wrapper
/// simply gains a place to break a long URL or token. `max_run` of 0 or 1
/// returns the text untouched.
pub fn soft_break_long_tokens(text: &str, max_run: usize) -> String {
    if max_run <= 1 {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + text.len() / max_run * 3);
    let mut run = 0;

    for ch in text.chars() {
        out.push(ch);
        if ch.is_whitespace() {
            run = 0;
            continue;
        }

        run += 1;
        if run >= max_run {
            out.push(ZERO_WIDTH_SPACE);
            run = 0;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes_follow_terminal() {
        let vp = Viewport::new(100, 40);
        assert_eq!(vp.list_width(), 94);
        assert_eq!(vp.list_rows(), 32);
        assert_eq!(vp.content_width(), 92);
        assert_eq!(vp.input_width(), 88);
    }

    #[test]
    fn test_sizes_never_collapse() {
        for vp in [Viewport::new(0, 0), Viewport::new(5, 5), Viewport::new(11, 9)] {
            assert!(vp.list_width() >= 10);
            assert!(vp.list_rows() >= 3);
            assert!(vp.content_width() >= 10);
            assert!(vp.input_width() >= 4);
        }
    }

    #[test]
    fn test_soft_break_inserts_after_each_run() {
        let token = "a".repeat(65);
        let broken = soft_break_long_tokens(&token, 30);

        assert_eq!(broken.matches(ZERO_WIDTH_SPACE).count(), 2);
        let pieces: Vec<&str> = broken.split(ZERO_WIDTH_SPACE).collect();
        assert_eq!(pieces.iter().map(|p| p.len()).collect::<Vec<_>>(), [30, 30, 5]);
    }

    #[test]
    fn test_soft_break_preserves_text() {
        let text = "see https://example.com/a/very/long/path/that/keeps/going?and=going\nok";
        let broken = soft_break_long_tokens(text, 10);

        assert_eq!(broken.replace(ZERO_WIDTH_SPACE, ""), text);
    }

    #[test]
    fn test_whitespace_resets_run() {
        let text = "abcd efgh\nijkl";
        assert_eq!(soft_break_long_tokens(text, 5), text);
        assert_eq!(soft_break_long_tokens("abcde", 5), "abcde\u{200B}");
    }

    #[test]
    fn test_small_limits_disable_breaking() {
        assert_eq!(soft_break_long_tokens("abcdef", 0), "abcdef");
        assert_eq!(soft_break_long_tokens("abcdef", 1), "abcdef");
    }
}
