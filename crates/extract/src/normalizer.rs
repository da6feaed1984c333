/// Characters of surrounding text kept on each side of a mention.
pub const CONTEXT_RADIUS: usize = 100;

/// Normalize mention text: trim surrounding whitespace, lowercase.
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Text with a char -> byte index, so character offsets from the engine can be
/// sliced without walking the string for every mention.
pub struct CharIndexedText<'a> {
    text: &'a str,
    /// Byte offset of every char, plus `text.len()` as the final boundary.
    boundaries: Vec<usize>,
}

impl<'a> CharIndexedText<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());
        Self { text, boundaries }
    }

    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Slice by character offsets. Out-of-range offsets are clamped to the
    /// text, and an inverted range yields an empty slice.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        let len = self.char_len();
        let start = start.min(len);
        let end = end.clamp(start, len);
        &self.text[self.boundaries[start]..self.boundaries[end]]
    }

    /// Window of `radius` characters either side of `[start, end)`, clipped at
    /// the text boundaries.
    pub fn context(&self, start: usize, end: usize, radius: usize) -> &'a str {
        self.slice(start.saturating_sub(radius), end.saturating_add(radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_snippet(text: &str, start: usize, end: usize) -> &str {
        CharIndexedText::new(text).context(start, end, CONTEXT_RADIUS)
    }

    #[test]
    fn test_normalization() {
        assert_eq!(normalize_text("Paris "), "paris");
        assert_eq!(normalize_text("paris"), "paris");
        assert_eq!(normalize_text(" Paris"), "paris");
        assert_eq!(normalize_text("\tNEW York\n"), "new york");
    }

    #[test]
    fn test_context_clipped_at_start_and_end() {
        let text = "Barack Obama visited Paris.";

        assert_eq!(context_snippet(text, 0, 12), text);
        assert_eq!(context_snippet(text, 21, 26), text);
    }

    #[test]
    fn test_context_window_radius() {
        let text = format!("{}Paris{}", "a".repeat(150), "b".repeat(150));
        let snippet = context_snippet(&text, 150, 155);

        assert_eq!(snippet.chars().count(), 5 + 2 * CONTEXT_RADIUS);
        assert!(snippet.starts_with('a'));
        assert!(snippet.ends_with('b'));
        assert!(text.contains(snippet));
    }

    #[test]
    fn test_char_offsets_on_multibyte_text() {
        let text = "Zürich liegt nahe München.";
        let indexed = CharIndexedText::new(text);

        assert_eq!(indexed.char_len(), 26);
        assert_eq!(indexed.slice(0, 6), "Zürich");
        assert_eq!(indexed.slice(18, 25), "München");
    }

    #[test]
    fn test_out_of_range_offsets_clamped() {
        let indexed = CharIndexedText::new("short");

        assert_eq!(indexed.slice(3, 99), "rt");
        assert_eq!(indexed.slice(99, 120), "");
        assert_eq!(indexed.slice(4, 2), "");
        assert_eq!(indexed.context(2, 3, 1000), "short");
    }
}
