/// Characters of document text sent to the model
pub const MAX_INPUT_CHARS: usize = 30_000;

/// Keep the first `max_chars` characters of `text`
///
/// Counts Unicode scalar values, not bytes. The cut ignores word and
/// sentence boundaries.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        let text = "Tender for road works.";
        assert_eq!(truncate_chars(text, MAX_INPUT_CHARS), text);
        assert_eq!(truncate_chars(text, text.len()), text);
    }

    #[test]
    fn test_long_text_keeps_prefix() {
        let text = format!("{}{}", "a".repeat(MAX_INPUT_CHARS), "TAIL");
        let truncated = truncate_chars(&text, MAX_INPUT_CHARS);
        assert_eq!(truncated.chars().count(), MAX_INPUT_CHARS);
        assert!(text.starts_with(truncated));
        assert!(!truncated.contains("TAIL"));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "é".repeat(10);
        let truncated = truncate_chars(&text, 4);
        assert_eq!(truncated, "éééé");
        assert_eq!(truncated.len(), 8);
    }

    #[test]
    fn test_cuts_mid_word() {
        assert_eq!(truncate_chars("procurement", 4), "proc");
    }
}
