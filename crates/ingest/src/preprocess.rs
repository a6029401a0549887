//! Text normalization and word-window chunking.
//!
//! Both functions are pure. Cleaning strips punctuation entirely, favoring
//! embedding-friendly text over exact reproduction of the source.

/// Strip every character outside `[a-zA-Z0-9]` and whitespace, collapse
/// whitespace runs to single spaces, and trim. Idempotent.
pub fn clean(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split `text` into consecutive windows of at most `chunk_size` whitespace
/// -delimited words, each rejoined with single spaces. No overlap; the last
/// window may be shorter. Empty input produces no chunks.
pub fn chunk(text: &str, chunk_size: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }
    if chunk_size == 0 {
        return vec![words.join(" ")];
    }
    words.chunks(chunk_size).map(|w| w.join(" ")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_strips_specials_and_collapses_whitespace() {
        assert_eq!(clean("Hello,   world! (42)"), "Hello world 42");
        assert_eq!(clean("\ttabs\nand\r\nnewlines  "), "tabs and newlines");
    }

    #[test]
    fn clean_is_idempotent() {
        for raw in ["a - b", "  x!!y  z  ", "plain text", ""] {
            let once = clean(raw);
            assert_eq!(clean(&once), once);
        }
    }

    #[test]
    fn clean_empty_is_empty() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("  \n\t "), "");
        assert_eq!(clean("!?#$%"), "");
    }

    #[test]
    fn chunk_covers_all_words_in_order() {
        let words: Vec<String> = (0..1203).map(|i| format!("w{i}")).collect();
        let text = words.join(" ");
        let chunks = chunk(&text, 500);

        assert_eq!(chunks.len(), 3);
        for c in &chunks {
            assert!(c.split_whitespace().count() <= 500);
        }

        let rejoined: Vec<&str> = chunks
            .iter()
            .flat_map(|c| c.split_whitespace())
            .collect();
        assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunks = chunk("just a few words here", 500);
        assert_eq!(chunks, vec!["just a few words here".to_string()]);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_chunk() {
        let text = (0..10).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let chunks = chunk(&text, 5);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].split_whitespace().count(), 5);
    }

    #[test]
    fn empty_text_chunks_to_nothing() {
        assert!(chunk("", 500).is_empty());
        assert!(chunk("   ", 500).is_empty());
    }

    #[test]
    fn zero_chunk_size_keeps_everything_together() {
        assert_eq!(chunk("a b c", 0), vec!["a b c".to_string()]);
    }
}
