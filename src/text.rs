pub mod chunking;

pub use chunking::{BoundaryChunker, ChunkingConfig, TextChunk, split_text_into_chunks};

/// Whitespace-separated words of a text, in order.
///
/// Chunking and merging preserve this sequence even though whitespace at
/// chunk edges is normalized.
pub fn word_sequence(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_sequence() {
        assert_eq!(
            word_sequence("  Hello\n\nworld.  This\tis "),
            vec!["Hello", "world.", "This", "is"]
        );
        assert!(word_sequence(" \n ").is_empty());
    }

    #[test]
    fn test_split_and_rejoin_preserves_words() {
        let text = "It was late. The lamps were lit!  Nobody moved?\nThen the door opened.";
        let chunks = split_text_into_chunks(text, 16);
        assert!(chunks.iter().all(|c| c.chars().count() <= 16));
        assert_eq!(word_sequence(&chunks.join("\n\n")), word_sequence(text));
    }
}
