//! Core data structures for boundary-aware text chunking

/// A trimmed, contiguous slice of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Chunk content, with surrounding whitespace removed
    pub content: String,
    /// Character start position of the untrimmed slice in the original text
    pub char_start: usize,
    /// Character end position (exclusive) of the untrimmed slice in the original text
    pub char_end: usize,
    /// How the end of this chunk was chosen
    pub boundary: BoundaryKind,
    /// Index of this chunk in the sequence
    pub chunk_index: usize,
}

impl TextChunk {
    pub fn new(
        content: String,
        char_start: usize,
        char_end: usize,
        boundary: BoundaryKind,
        chunk_index: usize,
    ) -> Self {
        Self {
            content,
            char_start,
            char_end,
            boundary,
            chunk_index,
        }
    }

    /// Number of characters in the trimmed content
    pub fn char_length(&self) -> usize {
        self.content.chars().count()
    }

    /// Get character position range of the untrimmed slice as a tuple
    pub fn char_range(&self) -> (usize, usize) {
        (self.char_start, self.char_end)
    }
}

/// Break point chosen for a chunk, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    /// After a sentence terminator followed by a space
    Sentence,
    /// At the last space in the search window
    Word,
    /// At the raw character limit, possibly mid-word
    HardCut,
    /// The remaining text fit in one chunk
    EndOfText,
}

impl BoundaryKind {
    /// Check if this boundary avoided splitting a word
    pub fn is_clean(&self) -> bool {
        !matches!(self, BoundaryKind::HardCut)
    }

    pub fn description(&self) -> &'static str {
        match self {
            BoundaryKind::Sentence => "Sentence boundary",
            BoundaryKind::Word => "Word boundary",
            BoundaryKind::HardCut => "Hard cut at character limit",
            BoundaryKind::EndOfText => "End of text",
        }
    }
}

impl std::fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_chunk_creation() {
        let chunk = TextChunk::new(
            "Hello wörld.".to_string(),
            0,
            13,
            BoundaryKind::Sentence,
            0,
        );
        assert_eq!(chunk.char_length(), 12);
        assert_eq!(chunk.char_range(), (0, 13));
        assert_eq!(chunk.boundary, BoundaryKind::Sentence);
    }

    #[test]
    fn test_boundary_kind_properties() {
        assert!(BoundaryKind::Sentence.is_clean());
        assert!(BoundaryKind::Word.is_clean());
        assert!(BoundaryKind::EndOfText.is_clean());
        assert!(!BoundaryKind::HardCut.is_clean());
        assert_eq!(
            format!("{}", BoundaryKind::HardCut),
            "Hard cut at character limit"
        );
    }
}
