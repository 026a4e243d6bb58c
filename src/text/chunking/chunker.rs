//! Boundary-aware chunker that prefers sentence breaks, then word breaks, then a hard cut

use super::{
    config::ChunkingConfig,
    error::{ChunkingError, Result},
    types::{BoundaryKind, TextChunk},
};
use tracing::debug;

/// Characters that end a sentence when followed by a space
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Splits text into ordered chunks of at most `max_chars` characters
#[derive(Debug, Clone)]
pub struct BoundaryChunker {
    config: ChunkingConfig,
}

impl BoundaryChunker {
    /// Create a new chunker, rejecting invalid configuration
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config.validate().map_err(ChunkingError::configuration)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Split text into trimmed, non-empty chunk strings
    pub fn split(&self, text: &str) -> Vec<String> {
        self.chunk(text).into_iter().map(|c| c.content).collect()
    }

    /// Split text into chunks carrying their position and break kind
    ///
    /// Walks a cursor over the text. For every candidate end short of the end
    /// of text the break point is, in order of preference: just after the
    /// rightmost `". "`, `"! "` or `"? "` in the search window, at the
    /// rightmost space in the window, or the candidate end itself (hard cut).
    /// Positions are in characters, not bytes.
    pub fn chunk(&self, text: &str) -> Vec<TextChunk> {
        let chars: Vec<char> = text.chars().collect();
        let char_count = chars.len();
        // char position -> byte position
        let char_byte_positions: Vec<usize> =
            text.char_indices().map(|(byte_pos, _)| byte_pos).collect();

        let mut chunks: Vec<TextChunk> = Vec::new();
        let mut cursor = 0;

        while cursor < char_count {
            // whitespace at the start of a chunk is trimmed anyway, so it must
            // not count against the size limit
            if chars[cursor].is_whitespace() {
                cursor += 1;
                continue;
            }

            let candidate_end = (cursor + self.config.max_chars).min(char_count);
            let (end, boundary) = if candidate_end < char_count {
                self.find_boundary(&chars, cursor, candidate_end)
            } else {
                (candidate_end, BoundaryKind::EndOfText)
            };

            let byte_start = char_byte_positions[cursor];
            let byte_end = char_byte_positions
                .get(end)
                .copied()
                .unwrap_or(text.len());
            let content = text[byte_start..byte_end].trim();
            if !content.is_empty() {
                chunks.push(TextChunk::new(
                    content.to_string(),
                    cursor,
                    end,
                    boundary,
                    chunks.len(),
                ));
            }

            cursor = end;
        }

        debug!(
            "split {} chars into {} chunks (max_chars={}, hard cuts={})",
            char_count,
            chunks.len(),
            self.config.max_chars,
            chunks.iter().filter(|c| !c.boundary.is_clean()).count()
        );
        chunks
    }

    /// Find the end position for a chunk starting at `cursor` whose raw limit is `end`.
    /// The returned position is always greater than `cursor`.
    fn find_boundary(&self, chars: &[char], cursor: usize, end: usize) -> (usize, BoundaryKind) {
        let search_start = cursor.max(end.saturating_sub(self.config.search_window));

        // rightmost terminator whose following space also lies in the window
        let sentence = (search_start..end.saturating_sub(1))
            .rev()
            .find(|&i| SENTENCE_TERMINATORS.contains(&chars[i]) && chars[i + 1] == ' ');
        if let Some(pos) = sentence.filter(|&pos| pos > cursor) {
            return (pos + 1, BoundaryKind::Sentence);
        }

        let space = (search_start..end).rev().find(|&i| chars[i] == ' ');
        if let Some(pos) = space.filter(|&pos| pos > cursor) {
            return (pos, BoundaryKind::Word);
        }

        (end, BoundaryKind::HardCut)
    }
}

impl Default for BoundaryChunker {
    fn default() -> Self {
        Self {
            config: ChunkingConfig::default(),
        }
    }
}

/// Split text into chunks of at most `max_chars` characters.
///
/// Never fails: an empty text yields no chunks and a `max_chars` of 0 is treated as 1.
pub fn split_text_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    BoundaryChunker {
        config: ChunkingConfig::with_max_chars(max_chars.max(1)),
    }
    .split(text)
}
