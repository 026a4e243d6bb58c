//! Configuration for boundary-aware text chunking

/// Configuration for boundary-aware chunking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Maximum characters per chunk
    pub max_chars: usize,
    /// Number of trailing characters of a candidate chunk searched for a break point
    pub search_window: usize,
}

impl ChunkingConfig {
    pub const DEFAULT_MAX_CHARS: usize = 2000;
    pub const DEFAULT_SEARCH_WINDOW: usize = 200;

    /// Create configuration with the given chunk size and the default search window
    pub fn with_max_chars(max_chars: usize) -> Self {
        Self {
            max_chars,
            ..Self::default()
        }
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), String> {
        if self.max_chars == 0 {
            return Err("max_chars must be greater than 0".to_string());
        }
        if self.search_window == 0 {
            return Err("search_window must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: Self::DEFAULT_MAX_CHARS,
            search_window: Self::DEFAULT_SEARCH_WINDOW,
        }
    }
}
