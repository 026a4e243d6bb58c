//! Boundary-aware text chunking
//!
//! Splits a document into bounded-size chunks, breaking after sentence
//! terminators where possible, then at word boundaries, and only as a last
//! resort in the middle of a word.

pub mod chunker;
pub mod config;
pub mod error;
pub mod types;

// Re-export main public interfaces
pub use chunker::{BoundaryChunker, split_text_into_chunks};
pub use config::ChunkingConfig;
pub use error::{ChunkingError, Result};
pub use types::{BoundaryKind, TextChunk};
