//! Split long documents into bounded, boundary-aware segments stored as
//! numbered files, and merge those files back into one document.

pub mod pipeline;
pub mod segment;
pub mod text;
pub mod util;

pub use pipeline::{SegmentTranslator, Transliteration, Transliterator, Translator, Workflow};
pub use segment::{
    MergeOutcome, OperationReport, SegmentConfig, SegmentError, SegmentMerger, SegmentStore,
    SplitOptions, SplitOutcome,
};
pub use text::chunking::{BoundaryChunker, ChunkingConfig, split_text_into_chunks};
