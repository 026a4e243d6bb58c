//! Numbered segment files: writing a chunked document as `1.txt .. N.txt`,
//! discovering them again in numeric order, and merging them back together.

pub mod config;
pub mod discovery;
pub mod error;
pub mod merger;
pub mod outcome;
pub mod path;
pub mod store;

pub use config::SegmentConfig;
pub use discovery::{SegmentFile, discover};
pub use error::{Result, SegmentError};
pub use merger::SegmentMerger;
pub use outcome::{MergeOutcome, OperationReport, SplitOutcome, TranslationOutcome, WorkflowOutcome};
pub use store::{SegmentStore, SplitOptions, remove_segments, write_segments};
