//! Outcome records of segment operations and their uniform report shape

use super::error::SegmentError;
use serde::Serialize;
use std::path::PathBuf;

/// Result of writing a document as numbered segment files
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitOutcome {
    pub output_folder: PathBuf,
    pub files_created: usize,
    /// Character count of the source document
    pub total_chars: usize,
    /// Chunk contents in segment order, for inspection
    pub chunks: Vec<String>,
}

/// Result of merging a segment folder into one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    /// Absolute path of the merged file
    pub output_file: PathBuf,
    /// Segments that contributed content
    pub files_merged: usize,
    /// Character count of the merged text
    pub total_chars: usize,
    /// Numbered segments discovered before empty ones were skipped
    pub files_found: usize,
}

/// Result of translating every segment of a folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationOutcome {
    pub source_folder: PathBuf,
    pub target_folder: PathBuf,
    pub files_translated: usize,
    /// Character count of all translated segments
    pub total_chars: usize,
    /// Indices of segments the translator failed on
    pub failed_indices: Vec<u64>,
}

/// Result of a full split, translate and merge run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowOutcome {
    pub split: SplitOutcome,
    pub translation: TranslationOutcome,
    pub merge: MergeOutcome,
}

/// Uniform report of an operation: a success flag plus either the outcome
/// fields or a single human-readable error.
///
/// Serializes as `{"success": true, ...outcome}` or
/// `{"success": false, "error": "...", "error_category": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct OperationReport<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_category: Option<&'static str>,
}

impl<T: Serialize> OperationReport<T> {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            serde_json::json!({
                "success": false,
                "error": format!("cannot serialize report: {e}"),
            })
        })
    }
}

impl<T: Serialize> From<Result<T, SegmentError>> for OperationReport<T> {
    fn from(result: Result<T, SegmentError>) -> Self {
        match result {
            Ok(outcome) => Self {
                success: true,
                outcome: Some(outcome),
                error: None,
                error_category: None,
            },
            Err(e) => Self {
                success: false,
                outcome: None,
                error: Some(e.to_string()),
                error_category: Some(e.category()),
            },
        }
    }
}
