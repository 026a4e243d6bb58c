//! Error types for segment files: splitting, discovery, merging and translation

use std::path::{Path, PathBuf};

/// Failure reasons for segment operations.
///
/// Every public operation reports these as data; none of them is raised as a panic.
#[derive(thiserror::Error, Debug)]
pub enum SegmentError {
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Input file is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    #[error("File too large: {chars} characters (max {max})")]
    FileTooLarge { chars: usize, max: usize },

    #[error("Input folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("No numbered text files found in: {}", .0.display())]
    NoSegmentFiles(PathBuf),

    #[error("No content found in any of the numbered files in: {}", .0.display())]
    NoContent(PathBuf),

    #[error("Invalid folder name: {0}")]
    InvalidFolderName(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("File is not valid UTF-8: {}", .0.display())]
    Encoding(PathBuf),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for segment operations
pub type Result<T> = std::result::Result<T, SegmentError>;

impl SegmentError {
    /// Wrap an I/O error with a description of what was being done
    pub fn io<S: Into<String>>(context: S, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Convert an error from reading `path` as UTF-8 text
    pub fn from_read(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::InvalidData {
            Self::Encoding(path.to_path_buf())
        } else {
            Self::io(format!("Error reading file {}", path.display()), source)
        }
    }

    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if this error describes bad or missing input rather than a failed I/O call
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Io { .. } | Self::Encoding(_))
    }

    /// Get error category for logging/monitoring
    pub fn category(&self) -> &'static str {
        match self {
            Self::FileNotFound(_) => "file_not_found",
            Self::NotAFile(_) => "not_a_file",
            Self::EmptyFile(_) => "empty_file",
            Self::FileTooLarge { .. } => "file_too_large",
            Self::FolderNotFound(_) => "folder_not_found",
            Self::NotADirectory(_) => "not_a_directory",
            Self::NoSegmentFiles(_) => "no_segment_files",
            Self::NoContent(_) => "no_content",
            Self::InvalidFolderName(_) => "invalid_folder_name",
            Self::Configuration(_) => "configuration",
            Self::Encoding(_) => "encoding",
            Self::Io { .. } => "io",
        }
    }
}
