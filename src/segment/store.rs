//! Write path: validate a source file, chunk it and persist numbered segment files

use super::{
    config::SegmentConfig,
    discovery::{discover, segment_file_name},
    error::{Result, SegmentError},
    outcome::SplitOutcome,
    path::{absolutize, auto_output_root, folder_name_from, sanitize_folder_name},
};
use crate::text::chunking::BoundaryChunker;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Per-call overrides for [`SegmentStore::split_file`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitOptions {
    /// Segment folder name; derived from the source file stem when absent
    pub folder_name: Option<String>,
    /// Directory that receives the segment folder; the configured root when absent
    pub output_root: Option<PathBuf>,
    /// Maximum characters per segment; the configured size when absent
    pub max_chars: Option<usize>,
}

impl SplitOptions {
    pub fn with_folder_name(mut self, name: impl Into<String>) -> Self {
        self.folder_name = Some(name.into());
        self
    }
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = Some(root.into());
        self
    }
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = Some(max_chars);
        self
    }
}

#[derive(Debug, Clone)]
pub struct SegmentStore {
    config: SegmentConfig,
}

impl SegmentStore {
    pub fn new(config: SegmentConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| SegmentError::configuration(e.to_string()))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    /// Split a text file into `{root}/{folder}/1.txt .. N.txt`.
    ///
    /// The source must be an existing, non-empty UTF-8 file of at most
    /// `max_source_chars` characters; otherwise nothing is written.
    /// Existing segment files with the same numbers are overwritten.
    pub fn split_file(&self, input: &Path, options: &SplitOptions) -> Result<SplitOutcome> {
        self.try_split_file(input, options).inspect_err(|e| {
            warn!(
                "split failed for {:?} ({}): {}",
                input,
                e.category(),
                e
            )
        })
    }

    /// Same as [`split_file`](Self::split_file) for any relative or absolute
    /// input path, with the output root chosen from the input location when
    /// not given (see [`auto_output_root`]).
    pub fn split_any_file(&self, input: &Path, options: &SplitOptions) -> Result<SplitOutcome> {
        let input = absolutize(input)?;
        let options = SplitOptions {
            output_root: options
                .output_root
                .clone()
                .or_else(|| Some(auto_output_root(&input))),
            ..options.clone()
        };
        debug!(
            "split {:?} into root {:?} (folder: {:?})",
            input, options.output_root, options.folder_name
        );
        self.split_file(&input, &options)
    }

    fn try_split_file(&self, input: &Path, options: &SplitOptions) -> Result<SplitOutcome> {
        let chunker = BoundaryChunker::new(self.config.chunking_config(options.max_chars))
            .map_err(|e| SegmentError::configuration(e.to_string()))?;
        let folder_name = match options.folder_name.as_deref() {
            Some(name) => sanitize_folder_name(name)?,
            None => folder_name_from(input).ok_or_else(|| {
                SegmentError::InvalidFolderName(format!(
                    "cannot derive a folder name from {}",
                    input.display()
                ))
            })?,
        };
        let text = self.read_source(input)?;
        let total_chars = text.chars().count();

        let root = options
            .output_root
            .as_deref()
            .unwrap_or(&self.config.output_root);
        let output_folder = absolutize(root)?.join(folder_name);

        let chunks = chunker.split(&text);
        let files_created = write_segments(&output_folder, &chunks)?;
        info!(
            "split {:?} ({} chars) into {} segments in {:?}",
            input, total_chars, files_created, output_folder
        );

        Ok(SplitOutcome {
            output_folder,
            files_created,
            total_chars,
            chunks,
        })
    }

    /// Read a source file, enforcing existence, UTF-8, non-emptiness and the size ceiling
    pub fn read_source(&self, input: &Path) -> Result<String> {
        if !input.exists() {
            return Err(SegmentError::FileNotFound(input.to_path_buf()));
        }
        if !input.is_file() {
            return Err(SegmentError::NotAFile(input.to_path_buf()));
        }
        let text = fs::read_to_string(input).map_err(|e| SegmentError::from_read(input, e))?;

        let chars = text.chars().count();
        if chars > self.config.max_source_chars {
            return Err(SegmentError::FileTooLarge {
                chars,
                max: self.config.max_source_chars,
            });
        }
        if chars == 0 {
            return Err(SegmentError::EmptyFile(input.to_path_buf()));
        }
        Ok(text)
    }
}

impl Default for SegmentStore {
    fn default() -> Self {
        Self {
            config: SegmentConfig::default(),
        }
    }
}

/// Write chunks as `1.txt .. N.txt` into `folder`, creating it if needed.
/// Returns the number of files written.
pub fn write_segments(folder: &Path, chunks: &[String]) -> Result<usize> {
    fs::create_dir_all(folder).map_err(|e| {
        SegmentError::io(format!("Cannot create folder {}", folder.display()), e)
    })?;

    for (i, chunk) in chunks.iter().enumerate() {
        let path = folder.join(segment_file_name(i as u64 + 1));
        fs::write(&path, chunk)
            .map_err(|e| SegmentError::io(format!("Error writing file {}", path.display()), e))?;
    }

    let next = folder.join(segment_file_name(chunks.len() as u64 + 1));
    if next.exists() {
        warn!(
            "{:?} holds segments beyond {} from an earlier run; they were left in place",
            folder,
            chunks.len()
        );
    }
    Ok(chunks.len())
}

/// Delete every numbered segment file directly inside `folder`, leaving
/// other files alone. Returns the number of files removed.
pub fn remove_segments(folder: &Path) -> Result<usize> {
    let files = discover(folder);
    for file in &files {
        fs::remove_file(&file.path).map_err(|e| {
            SegmentError::io(format!("Error removing file {}", file.path.display()), e)
        })?;
    }
    if !files.is_empty() {
        debug!("removed {} segments from {:?}", files.len(), folder);
    }
    Ok(files.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SegmentStore {
        SegmentStore::default()
    }

    fn write_source(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_split_file_writes_numbered_segments() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), "tale.txt", b"Hello world. This is a test.");
        let options = SplitOptions::default()
            .with_output_root(dir.path().join("out"))
            .with_max_chars(15);

        let outcome = store().split_file(&source, &options).unwrap();

        assert_eq!(outcome.output_folder, dir.path().join("out").join("tale"));
        assert_eq!(outcome.files_created, 2);
        assert_eq!(outcome.total_chars, 28);
        assert_eq!(outcome.chunks, vec!["Hello world.", "This is a test."]);
        assert_eq!(
            fs::read_to_string(outcome.output_folder.join("1.txt")).unwrap(),
            "Hello world."
        );
        assert_eq!(
            fs::read_to_string(outcome.output_folder.join("2.txt")).unwrap(),
            "This is a test."
        );
        assert!(!outcome.output_folder.join("3.txt").exists());
    }

    #[test]
    fn test_split_file_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), "tale.txt", "word ".repeat(100).as_bytes());
        let options = SplitOptions::default()
            .with_output_root(dir.path())
            .with_folder_name("again")
            .with_max_chars(40);

        let first = store().split_file(&source, &options).unwrap();
        let second = store().split_file(&source, &options).unwrap();
        assert_eq!(first.files_created, second.files_created);
        assert_eq!(first.output_folder, second.output_folder);
        assert!(first.files_created > 1);
    }

    #[test]
    fn test_split_empty_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), "empty.txt", b"");
        let options = SplitOptions::default().with_output_root(dir.path().join("out"));

        let err = store().split_file(&source, &options).unwrap_err();
        assert!(matches!(err, SegmentError::EmptyFile(_)));
        assert!(err.to_string().to_lowercase().contains("empty"));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_split_missing_and_non_file_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let options = SplitOptions::default().with_output_root(dir.path().join("out"));

        let err = store()
            .split_file(&dir.path().join("absent.txt"), &options)
            .unwrap_err();
        assert!(matches!(err, SegmentError::FileNotFound(_)));

        let err = store().split_file(dir.path(), &options).unwrap_err();
        assert!(matches!(err, SegmentError::NotAFile(_)));
    }

    #[test]
    fn test_split_oversized_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), "big.txt", "ääääääääääää".as_bytes());
        let store = SegmentStore::new(SegmentConfig {
            max_source_chars: 10,
            ..SegmentConfig::default()
        })
        .unwrap();

        let err = store
            .split_file(&source, &SplitOptions::default().with_output_root(dir.path()))
            .unwrap_err();
        match err {
            SegmentError::FileTooLarge { chars, max } => {
                assert_eq!(chars, 12);
                assert_eq!(max, 10);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!dir.path().join("big").exists());
    }

    #[test]
    fn test_split_invalid_utf8_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), "latin1.txt", &[0x63, 0x61, 0x66, 0xe9, 0xff]);
        let err = store()
            .split_file(&source, &SplitOptions::default().with_output_root(dir.path()))
            .unwrap_err();
        assert!(matches!(err, SegmentError::Encoding(_)));
    }

    #[test]
    fn test_split_rejects_unsafe_folder_name() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), "tale.txt", b"some text");
        let options = SplitOptions::default()
            .with_output_root(dir.path().join("out"))
            .with_folder_name("../escape");

        let err = store().split_file(&source, &options).unwrap_err();
        assert!(matches!(err, SegmentError::InvalidFolderName(_)));
        assert!(!dir.path().join("escape").exists());
    }

    #[test]
    fn test_split_rejects_zero_max_chars() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), "tale.txt", b"some text");
        let options = SplitOptions::default()
            .with_output_root(dir.path())
            .with_max_chars(0);
        let err = store().split_file(&source, &options).unwrap_err();
        assert_eq!(err.category(), "configuration");
    }

    #[test]
    fn test_split_any_file_uses_output_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let books = dir.path().join("books");
        fs::create_dir(&books).unwrap();
        let source = write_source(&books, "tale.txt", b"Once upon a time.");

        let outcome = store()
            .split_any_file(&source, &SplitOptions::default())
            .unwrap();
        assert_eq!(outcome.output_folder, books.join("output").join("tale"));
        assert_eq!(outcome.files_created, 1);
        assert_eq!(
            fs::read_to_string(outcome.output_folder.join("1.txt")).unwrap(),
            "Once upon a time."
        );
    }

    #[test]
    fn test_write_segments_creates_folder() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("a").join("b");
        let written = write_segments(&folder, &["one".to_string(), "two".to_string()]).unwrap();
        assert_eq!(written, 2);
        assert_eq!(fs::read_to_string(folder.join("2.txt")).unwrap(), "two");
        assert_eq!(write_segments(&folder, &[]).unwrap(), 0);
    }

    #[test]
    fn test_remove_segments_keeps_other_files() {
        let dir = tempfile::tempdir().unwrap();
        write_segments(dir.path(), &["a".to_string(), "b".to_string()]).unwrap();
        fs::write(dir.path().join("merged.txt"), "a\n\nb").unwrap();

        assert_eq!(remove_segments(dir.path()).unwrap(), 2);
        assert!(!dir.path().join("1.txt").exists());
        assert!(dir.path().join("merged.txt").exists());
        assert_eq!(remove_segments(&dir.path().join("absent")).unwrap(), 0);
    }
}
