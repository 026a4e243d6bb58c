//! Reassemble a folder of numbered segment files into one document

use super::{
    config::SegmentConfig,
    discovery::{SegmentFile, discover},
    error::{Result, SegmentError},
    outcome::MergeOutcome,
    path::{absolutize, sanitize_folder_name, sibling_with_suffix},
};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct SegmentMerger {
    config: SegmentConfig,
}

impl SegmentMerger {
    pub fn new(config: SegmentConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| SegmentError::configuration(e.to_string()))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    /// Merge the numbered segments of `folder` in index order.
    ///
    /// Each segment is trimmed; empty or unreadable segments are skipped and
    /// only show up as `files_found - files_merged`. The result is written to
    /// `output_file`, or `{folder}/merged.txt` by default, replacing any
    /// existing file. `separator` defaults to the configured one (`"\n\n"`).
    pub fn merge_files(
        &self,
        folder: &Path,
        output_file: Option<&Path>,
        separator: Option<&str>,
    ) -> Result<MergeOutcome> {
        self.try_merge_files(folder, output_file, separator)
            .inspect_err(|e| warn!("merge failed for {:?} ({}): {}", folder, e.category(), e))
    }

    /// Same as [`merge_files`](Self::merge_files) with both paths resolved
    /// against the current directory. Without an output path the merged file
    /// is written next to the folder as `{folder name}_merged.txt`.
    pub fn merge_any_folder(
        &self,
        folder: &Path,
        output_file: Option<&Path>,
        separator: Option<&str>,
    ) -> Result<MergeOutcome> {
        let folder = absolutize(folder)?;
        let output_file = match output_file {
            Some(path) => absolutize(path)?,
            None => sibling_with_suffix(&folder, &self.config.merged_suffix, Some("txt")),
        };
        self.merge_files(&folder, Some(&output_file), separator)
    }

    /// Merge the translated segments of a story:
    /// `{base}/translate/{story}` -> `{output_dir}/{story}_merged.txt`,
    /// where `base` defaults to the configured output root and
    /// `output_dir` to `{base}/merged`.
    pub fn merge_translated(
        &self,
        story_name: &str,
        base_dir: Option<&Path>,
        output_dir: Option<&Path>,
    ) -> Result<MergeOutcome> {
        let story_name = sanitize_folder_name(story_name)?;
        let base = base_dir.unwrap_or(&self.config.output_root);
        let input_folder = base.join("translate").join(&story_name);
        let output_dir = output_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| base.join("merged"));
        let output_file =
            output_dir.join(format!("{}{}.txt", story_name, self.config.merged_suffix));
        self.merge_files(&input_folder, Some(&output_file), None)
    }

    fn try_merge_files(
        &self,
        folder: &Path,
        output_file: Option<&Path>,
        separator: Option<&str>,
    ) -> Result<MergeOutcome> {
        if !folder.exists() {
            return Err(SegmentError::FolderNotFound(folder.to_path_buf()));
        }
        if !folder.is_dir() {
            return Err(SegmentError::NotADirectory(folder.to_path_buf()));
        }

        let files = discover(folder);
        if files.is_empty() {
            return Err(SegmentError::NoSegmentFiles(folder.to_path_buf()));
        }

        let contents = read_segment_contents(&files);
        if contents.is_empty() {
            return Err(SegmentError::NoContent(folder.to_path_buf()));
        }

        let separator = separator.unwrap_or(&self.config.separator);
        let merged = contents.join(separator);

        let output_file = match output_file {
            Some(path) => path.to_path_buf(),
            None => folder.join(&self.config.merged_file_name),
        };
        let output_file = absolutize(&output_file)?;
        write_merged(&output_file, &merged)?;

        let outcome = MergeOutcome {
            output_file,
            files_merged: contents.len(),
            total_chars: merged.chars().count(),
            files_found: files.len(),
        };
        info!(
            "merged {}/{} segments from {:?} into {:?} ({} chars)",
            outcome.files_merged,
            outcome.files_found,
            folder,
            outcome.output_file,
            outcome.total_chars
        );
        Ok(outcome)
    }
}

impl Default for SegmentMerger {
    fn default() -> Self {
        Self {
            config: SegmentConfig::default(),
        }
    }
}

/// Trimmed, non-empty contents of the given segments, in order
fn read_segment_contents(files: &[SegmentFile]) -> Vec<String> {
    files
        .iter()
        .filter_map(|file| match fs::read_to_string(&file.path) {
            Ok(content) => {
                let content = content.trim();
                if content.is_empty() {
                    debug!("skip empty segment {:?}", file.path);
                    None
                } else {
                    Some(content.to_string())
                }
            }
            Err(e) => {
                warn!("could not read segment {:?}: {}", file.path, e);
                None
            }
        })
        .collect()
}

fn write_merged(output_file: &Path, merged: &str) -> Result<()> {
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SegmentError::io(format!("Cannot create folder {}", parent.display()), e)
        })?;
    }
    fs::write(output_file, merged).map_err(|e| {
        SegmentError::io(format!("Error writing file {}", output_file.display()), e)
    })
}
