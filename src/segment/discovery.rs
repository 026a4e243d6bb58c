//! Finding the numbered segment files of a folder, in index order

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static SEGMENT_FILE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\.txt$").expect("segment file name pattern"));

/// A numbered segment file found in a folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentFile {
    pub index: u64,
    pub path: PathBuf,
}

/// Name of the segment file for a 1-based index
pub fn segment_file_name(index: u64) -> String {
    format!("{index}.txt")
}

/// Parse the index out of a segment file name (`12.txt` -> 12)
pub fn parse_segment_index(file_name: &str) -> Option<u64> {
    SEGMENT_FILE_NAME
        .captures(file_name)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// List the numbered segment files directly inside `folder`, ordered by index.
///
/// A missing or unreadable folder yields an empty list. Names not matching
/// `<ASCII digits>.txt` are ignored. Files sharing an index are kept and ordered
/// by file name.
pub fn discover(folder: &Path) -> Vec<SegmentFile> {
    if !folder.is_dir() {
        return vec![];
    }
    let entries = match std::fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("cannot read segment folder {:?}: {:?}", folder, e);
            return vec![];
        }
    };

    entries
        .filter_map(|entry| {
            entry
                .inspect_err(|e| tracing::warn!("skip unreadable entry in {:?}: {:?}", folder, e))
                .ok()
        })
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            let file_name = entry.file_name();
            let name = file_name.to_str()?;
            let index = parse_segment_index(name);
            if index.is_none() && SEGMENT_FILE_NAME.is_match(name) {
                tracing::warn!("segment index out of range, skipped: {}", name);
            }
            index.map(|index| SegmentFile {
                index,
                path: entry.path(),
            })
        })
        .sorted_by(|a, b| a.index.cmp(&b.index).then_with(|| a.path.cmp(&b.path)))
        .collect()
}
