//! Feed segments one at a time through external text collaborators and
//! chain split, translate and merge into one run.
//!
//! The collaborators (a translation service, a transliteration library) are
//! black boxes here: any call may fail, and a failure only drops the segment
//! it was made for.

use crate::segment::{
    SegmentConfig, SegmentError, SegmentMerger, SegmentStore, SplitOptions, TranslationOutcome,
    WorkflowOutcome, discover,
    discovery::segment_file_name,
    remove_segments,
    error::Result,
    path::sibling_with_suffix,
};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{debug, info, warn};

/// Turns a piece of text into its translation
pub trait Translator {
    fn translate(&self, text: &str) -> anyhow::Result<String>;
}

/// Rewrites text from one script to another, e.g. `devanagari` -> `itrans`
pub trait Transliterator {
    fn transliterate(
        &self,
        text: &str,
        source_scheme: &str,
        target_scheme: &str,
    ) -> anyhow::Result<String>;
}

/// A [`Transliterator`] bound to a fixed scheme pair, usable as a [`Translator`]
#[derive(Debug, Clone)]
pub struct Transliteration<T: Transliterator> {
    inner: T,
    source_scheme: String,
    target_scheme: String,
}

impl<T: Transliterator> Transliteration<T> {
    pub fn new(inner: T, source_scheme: impl Into<String>, target_scheme: impl Into<String>) -> Self {
        Self {
            inner,
            source_scheme: source_scheme.into(),
            target_scheme: target_scheme.into(),
        }
    }
}

impl<T: Transliterator> Translator for Transliteration<T> {
    fn translate(&self, text: &str) -> anyhow::Result<String> {
        self.inner
            .transliterate(text, &self.source_scheme, &self.target_scheme)
    }
}

/// Translates a segment folder into another segment folder with the same numbering
#[derive(Debug, Clone)]
pub struct SegmentTranslator<T: Translator> {
    translator: T,
}

impl<T: Translator> SegmentTranslator<T> {
    pub fn new(translator: T) -> Self {
        Self { translator }
    }

    /// Translate every non-empty segment of `source` into `target/{index}.txt`.
    ///
    /// Segments that cannot be read, or whose translation fails or comes back
    /// empty, are logged and listed in `failed_indices`; the rest still go through.
    /// Only a missing source, a source without segments, or a failed write aborts.
    pub fn translate_folder(&self, source: &Path, target: &Path) -> Result<TranslationOutcome> {
        self.translate_segments(source, target, None)
    }

    /// Same as [`translate_folder`](Self::translate_folder), restricted to the
    /// segments whose index lies in `indices`. Other segments of `source` are
    /// neither translated nor reported.
    pub fn translate_range(
        &self,
        source: &Path,
        target: &Path,
        indices: RangeInclusive<u64>,
    ) -> Result<TranslationOutcome> {
        self.translate_segments(source, target, Some(indices))
    }

    fn translate_segments(
        &self,
        source: &Path,
        target: &Path,
        indices: Option<RangeInclusive<u64>>,
    ) -> Result<TranslationOutcome> {
        if !source.exists() {
            return Err(SegmentError::FolderNotFound(source.to_path_buf()));
        }
        if !source.is_dir() {
            return Err(SegmentError::NotADirectory(source.to_path_buf()));
        }
        let files: Vec<_> = discover(source)
            .into_iter()
            .filter(|file| indices.as_ref().is_none_or(|r| r.contains(&file.index)))
            .collect();
        if files.is_empty() {
            return Err(SegmentError::NoSegmentFiles(source.to_path_buf()));
        }
        fs::create_dir_all(target).map_err(|e| {
            SegmentError::io(format!("Cannot create folder {}", target.display()), e)
        })?;

        let mut files_translated = 0;
        let mut total_chars = 0;
        let mut failed_indices = vec![];

        for (n, file) in files.iter().enumerate() {
            let original = match fs::read_to_string(&file.path) {
                Ok(text) => text,
                Err(e) => {
                    warn!("could not read segment {:?}: {}", file.path, e);
                    failed_indices.push(file.index);
                    continue;
                }
            };
            let original = original.trim();
            if original.is_empty() {
                debug!("skip empty segment {:?}", file.path);
                continue;
            }

            debug!("translating segment {} ({}/{})", file.index, n + 1, files.len());
            let translated = match self.translator.translate(original) {
                Ok(text) if !text.trim().is_empty() => text,
                Ok(_) => {
                    warn!("translation of segment {} came back empty", file.index);
                    failed_indices.push(file.index);
                    continue;
                }
                Err(e) => {
                    warn!("translation of segment {} failed: {:?}", file.index, e);
                    failed_indices.push(file.index);
                    continue;
                }
            };

            let path = target.join(segment_file_name(file.index));
            fs::write(&path, &translated).map_err(|e| {
                SegmentError::io(format!("Error writing file {}", path.display()), e)
            })?;
            files_translated += 1;
            total_chars += translated.chars().count();
        }

        info!(
            "translated {}/{} segments from {:?} into {:?} ({} failed)",
            files_translated,
            files.len(),
            source,
            target,
            failed_indices.len()
        );
        Ok(TranslationOutcome {
            source_folder: source.to_path_buf(),
            target_folder: target.to_path_buf(),
            files_translated,
            total_chars,
            failed_indices,
        })
    }
}

/// Split a document, translate its segments and merge the translations
#[derive(Debug, Clone)]
pub struct Workflow<T: Translator> {
    store: SegmentStore,
    translator: SegmentTranslator<T>,
    merger: SegmentMerger,
}

impl<T: Translator> Workflow<T> {
    pub fn new(config: SegmentConfig, translator: T) -> Result<Self> {
        Ok(Self {
            store: SegmentStore::new(config.clone())?,
            translator: SegmentTranslator::new(translator),
            merger: SegmentMerger::new(config)?,
        })
    }

    /// Segments land in the split folder, translations in its sibling
    /// `{folder}_translated`, and the merged translation in `final_output`
    /// or next to that sibling as `{folder}_translated_merged.txt`.
    ///
    /// Only the segments written by this run are translated; numbered files
    /// already in the translated folder are removed first.
    pub fn run(
        &self,
        input: &Path,
        options: &SplitOptions,
        final_output: Option<&Path>,
    ) -> Result<WorkflowOutcome> {
        let split = self.store.split_any_file(input, options)?;

        let translated_folder = sibling_with_suffix(
            &split.output_folder,
            &self.store.config().translated_suffix,
            None,
        );
        // translations of an earlier, longer run must not reach the merge
        remove_segments(&translated_folder)?;
        let translation = self.translator.translate_range(
            &split.output_folder,
            &translated_folder,
            1..=split.files_created as u64,
        )?;

        let merge = self
            .merger
            .merge_any_folder(&translated_folder, final_output, None)?;

        info!(
            "workflow done for {:?}: {} segments, {} translated, merged into {:?}",
            input, split.files_created, translation.files_translated, merge.output_file
        );
        Ok(WorkflowOutcome {
            split,
            translation,
            merge,
        })
    }
}
