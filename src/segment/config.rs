use crate::text::chunking::ChunkingConfig;
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::path::PathBuf;

/// Settings shared by the segment write path, merger and workflow.
///
/// Loaded from `SEGMENT_*` environment variables, e.g. `SEGMENT_MAX_CHARS_PER_FILE=1500`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SegmentConfig {
    #[serde(default = "SegmentConfig::default_max_chars_per_file")]
    pub max_chars_per_file: usize,
    #[serde(default = "SegmentConfig::default_search_window")]
    pub search_window: usize,
    /// Hard ceiling on the character count of a source file
    #[serde(default = "SegmentConfig::default_max_source_chars")]
    pub max_source_chars: usize,
    /// Root for segment folders when the caller gives none
    #[serde(default = "SegmentConfig::default_output_root")]
    pub output_root: PathBuf,
    #[serde(default = "SegmentConfig::default_separator")]
    pub separator: String,
    /// File name of the merged output written inside the segment folder
    #[serde(default = "SegmentConfig::default_merged_file_name")]
    pub merged_file_name: String,
    /// Appended to a folder name to derive a sibling merged file
    #[serde(default = "SegmentConfig::default_merged_suffix")]
    pub merged_suffix: String,
    /// Appended to a folder name to derive the translated segment folder
    #[serde(default = "SegmentConfig::default_translated_suffix")]
    pub translated_suffix: String,
}

impl SegmentConfig {
    pub const ENV_PREFIX: &'static str = "SEGMENT_";

    fn default_max_chars_per_file() -> usize {
        ChunkingConfig::DEFAULT_MAX_CHARS
    }
    fn default_search_window() -> usize {
        ChunkingConfig::DEFAULT_SEARCH_WINDOW
    }
    fn default_max_source_chars() -> usize {
        300_000
    }
    fn default_output_root() -> PathBuf {
        PathBuf::from("story")
    }
    fn default_separator() -> String {
        "\n\n".to_string()
    }
    fn default_merged_file_name() -> String {
        "merged.txt".to_string()
    }
    fn default_merged_suffix() -> String {
        "_merged".to_string()
    }
    fn default_translated_suffix() -> String {
        "_translated".to_string()
    }

    pub fn from_env() -> Result<Self> {
        let conf = envy::prefixed(Self::ENV_PREFIX)
            .from_env::<SegmentConfig>()
            .context("cannot read segment config from env:")?;
        conf.validate()?;
        Ok(conf)
    }

    /// Load from explicit key/value pairs (keys carry the `SEGMENT_` prefix)
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let conf = envy::prefixed(Self::ENV_PREFIX)
            .from_iter::<_, SegmentConfig>(vars)
            .context("cannot read segment config:")?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn chunking_config(&self, max_chars: Option<usize>) -> ChunkingConfig {
        ChunkingConfig {
            max_chars: max_chars.unwrap_or(self.max_chars_per_file),
            search_window: self.search_window,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.chunking_config(None)
            .validate()
            .map_err(|e| anyhow!("invalid segment config: {}", e))?;
        if self.max_source_chars == 0 {
            return Err(anyhow!(
                "invalid segment config: max_source_chars must be greater than 0"
            ));
        }
        if self.merged_file_name.trim().is_empty() {
            return Err(anyhow!(
                "invalid segment config: merged_file_name must not be empty"
            ));
        }
        Ok(())
    }
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            max_chars_per_file: Self::default_max_chars_per_file(),
            search_window: Self::default_search_window(),
            max_source_chars: Self::default_max_source_chars(),
            output_root: Self::default_output_root(),
            separator: Self::default_separator(),
            merged_file_name: Self::default_merged_file_name(),
            merged_suffix: Self::default_merged_suffix(),
            translated_suffix: Self::default_translated_suffix(),
        }
    }
}
