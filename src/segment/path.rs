//! Path resolution for segment folders and merged outputs

use super::error::{Result, SegmentError};
use std::path::{Component, Path, PathBuf};

/// Resolve a path against the current working directory if it is relative
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|e| SegmentError::io("Cannot resolve current directory", e))?;
    Ok(cwd.join(path))
}

/// Folder name derived from a source file: its file name without extension
pub fn folder_name_from(source: &Path) -> Option<String> {
    source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}

/// Accept a caller-supplied folder name only if it is a single plain path component
pub fn sanitize_folder_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SegmentError::InvalidFolderName("empty name".to_string()));
    }

    let mut components = Path::new(trimmed).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) => Ok(part.to_string_lossy().into_owned()),
        _ => Err(SegmentError::InvalidFolderName(format!(
            "must be a single directory name: {}",
            name
        ))),
    }
}

/// Output root chosen for a source file when the caller gives none.
///
/// Files under a `story/.../input/...` tree go to `story/output`, anything
/// else to an `output` directory next to the file.
pub fn auto_output_root(source: &Path) -> PathBuf {
    let has_component = |wanted: &str| {
        source
            .components()
            .any(|c| matches!(c, Component::Normal(part) if part == wanted))
    };
    if has_component("story") && has_component("input") {
        return PathBuf::from("story").join("output");
    }
    source
        .parent()
        .map(|parent| parent.join("output"))
        .unwrap_or_else(|| PathBuf::from("output"))
}

/// Sibling of `folder` named after it with `suffix` appended,
/// e.g. `story/a` + `_merged` + `txt` -> `story/a_merged.txt`
pub fn sibling_with_suffix(folder: &Path, suffix: &str, extension: Option<&str>) -> PathBuf {
    let name = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match extension {
        Some(ext) => format!("{name}{suffix}.{ext}"),
        None => format!("{name}{suffix}"),
    };
    match folder.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolutize() {
        let abs = absolutize(Path::new("story/output")).unwrap();
        assert!(abs.is_absolute());
        assert!(abs.ends_with("story/output"));

        let already = std::env::temp_dir();
        assert_eq!(absolutize(&already).unwrap(), already);
    }

    #[test]
    fn test_folder_name_from() {
        assert_eq!(
            folder_name_from(Path::new("story/input/tale.txt")),
            Some("tale".to_string())
        );
        assert_eq!(
            folder_name_from(Path::new("/data/book")),
            Some("book".to_string())
        );
        assert_eq!(folder_name_from(Path::new("/")), None);
    }

    #[test]
    fn test_sanitize_folder_name() {
        assert_eq!(sanitize_folder_name("my_story").unwrap(), "my_story");
        assert_eq!(sanitize_folder_name(" spaced ").unwrap(), "spaced");
        assert!(sanitize_folder_name("").is_err());
        assert!(sanitize_folder_name("..").is_err());
        assert!(sanitize_folder_name("a/b").is_err());
        assert!(sanitize_folder_name("/abs").is_err());
        assert!(matches!(
            sanitize_folder_name("../escape"),
            Err(SegmentError::InvalidFolderName(_))
        ));
    }

    #[test]
    fn test_auto_output_root() {
        assert_eq!(
            auto_output_root(Path::new("/home/u/story/input/tale.txt")),
            PathBuf::from("story/output")
        );
        assert_eq!(
            auto_output_root(Path::new("/home/u/books/tale.txt")),
            PathBuf::from("/home/u/books/output")
        );
        // "story" alone is not enough
        assert_eq!(
            auto_output_root(Path::new("/srv/story/tale.txt")),
            PathBuf::from("/srv/story/output")
        );
    }

    #[test]
    fn test_sibling_with_suffix() {
        assert_eq!(
            sibling_with_suffix(Path::new("/srv/story/tale"), "_merged", Some("txt")),
            PathBuf::from("/srv/story/tale_merged.txt")
        );
        assert_eq!(
            sibling_with_suffix(Path::new("/srv/story/tale"), "_translated", None),
            PathBuf::from("/srv/story/tale_translated")
        );
        assert_eq!(
            sibling_with_suffix(Path::new("tale"), "_merged", Some("txt")),
            PathBuf::from("tale_merged.txt")
        );
    }
}
