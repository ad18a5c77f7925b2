//! Chapter discovery.
//!
//! Stage 1 of the pipeline. Lists the source directory and picks out chapter
//! documents by name.
//!
//! ## Directory Structure
//!
//! ```text
//! src/                         # Source root (--source)
//! ├── splitbook.toml           # Optional configuration
//! ├── booktitle.md             # Front matter (ignored by discovery)
//! ├── abbreviations.md
//! ├── media/                   # Images referenced as media/...
//! ├── ch01.md                  # Chapter 1
//! ├── ch02.md
//! ├── ch10.md                  # Sorted after ch02 (numeric order)
//! ├── chapter-notes.md         # Looks like a chapter, doesn't parse → skipped with warning
//! └── ch01/                    # Output of a previous run (directories are ignored)
//! ```
//!
//! ## Rules
//!
//! - A file is a *candidate* when it starts with the chapter prefix and has
//!   the chapter extension. Candidates must be `{prefix}{digits}.{extension}`;
//!   the rest are reported in [`Discovery::skipped`].
//! - Chapters are ordered by number, not by file name, so `ch2.md` comes
//!   before `ch10.md` with or without zero padding.
//! - Two files with the same chapter number (`ch1.md`, `ch01.md`) would write
//!   the same output directory and are rejected.

use crate::config::{self, BookConfig};
use crate::naming::{is_chapter_candidate, parse_chapter_file_name};
use crate::types::ChapterSource;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Source directory not found: {0}")]
    MissingSource(PathBuf),
    #[error("Chapter {0} appears twice: {1} and {2}")]
    DuplicateChapter(u32, String, String),
}

/// Result of scanning the source directory.
#[derive(Debug, Serialize)]
pub struct Discovery {
    /// Chapters in processing order (ascending chapter number).
    pub chapters: Vec<ChapterSource>,
    /// Candidate file names that did not match the chapter pattern.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

/// Fail unless `source` is an existing directory.
pub fn ensure_source(source: &Path) -> Result<(), ScanError> {
    if source.is_dir() {
        Ok(())
    } else {
        Err(ScanError::MissingSource(source.to_path_buf()))
    }
}

/// Load the book config from the source directory after checking it exists.
pub fn load_config(source: &Path) -> Result<BookConfig, ScanError> {
    ensure_source(source)?;
    Ok(config::load_config(source)?)
}

/// Find chapter documents in `source`.
pub fn discover(source: &Path, config: &BookConfig) -> Result<Discovery, ScanError> {
    ensure_source(source)?;

    let prefix = &config.chapters.prefix;
    let extension = &config.chapters.extension;

    let mut names: Vec<String> = fs::read_dir(source)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| !name.starts_with('.') && is_chapter_candidate(name, prefix, extension))
        .collect();
    names.sort();

    let mut by_number: BTreeMap<u32, ChapterSource> = BTreeMap::new();
    let mut skipped = Vec::new();

    for name in names {
        let Some(number) = parse_chapter_file_name(&name, prefix, extension) else {
            skipped.push(name);
            continue;
        };
        if let Some(existing) = by_number.get(&number) {
            return Err(ScanError::DuplicateChapter(
                number,
                existing.file_name.clone(),
                name,
            ));
        }
        by_number.insert(
            number,
            ChapterSource {
                number,
                path: source.join(&name),
                file_name: name,
            },
        );
    }

    Ok(Discovery {
        chapters: by_number.into_values().collect(),
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn numbers(discovery: &Discovery) -> Vec<u32> {
        discovery.chapters.iter().map(|c| c.number).collect()
    }

    #[test]
    fn missing_source_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = discover(&tmp.path().join("nope"), &BookConfig::default());
        assert!(matches!(result, Err(ScanError::MissingSource(_))));
    }

    #[test]
    fn source_that_is_a_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("src");
        fs::write(&file, "not a dir").unwrap();
        assert!(matches!(
            discover(&file, &BookConfig::default()),
            Err(ScanError::MissingSource(_))
        ));
    }

    #[test]
    fn empty_source_has_no_chapters() {
        let tmp = TempDir::new().unwrap();
        let discovery = discover(tmp.path(), &BookConfig::default()).unwrap();
        assert!(discovery.chapters.is_empty());
        assert!(discovery.skipped.is_empty());
    }

    #[test]
    fn chapters_sorted_numerically() {
        let tmp = TempDir::new().unwrap();
        for name in ["ch10.md", "ch2.md", "ch01.md", "ch03.md"] {
            fs::write(tmp.path().join(name), "# x").unwrap();
        }
        let discovery = discover(tmp.path(), &BookConfig::default()).unwrap();
        assert_eq!(numbers(&discovery), vec![1, 2, 3, 10]);
        assert_eq!(discovery.chapters[1].file_name, "ch2.md");
        assert_eq!(discovery.chapters[1].path, tmp.path().join("ch2.md"));
    }

    #[test]
    fn non_chapter_files_ignored_silently() {
        let tmp = TempDir::new().unwrap();
        for name in ["SUMMARY.md", "booktitle.md", "abbreviations.md", "ch01.md", "notes.txt"] {
            fs::write(tmp.path().join(name), "x").unwrap();
        }
        let discovery = discover(tmp.path(), &BookConfig::default()).unwrap();
        assert_eq!(numbers(&discovery), vec![1]);
        assert!(discovery.skipped.is_empty());
    }

    #[test]
    fn malformed_candidates_reported() {
        let tmp = TempDir::new().unwrap();
        for name in ["ch01.md", "ch01-draft.md", "chapter-notes.md"] {
            fs::write(tmp.path().join(name), "x").unwrap();
        }
        let discovery = discover(tmp.path(), &BookConfig::default()).unwrap();
        assert_eq!(numbers(&discovery), vec![1]);
        assert_eq!(discovery.skipped, vec!["ch01-draft.md", "chapter-notes.md"]);
    }

    #[test]
    fn output_directories_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("ch01.md"), "x").unwrap();
        fs::create_dir_all(tmp.path().join("ch01")).unwrap();
        fs::create_dir_all(tmp.path().join("ch02.md")).unwrap();
        let discovery = discover(tmp.path(), &BookConfig::default()).unwrap();
        assert_eq!(numbers(&discovery), vec![1]);
    }

    #[test]
    fn hidden_files_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".ch01.md"), "x").unwrap();
        let discovery = discover(tmp.path(), &BookConfig::default()).unwrap();
        assert!(discovery.chapters.is_empty());
    }

    #[test]
    fn duplicate_chapter_number_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("ch1.md"), "x").unwrap();
        fs::write(tmp.path().join("ch01.md"), "x").unwrap();
        let result = discover(tmp.path(), &BookConfig::default());
        assert!(matches!(result, Err(ScanError::DuplicateChapter(1, _, _))));
    }

    #[test]
    fn custom_prefix_and_extension() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("chapter3.markdown"), "x").unwrap();
        fs::write(tmp.path().join("ch01.md"), "x").unwrap();
        let mut config = BookConfig::default();
        config.chapters.prefix = "chapter".to_string();
        config.chapters.extension = "markdown".to_string();
        let discovery = discover(tmp.path(), &config).unwrap();
        assert_eq!(numbers(&discovery), vec![3]);
    }

    #[test]
    fn fixtures_discovered_in_numeric_order() {
        let tmp = setup_fixtures();
        let discovery = discover(tmp.path(), &BookConfig::default()).unwrap();
        assert_eq!(numbers(&discovery), vec![1, 2, 3, 5, 11]);
        assert_eq!(discovery.skipped, vec!["chapter-notes.md"]);
    }

    #[test]
    fn load_config_requires_source() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            load_config(&tmp.path().join("missing")),
            Err(ScanError::MissingSource(_))
        ));
        assert!(load_config(tmp.path()).is_ok());
    }
}
