//! Splitting and writing the book.
//!
//! Drives stage 2 (split every discovered chapter) and stage 3 (write the
//! table of contents). [`prepare`] does all the work in memory and is what
//! `splitbook check` runs; [`generate`] additionally writes the files.
//!
//! ## Output Structure
//!
//! ```text
//! src/
//! ├── SUMMARY.md                    # Regenerated table of contents
//! ├── ch01.md                       # Untouched input
//! ├── ch01/
//! │   ├── README.md                 # Intro (text before the first ##)
//! │   ├── 1.1-overview.md           # One file per ## section
//! │   └── 1.2-getting-started.md
//! └── ch02/
//!     └── README.md                 # Chapter without sections
//! ```
//!
//! Output directories are created when missing and existing files are
//! overwritten, so re-running on the same input gives the same tree.

use crate::config::BookConfig;
use crate::scan::{self, Discovery, ScanError};
use crate::split::split_chapter;
use crate::summary::Summary;
use crate::types::{ChapterSource, SplitChapter};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read {}: {source}", .path.display())]
    ReadChapter {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// The split book, held in memory.
#[derive(Debug, Serialize)]
pub struct Prepared {
    pub chapters: Vec<SplitChapter>,
    pub summary: Summary,
}

/// What a build wrote.
#[derive(Debug, Serialize)]
pub struct BuildReport {
    pub chapters: Vec<SplitChapter>,
    pub summary: Summary,
    /// Path of the written table of contents.
    pub summary_path: PathBuf,
    /// Number of fragment files written.
    pub files_written: usize,
    /// Configuration the build ran with, stock defaults when there was no file.
    pub config: BookConfig,
}

/// Read and split one chapter, appending its block to `summary`.
pub fn process_chapter(
    source: &ChapterSource,
    config: &BookConfig,
    summary: &mut Summary,
) -> Result<SplitChapter, GenerateError> {
    let text = fs::read_to_string(&source.path).map_err(|e| GenerateError::ReadChapter {
        path: source.path.clone(),
        source: e,
    })?;
    let chapter = split_chapter(source, &text, config);
    summary.push_chapter(&chapter, config.part_for(chapter.number));
    Ok(chapter)
}

/// Split every discovered chapter in order. Nothing is written.
pub fn prepare(discovery: &Discovery, config: &BookConfig) -> Result<Prepared, GenerateError> {
    let mut summary = Summary::new(config);
    let chapters = discovery
        .chapters
        .iter()
        .map(|source| process_chapter(source, config, &mut summary))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Prepared { chapters, summary })
}

/// Write one chapter's fragments into `{root}/{dir_name}/`.
///
/// Returns the number of files written.
pub fn write_chapter(root: &Path, chapter: &SplitChapter) -> Result<usize, GenerateError> {
    let dir = root.join(&chapter.dir_name);
    fs::create_dir_all(&dir)?;
    let mut count = 0;
    for fragment in chapter.fragments() {
        fs::write(dir.join(&fragment.file_name), &fragment.content)?;
        count += 1;
    }
    Ok(count)
}

/// Write the table of contents to `{root}/{summary_file}`, overwriting.
pub fn write_summary(
    root: &Path,
    config: &BookConfig,
    summary: &Summary,
) -> Result<PathBuf, GenerateError> {
    let path = root.join(&config.summary_file);
    fs::write(&path, summary.render())?;
    Ok(path)
}

/// Split all chapters, write their fragments, then write the summary.
///
/// All chapters are read and split before the first write, so an unreadable
/// chapter leaves the output tree untouched.
pub fn generate(
    root: &Path,
    config: &BookConfig,
    discovery: &Discovery,
) -> Result<BuildReport, GenerateError> {
    let Prepared { chapters, summary } = prepare(discovery, config)?;

    let mut files_written = 0;
    for chapter in &chapters {
        files_written += write_chapter(root, chapter)?;
    }
    let summary_path = write_summary(root, config, &summary)?;

    Ok(BuildReport {
        chapters,
        summary,
        summary_path,
        files_written,
        config: config.clone(),
    })
}

/// Run the whole pipeline on a source directory: config, discovery, split, write.
///
/// This is what `splitbook build` runs.
pub fn build(root: &Path) -> Result<(Discovery, BuildReport), GenerateError> {
    let config = scan::load_config(root)?;
    let discovery = scan::discover(root, &config)?;
    let report = generate(root, &config, &discovery)?;
    Ok((discovery, report))
}
