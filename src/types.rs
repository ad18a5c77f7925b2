//! Shared types passed between pipeline stages.
//!
//! Discovery produces [`ChapterSource`] values, the splitter turns each into a
//! [`SplitChapter`], and both the writer and the `check --json` output consume
//! the split form.

use serde::Serialize;
use std::path::PathBuf;

/// A chapter document found in the source directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterSource {
    /// Chapter number parsed from the file name (`ch07.md` → 7).
    pub number: u32,
    /// File name inside the source directory.
    pub file_name: String,
    /// Full path to the file.
    pub path: PathBuf,
}

/// One output document cut from a chapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fragment {
    /// Heading text without the `##` marker. Empty for the intro.
    pub heading: String,
    /// Display title for the table of contents (numeric prefix stripped).
    pub title: String,
    /// Output file name inside the chapter directory.
    pub file_name: String,
    /// Final file content, rewrites applied.
    #[serde(skip)]
    pub content: String,
}

/// A section whose sanitized file name was already taken in its chapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collision {
    pub heading: String,
    /// Name the sanitizer produced.
    pub wanted: String,
    /// Name actually used.
    pub used: String,
}

/// A chapter split into its intro and sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitChapter {
    pub number: u32,
    /// Source file name, for reporting.
    pub source_file: String,
    /// Output directory name relative to the source root (`ch07`).
    pub dir_name: String,
    /// Display title: first `#` heading without its number, or `Chapter N`.
    pub title: String,
    pub intro: Fragment,
    pub sections: Vec<Fragment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub collisions: Vec<Collision>,
}

impl SplitChapter {
    /// Intro followed by sections, in output order.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        std::iter::once(&self.intro).chain(self.sections.iter())
    }
}
