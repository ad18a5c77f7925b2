//! Table of contents (`SUMMARY.md`) accumulation.
//!
//! The driver owns one [`Summary`] and feeds it each chapter in processing
//! order. Nothing is written until [`Summary::render`] is called at the end.
//!
//! ## Output Format
//!
//! ```text
//! # Summary
//!
//! [Mastering the FreeRTOS™ Real Time Kernel](booktitle.md)
//! [List of Abbreviations](abbreviations.md)
//!
//! # Getting Started
//! - [Preface](ch01/README.md)
//!   - [Multitasking on Small Devices](ch01/1.1-multitasking-on-small-devices.md)
//!
//! - [The FreeRTOS Kernel Distribution](ch02/README.md)
//!
//! ```
//!
//! Chapter links are unindented list items, section links are indented one
//! level, and every chapter block ends with a blank line.

use crate::config::BookConfig;
use crate::types::SplitChapter;
use serde::Serialize;

/// One line of the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryEntry {
    /// `# Summary` document header.
    Title,
    /// Unnumbered `[title](path)` link before the chapters.
    FrontMatter { title: String, path: String },
    /// `# Title` divider grouping the chapters that follow.
    Part { title: String },
    /// `- [title](path)`
    Chapter { title: String, path: String },
    /// `  - [title](path)`
    Section { title: String, path: String },
    /// Blank line.
    Separator,
}

impl SummaryEntry {
    /// Render as a single markdown line.
    pub fn to_line(&self) -> String {
        match self {
            SummaryEntry::Title => "# Summary".to_string(),
            SummaryEntry::FrontMatter { title, path } => format!("[{title}]({path})"),
            SummaryEntry::Part { title } => format!("# {title}"),
            SummaryEntry::Chapter { title, path } => format!("- [{title}]({path})"),
            SummaryEntry::Section { title, path } => format!("  - [{title}]({path})"),
            SummaryEntry::Separator => String::new(),
        }
    }
}

/// Append-only table of contents.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    entries: Vec<SummaryEntry>,
}

impl Summary {
    /// Start a summary with the header and the configured front matter.
    pub fn new(config: &BookConfig) -> Self {
        let mut entries = vec![SummaryEntry::Title, SummaryEntry::Separator];
        entries.extend(
            config
                .front_matter
                .iter()
                .map(|link| SummaryEntry::FrontMatter {
                    title: link.title.clone(),
                    path: link.path.clone(),
                }),
        );
        entries.push(SummaryEntry::Separator);
        Self { entries }
    }

    /// Append one chapter block: optional part divider, chapter link, one
    /// link per section, blank separator.
    pub fn push_chapter(&mut self, chapter: &SplitChapter, part: Option<&str>) {
        if let Some(title) = part {
            self.entries.push(SummaryEntry::Part {
                title: title.to_string(),
            });
        }
        self.entries.push(SummaryEntry::Chapter {
            title: chapter.title.clone(),
            path: format!("{}/{}", chapter.dir_name, chapter.intro.file_name),
        });
        for section in &chapter.sections {
            self.entries.push(SummaryEntry::Section {
                title: section.title.clone(),
                path: format!("{}/{}", chapter.dir_name, section.file_name),
            });
        }
        self.entries.push(SummaryEntry::Separator);
    }

    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    /// Number of chapter-level entries.
    pub fn chapter_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, SummaryEntry::Chapter { .. }))
            .count()
    }

    /// Serialize all entries, one per line.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(SummaryEntry::to_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
