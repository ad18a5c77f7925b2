//! CLI output formatting for all pipeline stages.
//!
//! Output is information-first: every chapter leads with its number and
//! display title, and file names follow as indented context, so a build log
//! doubles as a table of contents preview.
//!
//! # Output Format
//!
//! ## Discovery
//!
//! ```text
//! Chapters
//!     01 ch01.md
//!     03 ch03.md
//! Warning: skipped chapter-notes.md (expected ch<digits>.md)
//! ```
//!
//! ## Split / Check
//!
//! ```text
//! 01 Preface (2 sections) → ch01/
//!     README.md
//!     001 Multitasking on Small Devices → 1.1-multitasking-on-small-devices.md
//!     002 About the FreeRTOS Kernel → 1.2-about-the-freertos-kernel.md
//! Warning: ch06: "Examples" would overwrite examples.md, wrote examples-2.md
//! ```
//!
//! ## Build
//!
//! ```text
//! Wrote 5 chapters, 12 files, SUMMARY.md
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::config::BookConfig;
use crate::generate::BuildReport;
use crate::scan::Discovery;
use crate::types::SplitChapter;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Stage 1: Discovery output
// ============================================================================

/// Format the discovered chapters and skipped candidates.
pub fn format_discovery(discovery: &Discovery, config: &BookConfig) -> Vec<String> {
    let mut lines = vec!["Chapters".to_string()];
    if discovery.chapters.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for chapter in &discovery.chapters {
        lines.push(format!(
            "{}{:02} {}",
            indent(1),
            chapter.number,
            chapter.file_name
        ));
    }
    for name in &discovery.skipped {
        lines.push(format!(
            "Warning: skipped {} (expected {}<digits>.{})",
            name, config.chapters.prefix, config.chapters.extension
        ));
    }
    lines
}

pub fn print_discovery(discovery: &Discovery, config: &BookConfig) {
    for line in format_discovery(discovery, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Split output
// ============================================================================

/// Format split chapters: one header per chapter, one line per fragment,
/// then a warning for every disambiguated file name.
pub fn format_chapters(chapters: &[SplitChapter]) -> Vec<String> {
    let mut lines = Vec::new();
    for chapter in chapters {
        lines.push(format!(
            "{:02} {} ({}) → {}/",
            chapter.number,
            chapter.title,
            plural(chapter.sections.len(), "section"),
            chapter.dir_name
        ));
        lines.push(format!("{}{}", indent(1), chapter.intro.file_name));
        for (i, section) in chapter.sections.iter().enumerate() {
            lines.push(format!(
                "{}{} {} → {}",
                indent(1),
                format_index(i + 1),
                section.title,
                section.file_name
            ));
        }
        for collision in &chapter.collisions {
            lines.push(format!(
                "Warning: {}: \"{}\" would overwrite {}, wrote {}",
                chapter.dir_name, collision.heading, collision.wanted, collision.used
            ));
        }
    }
    lines
}

pub fn print_chapters(chapters: &[SplitChapter]) {
    for line in format_chapters(chapters) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 3: Build summary
// ============================================================================

/// Format the closing line of a build.
pub fn format_build_report(report: &BuildReport) -> Vec<String> {
    vec![format!(
        "Wrote {}, {}, {}",
        plural(report.chapters.len(), "chapter"),
        plural(report.files_written, "file"),
        report.config.summary_file
    )]
}

pub fn print_build_report(report: &BuildReport) {
    for line in format_build_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Format a fatal error for the terminal, using its `Display` message.
pub fn format_error(err: &dyn std::error::Error) -> String {
    format!("Error: {err}")
}

pub fn print_error(err: &dyn std::error::Error) {
    println!("{}", format_error(err));
}
