//! Chapter splitting.
//!
//! Stage 2 of the pipeline. Cuts one chapter document into an introduction
//! and one fragment per second-level section, derives titles and file names,
//! and applies the [`rewrite`](crate::rewrite) transforms. Everything here is
//! pure; [`generate`](crate::generate) does the writing.
//!
//! ## Grammar
//!
//! ```text
//! section-heading := "##" [ \t]+ TEXT          regex: (?m)^##[ \t]+(\S[^\n]*)$
//! chapter-heading := "#"  [ \t]+ TEXT          regex: (?m)^#[ \t]+(\S[^\n]*)$
//! ```
//!
//! Exactly two `#` make a section: `###` and deeper stay inside the section
//! body. Heading-looking lines inside fenced code blocks are ignored, which
//! matters for shell snippets full of `## comment` lines.
//!
//! ## Layout
//!
//! ```text
//! ch03.md                          ch03/
//! ├── # 3 Task Management          ├── README.md          (intro, title "Task Management")
//! │   intro text                   │
//! ├── ## 3.1 Task Functions        ├── 3.1-task-functions.md
//! │   ...                          │
//! └── ## 3.2 Task States           └── 3.2-task-states.md
//! ```

use crate::config::BookConfig;
use crate::naming::{chapter_dir_name, sanitize_filename, strip_number_prefix};
use crate::rewrite::rewrite_fragment;
use crate::types::{ChapterSource, Collision, Fragment, SplitChapter};
use pulldown_cmark::{Event, Parser, Tag};
use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

static SECTION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##[ \t]+(\S[^\n]*)$").expect("valid regex"));

static CHAPTER_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(\S[^\n]*)$").expect("valid regex"));

/// A section as it appears in the source, before any rewriting.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSection<'a> {
    /// Heading text without the `##` marker, trimmed.
    pub heading: &'a str,
    /// The full heading line, trimmed.
    pub line: &'a str,
    /// Everything after the heading line up to the next section, untrimmed.
    pub body: &'a str,
}

/// A chapter cut at its section headings.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<'a> {
    /// Text before the first section heading, untrimmed.
    pub intro: &'a str,
    pub sections: Vec<RawSection<'a>>,
}

/// Byte ranges of fenced and indented code blocks.
fn code_block_ranges(text: &str) -> Vec<Range<usize>> {
    Parser::new(text)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(_)) => Some(range),
            _ => None,
        })
        .collect()
}

fn in_code(ranges: &[Range<usize>], offset: usize) -> bool {
    ranges.iter().any(|r| r.contains(&offset))
}

/// Cut `text` at every section heading outside code blocks.
///
/// `intro` plus each section's `line` and `body`, in order, cover the whole
/// input apart from the line breaks separating them.
pub fn partition(text: &str) -> Partition<'_> {
    let code = code_block_ranges(text);
    let headings: Vec<(usize, usize, &str)> = SECTION_HEADING
        .captures_iter(text)
        .filter_map(|caps| {
            let line = caps.get(0)?;
            let heading = caps.get(1)?;
            (!in_code(&code, line.start())).then(|| (line.start(), line.end(), heading.as_str()))
        })
        .collect();

    let intro_end = headings.first().map(|h| h.0).unwrap_or(text.len());
    let sections = headings
        .iter()
        .enumerate()
        .map(|(i, &(start, line_end, heading))| {
            let next = headings.get(i + 1).map(|h| h.0).unwrap_or(text.len());
            RawSection {
                heading: heading.trim(),
                line: text[start..line_end].trim(),
                body: &text[line_end..next],
            }
        })
        .collect();

    Partition {
        intro: &text[..intro_end],
        sections,
    }
}

/// Display title from the first `# ` heading in the intro.
///
/// The numeric prefix is stripped (`3 Task Management` → `Task Management`).
/// Falls back to `Chapter N` when there is no heading or nothing is left
/// after stripping.
pub fn chapter_title(intro: &str, number: u32) -> String {
    let code = code_block_ranges(intro);
    CHAPTER_HEADING
        .captures_iter(intro)
        .filter_map(|caps| {
            let line = caps.get(0)?;
            (!in_code(&code, line.start())).then(|| strip_number_prefix(&caps[1]))
        })
        .find(|title| !title.is_empty())
        .unwrap_or_else(|| format!("Chapter {number}"))
}

/// File content: trimmed text with a single trailing newline.
fn finish(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        String::new()
    } else {
        format!("{text}\n")
    }
}

/// Pick a file name not yet used in this chapter.
///
/// Comparison ignores ASCII case so the result is also safe on
/// case-insensitive filesystems. Later duplicates get `-2`, `-3`, ...
fn claim_file_name(wanted: &str, taken: &mut HashSet<String>) -> String {
    if taken.insert(wanted.to_ascii_lowercase()) {
        return wanted.to_string();
    }
    let stem = wanted.strip_suffix(".md").unwrap_or(wanted);
    (2..)
        .map(|n| format!("{stem}-{n}.md"))
        .find(|candidate| taken.insert(candidate.to_ascii_lowercase()))
        .unwrap_or_else(|| wanted.to_string())
}

/// Split one chapter into its intro and section fragments.
pub fn split_chapter(source: &ChapterSource, text: &str, config: &BookConfig) -> SplitChapter {
    let parts = partition(text);
    let media = &config.media.prefix;

    let title = chapter_title(parts.intro, source.number);
    let intro = Fragment {
        heading: String::new(),
        title: title.clone(),
        file_name: config.intro_file.clone(),
        content: finish(&rewrite_fragment(parts.intro.trim(), media)),
    };

    let mut taken = HashSet::from([config.intro_file.to_ascii_lowercase()]);
    let mut collisions = Vec::new();
    let mut sections = Vec::with_capacity(parts.sections.len());

    for raw in &parts.sections {
        let wanted = sanitize_filename(raw.heading);
        let file_name = claim_file_name(&wanted, &mut taken);
        if file_name != wanted {
            collisions.push(Collision {
                heading: raw.heading.to_string(),
                wanted,
                used: file_name.clone(),
            });
        }

        let body = raw.body.trim();
        let joined = if body.is_empty() {
            raw.line.to_string()
        } else {
            format!("{}\n\n{}", raw.line, body)
        };

        let display = strip_number_prefix(raw.heading);
        sections.push(Fragment {
            heading: raw.heading.to_string(),
            title: if display.is_empty() {
                raw.heading.to_string()
            } else {
                display
            },
            file_name,
            content: finish(&rewrite_fragment(&joined, media)),
        });
    }

    SplitChapter {
        number: source.number,
        source_file: source.file_name.clone(),
        dir_name: chapter_dir_name(&config.chapters.prefix, source.number),
        title,
        intro,
        sections,
        collisions,
    }
}
