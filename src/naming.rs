//! Centralized name handling for headings and chapter files.
//!
//! Three conventions live here so every stage agrees on them:
//!
//! - **Numeric prefixes** on headings: `3.1 Task States` carries the dotted
//!   prefix `3.1`. Display titles drop it; filenames keep it.
//! - **Section filenames** derived from heading text by [`sanitize_filename`].
//! - **Chapter file names** like `ch07.md`, parsed by [`parse_chapter_file_name`].
//!
//! ## Grammar
//!
//! ```text
//! numeric-prefix := DIGIT+ ("." DIGIT+)*          regex: ^\d+(\.\d+)*
//! chapter-file   := PREFIX DIGIT+ "." EXTENSION   regex: ^{prefix}(\d+)\.{ext}$
//! ```
//!
//! ## Filenames
//!
//! - `3.1 Task States` → `3.1-task-states.md`
//! - `2.3 Queue Sets/Mailboxes` → `2.3-queue-sets-mailboxes.md`
//! - `Appendix: Tools` → `appendix-tools.md`

use regex::Regex;
use std::sync::LazyLock;

/// Leading dotted-numeric prefix plus any whitespace after it.
static NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)*)\s*").expect("valid regex"));

/// Filename used when a heading has neither a number nor any usable characters.
const FALLBACK_STEM: &str = "section";

/// Result of splitting a heading like `3.1 Task States`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedHeading {
    /// Dotted number prefix if present (e.g. `"3.1"`), verbatim.
    pub number: Option<String>,
    /// Heading text with the prefix removed and surrounding whitespace trimmed.
    pub title: String,
}

/// Split a heading into its numeric prefix and title.
///
/// - `"3.1 Task States"` → number=Some("3.1"), title="Task States"
/// - `"1 Introduction"` → number=Some("1"), title="Introduction"
/// - `"Appendix"` → number=None, title="Appendix"
/// - `"2.4"` → number=Some("2.4"), title=""
pub fn parse_heading(text: &str) -> ParsedHeading {
    let text = text.trim();
    match NUMBER_PREFIX.captures(text) {
        Some(caps) => ParsedHeading {
            number: Some(caps[1].to_string()),
            title: text[caps[0].len()..].trim().to_string(),
        },
        None => ParsedHeading {
            number: None,
            title: text.to_string(),
        },
    }
}

/// Heading text with any leading numeric prefix removed, for display.
pub fn strip_number_prefix(text: &str) -> String {
    parse_heading(text).title
}

/// Derive an output filename from heading text.
///
/// The numeric prefix is kept with its full dotted structure. The remaining
/// title has each whitespace or `/` character turned into `-`, loses every
/// character outside `[A-Za-z0-9-]`, and is lowercased.
pub fn sanitize_filename(heading: &str) -> String {
    let parsed = parse_heading(heading);
    let slug = slugify(&parsed.title);

    match (parsed.number, slug.is_empty()) {
        (Some(number), false) => format!("{number}-{slug}.md"),
        (Some(number), true) => format!("{number}.md"),
        (None, false) => format!("{slug}.md"),
        (None, true) => format!("{FALLBACK_STEM}.md"),
    }
}

/// Title portion of a sanitized filename.
pub fn slugify(title: &str) -> String {
    title
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() || c == '/' { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Parse a chapter file name of the form `{prefix}{digits}.{extension}`.
///
/// Returns the chapter number, or `None` when the name does not follow the
/// pattern exactly (`ch01.md` → `Some(1)`, `ch01-draft.md` → `None`).
pub fn parse_chapter_file_name(name: &str, prefix: &str, extension: &str) -> Option<u32> {
    let digits = name
        .strip_prefix(prefix)?
        .strip_suffix(extension)?
        .strip_suffix('.')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Whether a file name looks like it was meant to be a chapter file.
///
/// Candidates that fail [`parse_chapter_file_name`] are reported as skipped
/// rather than silently ignored.
pub fn is_chapter_candidate(name: &str, prefix: &str, extension: &str) -> bool {
    name.starts_with(prefix)
        && name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(extension))
}

/// Output directory name for a chapter: `{prefix}{NN}`, two-digit zero-padded.
pub fn chapter_dir_name(prefix: &str, number: u32) -> String {
    format!("{prefix}{number:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // parse_heading
    // =========================================================================

    #[test]
    fn heading_with_dotted_number() {
        let p = parse_heading("3.1 Task States");
        assert_eq!(p.number.as_deref(), Some("3.1"));
        assert_eq!(p.title, "Task States");
    }

    #[test]
    fn heading_with_integer_number() {
        let p = parse_heading("1 Introduction");
        assert_eq!(p.number.as_deref(), Some("1"));
        assert_eq!(p.title, "Introduction");
    }

    #[test]
    fn heading_with_deep_number() {
        let p = parse_heading("7.2.10 Stack Overflow Hooks");
        assert_eq!(p.number.as_deref(), Some("7.2.10"));
        assert_eq!(p.title, "Stack Overflow Hooks");
    }

    #[test]
    fn heading_without_number() {
        let p = parse_heading("Appendix");
        assert_eq!(p.number, None);
        assert_eq!(p.title, "Appendix");
    }

    #[test]
    fn heading_number_only() {
        let p = parse_heading("2.4");
        assert_eq!(p.number.as_deref(), Some("2.4"));
        assert_eq!(p.title, "");
    }

    #[test]
    fn heading_trailing_dot_not_part_of_number() {
        let p = parse_heading("4. Queues");
        assert_eq!(p.number.as_deref(), Some("4"));
        assert_eq!(p.title, ". Queues");
    }

    #[test]
    fn strip_prefix_for_display() {
        assert_eq!(strip_number_prefix("  3.1   Task States "), "Task States");
        assert_eq!(strip_number_prefix("Chapter 4"), "Chapter 4");
    }

    // =========================================================================
    // sanitize_filename
    // =========================================================================

    #[test]
    fn sanitize_numbered_heading() {
        assert_eq!(sanitize_filename("1.1 Overview"), "1.1-overview.md");
    }

    #[test]
    fn sanitize_slash_becomes_hyphen() {
        assert_eq!(
            sanitize_filename("2.3 Queue Sets/Mailboxes"),
            "2.3-queue-sets-mailboxes.md"
        );
    }

    #[test]
    fn sanitize_strips_punctuation() {
        assert_eq!(
            sanitize_filename("5.4 Using a Queue (Part 1): Basics!"),
            "5.4-using-a-queue-part-1-basics.md"
        );
    }

    #[test]
    fn sanitize_strips_non_ascii() {
        assert_eq!(
            sanitize_filename("1.2 FreeRTOS™ Kernel"),
            "1.2-freertos-kernel.md"
        );
    }

    #[test]
    fn sanitize_unnumbered_heading() {
        assert_eq!(sanitize_filename("Appendix Tools"), "appendix-tools.md");
    }

    #[test]
    fn sanitize_each_whitespace_char_becomes_hyphen() {
        assert_eq!(sanitize_filename("3.2 Task  States"), "3.2-task--states.md");
    }

    #[test]
    fn sanitize_number_only() {
        assert_eq!(sanitize_filename("2.4"), "2.4.md");
    }

    #[test]
    fn sanitize_no_usable_characters() {
        assert_eq!(sanitize_filename("???"), "section.md");
    }

    #[test]
    fn sanitize_is_deterministic() {
        let a = sanitize_filename("6.1 Interrupt Safe API");
        let b = sanitize_filename("6.1 Interrupt Safe API");
        assert_eq!(a, b);
    }

    #[test]
    fn slugify_is_idempotent() {
        for title in ["Queue Sets/Mailboxes", "Using a Queue (Part 1)", "Tick Hook"] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn sanitize_output_charset() {
        let name = sanitize_filename("9.9 Mixed_Case & Symbols / Slashes");
        let stem = name.strip_suffix(".md").unwrap();
        assert!(
            stem.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
        );
    }

    // =========================================================================
    // Chapter file names
    // =========================================================================

    #[test]
    fn chapter_file_zero_padded() {
        assert_eq!(parse_chapter_file_name("ch01.md", "ch", "md"), Some(1));
    }

    #[test]
    fn chapter_file_unpadded() {
        assert_eq!(parse_chapter_file_name("ch12.md", "ch", "md"), Some(12));
    }

    #[test]
    fn chapter_file_with_suffix_rejected() {
        assert_eq!(parse_chapter_file_name("ch01-draft.md", "ch", "md"), None);
    }

    #[test]
    fn chapter_file_without_digits_rejected() {
        assert_eq!(parse_chapter_file_name("chapter.md", "ch", "md"), None);
        assert_eq!(parse_chapter_file_name("ch.md", "ch", "md"), None);
    }

    #[test]
    fn chapter_file_wrong_extension_rejected() {
        assert_eq!(parse_chapter_file_name("ch01.txt", "ch", "md"), None);
    }

    #[test]
    fn candidate_detection() {
        assert!(is_chapter_candidate("ch01.md", "ch", "md"));
        assert!(is_chapter_candidate("chapter-notes.md", "ch", "md"));
        assert!(!is_chapter_candidate("SUMMARY.md", "ch", "md"));
        assert!(!is_chapter_candidate("ch01.txt", "ch", "md"));
    }

    #[test]
    fn chapter_dir_is_two_digit_padded() {
        assert_eq!(chapter_dir_name("ch", 3), "ch03");
        assert_eq!(chapter_dir_name("ch", 11), "ch11");
        assert_eq!(chapter_dir_name("ch", 104), "ch104");
    }
}
