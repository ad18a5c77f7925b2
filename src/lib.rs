//! # splitbook
//!
//! Restructures a book written as one markdown file per chapter into the
//! chapter/section layout mdBook expects, and regenerates `SUMMARY.md`.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Discover  src/chNN.md   →  [ChapterSource]     (which files, which order)
//! 2. Split     chapter text  →  src/chNN/*.md       (intro + one file per ## section)
//! 3. Summary   all chapters  →  src/SUMMARY.md      (nested link list)
//! ```
//!
//! Splitting is pure: [`split::split_chapter`] turns text into fragments
//! without touching the filesystem, and [`generate`] writes them. The
//! [`summary::Summary`] accumulator is owned by the driver and receives each
//! chapter in turn, then renders once at the end.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: finds `chNN.md` files, orders them by chapter number, reports malformed names |
//! | [`split`] | Stage 2: cuts a chapter at `## ` headings, derives titles and file names |
//! | [`rewrite`] | Media path correction and figure block centering applied to every fragment |
//! | [`summary`] | Stage 3: table of contents entries with part dividers |
//! | [`generate`] | Runs stages 2 and 3 and writes the output tree |
//! | [`naming`] | Heading number prefixes, filename sanitizing, chapter file names |
//! | [`config`] | Optional `splitbook.toml` loading, merging, and validation |
//! | [`types`] | Types shared between stages (`ChapterSource`, `Fragment`, `SplitChapter`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Numeric Chapter Order
//!
//! Chapters are sorted by the number in their file name, so `ch2.md` precedes
//! `ch10.md` whether or not the names are zero-padded.
//!
//! ## No Silent Overwrites
//!
//! Two sections in one chapter can sanitize to the same file name
//! (`## Examples` twice). The second gets `examples-2.md` and the run prints a
//! warning. Files that look like chapters but don't parse are also reported
//! instead of dropped.
//!
//! ## Regenerate, Don't Patch
//!
//! Every run rewrites every fragment and the summary from the chapter files.
//! The chapter files themselves are never modified, so the output tree can be
//! deleted and rebuilt at any time.

pub mod config;
pub mod generate;
pub mod naming;
pub mod output;
pub mod rewrite;
pub mod scan;
pub mod split;
pub mod summary;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
