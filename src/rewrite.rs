//! Text rewrites applied to every fragment before it is written.
//!
//! Fragments end up one directory deeper than the chapter file they came
//! from (`src/ch03.md` → `src/ch03/3.1-task-states.md`), so relative media
//! links need a `../`. Figure blocks are turned into a centered HTML block.
//!
//! ## Figure Blocks
//!
//! ```text
//! * * *                                   <div align="center">
//! ![](../media/image13.png)               <img src="../media/image13.png" alt="Figure 3.1 Task states"/>
//! ***Figure 3.1*** Task states      →
//! * * *                                   ***Figure 3.1*** *Task states*
//!                                         </div>
//! ```
//!
//! Grammar (whitespace between lines is tolerated, including blank lines and
//! `\r\n` line endings):
//!
//! ```text
//! divider  := "* * *"                      at line start
//! image    := "![](" PATH ")"              PATH has no ")" or line break
//! caption  := "***Figure" WS* NUMBER "***" WS* CAPTION
//!             NUMBER := \d+(\.\d+)*        CAPTION may wrap onto further lines
//! block    := divider NL image NL caption NL divider
//! ```
//!
//! Media paths are rewritten first, so the `src` in the output already
//! carries the `../` prefix.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static FIGURE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*\* \* \*\s*\n\s*!\[\]\(([^)\r\n]*)\)\s*\n\s*\*\*\*Figure\s*(\d+(?:\.\d+)*)\*\*\*\s*(?s:(.*?))\s*\n\s*\* \* \*",
    )
    .expect("valid regex")
});

/// Prefix every `](PREFIX...` link target with `../`.
///
/// Only targets that begin with `prefix` directly after `](` change; absolute
/// URLs, already-relative `../` targets and other directories are untouched.
pub fn rewrite_media_paths(text: &str, prefix: &str) -> String {
    let from = format!("]({prefix}");
    let to = format!("](../{prefix}");
    text.replace(&from, &to)
}

/// Replace every figure block with its centered HTML form.
///
/// Image path, figure number and caption are carried over verbatim.
pub fn rewrite_figure_blocks(text: &str) -> String {
    FIGURE_BLOCK
        .replace_all(text, |caps: &Captures| {
            render_figure(&caps[1], &caps[2], &caps[3])
        })
        .into_owned()
}

fn render_figure(path: &str, number: &str, caption: &str) -> String {
    format!(
        "<div align=\"center\">\n<img src=\"{path}\" alt=\"Figure {number} {caption}\"/>\n\n***Figure {number}*** *{caption}*\n</div>"
    )
}

/// Apply all rewrites to one fragment, media paths first.
pub fn rewrite_fragment(text: &str, media_prefix: &str) -> String {
    rewrite_figure_blocks(&rewrite_media_paths(text, media_prefix))
}
