//! Book configuration module.
//!
//! Handles loading, validating, and merging the optional `splitbook.toml`
//! placed in the book source directory. Every option has a default, and the
//! defaults reproduce the stock layout (chapters named `chNN.md`, media under
//! `media/`, the standard front matter and part dividers), so most books need
//! no config file at all.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! summary_file = "SUMMARY.md"   # Table of contents written at the source root
//! intro_file = "README.md"      # Chapter introduction file inside each chNN/
//!
//! [chapters]
//! prefix = "ch"                 # Chapter files are {prefix}{digits}.{extension}
//! extension = "md"
//!
//! [media]
//! prefix = "media/"             # Link targets rewritten to ../media/
//!
//! [[front_matter]]
//! title = "Mastering the FreeRTOS™ Real Time Kernel"
//! path = "booktitle.md"
//!
//! [[front_matter]]
//! title = "List of Abbreviations"
//! path = "abbreviations.md"
//!
//! [[parts]]
//! chapter = 1
//! title = "Getting Started"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want. Array tables
//! (`front_matter`, `parts`) replace the defaults as a whole.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the optional config file inside the source directory.
pub const CONFIG_FILE: &str = "splitbook.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Book configuration loaded from `splitbook.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookConfig {
    /// Table of contents file written at the source root.
    pub summary_file: String,
    /// Introduction file name inside each chapter directory.
    pub intro_file: String,
    /// Chapter file naming.
    pub chapters: ChaptersConfig,
    /// Media path rewriting.
    pub media: MediaConfig,
    /// Links listed at the top of the summary, before any chapter.
    pub front_matter: Vec<SummaryLink>,
    /// Part dividers inserted before specific chapters.
    pub parts: Vec<PartDivider>,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            summary_file: "SUMMARY.md".to_string(),
            intro_file: "README.md".to_string(),
            chapters: ChaptersConfig::default(),
            media: MediaConfig::default(),
            front_matter: vec![
                SummaryLink {
                    title: "Mastering the FreeRTOS™ Real Time Kernel".to_string(),
                    path: "booktitle.md".to_string(),
                },
                SummaryLink {
                    title: "List of Abbreviations".to_string(),
                    path: "abbreviations.md".to_string(),
                },
            ],
            parts: vec![
                PartDivider::new(1, "Getting Started"),
                PartDivider::new(3, "Core Kernel Concepts"),
                PartDivider::new(5, "Kernel Objects and Communication"),
                PartDivider::new(11, "Advanced Topics"),
            ],
        }
    }
}

impl BookConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chapters.prefix.is_empty() {
            return Err(ConfigError::Validation(
                "chapters.prefix must not be empty".into(),
            ));
        }
        if self.chapters.extension.is_empty() || self.chapters.extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "chapters.extension must be non-empty and without a leading dot".into(),
            ));
        }
        if self.intro_file.is_empty() || self.intro_file.contains('/') {
            return Err(ConfigError::Validation(
                "intro_file must be a plain file name".into(),
            ));
        }
        if self.summary_file.is_empty() || self.summary_file.contains('/') {
            return Err(ConfigError::Validation(
                "summary_file must be a plain file name".into(),
            ));
        }
        if !self.media.prefix.ends_with('/') || self.media.prefix.starts_with('/') {
            return Err(ConfigError::Validation(
                "media.prefix must be a relative directory ending in '/'".into(),
            ));
        }
        let mut seen = HashSet::new();
        for part in &self.parts {
            if part.chapter == 0 {
                return Err(ConfigError::Validation(
                    "parts.chapter must be a positive chapter number".into(),
                ));
            }
            if !seen.insert(part.chapter) {
                return Err(ConfigError::Validation(format!(
                    "parts: chapter {} has more than one divider",
                    part.chapter
                )));
            }
        }
        Ok(())
    }

    /// Part divider title registered for a chapter, if any.
    pub fn part_for(&self, chapter: u32) -> Option<&str> {
        self.parts
            .iter()
            .find(|p| p.chapter == chapter)
            .map(|p| p.title.as_str())
    }
}

/// Chapter file naming: `{prefix}{digits}.{extension}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChaptersConfig {
    pub prefix: String,
    pub extension: String,
}

impl Default for ChaptersConfig {
    fn default() -> Self {
        Self {
            prefix: "ch".to_string(),
            extension: "md".to_string(),
        }
    }
}

/// Media path rewriting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaConfig {
    /// Relative link prefix that gains a `../` once fragments move into `chNN/`.
    pub prefix: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            prefix: "media/".to_string(),
        }
    }
}

/// A plain `[title](path)` link in the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryLink {
    pub title: String,
    pub path: String,
}

/// A `# Title` line placed before the given chapter in the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartDivider {
    pub chapter: u32,
    pub title: String,
}

impl PartDivider {
    fn new(chapter: u32, title: &str) -> Self {
        Self {
            chapter,
            title: title.to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(BookConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Layer a user `splitbook.toml` over the stock defaults.
///
/// `[chapters]` and `[media]` merge key by key, so a file setting only
/// `chapters.extension` keeps the stock `ch` prefix. `front_matter` and
/// `parts` are arrays and replace the stock lists whole: a book declaring one
/// part divider gets exactly that divider, without the FreeRTOS ones.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut merged), toml::Value::Table(user)) => {
            for (key, value) in user {
                let value = match merged.remove(&key) {
                    Some(stock) => merge_toml(stock, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            toml::Value::Table(merged)
        }
        (_, replacement) => replacement,
    }
}

/// Load `splitbook.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<BookConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BookConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `splitbook.toml` in the given directory, or defaults.
pub fn load_config(dir: &Path) -> Result<BookConfig, ConfigError> {
    resolve_config(load_raw_config(dir)?)
}

/// Returns a fully-commented stock `splitbook.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# splitbook configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the book source directory (next to ch01.md).
# Unknown keys will cause an error.

# Table of contents written at the root of the source directory.
summary_file = "SUMMARY.md"

# Introduction file written inside each chapter directory.
intro_file = "README.md"

# ---------------------------------------------------------------------------
# Chapter files
# ---------------------------------------------------------------------------
[chapters]
# Chapter files are named {prefix}{digits}.{extension}, e.g. ch07.md.
# Output directories are {prefix}{NN}, e.g. ch07/.
prefix = "ch"
extension = "md"

# ---------------------------------------------------------------------------
# Media
# ---------------------------------------------------------------------------
[media]
# Link and image targets starting with this prefix gain a "../" because the
# split files live one directory deeper than the chapter files.
prefix = "media/"

# ---------------------------------------------------------------------------
# Front matter: links listed before the first chapter in SUMMARY.md.
# Setting any entry replaces the whole list.
# ---------------------------------------------------------------------------
[[front_matter]]
title = "Mastering the FreeRTOS™ Real Time Kernel"
path = "booktitle.md"

[[front_matter]]
title = "List of Abbreviations"
path = "abbreviations.md"

# ---------------------------------------------------------------------------
# Part dividers: "# Title" lines placed before a chapter in SUMMARY.md.
# Setting any entry replaces the whole list.
# ---------------------------------------------------------------------------
[[parts]]
chapter = 1
title = "Getting Started"

[[parts]]
chapter = 3
title = "Core Kernel Concepts"

[[parts]]
chapter = 5
title = "Kernel Objects and Communication"

[[parts]]
chapter = 11
title = "Advanced Topics"
"##
}
