//! Note document model.
//!
//! # Responsibility
//! - Define the on-disk JSON shape of one note.
//! - Provide defaults for optional fields missing from older files.
//!
//! # Invariants
//! - Field names match the storage format exactly.
//! - `last_modified` uses `TIMESTAMP_FORMAT`, so string order is time order.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BG_COLOR: &str = "#FFFFFF";
pub const DEFAULT_FONT_COLOR: &str = "#000000";
pub const DEFAULT_FONT_SIZE: u32 = 12;
/// Local-time format of `last_modified`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const LAST_MODIFIED_PREFIX: &str = "Last Modified:";

/// One persisted note. Stored as `{title}.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Expected to match the file stem; not enforced.
    pub title: String,
    pub content: String,
    #[serde(default = "default_bg_color")]
    pub bg_color: String,
    #[serde(default = "default_font_color")]
    pub font_color: String,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default)]
    pub last_modified: String,
}

impl Note {
    pub fn style(&self) -> NoteStyle {
        NoteStyle {
            bg_color: self.bg_color.clone(),
            font_color: self.font_color.clone(),
        }
    }

    /// Parsed `last_modified`, `None` when missing or malformed.
    pub fn modified_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.last_modified, TIMESTAMP_FORMAT).ok()
    }
}

/// Editor colors saved with a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteStyle {
    pub bg_color: String,
    pub font_color: String,
}

impl NoteStyle {
    pub fn new(bg_color: impl Into<String>, font_color: impl Into<String>) -> Self {
        Self {
            bg_color: bg_color.into(),
            font_color: font_color.into(),
        }
    }
}

impl Default for NoteStyle {
    fn default() -> Self {
        Self::new(DEFAULT_BG_COLOR, DEFAULT_FONT_COLOR)
    }
}

/// Title and timestamp of one stored note, as used for listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NoteSummary {
    pub title: String,
    #[serde(default)]
    pub last_modified: String,
}

impl From<&Note> for NoteSummary {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            last_modified: note.last_modified.clone(),
        }
    }
}

/// Orders summaries newest first, then by title.
pub fn sort_newest_first(summaries: &mut [NoteSummary]) {
    summaries.sort_by(|a, b| {
        b.last_modified
            .cmp(&a.last_modified)
            .then_with(|| a.title.cmp(&b.title))
    });
}

/// Label text for the "last modified" info bar.
///
/// `None` renders the placeholder dash; unparsable timestamps are shown
/// without a weekday.
pub fn last_modified_label(last_modified: Option<&str>) -> String {
    match last_modified {
        None => format!("{LAST_MODIFIED_PREFIX} —"),
        Some(raw) => match NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT) {
            Ok(parsed) => format!("{LAST_MODIFIED_PREFIX} {raw} ({})", parsed.format("%A")),
            Err(_) => format!("{LAST_MODIFIED_PREFIX} {raw}"),
        },
    }
}

fn default_bg_color() -> String {
    DEFAULT_BG_COLOR.to_string()
}

fn default_font_color() -> String {
    DEFAULT_FONT_COLOR.to_string()
}

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}
