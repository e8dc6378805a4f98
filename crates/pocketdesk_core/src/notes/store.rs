//! Note repository contract and directory-backed implementation.
//!
//! # Responsibility
//! - Persist one JSON document per note as `{dir}/{title}.json`.
//! - List stored notes newest first by re-scanning the directory.
//!
//! # Invariants
//! - Saves overwrite unconditionally; last writer wins, no locking.
//! - Files that fail to read or parse are skipped by listing, never surfaced.
//! - Titles that would escape the directory are rejected before any I/O.

use crate::notes::model::{sort_newest_first, Note, NoteSummary};
use log::{debug, error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

const NOTE_FILE_EXTENSION: &str = "json";

static INVALID_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).expect("valid title regex"));

pub type StoreResult<T> = Result<T, NoteStoreError>;

/// Repository error for note persistence.
#[derive(Debug)]
pub enum NoteStoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Title cannot be used as a file name.
    InvalidTitle(String),
    NotFound(String),
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "malformed note file `{}`: {source}", path.display())
            }
            Self::InvalidTitle(title) => write!(f, "invalid note title: `{title}`"),
            Self::NotFound(title) => write!(f, "note not found: `{title}`"),
        }
    }
}

impl Error for NoteStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidTitle(_) | Self::NotFound(_) => None,
        }
    }
}

/// Repository interface for note persistence.
pub trait NoteRepository {
    /// Writes `note`, replacing any note with the same title.
    fn save_note(&mut self, note: &Note) -> StoreResult<()>;
    /// Reads the note stored under `title`.
    fn load_note(&self, title: &str) -> StoreResult<Note>;
    /// Lists stored notes, newest `last_modified` first.
    fn list_notes(&self) -> StoreResult<Vec<NoteSummary>>;
}

/// Checks that `title` is usable as a file stem inside the notes directory.
pub fn validate_title(title: &str) -> StoreResult<()> {
    if title.trim().is_empty()
        || title == "."
        || title == ".."
        || INVALID_TITLE_RE.is_match(title)
    {
        return Err(NoteStoreError::InvalidTitle(title.to_string()));
    }
    Ok(())
}

/// Directory-scan note store. Every listing re-reads every file.
#[derive(Debug, Clone)]
pub struct FsNoteRepository {
    dir: PathBuf,
}

impl FsNoteRepository {
    /// Opens the store, creating `dir` when missing.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| {
            error!(
                "event=store_open module=notes status=error error_code=create_dir_failed error={}",
                source
            );
            NoteStoreError::Io {
                path: dir.clone(),
                source,
            }
        })?;
        info!("event=store_open module=notes status=ok");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for `title`, validated.
    pub fn note_path(&self, title: &str) -> StoreResult<PathBuf> {
        validate_title(title)?;
        Ok(self.dir.join(format!("{title}.{NOTE_FILE_EXTENSION}")))
    }
}

impl NoteRepository for FsNoteRepository {
    fn save_note(&mut self, note: &Note) -> StoreResult<()> {
        let started_at = Instant::now();
        let path = self.note_path(&note.title)?;
        let document = serde_json::to_string_pretty(note).map_err(|source| NoteStoreError::Json {
            path: path.clone(),
            source,
        })?;

        if let Err(source) = fs::write(&path, document.as_bytes()) {
            error!(
                "event=note_save module=notes status=error duration_ms={} error_code=write_failed error={}",
                started_at.elapsed().as_millis(),
                source
            );
            return Err(NoteStoreError::Io { path, source });
        }

        info!(
            "event=note_save module=notes status=ok duration_ms={} bytes={}",
            started_at.elapsed().as_millis(),
            document.len()
        );
        Ok(())
    }

    fn load_note(&self, title: &str) -> StoreResult<Note> {
        let path = self.note_path(title)?;
        let raw = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                NoteStoreError::NotFound(title.to_string())
            } else {
                NoteStoreError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        serde_json::from_str(&raw).map_err(|source| NoteStoreError::Json { path, source })
    }

    fn list_notes(&self) -> StoreResult<Vec<NoteSummary>> {
        let started_at = Instant::now();
        let entries = fs::read_dir(&self.dir).map_err(|source| NoteStoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut summaries = Vec::new();
        let mut skipped = 0usize;
        for entry in entries.flatten() {
            let path = entry.path();
            let is_note_file = path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(NOTE_FILE_EXTENSION);
            if !is_note_file {
                continue;
            }
            match read_summary(&path) {
                Ok(summary) => summaries.push(summary),
                Err(err) => {
                    skipped += 1;
                    debug!("event=note_list_skip module=notes status=skipped error={err}");
                }
            }
        }

        sort_newest_first(&mut summaries);
        debug!(
            "event=note_list module=notes status=ok duration_ms={} count={} skipped={}",
            started_at.elapsed().as_millis(),
            summaries.len(),
            skipped
        );
        Ok(summaries)
    }
}

fn read_summary(path: &Path) -> StoreResult<NoteSummary> {
    let raw = fs::read_to_string(path).map_err(|source| NoteStoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| NoteStoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}
