//! Note use-case service.
//!
//! # Responsibility
//! - Validate save requests and synthesize titles for untitled notes.
//! - Stamp `last_modified` at write time.
//! - Expose title listing and single-note loading to controllers.
//!
//! # Invariants
//! - Whitespace-only content is never written.
//! - Saved content is trimmed; a blank title becomes `note_%Y%m%d_%H%M%S`.

use crate::notes::clock::{Clock, SystemClock};
use crate::notes::model::{Note, NoteStyle, TIMESTAMP_FORMAT};
use crate::notes::store::{NoteRepository, NoteStoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Warning shown when saving a note with no content.
pub const EMPTY_NOTE_WARNING: &str = "Write something before saving.";
const SYNTHESIZED_TITLE_FORMAT: &str = "note_%Y%m%d_%H%M%S";

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Save rejected because the content is empty after trimming.
    EmptyContent,
    /// Persistence-layer failure.
    Store(NoteStoreError),
}

impl NoteServiceError {
    /// Whether the error is meant to be shown to the user as a warning.
    pub fn is_user_warning(&self) -> bool {
        matches!(self, Self::EmptyContent)
    }
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => f.write_str(EMPTY_NOTE_WARNING),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::EmptyContent => None,
        }
    }
}

impl From<NoteStoreError> for NoteServiceError {
    fn from(value: NoteStoreError) -> Self {
        Self::Store(value)
    }
}

/// Input for one save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    /// Blank means "synthesize from the current time".
    pub title: String,
    pub content: String,
    pub style: NoteStyle,
    pub font_size: u32,
}

/// Note service facade over a repository and a clock.
pub struct NoteService<R: NoteRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service stamping notes with local wall-clock time.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: NoteRepository, C: Clock> NoteService<R, C> {
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Saves a note, overwriting any note stored under the same title.
    pub fn save_note(&mut self, request: SaveRequest) -> Result<Note, NoteServiceError> {
        let content = request.content.trim();
        if content.is_empty() {
            warn!("event=note_save module=notes status=rejected reason=empty_content");
            return Err(NoteServiceError::EmptyContent);
        }

        let now = self.clock.now();
        let title = match request.title.trim() {
            "" => now.format(SYNTHESIZED_TITLE_FORMAT).to_string(),
            given => given.to_string(),
        };

        let note = Note {
            title,
            content: content.to_string(),
            bg_color: request.style.bg_color,
            font_color: request.style.font_color,
            font_size: request.font_size,
            last_modified: now.format(TIMESTAMP_FORMAT).to_string(),
        };
        self.repo.save_note(&note)?;
        Ok(note)
    }

    /// Lists stored titles, newest first.
    pub fn list_titles(&self) -> Result<Vec<String>, NoteServiceError> {
        let summaries = self.repo.list_notes()?;
        Ok(summaries.into_iter().map(|summary| summary.title).collect())
    }

    /// Loads the note stored under `title`.
    pub fn load_note(&self, title: &str) -> Result<Note, NoteServiceError> {
        let note = self.repo.load_note(title)?;
        info!(
            "event=note_load module=notes status=ok bytes={}",
            note.content.len()
        );
        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteService, NoteServiceError, SaveRequest};
    use crate::notes::clock::ManualClock;
    use crate::notes::model::{Note, NoteStyle, NoteSummary};
    use crate::notes::store::{NoteRepository, NoteStoreError, StoreResult};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct MemoryRepo {
        notes: BTreeMap<String, Note>,
    }

    impl NoteRepository for MemoryRepo {
        fn save_note(&mut self, note: &Note) -> StoreResult<()> {
            self.notes.insert(note.title.clone(), note.clone());
            Ok(())
        }

        fn load_note(&self, title: &str) -> StoreResult<Note> {
            self.notes
                .get(title)
                .cloned()
                .ok_or_else(|| NoteStoreError::NotFound(title.to_string()))
        }

        fn list_notes(&self) -> StoreResult<Vec<NoteSummary>> {
            Ok(self.notes.values().map(NoteSummary::from).collect())
        }
    }

    fn service() -> NoteService<MemoryRepo, ManualClock> {
        let start = NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|date| date.and_hms_opt(14, 7, 9))
            .unwrap();
        NoteService::with_clock(MemoryRepo::default(), ManualClock::new(start))
    }

    fn request(title: &str, content: &str) -> SaveRequest {
        SaveRequest {
            title: title.to_string(),
            content: content.to_string(),
            style: NoteStyle::default(),
            font_size: 12,
        }
    }

    #[test]
    fn blank_title_is_synthesized_from_clock() {
        let mut service = service();
        let note = service.save_note(request("   ", "body")).unwrap();
        assert_eq!(note.title, "note_20240305_140709");
        assert_eq!(note.last_modified, "2024-03-05 14:07:09");
    }

    #[test]
    fn content_and_title_are_trimmed() {
        let mut service = service();
        let note = service.save_note(request(" plan ", "\n  body  \n")).unwrap();
        assert_eq!(note.title, "plan");
        assert_eq!(note.content, "body");
    }

    #[test]
    fn empty_content_is_a_user_warning() {
        let mut service = service();
        let err = service.save_note(request("x", " \n\t")).unwrap_err();
        assert!(matches!(err, NoteServiceError::EmptyContent));
        assert!(err.is_user_warning());
        assert_eq!(err.to_string(), "Write something before saving.");
        assert!(service.repo().notes.is_empty());
    }
}
