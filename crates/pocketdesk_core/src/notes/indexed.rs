//! In-memory title index over another note repository.
//!
//! # Responsibility
//! - Serve listings from a title-keyed map instead of re-scanning storage.
//! - Hydrate lazily on first use and update incrementally on save.
//!
//! # Invariants
//! - The backing storage is owned by this process; external edits are not
//!   observed until `invalidate()`.
//! - The index is only updated after the inner save succeeded.

use crate::notes::model::{sort_newest_first, Note, NoteSummary};
use crate::notes::store::{NoteRepository, NoteStoreError, StoreResult};
use log::debug;
use once_cell::unsync::OnceCell;
use std::collections::BTreeMap;

/// Caching wrapper that keeps a title index for `inner`.
pub struct IndexedNoteRepository<R: NoteRepository> {
    inner: R,
    index: OnceCell<BTreeMap<String, NoteSummary>>,
}

impl<R: NoteRepository> IndexedNoteRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            index: OnceCell::new(),
        }
    }

    /// Whether the index has been loaded from `inner`.
    pub fn is_hydrated(&self) -> bool {
        self.index.get().is_some()
    }

    /// Drops the index so the next access re-reads `inner`.
    pub fn invalidate(&mut self) {
        self.index = OnceCell::new();
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn index(&self) -> StoreResult<&BTreeMap<String, NoteSummary>> {
        self.index.get_or_try_init(|| {
            let summaries = self.inner.list_notes()?;
            debug!(
                "event=note_index_hydrate module=notes status=ok count={}",
                summaries.len()
            );
            Ok(summaries
                .into_iter()
                .map(|summary| (summary.title.clone(), summary))
                .collect())
        })
    }
}

impl<R: NoteRepository> NoteRepository for IndexedNoteRepository<R> {
    fn save_note(&mut self, note: &Note) -> StoreResult<()> {
        self.inner.save_note(note)?;
        if let Some(index) = self.index.get_mut() {
            index.insert(note.title.clone(), NoteSummary::from(note));
        }
        Ok(())
    }

    fn load_note(&self, title: &str) -> StoreResult<Note> {
        if !self.index()?.contains_key(title) {
            return Err(NoteStoreError::NotFound(title.to_string()));
        }
        self.inner.load_note(title)
    }

    fn list_notes(&self) -> StoreResult<Vec<NoteSummary>> {
        let mut summaries: Vec<NoteSummary> = self.index()?.values().cloned().collect();
        sort_newest_first(&mut summaries);
        Ok(summaries)
    }
}
