//! Core logic for the PocketDesk calculator and notes apps.
//! Front-ends only translate input into events and render the state exposed
//! here.

pub mod calc;
pub mod config;
pub mod logging;
pub mod notes;

pub use calc::{
    evaluate, format_number, AngleMode, CalcError, CalcResult, CalculatorSession,
    CalculatorView, Key,
};
pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use notes::clock::{Clock, ManualClock, SystemClock};
pub use notes::editor::{EditorEvent, Notice, NotesEditor, Shortcut};
pub use notes::indexed::IndexedNoteRepository;
pub use notes::model::{Note, NoteStyle, NoteSummary};
pub use notes::service::{NoteService, NoteServiceError, SaveRequest, EMPTY_NOTE_WARNING};
pub use notes::store::{FsNoteRepository, NoteRepository, NoteStoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
