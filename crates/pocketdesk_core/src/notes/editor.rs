//! Notes window controller.
//!
//! # Responsibility
//! - Hold editor state (title, body, style, list contents) for one window.
//! - Translate input events and shortcuts into note service calls.
//!
//! # Invariants
//! - Failed loads leave the editor state untouched.
//! - A failed listing keeps the previous title list.
//! - Saving under a new title never deletes the previously loaded file.

use crate::notes::clock::{Clock, SystemClock};
use crate::notes::model::{last_modified_label, NoteStyle, DEFAULT_FONT_SIZE};
use crate::notes::service::{NoteService, SaveRequest};
use crate::notes::store::NoteRepository;
use log::{debug, warn};

/// Text inserted by the bullet action.
pub const BULLET: &str = "• ";
const EMPTY_NOTE_DIALOG_TITLE: &str = "Empty Note";

/// Input delivered to the notes window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    SetTitle(String),
    SetContent(String),
    AppendContent(String),
    Save,
    NewNote,
    /// A title was picked in the note list.
    Select(String),
    InsertBullet,
    ApplyStyle(NoteStyle),
    SetFontSize(u32),
    Refresh,
    Quit,
}

/// Fixed keyboard shortcuts of the notes window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Save,
    NewNote,
    Quit,
    InsertBullet,
}

impl Shortcut {
    pub const ALL: [Shortcut; 4] = [Self::Save, Self::NewNote, Self::Quit, Self::InsertBullet];

    /// Parses `Ctrl+S`, `ctrl-s`, `^S` or `<Control-s>` style bindings.
    pub fn parse(binding: &str) -> Option<Self> {
        let normalized = binding
            .trim()
            .trim_start_matches('<')
            .trim_end_matches('>')
            .to_ascii_lowercase();
        let key = normalized
            .strip_prefix("control-")
            .or_else(|| normalized.strip_prefix("ctrl+"))
            .or_else(|| normalized.strip_prefix("ctrl-"))
            .or_else(|| normalized.strip_prefix('^'))?;
        match key {
            "s" => Some(Self::Save),
            "n" => Some(Self::NewNote),
            "q" => Some(Self::Quit),
            "b" => Some(Self::InsertBullet),
            _ => None,
        }
    }

    pub fn binding(self) -> &'static str {
        match self {
            Self::Save => "Ctrl+S",
            Self::NewNote => "Ctrl+N",
            Self::Quit => "Ctrl+Q",
            Self::InsertBullet => "Ctrl+B",
        }
    }

    pub fn event(self) -> EditorEvent {
        match self {
            Self::Save => EditorEvent::Save,
            Self::NewNote => EditorEvent::NewNote,
            Self::Quit => EditorEvent::Quit,
            Self::InsertBullet => EditorEvent::InsertBullet,
        }
    }
}

/// A message the front-end should show in a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub message: String,
}

/// Controller and state of the notes window.
pub struct NotesEditor<R: NoteRepository, C: Clock = SystemClock> {
    service: NoteService<R, C>,
    title: String,
    content: String,
    style: NoteStyle,
    font_size: u32,
    last_modified_label: String,
    titles: Vec<String>,
    loaded_title: Option<String>,
    notice: Option<Notice>,
    quit_requested: bool,
}

impl<R: NoteRepository, C: Clock> NotesEditor<R, C> {
    /// Creates a blank editor and loads the note list.
    pub fn open(service: NoteService<R, C>) -> Self {
        let mut editor = Self {
            service,
            title: String::new(),
            content: String::new(),
            style: NoteStyle::default(),
            font_size: DEFAULT_FONT_SIZE,
            last_modified_label: last_modified_label(None),
            titles: Vec::new(),
            loaded_title: None,
            notice: None,
            quit_requested: false,
        };
        editor.refresh_titles();
        editor
    }

    pub fn handle(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::SetTitle(title) => self.title = title,
            EditorEvent::SetContent(content) => self.content = content,
            EditorEvent::AppendContent(text) => self.content.push_str(&text),
            EditorEvent::Save => self.save(),
            EditorEvent::NewNote => self.reset(),
            EditorEvent::Select(title) => self.select(&title),
            EditorEvent::InsertBullet => self.content.push_str(BULLET),
            EditorEvent::ApplyStyle(style) => self.style = style,
            EditorEvent::SetFontSize(size) => self.font_size = size,
            EditorEvent::Refresh => self.refresh_titles(),
            EditorEvent::Quit => self.quit_requested = true,
        }
    }

    pub fn handle_shortcut(&mut self, shortcut: Shortcut) {
        self.handle(shortcut.event());
    }

    fn save(&mut self) {
        let request = SaveRequest {
            title: self.title.clone(),
            content: self.content.clone(),
            style: self.style.clone(),
            font_size: self.font_size,
        };

        match self.service.save_note(request) {
            Ok(note) => {
                if let Some(previous) = self.loaded_title.as_deref() {
                    if previous != note.title {
                        warn!(
                            "event=note_save module=notes status=ok orphan_left=true reason=title_changed"
                        );
                    }
                }
                self.last_modified_label = last_modified_label(Some(&note.last_modified));
                self.loaded_title = Some(note.title);
                self.refresh_titles();
            }
            Err(err) if err.is_user_warning() => {
                self.notice = Some(Notice {
                    title: EMPTY_NOTE_DIALOG_TITLE,
                    message: err.to_string(),
                });
            }
            Err(err) => {
                warn!("event=note_save module=notes status=error error={err}");
            }
        }
    }

    fn reset(&mut self) {
        self.title.clear();
        self.content.clear();
        self.style = NoteStyle::default();
        self.font_size = DEFAULT_FONT_SIZE;
        self.last_modified_label = last_modified_label(None);
        self.loaded_title = None;
    }

    fn select(&mut self, title: &str) {
        let note = match self.service.load_note(title) {
            Ok(note) => note,
            Err(err) => {
                debug!("event=note_load module=notes status=error error={err}");
                return;
            }
        };

        self.last_modified_label = last_modified_label(Some(&note.last_modified));
        self.style = note.style();
        self.font_size = note.font_size;
        self.title = note.title.clone();
        self.content = note.content;
        self.loaded_title = Some(note.title);
    }

    fn refresh_titles(&mut self) {
        match self.service.list_titles() {
            Ok(titles) => self.titles = titles,
            Err(err) => warn!("event=note_list module=notes status=error error={err}"),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn style(&self) -> &NoteStyle {
        &self.style
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn last_modified_label(&self) -> &str {
        &self.last_modified_label
    }

    /// Titles shown in the note list, newest first.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Title of the note most recently loaded or saved.
    pub fn loaded_title(&self) -> Option<&str> {
        self.loaded_title.as_deref()
    }

    /// Takes the pending dialog message, if any.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn service(&self) -> &NoteService<R, C> {
        &self.service
    }
}
