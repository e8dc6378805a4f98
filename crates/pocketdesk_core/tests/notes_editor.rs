use chrono::{NaiveDate, NaiveDateTime};
use pocketdesk_core::{
    EditorEvent, FsNoteRepository, ManualClock, NoteService, NoteStyle, NotesEditor, Shortcut,
    EMPTY_NOTE_WARNING,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(9, 30, 0))
        .unwrap()
}

fn open_editor(dir: &Path) -> NotesEditor<FsNoteRepository, ManualClock> {
    let repo = FsNoteRepository::open(dir).unwrap();
    NotesEditor::open(NoteService::with_clock(repo, ManualClock::new(start_time())))
}

fn write_note(editor: &mut NotesEditor<FsNoteRepository, ManualClock>, title: &str, body: &str) {
    editor.handle(EditorEvent::SetTitle(title.to_string()));
    editor.handle(EditorEvent::SetContent(body.to_string()));
    editor.handle(EditorEvent::Save);
}

#[test]
fn opens_blank_with_existing_titles() {
    let dir = TempDir::new().unwrap();
    {
        let mut seed = open_editor(dir.path());
        write_note(&mut seed, "existing", "body");
    }

    let editor = open_editor(dir.path());
    assert_eq!(editor.title(), "");
    assert_eq!(editor.content(), "");
    assert_eq!(editor.style(), &NoteStyle::default());
    assert_eq!(editor.font_size(), 12);
    assert_eq!(editor.last_modified_label(), "Last Modified: —");
    assert_eq!(editor.titles(), ["existing".to_string()]);
    assert!(!editor.quit_requested());
}

#[test]
fn empty_save_raises_notice_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut editor = open_editor(dir.path());
    write_note(&mut editor, "draft", "   ");

    let notice = editor.take_notice().unwrap();
    assert_eq!(notice.title, "Empty Note");
    assert_eq!(notice.message, EMPTY_NOTE_WARNING);
    assert!(editor.take_notice().is_none());
    assert!(editor.titles().is_empty());
    assert!(!dir.path().join("draft.json").exists());
}

#[test]
fn save_refreshes_titles_and_label() {
    let dir = TempDir::new().unwrap();
    let mut editor = open_editor(dir.path());
    write_note(&mut editor, "first", "one");
    editor.service().clock().advance_secs(60);
    write_note(&mut editor, "second", "two");

    assert_eq!(editor.titles(), ["second".to_string(), "first".to_string()]);
    assert_eq!(
        editor.last_modified_label(),
        "Last Modified: 2024-01-01 09:31:00 (Monday)"
    );
    assert_eq!(editor.loaded_title(), Some("second"));
    assert!(editor.take_notice().is_none());
}

#[test]
fn blank_title_save_keeps_title_field_blank() {
    let dir = TempDir::new().unwrap();
    let mut editor = open_editor(dir.path());
    write_note(&mut editor, "", "quick thought");

    assert_eq!(editor.title(), "");
    assert_eq!(editor.titles(), ["note_20240101_093000".to_string()]);
    assert_eq!(editor.loaded_title(), Some("note_20240101_093000"));
}

#[test]
fn select_loads_content_and_style() {
    let dir = TempDir::new().unwrap();
    let mut editor = open_editor(dir.path());
    editor.handle(EditorEvent::ApplyStyle(NoteStyle::new("#282C34", "#ABB2BF")));
    editor.handle(EditorEvent::SetFontSize(18));
    write_note(&mut editor, "styled", "dark body");
    editor.handle(EditorEvent::NewNote);
    assert_eq!(editor.style(), &NoteStyle::default());

    editor.handle(EditorEvent::Select("styled".to_string()));
    assert_eq!(editor.title(), "styled");
    assert_eq!(editor.content(), "dark body");
    assert_eq!(editor.style(), &NoteStyle::new("#282C34", "#ABB2BF"));
    assert_eq!(editor.font_size(), 18);
    assert_eq!(
        editor.last_modified_label(),
        "Last Modified: 2024-01-01 09:30:00 (Monday)"
    );
}

#[test]
fn failed_select_leaves_state_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut editor = open_editor(dir.path());
    fs::write(dir.path().join("broken.json"), "{ nope").unwrap();
    editor.handle(EditorEvent::SetTitle("kept".to_string()));
    editor.handle(EditorEvent::SetContent("unsaved text".to_string()));

    editor.handle(EditorEvent::Select("broken".to_string()));
    editor.handle(EditorEvent::Select("missing".to_string()));

    assert_eq!(editor.title(), "kept");
    assert_eq!(editor.content(), "unsaved text");
    assert_eq!(editor.loaded_title(), None);
    assert!(editor.take_notice().is_none());
}

#[test]
fn new_note_resets_editor() {
    let dir = TempDir::new().unwrap();
    let mut editor = open_editor(dir.path());
    editor.handle(EditorEvent::SetFontSize(20));
    write_note(&mut editor, "kept", "body");

    editor.handle(EditorEvent::NewNote);
    assert_eq!(editor.title(), "");
    assert_eq!(editor.content(), "");
    assert_eq!(editor.font_size(), 12);
    assert_eq!(editor.last_modified_label(), "Last Modified: —");
    assert_eq!(editor.loaded_title(), None);
    assert_eq!(editor.titles(), ["kept".to_string()]);
}

#[test]
fn shortcuts_drive_bullet_save_and_quit() {
    let dir = TempDir::new().unwrap();
    let mut editor = open_editor(dir.path());
    editor.handle(EditorEvent::SetTitle("todo".to_string()));
    editor.handle_shortcut(Shortcut::InsertBullet);
    editor.handle(EditorEvent::AppendContent("buy milk".to_string()));
    editor.handle_shortcut(Shortcut::Save);

    assert_eq!(editor.content(), "• buy milk");
    assert_eq!(editor.titles(), ["todo".to_string()]);

    editor.handle_shortcut(Shortcut::NewNote);
    assert_eq!(editor.content(), "");

    editor.handle_shortcut(Shortcut::Quit);
    assert!(editor.quit_requested());
}

#[test]
fn renamed_note_leaves_previous_file() {
    let dir = TempDir::new().unwrap();
    let mut editor = open_editor(dir.path());
    write_note(&mut editor, "old name", "body");
    editor.handle(EditorEvent::SetTitle("new name".to_string()));
    editor.handle(EditorEvent::Save);

    assert!(dir.path().join("old name.json").exists());
    assert!(dir.path().join("new name.json").exists());
    assert_eq!(editor.titles().len(), 2);
    assert_eq!(editor.loaded_title(), Some("new name"));
}

#[test]
fn refresh_picks_up_external_files() {
    let dir = TempDir::new().unwrap();
    let mut editor = open_editor(dir.path());
    assert!(editor.titles().is_empty());

    fs::write(
        dir.path().join("synced.json"),
        r#"{"title":"synced","content":"from elsewhere"}"#,
    )
    .unwrap();
    editor.handle(EditorEvent::Refresh);
    assert_eq!(editor.titles(), ["synced".to_string()]);
}
