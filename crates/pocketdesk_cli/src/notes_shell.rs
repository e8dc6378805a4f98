//! Line-driven notes window.
//!
//! Commands: `list`, `open <title>`, `title <text>`, `write <text>`,
//! `clear`, `bullet`, `theme <1-6>`, `size <n>`, `new`, `save`, `show`,
//! `quit`. Shortcut spellings such as `^S` or `Ctrl+N` are accepted too.

use pocketdesk_core::{Clock, EditorEvent, NoteRepository, NoteStyle, NotesEditor, Shortcut};
use std::io::{self, BufRead, Write};

/// Editor color presets offered by the theme buttons, as `(bg, fg)`.
const THEMES: [(&str, &str); 6] = [
    ("#FFFFFF", "#000000"),
    ("#1E1E1E", "#D4D4D4"),
    ("#FFFAF0", "#5F4B8B"),
    ("#F0FFFF", "#008B8B"),
    ("#FFFACD", "#8B0000"),
    ("#E6E6FA", "#4B0082"),
];

pub fn run<R: NoteRepository, C: Clock>(
    mut editor: NotesEditor<R, C>,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    render_list(&editor, &mut output)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Ok(Command::Event(event)) => editor.handle(event),
            Ok(Command::List) => render_list(&editor, &mut output)?,
            Ok(Command::Show) => render_editor(&editor, &mut output)?,
            Err(message) => writeln!(output, "{message}")?,
        }

        if let Some(notice) = editor.take_notice() {
            writeln!(output, "[{}] {}", notice.title, notice.message)?;
        }
        if editor.quit_requested() {
            break;
        }
        output.flush()?;
    }
    Ok(())
}

enum Command {
    Event(EditorEvent),
    List,
    Show,
}

fn parse_command(line: &str) -> Result<Command, String> {
    if let Some(shortcut) = Shortcut::parse(line) {
        return Ok(Command::Event(shortcut.event()));
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let event = match verb {
        "list" => return Ok(Command::List),
        "show" => return Ok(Command::Show),
        "open" => EditorEvent::Select(rest.to_string()),
        "title" => EditorEvent::SetTitle(rest.to_string()),
        "write" => EditorEvent::AppendContent(format!("{rest}\n")),
        "clear" => EditorEvent::SetContent(String::new()),
        "bullet" => EditorEvent::InsertBullet,
        "new" => EditorEvent::NewNote,
        "save" => EditorEvent::Save,
        "quit" => EditorEvent::Quit,
        "size" => {
            let size = rest
                .parse::<u32>()
                .map_err(|_| format!("invalid font size `{rest}`"))?;
            EditorEvent::SetFontSize(size)
        }
        "theme" => {
            let (bg, fg) = rest
                .parse::<usize>()
                .ok()
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| THEMES.get(index))
                .ok_or_else(|| format!("theme must be 1-{}", THEMES.len()))?;
            EditorEvent::ApplyStyle(NoteStyle::new(*bg, *fg))
        }
        other => return Err(format!("unknown command `{other}`")),
    };
    Ok(Command::Event(event))
}

fn render_list<R: NoteRepository, C: Clock>(
    editor: &NotesEditor<R, C>,
    output: &mut impl Write,
) -> io::Result<()> {
    writeln!(output, "Notes ({}):", editor.titles().len())?;
    for title in editor.titles() {
        writeln!(output, "  {title}")?;
    }
    Ok(())
}

fn render_editor<R: NoteRepository, C: Clock>(
    editor: &NotesEditor<R, C>,
    output: &mut impl Write,
) -> io::Result<()> {
    let style = editor.style();
    writeln!(output, "Title: {}", editor.title())?;
    writeln!(output, "{}", editor.last_modified_label())?;
    writeln!(
        output,
        "Style: bg={} fg={} size={}",
        style.bg_color,
        style.font_color,
        editor.font_size()
    )?;
    writeln!(output, "{}", editor.content())
}

#[cfg(test)]
mod tests {
    use super::run;
    use chrono::NaiveDate;
    use pocketdesk_core::{FsNoteRepository, ManualClock, NoteService, NotesEditor};

    #[test]
    fn save_and_list_through_commands() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FsNoteRepository::open(dir.path()).unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(8, 0, 0))
            .unwrap();
        let editor = NotesEditor::open(NoteService::with_clock(repo, ManualClock::new(start)));

        let input = "save\ntitle groceries\nwrite milk\nbullet\n^S\ntheme 9\nlist\nquit\nlist\n";
        let mut output = Vec::new();
        run(editor, input.as_bytes(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("[Empty Note] Write something before saving."));
        assert!(text.contains("theme must be 1-6"));
        assert!(text.contains("Notes (1):\n  groceries"));
        assert_eq!(text.matches("Notes (").count(), 2);
        assert!(dir.path().join("groceries.json").is_file());
    }
}
