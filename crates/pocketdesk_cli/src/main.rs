//! Terminal front-end for the PocketDesk apps.
//!
//! # Responsibility
//! - Pick the app window (`calc` or `notes`) from the first argument.
//! - Bootstrap logging and hand stdin/stdout to the selected shell.

mod calc_shell;
mod notes_shell;

use log::info;
use pocketdesk_core::{init_logging, AppConfig, FsNoteRepository, NoteService, NotesEditor};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

const USAGE: &str = "usage: pocketdesk <calc|notes>";

fn main() -> ExitCode {
    let Some(app) = std::env::args().nth(1) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(err) => {
            eprintln!("cannot resolve working directory: {err}");
            return ExitCode::FAILURE;
        }
    };
    let config = AppConfig::from_working_dir(cwd);
    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }
    info!(
        "event=cli_start module=cli status=ok app={} version={}",
        app,
        pocketdesk_core::core_version()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = match app.as_str() {
        "calc" => calc_shell::run(stdin.lock(), stdout.lock()),
        "notes" => run_notes(&config, stdin.lock(), stdout.lock()),
        other => {
            eprintln!("unknown app `{other}`\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_notes(config: &AppConfig, input: impl BufRead, output: impl Write) -> io::Result<()> {
    let repo = FsNoteRepository::open(&config.notes_dir).map_err(io::Error::other)?;
    let editor = NotesEditor::open(NoteService::new(repo));
    notes_shell::run(editor, input, output)
}
