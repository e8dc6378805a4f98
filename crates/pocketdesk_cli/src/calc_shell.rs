//! Line-driven calculator window.
//!
//! Each input line is split on whitespace. A token is a button label
//! (`C`, `MR`, `DEG`, `=`), a keysym in angle brackets (`<BackSpace>`) or
//! free text appended to the expression. Text ending in `=` is appended and
//! evaluated.

use pocketdesk_core::calc::BUTTON_LAYOUT;
use pocketdesk_core::{CalculatorSession, Key};
use std::io::{self, BufRead, Write};

pub fn run(input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    let mut session = CalculatorSession::new();
    for row in BUTTON_LAYOUT {
        writeln!(output, "{}", row.map(|label| format!("{label:^5}")).join(""))?;
    }
    render(&session, &mut output)?;

    for line in input.lines() {
        let line = line?;
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }
        for token in line.split_whitespace() {
            for key in keys_for_token(token) {
                session.press(key);
            }
        }
        render(&session, &mut output)?;
    }
    Ok(())
}

fn render(session: &CalculatorSession, output: &mut impl Write) -> io::Result<()> {
    let view = session.view();
    writeln!(output, "{}", view.status)?;
    writeln!(output, "  {}", view.expression)?;
    writeln!(output, "= {}", view.result)?;
    output.flush()
}

fn keys_for_token(token: &str) -> Vec<Key> {
    if let Some(keysym) = token.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        return Key::from_keysym(keysym).into_iter().collect();
    }
    if is_button_label(token) {
        return vec![Key::from_label(token)];
    }
    match token.strip_suffix('=') {
        Some(text) => vec![Key::Insert(text.to_string()), Key::Evaluate],
        None => vec![Key::Insert(token.to_string())],
    }
}

fn is_button_label(token: &str) -> bool {
    token == "RAD" || BUTTON_LAYOUT.iter().flatten().any(|label| *label == token)
}
