mod confirm;
mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use confirm::handle_confirm;
use edit::{handle_add_task, handle_category_form};
use navigate::handle_navigate;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    app.status = None;

    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::AddTask => handle_add_task(app, key),
        Mode::CategoryForm => handle_category_form(app, key),
        Mode::Confirm => handle_confirm(app, key),
    }
    app.collect_warnings();
}

/// Handle a bracketed paste. Only text inputs take it; newlines become spaces.
pub fn handle_paste(app: &mut App, text: &str) {
    let clean = text.replace(['\r', '\n'], " ");
    match app.mode {
        Mode::AddTask => app.task_input.insert_str(&clean),
        Mode::CategoryForm => {
            if let Some(form) = &mut app.category_form {
                form.name.insert_str(&clean);
            }
        }
        Mode::Navigate | Mode::Confirm => {}
    }
}

/// Shift+letter arrives as either `Char('K')` or `Char('k')` + SHIFT
/// depending on the terminal; fold both into the uppercase form.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}

#[cfg(test)]
pub(crate) mod test_keys {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn ch(c: char) -> KeyEvent {
        key(KeyCode::Char(c))
    }

    pub fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub fn typed(text: &str) -> Vec<KeyEvent> {
        text.chars().map(ch).collect()
    }
}
