use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::category_ops;
use crate::tui::app::{App, FormField, LineEdit, Mode};

/// Line-editing keys shared by every text input. Returns false for keys
/// that are not editing keys.
fn edit_line(edit: &mut LineEdit, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('a') if ctrl => edit.home(),
        KeyCode::Char('e') if ctrl => edit.end(),
        KeyCode::Char('w') if ctrl => edit.delete_word_back(),
        KeyCode::Char('u') if ctrl => edit.clear(),
        KeyCode::Char(_) if ctrl => return false,
        KeyCode::Char(c) => {
            let mut buf = [0u8; 4];
            edit.insert_str(c.encode_utf8(&mut buf));
        }
        KeyCode::Backspace => edit.backspace(),
        KeyCode::Delete => edit.delete(),
        KeyCode::Left => edit.left(),
        KeyCode::Right => edit.right(),
        KeyCode::Home => edit.home(),
        KeyCode::End => edit.end(),
        _ => return false,
    }
    true
}

/// Inline add-task input. Enter adds and keeps the input open for the next
/// task; Enter on an empty line or Esc closes it.
pub(super) fn handle_add_task(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.task_input.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            let text = std::mem::take(&mut app.task_input.buffer);
            app.task_input.clear();
            let Some(cat_id) = app.selected_category().map(|c| c.id.clone()) else {
                app.mode = Mode::Navigate;
                return;
            };
            match app.session.add_task(&cat_id, &text) {
                Some(task_id) => app.select_task(&task_id),
                None => app.mode = Mode::Navigate,
            }
        }
        _ => {
            edit_line(&mut app.task_input, key);
        }
    }
}

/// New/edit category modal: Tab switches between the name and the color
/// row, ←/→ cycle colors when the color row has focus.
pub(super) fn handle_category_form(app: &mut App, key: KeyEvent) {
    let Some(form) = &mut app.category_form else {
        app.mode = Mode::Navigate;
        return;
    };

    match (key.code, form.field) {
        (KeyCode::Esc, _) => {
            app.category_form = None;
            app.mode = Mode::Navigate;
        }
        (KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down, field) => {
            form.field = match field {
                FormField::Name => FormField::Color,
                FormField::Color => FormField::Name,
            };
        }
        (KeyCode::Left | KeyCode::Char('h'), FormField::Color) => {
            form.swatch = form.swatch.prev();
            form.color_changed = true;
        }
        (KeyCode::Right | KeyCode::Char('l'), FormField::Color) => {
            form.swatch = form.swatch.next();
            form.color_changed = true;
        }
        (KeyCode::Enter, _) => submit_category_form(app),
        (_, FormField::Name) => {
            edit_line(&mut form.name, key);
        }
        _ => {}
    }
}

fn submit_category_form(app: &mut App) {
    let Some(form) = app.category_form.take() else {
        return;
    };
    if form.name.buffer.trim().is_empty() {
        // Keep the modal open until there is a name
        app.category_form = Some(form);
        return;
    }
    app.mode = Mode::Navigate;

    match &form.editing {
        None => {
            if let Some(id) = app.session.add_category(&form.name.buffer, form.swatch) {
                app.select_category(&id);
            }
        }
        Some(id) => {
            let color = form.color_changed.then_some(form.swatch);
            let edited = app
                .session
                .board()
                .find(id)
                .map(|cat| category_ops::edit_category(cat, Some(&form.name.buffer), color));
            if let Some(edited) = edited {
                app.session.update_category(edited);
            }
        }
    }
}
