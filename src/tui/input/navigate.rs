use crossterm::event::{KeyCode, KeyEvent};

use crate::model::task::MoveDirection;
use crate::tui::app::{App, CategoryForm, ConfirmAction, ConfirmState, FormField, LineEdit, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Category selection
        KeyCode::Left | KeyCode::Char('h') => {
            if app.cursor_category > 0 {
                app.cursor_category -= 1;
                app.cursor_task = 0;
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.cursor_category + 1 < app.session.board().len() {
                app.cursor_category += 1;
                app.cursor_task = 0;
            }
        }

        // Task selection
        KeyCode::Up | KeyCode::Char('k') => {
            app.cursor_task = app.cursor_task.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.cursor_task += 1;
            app.clamp_cursor();
        }

        // Task actions
        KeyCode::Char(' ') | KeyCode::Char('x') => toggle_selected(app),
        KeyCode::Char('d') => delete_selected(app),
        KeyCode::Char('K') => move_selected(app, MoveDirection::Up),
        KeyCode::Char('J') => move_selected(app, MoveDirection::Down),
        KeyCode::Char('a') | KeyCode::Enter => {
            if app.selected_category().is_some() {
                app.task_input.clear();
                app.mode = Mode::AddTask;
            }
        }

        // Category actions
        KeyCode::Char('n') => {
            app.category_form = Some(CategoryForm {
                editing: None,
                name: LineEdit::default(),
                swatch: app.default_swatch(),
                color_changed: false,
                field: FormField::Name,
            });
            app.mode = Mode::CategoryForm;
        }
        KeyCode::Char('e') => {
            if let Some(cat) = app.selected_category() {
                let form = CategoryForm {
                    editing: Some(cat.id.clone()),
                    name: LineEdit::with_text(&cat.name),
                    swatch: cat.swatch().unwrap_or_else(|| app.default_swatch()),
                    color_changed: false,
                    field: FormField::Name,
                };
                app.category_form = Some(form);
                app.mode = Mode::CategoryForm;
            }
        }
        KeyCode::Char('D') => request_delete_category(app),
        _ => {}
    }
}

fn toggle_selected(app: &mut App) {
    if let Some((cat_id, Some(task_id))) = app.selection_ids() {
        app.session.toggle_task(&cat_id, &task_id);
    }
}

fn delete_selected(app: &mut App) {
    if let Some((cat_id, Some(task_id))) = app.selection_ids() {
        app.session.delete_task(&cat_id, &task_id);
        app.clamp_cursor();
    }
}

fn move_selected(app: &mut App, direction: MoveDirection) {
    if let Some((cat_id, Some(task_id))) = app.selection_ids()
        && app.session.move_task(&cat_id, &task_id, direction)
    {
        app.select_task(&task_id);
    }
}

fn request_delete_category(app: &mut App) {
    let Some(cat) = app.selected_category() else {
        return;
    };
    let id = cat.id.clone();
    if !app.config.board.confirm_delete {
        app.session.delete_category(&id, |_| true);
        app.clamp_cursor();
        return;
    }
    app.confirm_state = Some(ConfirmState {
        message: format!("Delete category \"{}\" and all its tasks?", cat.name),
        action: ConfirmAction::DeleteCategory { id },
    });
    app.mode = Mode::Confirm;
}
