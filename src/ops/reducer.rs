use crate::model::board::Board;
use crate::model::category::Category;
use crate::model::task::MoveDirection;

use super::{category_ops, task_ops};

/// A user-level state transition. Ids for new entities are chosen by the
/// caller so that `reduce` stays a pure function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddCategory {
        id: String,
        name: String,
        color: String,
    },
    UpdateCategory(Category),
    DeleteCategory {
        id: String,
    },
    AddTask {
        category_id: String,
        task_id: String,
        text: String,
    },
    ToggleTask {
        category_id: String,
        task_id: String,
    },
    DeleteTask {
        category_id: String,
        task_id: String,
    },
    MoveTask {
        category_id: String,
        task_id: String,
        direction: MoveDirection,
    },
}

impl Action {
    /// Short name used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Action::AddCategory { .. } => "add-category",
            Action::UpdateCategory(_) => "update-category",
            Action::DeleteCategory { .. } => "delete-category",
            Action::AddTask { .. } => "add-task",
            Action::ToggleTask { .. } => "toggle-task",
            Action::DeleteTask { .. } => "delete-task",
            Action::MoveTask { .. } => "move-task",
        }
    }
}

/// Apply an action. Returns the next board, or `None` if nothing changed.
pub fn reduce(board: &Board, action: Action) -> Option<Board> {
    match action {
        Action::AddCategory { id, name, color } => {
            category_ops::add_category(board, &id, &name, &color)
        }
        Action::UpdateCategory(category) => category_ops::update_category(board, category),
        Action::DeleteCategory { id } => category_ops::delete_category(board, &id),
        Action::AddTask {
            category_id,
            task_id,
            text,
        } => with_category(board, &category_id, |cat| {
            task_ops::add_task(cat, &task_id, &text)
        }),
        Action::ToggleTask {
            category_id,
            task_id,
        } => with_category(board, &category_id, |cat| {
            task_ops::toggle_task(cat, &task_id)
        }),
        Action::DeleteTask {
            category_id,
            task_id,
        } => with_category(board, &category_id, |cat| {
            task_ops::delete_task(cat, &task_id)
        }),
        Action::MoveTask {
            category_id,
            task_id,
            direction,
        } => with_category(board, &category_id, |cat| {
            task_ops::move_task(cat, &task_id, direction)
        }),
    }
}

/// Run a task-level op against one category and route the copy through
/// `update_category`.
fn with_category(
    board: &Board,
    category_id: &str,
    op: impl FnOnce(&Category) -> Option<Category>,
) -> Option<Board> {
    let category = board.find(category_id)?;
    let updated = op(category)?;
    category_ops::update_category(board, updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::category::Swatch;
    use pretty_assertions::assert_eq;

    fn work_board() -> Board {
        Board::new(vec![Category::new("1", "Work", Swatch::Pink)])
    }

    #[test]
    fn end_to_end_add_toggle_delete() {
        let board = work_board();

        let board = reduce(
            &board,
            Action::AddTask {
                category_id: "1".into(),
                task_id: "10".into(),
                text: "Write report".into(),
            },
        )
        .unwrap();
        let task = &board.categories[0].tasks[0];
        assert_eq!(task.text, "Write report");
        assert!(!task.completed);

        let board = reduce(
            &board,
            Action::ToggleTask {
                category_id: "1".into(),
                task_id: "10".into(),
            },
        )
        .unwrap();
        assert!(board.categories[0].tasks[0].completed);

        let board = reduce(&board, Action::DeleteCategory { id: "1".into() }).unwrap();
        assert!(board.is_empty());
    }

    #[test]
    fn task_actions_on_unknown_category_are_noops() {
        let board = work_board();
        let action = Action::AddTask {
            category_id: "missing".into(),
            task_id: "10".into(),
            text: "x".into(),
        };
        assert!(reduce(&board, action).is_none());
    }

    #[test]
    fn boundary_move_is_noop() {
        let mut board = work_board();
        board.categories[0]
            .tasks
            .push(crate::model::task::Task::new("10", "only"));
        let action = Action::MoveTask {
            category_id: "1".into(),
            task_id: "10".into(),
            direction: MoveDirection::Up,
        };
        assert!(reduce(&board, action).is_none());
    }

    #[test]
    fn add_category_appends_in_order() {
        let board = work_board();
        let board = reduce(
            &board,
            Action::AddCategory {
                id: "2".into(),
                name: "Home".into(),
                color: Swatch::Orange.hex().into(),
            },
        )
        .unwrap();
        let ids: Vec<&str> = board.categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn reduce_does_not_touch_input() {
        let board = work_board();
        let before = board.clone();
        let _ = reduce(&board, Action::DeleteCategory { id: "1".into() });
        assert_eq!(board, before);
    }

    #[test]
    fn action_kind_names() {
        assert_eq!(Action::DeleteCategory { id: "1".into() }.kind(), "delete-category");
    }
}
