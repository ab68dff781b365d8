//! Task-level transitions.
//!
//! Each function takes the current category and returns a modified copy,
//! or `None` when the call is a no-op (blank text, unknown id, boundary
//! move). Callers feed the result to `category_ops::update_category`.

use crate::model::category::Category;
use crate::model::task::{MoveDirection, Task};

// ---------------------------------------------------------------------------
// Create / delete
// ---------------------------------------------------------------------------

/// Append a new task. Text is trimmed; blank text or a duplicate id is a no-op.
pub fn add_task(category: &Category, task_id: &str, text: &str) -> Option<Category> {
    let text = text.trim();
    if text.is_empty() || category.find_task(task_id).is_some() {
        return None;
    }
    let mut updated = category.clone();
    updated.tasks.push(Task::new(task_id, text));
    Some(updated)
}

/// Remove a task by id. Sibling order is preserved.
pub fn delete_task(category: &Category, task_id: &str) -> Option<Category> {
    let idx = category.task_position(task_id)?;
    let mut updated = category.clone();
    updated.tasks.remove(idx);
    Some(updated)
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Flip a task's completed flag
pub fn toggle_task(category: &Category, task_id: &str) -> Option<Category> {
    let idx = category.task_position(task_id)?;
    let mut updated = category.clone();
    let task = &mut updated.tasks[idx];
    task.completed = !task.completed;
    Some(updated)
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

/// Swap a task with its neighbor. At either end of the list this is a no-op.
pub fn move_task(
    category: &Category,
    task_id: &str,
    direction: MoveDirection,
) -> Option<Category> {
    let idx = category.task_position(task_id)?;
    let target = match direction {
        MoveDirection::Up => idx.checked_sub(1)?,
        MoveDirection::Down => {
            let next = idx + 1;
            if next >= category.tasks.len() {
                return None;
            }
            next
        }
    };
    let mut updated = category.clone();
    updated.tasks.swap(idx, target);
    Some(updated)
}
