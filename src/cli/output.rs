use serde::Serialize;

use crate::model::board::{Board, Progress};
use crate::model::category::{Category, Swatch};
use crate::model::task::Task;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub position: usize,
    pub text: String,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct CategoryJson {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swatch: Option<&'static str>,
    pub completed: usize,
    pub total: usize,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct CategoryStatsJson {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub progress: Progress,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub categories: Vec<CategoryStatsJson>,
    pub totals: Progress,
}

#[derive(Serialize)]
pub struct ColorJson {
    pub name: &'static str,
    pub hex: &'static str,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(position: usize, task: &Task) -> TaskJson {
    TaskJson {
        id: task.id.clone(),
        position,
        text: task.text.clone(),
        completed: task.completed,
    }
}

pub fn category_to_json(category: &Category) -> CategoryJson {
    let progress = category.progress();
    CategoryJson {
        id: category.id.clone(),
        name: category.name.clone(),
        color: category.color.clone(),
        swatch: category.swatch().map(Swatch::name),
        completed: progress.completed,
        total: progress.total,
        tasks: category
            .tasks
            .iter()
            .enumerate()
            .map(|(i, t)| task_to_json(i + 1, t))
            .collect(),
    }
}

pub fn stats_to_json(board: &Board) -> StatsJson {
    StatsJson {
        categories: board
            .categories
            .iter()
            .map(|c| CategoryStatsJson {
                id: c.id.clone(),
                name: c.name.clone(),
                progress: c.progress(),
            })
            .collect(),
        totals: board.progress(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// The board-wide summary line
pub fn format_progress_line(progress: Progress) -> String {
    format!("{}/{} TASKS COMPLETED", progress.completed, progress.total)
}

pub fn format_category_header(category: &Category) -> String {
    let progress = category.progress();
    format!(
        "== {} ({}) {}/{} ==",
        category.name, category.id, progress.completed, progress.total
    )
}

/// One task as `  N. [x] text  (id)`
pub fn format_task_line(position: usize, task: &Task) -> String {
    format!(
        "{:>3}. {} {}  ({})",
        position,
        task.checkbox(),
        task.text,
        task.id
    )
}

pub fn format_category_listing(category: &Category) -> Vec<String> {
    let mut lines = vec![format_category_header(category)];
    if category.tasks.is_empty() {
        lines.push("  (no tasks)".to_string());
    }
    for (i, task) in category.tasks.iter().enumerate() {
        lines.push(format_task_line(i + 1, task));
    }
    lines
}

/// Aligned per-category counts followed by the total line
pub fn format_stats_table(board: &Board) -> Vec<String> {
    let name_width = board
        .categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);
    let mut lines: Vec<String> = board
        .categories
        .iter()
        .map(|c| {
            let p = c.progress();
            format!(
                "  {:<width$}  {:>3}/{:<3}",
                c.name,
                p.completed,
                p.total,
                width = name_width
            )
            .trim_end()
            .to_string()
        })
        .collect();
    lines.push(format_progress_line(board.progress()));
    lines
}
