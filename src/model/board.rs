use serde::{Deserialize, Serialize};

use super::category::{Category, Swatch};

/// The whole application state: categories in display order.
///
/// Serializes as a bare JSON array so the on-disk shape is exactly
/// `[{"id", "name", "color", "tasks": [...]}, ...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    pub categories: Vec<Category>,
}

/// Completion counts for one category or the whole board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Board {
    pub fn new(categories: Vec<Category>) -> Self {
        Board { categories }
    }

    /// The starter board shown before anything has been saved
    pub fn with_defaults() -> Self {
        let defaults = [
            ("1", "Client", Swatch::Pink),
            ("2", "Biz System", Swatch::Cyan),
            ("3", "Web & Funnel", Swatch::Yellow),
            ("4", "AI & Tech", Swatch::Green),
            ("5", "Learning", Swatch::Purple),
            ("6", "Personal", Swatch::Orange),
        ];
        Board {
            categories: defaults
                .into_iter()
                .map(|(id, name, swatch)| Category::new(id, name, swatch))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn find(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.id == id)
    }

    /// Board-wide completed/total task counts
    pub fn progress(&self) -> Progress {
        self.categories
            .iter()
            .fold(Progress::default(), |acc, cat| Progress {
                completed: acc.completed + cat.completed_count(),
                total: acc.total + cat.tasks.len(),
            })
    }
}

impl Category {
    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.completed_count(),
            total: self.tasks.len(),
        }
    }
}
