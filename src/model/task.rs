use serde::{Deserialize, Serialize};

/// A single to-do item. Always owned by exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque id, unique within the owning category
    pub id: String,
    /// Task text (trimmed, never empty when created through ops)
    pub text: String,
    /// Completion state
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a new, not-yet-completed task
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            text: text.into(),
            completed: false,
        }
    }

    /// Checkbox rendering used by the CLI and TUI
    pub fn checkbox(&self) -> &'static str {
        if self.completed { "[x]" } else { "[ ]" }
    }
}

/// Direction for an adjacent-swap reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    pub fn parse(s: &str) -> Option<MoveDirection> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "u" => Some(MoveDirection::Up),
            "down" | "d" => Some(MoveDirection::Down),
            _ => None,
        }
    }
}

impl std::fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveDirection::Up => write!(f, "up"),
            MoveDirection::Down => write!(f, "down"),
        }
    }
}
