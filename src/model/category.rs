use serde::{Deserialize, Serialize};

use super::task::Task;

/// One of the fixed category colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swatch {
    Pink,
    Cyan,
    Yellow,
    Green,
    Purple,
    Orange,
}

impl Swatch {
    /// All swatches in picker order
    pub const ALL: [Swatch; 6] = [
        Swatch::Pink,
        Swatch::Cyan,
        Swatch::Yellow,
        Swatch::Green,
        Swatch::Purple,
        Swatch::Orange,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Swatch::Pink => "pink",
            Swatch::Cyan => "cyan",
            Swatch::Yellow => "yellow",
            Swatch::Green => "green",
            Swatch::Purple => "purple",
            Swatch::Orange => "orange",
        }
    }

    /// Canonical hex form, as stored on disk
    pub fn hex(self) -> &'static str {
        match self {
            Swatch::Pink => "#FF005C",
            Swatch::Cyan => "#00F0FF",
            Swatch::Yellow => "#FFD600",
            Swatch::Green => "#00FF85",
            Swatch::Purple => "#9D4EDD",
            Swatch::Orange => "#FF6B35",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Swatch::Pink => (0xFF, 0x00, 0x5C),
            Swatch::Cyan => (0x00, 0xF0, 0xFF),
            Swatch::Yellow => (0xFF, 0xD6, 0x00),
            Swatch::Green => (0x00, 0xFF, 0x85),
            Swatch::Purple => (0x9D, 0x4E, 0xDD),
            Swatch::Orange => (0xFF, 0x6B, 0x35),
        }
    }

    /// Match a hex string against the palette (case-insensitive)
    pub fn from_hex(hex: &str) -> Option<Swatch> {
        Swatch::ALL
            .into_iter()
            .find(|s| s.hex().eq_ignore_ascii_case(hex.trim()))
    }

    /// Accept either a swatch name (`cyan`) or its hex value (`#00F0FF`)
    pub fn parse(s: &str) -> Option<Swatch> {
        let s = s.trim();
        Swatch::ALL
            .into_iter()
            .find(|sw| sw.name().eq_ignore_ascii_case(s))
            .or_else(|| Swatch::from_hex(s))
    }

    /// Next swatch in picker order, wrapping around
    pub fn next(self) -> Swatch {
        let idx = Swatch::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Swatch::ALL[(idx + 1) % Swatch::ALL.len()]
    }

    /// Previous swatch in picker order, wrapping around
    pub fn prev(self) -> Swatch {
        let idx = Swatch::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Swatch::ALL[(idx + Swatch::ALL.len() - 1) % Swatch::ALL.len()]
    }
}

impl std::fmt::Display for Swatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A named, colored grouping that owns an ordered list of tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Hex color, one of the palette values
    pub color: String,
    /// Tasks in display order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, swatch: Swatch) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
            color: swatch.hex().to_string(),
            tasks: Vec::new(),
        }
    }

    /// The palette entry for this category's color, if it is one
    pub fn swatch(&self) -> Option<Swatch> {
        Swatch::from_hex(&self.color)
    }

    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn task_position(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}
