use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub board: BoardSettings,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Name of the durable slot; the file is `<key>.json`
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig { key: default_key() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSettings {
    /// Ask before deleting a category
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
    /// Color preselected for new categories (name or hex)
    #[serde(default = "default_color")]
    pub default_color: String,
    /// Start with the starter categories when nothing was saved yet
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
}

impl Default for BoardSettings {
    fn default() -> Self {
        BoardSettings {
            confirm_delete: true,
            default_color: default_color(),
            seed_defaults: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

pub const DEFAULT_STORAGE_KEY: &str = "productivity-dashboard-data";

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_color() -> String {
    "#FF005C".to_string()
}

fn default_true() -> bool {
    true
}
