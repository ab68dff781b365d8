use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::config_io;
use crate::io::storage::{self, FileSlot, Slot};
use crate::model::board::Board;
use crate::model::config::DEFAULT_STORAGE_KEY;

const CONFIG_TEMPLATE: &str = r##"[storage]
# Name of the board file in this directory (<key>.json)
key = "productivity-dashboard-data"

[board]
# Ask before deleting a category and all its tasks
confirm_delete = true
# Color preselected for new categories: pink, cyan, yellow, green, purple,
# orange, or the matching hex value
default_color = "#FF005C"
# Start with the starter categories when no board has been saved yet
seed_defaults = true

# --- UI Customization ---
# Uncomment and edit to override defaults.

[ui]
# show_key_hints = false
#
# [ui.colors]
# background = "#0C001B"
# surface = "#1A0B2E"
# text = "#E0DDFF"
# text_bright = "#FFFFFF"
# dim = "#6B6490"
# highlight = "#00F0FF"
# red = "#FF005C"
# green = "#00FF85"
"##;

pub fn cmd_init(args: InitArgs, data_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = config_io::resolve_data_dir(data_dir);
    let config_path = config_io::config_path(&dir);

    if config_path.exists() && !args.force {
        return Err(format!(
            "taskboard is already initialized in {} (use --force to reinitialize)",
            dir.display()
        )
        .into());
    }

    fs::create_dir_all(&dir)?;
    fs::write(&config_path, CONFIG_TEMPLATE)?;

    let mut slot = FileSlot::new(&dir, DEFAULT_STORAGE_KEY);
    let board = if args.empty {
        Board::default()
    } else {
        Board::with_defaults()
    };
    let existing = slot.path().exists();
    let write_board = args.force || !existing;
    let backup = if write_board && existing {
        slot.backup()?
    } else {
        None
    };
    if write_board {
        storage::save(&mut slot, &board)?;
    }

    println!("initialized taskboard in {}", dir.display());
    if let Some(path) = backup {
        println!("  previous board saved to {}", path.display());
    }
    if write_board {
        println!("  {} categories", board.len());
    } else {
        println!("  kept existing board {}", slot.path().display());
    }
    Ok(())
}
