use std::path::{Path, PathBuf};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::io::storage::{self, FileSlot, Slot, StorageError};
use crate::model::board::Board;
use crate::model::category::{Category, Swatch};
use crate::model::config::BoardConfig;
use crate::model::task::MoveDirection;
use crate::ops::ids::reissue_duplicates;
use crate::ops::{Action, IdGenerator, reduce};

/// The host around the reducer: owns the board, its slot and the id
/// generator, and saves after every accepted action.
pub struct Session {
    board: Board,
    slot: Box<dyn Slot>,
    ids: IdGenerator,
    /// Where the recovery log lives; `None` disables it
    data_dir: Option<PathBuf>,
    /// Message from the most recent failed save, cleared by the next success
    pub last_save_error: Option<String>,
    warnings: Vec<String>,
    quiet: bool,
}

impl Session {
    /// Open the board stored in `data_dir` under the configured key
    pub fn open(data_dir: &Path, config: &BoardConfig) -> Result<Session, StorageError> {
        let slot = FileSlot::new(data_dir, &config.storage.key);
        Self::from_slot(
            Box::new(slot),
            config.board.seed_defaults,
            Some(data_dir.to_path_buf()),
        )
    }

    /// Load from any slot. Absent or malformed data falls back to the
    /// default board (or an empty one when `seed_defaults` is off).
    pub fn from_slot(
        slot: Box<dyn Slot>,
        seed_defaults: bool,
        data_dir: Option<PathBuf>,
    ) -> Result<Session, StorageError> {
        let mut session = Session {
            board: Board::default(),
            slot,
            ids: IdGenerator::new(),
            data_dir,
            last_save_error: None,
            warnings: Vec::new(),
            quiet: false,
        };

        let loaded = match storage::load(session.slot.as_ref()) {
            Ok(loaded) => loaded,
            Err(StorageError::Malformed { raw, source }) => {
                session.quarantine(&raw, &source.to_string());
                None
            }
            Err(e) => return Err(e),
        };

        session.board = match loaded {
            Some(board) => board,
            None if seed_defaults => Board::with_defaults(),
            None => Board::default(),
        };

        session.ids.observe_board(&session.board);
        let replaced = reissue_duplicates(&mut session.board, &mut session.ids);
        if replaced > 0 {
            session.warn(format!(
                "{} duplicate id(s) in {} were replaced",
                replaced,
                session.slot.describe()
            ));
            // Reissued ids come from the clock; store them so they stay put
            session.persist("repair-ids");
        }
        Ok(session)
    }

    /// Back up unparseable slot contents and record them in the recovery log
    fn quarantine(&mut self, raw: &str, error: &str) {
        let location = self.slot.describe();
        let backup = match self.slot.backup() {
            Ok(path) => path,
            Err(e) => {
                self.warn(format!("could not back up {}: {}", location, e));
                None
            }
        };
        if let Some(dir) = &self.data_dir {
            let mut entry = RecoveryEntry::new(
                RecoveryCategory::Parser,
                format!("unreadable board data in {}", location),
            )
            .field("Error", error);
            if let Some(path) = &backup {
                entry = entry.field("Backup", path.display().to_string());
            }
            recovery::log_recovery(dir, entry.body(raw));
        }
        let saved_to = backup
            .map(|p| format!(" (copy saved to {})", p.display()))
            .unwrap_or_default();
        self.warn(format!(
            "{} could not be parsed, starting fresh{}",
            location, saved_to
        ));
    }

    fn warn(&mut self, message: String) {
        if !self.quiet {
            eprintln!("warning: {}", message);
        }
        self.warnings.push(message);
    }

    /// Stop printing warnings to stderr; they are still collected
    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }

    /// Take the warnings collected so far
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn slot(&self) -> &dyn Slot {
        self.slot.as_ref()
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Apply an action. Returns false when the reducer rejected it.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let kind = action.kind();
        let Some(next) = reduce(&self.board, action) else {
            return false;
        };
        self.board = next;
        self.persist(kind);
        true
    }

    fn persist(&mut self, kind: &str) {
        let err = match storage::save(self.slot.as_mut(), &self.board) {
            Ok(()) => {
                self.last_save_error = None;
                return;
            }
            Err(e) => e,
        };
        if let Some(dir) = &self.data_dir {
            let body = storage::encode(&self.board).unwrap_or_default();
            recovery::log_recovery(
                dir,
                RecoveryEntry::new(RecoveryCategory::Write, "board could not be saved")
                    .field("Action", kind)
                    .field("Target", self.slot.describe())
                    .field("Error", err.to_string())
                    .body(body),
            );
        }
        self.warn(format!("changes kept in memory only: {}", err));
        self.last_save_error = Some(err.to_string());
    }

    // -----------------------------------------------------------------------
    // UI event surface
    // -----------------------------------------------------------------------

    /// Returns the new category's id
    pub fn add_category(&mut self, name: &str, swatch: Swatch) -> Option<String> {
        let id = self.ids.next_id();
        let accepted = self.dispatch(Action::AddCategory {
            id: id.clone(),
            name: name.to_string(),
            color: swatch.hex().to_string(),
        });
        accepted.then_some(id)
    }

    pub fn update_category(&mut self, category: Category) -> bool {
        self.dispatch(Action::UpdateCategory(category))
    }

    /// Delete a category once `confirm` agrees. The removed category is
    /// kept in the recovery log.
    pub fn delete_category(&mut self, id: &str, confirm: impl FnOnce(&Category) -> bool) -> bool {
        let Some(category) = self.board.find(id).cloned() else {
            return false;
        };
        if !confirm(&category) {
            return false;
        }
        let accepted = self.dispatch(Action::DeleteCategory { id: id.to_string() });
        if accepted && let Some(dir) = &self.data_dir {
            recovery::log_category_deletion(dir, &category);
        }
        accepted
    }

    /// Returns the new task's id
    pub fn add_task(&mut self, category_id: &str, text: &str) -> Option<String> {
        let task_id = self.ids.next_id();
        let accepted = self.dispatch(Action::AddTask {
            category_id: category_id.to_string(),
            task_id: task_id.clone(),
            text: text.to_string(),
        });
        accepted.then_some(task_id)
    }

    pub fn toggle_task(&mut self, category_id: &str, task_id: &str) -> bool {
        self.dispatch(Action::ToggleTask {
            category_id: category_id.to_string(),
            task_id: task_id.to_string(),
        })
    }

    pub fn delete_task(&mut self, category_id: &str, task_id: &str) -> bool {
        self.dispatch(Action::DeleteTask {
            category_id: category_id.to_string(),
            task_id: task_id.to_string(),
        })
    }

    pub fn move_task(&mut self, category_id: &str, task_id: &str, direction: MoveDirection) -> bool {
        self.dispatch(Action::MoveTask {
            category_id: category_id.to_string(),
            task_id: task_id.to_string(),
            direction,
        })
    }
}
