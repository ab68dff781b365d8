//! The durable slot holding the whole board as one JSON array.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::recovery::atomic_write;
use crate::model::board::Board;

/// Error type for slot reads and writes
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not access {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("could not serialize board: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("stored board data is malformed: {source}")]
    Malformed {
        /// The raw text that failed to parse
        raw: String,
        source: serde_json::Error,
    },
}

/// A single string-keyed durable location
pub trait Slot {
    /// Human-readable location, used in messages
    fn describe(&self) -> String;
    /// Current value, or `None` if never written
    fn read(&self) -> io::Result<Option<String>>;
    /// Replace the value
    fn write(&mut self, value: &str) -> io::Result<()>;
    /// Copy the current value somewhere safe before it gets overwritten.
    /// Returns where it went, or `None` if this slot keeps no backups.
    fn backup(&self) -> io::Result<Option<PathBuf>> {
        Ok(None)
    }
}

/// Slot backed by `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(dir: &Path, key: &str) -> Self {
        FileSlot {
            path: dir.join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Slot for FileSlot {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, value: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write(&self.path, value.as_bytes())
    }

    /// Copies the file aside as `<key>.json.bak`
    fn backup(&self) -> io::Result<Option<PathBuf>> {
        let bak = self.path.with_extension("json.bak");
        fs::copy(&self.path, &bak)?;
        Ok(Some(bak))
    }
}

/// In-memory slot for tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    pub value: Option<String>,
    /// When set, every write fails with a permission error
    pub fail_writes: bool,
}

impl MemorySlot {
    pub fn with_value(value: impl Into<String>) -> Self {
        MemorySlot {
            value: Some(value.into()),
            fail_writes: false,
        }
    }
}

impl Slot for MemorySlot {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.value.clone())
    }

    fn write(&mut self, value: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "slot is read-only",
            ));
        }
        self.value = Some(value.to_string());
        Ok(())
    }
}

/// Encode the board exactly as it is stored
pub fn encode(board: &Board) -> Result<String, StorageError> {
    Ok(serde_json::to_string(board)?)
}

/// Serialize the whole board and overwrite the slot
pub fn save(slot: &mut dyn Slot, board: &Board) -> Result<(), StorageError> {
    let text = encode(board)?;
    if let Err(source) = slot.write(&text) {
        return Err(StorageError::Io {
            path: slot.describe(),
            source,
        });
    }
    Ok(())
}

/// Read the slot. `None` means never written (or blank).
pub fn load(slot: &dyn Slot) -> Result<Option<Board>, StorageError> {
    let raw = slot.read().map_err(|source| StorageError::Io {
        path: slot.describe(),
        source,
    })?;
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Ok(None);
    };
    match serde_json::from_str::<Board>(&raw) {
        Ok(board) => Ok(Some(board)),
        Err(source) => Err(StorageError::Malformed { raw, source }),
    }
}
