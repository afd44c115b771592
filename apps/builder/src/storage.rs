#![allow(dead_code)]
//! Persistence collaborator: one versioned key holding the serialized
//! document.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

/// Storage key for the persisted document. Bump when the wire format
/// changes incompatibly.
pub const STORAGE_KEY: &str = "cv_v1";

pub trait DocumentStorage {
    /// Returns the stored payload, or `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<String>>;
    fn save(&mut self, payload: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// File-backed storage: the document lives at `<data_dir>/cv_v1.json`. The
/// directory is created on first save.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(format!("{STORAGE_KEY}.json"));
        info!("Document storage at {}", path.display());
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStorage for FileStorage {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("failed to read {}", self.path.display()))
            }
        }
    }

    fn save(&mut self, payload: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        fs::write(&self.path, payload)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("failed to remove {}", self.path.display()))
            }
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            slot: Some(payload.into()),
        }
    }

    pub fn payload(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl DocumentStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.slot.clone())
    }

    fn save(&mut self, payload: &str) -> Result<()> {
        self.slot = Some(payload.to_owned());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.slot = None;
        Ok(())
    }
}
