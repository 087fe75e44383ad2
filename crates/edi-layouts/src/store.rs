//! Persistence boundary for the layout-override document
//!
//! The override set is stored as one serialized JSON document under a single
//! well-known key, read-modify-written as a whole. The store knows nothing
//! about layout semantics; deserialization and merging happen in the
//! registry.

use crate::Result;
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default file name for the override document.
pub const OVERRIDE_FILE_NAME: &str = "custom-edi-layouts.json";

/// Key-value persistence capability for the override document.
///
/// Load and save are synchronous; callers must treat them as potentially
/// failing (quota, corruption) but never as asynchronous. A single active
/// editor is assumed; concurrent saves are out of scope.
pub trait LayoutStore {
    /// The persisted document, or `None` when no overrides were ever saved.
    fn load(&self) -> Result<Option<String>>;

    /// Persist `document` as the new override set.
    fn save(&self, document: &str) -> Result<()>;

    /// Erase the persisted override set entirely.
    fn clear(&self) -> Result<()>;
}

/// In-memory store for tests and session-only use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    // single-threaded by design; interior mutability keeps the trait &self
    document: RefCell<Option<String>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an existing document.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: RefCell::new(Some(document.into())),
        }
    }
}

impl LayoutStore for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.document.borrow().clone())
    }

    fn save(&self, document: &str) -> Result<()> {
        *self.document.borrow_mut() = Some(document.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.document.borrow_mut() = None;
        Ok(())
    }
}

/// File-backed store: the document lives in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LayoutStore for JsonFileStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(document) => Ok(Some(document)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&self, document: &str) -> Result<()> {
        fs::write(&self.path, document)?;
        debug!(path = %self.path.display(), "layout overrides saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
