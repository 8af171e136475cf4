//! Core PlanStore implementation

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur when reading or writing documents
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error in document '{doc}': {source}")]
    Json {
        doc: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The document store
///
/// Each document is one JSON file named `<name>.json` under the base path.
/// Writes go through a sibling temp file and a rename so a crashed save
/// never leaves a torn document behind.
pub struct PlanStore {
    base_path: PathBuf,
}

impl PlanStore {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        debug!(?base_path, "Opened plan store");
        Ok(Self { base_path })
    }

    /// Path of a document file
    pub fn path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", name))
    }

    /// Save a document, replacing any previous content
    pub fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
            doc: name.to_string(),
            source,
        })?;

        let path = self.path(name);
        let tmp = self.base_path.join(format!("{}.json.tmp", name));
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;

        debug!(name, ?path, "Saved document");
        Ok(())
    }

    /// Load a document, propagating parse errors
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T, StoreError> {
        let path = self.path(name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }

        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|source| StoreError::Json {
            doc: name.to_string(),
            source,
        })
    }

    /// Load a document, falling back to the default for a missing or
    /// unparseable file
    ///
    /// A corrupt document is logged and discarded rather than blocking the
    /// application, matching how the UI treated bad local-storage blobs.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        match self.load(name) {
            Ok(value) => value,
            Err(StoreError::NotFound(_)) => {
                debug!(name, "Document missing, using default");
                T::default()
            }
            Err(e) => {
                warn!(name, error = %e, "Could not parse document, using default");
                T::default()
            }
        }
    }

    /// Raw text content of a document
    pub fn raw(&self, name: &str) -> Result<String, StoreError> {
        let path = self.path(name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(fs::read_to_string(&path)?)
    }

    /// Delete a document if it exists
    pub fn clear(&self, name: &str) -> Result<(), StoreError> {
        let path = self.path(name);
        if path.exists() {
            fs::remove_file(&path)?;
            info!(name, "Cleared document");
        }
        Ok(())
    }

    /// List all document names present in the store
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut docs = Vec::new();

        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map(|e| e == "json").unwrap_or(false)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                docs.push(stem.to_string());
            }
        }

        docs.sort();
        Ok(docs)
    }
}
