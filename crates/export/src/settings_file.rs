//! Settings persisted to a JSON file.
//!
//! The file holds one JSON object mapping settings identifiers to blobs,
//! so several tools can share a file. A missing file reads as empty.

use std::fs;
use std::path::{Path, PathBuf};

use flow_fields_core::error::FlowError;
use flow_fields_core::persistence::{SettingsStore, SETTINGS_KEY};
use log::{debug, warn};
use serde_json::{Map, Value};

/// A [`SettingsStore`] backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    key: String,
}

impl JsonFileStore {
    /// A store at `path` using the default identifier [`SETTINGS_KEY`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_key(path, SETTINGS_KEY)
    }

    pub fn with_key(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn read_all(&self) -> Result<Map<String, Value>, FlowError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(FlowError::Io(format!("{}: {e}", self.path.display()))),
        };
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(map),
            _ => Err(FlowError::Serialization(format!(
                "{}: expected a JSON object",
                self.path.display()
            ))),
        }
    }

    /// Entries to keep when rewriting the file. A corrupt file is treated
    /// as empty; a file that cannot be read is an error, so entries under
    /// other identifiers are never dropped silently.
    fn entries_to_keep(&self) -> Result<Map<String, Value>, FlowError> {
        match self.read_all() {
            Err(FlowError::Serialization(msg)) => {
                warn!("replacing unreadable settings file: {msg}");
                Ok(Map::new())
            }
            other => other,
        }
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Result<Option<Value>, FlowError> {
        Ok(self.read_all()?.remove(&self.key))
    }

    /// Rewrites the file, keeping entries under other identifiers. A
    /// corrupt existing file is replaced.
    fn save(&mut self, raw: &Value) -> Result<(), FlowError> {
        let mut all = self.entries_to_keep()?;
        all.insert(self.key.clone(), raw.clone());
        let text = serde_json::to_string_pretty(&Value::Object(all))?;
        fs::write(&self.path, text)
            .map_err(|e| FlowError::Io(format!("{}: {e}", self.path.display())))?;
        debug!("saved settings '{}' to {}", self.key, self.path.display());
        Ok(())
    }
}
