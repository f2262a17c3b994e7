//! Where settings live between runs.
//!
//! Settings are a flat JSON object (see [`SimulationConfig::serialize`]).
//! A store only moves that blob; interpreting it is the config's job.
//!
//! [`SimulationConfig::serialize`]: crate::config::SimulationConfig::serialize

use serde_json::Value;

use crate::error::FlowError;

/// Identifier under which settings are stored.
pub const SETTINGS_KEY: &str = "options";

/// A key/value persistence backend holding one settings blob.
pub trait SettingsStore {
    /// The stored settings, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<Value>, FlowError>;

    /// Replaces the stored settings.
    fn save(&mut self, raw: &Value) -> Result<(), FlowError>;
}

/// In-memory store for tests and runs that should not touch disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<Value>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `raw`.
    pub fn with(raw: Value) -> Self {
        Self {
            raw: Some(raw),
            saves: 0,
        }
    }

    /// How many times [`SettingsStore::save`] has been called.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Option<Value>, FlowError> {
        Ok(self.raw.clone())
    }

    fn save(&mut self, raw: &Value) -> Result<(), FlowError> {
        self.raw = Some(raw.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_store_loads_none() {
        assert_eq!(MemoryStore::new().load().unwrap(), None);
    }

    #[test]
    fn save_replaces_previous_blob() {
        let mut store = MemoryStore::with(json!({"count": 5000}));
        store.save(&json!({"count": 9000})).unwrap();
        assert_eq!(store.load().unwrap(), Some(json!({"count": 9000})));
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn works_through_a_trait_object() {
        let mut store: Box<dyn SettingsStore> = Box::new(MemoryStore::new());
        store.save(&json!({"inverted": true})).unwrap();
        assert_eq!(store.load().unwrap(), Some(json!({"inverted": true})));
    }
}
