//! In-memory persistence port.

use crate::Result;
use crate::storage::traits::PersistencePort;
use std::collections::HashMap;

/// Persistence port backed by a `HashMap`.
///
/// Nothing survives the process. Useful for hosts that manage durability
/// themselves and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryPort {
    slots: HashMap<String, String>,
}

impl MemoryPort {
    /// Creates an empty port.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a port with `value` already stored under `key`.
    #[must_use]
    pub fn with_blob(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), value.into());
        Self { slots }
    }
}

impl PersistencePort for MemoryPort {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let port = MemoryPort::new();
        assert!(port.get("records").unwrap().is_none());
    }

    #[test]
    fn test_set_replaces_value() {
        let mut port = MemoryPort::new();
        port.set("records", "[]").unwrap();
        port.set("records", "[1]").unwrap();
        assert_eq!(port.get("records").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_with_blob() {
        let port = MemoryPort::with_blob("records", "x");
        assert_eq!(port.get("records").unwrap().as_deref(), Some("x"));
        assert!(port.get("other").unwrap().is_none());
    }
}
