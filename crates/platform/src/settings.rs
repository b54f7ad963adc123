//! Persistent key/value settings.
//!
//! Keys are grouped by namespace, like NVS on the target. [`MemorySettings`]
//! keeps everything in RAM and backs tests and the simulator.

use heapless::{String, Vec};

/// Maximum namespace or key length.
pub const MAX_KEY_LEN: usize = 15;

/// Maximum number of entries [`MemorySettings`] holds.
pub const MAX_ENTRIES: usize = 16;

/// Settings store.
pub trait SettingsStore {
    /// Read a boolean, `None` when unset.
    fn get_bool(&self, namespace: &str, key: &str) -> Option<bool>;

    /// Write a boolean.
    fn set_bool(&mut self, namespace: &str, key: &str, value: bool) -> Result<(), SettingsError>;
}

/// Settings errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Namespace or key longer than [`MAX_KEY_LEN`].
    #[error("settings key too long")]
    KeyTooLong,
    /// No room for another entry.
    #[error("settings store full")]
    Full,
    /// Backing storage failed.
    #[error("settings storage error")]
    Storage,
}

struct Entry {
    namespace: String<MAX_KEY_LEN>,
    key: String<MAX_KEY_LEN>,
    value: bool,
}

/// RAM-only settings store.
#[derive(Default)]
pub struct MemorySettings {
    entries: Vec<Entry, MAX_ENTRIES>,
}

impl MemorySettings {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, namespace: &str, key: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.namespace.as_str() == namespace && e.key.as_str() == key)
    }
}

impl SettingsStore for MemorySettings {
    fn get_bool(&self, namespace: &str, key: &str) -> Option<bool> {
        self.find(namespace, key).map(|e| e.value)
    }

    fn set_bool(&mut self, namespace: &str, key: &str, value: bool) -> Result<(), SettingsError> {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.namespace.as_str() == namespace && e.key.as_str() == key)
        {
            entry.value = value;
            return Ok(());
        }
        let entry = Entry {
            namespace: String::try_from(namespace).map_err(|()| SettingsError::KeyTooLong)?,
            key: String::try_from(key).map_err(|()| SettingsError::KeyTooLong)?,
            value,
        };
        self.entries.push(entry).map_err(|_| SettingsError::Full)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unset_key_reads_none() {
        let store = MemorySettings::new();
        assert_eq!(store.get_bool("application", "press_to_talk"), None);
    }

    #[test]
    fn set_then_get() {
        let mut store = MemorySettings::new();
        store.set_bool("application", "press_to_talk", true).unwrap();
        assert_eq!(store.get_bool("application", "press_to_talk"), Some(true));
        store.set_bool("application", "press_to_talk", false).unwrap();
        assert_eq!(store.get_bool("application", "press_to_talk"), Some(false));
    }

    #[test]
    fn namespaces_are_separate() {
        let mut store = MemorySettings::new();
        store.set_bool("a", "flag", true).unwrap();
        assert_eq!(store.get_bool("b", "flag"), None);
    }

    #[test]
    fn long_key_is_rejected() {
        let mut store = MemorySettings::new();
        assert_eq!(
            store.set_bool("application", "a_key_that_is_far_too_long", true),
            Err(SettingsError::KeyTooLong)
        );
    }
}
