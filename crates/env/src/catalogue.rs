//! Registry of every declared configuration key

use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::Arc;
use typenv_core::ConfigEntry;

/// Write-once-per-key registry of [`ConfigEntry`] metadata
///
/// The first registration of a key wins for the lifetime of the catalogue.
/// Later registrations of the same key are ignored, not merged, even when
/// their type, default or constraints differ.
#[derive(Debug, Default)]
pub struct Catalogue {
    entries: Mutex<IndexMap<String, Arc<ConfigEntry>>>,
}

impl Catalogue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry` unless its key is already present
    ///
    /// Returns the entry that is in force for the key, which is the
    /// previously registered one on a duplicate.
    pub fn register(&self, entry: ConfigEntry) -> Arc<ConfigEntry> {
        let mut entries = self.entries.lock();
        if let Some(existing) = entries.get(&entry.key) {
            return Arc::clone(existing);
        }

        tracing::debug!(
            key = %entry.key,
            env_type = %entry.env_type,
            required = entry.is_required,
            "registered config entry"
        );
        let entry = Arc::new(entry);
        entries.insert(entry.key.clone(), Arc::clone(&entry));
        entry
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<ConfigEntry>> {
        self.entries.lock().get(key).cloned()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    /// All entries sorted lexicographically by key
    #[must_use]
    pub fn entries(&self) -> Vec<Arc<ConfigEntry>> {
        let mut entries: Vec<_> = self.entries.lock().values().cloned().collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries
    }

    /// Keys in the order they were first declared
    #[must_use]
    pub fn declared_keys(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use typenv_core::{EnvType, EnvValue};

    fn entry_with_default(key: &str, default: &str) -> ConfigEntry {
        let mut entry = ConfigEntry::new(key, EnvType::Str);
        entry.default_value = Some(EnvValue::Str(default.to_string()));
        entry
    }

    #[test]
    fn test_first_registration_wins() {
        let catalogue = Catalogue::new();

        let first = catalogue.register(entry_with_default("K", "A"));
        let second = catalogue.register(entry_with_default("K", "B"));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            catalogue.get("K").unwrap().default_value,
            Some(EnvValue::Str("A".to_string()))
        );
        assert_eq!(catalogue.len(), 1);
    }

    #[test]
    fn test_duplicate_with_other_type_is_ignored() {
        let catalogue = Catalogue::new();
        catalogue.register(ConfigEntry::new("PORT", EnvType::Int));
        catalogue.register(ConfigEntry::new("PORT", EnvType::Str));

        assert_eq!(catalogue.get("PORT").unwrap().env_type, EnvType::Int);
    }

    #[test]
    fn test_entries_are_sorted_by_raw_key() {
        let catalogue = Catalogue::new();
        for key in ["b_key", "A_KEY", "B_KEY", "a_key"] {
            catalogue.register(ConfigEntry::new(key, EnvType::Str));
        }

        let keys: Vec<_> = catalogue.entries().iter().map(|e| e.key.clone()).collect();
        assert_eq!(keys, vec!["A_KEY", "B_KEY", "a_key", "b_key"]);
        assert_eq!(
            catalogue.declared_keys(),
            vec!["b_key", "A_KEY", "B_KEY", "a_key"]
        );
    }

    #[test]
    fn test_empty_catalogue() {
        let catalogue = Catalogue::new();
        assert!(catalogue.is_empty());
        assert!(catalogue.entries().is_empty());
        assert!(!catalogue.contains("ANY"));
    }

    #[test]
    fn test_concurrent_first_registration() {
        let catalogue = Arc::new(Catalogue::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let catalogue = Arc::clone(&catalogue);
                thread::spawn(move || {
                    catalogue.register(entry_with_default("SHARED", &format!("v{i}")))
                })
            })
            .collect();

        let winners: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("registration thread panicked"))
            .collect();

        assert_eq!(catalogue.len(), 1);
        let stored = catalogue.get("SHARED").unwrap();
        assert!(winners.iter().all(|w| Arc::ptr_eq(w, &stored)));
    }
}
