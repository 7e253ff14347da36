//! Autocomplete suggestion history
//!
//! One most-recent-first list per field, stored under
//! `autocomplete_history_{field}`.

use crate::repository::{load_or_empty, store_or_drop, SharedRepository};

/// Key prefix for per-field history lists
pub const HISTORY_KEY_PREFIX: &str = "autocomplete_history_";

/// Entries kept per field
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Per-field history of committed free-text values
#[derive(Debug, Clone)]
pub struct SuggestionStore {
    repo: SharedRepository,
    capacity: usize,
}

impl SuggestionStore {
    /// Create store with the default capacity
    #[inline]
    #[must_use]
    pub fn new(repo: SharedRepository) -> Self {
        Self::with_capacity(repo, DEFAULT_HISTORY_CAPACITY)
    }

    /// Create store keeping at most `capacity` entries per field
    #[inline]
    #[must_use]
    pub fn with_capacity(repo: SharedRepository, capacity: usize) -> Self {
        Self { repo, capacity }
    }

    /// Entries kept per field
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn key(field: &str) -> String {
        format!("{HISTORY_KEY_PREFIX}{field}")
    }

    /// History for a field, most recent first
    #[must_use]
    pub fn history(&self, field: &str) -> Vec<String> {
        load_or_empty(self.repo.as_ref(), &Self::key(field))
    }

    /// Record a committed value
    ///
    /// Blank values and values already in the history are ignored; an existing
    /// entry is not moved to the front. Returns `true` if the history changed.
    pub fn commit(&self, field: &str, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }

        let key = Self::key(field);
        let mut history = load_or_empty(self.repo.as_ref(), &key);
        if history.iter().any(|h| h == value) {
            return false;
        }

        history.insert(0, value.to_string());
        history.truncate(self.capacity);
        store_or_drop(self.repo.as_ref(), &key, &history);
        tracing::debug!(field, value, "committed suggestion");
        true
    }

    /// History entries missing from `builtin`, followed by `builtin`
    #[must_use]
    pub fn merged_options(&self, field: &str, builtin: &[String]) -> Vec<String> {
        let mut merged: Vec<String> = self
            .history(field)
            .into_iter()
            .filter(|h| !builtin.contains(h))
            .collect();
        merged.extend(builtin.iter().cloned());
        merged
    }

    /// Forget the history of one field
    pub fn clear(&self, field: &str) {
        let key = Self::key(field);
        if let Err(err) = self.repo.remove(&key) {
            tracing::error!(key, error = %err, "failed to clear suggestion history");
        }
    }

    /// Forget every field's history
    pub fn clear_all(&self) {
        let keys = match self.repo.keys() {
            Ok(keys) => keys,
            Err(err) => {
                tracing::error!(error = %err, "failed to list suggestion histories");
                return;
            }
        };
        for key in keys.iter().filter(|k| k.starts_with(HISTORY_KEY_PREFIX)) {
            if let Err(err) = self.repo.remove(key) {
                tracing::error!(key, error = %err, "failed to clear suggestion history");
            }
        }
    }

    /// Fields that currently have a stored history
    #[must_use]
    pub fn fields(&self) -> Vec<String> {
        match self.repo.keys() {
            Ok(keys) => keys
                .into_iter()
                .filter_map(|k| k.strip_prefix(HISTORY_KEY_PREFIX).map(str::to_string))
                .collect(),
            Err(err) => {
                tracing::error!(error = %err, "failed to list suggestion histories");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryRepository;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn store() -> SuggestionStore {
        SuggestionStore::new(Arc::new(MemoryRepository::new()))
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn commit_trims_and_prepends() {
        let store = store();
        assert!(store.commit("city", "  Zug "));
        assert!(store.commit("city", "Basel"));
        assert_eq!(store.history("city"), strings(&["Basel", "Zug"]));
    }

    #[test]
    fn commit_blank_is_noop() {
        let store = store();
        assert!(!store.commit("city", ""));
        assert!(!store.commit("city", "   \t"));
        assert!(store.history("city").is_empty());
    }

    #[test]
    fn commit_duplicate_keeps_single_entry() {
        let store = store();
        store.commit("street", "Bahnhofstrasse");
        store.commit("street", "Seestrasse");
        assert!(!store.commit("street", "Bahnhofstrasse"));

        // Inclusion check only, no move-to-front
        assert_eq!(
            store.history("street"),
            strings(&["Seestrasse", "Bahnhofstrasse"])
        );
    }

    #[test]
    fn history_is_capped_at_fifty() {
        let store = store();
        for i in 0..51 {
            store.commit("city", &format!("city-{i}"));
        }
        let history = store.history("city");
        assert_eq!(history.len(), 50);
        assert_eq!(history[0], "city-50");
        assert_eq!(history[49], "city-1");
        assert!(!history.contains(&"city-0".to_string()));
    }

    #[test]
    fn fields_are_independent() {
        let store = store();
        store.commit("city", "Zug");
        store.commit("country", "Switzerland");
        assert_eq!(store.history("city"), strings(&["Zug"]));
        assert_eq!(store.history("country"), strings(&["Switzerland"]));
    }

    #[test]
    fn merged_options_history_first_without_duplicates() {
        let store = store();
        store.commit("country", "Germany");
        store.commit("country", "Liechtenstein");

        let builtin = strings(&["Germany", "Switzerland"]);
        assert_eq!(
            store.merged_options("country", &builtin),
            strings(&["Liechtenstein", "Germany", "Switzerland"])
        );
    }

    #[test]
    fn clear_and_clear_all() {
        let repo = Arc::new(MemoryRepository::new());
        repo.put_raw("customPositions", "[\"Treasurer\"]");
        let store = SuggestionStore::new(repo.clone());

        store.commit("city", "Zug");
        store.commit("street", "Seestrasse");
        store.clear("city");
        assert!(store.history("city").is_empty());
        assert_eq!(store.fields(), strings(&["street"]));

        store.clear_all();
        assert!(store.fields().is_empty());
        // Unrelated keys survive
        assert!(repo.raw("customPositions").is_some());
    }

    #[test]
    fn unreadable_history_falls_back_to_empty() {
        let repo = Arc::new(MemoryRepository::new());
        repo.put_raw("autocomplete_history_city", "not a list");
        let store = SuggestionStore::new(repo);

        assert!(store.history("city").is_empty());
        assert!(store.commit("city", "Zug"));
        assert_eq!(store.history("city"), strings(&["Zug"]));
    }
}
