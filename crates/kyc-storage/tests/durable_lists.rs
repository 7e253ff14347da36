//! Durable list behaviour across repository instances.
//!
//! These tests exercise the stores over the file-backed repository, which is
//! what a session uses between launches.

use kyc_storage::{
    FileRepository, ListRepository, PositionRegistry, SharedRepository, SuggestionStore,
    BUILTIN_POSITIONS,
};
use proptest::prelude::*;
use std::sync::Arc;

fn file_repo(dir: &tempfile::TempDir) -> SharedRepository {
    Arc::new(FileRepository::open(dir.path()).expect("temp dir is writable"))
}

#[test]
fn history_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let store = SuggestionStore::new(file_repo(&dir));
    store.commit("city", "Zug");
    store.commit("city", "Zurich");

    let reopened = SuggestionStore::new(file_repo(&dir));
    assert_eq!(reopened.history("city"), vec!["Zurich", "Zug"]);
}

#[test]
fn corrupt_file_reads_as_empty_and_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("customPositions.json"), "{{{").unwrap();

    let registry = PositionRegistry::new(file_repo(&dir));
    assert!(registry.custom().is_empty());
    assert_eq!(registry.all().len(), BUILTIN_POSITIONS.len());

    registry.add("Treasurer").unwrap();
    let text = std::fs::read_to_string(dir.path().join("customPositions.json")).unwrap();
    assert_eq!(text, r#"["Treasurer"]"#);
}

#[test]
fn missing_directory_write_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileRepository::open(dir.path().join("gone")).unwrap();
    std::fs::remove_dir_all(repo.root()).unwrap();

    let store = SuggestionStore::new(Arc::new(repo.clone()));
    // Write fails silently, read falls back to empty
    store.commit("city", "Zug");
    assert!(store.history("city").is_empty());
    assert!(repo.keys().is_err());
}

proptest! {
    #[test]
    fn prop_history_never_exceeds_capacity_nor_duplicates(
        values in prop::collection::vec("[a-e]{1,2}", 0..120),
        capacity in 1usize..20,
    ) {
        let repo: SharedRepository = Arc::new(kyc_storage::MemoryRepository::new());
        let store = SuggestionStore::with_capacity(repo, capacity);
        for v in &values {
            store.commit("field", v);
        }

        let history = store.history("field");
        prop_assert!(history.len() <= capacity);
        let mut deduped = history.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), history.len());
    }
}
