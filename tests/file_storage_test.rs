//! Session persistence through the JSON file store.

mod common;

use std::sync::Arc;

use blueprint::adapters::FileStorage;
use blueprint::auth::{PersistedSession, SessionStore};
use blueprint::config::ClientConfig;
use common::test_user;
use tempfile::TempDir;

fn store_at(path: &std::path::Path) -> SessionStore {
    SessionStore::new(PersistedSession::new(Arc::new(FileStorage::with_path(path))))
}

#[test]
fn test_session_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    store_at(&path).login("abc123", test_user()).unwrap();

    let restarted = store_at(&path);
    assert!(!restarted.snapshot().is_authenticated());
    assert!(restarted.rehydrate());
    assert_eq!(restarted.snapshot().token(), Some("abc123"));
    assert_eq!(restarted.snapshot().user(), Some(&test_user()));
}

#[test]
fn test_logout_clears_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");

    let store = store_at(&path);
    store.login("abc123", test_user()).unwrap();
    store.logout().unwrap();

    let restarted = store_at(&path);
    assert!(!restarted.rehydrate());
    assert!(!restarted.persisted().has_credentials());
}

#[test]
fn test_corrupt_file_reads_as_signed_out() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "not json").unwrap();

    let store = store_at(&path);
    assert!(!store.rehydrate());
    assert_eq!(store.bearer_token(), None);
}

#[test]
fn test_config_points_at_storage_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.json");

    let storage = ClientConfig::default()
        .with_storage_path(&path)
        .storage()
        .unwrap();
    assert_eq!(storage.path(), path.as_path());
}
