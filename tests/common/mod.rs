//! Common fixtures for integration tests.
//!
//! ```ignore
//! mod common;
//! use common::{test_user, session_store};
//!
//! let (store, storage) = session_store();
//! store.login("abc123", test_user()).unwrap();
//! ```

#![allow(dead_code)]

use std::sync::Arc;

use blueprint::adapters::mock::InMemoryStorage;
use blueprint::auth::{PersistedSession, SessionStore, TOKEN_KEY, USER_KEY};
use blueprint::models::{FeedItem, Post, Studio, User};

pub fn test_user() -> User {
    User {
        id: "user-1".to_string(),
        username: "corbusier".to_string(),
        email: "lc@example.com".to_string(),
        full_name: "Le Corbusier".to_string(),
        avatar: None,
    }
}

/// A store over fresh in-memory storage, plus a handle to that storage.
pub fn session_store() -> (SessionStore, InMemoryStorage) {
    let storage = InMemoryStorage::new();
    let store = SessionStore::new(PersistedSession::new(Arc::new(storage.clone())));
    (store, storage)
}

/// A store whose storage already holds a session written by an earlier run,
/// but which has not rehydrated it.
pub fn persisted_session_store(token: &str) -> (SessionStore, InMemoryStorage) {
    let storage = InMemoryStorage::with_entries([
        (TOKEN_KEY, token.to_string()),
        (USER_KEY, serde_json::to_string(&test_user()).unwrap()),
    ]);
    let store = SessionStore::new(PersistedSession::new(Arc::new(storage.clone())));
    (store, storage)
}

pub fn feed_item(id: &str, tag: &str) -> FeedItem {
    FeedItem {
        id: id.to_string(),
        item_type: tag.to_string(),
        title: Some(format!("Item {}", id)),
        content: None,
        author: None,
        created_at: None,
    }
}

pub fn post(id: &str, content: &str) -> Post {
    Post {
        id: id.to_string(),
        title: None,
        content: content.to_string(),
        studio_id: None,
        author: None,
        created_at: None,
    }
}

pub fn studio(id: &str, name: &str) -> Studio {
    Studio {
        id: id.to_string(),
        name: name.to_string(),
        slug: None,
        description: None,
        category: None,
        member_count: 12,
        is_private: false,
    }
}
