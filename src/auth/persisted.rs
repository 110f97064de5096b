//! Durable copy of the session.
//!
//! Two string keys in the client's persistent storage: the bearer token and
//! the JSON-serialized user record. Reads are total: storage failures and
//! malformed records are logged and read back as absent.

use std::sync::Arc;

use crate::error::BlueprintResult;
use crate::models::User;
use crate::traits::PersistentStorage;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key for the serialized user record.
pub const USER_KEY: &str = "user";

#[derive(Clone)]
pub struct PersistedSession {
    storage: Arc<dyn PersistentStorage>,
}

impl std::fmt::Debug for PersistedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedSession").finish_non_exhaustive()
    }
}

impl PersistedSession {
    pub fn new(storage: Arc<dyn PersistentStorage>) -> Self {
        Self { storage }
    }

    pub fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    pub fn user(&self) -> Option<User> {
        let raw = self.read(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Ignoring malformed persisted user record: {}", e);
                None
            }
        }
    }

    /// True when either key holds a usable value.
    pub fn has_credentials(&self) -> bool {
        self.token().is_some() || self.user().is_some()
    }

    pub fn save(&self, token: &str, user: &User) -> BlueprintResult<()> {
        let user_json = serde_json::to_string(user)?;
        self.storage.set(TOKEN_KEY, token)?;
        self.storage.set(USER_KEY, &user_json)?;
        Ok(())
    }

    pub fn clear(&self) -> BlueprintResult<()> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)?;
        Ok(())
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read persisted {}: {}", key, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InMemoryStorage;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            username: "gehry".to_string(),
            email: "gehry@example.com".to_string(),
            full_name: "Frank Gehry".to_string(),
            avatar: None,
        }
    }

    #[test]
    fn test_save_then_read() {
        let storage = InMemoryStorage::new();
        let persisted = PersistedSession::new(Arc::new(storage.clone()));

        persisted.save("abc123", &user()).unwrap();

        assert_eq!(persisted.token().as_deref(), Some("abc123"));
        assert_eq!(persisted.user(), Some(user()));
        assert!(storage.entries().contains_key(USER_KEY));
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let storage = InMemoryStorage::new();
        let persisted = PersistedSession::new(Arc::new(storage.clone()));
        persisted.save("abc123", &user()).unwrap();

        persisted.clear().unwrap();

        assert!(!persisted.has_credentials());
        assert!(storage.entries().is_empty());
    }

    #[test]
    fn test_malformed_user_reads_as_absent() {
        let storage = InMemoryStorage::with_entries([(USER_KEY, "{not json")]);
        let persisted = PersistedSession::new(Arc::new(storage));
        assert_eq!(persisted.user(), None);
        assert!(!persisted.has_credentials());
    }

    #[test]
    fn test_token_alone_counts_as_credentials() {
        let storage = InMemoryStorage::with_entries([(TOKEN_KEY, "abc123")]);
        let persisted = PersistedSession::new(Arc::new(storage));
        assert!(persisted.has_credentials());
        assert_eq!(persisted.user(), None);
    }

    #[test]
    fn test_read_failure_reads_as_absent() {
        let storage = InMemoryStorage::with_entries([(TOKEN_KEY, "abc123")]);
        storage.set_read_should_fail(true);
        let persisted = PersistedSession::new(Arc::new(storage));
        assert_eq!(persisted.token(), None);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let storage = InMemoryStorage::new();
        storage.set_write_should_fail(true);
        let persisted = PersistedSession::new(Arc::new(storage));
        assert!(persisted.save("abc123", &user()).is_err());
    }
}
