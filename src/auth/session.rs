//! In-memory session state.
//!
//! One [`SessionStore`] per client, cloned into whatever needs it (the API
//! client for its bearer token, the auth gate, the login and logout flows).
//! Changes are published on a watch channel.

use std::sync::Arc;

use tokio::sync::watch;

use super::persisted::PersistedSession;
use crate::error::BlueprintResult;
use crate::models::User;

/// `{ is_authenticated, token, user }`, with `is_authenticated` derived so
/// it holds exactly when both a token and a user are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: impl Into<String>, user: User) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    state: Arc<watch::Sender<Session>>,
    persisted: PersistedSession,
}

impl SessionStore {
    /// Create an empty store. The persisted copy is not read until
    /// [`SessionStore::rehydrate`].
    pub fn new(persisted: PersistedSession) -> Self {
        let (state, _) = watch::channel(Session::anonymous());
        Self {
            state: Arc::new(state),
            persisted,
        }
    }

    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn persisted(&self) -> &PersistedSession {
        &self.persisted
    }

    /// Load the persisted token and user into memory.
    ///
    /// Returns true when both were present and the store is now
    /// authenticated.
    pub fn rehydrate(&self) -> bool {
        match (self.persisted.token(), self.persisted.user()) {
            (Some(token), Some(user)) => {
                tracing::debug!("Session rehydrated for {}", user.username);
                self.state.send_replace(Session::authenticated(token, user));
                true
            }
            _ => {
                tracing::debug!("No complete persisted session to rehydrate");
                false
            }
        }
    }

    /// Persist and publish a freshly issued session (login or registration).
    pub fn login(&self, token: impl Into<String>, user: User) -> BlueprintResult<()> {
        let token = token.into();
        self.persisted.save(&token, &user)?;
        tracing::info!("Signed in as {}", user.username);
        self.state.send_replace(Session::authenticated(token, user));
        Ok(())
    }

    /// Clear both copies of the session.
    ///
    /// The in-memory session is cleared even when storage fails.
    pub fn logout(&self) -> BlueprintResult<()> {
        self.state.send_replace(Session::anonymous());
        self.persisted.clear()?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Token for the `Authorization` header: the in-memory one, else the
    /// persisted one while the store is still catching up.
    pub fn bearer_token(&self) -> Option<String> {
        self.state
            .borrow()
            .token()
            .map(str::to_string)
            .or_else(|| self.persisted.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InMemoryStorage;
    use crate::auth::persisted::{TOKEN_KEY, USER_KEY};

    fn user() -> User {
        User {
            id: "u1".to_string(),
            username: "hadid".to_string(),
            email: "hadid@example.com".to_string(),
            full_name: "Zaha Hadid".to_string(),
            avatar: Some("https://cdn.example.com/z.png".to_string()),
        }
    }

    fn store_with(storage: &InMemoryStorage) -> SessionStore {
        SessionStore::new(PersistedSession::new(Arc::new(storage.clone())))
    }

    #[test]
    fn test_session_authenticated_requires_token_and_user() {
        assert!(!Session::anonymous().is_authenticated());
        assert!(Session::authenticated("t", user()).is_authenticated());
    }

    #[test]
    fn test_login_persists_and_publishes() {
        let storage = InMemoryStorage::new();
        let store = store_with(&storage);
        let mut rx = store.subscribe();

        store.login("abc123", user()).unwrap();

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_authenticated());
        assert_eq!(storage.entries().get(TOKEN_KEY).map(String::as_str), Some("abc123"));
    }

    #[test]
    fn test_login_failure_leaves_store_anonymous() {
        let storage = InMemoryStorage::new();
        storage.set_write_should_fail(true);
        let store = store_with(&storage);

        assert!(store.login("abc123", user()).is_err());
        assert!(!store.snapshot().is_authenticated());
    }

    #[test]
    fn test_logout_clears_everything() {
        let storage = InMemoryStorage::new();
        let store = store_with(&storage);
        store.login("abc123", user()).unwrap();

        store.logout().unwrap();

        assert_eq!(store.snapshot(), Session::anonymous());
        assert!(storage.entries().is_empty());
        assert_eq!(store.bearer_token(), None);
    }

    #[test]
    fn test_rehydrate_from_storage() {
        let storage = InMemoryStorage::with_entries([
            (TOKEN_KEY, "abc123".to_string()),
            (USER_KEY, serde_json::to_string(&user()).unwrap()),
        ]);
        let store = store_with(&storage);
        assert!(!store.snapshot().is_authenticated());

        assert!(store.rehydrate());
        assert_eq!(store.snapshot().user(), Some(&user()));
    }

    #[test]
    fn test_rehydrate_needs_both_keys() {
        let storage = InMemoryStorage::with_entries([(TOKEN_KEY, "abc123")]);
        let store = store_with(&storage);
        assert!(!store.rehydrate());
        assert!(!store.snapshot().is_authenticated());
    }

    #[test]
    fn test_bearer_token_falls_back_to_persisted() {
        let storage = InMemoryStorage::with_entries([(TOKEN_KEY, "abc123")]);
        let store = store_with(&storage);
        assert_eq!(store.bearer_token().as_deref(), Some("abc123"));
    }
}
