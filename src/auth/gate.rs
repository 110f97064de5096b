//! Gate in front of protected screens.
//!
//! ```text
//!  mount ──► Initializing ──(grace elapsed, or nothing persisted)──► Resolved
//!                                                                      │
//!                                  session present? ──yes──► Authorized
//!                                          │
//!                                          no ──► Redirecting ──► navigate(SIGN_IN_ROUTE)
//! ```
//!
//! The grace window lets the in-memory store catch up with persisted
//! credentials after a restart. Any one of store flag, store token, or
//! persisted token counts as a session. The API still enforces
//! authorization on every request.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use super::session::SessionStore;
use crate::traits::Navigator;

pub const DEFAULT_AUTH_GRACE: Duration = Duration::from_millis(300);

pub const SIGN_IN_ROUTE: &str = "/sign-in";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Initializing,
    Resolved,
    Redirecting,
    Authorized,
}

pub struct AuthGate {
    store: SessionStore,
    navigator: Arc<dyn Navigator>,
    grace: Duration,
    state: watch::Sender<GateState>,
}

impl AuthGate {
    pub fn new(store: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        let (state, _) = watch::channel(GateState::Initializing);
        Self {
            store,
            navigator,
            grace: DEFAULT_AUTH_GRACE,
            state,
        }
    }

    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn grace(&self) -> Duration {
        self.grace
    }

    pub fn state(&self) -> GateState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<GateState> {
        self.state.subscribe()
    }

    /// Run the gate for a freshly mounted screen and return where it landed
    /// (`Authorized` or `Redirecting`).
    pub async fn mount(&self) -> GateState {
        self.transition(GateState::Initializing);

        if self.store.persisted().has_credentials() {
            tracing::debug!(
                "Persisted credentials found, waiting {:?} for session",
                self.grace
            );
            tokio::time::sleep(self.grace).await;
        }

        self.resolve()
    }

    /// Re-check the session after a login or logout while mounted.
    ///
    /// Ignored during the grace window.
    pub fn on_session_changed(&self) -> GateState {
        match self.state() {
            GateState::Initializing => GateState::Initializing,
            _ => self.resolve(),
        }
    }

    /// Run `child` only when authorized.
    pub fn render<R>(&self, child: impl FnOnce() -> R) -> Option<R> {
        match self.state() {
            GateState::Authorized => Some(child()),
            _ => None,
        }
    }

    fn session_present(&self) -> bool {
        let session = self.store.snapshot();
        session.is_authenticated()
            || session.token().is_some()
            || self.store.persisted().token().is_some()
    }

    fn resolve(&self) -> GateState {
        let previous = self.state();
        self.transition(GateState::Resolved);

        if self.session_present() {
            self.transition(GateState::Authorized);
            return GateState::Authorized;
        }

        self.transition(GateState::Redirecting);
        if previous != GateState::Redirecting {
            tracing::info!("No session, redirecting to {}", SIGN_IN_ROUTE);
            self.navigator.navigate(SIGN_IN_ROUTE);
        }
        GateState::Redirecting
    }

    fn transition(&self, next: GateState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            tracing::trace!("Auth gate {:?} -> {:?}", previous, next);
        }
    }
}
