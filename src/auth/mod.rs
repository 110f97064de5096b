//! Session state and the gate in front of protected screens.
//!
//! - [`PersistedSession`]: token and user record in durable storage
//! - [`SessionStore`]: the in-memory session, shared by reference
//! - [`AuthGate`]: render-or-redirect decision for protected screens

pub mod gate;
pub mod persisted;
pub mod session;

pub use gate::{AuthGate, GateState, DEFAULT_AUTH_GRACE, SIGN_IN_ROUTE};
pub use persisted::{PersistedSession, TOKEN_KEY, USER_KEY};
pub use session::{Session, SessionStore};
