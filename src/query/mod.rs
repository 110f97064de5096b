//! Cached, pollable remote queries and mutations.
//!
//! ```text
//! LifecycleEvents ──(focus / reconnect)──┐
//!                                        ▼
//!   Query<T> ── background task ── interval tick ──► fetcher ──► QueryResult<T>
//!      │                                                   ▲
//!      └── refetch() / refresh() ─── in-flight dedup ──────┘
//! ```
//!
//! A query fetches as soon as it is spawned. Concurrent triggers for the same
//! query collapse into the request already in flight. Dropping the query
//! aborts its task, so a torn-down screen stops polling.

mod events;
mod handle;
mod mutation;
mod options;
mod state;

pub use events::{LifecycleEvent, LifecycleEvents};
pub use handle::{FetchFuture, Query};
pub use mutation::{Mutation, MutationState};
pub use options::QueryOptions;
pub use state::QueryResult;
