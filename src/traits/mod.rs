//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST)
//! - [`BlueprintApi`] - Typed Blueprint API operations
//! - [`PersistentStorage`] - Durable key-value storage for the session
//! - [`Navigator`] - Route changes requested by the auth gate

pub mod api;
pub mod http;
pub mod navigator;
pub mod storage;

pub use api::BlueprintApi;
pub use http::{Headers, HttpClient, HttpError, Method, Response};
pub use navigator::Navigator;
pub use storage::{PersistentStorage, StorageError};
