//! Mock implementations for testing.
//!
//! This module provides mock implementations of all trait abstractions,
//! enabling unit testing without network dependencies or file system access.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`MockBlueprintApi`] - Typed API with canned lists and failure injection
//! - [`InMemoryStorage`] - In-memory key-value storage
//! - [`RecordingNavigator`] - Records navigation requests

pub mod api;
pub mod http;
pub mod navigator;
pub mod storage;

pub use api::MockBlueprintApi;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use navigator::RecordingNavigator;
pub use storage::InMemoryStorage;
