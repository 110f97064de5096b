//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileStorage`] - JSON-file backed persistent storage
//! - [`ConsoleNavigator`] - Navigation for the command-line client
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for all adapters:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::MockBlueprintApi`] - Canned API data
//! - [`mock::InMemoryStorage`] - In-memory storage
//! - [`mock::RecordingNavigator`] - Navigation recording

pub mod console_navigator;
pub mod file_storage;
pub mod mock;
pub mod reqwest_http;

pub use console_navigator::ConsoleNavigator;
pub use file_storage::FileStorage;
pub use mock::{InMemoryStorage, MockBlueprintApi, MockHttpClient, RecordingNavigator};
pub use reqwest_http::ReqwestHttpClient;
