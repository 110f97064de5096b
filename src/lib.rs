//! Blueprint - client-side data layer for the Blueprint.xyz platform
//!
//! Screen view-models over a cached, pollable query layer, with error
//! normalization and an auth gate for protected screens.
//!
//! This library exposes modules for use by the CLI and integration tests.

pub mod adapters;
pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod query;
pub mod screens;
pub mod traits;
