//! Blueprint API client and request parameters.

mod client;
mod params;

pub use client::{HttpBlueprintApi, DEFAULT_API_URL};
pub use params::{ListParams, StudioSort, StudiosParams};
