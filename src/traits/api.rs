//! Blueprint API trait abstraction.
//!
//! Every screen talks to the backend through this trait. The production
//! implementation is [`crate::api::HttpBlueprintApi`]; tests use
//! [`crate::adapters::mock::MockBlueprintApi`].

use async_trait::async_trait;

use crate::api::{ListParams, StudiosParams};
use crate::error::ErrorShape;
use crate::models::{
    CreatePostRequest, CreateStudioRequest, FeedItem, ListEnvelope, Post, Project, Studio,
};

/// Remote operations consumed by the screen aggregators.
///
/// Failures come back as an already-decoded [`ErrorShape`].
#[async_trait]
pub trait BlueprintApi: Send + Sync {
    /// Mixed-type feed (`GET /api/feed`).
    async fn feed(&self, params: &ListParams) -> Result<ListEnvelope<FeedItem>, ErrorShape>;

    /// Plain posts, newest first (`GET /api/posts`).
    async fn posts(&self, params: &ListParams) -> Result<ListEnvelope<Post>, ErrorShape>;

    /// Trending content (`GET /api/trending`).
    async fn trending(&self, params: &ListParams) -> Result<ListEnvelope<FeedItem>, ErrorShape>;

    /// Project galleries (`GET /api/projects`).
    async fn projects(&self, params: &ListParams) -> Result<ListEnvelope<Project>, ErrorShape>;

    /// Studios, paginated and searchable (`GET /api/studios`).
    async fn studios(&self, params: &StudiosParams) -> Result<ListEnvelope<Studio>, ErrorShape>;

    /// `POST /api/posts`
    async fn create_post(&self, request: &CreatePostRequest) -> Result<Post, ErrorShape>;

    /// `POST /api/studios`
    async fn create_studio(&self, request: &CreateStudioRequest) -> Result<Studio, ErrorShape>;
}
