//! Mock Blueprint API for testing the screen aggregators.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::{ListParams, StudiosParams};
use crate::error::ErrorShape;
use crate::models::{
    CreatePostRequest, CreateStudioRequest, FeedItem, ListEnvelope, Post, Project, Studio,
};
use crate::traits::BlueprintApi;

type ListResult<T> = Result<ListEnvelope<T>, ErrorShape>;

#[derive(Debug)]
struct MockState {
    feed: ListResult<FeedItem>,
    posts: ListResult<Post>,
    trending: ListResult<FeedItem>,
    projects: ListResult<Project>,
    studios: ListResult<Studio>,
    create_post_error: Option<ErrorShape>,
    create_studio_error: Option<ErrorShape>,
    delay: Option<Duration>,
    calls: HashMap<&'static str, usize>,
    studio_params: Vec<StudiosParams>,
    created_posts: Vec<CreatePostRequest>,
    created_studios: Vec<CreateStudioRequest>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            feed: Ok(ListEnvelope::default()),
            posts: Ok(ListEnvelope::default()),
            trending: Ok(ListEnvelope::default()),
            projects: Ok(ListEnvelope::default()),
            studios: Ok(ListEnvelope::default()),
            create_post_error: None,
            create_studio_error: None,
            delay: None,
            calls: HashMap::new(),
            studio_params: Vec::new(),
            created_posts: Vec::new(),
            created_studios: Vec::new(),
        }
    }
}

/// Configurable in-memory [`BlueprintApi`].
///
/// List endpoints return empty envelopes until configured. Create endpoints
/// echo the request back as the created record unless a failure is set.
/// Every call is counted by endpoint name (`"feed"`, `"posts"`, `"trending"`,
/// `"projects"`, `"studios"`, `"create_post"`, `"create_studio"`).
#[derive(Debug, Clone, Default)]
pub struct MockBlueprintApi {
    state: Arc<Mutex<MockState>>,
}

impl MockBlueprintApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_feed(&self, result: ListResult<FeedItem>) {
        self.state.lock().unwrap().feed = result;
    }

    pub fn set_posts(&self, result: ListResult<Post>) {
        self.state.lock().unwrap().posts = result;
    }

    pub fn set_trending(&self, result: ListResult<FeedItem>) {
        self.state.lock().unwrap().trending = result;
    }

    pub fn set_projects(&self, result: ListResult<Project>) {
        self.state.lock().unwrap().projects = result;
    }

    pub fn set_studios(&self, result: ListResult<Studio>) {
        self.state.lock().unwrap().studios = result;
    }

    pub fn fail_create_post(&self, error: Option<ErrorShape>) {
        self.state.lock().unwrap().create_post_error = error;
    }

    pub fn fail_create_studio(&self, error: Option<ErrorShape>) {
        self.state.lock().unwrap().create_studio_error = error;
    }

    /// Delay every response by `delay` (tokio time, so paused clocks apply).
    pub fn set_delay(&self, delay: Option<Duration>) {
        self.state.lock().unwrap().delay = delay;
    }

    /// Number of calls made to an endpoint.
    pub fn calls(&self, endpoint: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .get(endpoint)
            .copied()
            .unwrap_or(0)
    }

    /// Parameters of every studios request, in order.
    pub fn studio_params(&self) -> Vec<StudiosParams> {
        self.state.lock().unwrap().studio_params.clone()
    }

    pub fn created_posts(&self) -> Vec<CreatePostRequest> {
        self.state.lock().unwrap().created_posts.clone()
    }

    pub fn created_studios(&self) -> Vec<CreateStudioRequest> {
        self.state.lock().unwrap().created_studios.clone()
    }

    async fn enter(&self, endpoint: &'static str) {
        let delay = {
            let mut state = self.state.lock().unwrap();
            *state.calls.entry(endpoint).or_insert(0) += 1;
            state.delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl BlueprintApi for MockBlueprintApi {
    async fn feed(&self, _params: &ListParams) -> ListResult<FeedItem> {
        self.enter("feed").await;
        self.state.lock().unwrap().feed.clone()
    }

    async fn posts(&self, _params: &ListParams) -> ListResult<Post> {
        self.enter("posts").await;
        self.state.lock().unwrap().posts.clone()
    }

    async fn trending(&self, _params: &ListParams) -> ListResult<FeedItem> {
        self.enter("trending").await;
        self.state.lock().unwrap().trending.clone()
    }

    async fn projects(&self, _params: &ListParams) -> ListResult<Project> {
        self.enter("projects").await;
        self.state.lock().unwrap().projects.clone()
    }

    async fn studios(&self, params: &StudiosParams) -> ListResult<Studio> {
        self.state
            .lock()
            .unwrap()
            .studio_params
            .push(params.clone());
        self.enter("studios").await;
        self.state.lock().unwrap().studios.clone()
    }

    async fn create_post(&self, request: &CreatePostRequest) -> Result<Post, ErrorShape> {
        self.state
            .lock()
            .unwrap()
            .created_posts
            .push(request.clone());
        self.enter("create_post").await;

        let state = self.state.lock().unwrap();
        if let Some(error) = &state.create_post_error {
            return Err(error.clone());
        }
        Ok(Post {
            id: format!("post-{}", state.created_posts.len()),
            title: request.title.clone(),
            content: request.content.clone(),
            studio_id: request.studio_id.clone(),
            author: None,
            created_at: None,
        })
    }

    async fn create_studio(&self, request: &CreateStudioRequest) -> Result<Studio, ErrorShape> {
        self.state
            .lock()
            .unwrap()
            .created_studios
            .push(request.clone());
        self.enter("create_studio").await;

        let state = self.state.lock().unwrap();
        if let Some(error) = &state.create_studio_error {
            return Err(error.clone());
        }
        Ok(Studio {
            id: format!("studio-{}", state.created_studios.len()),
            name: request.name.clone(),
            slug: request.slug.clone(),
            description: Some(request.description.clone()),
            category: Some(request.category.clone()),
            member_count: 1,
            is_private: request.is_private,
        })
    }
}
