//! Dashboard screen: a filterable content column plus a studios sidebar.
//!
//! The feed is fetched once and filtered client-side by type tag; the
//! "latest" filter shows the posts list as-is.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::api::{ListParams, StudiosParams};
use crate::error::ErrorShape;
use crate::models::{FeedItem, ListEnvelope, Post, Studio};
use crate::query::{LifecycleEvents, Query};
use crate::traits::BlueprintApi;

use super::{
    items, spawn_list, DASHBOARD_FEED_POLL, DASHBOARD_POSTS_POLL, DASHBOARD_STUDIOS_POLL,
};

const SIDEBAR_STUDIOS_LIMIT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FeedFilter {
    #[default]
    Trending,
    Latest,
    Following,
}

impl FeedFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedFilter::Trending => "trending",
            FeedFilter::Latest => "latest",
            FeedFilter::Following => "following",
        }
    }
}

impl fmt::Display for FeedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trending" => Ok(FeedFilter::Trending),
            "latest" => Ok(FeedFilter::Latest),
            "following" => Ok(FeedFilter::Following),
            other => Err(format!("unknown filter '{}'", other)),
        }
    }
}

/// What the content column shows for the active filter.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayContent {
    Feed(Vec<FeedItem>),
    Posts(Vec<Post>),
}

impl DisplayContent {
    pub fn len(&self) -> usize {
        match self {
            DisplayContent::Feed(items) => items.len(),
            DisplayContent::Posts(posts) => posts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardErrors {
    pub feed: Option<ErrorShape>,
    pub posts: Option<ErrorShape>,
    pub studios: Option<ErrorShape>,
}

impl DashboardErrors {
    pub fn any(&self) -> bool {
        self.feed.is_some() || self.posts.is_some() || self.studios.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub active_filter: FeedFilter,
    pub display_content: DisplayContent,
    pub studios: Vec<Studio>,
    pub is_loading: bool,
    pub has_error: bool,
    pub errors: DashboardErrors,
    pub is_empty: bool,
}

pub struct DashboardData {
    active_filter: FeedFilter,
    feed: Query<ListEnvelope<FeedItem>>,
    posts: Query<ListEnvelope<Post>>,
    studios: Query<ListEnvelope<Studio>>,
}

impl DashboardData {
    pub fn new(api: Arc<dyn BlueprintApi>, events: &LifecycleEvents) -> Self {
        let feed = spawn_list("dashboard.feed", DASHBOARD_FEED_POLL, &api, events, |api| {
            async move { api.feed(&ListParams::default()).await }
        });
        let posts = spawn_list("dashboard.posts", DASHBOARD_POSTS_POLL, &api, events, |api| {
            async move { api.posts(&ListParams::default()).await }
        });
        let studios = spawn_list(
            "dashboard.studios",
            DASHBOARD_STUDIOS_POLL,
            &api,
            events,
            |api| async move {
                let params = StudiosParams {
                    limit: SIDEBAR_STUDIOS_LIMIT,
                    ..StudiosParams::default()
                };
                api.studios(&params).await
            },
        );

        Self {
            active_filter: FeedFilter::default(),
            feed,
            posts,
            studios,
        }
    }

    pub fn with_filter(mut self, filter: FeedFilter) -> Self {
        self.active_filter = filter;
        self
    }

    pub fn active_filter(&self) -> FeedFilter {
        self.active_filter
    }

    /// Switch the content column. The queries keep running untouched.
    pub fn set_filter(&mut self, filter: FeedFilter) {
        if filter != self.active_filter {
            tracing::debug!("Dashboard filter {} -> {}", self.active_filter, filter);
            self.active_filter = filter;
        }
    }

    pub fn view(&self) -> DashboardView {
        let feed = self.feed.snapshot();
        let posts = self.posts.snapshot();
        let studios = self.studios.snapshot();

        let is_loading = feed.is_loading || posts.is_loading || studios.is_loading;
        let errors = DashboardErrors {
            feed: feed.error.clone(),
            posts: posts.error.clone(),
            studios: studios.error.clone(),
        };
        let has_error = errors.any();

        let display_content = match self.active_filter {
            FeedFilter::Latest => DisplayContent::Posts(items(&posts)),
            filter => DisplayContent::Feed(
                items(&feed)
                    .into_iter()
                    .filter(|item| item.has_type(filter.as_str()))
                    .collect(),
            ),
        };
        let is_empty = !is_loading && !has_error && display_content.is_empty();

        DashboardView {
            active_filter: self.active_filter,
            display_content,
            studios: items(&studios),
            is_loading,
            has_error,
            errors,
            is_empty,
        }
    }

    pub fn refetch_all(&self) {
        self.feed.refetch();
        self.posts.refetch();
        self.studios.refetch();
    }

    pub async fn refresh_all(&self) {
        tokio::join!(
            self.feed.refresh(),
            self.posts.refresh(),
            self.studios.refresh()
        );
    }

    pub async fn settled(&self) {
        tokio::join!(
            self.feed.settled(),
            self.posts.settled(),
            self.studios.settled()
        );
    }
}
