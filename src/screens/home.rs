//! Home screen: trending items, featured projects and popular studios,
//! shown side by side without merging.

use std::sync::Arc;

use crate::api::{ListParams, StudiosParams};
use crate::error::ErrorShape;
use crate::models::{FeedItem, ListEnvelope, Project, Studio};
use crate::query::{LifecycleEvents, Query};
use crate::traits::BlueprintApi;

use super::{
    items, spawn_list, HOME_PROJECTS_POLL, HOME_STUDIOS_POLL, HOME_TRENDING_POLL,
};

const TRENDING_LIMIT: u32 = 10;
const PROJECTS_LIMIT: u32 = 6;
const STUDIOS_LIMIT: u32 = 6;

/// Per-query errors for granular error handling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeErrors {
    pub trending: Option<ErrorShape>,
    pub projects: Option<ErrorShape>,
    pub studios: Option<ErrorShape>,
}

impl HomeErrors {
    pub fn any(&self) -> bool {
        self.trending.is_some() || self.projects.is_some() || self.studios.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub trending: Vec<FeedItem>,
    pub projects: Vec<Project>,
    pub studios: Vec<Studio>,
    pub is_loading: bool,
    pub has_error: bool,
    pub errors: HomeErrors,
    /// Not loading, no error, and all three lists empty.
    pub is_empty: bool,
}

pub struct HomeData {
    trending: Query<ListEnvelope<FeedItem>>,
    projects: Query<ListEnvelope<Project>>,
    studios: Query<ListEnvelope<Studio>>,
}

impl HomeData {
    pub fn new(api: Arc<dyn BlueprintApi>, events: &LifecycleEvents) -> Self {
        let trending = spawn_list("home.trending", HOME_TRENDING_POLL, &api, events, |api| {
            async move { api.trending(&ListParams::first(TRENDING_LIMIT)).await }
        });
        let projects = spawn_list("home.projects", HOME_PROJECTS_POLL, &api, events, |api| {
            async move { api.projects(&ListParams::first(PROJECTS_LIMIT)).await }
        });
        let studios = spawn_list("home.studios", HOME_STUDIOS_POLL, &api, events, |api| {
            async move {
                let params = StudiosParams {
                    limit: STUDIOS_LIMIT,
                    ..StudiosParams::default()
                };
                api.studios(&params).await
            }
        });

        Self {
            trending,
            projects,
            studios,
        }
    }

    pub fn view(&self) -> HomeView {
        let trending = self.trending.snapshot();
        let projects = self.projects.snapshot();
        let studios = self.studios.snapshot();

        let is_loading = trending.is_loading || projects.is_loading || studios.is_loading;
        let errors = HomeErrors {
            trending: trending.error.clone(),
            projects: projects.error.clone(),
            studios: studios.error.clone(),
        };
        let has_error = errors.any();

        let trending = items(&trending);
        let projects = items(&projects);
        let studios = items(&studios);
        let is_empty = !is_loading
            && !has_error
            && trending.is_empty()
            && projects.is_empty()
            && studios.is_empty();

        HomeView {
            trending,
            projects,
            studios,
            is_loading,
            has_error,
            errors,
            is_empty,
        }
    }

    /// Refetch every list without waiting.
    pub fn refetch_all(&self) {
        self.trending.refetch();
        self.projects.refetch();
        self.studios.refetch();
    }

    /// Refetch every list and wait for all of them.
    pub async fn refresh_all(&self) {
        tokio::join!(
            self.trending.refresh(),
            self.projects.refresh(),
            self.studios.refresh()
        );
    }

    /// Wait until no list has a request in flight.
    pub async fn settled(&self) {
        tokio::join!(
            self.trending.settled(),
            self.projects.settled(),
            self.studios.settled()
        );
    }
}
