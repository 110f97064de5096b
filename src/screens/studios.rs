//! Studios listing: paginated, searchable and sortable.
//!
//! The page, search text and sort order form the query key. Changing any of
//! them replaces the live query; changing search or sort also returns to
//! page 1.

use std::sync::Arc;

use crate::api::{StudioSort, StudiosParams};
use crate::error::ErrorShape;
use crate::models::{ListEnvelope, Studio};
use crate::query::{LifecycleEvents, Query};
use crate::traits::BlueprintApi;

use super::{items, spawn_list, STUDIOS_POLL};

#[derive(Debug, Clone, PartialEq)]
pub struct StudiosView {
    pub studios: Vec<Studio>,
    pub current_page: u32,
    pub total_pages: u32,
    pub search_query: String,
    pub sort_by: StudioSort,
    pub is_loading: bool,
    pub error: Option<ErrorShape>,
    pub is_empty: bool,
}

pub struct StudiosData {
    api: Arc<dyn BlueprintApi>,
    events: LifecycleEvents,
    params: StudiosParams,
    query: Query<ListEnvelope<Studio>>,
    /// Page count from the last response that reported one. Survives reloads
    /// so navigation stays valid while the next page loads.
    known_total_pages: u32,
}

impl StudiosData {
    pub fn new(api: Arc<dyn BlueprintApi>, events: &LifecycleEvents) -> Self {
        Self::with_params(api, events, StudiosParams::default())
    }

    /// Start from explicit parameters, e.g. a deep link to a later page.
    pub fn with_params(
        api: Arc<dyn BlueprintApi>,
        events: &LifecycleEvents,
        params: StudiosParams,
    ) -> Self {
        let query = spawn_query(&api, events, &params);
        Self {
            api,
            events: events.clone(),
            params,
            query,
            known_total_pages: 1,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.params.page
    }

    pub fn search_query(&self) -> &str {
        &self.params.search
    }

    pub fn sort_by(&self) -> StudioSort {
        self.params.sort
    }

    /// Page count reported by the latest response. While a new page is
    /// loading this is the previous response's count; 1 when never reported.
    pub fn total_pages(&self) -> u32 {
        self.query
            .snapshot()
            .data
            .and_then(|envelope| envelope.total_pages())
            .unwrap_or(self.known_total_pages)
            .max(1)
    }

    pub fn has_next_page(&self) -> bool {
        self.params.page < self.total_pages()
    }

    pub fn has_prev_page(&self) -> bool {
        self.params.page > 1
    }

    pub fn handle_search(&mut self, query: impl Into<String>) {
        let search = query.into();
        if search == self.params.search && self.params.page == 1 {
            return;
        }
        self.params.search = search;
        self.params.page = 1;
        self.reload();
    }

    pub fn handle_sort(&mut self, sort: StudioSort) {
        if sort == self.params.sort && self.params.page == 1 {
            return;
        }
        self.params.sort = sort;
        self.params.page = 1;
        self.reload();
    }

    /// Jump to `page`. Pages outside `1..=total_pages` are ignored.
    pub fn go_to_page(&mut self, page: u32) {
        let total = self.total_pages();
        if page < 1 || page > total {
            tracing::debug!("Ignoring page {} outside 1..={}", page, total);
            return;
        }
        if page == self.params.page {
            return;
        }
        self.params.page = page;
        self.reload();
    }

    pub fn next_page(&mut self) {
        if self.has_next_page() {
            self.go_to_page(self.params.page + 1);
        }
    }

    pub fn prev_page(&mut self) {
        if self.has_prev_page() {
            self.go_to_page(self.params.page - 1);
        }
    }

    pub fn view(&self) -> StudiosView {
        let result = self.query.snapshot();
        let studios = items(&result);
        let is_empty = !result.is_loading && result.error.is_none() && studios.is_empty();

        StudiosView {
            studios,
            current_page: self.params.page,
            total_pages: self.total_pages(),
            search_query: self.params.search.clone(),
            sort_by: self.params.sort,
            is_loading: result.is_loading,
            error: result.error,
            is_empty,
        }
    }

    pub fn refetch(&self) {
        self.query.refetch();
    }

    pub async fn refresh(&self) {
        self.query.refresh().await;
    }

    pub async fn settled(&self) {
        self.query.settled().await;
    }

    fn reload(&mut self) {
        tracing::debug!(
            "Studios listing now page={} search={:?} sort={}",
            self.params.page,
            self.params.search,
            self.params.sort
        );
        self.known_total_pages = self.total_pages();
        self.query = spawn_query(&self.api, &self.events, &self.params);
    }
}

fn spawn_query(
    api: &Arc<dyn BlueprintApi>,
    events: &LifecycleEvents,
    params: &StudiosParams,
) -> Query<ListEnvelope<Studio>> {
    let params = params.clone();
    spawn_list("studios", STUDIOS_POLL, api, events, move |api| {
        let params = params.clone();
        async move { api.studios(&params).await }
    })
}
