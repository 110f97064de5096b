//! Screen view-models.
//!
//! Each aggregator owns the live queries behind one screen and folds them
//! into a single view: display lists, combined loading and error flags, and
//! the screen's actions. Dropping an aggregator tears its queries down.
//!
//! | Screen | Query | Poll interval |
//! |---|---|---|
//! | Home | trending | 5 min |
//! | Home | projects | 10 min |
//! | Home | studios | 15 min |
//! | Dashboard | feed | 5 min |
//! | Dashboard | posts | 5 min |
//! | Dashboard | studios | 10 min |
//! | Studios | studios | 5 min |
//!
//! Every query also refetches on window focus and network reconnect.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::ErrorShape;
use crate::models::ListEnvelope;
use crate::query::{LifecycleEvents, Query, QueryOptions, QueryResult};
use crate::traits::BlueprintApi;

pub mod create_post;
pub mod create_studio;
pub mod dashboard;
pub mod home;
pub mod studios;

pub use create_post::CreatePost;
pub use create_studio::CreateStudio;
pub use dashboard::{DashboardData, DashboardErrors, DashboardView, DisplayContent, FeedFilter};
pub use home::{HomeData, HomeErrors, HomeView};
pub use studios::{StudiosData, StudiosView};

pub const HOME_TRENDING_POLL: Duration = Duration::from_millis(300_000);
pub const HOME_PROJECTS_POLL: Duration = Duration::from_millis(600_000);
pub const HOME_STUDIOS_POLL: Duration = Duration::from_millis(900_000);

pub const DASHBOARD_FEED_POLL: Duration = Duration::from_millis(300_000);
pub const DASHBOARD_POSTS_POLL: Duration = Duration::from_millis(300_000);
pub const DASHBOARD_STUDIOS_POLL: Duration = Duration::from_millis(600_000);

pub const STUDIOS_POLL: Duration = Duration::from_millis(300_000);

/// Message returned when a create call arrives while another is running.
pub const SUBMISSION_IN_PROGRESS_MESSAGE: &str = "A submission is already in progress.";

/// Result of a create flow. Failures carry the normalized, user-facing
/// message; nothing is raised.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome<T> {
    Success { data: T },
    Failure { error: String },
}

impl<T> MutationOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, MutationOutcome::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            MutationOutcome::Success { data } => Some(data),
            MutationOutcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            MutationOutcome::Success { .. } => None,
            MutationOutcome::Failure { error } => Some(error),
        }
    }
}

/// Claim of a create flow's local "submitting" flag, released on drop so an
/// abandoned submission does not leave the form locked.
pub(crate) struct SubmitGuard<'a>(&'a AtomicBool);

impl<'a> SubmitGuard<'a> {
    /// `None` when a submission already holds the flag.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Spawn a list query against the shared API with the standard refetch
/// policy and the given poll interval.
pub(crate) fn spawn_list<T, F, Fut>(
    name: &str,
    poll: Duration,
    api: &Arc<dyn BlueprintApi>,
    events: &LifecycleEvents,
    fetch: F,
) -> Query<ListEnvelope<T>>
where
    T: Clone + Send + 'static,
    F: Fn(Arc<dyn BlueprintApi>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ListEnvelope<T>, ErrorShape>> + Send + 'static,
{
    let api = api.clone();
    Query::spawn(name, QueryOptions::polling(poll), events, move || {
        fetch(api.clone())
    })
}

/// The list inside a result, empty while loading or after a failed first
/// load.
pub(crate) fn items<T: Clone>(result: &QueryResult<ListEnvelope<T>>) -> Vec<T> {
    result
        .data
        .as_ref()
        .map(|envelope| envelope.data.clone())
        .unwrap_or_default()
}
