//! Create-post flow.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::models::{CreatePostInput, CreatePostRequest, Post};
use crate::query::Mutation;
use crate::traits::BlueprintApi;

use super::{MutationOutcome, SubmitGuard, SUBMISSION_IN_PROGRESS_MESSAGE};

#[derive(Clone)]
pub struct CreatePost {
    mutation: Mutation<CreatePostRequest, Post>,
    submitting: Arc<AtomicBool>,
}

impl CreatePost {
    pub fn new(api: Arc<dyn BlueprintApi>) -> Self {
        let mutation = Mutation::new("create_post", move |request: CreatePostRequest| {
            let api = api.clone();
            async move { api.create_post(&request).await }
        });
        Self {
            mutation,
            submitting: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Submit a post. Never fails outright: errors come back as
    /// [`MutationOutcome::Failure`] with a display-ready message.
    pub async fn create_post(&self, input: CreatePostInput) -> MutationOutcome<Post> {
        if self.mutation.is_loading() {
            return in_progress();
        }
        let Some(_guard) = SubmitGuard::acquire(&self.submitting) else {
            return in_progress();
        };

        match self.mutation.trigger(CreatePostRequest::from(input)).await {
            Ok(data) => MutationOutcome::Success { data },
            Err(e) => MutationOutcome::Failure {
                error: e.user_message(),
            },
        }
    }

    /// Local submitting flag OR the mutation's own loading flag.
    pub fn is_loading(&self) -> bool {
        self.submitting.load(Ordering::Acquire) || self.mutation.is_loading()
    }

    /// Normalized message of the last failure, if any.
    pub fn error(&self) -> Option<String> {
        self.mutation.state().error.map(|e| e.user_message())
    }

    pub fn reset(&self) {
        self.mutation.reset();
    }
}

fn in_progress() -> MutationOutcome<Post> {
    tracing::debug!("Post submission already in progress");
    MutationOutcome::Failure {
        error: SUBMISSION_IN_PROGRESS_MESSAGE.to_string(),
    }
}
