//! Create-studio flow.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::models::{CreateStudioInput, CreateStudioRequest, Studio};
use crate::query::Mutation;
use crate::traits::BlueprintApi;

use super::{MutationOutcome, SubmitGuard, SUBMISSION_IN_PROGRESS_MESSAGE};

#[derive(Clone)]
pub struct CreateStudio {
    mutation: Mutation<CreateStudioRequest, Studio>,
    submitting: Arc<AtomicBool>,
}

impl CreateStudio {
    pub fn new(api: Arc<dyn BlueprintApi>) -> Self {
        let mutation = Mutation::new("create_studio", move |request: CreateStudioRequest| {
            let api = api.clone();
            async move { api.create_studio(&request).await }
        });
        Self {
            mutation,
            submitting: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn create_studio(&self, input: CreateStudioInput) -> MutationOutcome<Studio> {
        if self.mutation.is_loading() {
            return in_progress();
        }
        let Some(_guard) = SubmitGuard::acquire(&self.submitting) else {
            return in_progress();
        };

        let request = CreateStudioRequest::from(input);
        tracing::debug!(
            "Creating studio {:?} (private: {})",
            request.name,
            request.is_private
        );
        match self.mutation.trigger(request).await {
            Ok(data) => MutationOutcome::Success { data },
            Err(e) => MutationOutcome::Failure {
                error: e.user_message(),
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        self.submitting.load(Ordering::Acquire) || self.mutation.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.mutation.state().error.map(|e| e.user_message())
    }

    pub fn reset(&self) {
        self.mutation.reset();
    }
}

fn in_progress() -> MutationOutcome<Studio> {
    tracing::debug!("Studio submission already in progress");
    MutationOutcome::Failure {
        error: SUBMISSION_IN_PROGRESS_MESSAGE.to_string(),
    }
}
