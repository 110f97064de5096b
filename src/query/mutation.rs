use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use super::handle::FetchFuture;
use crate::error::ErrorShape;

type Trigger<Req, Resp> = Arc<dyn Fn(Req) -> FetchFuture<Resp> + Send + Sync>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationState {
    pub is_loading: bool,
    pub error: Option<ErrorShape>,
}

/// A remote write: `trigger(payload)` plus the `{is_loading, error}` of the
/// latest call.
pub struct Mutation<Req, Resp> {
    name: &'static str,
    trigger: Trigger<Req, Resp>,
    state: Arc<Mutex<MutationState>>,
}

impl<Req, Resp> Clone for Mutation<Req, Resp> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            trigger: self.trigger.clone(),
            state: self.state.clone(),
        }
    }
}

impl<Req: Send + 'static, Resp: Send + 'static> Mutation<Req, Resp> {
    pub fn new<F, Fut>(name: &'static str, trigger: F) -> Self
    where
        F: Fn(Req) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Resp, ErrorShape>> + Send + 'static,
    {
        Self {
            name,
            trigger: Arc::new(move |req| Box::pin(trigger(req))),
            state: Arc::new(Mutex::new(MutationState::default())),
        }
    }

    /// Send the payload. The error is both returned and recorded.
    pub async fn trigger(&self, payload: Req) -> Result<Resp, ErrorShape> {
        self.update(|state| {
            state.is_loading = true;
            state.error = None;
        });
        tracing::debug!("Mutation {} started", self.name);

        let result = (self.trigger)(payload).await;

        self.update(|state| {
            state.is_loading = false;
            state.error = result.as_ref().err().cloned();
        });
        match &result {
            Ok(_) => tracing::info!("Mutation {} succeeded", self.name),
            Err(e) => tracing::warn!("Mutation {} failed: {}", self.name, e),
        }
        result
    }

    pub fn state(&self) -> MutationState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    /// Clear the recorded error.
    pub fn reset(&self) {
        self.update(|state| state.error = None);
    }

    fn update<F: FnOnce(&mut MutationState)>(&self, f: F) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_clears_loading() {
        let mutation = Mutation::new("double", |n: u32| async move { Ok::<_, ErrorShape>(n * 2) });
        assert_eq!(mutation.trigger(21).await, Ok(42));
        assert_eq!(mutation.state(), MutationState::default());
    }

    #[tokio::test]
    async fn test_failure_is_recorded_and_reset() {
        let mutation = Mutation::new("reject", |_: ()| async move {
            Err::<(), _>(ErrorShape::status(422))
        });
        assert!(mutation.trigger(()).await.is_err());
        assert_eq!(mutation.state().error, Some(ErrorShape::status(422)));

        mutation.reset();
        assert_eq!(mutation.state().error, None);
    }

    #[tokio::test]
    async fn test_loading_while_in_flight() {
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        let release_rx = Arc::new(tokio::sync::Mutex::new(Some(release_rx)));
        let mutation = Mutation::new("gated", move |_: ()| {
            let release_rx = release_rx.clone();
            async move {
                if let Some(rx) = release_rx.lock().await.take() {
                    let _ = rx.await;
                }
                Ok::<_, ErrorShape>(())
            }
        });

        let running = mutation.clone();
        let call = tokio::spawn(async move { running.trigger(()).await });
        while !mutation.is_loading() {
            tokio::task::yield_now().await;
        }

        release_tx.send(()).unwrap();
        call.await.unwrap().unwrap();
        assert!(!mutation.is_loading());
    }
}
