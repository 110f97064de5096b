//! A live, cached remote query.
//!
//! Each [`Query`] owns one background task that performs the initial fetch,
//! then refetches on its polling interval, on lifecycle events and on
//! explicit [`Query::refetch`] calls. Every request runs on that task, so
//! dropping the query aborts all of them and a cancelled caller never strands
//! the in-flight slot.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{broadcast, watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use super::events::{LifecycleEvent, LifecycleEvents};
use super::options::QueryOptions;
use super::state::QueryResult;
use crate::error::ErrorShape;

/// Boxed future returned by query and mutation fetchers.
pub type FetchFuture<T> = Pin<Box<dyn Future<Output = Result<T, ErrorShape>> + Send>>;

type Fetcher<T> = Arc<dyn Fn() -> FetchFuture<T> + Send + Sync>;

struct Inner<T> {
    name: String,
    fetcher: Fetcher<T>,
    state: Mutex<QueryResult<T>>,
    in_flight: AtomicBool,
    /// Wakes the driver to run a request already claimed by the handle.
    wake: Notify,
    version: watch::Sender<u64>,
}

impl<T: Clone + Send + 'static> Inner<T> {
    /// Claim the in-flight slot. Returns false when a request is already
    /// running, in which case the caller must not fetch.
    fn begin(&self) -> bool {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::trace!("Query {} already in flight, skipping", self.name);
            return false;
        }
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_fetching = true;
        self.notify();
        true
    }

    /// Perform the request claimed by [`Inner::begin`].
    async fn run(&self) {
        let result = (self.fetcher)().await;
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            match result {
                Ok(data) => {
                    state.data = Some(data);
                    state.error = None;
                }
                Err(error) => {
                    tracing::warn!("Query {} failed: {}", self.name, error);
                    state.error = Some(error);
                }
            }
            state.is_loading = false;
            state.is_fetching = false;
        }
        self.in_flight.store(false, Ordering::Release);
        self.notify();
    }

    async fn fetch_if_idle(&self) {
        if self.begin() {
            self.run().await;
        }
    }

    fn notify(&self) {
        self.version.send_modify(|v| *v = v.wrapping_add(1));
    }
}

/// Handle to a live query.
///
/// Must be created inside a tokio runtime.
///
/// # Example
///
/// ```ignore
/// let api = Arc::new(HttpBlueprintApi::reqwest(DEFAULT_API_URL));
/// let events = LifecycleEvents::new();
/// let feed = Query::spawn("feed", QueryOptions::polling_ms(300_000), &events, {
///     let api = api.clone();
///     move || {
///         let api = api.clone();
///         async move { api.feed(&ListParams::default()).await }
///     }
/// });
/// feed.settled().await;
/// println!("{:?}", feed.snapshot().data);
/// ```
pub struct Query<T> {
    inner: Arc<Inner<T>>,
    task: JoinHandle<()>,
}

impl<T: Clone + Send + 'static> Query<T> {
    /// Start a query: the first fetch begins immediately in the background.
    pub fn spawn<F, Fut>(
        name: impl Into<String>,
        options: QueryOptions,
        events: &LifecycleEvents,
        fetch: F,
    ) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ErrorShape>> + Send + 'static,
    {
        let fetcher: Fetcher<T> = Arc::new(move || Box::pin(fetch()));
        let (version, _) = watch::channel(0);
        let inner = Arc::new(Inner {
            name: name.into(),
            fetcher,
            state: Mutex::new(QueryResult::loading()),
            in_flight: AtomicBool::new(false),
            wake: Notify::new(),
            version,
        });

        tracing::debug!("Query {} mounted ({:?})", inner.name, options);
        let claimed = inner.begin();
        let task = tokio::spawn(drive(inner.clone(), options, events.subscribe(), claimed));

        Self { inner, task }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Current cached state.
    pub fn snapshot(&self) -> QueryResult<T> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Start a refetch without waiting for it. No-op while one is in flight.
    pub fn refetch(&self) {
        if self.inner.begin() {
            self.inner.wake.notify_one();
        }
    }

    /// Refetch and wait for the result, or wait for the request already in
    /// flight. Dropping the returned future does not cancel the request.
    pub async fn refresh(&self) {
        self.refetch();
        self.settled().await;
    }

    /// Wait until no request is in flight.
    pub async fn settled(&self) {
        let mut rx = self.inner.version.subscribe();
        loop {
            if !self.inner.in_flight.load(Ordering::Acquire) {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Receiver that changes whenever the cached state does.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.version.subscribe()
    }
}

impl<T> Drop for Query<T> {
    fn drop(&mut self) {
        self.task.abort();
        tracing::debug!("Query {} torn down", self.inner.name);
    }
}

async fn next_tick(poll: &mut Option<Interval>) {
    match poll {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

async fn drive<T: Clone + Send + 'static>(
    inner: Arc<Inner<T>>,
    options: QueryOptions,
    mut events: broadcast::Receiver<LifecycleEvent>,
    claimed: bool,
) {
    if claimed {
        inner.run().await;
    }

    let mut poll = options.polling_interval.map(|period| {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    });
    let mut events_open = true;

    loop {
        tokio::select! {
            _ = inner.wake.notified() => {
                inner.run().await;
            }
            _ = next_tick(&mut poll) => {
                tracing::trace!("Query {} polling", inner.name);
                inner.fetch_if_idle().await;
            }
            event = events.recv(), if events_open => match event {
                Ok(LifecycleEvent::WindowFocused) if options.refetch_on_focus => {
                    tracing::debug!("Query {} refetching on focus", inner.name);
                    inner.fetch_if_idle().await;
                }
                Ok(LifecycleEvent::NetworkReconnected) if options.refetch_on_reconnect => {
                    tracing::debug!("Query {} refetching on reconnect", inner.name);
                    inner.fetch_if_idle().await;
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Query {} missed {} lifecycle events", inner.name, skipped);
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::debug!("Query {} lost its lifecycle events", inner.name);
                    events_open = false;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn counting_query(
        options: QueryOptions,
        events: &LifecycleEvents,
        fail: bool,
    ) -> (Query<usize>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let query = Query::spawn("test", options, events, move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if fail {
                    Err(ErrorShape::status(500))
                } else {
                    Ok(n)
                }
            }
        });
        (query, calls)
    }

    #[tokio::test]
    async fn test_initial_fetch() {
        let events = LifecycleEvents::new();
        let (query, calls) = counting_query(QueryOptions::default(), &events, false);

        assert!(query.snapshot().is_loading);
        query.settled().await;

        let state = query.snapshot();
        assert_eq!(state.data, Some(1));
        assert!(!state.is_loading);
        assert!(!state.is_fetching);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_error_is_captured() {
        let events = LifecycleEvents::new();
        let (query, _) = counting_query(QueryOptions::default(), &events, true);
        query.settled().await;

        let state = query.snapshot();
        assert_eq!(state.data, None);
        assert_eq!(state.error, Some(ErrorShape::status(500)));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_refresh_replaces_data() {
        let events = LifecycleEvents::new();
        let (query, calls) = counting_query(QueryOptions::default(), &events, false);
        query.settled().await;

        query.refresh().await;
        assert_eq!(query.snapshot().data, Some(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refetch_is_deduplicated_while_in_flight() {
        let events = LifecycleEvents::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let query = Query::spawn("slow", QueryOptions::default(), &events, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok::<_, ErrorShape>(())
            }
        });

        query.refetch();
        query.refetch();
        query.settled().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_polling_interval() {
        let events = LifecycleEvents::new();
        let (query, calls) = counting_query(QueryOptions::polling_ms(300_000), &events, false);
        query.settled().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(299_000)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        query.settled().await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(query.snapshot().data, Some(2));
    }

    #[tokio::test]
    async fn test_refetch_on_focus_and_reconnect() {
        let events = LifecycleEvents::new();
        let (query, calls) = counting_query(QueryOptions::default(), &events, false);
        query.settled().await;

        let mut changes = query.subscribe();
        events.window_focused();
        while calls.load(Ordering::SeqCst) < 2 {
            changes.changed().await.unwrap();
        }
        query.settled().await;
        assert_eq!(query.snapshot().data, Some(2));

        events.network_reconnected();
        while calls.load(Ordering::SeqCst) < 3 {
            changes.changed().await.unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_focus_refetch() {
        let events = LifecycleEvents::new();
        let options = QueryOptions::default().with_refetch_on_focus(false);
        let (query, calls) = counting_query(options, &events, false);
        query.settled().await;

        events.window_focused();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_polling() {
        let events = LifecycleEvents::new();
        let (query, calls) = counting_query(QueryOptions::polling_ms(1_000), &events, false);
        query.settled().await;
        drop(query);

        tokio::time::sleep(Duration::from_millis(5_000)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(events.subscriber_count(), 0);
    }

    fn slow_query(
        options: QueryOptions,
        events: &LifecycleEvents,
    ) -> (Query<usize>, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let started = Arc::new(AtomicUsize::new(0));
        let finished = Arc::new(AtomicUsize::new(0));
        let (start, finish) = (started.clone(), finished.clone());
        let query = Query::spawn("slow", options, events, move || {
            let n = start.fetch_add(1, Ordering::SeqCst) + 1;
            let finish = finish.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(500)).await;
                finish.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ErrorShape>(n)
            }
        });
        (query, started, finished)
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_refresh_keeps_polling() {
        let events = LifecycleEvents::new();
        let (query, started, _) = slow_query(QueryOptions::polling_ms(1_000), &events);
        query.settled().await;

        let cancelled =
            tokio::time::timeout(Duration::from_millis(10), query.refresh()).await;
        assert!(cancelled.is_err());

        tokio::time::sleep(Duration::from_millis(10_000)).await;
        query.settled().await;
        assert!(started.load(Ordering::SeqCst) > 3);
        assert!(!query.snapshot().is_fetching);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refetch_still_completes_after_cancelled_refresh() {
        let events = LifecycleEvents::new();
        let (query, started, finished) = slow_query(QueryOptions::default(), &events);
        query.settled().await;

        let _ = tokio::time::timeout(Duration::from_millis(10), query.refresh()).await;
        query.settled().await;
        assert_eq!(finished.load(Ordering::SeqCst), 2);

        query.refetch();
        query.settled().await;
        assert_eq!(started.load(Ordering::SeqCst), 3);
        assert_eq!(query.snapshot().data, Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_refetch() {
        let events = LifecycleEvents::new();
        let (query, started, finished) = slow_query(QueryOptions::default(), &events);
        query.settled().await;

        query.refetch();
        while started.load(Ordering::SeqCst) < 2 {
            tokio::task::yield_now().await;
        }
        drop(query);

        tokio::time::sleep(Duration::from_millis(2_000)).await;
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refetch_after_events_closed() {
        let events = LifecycleEvents::new();
        let (query, calls) = counting_query(QueryOptions::default(), &events, false);
        query.settled().await;
        drop(events);
        tokio::task::yield_now().await;

        query.refresh().await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_refetch_keeps_stale_data() {
        let events = LifecycleEvents::new();
        let fail = Arc::new(AtomicBool::new(false));
        let flag = fail.clone();
        let query = Query::spawn("flaky", QueryOptions::default(), &events, move || {
            let fail = flag.load(Ordering::SeqCst);
            async move {
                if fail {
                    Err(ErrorShape::fetch("offline"))
                } else {
                    Ok("cached")
                }
            }
        });
        query.settled().await;

        fail.store(true, Ordering::SeqCst);
        query.refresh().await;

        let state = query.snapshot();
        assert_eq!(state.data, Some("cached"));
        assert!(state.error.unwrap().is_network());
    }
}
