//! Focus and connectivity signals that trigger refetches.
//!
//! The host (a window shell, the CLI, a test) emits events; every live query
//! task holds a receiver and decides per its [`super::QueryOptions`] whether
//! to refetch.

use tokio::sync::broadcast;

/// Capacity of the lifecycle channel. Slow receivers skip ahead.
const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    WindowFocused,
    NetworkReconnected,
}

/// Broadcast hub for [`LifecycleEvent`]s.
#[derive(Debug, Clone)]
pub struct LifecycleEvents {
    tx: broadcast::Sender<LifecycleEvent>,
}

impl LifecycleEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.tx.subscribe()
    }

    /// Returns how many subscribers saw the event.
    pub fn emit(&self, event: LifecycleEvent) -> usize {
        tracing::debug!("Lifecycle event: {:?}", event);
        self.tx.send(event).unwrap_or(0)
    }

    pub fn window_focused(&self) -> usize {
        self.emit(LifecycleEvent::WindowFocused)
    }

    pub fn network_reconnected(&self) -> usize {
        self.emit(LifecycleEvent::NetworkReconnected)
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for LifecycleEvents {
    fn default() -> Self {
        Self::new()
    }
}
