use std::time::Duration;

/// Refresh policy of one query subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Background refetch period; `None` disables polling.
    pub polling_interval: Option<Duration>,
    pub refetch_on_focus: bool,
    pub refetch_on_reconnect: bool,
}

impl QueryOptions {
    /// Poll every `interval` and refetch on focus and reconnect.
    pub fn polling(interval: Duration) -> Self {
        Self {
            polling_interval: Some(interval),
            refetch_on_focus: true,
            refetch_on_reconnect: true,
        }
    }

    pub fn polling_ms(millis: u64) -> Self {
        Self::polling(Duration::from_millis(millis))
    }

    pub fn with_refetch_on_focus(mut self, enabled: bool) -> Self {
        self.refetch_on_focus = enabled;
        self
    }

    pub fn with_refetch_on_reconnect(mut self, enabled: bool) -> Self {
        self.refetch_on_reconnect = enabled;
        self
    }
}

impl Default for QueryOptions {
    /// Fetch once, then only on focus/reconnect or explicit refetch.
    fn default() -> Self {
        Self {
            polling_interval: None,
            refetch_on_focus: true,
            refetch_on_reconnect: true,
        }
    }
}
