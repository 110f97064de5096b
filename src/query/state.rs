use crate::error::ErrorShape;

/// Snapshot of one query: `{ data, is_loading, is_fetching, error }`.
///
/// `is_loading` is only true before the first response arrives;
/// `is_fetching` is true during any request. A failed refetch keeps the last
/// good `data` alongside the new `error`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub is_fetching: bool,
    pub error: Option<ErrorShape>,
}

impl<T> QueryResult<T> {
    /// State of a query whose first request is in flight.
    pub fn loading() -> Self {
        Self {
            data: None,
            is_loading: true,
            is_fetching: true,
            error: None,
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_settled(&self) -> bool {
        !self.is_fetching
    }
}

impl<T> Default for QueryResult<T> {
    fn default() -> Self {
        Self::loading()
    }
}
