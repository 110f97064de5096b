use serde::{Deserialize, Serialize};

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    pub total_pages: u32,
}

/// `{ data: T[], pagination? }` list response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl<T> ListEnvelope<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            data,
            pagination: None,
        }
    }

    pub fn with_total_pages(mut self, total_pages: u32) -> Self {
        self.pagination = Some(Pagination {
            page: None,
            limit: None,
            total: None,
            total_pages,
        });
        self
    }

    /// Total page count, or `None` when the response is unpaginated.
    pub fn total_pages(&self) -> Option<u32> {
        self.pagination.map(|p| p.total_pages)
    }
}

impl<T> Default for ListEnvelope<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// `{ data: T }` single-record response, as returned by create endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataEnvelope<T> {
    pub data: T,
}
