//! Query parameters for list endpoints.

use std::fmt;
use std::str::FromStr;

/// Page/limit pair shared by the simple list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListParams {
    pub page: u32,
    pub limit: u32,
}

impl ListParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    pub fn first(limit: u32) -> Self {
        Self::new(1, limit)
    }

    pub fn to_query(&self) -> String {
        format!("page={}&limit={}", self.page, self.limit)
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self::first(20)
    }
}

/// Sort order of the studios listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StudioSort {
    #[default]
    Popular,
    Newest,
    Oldest,
}

impl StudioSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudioSort::Popular => "popular",
            StudioSort::Newest => "newest",
            StudioSort::Oldest => "oldest",
        }
    }
}

impl fmt::Display for StudioSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudioSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "popular" => Ok(StudioSort::Popular),
            "newest" => Ok(StudioSort::Newest),
            "oldest" => Ok(StudioSort::Oldest),
            other => Err(format!("unknown sort '{}'", other)),
        }
    }
}

/// Parameters of `GET /api/studios`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StudiosParams {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub sort: StudioSort,
}

impl StudiosParams {
    /// Encoded query string; an empty search is left out.
    pub fn to_query(&self) -> String {
        let mut query = format!(
            "page={}&limit={}&sort={}",
            self.page, self.limit, self.sort
        );
        if !self.search.is_empty() {
            query.push_str("&search=");
            query.push_str(&urlencoding::encode(&self.search));
        }
        query
    }
}

impl Default for StudiosParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 12,
            search: String::new(),
            sort: StudioSort::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_query() {
        assert_eq!(ListParams::new(2, 10).to_query(), "page=2&limit=10");
        assert_eq!(ListParams::default().to_query(), "page=1&limit=20");
    }

    #[test]
    fn test_studios_params_encodes_search() {
        let params = StudiosParams {
            search: "glass & steel".to_string(),
            sort: StudioSort::Newest,
            ..Default::default()
        };
        assert_eq!(
            params.to_query(),
            "page=1&limit=12&sort=newest&search=glass%20%26%20steel"
        );
    }

    #[test]
    fn test_studios_params_omits_empty_search() {
        assert_eq!(
            StudiosParams::default().to_query(),
            "page=1&limit=12&sort=popular"
        );
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!("Newest".parse::<StudioSort>(), Ok(StudioSort::Newest));
        assert_eq!("oldest".parse::<StudioSort>(), Ok(StudioSort::Oldest));
        assert!("random".parse::<StudioSort>().is_err());
    }
}
