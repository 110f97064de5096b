//! HTTP implementation of [`BlueprintApi`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::adapters::ReqwestHttpClient;
use crate::auth::SessionStore;
use crate::error::ErrorShape;
use crate::models::{
    CreatePostRequest, CreateStudioRequest, DataEnvelope, FeedItem, ListEnvelope, Post, Project,
    Studio,
};
use crate::traits::{BlueprintApi, Headers, HttpClient, Response};

use super::params::{ListParams, StudiosParams};

/// Default URL for the Blueprint API.
pub const DEFAULT_API_URL: &str = "https://api.blueprint.xyz";

/// Blueprint API client over any [`HttpClient`].
///
/// When a [`SessionStore`] is attached, every request carries
/// `Authorization: Bearer <token>`.
///
/// # Example
///
/// ```ignore
/// use blueprint::api::{HttpBlueprintApi, ListParams};
/// use blueprint::traits::BlueprintApi;
///
/// let api = HttpBlueprintApi::reqwest("https://api.blueprint.xyz").with_session(store);
/// let feed = api.feed(&ListParams::default()).await?;
/// ```
pub struct HttpBlueprintApi<C: HttpClient = ReqwestHttpClient> {
    http: C,
    base_url: String,
    session: Option<SessionStore>,
}

impl HttpBlueprintApi<ReqwestHttpClient> {
    /// Client backed by reqwest.
    pub fn reqwest(base_url: impl Into<String>) -> Self {
        Self::new(ReqwestHttpClient::new(), base_url)
    }
}

impl<C: HttpClient> HttpBlueprintApi<C> {
    pub fn new(http: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            session: None,
        }
    }

    /// Attach the session whose token authorizes requests.
    pub fn with_session(mut self, session: SessionStore) -> Self {
        self.session = Some(session);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, query: Option<String>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", self.base_url, path, q),
            _ => format!("{}{}", self.base_url, path),
        }
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        if let Some(token) = self.session.as_ref().and_then(SessionStore::bearer_token) {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        headers
    }

    fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ErrorShape> {
        if !response.is_success() {
            let error = ErrorShape::from_response(response.status, &response.body);
            tracing::warn!("{} failed with HTTP {}", url, response.status);
            return Err(error);
        }
        response.parse::<T>().map_err(|e| {
            tracing::warn!("Failed to decode response from {}: {}", url, e);
            ErrorShape::from(e)
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: String,
    ) -> Result<T, ErrorShape> {
        let url = self.url(path, Some(query));
        tracing::debug!("GET {}", url);
        let response = self.http.get(&url, &self.headers()).await.map_err(|e| {
            tracing::warn!("GET {} failed: {}", url, e);
            ErrorShape::from(e)
        })?;
        Self::decode(&url, response)
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ErrorShape> {
        let url = self.url(path, None);
        let body = serde_json::to_string(body)
            .map_err(|e| ErrorShape::generic(format!("Failed to encode request: {}", e)))?;
        tracing::debug!("POST {}", url);
        let response = self
            .http
            .post(&url, &body, &self.headers())
            .await
            .map_err(|e| {
                tracing::warn!("POST {} failed: {}", url, e);
                ErrorShape::from(e)
            })?;
        Self::decode(&url, response)
    }
}

#[async_trait]
impl<C: HttpClient> BlueprintApi for HttpBlueprintApi<C> {
    async fn feed(&self, params: &ListParams) -> Result<ListEnvelope<FeedItem>, ErrorShape> {
        self.get_json("/api/feed", params.to_query()).await
    }

    async fn posts(&self, params: &ListParams) -> Result<ListEnvelope<Post>, ErrorShape> {
        self.get_json("/api/posts", params.to_query()).await
    }

    async fn trending(&self, params: &ListParams) -> Result<ListEnvelope<FeedItem>, ErrorShape> {
        self.get_json("/api/trending", params.to_query()).await
    }

    async fn projects(&self, params: &ListParams) -> Result<ListEnvelope<Project>, ErrorShape> {
        self.get_json("/api/projects", params.to_query()).await
    }

    async fn studios(&self, params: &StudiosParams) -> Result<ListEnvelope<Studio>, ErrorShape> {
        self.get_json("/api/studios", params.to_query()).await
    }

    async fn create_post(&self, request: &CreatePostRequest) -> Result<Post, ErrorShape> {
        let envelope: DataEnvelope<Post> = self.post_json("/api/posts", request).await?;
        Ok(envelope.data)
    }

    async fn create_studio(&self, request: &CreateStudioRequest) -> Result<Studio, ErrorShape> {
        let envelope: DataEnvelope<Studio> = self.post_json("/api/studios", request).await?;
        Ok(envelope.data)
    }
}
