//! Scripted [`HttpClient`] for exercising `HttpBlueprintApi` without a server.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Method, Response};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(Response),
    Error(HttpError),
}

#[derive(Debug, Default)]
struct Script {
    routes: Vec<(String, MockResponse)>,
    fallback: Option<MockResponse>,
    requests: Vec<RecordedRequest>,
}

impl Script {
    /// The longest registered prefix of `url` wins, so `/api/studios`
    /// answers `/api/studios?page=2` unless that exact URL is registered.
    fn reply_for(&self, url: &str) -> Option<MockResponse> {
        self.routes
            .iter()
            .filter(|(prefix, _)| url.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, reply)| reply.clone())
            .or_else(|| self.fallback.clone())
    }
}

/// Clones share one script, so a test keeps a handle after moving a clone
/// into the API client.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    script: Arc<Mutex<Script>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests whose URL starts with `prefix`.
    pub fn set_response(&self, prefix: &str, reply: MockResponse) {
        let mut script = self.script.lock().unwrap();
        script.routes.retain(|(existing, _)| existing != prefix);
        script.routes.push((prefix.to_string(), reply));
    }

    /// Answer every request no route matches.
    pub fn set_default_response(&self, reply: MockResponse) {
        self.script.lock().unwrap().fallback = Some(reply);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    fn handle(
        &self,
        method: Method,
        url: &str,
        headers: &Headers,
        body: Option<&str>,
    ) -> Result<Response, HttpError> {
        let mut script = self.script.lock().unwrap();
        script.requests.push(RecordedRequest {
            method,
            url: url.to_string(),
            headers: headers.clone(),
            body: body.map(str::to_string),
        });
        match script.reply_for(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Transport(format!("nothing scripted for {} {}", method, url))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.handle(Method::Get, url, headers, None)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.handle(Method::Post, url, headers, Some(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_longest_prefix_wins() {
        let client = MockHttpClient::new();
        client.set_response("https://x.test/api", MockResponse::Success(Response::new(200, "api")));
        client.set_response(
            "https://x.test/api/studios",
            MockResponse::Success(Response::new(200, "studios")),
        );

        let response = client
            .get("https://x.test/api/studios?page=3", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.body, "studios");
    }

    #[tokio::test]
    async fn test_unscripted_url_fails() {
        let client = MockHttpClient::new();
        let result = client.get("https://x.test/missing", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Transport(_))));
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_post_is_recorded_with_body() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Success(Response::new(201, "")));

        client
            .post("https://x.test/api/posts", r#"{"content":"x"}"#, &Headers::new())
            .await
            .unwrap();

        let requests = client.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"content":"x"}"#));
    }
}
