//! [`HttpClient`] over a shared `reqwest::Client`.

use async_trait::async_trait;
use std::time::Duration;

use crate::traits::{Headers, HttpClient, HttpError, Method, Response};

/// Upper bound on one API round-trip.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Using an unconfigured reqwest client: {}", e);
                reqwest::Client::new()
            });
        Self { client }
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&str>,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        let mut request = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        for (name, value) in headers {
            request = request.header(name, value);
        }
        if let Some(body) = body {
            request = request.body(body.to_owned());
        }

        let reply = request.send().await.map_err(classify)?;
        let status = reply.status().as_u16();
        let headers = collect_headers(reply.headers());
        let body = reply.bytes().await.map_err(classify)?;
        tracing::trace!("{} {} answered {} ({} bytes)", method, url, status, body.len());

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(err: reqwest::Error) -> HttpError {
    let detail = err.to_string();
    if err.is_timeout() {
        HttpError::TimedOut(detail)
    } else if err.is_connect() {
        HttpError::Unreachable(detail)
    } else if err.is_builder() {
        HttpError::BadUrl(detail)
    } else {
        HttpError::Transport(detail)
    }
}

/// Headers with non-ASCII values are skipped.
fn collect_headers(map: &reqwest::header::HeaderMap) -> Headers {
    map.iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect()
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.execute(Method::Get, url, None, headers).await
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.execute(Method::Post, url, Some(body), headers).await
    }
}
