//! Thin typed wrapper over `reqwest` for the GitHub REST API.
//!
//! Every call attaches the bearer token, the GitHub JSON media type and the
//! pinned API version, then turns non-success statuses into
//! [`GitHubError::Status`].

use crate::error::{GitHubError, Result};
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Authenticated GitHub API client
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl GitHubClient {
    /// Create a client for `api_base` (e.g. `https://api.github.com`)
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        // No overall timeout: uploads of large images can legitimately take minutes.
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(GitHubError::ClientInit)?;

        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Absolute URL for an API path such as `/repos/o/r/releases`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
    }

    async fn send(
        &self,
        operation: &'static str,
        url: &str,
        builder: RequestBuilder,
    ) -> Result<Response> {
        log::debug!("{operation}: {url}");
        let response = builder
            .send()
            .await
            .map_err(|source| GitHubError::Transport { operation, source })?;

        let status = response.status();
        log::debug!("{operation}: HTTP {status}");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::Status {
                operation,
                url: url.to_string(),
                status,
                body,
            }
            .into());
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(operation: &'static str, response: Response) -> Result<T> {
        let text = response
            .text()
            .await
            .map_err(|source| GitHubError::Transport { operation, source })?;
        serde_json::from_str(&text)
            .map_err(|source| GitHubError::MalformedResponse { operation, source }.into())
    }

    /// `GET url`, decoding the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, operation: &'static str, url: &str) -> Result<T> {
        let response = self
            .send(operation, url, self.request(Method::GET, url))
            .await?;
        Self::decode(operation, response).await
    }

    /// `POST url` with a JSON body, decoding the JSON response
    pub async fn post_json<B, T>(&self, operation: &'static str, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, url).json(body);
        let response = self.send(operation, url, builder).await?;
        Self::decode(operation, response).await
    }

    /// `DELETE url`; the response body is ignored
    pub async fn delete(&self, operation: &'static str, url: &str) -> Result<()> {
        self.send(operation, url, self.request(Method::DELETE, url))
            .await?;
        Ok(())
    }

    /// `POST url` with a raw octet-stream body of known length
    pub async fn post_binary<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: &Url,
        body: reqwest::Body,
        content_length: u64,
    ) -> Result<T> {
        let builder = self
            .request(Method::POST, url.as_str())
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(CONTENT_LENGTH, content_length)
            .body(body);
        let response = self.send(operation, url.as_str(), builder).await?;
        Self::decode(operation, response).await
    }
}
