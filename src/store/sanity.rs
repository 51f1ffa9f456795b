//! store::sanity
//!
//! HTTP content store backed by the hosted content lake query API.
//!
//! # API
//!
//! Queries are sent as
//! `GET {host}/v{api_version}/data/query/{dataset}?query=<groq>` and answer
//! with `{ "ms": 12, "query": "...", "result": ... }`.
//!
//! # Example
//!
//! ```ignore
//! use groundwork::core::config::Config;
//! use groundwork::store::{ContentStore, Query, SanityClient};
//!
//! let client = SanityClient::from_config(&Config::default());
//! let result = client.fetch(&Query::documents("service")).await?;
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::query::Query;
use super::traits::{ContentStore, StoreError};
use crate::core::config::Config;

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "groundwork";

/// Content lake query client.
pub struct SanityClient {
    /// HTTP client for making requests
    client: Client,
    /// API host, e.g. `https://snti8zdm.api.sanity.io`
    api_host: String,
    /// Dataset name
    dataset: String,
    /// API version date without the `v` prefix
    api_version: String,
    /// Optional read token
    token: Option<String>,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for SanityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanityClient")
            .field("api_host", &self.api_host)
            .field("dataset", &self.dataset)
            .field("api_version", &self.api_version)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

/// Successful query response.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

impl SanityClient {
    /// Create a client for a project's live API host.
    pub fn new(
        project_id: impl AsRef<str>,
        dataset: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self::with_api_host(
            format!("https://{}.api.sanity.io", project_id.as_ref()),
            dataset,
            api_version,
        )
    }

    /// Create a client against an explicit API host (CDN edge or a test server).
    pub fn with_api_host(
        api_host: impl Into<String>,
        dataset: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        let api_version = api_version.into();
        Self {
            client: Client::new(),
            api_host: api_host.into().trim_end_matches('/').to_string(),
            dataset: dataset.into(),
            api_version: api_version
                .strip_prefix('v')
                .unwrap_or(&api_version)
                .to_string(),
            token: None,
        }
    }

    /// Create a client from merged configuration.
    pub fn from_config(config: &Config) -> Self {
        let client = Self::with_api_host(config.api_host(), config.dataset(), config.api_version());
        match config.token() {
            Some(token) => client.with_token(token),
            None => client,
        }
    }

    /// Authenticate reads with a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// The query endpoint URL (without the query string).
    pub fn query_url(&self) -> String {
        format!(
            "{}/v{}/data/query/{}",
            self.api_host, self.api_version, self.dataset
        )
    }

    fn headers(&self) -> Result<HeaderMap, StoreError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| StoreError::AuthFailed("token contains invalid characters".into()))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response(&self, response: Response) -> Result<Value, StoreError> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<QueryResponse>()
                .await
                .map(|body| body.result)
                .map_err(|e| StoreError::Decode(e.to_string()))
        } else {
            self.handle_error_response(response, status).await
        }
    }

    /// Handle an error response from the API.
    async fn handle_error_response<T>(
        &self,
        response: Response,
        status: StatusCode,
    ) -> Result<T, StoreError> {
        let message = match response.json::<Value>().await {
            Ok(body) => error_message(&body),
            Err(_) => "Unknown error".to_string(),
        };

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::AuthFailed(message),
            StatusCode::NOT_FOUND => StoreError::NotFound(message),
            StatusCode::BAD_REQUEST => StoreError::InvalidQuery(message),
            StatusCode::TOO_MANY_REQUESTS => StoreError::RateLimited,
            _ if status.is_server_error() => StoreError::ApiError {
                status: status.as_u16(),
                message: format!("content API server error: {}", message),
            },
            _ => StoreError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }
}

/// Pull a human-readable message out of an error body.
///
/// Query errors nest it under `error.description`; other failures use a
/// top-level `message` or a string `error`.
fn error_message(body: &Value) -> String {
    body.pointer("/error/description")
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
        .or_else(|| body.get("error").and_then(Value::as_str))
        .unwrap_or("Unknown error")
        .to_string()
}

#[async_trait]
impl ContentStore for SanityClient {
    fn name(&self) -> &'static str {
        "sanity"
    }

    async fn fetch(&self, query: &Query) -> Result<Value, StoreError> {
        let groq = query.to_groq();
        tracing::debug!(store = self.name(), query = %groq, "fetching");

        let response = self
            .client
            .get(self.query_url())
            .headers(self.headers()?)
            .query(&[("query", groq.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        let result = self.handle_response(response).await;
        if let Err(e) = &result {
            tracing::warn!(store = self.name(), error = %e, "query failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::schema::{SiteConfig, StoreSection};
    use serde_json::json;

    #[test]
    fn query_url_shape() {
        let client = SanityClient::new("snti8zdm", "production", "2024-01-01");
        assert_eq!(
            client.query_url(),
            "https://snti8zdm.api.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn strips_version_prefix() {
        let client = SanityClient::with_api_host("http://localhost:1234/", "dev", "v2021-10-21");
        assert_eq!(
            client.query_url(),
            "http://localhost:1234/v2021-10-21/data/query/dev"
        );
    }

    #[test]
    fn from_config_uses_cdn_host() {
        let config = Config::from_project(SiteConfig {
            store: Some(StoreSection {
                use_cdn: Some(true),
                token: Some("sk".into()),
                ..Default::default()
            }),
            ..Default::default()
        });
        let client = SanityClient::from_config(&config);
        assert!(client.query_url().starts_with("https://snti8zdm.apicdn.sanity.io/"));
        assert!(client.token.is_some());
    }

    #[test]
    fn debug_hides_token() {
        let client = SanityClient::new("p", "d", "1").with_token("secret-token");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("has_token: true"));
    }

    #[test]
    fn error_message_sources() {
        assert_eq!(
            error_message(&json!({ "error": { "description": "expected '}'" } })),
            "expected '}'"
        );
        assert_eq!(error_message(&json!({ "message": "Not found" })), "Not found");
        assert_eq!(error_message(&json!({ "error": "Unauthorized" })), "Unauthorized");
        assert_eq!(error_message(&json!({})), "Unknown error");
    }
}
