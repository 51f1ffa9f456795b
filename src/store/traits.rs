//! store::traits
//!
//! Content store trait definition.
//!
//! # Design
//!
//! The `ContentStore` trait is async because reads involve network I/O.
//! Stores are read-only from the site's point of view; documents are
//! authored elsewhere.
//!
//! # Example
//!
//! ```
//! use groundwork::content::Service;
//! use groundwork::store::{fetch_as, Direction, MemoryStore, Query};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let store = MemoryStore::new();
//! store.insert(json!({ "_id": "s1", "_type": "service", "title": "Painting", "order": 1 })).unwrap();
//!
//! let query = Query::documents("service").order_by("order", Direction::Asc);
//! let services: Vec<Service> = fetch_as(&store, &query).await.unwrap();
//! assert_eq!(services[0].title, "Painting");
//! # });
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::query::Query;
use crate::content::ValidationReport;

/// Errors from content store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The token was rejected or lacks access to the dataset.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The project or dataset was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// The query was rejected by the store.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The result did not have the expected shape.
    #[error("failed to decode result: {0}")]
    Decode(String),

    /// A write was rejected by schema validation.
    #[error(transparent)]
    Rejected(#[from] ValidationReport),
}

/// A readable content store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Run a query and return the raw result (array, object or `null`).
    async fn fetch(&self, query: &Query) -> Result<Value, StoreError>;
}

/// Run a query and deserialize the result.
///
/// # Errors
///
/// Propagates fetch errors; returns `StoreError::Decode` when the result
/// does not match `T`.
pub async fn fetch_as<T: DeserializeOwned>(
    store: &dyn ContentStore,
    query: &Query,
) -> Result<T, StoreError> {
    let value = store.fetch(query).await?;
    serde_json::from_value(value).map_err(|e| StoreError::Decode(e.to_string()))
}
