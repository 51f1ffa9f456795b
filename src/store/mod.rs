//! store
//!
//! The content store query contract.
//!
//! # Modules
//!
//! - [`query`] - Query builder emitting the store's query language
//! - [`traits`] - The `ContentStore` trait and errors
//! - [`sanity`] - HTTP client for the hosted content lake
//! - [`memory`] - In-memory store for tests and fixtures
//! - [`image`] - Image URL builder
//!
//! # Example
//!
//! ```
//! use groundwork::store::{ContentStore, MemoryStore, SanityClient};
//!
//! fn describe(store: &dyn ContentStore) -> &'static str {
//!     store.name()
//! }
//!
//! assert_eq!(describe(&MemoryStore::new()), "memory");
//! assert_eq!(describe(&SanityClient::new("p", "production", "2024-01-01")), "sanity");
//! ```

pub mod image;
pub mod memory;
pub mod query;
pub mod sanity;
pub mod traits;

pub use image::{ImageUrl, ImageUrlBuilder};
pub use memory::{parse_documents, FailOn, MemoryStore, StoreOperation};
pub use query::{Direction, Ordering, Projection, Query, Range};
pub use sanity::SanityClient;
pub use traits::{fetch_as, ContentStore, StoreError};
