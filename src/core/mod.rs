//! core
//!
//! Core domain types, naming rules and configuration for groundwork.
//!
//! # Modules
//!
//! - [`types`] - Strong types: DocumentId, Slug, AssetRef, LinkHref
//! - [`naming`] - Slug generation and collision handling
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Ids, slugs, asset references and links are checked once, when built
//! - Config files reject unknown keys
//! - Nothing here touches the network

pub mod config;
pub mod naming;
pub mod types;
