//! Groundwork - the content core of a construction company's website
//!
//! Groundwork declares the content schema the site's editors work with,
//! reads published content from a headless content store, renders rich
//! text to HTML through a single component table and drives the page views
//! (Home, About, Projects, Services, Contact) through their
//! loading/loaded/failed states. Consultation requests from the contact
//! form are validated and sent through an email relay.
//!
//! # Architecture
//!
//! - [`content`] - Schema declarations, validation and typed documents
//! - [`render`] - Rich-text render contract and HTML tree
//! - [`store`] - Query builder, content store clients, image URLs
//! - [`pages`] - Page views and their state machines
//! - [`contact`] - Contact form validation and submission
//! - [`notify`] - Email relay abstraction
//! - [`core`] - Domain types, slug naming, configuration
//! - [`cli`] - Command-line interface layer
//! - [`ui`] - Terminal output
//!
//! # Invariants
//!
//! 1. Documents are validated before they reach a store
//! 2. Rendering never fails: unknown styles, marks and node types keep
//!    their text
//! 3. A view that is no longer mounted never applies a late result
//! 4. A contact request with a missing required field is never sent

pub mod cli;
pub mod contact;
pub mod content;
pub mod core;
pub mod notify;
pub mod pages;
pub mod render;
pub mod store;
pub mod ui;
