//! render
//!
//! The rich-text render contract.
//!
//! A body is turned into a tree of [`RenderNode`]s by looking up per-kind
//! renderers in a [`Components`] table. The site's table is
//! [`Components::site`].
//!
//! # Modules
//!
//! - [`node`] - Presentational node tree and HTML serialization
//! - [`html`] - Escaping helpers
//! - [`marks`] - Span to mark-tree grouping
//! - [`components`] - The renderer table
//! - [`body`] - Body walker and list nesting
//! - [`site`] - The site's default table

pub mod body;
pub mod components;
pub mod html;
pub mod marks;
pub mod node;
pub mod site;

pub use body::render_body;
pub use components::{Components, MarkContext};
pub use node::{Element, RenderNode};
pub use site::{opens_new_context, separator, FALLBACK_ALT, RICH_IMAGE_WIDTH};
