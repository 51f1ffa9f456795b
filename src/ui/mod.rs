//! ui
//!
//! Terminal output for the command-line interface.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware printing and formatting
//!
//! Library modules log through `tracing`; only the CLI prints.

pub mod output;
