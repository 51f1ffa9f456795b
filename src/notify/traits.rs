//! notify::traits
//!
//! Outbound notification relay trait.
//!
//! # Design
//!
//! The contact form hands a flat map of template parameters to a relay,
//! which forwards it to a transactional email service. Delivery is
//! fire-and-forget: there is no retry and nothing is persisted.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Errors from relay operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// The relay answered with a non-success status.
    #[error("relay rejected message: {status} - {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// A message for the relay's template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    /// Template variables, keyed by form field name
    pub template_params: BTreeMap<String, String>,
}

impl ContactMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a template parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.template_params.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.template_params.get(name).map(String::as_str)
    }
}

/// A transactional email relay.
#[async_trait]
pub trait NotificationRelay: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Deliver one message.
    async fn send(&self, message: &ContactMessage) -> Result<(), RelayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_are_ordered_by_name() {
        let message = ContactMessage::new().param("phone", "555").param("address", "1 Main St");
        let keys: Vec<_> = message.template_params.keys().cloned().collect();
        assert_eq!(keys, vec!["address", "phone"]);
        assert_eq!(message.get("phone"), Some("555"));
        assert_eq!(message.get("missing"), None);
    }

    #[test]
    fn error_display() {
        let err = RelayError::Rejected {
            status: 400,
            message: "The Public Key is invalid".into(),
        };
        assert_eq!(
            err.to_string(),
            "relay rejected message: 400 - The Public Key is invalid"
        );
    }
}
