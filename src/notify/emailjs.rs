//! notify::emailjs
//!
//! Relay backed by the EmailJS REST API.
//!
//! # API
//!
//! `POST {endpoint}` with a JSON body
//! `{ "service_id", "template_id", "user_id", "template_params" }`, where
//! `user_id` is the account's public key. The service answers `200 OK`
//! with a plain-text body on success.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::traits::{ContactMessage, NotificationRelay, RelayError};
use crate::core::config::{Config, ConfigError, RelaySettings};

/// User-Agent header value for relay requests.
const USER_AGENT_VALUE: &str = "groundwork";

/// EmailJS relay.
pub struct EmailJsRelay {
    client: Client,
    settings: RelaySettings,
}

// Custom Debug to avoid exposing the public key
impl std::fmt::Debug for EmailJsRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailJsRelay")
            .field("endpoint", &self.settings.endpoint)
            .field("service_id", &self.settings.service_id)
            .field("template_id", &self.settings.template_id)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a BTreeMap<String, String>,
}

impl EmailJsRelay {
    pub fn new(settings: RelaySettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Build a relay from the `[relay]` config section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if a service id, template id or
    /// public key is not configured.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(config.relay()?))
    }

    pub fn endpoint(&self) -> &str {
        &self.settings.endpoint
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers
    }
}

#[async_trait]
impl NotificationRelay for EmailJsRelay {
    fn name(&self) -> &'static str {
        "emailjs"
    }

    async fn send(&self, message: &ContactMessage) -> Result<(), RelayError> {
        let body = SendRequest {
            service_id: &self.settings.service_id,
            template_id: &self.settings.template_id,
            user_id: &self.settings.public_key,
            template_params: &message.template_params,
        };
        debug!(endpoint = %self.settings.endpoint, template = %self.settings.template_id, "sending contact message");

        let response = self
            .client
            .post(&self.settings.endpoint)
            .headers(Self::headers())
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), %message, "relay rejected contact message");
        Err(RelayError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> RelaySettings {
        RelaySettings {
            endpoint: "https://relay.example.com/send".into(),
            service_id: "service_x".into(),
            template_id: "template_y".into(),
            public_key: "secret-key".into(),
        }
    }

    #[test]
    fn debug_hides_public_key() {
        let relay = EmailJsRelay::new(settings());
        let debug = format!("{:?}", relay);
        assert!(debug.contains("service_x"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn request_body_shape() {
        let message = ContactMessage::new().param("first_name", "Ada");
        let body = SendRequest {
            service_id: "s",
            template_id: "t",
            user_id: "k",
            template_params: &message.template_params,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["user_id"], "k");
        assert_eq!(value["template_params"]["first_name"], "Ada");
    }

    #[test]
    fn name_is_emailjs() {
        assert_eq!(EmailJsRelay::new(settings()).name(), "emailjs");
    }
}
