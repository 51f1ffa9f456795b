//! core::config::schema
//!
//! Configuration schema types.
//!
//! The same [`SiteConfig`] shape is used for the global file and the
//! project file; precedence is applied by the accessors on
//! [`super::Config`].
//!
//! # Validation
//!
//! Config values are validated after parsing to ensure they conform to
//! expected formats (e.g., the dataset name, API version date, URLs).

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Site configuration (either scope).
///
/// # Example
///
/// ```toml
/// [store]
/// project_id = "snti8zdm"
/// dataset = "production"
/// api_version = "2024-01-01"
/// use_cdn = false
///
/// [images]
/// base_url = "https://cdn.sanity.io"
///
/// [relay]
/// service_id = "service_kod8rid"
/// template_id = "template_wqaw0e8"
/// public_key = "Q7-kIVAsbVu6mYAW8"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Content store connection
    pub store: Option<StoreSection>,

    /// Image CDN settings
    pub images: Option<ImagesSection>,

    /// Contact form relay settings
    pub relay: Option<RelaySection>,
}

impl SiteConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(store) = &self.store {
            store.validate()?;
        }
        if let Some(images) = &self.images {
            images.validate()?;
        }
        if let Some(relay) = &self.relay {
            relay.validate()?;
        }
        Ok(())
    }
}

/// Content store connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    /// Project identifier on the content platform
    pub project_id: Option<String>,

    /// Dataset name (e.g., "production")
    pub dataset: Option<String>,

    /// Query API version date (YYYY-MM-DD)
    pub api_version: Option<String>,

    /// Query the CDN edge instead of the live API
    pub use_cdn: Option<bool>,

    /// Read token for private datasets
    pub token: Option<String>,

    /// Override the API host (used for testing)
    pub api_base: Option<String>,
}

impl StoreSection {
    /// Validate the store section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(project_id) = &self.project_id {
            if project_id.is_empty()
                || !project_id
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid project_id '{}', must be lowercase letters and digits",
                    project_id
                )));
            }
        }

        if let Some(dataset) = &self.dataset {
            validate_dataset(dataset)?;
        }

        if let Some(version) = &self.api_version {
            validate_api_version(version)?;
        }

        if let Some(base) = &self.api_base {
            validate_url("store.api_base", base)?;
        }

        Ok(())
    }
}

/// Image CDN settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesSection {
    /// CDN base URL
    pub base_url: Option<String>,
}

impl ImagesSection {
    /// Validate the images section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base) = &self.base_url {
            validate_url("images.base_url", base)?;
        }
        Ok(())
    }
}

/// Transactional email relay settings for the contact form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RelaySection {
    /// Relay send endpoint
    pub endpoint: Option<String>,

    /// Relay service identifier
    pub service_id: Option<String>,

    /// Email template identifier
    pub template_id: Option<String>,

    /// Public (client) key
    pub public_key: Option<String>,
}

impl RelaySection {
    /// Validate the relay section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = &self.endpoint {
            validate_url("relay.endpoint", endpoint)?;
        }
        for (name, value) in [
            ("relay.service_id", &self.service_id),
            ("relay.template_id", &self.template_id),
            ("relay.public_key", &self.public_key),
        ] {
            if matches!(value, Some(v) if v.trim().is_empty()) {
                return Err(ConfigError::InvalidValue(format!("{name} cannot be empty")));
            }
        }
        Ok(())
    }
}

/// Dataset names: 1-64 chars of lowercase letters, digits, `_` and `-`,
/// starting with a letter or digit.
fn validate_dataset(dataset: &str) -> Result<(), ConfigError> {
    let valid = !dataset.is_empty()
        && dataset.len() <= 64
        && dataset
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && dataset
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue(format!(
            "invalid dataset '{}'",
            dataset
        )))
    }
}

/// API versions are either `1`, `X` (experimental) or a `YYYY-MM-DD` date.
fn validate_api_version(version: &str) -> Result<(), ConfigError> {
    let version = version.strip_prefix('v').unwrap_or(version);
    if version == "1" || version == "X" {
        return Ok(());
    }
    chrono::NaiveDate::parse_from_str(version, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            ConfigError::InvalidValue(format!(
                "invalid api_version '{}', expected YYYY-MM-DD",
                version
            ))
        })
}

fn validate_url(name: &str, value: &str) -> Result<(), ConfigError> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidValue(format!("invalid {name} '{value}': {e}")))
}
