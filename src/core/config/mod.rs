//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! groundwork has two configuration scopes:
//! - **Global**: User-level settings (typically relay credentials, tokens)
//! - **Project**: Site checkout settings (store project, dataset)
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$GROUNDWORK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/groundwork/config.toml`
//! 3. `~/.groundwork/config.toml`
//!
//! # Project Config Locations
//!
//! Searched in order:
//! 1. `groundwork.toml` (canonical)
//! 2. `.groundwork/site.toml` (compatibility, warns)
//!
//! # Example
//!
//! ```no_run
//! use groundwork::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/site"))).unwrap();
//! let config = result.config;
//!
//! println!("Project: {}", config.project_id());
//! println!("Dataset: {}", config.dataset());
//! println!("Query API: {}", config.api_host());
//! ```

pub mod schema;

pub use schema::{ImagesSection, RelaySection, SiteConfig, StoreSection};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default content project.
pub const DEFAULT_PROJECT_ID: &str = "snti8zdm";

/// Default dataset.
pub const DEFAULT_DATASET: &str = "production";

/// Default query API version.
pub const DEFAULT_API_VERSION: &str = "2024-01-01";

/// Default image CDN.
pub const DEFAULT_IMAGE_BASE: &str = "https://cdn.sanity.io";

/// Default relay endpoint.
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("missing config value: {0}")]
    Missing(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Relay credentials resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySettings {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

/// Merged configuration from all sources.
///
/// This struct provides accessor methods that apply precedence rules
/// automatically. Project config overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: SiteConfig,
    /// Project configuration (if found)
    pub project: Option<SiteConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the project config file (if loaded)
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `project_dir` is provided, also loads project-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load(project_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = Self::load_global()?;

        let (project, project_path) = if let Some(dir) = project_dir {
            Self::load_project(dir, &mut warnings)?
        } else {
            (None, None)
        };

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        tracing::debug!(
            global = ?global_path,
            project = ?project_path,
            "configuration loaded"
        );

        Ok(ConfigLoadResult {
            config: Config {
                global,
                project,
                global_path,
                project_path,
            },
            warnings,
        })
    }

    /// Build a config from an explicit project section (no files involved).
    pub fn from_project(project: SiteConfig) -> Self {
        Config {
            project: Some(project),
            ..Default::default()
        }
    }

    /// Load global configuration from standard locations.
    fn load_global() -> Result<(SiteConfig, Option<PathBuf>), ConfigError> {
        if let Ok(path) = std::env::var("GROUNDWORK_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("groundwork/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(".groundwork/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((SiteConfig::default(), None))
    }

    /// Load project configuration from standard locations.
    fn load_project(
        dir: &Path,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(Option<SiteConfig>, Option<PathBuf>), ConfigError> {
        let canonical = Self::project_config_path(dir);
        if canonical.exists() {
            let config = Self::read_config(&canonical)?;
            return Ok((Some(config), Some(canonical)));
        }

        let compat = dir.join(".groundwork/site.toml");
        if compat.exists() {
            warnings.push(ConfigWarning {
                message: format!(
                    "Using deprecated config location. Please move to '{}'",
                    canonical.display()
                ),
                path: compat.clone(),
            });
            let config = Self::read_config(&compat)?;
            return Ok((Some(config), Some(compat)));
        }

        Ok((None, None))
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<SiteConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for project config.
    pub fn project_config_path(dir: &Path) -> PathBuf {
        dir.join("groundwork.toml")
    }

    /// Write project config atomically.
    ///
    /// Creates parent directories if needed. Uses atomic write
    /// (write to temp file, then rename) to prevent corruption.
    pub fn write_project(dir: &Path, config: &SiteConfig) -> Result<PathBuf, ConfigError> {
        config.validate()?;
        let path = Self::project_config_path(dir);
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write a config file atomically.
    fn write_config_atomic<T: serde::Serialize>(
        path: &Path,
        config: &T,
    ) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Pick a value from the project scope, falling back to global.
    fn pick<'a, T: ?Sized>(&'a self, get: impl Fn(&'a SiteConfig) -> Option<&'a T>) -> Option<&'a T> {
        self.project
            .as_ref()
            .and_then(&get)
            .or_else(|| get(&self.global))
    }

    /// Content project id. Defaults to [`DEFAULT_PROJECT_ID`].
    pub fn project_id(&self) -> &str {
        self.pick(|c| c.store.as_ref()?.project_id.as_deref())
            .unwrap_or(DEFAULT_PROJECT_ID)
    }

    /// Dataset. Defaults to [`DEFAULT_DATASET`].
    pub fn dataset(&self) -> &str {
        self.pick(|c| c.store.as_ref()?.dataset.as_deref())
            .unwrap_or(DEFAULT_DATASET)
    }

    /// Query API version without the leading `v`.
    pub fn api_version(&self) -> &str {
        let version = self
            .pick(|c| c.store.as_ref()?.api_version.as_deref())
            .unwrap_or(DEFAULT_API_VERSION);
        version.strip_prefix('v').unwrap_or(version)
    }

    /// Whether to query the CDN edge. Defaults to `false` (live reads).
    pub fn use_cdn(&self) -> bool {
        self.pick(|c| c.store.as_ref()?.use_cdn.as_ref())
            .copied()
            .unwrap_or(false)
    }

    /// Read token, if configured.
    pub fn token(&self) -> Option<&str> {
        self.pick(|c| c.store.as_ref()?.token.as_deref())
    }

    /// Query API host.
    ///
    /// An explicit `store.api_base` wins; otherwise the host is derived from
    /// the project id and the CDN flag.
    pub fn api_host(&self) -> String {
        if let Some(base) = self.pick(|c| c.store.as_ref()?.api_base.as_deref()) {
            return base.trim_end_matches('/').to_string();
        }
        let edge = if self.use_cdn() { "apicdn" } else { "api" };
        format!("https://{}.{}.sanity.io", self.project_id(), edge)
    }

    /// Image CDN base URL. Defaults to [`DEFAULT_IMAGE_BASE`].
    pub fn image_base(&self) -> &str {
        self.pick(|c| c.images.as_ref()?.base_url.as_deref())
            .unwrap_or(DEFAULT_IMAGE_BASE)
            .trim_end_matches('/')
    }

    /// Relay settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` naming the first absent credential.
    pub fn relay(&self) -> Result<RelaySettings, ConfigError> {
        let endpoint = self
            .pick(|c| c.relay.as_ref()?.endpoint.as_deref())
            .unwrap_or(DEFAULT_RELAY_ENDPOINT);
        let required = |name: &str, value: Option<&str>| {
            value
                .map(str::to_string)
                .ok_or_else(|| ConfigError::Missing(name.to_string()))
        };
        Ok(RelaySettings {
            endpoint: endpoint.to_string(),
            service_id: required(
                "relay.service_id",
                self.pick(|c| c.relay.as_ref()?.service_id.as_deref()),
            )?,
            template_id: required(
                "relay.template_id",
                self.pick(|c| c.relay.as_ref()?.template_id.as_deref()),
            )?,
            public_key: required(
                "relay.public_key",
                self.pick(|c| c.relay.as_ref()?.public_key.as_deref()),
            )?,
        })
    }

    /// A single relay field (`endpoint`, `service_id`, `template_id` or
    /// `public_key`) as configured, without defaults.
    pub fn relay_value(&self, field: &str) -> Option<&str> {
        self.pick(|c| {
            let relay = c.relay.as_ref()?;
            match field {
                "endpoint" => relay.endpoint.as_deref(),
                "service_id" => relay.service_id.as_deref(),
                "template_id" => relay.template_id.as_deref(),
                "public_key" => relay.public_key.as_deref(),
                _ => None,
            }
        })
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}
