//! config command - Get, set, or list configuration values
//!
//! `get` and `list` show effective values (project over global over
//! defaults). `set` writes the project file in the working directory.

use anyhow::{bail, Context as _, Result};

use super::load_config;
use crate::cli::Context;
use crate::core::config::schema::{ImagesSection, RelaySection, SiteConfig, StoreSection};
use crate::core::config::Config;
use crate::ui::output;

/// Every key `config` accepts.
pub const KEYS: &[&str] = &[
    "store.project_id",
    "store.dataset",
    "store.api_version",
    "store.use_cdn",
    "store.token",
    "store.api_base",
    "images.base_url",
    "relay.endpoint",
    "relay.service_id",
    "relay.template_id",
    "relay.public_key",
];

const MASK: &str = "********";

/// Effective value of `key`, or `None` when unset and without default.
fn effective(config: &Config, key: &str) -> Result<Option<String>> {
    let value = match key {
        "store.project_id" => Some(config.project_id().to_string()),
        "store.dataset" => Some(config.dataset().to_string()),
        "store.api_version" => Some(config.api_version().to_string()),
        "store.use_cdn" => Some(config.use_cdn().to_string()),
        "store.token" => config.token().map(|_| MASK.to_string()),
        "store.api_base" => Some(config.api_host()),
        "images.base_url" => Some(config.image_base().to_string()),
        "relay.endpoint" => Some(
            config
                .relay_value("endpoint")
                .unwrap_or(crate::core::config::DEFAULT_RELAY_ENDPOINT)
                .to_string(),
        ),
        "relay.service_id" | "relay.template_id" | "relay.public_key" => {
            let field = key.trim_start_matches("relay.");
            config.relay_value(field).map(str::to_string)
        }
        _ => bail!("Unknown configuration key: {}", key),
    };
    Ok(value)
}

/// Get a configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let config = load_config(ctx)?;
    if let Some(value) = effective(&config, key)? {
        output::result(value);
    }
    Ok(())
}

/// Set a configuration value in the project file.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let cwd = ctx.cwd()?;
    let config = load_config(ctx)?;
    let mut project = config.project.unwrap_or_default();

    apply(&mut project, key, value)?;

    let path = Config::write_project(&cwd, &project).context("Failed to write config")?;
    output::debug(format!("wrote {}", path.display()), ctx.verbosity());
    output::success(format!("Set {} = {}", key, value), ctx.verbosity());
    Ok(())
}

fn apply(config: &mut SiteConfig, key: &str, value: &str) -> Result<()> {
    let text = Some(value.to_string());
    match key {
        "store.project_id" => store(config).project_id = text,
        "store.dataset" => store(config).dataset = text,
        "store.api_version" => store(config).api_version = text,
        "store.use_cdn" => {
            let flag = value
                .parse::<bool>()
                .with_context(|| format!("{} expects true or false", key))?;
            store(config).use_cdn = Some(flag);
        }
        "store.token" => store(config).token = text,
        "store.api_base" => store(config).api_base = text,
        "images.base_url" => {
            config
                .images
                .get_or_insert_with(ImagesSection::default)
                .base_url = text
        }
        "relay.endpoint" => relay(config).endpoint = text,
        "relay.service_id" => relay(config).service_id = text,
        "relay.template_id" => relay(config).template_id = text,
        "relay.public_key" => relay(config).public_key = text,
        _ => bail!("Unknown configuration key: {}", key),
    }
    Ok(())
}

fn store(config: &mut SiteConfig) -> &mut StoreSection {
    config.store.get_or_insert_with(StoreSection::default)
}

fn relay(config: &mut SiteConfig) -> &mut RelaySection {
    config.relay.get_or_insert_with(RelaySection::default)
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let config = load_config(ctx)?;

    output::print("# Effective Configuration", ctx.verbosity());
    if let Some(path) = config.global_config_loaded_from() {
        output::print(format!("# global:  {}", path.display()), ctx.verbosity());
    }
    if let Some(path) = config.project_config_loaded_from() {
        output::print(format!("# project: {}", path.display()), ctx.verbosity());
    }

    let mut pairs = Vec::with_capacity(KEYS.len());
    for key in KEYS {
        let value = effective(&config, key)?.unwrap_or_else(|| "(not set)".to_string());
        pairs.push((*key, value));
    }
    output::result(output::format_pairs(&pairs));
    Ok(())
}
