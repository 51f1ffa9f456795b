//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration for the working directory
//! 2. Builds the store, page or relay it needs
//! 3. Formats and displays output through [`crate::ui::output`]
//!
//! # Async Commands
//!
//! `render` and `contact` do network I/O. Each creates its own tokio
//! runtime and blocks on an async implementation.

mod completion;
mod config_cmd;
mod contact;
mod query;
mod render;
mod schema;
mod validate;

pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use contact::contact;
pub use query::query;
pub use render::render;
pub use schema::schema;
pub use validate::validate;

use anyhow::{Context as _, Result};

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;
use crate::core::config::Config;
use crate::pages::Route;
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Render {
            route,
            fixture,
            json,
        } => render::render(ctx, &route, fixture.as_deref(), json),
        Command::Query { route } => query::query(ctx, &route),
        Command::Schema { json } => schema::schema(ctx, json),
        Command::Validate { file } => validate::validate(ctx, &file),
        Command::Contact {
            first_name,
            last_name,
            address,
            phone,
            service_type,
            preferred_time,
            special_notes,
            dry_run,
        } => contact::contact(
            ctx,
            contact::ContactArgs {
                first_name,
                last_name,
                address,
                phone,
                service_type,
                preferred_time,
                special_notes,
            },
            dry_run,
        ),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
            ConfigAction::List => config_cmd::list(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Load configuration for the context's directory, reporting warnings.
pub(crate) fn load_config(ctx: &Context) -> Result<Config> {
    let cwd = ctx.cwd()?;
    let loaded = Config::load(Some(&cwd)).context("Failed to load config")?;
    for warning in &loaded.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            ctx.verbosity(),
        );
    }
    Ok(loaded.config)
}

pub(crate) fn parse_route(route: &str) -> Result<Route> {
    route.parse::<Route>().map_err(anyhow::Error::msg)
}
