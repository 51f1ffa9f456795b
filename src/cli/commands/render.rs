//! render command - Render a page to HTML
//!
//! # Example
//!
//! ```bash
//! # From the configured dataset
//! groundwork render services
//!
//! # From a local export, as a render tree
//! groundwork render /about --fixture export.json --json
//! ```

use std::path::Path;

use anyhow::{Context as _, Result};

use super::{load_config, parse_route};
use crate::cli::Context;
use crate::pages::{page_for, RenderContext, Route};
use crate::store::{parse_documents, ContentStore, MemoryStore, SanityClient};
use crate::ui::output;

/// Run the render command.
///
/// This is a synchronous wrapper that uses tokio to run the async implementation.
pub fn render(ctx: &Context, route: &str, fixture: Option<&Path>, json: bool) -> Result<()> {
    let route = parse_route(route)?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(render_async(ctx, route, fixture, json))
}

async fn render_async(
    ctx: &Context,
    route: Route,
    fixture: Option<&Path>,
    json: bool,
) -> Result<()> {
    let config = load_config(ctx)?;

    let store: Box<dyn ContentStore> = match fixture {
        Some(path) => Box::new(load_fixture(path)?),
        None => {
            let client = SanityClient::from_config(&config);
            output::debug(format!("querying {}", client.query_url()), ctx.verbosity());
            Box::new(client)
        }
    };

    let page = page_for(route);
    page.activate(store.as_ref()).await;
    let node = page.render(&RenderContext::from_config(&config));

    if json {
        let text = serde_json::to_string_pretty(&node).context("Failed to serialize render tree")?;
        output::result(text);
    } else {
        output::result(node.to_html());
    }
    Ok(())
}

/// A memory store holding the documents of a content export.
pub(crate) fn load_fixture(path: &Path) -> Result<MemoryStore> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let documents =
        parse_documents(&text).with_context(|| format!("Failed to parse {}", path.display()))?;
    MemoryStore::with_documents(documents)
        .with_context(|| format!("Invalid content in {}", path.display()))
}
