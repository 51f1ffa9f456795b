//! query command - Show the queries a page issues

use anyhow::Result;

use super::parse_route;
use crate::cli::Context;
use crate::ui::output;

/// Print each GROQ query the route's page issues, one per line.
pub fn query(ctx: &Context, route: &str) -> Result<()> {
    let route = parse_route(route)?;
    let queries = route.queries();
    if queries.is_empty() {
        output::print(format!("{} issues no queries", route), ctx.verbosity());
        return Ok(());
    }
    for query in &queries {
        output::result(query.to_groq());
    }
    Ok(())
}
