//! schema command - Describe the content schema

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::content::{named_types, schema_types};
use crate::ui::output;

/// Print the document types with their fields and constraints.
pub fn schema(ctx: &Context, json: bool) -> Result<()> {
    if json {
        let value = serde_json::json!({
            "documents": schema_types(),
            "types": named_types(),
        });
        let text = serde_json::to_string_pretty(&value).context("Failed to serialize schema")?;
        output::result(text);
        return Ok(());
    }

    for (i, doc_type) in schema_types().iter().enumerate() {
        if i > 0 {
            output::result("");
        }
        output::result(format!("{} ({})", doc_type.name, doc_type.title));
        let lines: Vec<String> = doc_type
            .fields
            .iter()
            .map(|field| {
                let summary = field.constraint_summary();
                if summary.is_empty() {
                    format!("{}: {}", field.name, field.kind.type_name())
                } else {
                    format!("{}: {} [{}]", field.name, field.kind.type_name(), summary)
                }
            })
            .collect();
        output::result(output::format_list(&lines, "  "));
    }

    output::debug(
        format!("{} named types", named_types().len()),
        ctx.verbosity(),
    );
    Ok(())
}
