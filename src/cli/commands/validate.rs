//! validate command - Validate a content export against the schema
//!
//! References resolve against the other documents in the file. A document
//! missing a sourced slug gets a suggestion derived from its source field,
//! unique among the file's slugs.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use serde_json::Value;

use crate::cli::Context;
use crate::content::{
    document_type, validate_document_with, DocumentsResolver, FieldKind, ValidationReport,
    ViolationKind,
};
use crate::core::naming::unique_slug;
use crate::core::types::Slug;
use crate::store::parse_documents;
use crate::ui::output;

/// Validate every document in `file`.
pub fn validate(ctx: &Context, file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let documents =
        parse_documents(&text).with_context(|| format!("Failed to parse {}", file.display()))?;
    let resolver = DocumentsResolver(&documents);
    let mut taken = existing_slugs(&documents);

    let mut failed = 0;
    for (index, doc) in documents.iter().enumerate() {
        match validate_document_with(doc, &resolver) {
            Ok(()) => output::debug(format!("{} ok", describe(doc, index)), ctx.verbosity()),
            Err(report) => {
                failed += 1;
                let lines: Vec<String> = report.violations.iter().map(|v| v.to_string()).collect();
                output::error(format!(
                    "{}: {}\n{}",
                    describe(doc, index),
                    report,
                    output::format_list(&lines, "  - ")
                ));
                if let Some(slug) = suggest_slug(doc, &report, &taken) {
                    output::print(format!("  suggested slug: {}", slug), ctx.verbosity());
                    taken.insert(slug);
                }
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} document(s) failed validation", failed, documents.len());
    }
    output::success(
        format!("{} document(s) valid", documents.len()),
        ctx.verbosity(),
    );
    Ok(())
}

fn describe(doc: &Value, index: usize) -> String {
    let doc_type = doc.get("_type").and_then(Value::as_str).unwrap_or("?");
    match doc.get("_id").and_then(Value::as_str) {
        Some(id) => format!("{} {}", doc_type, id),
        None => format!("{} #{}", doc_type, index),
    }
}

fn existing_slugs(documents: &[Value]) -> HashSet<String> {
    documents
        .iter()
        .filter_map(|doc| doc.pointer("/slug/current").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

/// A slug for a document whose required slug is missing.
fn suggest_slug(doc: &Value, report: &ValidationReport, taken: &HashSet<String>) -> Option<String> {
    let missing = report
        .of_kind(ViolationKind::Required)
        .any(|v| v.path == "slug" || v.path == "slug.current");
    if !missing {
        return None;
    }

    let field = document_type(&report.document_type)?.field("slug")?;
    let FieldKind::Slug { source, .. } = &field.kind else {
        return None;
    };
    let title = doc.get(*source).and_then(Value::as_str)?;
    let slug = Slug::from_title(title).ok()?;
    Some(unique_slug(slug.as_str(), taken))
}
