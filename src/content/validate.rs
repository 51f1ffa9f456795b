//! content::validate
//!
//! Write-time validation of documents against their declared schema.
//!
//! The validator walks a JSON document alongside its [`DocumentType`] and
//! collects every violation rather than stopping at the first one. A
//! [`ReferenceResolver`] lets callers that can see other documents check
//! reference target types; without one, references are only checked for
//! shape.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::fields::{BlockSpec, DocumentType, FieldKind, FieldSpec, ImageSpec, Rule};
use super::registry::document_type;
use crate::core::types::{DocumentId, LinkHref, Slug};

/// Which rule a violation broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    Required,
    Min,
    Max,
    Type,
    Format,
    Scheme,
    Reference,
    NotAllowed,
    UnknownType,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViolationKind::Required => "required",
            ViolationKind::Min => "min",
            ViolationKind::Max => "max",
            ViolationKind::Type => "type",
            ViolationKind::Format => "format",
            ViolationKind::Scheme => "scheme",
            ViolationKind::Reference => "reference",
            ViolationKind::NotAllowed => "not-allowed",
            ViolationKind::UnknownType => "unknown-type",
        };
        write!(f, "{name}")
    }
}

/// A single failed rule at a path inside the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field path, e.g. `images[0].alt`
    pub path: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// All violations found in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{document_type} document failed validation with {count} violation(s)", count = .violations.len())]
pub struct ValidationReport {
    pub document_type: String,
    pub document_id: Option<String>,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Whether any violation sits at exactly `path`.
    pub fn has_violation_at(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }

    /// Violations of a given kind.
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }
}

/// Outcome of resolving a referenced document id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The document exists and has this `_type`
    Found(String),
    /// The resolver is authoritative and the document does not exist
    Missing,
    /// The resolver cannot tell
    Unknown,
}

/// Looks up referenced documents during validation.
pub trait ReferenceResolver {
    fn resolve(&self, id: &str) -> Resolution;
}

/// Resolver that knows nothing; only reference shape is checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl ReferenceResolver for NoResolver {
    fn resolve(&self, _id: &str) -> Resolution {
        Resolution::Unknown
    }
}

/// Resolver over a set of raw documents (e.g. a content export).
#[derive(Debug, Clone, Copy)]
pub struct DocumentsResolver<'a>(pub &'a [Value]);

impl ReferenceResolver for DocumentsResolver<'_> {
    fn resolve(&self, id: &str) -> Resolution {
        self.0
            .iter()
            .find(|doc| doc.get("_id").and_then(Value::as_str) == Some(id))
            .map(|doc| {
                Resolution::Found(
                    doc.get("_type")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                )
            })
            .unwrap_or(Resolution::Missing)
    }
}

/// Validate a document against a type, without reference lookups.
///
/// # Errors
///
/// Returns a [`ValidationReport`] listing every violation.
///
/// # Example
///
/// ```
/// use groundwork::content::{document_type, validate};
/// use serde_json::json;
///
/// let project = document_type("project").unwrap();
/// let report = validate(project, &json!({
///     "_type": "project",
///     "title": "Loft",
///     "slug": { "current": "loft" },
///     "shortDescription": "Open-plan loft conversion",
///     "service": { "_ref": "service-1" },
///     "images": []
/// })).unwrap_err();
///
/// assert!(report.has_violation_at("images"));
/// ```
pub fn validate(doc_type: &DocumentType, doc: &Value) -> Result<(), ValidationReport> {
    validate_with(doc_type, doc, &NoResolver)
}

/// Validate a document against a type, resolving references.
pub fn validate_with(
    doc_type: &DocumentType,
    doc: &Value,
    resolver: &dyn ReferenceResolver,
) -> Result<(), ValidationReport> {
    let mut walker = Walker {
        resolver,
        violations: Vec::new(),
    };

    match doc.as_object() {
        Some(_) => {
            walker.check_system_fields(doc_type, doc);
            for field in &doc_type.fields {
                walker.check_field(field.name, field, doc.get(field.name));
            }
        }
        None => walker.push("", ViolationKind::Type, "document must be an object"),
    }

    if walker.violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationReport {
            document_type: doc_type.name.to_string(),
            document_id: doc.get("_id").and_then(Value::as_str).map(str::to_string),
            violations: walker.violations,
        })
    }
}

/// Look up the document's `_type` in the registry and validate it.
pub fn validate_document(doc: &Value) -> Result<(), ValidationReport> {
    validate_document_with(doc, &NoResolver)
}

/// Like [`validate_document`], resolving references.
pub fn validate_document_with(
    doc: &Value,
    resolver: &dyn ReferenceResolver,
) -> Result<(), ValidationReport> {
    let type_name = doc.get("_type").and_then(Value::as_str).unwrap_or_default();
    match document_type(type_name) {
        Some(doc_type) => validate_with(doc_type, doc, resolver),
        None => Err(ValidationReport {
            document_type: type_name.to_string(),
            document_id: doc.get("_id").and_then(Value::as_str).map(str::to_string),
            violations: vec![Violation {
                path: "_type".to_string(),
                kind: ViolationKind::UnknownType,
                message: format!("unknown document type '{type_name}'"),
            }],
        }),
    }
}

struct Walker<'a> {
    resolver: &'a dyn ReferenceResolver,
    violations: Vec<Violation>,
}

impl Walker<'_> {
    fn push(&mut self, path: &str, kind: ViolationKind, message: impl Into<String>) {
        self.violations.push(Violation {
            path: path.to_string(),
            kind,
            message: message.into(),
        });
    }

    fn check_system_fields(&mut self, doc_type: &DocumentType, doc: &Value) {
        if let Some(id) = doc.get("_id") {
            match id.as_str() {
                Some(id) if DocumentId::new(id).is_ok() => {}
                _ => self.push("_id", ViolationKind::Format, "invalid document id"),
            }
        }
        if let Some(declared) = doc.get("_type").and_then(Value::as_str) {
            if declared != doc_type.name {
                self.push(
                    "_type",
                    ViolationKind::Type,
                    format!("expected '{}', found '{declared}'", doc_type.name),
                );
            }
        }
    }

    fn check_field(&mut self, path: &str, spec: &FieldSpec, value: Option<&Value>) {
        let value = match value {
            Some(v) if !is_empty(v) => v,
            // An empty array under a minimum count is reported by the count rule.
            Some(v @ Value::Array(_)) if has_min_count(spec) => v,
            _ => {
                if spec.is_required() {
                    self.push(path, ViolationKind::Required, format!("{} is required", spec.title));
                }
                return;
            }
        };

        if !self.check_kind(path, &spec.kind, value) {
            return;
        }

        for rule in &spec.rules {
            let size = match value {
                Value::Array(items) => items.len(),
                Value::String(s) => s.chars().count(),
                _ => continue,
            };
            match rule {
                Rule::Min(min) if size < *min => self.push(
                    path,
                    ViolationKind::Min,
                    format!("{} must have at least {min}", spec.title),
                ),
                Rule::Max(max) if size > *max => self.push(
                    path,
                    ViolationKind::Max,
                    format!("{} must have at most {max}", spec.title),
                ),
                _ => {}
            }
        }
    }

    /// Check the value's shape. Returns false when the value is the wrong
    /// type altogether, in which case size rules are skipped.
    fn check_kind(&mut self, path: &str, kind: &FieldKind, value: &Value) -> bool {
        match kind {
            FieldKind::String | FieldKind::Text => self.expect_string(path, value).is_some(),
            FieldKind::Number => {
                if value.is_number() {
                    true
                } else {
                    self.push(path, ViolationKind::Type, "expected a number");
                    false
                }
            }
            FieldKind::Date => {
                let Some(s) = self.expect_string(path, value) else {
                    return false;
                };
                if chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_err() {
                    self.push(path, ViolationKind::Format, format!("'{s}' is not a YYYY-MM-DD date"));
                }
                true
            }
            FieldKind::Datetime => {
                let Some(s) = self.expect_string(path, value) else {
                    return false;
                };
                if chrono::DateTime::parse_from_rfc3339(s).is_err() {
                    self.push(path, ViolationKind::Format, format!("'{s}' is not an RFC 3339 datetime"));
                }
                true
            }
            FieldKind::Slug { max_length, .. } => {
                self.check_slug(path, *max_length, value);
                true
            }
            FieldKind::Image(spec) => self.check_image(path, spec, value),
            FieldKind::Reference { to } => self.check_reference(path, to, value),
            FieldKind::Array { of } => self.check_array(path, of, value),
            FieldKind::Block(spec) => self.check_block(path, spec, value),
        }
    }

    fn expect_string<'v>(&mut self, path: &str, value: &'v Value) -> Option<&'v str> {
        let s = value.as_str();
        if s.is_none() {
            self.push(path, ViolationKind::Type, "expected a string");
        }
        s
    }

    fn check_slug(&mut self, path: &str, max_length: usize, value: &Value) {
        let current = value.get("current").and_then(Value::as_str);
        let current_path = format!("{path}.current");
        match current {
            None => self.push(&current_path, ViolationKind::Required, "slug is required"),
            Some(s) if s.chars().count() > max_length => self.push(
                &current_path,
                ViolationKind::Max,
                format!("slug must be at most {max_length} characters"),
            ),
            Some(s) => {
                if let Err(e) = Slug::new(s) {
                    self.push(&current_path, ViolationKind::Format, e.to_string());
                }
            }
        }
    }

    fn check_object<'v>(&mut self, path: &str, value: &'v Value) -> Option<&'v serde_json::Map<String, Value>> {
        let object = value.as_object();
        if object.is_none() {
            self.push(path, ViolationKind::Type, "expected an object");
        }
        object
    }

    fn check_image(&mut self, path: &str, spec: &ImageSpec, value: &Value) -> bool {
        let Some(object) = self.check_object(path, value) else {
            return false;
        };
        if let Some(asset) = object.get("asset") {
            if asset.get("_ref").and_then(Value::as_str).is_none() {
                self.push(&format!("{path}.asset"), ViolationKind::Reference, "asset must be a reference");
            }
        }
        for field in &spec.fields {
            self.check_field(&format!("{path}.{}", field.name), field, object.get(field.name));
        }
        true
    }

    fn check_reference(&mut self, path: &str, to: &[&'static str], value: &Value) -> bool {
        let Some(object) = self.check_object(path, value) else {
            return false;
        };
        let Some(id) = object.get("_ref").and_then(Value::as_str) else {
            self.push(&format!("{path}._ref"), ViolationKind::Required, "reference target is required");
            return true;
        };
        match self.resolver.resolve(id) {
            Resolution::Found(found) if !to.contains(&found.as_str()) => self.push(
                path,
                ViolationKind::Reference,
                format!("must reference {}, found '{found}'", to.join(" or ")),
            ),
            Resolution::Missing => self.push(
                path,
                ViolationKind::Reference,
                format!("referenced document '{id}' does not exist"),
            ),
            _ => {}
        }
        true
    }

    fn check_array(&mut self, path: &str, of: &[FieldKind], value: &Value) -> bool {
        let Some(items) = value.as_array() else {
            self.push(path, ViolationKind::Type, "expected an array");
            return false;
        };

        for (i, item) in items.iter().enumerate() {
            let item_path = format!("{path}[{i}]");
            let member = match item {
                Value::Object(object) => {
                    let item_type = object.get("_type").and_then(Value::as_str);
                    of.iter().find(|kind| kind.member_type().is_some() && kind.member_type() == item_type)
                }
                _ => of.iter().find(|kind| kind.member_type().is_none()),
            };
            match member {
                Some(kind) => {
                    if is_empty(item) {
                        self.push(&item_path, ViolationKind::Required, "array entries cannot be empty");
                    } else {
                        self.check_kind(&item_path, kind, item);
                    }
                }
                None => {
                    let found = item.get("_type").and_then(Value::as_str).unwrap_or("value");
                    self.push(
                        &item_path,
                        ViolationKind::NotAllowed,
                        format!("'{found}' is not allowed here"),
                    );
                }
            }
        }
        true
    }

    fn check_block(&mut self, path: &str, spec: &BlockSpec, value: &Value) -> bool {
        let Some(object) = self.check_object(path, value) else {
            return false;
        };

        let style = object.get("style").and_then(Value::as_str).unwrap_or("normal");
        if !spec.styles.contains(&style) {
            self.push(
                &format!("{path}.style"),
                ViolationKind::NotAllowed,
                format!("style '{style}' is not allowed"),
            );
        }

        if let Some(list) = object.get("listItem").and_then(Value::as_str) {
            if !spec.lists.contains(&list) {
                self.push(
                    &format!("{path}.listItem"),
                    ViolationKind::NotAllowed,
                    format!("list '{list}' is not allowed"),
                );
            }
        }

        let mark_defs = object
            .get("markDefs")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let mut def_keys = Vec::new();
        for (i, def) in mark_defs.iter().enumerate() {
            let def_path = format!("{path}.markDefs[{i}]");
            let key = def.get("_key").and_then(Value::as_str).unwrap_or_default();
            def_keys.push(key.to_string());
            let def_type = def.get("_type").and_then(Value::as_str).unwrap_or_default();
            let Some(annotation) = spec.annotations.iter().find(|a| a.name == def_type) else {
                self.push(
                    &def_path,
                    ViolationKind::NotAllowed,
                    format!("annotation '{def_type}' is not allowed"),
                );
                continue;
            };
            if let Some(href) = def.get("href").and_then(Value::as_str) {
                match LinkHref::parse(href) {
                    Ok(link) if annotation.schemes.contains(&link.scheme().name()) => {}
                    Ok(link) => self.push(
                        &format!("{def_path}.href"),
                        ViolationKind::Scheme,
                        format!("scheme '{}' is not allowed", link.scheme()),
                    ),
                    Err(e) => self.push(&format!("{def_path}.href"), ViolationKind::Scheme, e.to_string()),
                }
            }
        }

        let children = object.get("children").and_then(Value::as_array);
        for (i, child) in children.into_iter().flatten().enumerate() {
            let marks = child.get("marks").and_then(Value::as_array);
            for mark in marks.into_iter().flatten().filter_map(Value::as_str) {
                if !spec.decorators.contains(&mark) && !def_keys.iter().any(|k| k == mark) {
                    self.push(
                        &format!("{path}.children[{i}].marks"),
                        ViolationKind::NotAllowed,
                        format!("mark '{mark}' is not allowed"),
                    );
                }
            }
        }
        true
    }
}

/// Missing-equivalent values: null, blank strings and empty arrays.
fn has_min_count(spec: &FieldSpec) -> bool {
    spec.rules.iter().any(|rule| matches!(rule, Rule::Min(min) if *min > 0))
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_project() -> Value {
        json!({
            "_id": "project-loft",
            "_type": "project",
            "title": "Loft conversion",
            "slug": { "_type": "slug", "current": "loft-conversion" },
            "shortDescription": "Open-plan loft with skylights",
            "service": { "_type": "reference", "_ref": "service-interiors" },
            "images": [
                { "_type": "image", "_key": "i1", "asset": { "_ref": "image-abc-1200x800-jpg" }, "alt": "Loft" }
            ],
            "completionDate": "2024-05-01",
            "features": ["Skylights", "Oak floors"]
        })
    }

    fn project_type() -> &'static DocumentType {
        document_type("project").unwrap()
    }

    #[test]
    fn accepts_valid_project() {
        assert!(validate(project_type(), &valid_project()).is_ok());
    }

    #[test]
    fn rejects_zero_images() {
        let mut doc = valid_project();
        doc["images"] = json!([]);
        let report = validate(project_type(), &doc).unwrap_err();
        assert!(report.has_violation_at("images"));
        assert_eq!(report.of_kind(ViolationKind::Min).count(), 1);
        assert_eq!(report.of_kind(ViolationKind::Required).count(), 0);
    }

    #[test]
    fn missing_images_are_required() {
        let mut doc = valid_project();
        doc.as_object_mut().unwrap().remove("images");
        let report = validate(project_type(), &doc).unwrap_err();
        assert_eq!(report.of_kind(ViolationKind::Required).count(), 1);
        assert_eq!(report.of_kind(ViolationKind::Min).count(), 0);
    }

    #[test]
    fn rejects_image_without_alt() {
        let mut doc = valid_project();
        doc["images"][0]["alt"] = json!("");
        let report = validate(project_type(), &doc).unwrap_err();
        assert!(report.has_violation_at("images[0].alt"));
    }

    #[test]
    fn rejects_long_short_description() {
        let mut doc = valid_project();
        doc["shortDescription"] = json!("x".repeat(101));
        let report = validate(project_type(), &doc).unwrap_err();
        assert_eq!(report.violations[0].kind, ViolationKind::Max);
    }

    #[test]
    fn rejects_six_features() {
        let mut doc = valid_project();
        doc["features"] = json!(["a", "b", "c", "d", "e", "f"]);
        let report = validate(project_type(), &doc).unwrap_err();
        assert!(report.has_violation_at("features"));
    }

    #[test]
    fn rejects_long_slug() {
        let mut doc = valid_project();
        doc["slug"]["current"] = json!("a".repeat(97));
        let report = validate(project_type(), &doc).unwrap_err();
        assert!(report.has_violation_at("slug.current"));
    }

    #[test]
    fn reference_type_checked_with_resolver() {
        let docs = vec![json!({ "_id": "service-interiors", "_type": "testimonial" })];
        let report =
            validate_with(project_type(), &valid_project(), &DocumentsResolver(&docs)).unwrap_err();
        assert_eq!(report.violations[0].kind, ViolationKind::Reference);

        let docs = vec![json!({ "_id": "service-interiors", "_type": "service" })];
        assert!(validate_with(project_type(), &valid_project(), &DocumentsResolver(&docs)).is_ok());
    }

    #[test]
    fn missing_reference_target_reported() {
        let docs: Vec<Value> = Vec::new();
        let report =
            validate_with(project_type(), &valid_project(), &DocumentsResolver(&docs)).unwrap_err();
        assert!(report.has_violation_at("service"));
    }

    #[test]
    fn about_link_scheme_enforced() {
        let about = document_type("aboutus").unwrap();
        let doc = json!({
            "_type": "aboutus",
            "title": "About",
            "description": [{
                "_type": "block",
                "style": "normal",
                "markDefs": [{ "_key": "l1", "_type": "link", "href": "ftp://files.example.com" }],
                "children": [{ "_type": "span", "text": "files", "marks": ["l1"] }]
            }]
        });
        let report = validate(about, &doc).unwrap_err();
        assert!(report.has_violation_at("description[0].markDefs[0].href"));

        let mut ok = doc.clone();
        ok["description"][0]["markDefs"][0]["href"] = json!("tel:+15551234567");
        assert!(validate(about, &ok).is_ok());
    }

    #[test]
    fn about_requires_description() {
        let about = document_type("aboutus").unwrap();
        let report = validate(about, &json!({ "_type": "aboutus", "title": "About" })).unwrap_err();
        assert!(report.has_violation_at("description"));
    }

    #[test]
    fn rich_image_requires_alt() {
        let about = document_type("aboutus").unwrap();
        let doc = json!({
            "_type": "aboutus",
            "title": "About",
            "description": [{ "_type": "image", "asset": { "_ref": "image-a-1x1-png" }, "caption": "Team" }]
        });
        let report = validate(about, &doc).unwrap_err();
        assert!(report.has_violation_at("description[0].alt"));
    }

    #[test]
    fn unknown_style_and_mark_rejected_at_write() {
        let about = document_type("aboutus").unwrap();
        let doc = json!({
            "_type": "aboutus",
            "title": "About",
            "description": [{
                "_type": "block",
                "style": "h6",
                "children": [{ "_type": "span", "text": "x", "marks": ["blink"] }]
            }]
        });
        let report = validate(about, &doc).unwrap_err();
        assert!(report.has_violation_at("description[0].style"));
        assert!(report.has_violation_at("description[0].children[0].marks"));
    }

    #[test]
    fn disallowed_array_member() {
        let about = document_type("aboutus").unwrap();
        let doc = json!({
            "_type": "aboutus",
            "title": "About",
            "description": [{ "_type": "video", "url": "https://example.com" }]
        });
        let report = validate(about, &doc).unwrap_err();
        assert_eq!(report.violations[0].kind, ViolationKind::NotAllowed);
    }

    #[test]
    fn unknown_document_type() {
        let report = validate_document(&json!({ "_type": "invoice" })).unwrap_err();
        assert_eq!(report.violations[0].kind, ViolationKind::UnknownType);
    }

    #[test]
    fn bad_completion_date() {
        let mut doc = valid_project();
        doc["completionDate"] = json!("May 2024");
        let report = validate(project_type(), &doc).unwrap_err();
        assert_eq!(report.violations[0].kind, ViolationKind::Format);
    }

    #[test]
    fn testimonial_image_is_optional() {
        let doc = json!({ "_type": "testimonial", "name": "Dana", "review": "Great crew." });
        assert!(validate_document(&doc).is_ok());
    }
}
