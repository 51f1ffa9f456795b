//! content::fields
//!
//! Field specifications: the building blocks of document type declarations.
//!
//! Schemas are plain data. A [`DocumentType`] lists [`FieldSpec`]s; each
//! spec has a [`FieldKind`] and zero or more [`Rule`]s. The validator in
//! [`super::validate`] interprets them.

use serde::Serialize;

/// A validation rule attached to a field.
///
/// `Min`/`Max` count characters on string-like fields and entries on
/// arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", content = "value", rename_all = "camelCase")]
pub enum Rule {
    Required,
    Min(usize),
    Max(usize),
}

/// An annotation allowed on portable text spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationSpec {
    pub name: &'static str,
    /// Allowed URI schemes for the annotation's `href`
    pub schemes: Vec<&'static str>,
}

impl AnnotationSpec {
    /// A link annotation accepting the given schemes.
    pub fn link(schemes: &[&'static str]) -> Self {
        Self {
            name: "link",
            schemes: schemes.to_vec(),
        }
    }
}

/// What a portable text block may contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSpec {
    pub styles: Vec<&'static str>,
    pub lists: Vec<&'static str>,
    pub decorators: Vec<&'static str>,
    pub annotations: Vec<AnnotationSpec>,
}

/// An image field or array member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpec {
    pub hotspot: bool,
    pub fields: Vec<FieldSpec>,
}

/// Type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    String,
    Text,
    Number,
    Date,
    Datetime,
    #[serde(rename_all = "camelCase")]
    Slug {
        source: &'static str,
        max_length: usize,
    },
    Image(ImageSpec),
    Reference {
        to: Vec<&'static str>,
    },
    Array {
        of: Vec<FieldKind>,
    },
    Block(BlockSpec),
}

impl FieldKind {
    /// Short type name for display.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Datetime => "datetime",
            FieldKind::Slug { .. } => "slug",
            FieldKind::Image(_) => "image",
            FieldKind::Reference { .. } => "reference",
            FieldKind::Array { .. } => "array",
            FieldKind::Block(_) => "block",
        }
    }

    /// The `_type` an array member of this kind carries, if it is an object.
    pub fn member_type(&self) -> Option<&'static str> {
        match self {
            FieldKind::Image(_) => Some("image"),
            FieldKind::Reference { .. } => Some("reference"),
            FieldKind::Block(_) => Some("block"),
            _ => None,
        }
    }

    /// Whether the kind stores a string value.
    pub fn is_string_like(&self) -> bool {
        matches!(
            self,
            FieldKind::String | FieldKind::Text | FieldKind::Date | FieldKind::Datetime
        )
    }
}

/// A named field of a document type (or of an image object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: &'static str,
    pub title: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: &'static str, title: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            title,
            kind,
            rules: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.rules.push(Rule::Required);
        self
    }

    pub fn min(mut self, n: usize) -> Self {
        self.rules.push(Rule::Min(n));
        self
    }

    pub fn max(mut self, n: usize) -> Self {
        self.rules.push(Rule::Max(n));
        self
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }

    /// Human-readable constraint summary (e.g. `required, max 100`).
    pub fn constraint_summary(&self) -> String {
        let mut parts: Vec<String> = self
            .rules
            .iter()
            .map(|rule| match rule {
                Rule::Required => "required".to_string(),
                Rule::Min(n) => format!("min {n}"),
                Rule::Max(n) => format!("max {n}"),
            })
            .collect();
        match &self.kind {
            FieldKind::Slug { source, max_length } => {
                parts.push(format!("from {source}, max {max_length}"));
            }
            FieldKind::Reference { to } => parts.push(format!("to {}", to.join("|"))),
            FieldKind::Array { of } => parts.push(format!(
                "of {}",
                of.iter()
                    .map(FieldKind::type_name)
                    .collect::<Vec<_>>()
                    .join("|")
            )),
            FieldKind::Image(spec) if spec.hotspot => parts.push("hotspot".to_string()),
            _ => {}
        }
        parts.join(", ")
    }
}

/// A document type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentType {
    pub name: &'static str,
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl DocumentType {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A reusable named type that is not a document (e.g. `blockContent`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedType {
    pub name: &'static str,
    pub title: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
}
