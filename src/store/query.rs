//! store::query
//!
//! Query builder for the content store's query language (GROQ subset).
//!
//! A [`Query`] selects every document of one type, optionally orders,
//! projects and slices the result:
//!
//! ```text
//! *[_type == "project"] | order(completionDate desc) {title, service->{title}}[0..5]
//! ```
//!
//! Slices are inclusive on both ends: `[0..5]` yields up to six documents.
//! An empty limit uses the exclusive form `[0...0]`.

use std::fmt;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// One `order(...)` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub field: String,
    pub direction: Direction,
}

/// Result selection after ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Range {
    /// A single document (`[n]`); the result is an object or `null`
    Index(usize),
    /// An inclusive slice (`[start..end]`)
    Slice { start: usize, end: usize },
    /// No documents (`[0...0]`)
    Empty,
}

/// A projection entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// `field`
    Field(String),
    /// `"name": path` where path is dotted and may dereference with `->`
    Alias { name: String, path: String },
    /// `field->{a, b}`: follow a reference and project the target
    Deref { field: String, fields: Vec<String> },
}

impl Projection {
    /// Key this entry produces in the projected object.
    pub fn output_name(&self) -> &str {
        match self {
            Projection::Field(name) => name,
            Projection::Alias { name, .. } => name,
            Projection::Deref { field, .. } => field,
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::Field(name) => write!(f, "{name}"),
            Projection::Alias { name, path } => write!(f, "{}: {path}", quote(name)),
            Projection::Deref { field, fields } => write!(f, "{field}->{{{}}}", fields.join(", ")),
        }
    }
}

/// A document query.
///
/// # Example
///
/// ```
/// use groundwork::store::{Direction, Query};
///
/// let query = Query::documents("service")
///     .order_by("order", Direction::Asc)
///     .fields(["_id", "title"]);
///
/// assert_eq!(
///     query.to_groq(),
///     r#"*[_type == "service"] | order(order asc) {_id, title}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    doc_type: String,
    orderings: Vec<Ordering>,
    projection: Vec<Projection>,
    range: Option<Range>,
}

impl Query {
    /// All documents of a type.
    pub fn documents(doc_type: impl Into<String>) -> Self {
        Self {
            doc_type: doc_type.into(),
            orderings: Vec::new(),
            projection: Vec::new(),
            range: None,
        }
    }

    /// Add a sort key. Earlier keys take precedence.
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.orderings.push(Ordering {
            field: field.into(),
            direction,
        });
        self
    }

    /// Project plain fields.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection
            .extend(fields.into_iter().map(|f| Projection::Field(f.into())));
        self
    }

    /// Project a dereferenced reference.
    pub fn deref(mut self, field: impl Into<String>, fields: &[&str]) -> Self {
        self.projection.push(Projection::Deref {
            field: field.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        });
        self
    }

    /// Project a path under a new name.
    pub fn alias(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.projection.push(Projection::Alias {
            name: name.into(),
            path: path.into(),
        });
        self
    }

    /// Take the first document only.
    pub fn first(mut self) -> Self {
        self.range = Some(Range::Index(0));
        self
    }

    /// Take at most `n` documents from the start.
    pub fn limit(mut self, n: usize) -> Self {
        self.range = match n {
            0 => Some(Range::Empty),
            n => Some(Range::Slice { start: 0, end: n - 1 }),
        };
        self
    }

    /// Take an inclusive slice.
    pub fn slice(mut self, start: usize, end: usize) -> Self {
        self.range = Some(Range::Slice { start, end });
        self
    }

    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }

    pub fn orderings(&self) -> &[Ordering] {
        &self.orderings
    }

    pub fn projection(&self) -> &[Projection] {
        &self.projection
    }

    pub fn range(&self) -> Option<Range> {
        self.range
    }

    /// Render as query language text.
    pub fn to_groq(&self) -> String {
        let mut out = format!("*[_type == {}]", quote(&self.doc_type));

        if !self.orderings.is_empty() {
            let keys = self
                .orderings
                .iter()
                .map(|o| format!("{} {}", o.field, o.direction.as_str()))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!(" | order({keys})"));
        }

        if !self.projection.is_empty() {
            let entries = self
                .projection
                .iter()
                .map(Projection::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!(" {{{entries}}}"));
        }

        match self.range {
            Some(Range::Index(i)) => out.push_str(&format!("[{i}]")),
            Some(Range::Slice { start, end }) => out.push_str(&format!("[{start}..{end}]")),
            Some(Range::Empty) => out.push_str("[0...0]"),
            None => {}
        }

        out
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_groq())
    }
}

/// Quote a string literal for the query language.
fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
