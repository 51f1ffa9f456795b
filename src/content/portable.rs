//! content::portable
//!
//! Portable text: the rich-text body shared by About, Service and Project.
//!
//! A [`RichTextBody`] is an ordered sequence of [`PortableNode`]s. Text
//! blocks and images are modeled explicitly; any other node type is kept
//! verbatim as [`UnknownNode`] so it survives a round-trip and can still
//! be rendered as plain child text.
//!
//! # Wire shape
//!
//! ```json
//! [
//!   { "_type": "block", "style": "h2",
//!     "children": [{ "_type": "span", "text": "Our story", "marks": [] }],
//!     "markDefs": [] },
//!   { "_type": "image", "asset": { "_ref": "image-abc-800x600-jpg" }, "alt": "Crew" }
//! ]
//! ```

use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::image::ImageValue;

/// An ordered rich-text body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichTextBody(pub Vec<PortableNode>);

impl RichTextBody {
    /// Create a body from nodes.
    pub fn new(nodes: Vec<PortableNode>) -> Self {
        Self(nodes)
    }

    /// The nodes in source order.
    pub fn nodes(&self) -> &[PortableNode] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PortableNode> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Plain text of all text blocks, one paragraph per block.
    pub fn plain_text(&self) -> String {
        self.0
            .iter()
            .filter_map(|node| match node {
                PortableNode::Block(block) => Some(block.plain_text()),
                PortableNode::Unknown(node) => Some(node.child_text().join("")),
                PortableNode::Image(_) => None,
            })
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl From<Vec<PortableNode>> for RichTextBody {
    fn from(nodes: Vec<PortableNode>) -> Self {
        Self(nodes)
    }
}

impl<'a> IntoIterator for &'a RichTextBody {
    type Item = &'a PortableNode;
    type IntoIter = std::slice::Iter<'a, PortableNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A single node of a rich-text body, tagged by `_type`.
#[derive(Debug, Clone, PartialEq)]
pub enum PortableNode {
    Block(Block),
    Image(ImageValue),
    Unknown(UnknownNode),
}

impl PortableNode {
    /// The `_type` tag of this node.
    pub fn type_name(&self) -> &str {
        match self {
            PortableNode::Block(_) => "block",
            PortableNode::Image(_) => "image",
            PortableNode::Unknown(node) => &node.node_type,
        }
    }
}

impl From<Block> for PortableNode {
    fn from(block: Block) -> Self {
        PortableNode::Block(block)
    }
}

impl From<ImageValue> for PortableNode {
    fn from(image: ImageValue) -> Self {
        PortableNode::Image(image)
    }
}

impl<'de> Deserialize<'de> for PortableNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let node_type = raw
            .get("_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        // A malformed block or image degrades to an unknown node instead of
        // failing the whole body.
        let node = match node_type.as_str() {
            "block" => serde_json::from_value(raw.clone()).map(PortableNode::Block),
            "image" => serde_json::from_value(raw.clone()).map(PortableNode::Image),
            _ => return Ok(PortableNode::Unknown(UnknownNode { node_type, raw })),
        };
        Ok(node.unwrap_or(PortableNode::Unknown(UnknownNode { node_type, raw })))
    }
}

impl Serialize for PortableNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = match self {
            PortableNode::Block(block) => tagged("block", block),
            PortableNode::Image(image) => tagged("image", image),
            PortableNode::Unknown(node) => Ok(node.raw.clone()),
        }
        .map_err(serde::ser::Error::custom)?;
        value.serialize(serializer)
    }
}

fn tagged<T: Serialize>(type_name: &str, value: &T) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(value)?;
    if let Value::Object(map) = &mut value {
        map.insert("_type".to_string(), Value::String(type_name.to_string()));
    }
    Ok(value)
}

/// A node of a type this crate does not model.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownNode {
    pub node_type: String,
    pub raw: Value,
}

impl UnknownNode {
    /// Text of any span-like children, in order.
    pub fn child_text(&self) -> Vec<String> {
        self.raw
            .get("children")
            .and_then(Value::as_array)
            .map(|children| {
                children
                    .iter()
                    .filter_map(|child| child.get("text").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Paragraph style of a text block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockStyle {
    #[default]
    Normal,
    H1,
    H2,
    H3,
    H4,
    Blockquote,
    Other(String),
}

impl BlockStyle {
    pub fn name(&self) -> &str {
        match self {
            BlockStyle::Normal => "normal",
            BlockStyle::H1 => "h1",
            BlockStyle::H2 => "h2",
            BlockStyle::H3 => "h3",
            BlockStyle::H4 => "h4",
            BlockStyle::Blockquote => "blockquote",
            BlockStyle::Other(name) => name,
        }
    }
}

impl From<String> for BlockStyle {
    fn from(s: String) -> Self {
        match s.as_str() {
            "normal" => BlockStyle::Normal,
            "h1" => BlockStyle::H1,
            "h2" => BlockStyle::H2,
            "h3" => BlockStyle::H3,
            "h4" => BlockStyle::H4,
            "blockquote" => BlockStyle::Blockquote,
            _ => BlockStyle::Other(s),
        }
    }
}

impl From<&str> for BlockStyle {
    fn from(s: &str) -> Self {
        BlockStyle::from(s.to_string())
    }
}

impl From<BlockStyle> for String {
    fn from(style: BlockStyle) -> Self {
        style.name().to_string()
    }
}

impl fmt::Display for BlockStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// List kind of a list-item block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ListKind {
    Bullet,
    Number,
    Other(String),
}

impl ListKind {
    pub fn name(&self) -> &str {
        match self {
            ListKind::Bullet => "bullet",
            ListKind::Number => "number",
            ListKind::Other(name) => name,
        }
    }
}

impl From<String> for ListKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "bullet" => ListKind::Bullet,
            "number" => ListKind::Number,
            _ => ListKind::Other(s),
        }
    }
}

impl From<ListKind> for String {
    fn from(kind: ListKind) -> Self {
        kind.name().to_string()
    }
}

/// Built-in text decorators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decorator {
    Strong,
    Emphasis,
    Underline,
    StrikeThrough,
    Code,
}

impl Decorator {
    pub fn all() -> &'static [Decorator] {
        &[
            Decorator::Strong,
            Decorator::Emphasis,
            Decorator::Underline,
            Decorator::StrikeThrough,
            Decorator::Code,
        ]
    }

    /// The mark name used in span `marks`.
    pub fn name(&self) -> &'static str {
        match self {
            Decorator::Strong => "strong",
            Decorator::Emphasis => "em",
            Decorator::Underline => "underline",
            Decorator::StrikeThrough => "strike-through",
            Decorator::Code => "code",
        }
    }

    pub fn parse(mark: &str) -> Option<Self> {
        Self::all().iter().copied().find(|d| d.name() == mark)
    }
}

/// An inline child of a block. Usually a text span; other inline object
/// types keep their `_type` and carry no text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    #[serde(rename = "_type", default = "span_type")]
    pub kind: String,

    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default)]
    pub text: String,

    /// Decorator names and annotation keys applied to this span
    #[serde(default)]
    pub marks: Vec<String>,
}

fn span_type() -> String {
    "span".to_string()
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            kind: span_type(),
            key: None,
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn with_marks<I, S>(mut self, marks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.marks = marks.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this is a text span (as opposed to an inline object).
    pub fn is_text(&self) -> bool {
        self.kind == "span"
    }
}

/// Annotation definition referenced from span marks by `_key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key")]
    pub key: String,

    #[serde(rename = "_type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl MarkDef {
    /// A link annotation.
    pub fn link(key: impl Into<String>, href: Option<&str>) -> Self {
        Self {
            key: key.into(),
            kind: "link".to_string(),
            href: href.map(str::to_string),
            extra: serde_json::Map::new(),
        }
    }

    pub fn is_link(&self) -> bool {
        self.kind == "link"
    }
}

/// A text block: paragraph, heading, quote or list item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default)]
    pub style: BlockStyle,

    #[serde(default)]
    pub children: Vec<Span>,

    #[serde(rename = "markDefs", default)]
    pub mark_defs: Vec<MarkDef>,

    #[serde(rename = "listItem", default, skip_serializing_if = "Option::is_none")]
    pub list_item: Option<ListKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

impl Block {
    /// An empty block with the given style.
    pub fn new(style: impl Into<BlockStyle>) -> Self {
        Self {
            style: style.into(),
            ..Default::default()
        }
    }

    /// Append a plain text span.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Span::new(text));
        self
    }

    /// Append a span carrying marks.
    pub fn marked(mut self, text: impl Into<String>, marks: &[&str]) -> Self {
        self.children
            .push(Span::new(text).with_marks(marks.iter().copied()));
        self
    }

    /// Add an annotation definition.
    pub fn mark_def(mut self, def: MarkDef) -> Self {
        self.mark_defs.push(def);
        self
    }

    /// Make this block a list item.
    pub fn list(mut self, kind: ListKind, level: u32) -> Self {
        self.list_item = Some(kind);
        self.level = Some(level);
        self
    }

    /// Nesting level of a list item (1-based).
    pub fn list_level(&self) -> u32 {
        self.level.unwrap_or(1).max(1)
    }

    /// Look up an annotation by key.
    pub fn find_mark_def(&self, key: &str) -> Option<&MarkDef> {
        self.mark_defs.iter().find(|def| def.key == key)
    }

    /// Concatenated span text.
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|span| span.text.as_str()).collect()
    }
}
