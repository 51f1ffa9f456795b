//! render::node
//!
//! Presentational node tree produced by renderers.
//!
//! A [`RenderNode`] is technology-independent: it can be serialized to HTML
//! with [`RenderNode::to_html`], dumped as JSON, or inspected in tests.
//!
//! # Example
//!
//! ```
//! use groundwork::render::{Element, RenderNode};
//!
//! let node: RenderNode = Element::new("p")
//!     .class("block-para")
//!     .child("Hello, ")
//!     .child(Element::new("strong").child("world"))
//!     .into();
//!
//! assert_eq!(node.to_html(), r#"<p class="block-para">Hello, <strong>world</strong></p>"#);
//! assert_eq!(node.text_content(), "Hello, world");
//! ```

use std::borrow::Cow;

use serde::Serialize;

use super::html::{escape, is_void};

/// A node in the rendered tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderNode {
    /// An element with attributes and children.
    Element(Element),
    /// A text node.
    Text { text: String },
    /// Several nodes without a wrapper element.
    Fragment { children: Vec<RenderNode> },
    /// Renders nothing.
    Empty,
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    tag: Cow<'static, str>,
    attrs: Vec<(Cow<'static, str>, String)>,
    children: Vec<RenderNode>,
}

impl Element {
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute.
    pub fn attr(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Sets the `class` attribute.
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Appends a child.
    pub fn child(mut self, child: impl Into<RenderNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends several children.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RenderNode>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attrs(&self) -> &[(Cow<'static, str>, String)] {
        &self.attrs
    }

    pub fn child_nodes(&self) -> &[RenderNode] {
        &self.children
    }

    /// Value of an attribute, if set.
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the `class` attribute lists `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr_value("class")
            .is_some_and(|value| value.split_whitespace().any(|c| c == class))
    }

    /// Whether this element matches a `tag.class` selector (either part optional).
    pub fn matches(&self, selector: &str) -> bool {
        let (tag, class) = match selector.split_once('.') {
            Some((tag, class)) => (tag, Some(class)),
            None => (selector, None),
        };
        (tag.is_empty() || self.tag == tag) && class.map_or(true, |c| self.has_class(c))
    }
}

impl RenderNode {
    /// A text node.
    pub fn text(text: impl Into<String>) -> Self {
        RenderNode::Text { text: text.into() }
    }

    /// A fragment of nodes.
    pub fn fragment<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RenderNode>,
    {
        RenderNode::Fragment {
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    /// A line break.
    pub fn line_break() -> Self {
        Element::new("br").into()
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RenderNode::Empty => true,
            RenderNode::Fragment { children } => children.iter().all(RenderNode::is_empty),
            _ => false,
        }
    }

    /// Serialize to HTML.
    pub fn to_html(&self) -> String {
        let mut output = String::new();
        self.write_html(&mut output);
        output
    }

    fn write_html(&self, output: &mut String) {
        match self {
            RenderNode::Element(el) => {
                output.push('<');
                output.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    output.push(' ');
                    output.push_str(name);
                    output.push_str("=\"");
                    output.push_str(&escape(value));
                    output.push('"');
                }
                if is_void(&el.tag) {
                    output.push_str(" />");
                } else {
                    output.push('>');
                    for child in &el.children {
                        child.write_html(output);
                    }
                    output.push_str("</");
                    output.push_str(&el.tag);
                    output.push('>');
                }
            }
            RenderNode::Text { text } => output.push_str(&escape(text)),
            RenderNode::Fragment { children } => {
                for child in children {
                    child.write_html(output);
                }
            }
            RenderNode::Empty => {}
        }
    }

    /// Concatenated text of all text nodes, in document order.
    pub fn text_content(&self) -> String {
        let mut output = String::new();
        self.collect_text(&mut output);
        output
    }

    fn collect_text(&self, output: &mut String) {
        match self {
            RenderNode::Element(el) => el.children.iter().for_each(|c| c.collect_text(output)),
            RenderNode::Text { text } => output.push_str(text),
            RenderNode::Fragment { children } => children.iter().for_each(|c| c.collect_text(output)),
            RenderNode::Empty => {}
        }
    }

    /// All elements in document order (pre-order).
    pub fn elements(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_elements(&mut found);
        found
    }

    fn collect_elements<'a>(&'a self, found: &mut Vec<&'a Element>) {
        match self {
            RenderNode::Element(el) => {
                found.push(el);
                el.children.iter().for_each(|c| c.collect_elements(found));
            }
            RenderNode::Fragment { children } => {
                children.iter().for_each(|c| c.collect_elements(found))
            }
            RenderNode::Text { .. } | RenderNode::Empty => {}
        }
    }

    /// Elements matching a `tag.class` selector.
    pub fn select(&self, selector: &str) -> Vec<&Element> {
        self.elements()
            .into_iter()
            .filter(|el| el.matches(selector))
            .collect()
    }
}

impl From<Element> for RenderNode {
    fn from(el: Element) -> Self {
        RenderNode::Element(el)
    }
}

impl From<&str> for RenderNode {
    fn from(text: &str) -> Self {
        RenderNode::text(text)
    }
}

impl From<String> for RenderNode {
    fn from(text: String) -> Self {
        RenderNode::text(text)
    }
}

impl From<Vec<RenderNode>> for RenderNode {
    fn from(children: Vec<RenderNode>) -> Self {
        RenderNode::Fragment { children }
    }
}
