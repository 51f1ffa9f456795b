//! render::components
//!
//! The table of per-kind renderers consulted by the body renderer.
//!
//! Every lookup is optional. A block style, mark, list kind or node type
//! without an entry falls back to passthrough: its children are emitted
//! without decoration.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::node::RenderNode;
use crate::content::{Block, ImageValue, ListKind, MarkDef, RichTextBody, UnknownNode};
use crate::store::ImageUrlBuilder;

/// Renders a text block given its already-rendered children.
pub type BlockRenderer = Arc<dyn Fn(&Block, Vec<RenderNode>) -> RenderNode + Send + Sync>;

/// Renders a mark wrapping its already-rendered children.
pub type MarkRenderer = Arc<dyn Fn(MarkContext<'_>, Vec<RenderNode>) -> RenderNode + Send + Sync>;

/// Renders an image node with a resolvable asset.
pub type ImageRenderer = Arc<dyn Fn(&ImageValue, &ImageUrlBuilder) -> RenderNode + Send + Sync>;

/// Renders a list around its rendered items.
pub type ListRenderer = Arc<dyn Fn(&ListKind, Vec<RenderNode>) -> RenderNode + Send + Sync>;

/// Renders one list item; children include any nested lists.
pub type ListItemRenderer = Arc<dyn Fn(&Block, Vec<RenderNode>) -> RenderNode + Send + Sync>;

/// Renders a node of a custom `_type`.
pub type TypeRenderer = Arc<dyn Fn(&UnknownNode) -> RenderNode + Send + Sync>;

/// The mark being rendered.
#[derive(Debug, Clone, Copy)]
pub struct MarkContext<'a> {
    /// Mark as written on the span
    pub key: &'a str,
    /// Decorator name or annotation `_type`
    pub mark_type: &'a str,
    /// Annotation definition, if the mark is an annotation
    pub def: Option<&'a MarkDef>,
}

impl<'a> MarkContext<'a> {
    /// The annotation's `href`, if any.
    pub fn href(&self) -> Option<&'a str> {
        self.def.and_then(|def| def.href.as_deref())
    }
}

/// Renderer table.
///
/// # Example
///
/// ```
/// use groundwork::content::{Block, RichTextBody};
/// use groundwork::render::{Components, Element};
/// use groundwork::store::ImageUrlBuilder;
///
/// let components = Components::new()
///     .block("normal", |_, children| Element::new("p").children(children).into());
///
/// let body = RichTextBody::new(vec![Block::new("normal").text("Hi").into()]);
/// let images = ImageUrlBuilder::new("proj", "production");
/// let html: String = components
///     .render(&body, &images)
///     .iter()
///     .map(|n| n.to_html())
///     .collect();
///
/// assert_eq!(html, "<p>Hi</p>");
/// ```
#[derive(Clone, Default)]
pub struct Components {
    pub(super) blocks: HashMap<String, BlockRenderer>,
    pub(super) marks: HashMap<String, MarkRenderer>,
    pub(super) lists: HashMap<String, ListRenderer>,
    pub(super) list_item: Option<ListItemRenderer>,
    pub(super) image: Option<ImageRenderer>,
    pub(super) types: HashMap<String, TypeRenderer>,
}

impl Components {
    /// An empty table: everything renders as passthrough.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer for a block style.
    pub fn block<F>(mut self, style: &str, render: F) -> Self
    where
        F: Fn(&Block, Vec<RenderNode>) -> RenderNode + Send + Sync + 'static,
    {
        self.blocks.insert(style.to_string(), Arc::new(render));
        self
    }

    /// Register a renderer for a decorator or annotation type.
    pub fn mark<F>(mut self, mark_type: &str, render: F) -> Self
    where
        F: Fn(MarkContext<'_>, Vec<RenderNode>) -> RenderNode + Send + Sync + 'static,
    {
        self.marks.insert(mark_type.to_string(), Arc::new(render));
        self
    }

    /// Register a renderer for a list kind.
    pub fn list<F>(mut self, kind: &str, render: F) -> Self
    where
        F: Fn(&ListKind, Vec<RenderNode>) -> RenderNode + Send + Sync + 'static,
    {
        self.lists.insert(kind.to_string(), Arc::new(render));
        self
    }

    pub fn list_item<F>(mut self, render: F) -> Self
    where
        F: Fn(&Block, Vec<RenderNode>) -> RenderNode + Send + Sync + 'static,
    {
        self.list_item = Some(Arc::new(render));
        self
    }

    pub fn image<F>(mut self, render: F) -> Self
    where
        F: Fn(&ImageValue, &ImageUrlBuilder) -> RenderNode + Send + Sync + 'static,
    {
        self.image = Some(Arc::new(render));
        self
    }

    /// Register a renderer for a custom node `_type`.
    pub fn node_type<F>(mut self, type_name: &str, render: F) -> Self
    where
        F: Fn(&UnknownNode) -> RenderNode + Send + Sync + 'static,
    {
        self.types.insert(type_name.to_string(), Arc::new(render));
        self
    }

    /// Render a body with this table.
    pub fn render(&self, body: &RichTextBody, images: &ImageUrlBuilder) -> Vec<RenderNode> {
        super::body::render_body(body, self, images)
    }
}

impl fmt::Debug for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut blocks: Vec<_> = self.blocks.keys().collect();
        blocks.sort();
        let mut marks: Vec<_> = self.marks.keys().collect();
        marks.sort();
        let mut lists: Vec<_> = self.lists.keys().collect();
        lists.sort();
        let mut types: Vec<_> = self.types.keys().collect();
        types.sort();
        f.debug_struct("Components")
            .field("blocks", &blocks)
            .field("marks", &marks)
            .field("lists", &lists)
            .field("list_item", &self.list_item.is_some())
            .field("image", &self.image.is_some())
            .field("types", &types)
            .finish()
    }
}
