//! render::body
//!
//! Walks a rich-text body and applies a [`Components`] table.
//!
//! Rendering is total: unregistered styles, marks, list kinds and node
//! types pass their children through, and every piece of span text ends up
//! in the output. Images without a resolvable asset render nothing.

use tracing::debug;

use super::components::{Components, MarkContext};
use super::marks::{build_mark_tree, MarkNode};
use super::node::{Element, RenderNode};
use crate::content::{Block, ImageValue, ListKind, PortableNode, RichTextBody, UnknownNode};
use crate::store::ImageUrlBuilder;

/// Render `body` with `components`, preserving source order.
///
/// Consecutive list-item blocks are grouped into lists; deeper `level`s
/// nest inside the preceding item.
pub fn render_body(
    body: &RichTextBody,
    components: &Components,
    images: &ImageUrlBuilder,
) -> Vec<RenderNode> {
    let renderer = BodyRenderer { components, images };
    let nodes = body.nodes();
    let mut output = Vec::with_capacity(nodes.len());

    let mut i = 0;
    while i < nodes.len() {
        if let Some(items) = list_run(&nodes[i..]) {
            i += items.len();
            output.extend(renderer.render_lists(&items, min_level(&items)));
            continue;
        }
        let rendered = renderer.render_node(&nodes[i]);
        if !matches!(rendered, RenderNode::Empty) {
            output.push(rendered);
        }
        i += 1;
    }
    output
}

/// The run of list-item blocks starting at `nodes[0]`, if any.
fn list_run(nodes: &[PortableNode]) -> Option<Vec<&Block>> {
    let items: Vec<&Block> = nodes
        .iter()
        .map_while(|node| match node {
            PortableNode::Block(block) if block.list_item.is_some() => Some(block),
            _ => None,
        })
        .collect();
    (!items.is_empty()).then_some(items)
}

fn min_level(items: &[&Block]) -> u32 {
    items.iter().map(|b| b.list_level()).min().unwrap_or(1)
}

struct BodyRenderer<'a> {
    components: &'a Components,
    images: &'a ImageUrlBuilder,
}

impl BodyRenderer<'_> {
    fn render_node(&self, node: &PortableNode) -> RenderNode {
        match node {
            PortableNode::Block(block) => self.render_block(block),
            PortableNode::Image(image) => self.render_image(image),
            PortableNode::Unknown(node) => self.render_unknown(node),
        }
    }

    fn render_block(&self, block: &Block) -> RenderNode {
        let children = self.render_spans(block);
        match self.components.blocks.get(block.style.name()) {
            Some(render) => render(block, children),
            None => {
                debug!(style = block.style.name(), "no block renderer, passing through");
                RenderNode::fragment(children)
            }
        }
    }

    fn render_image(&self, image: &ImageValue) -> RenderNode {
        if !image.is_resolvable() {
            debug!("skipping image without a resolvable asset");
            return RenderNode::Empty;
        }
        match &self.components.image {
            Some(render) => render(image, self.images),
            None => match self.images.image(image).url() {
                Some(src) => Element::new("img")
                    .attr("src", src)
                    .attr("alt", image.alt_text().unwrap_or_default())
                    .into(),
                None => RenderNode::Empty,
            },
        }
    }

    fn render_unknown(&self, node: &UnknownNode) -> RenderNode {
        if let Some(render) = self.components.types.get(&node.node_type) {
            return render(node);
        }
        debug!(node_type = %node.node_type, "no renderer for node type, passing through");
        let text = node.child_text();
        if text.is_empty() {
            RenderNode::Empty
        } else {
            RenderNode::fragment(text)
        }
    }

    fn render_spans(&self, block: &Block) -> Vec<RenderNode> {
        build_mark_tree(block)
            .into_iter()
            .map(|node| self.render_mark_node(node))
            .collect()
    }

    fn render_mark_node(&self, node: MarkNode<'_>) -> RenderNode {
        match node {
            MarkNode::Text(text) => RenderNode::text(text),
            MarkNode::LineBreak => RenderNode::line_break(),
            MarkNode::Inline(span) => match span.text.as_str() {
                "" => RenderNode::Empty,
                text => RenderNode::text(text),
            },
            MarkNode::Marked {
                key,
                mark_type,
                def,
                children,
            } => {
                let children: Vec<RenderNode> = children
                    .into_iter()
                    .map(|child| self.render_mark_node(child))
                    .collect();
                match self.components.marks.get(mark_type) {
                    Some(render) => render(
                        MarkContext {
                            key,
                            mark_type,
                            def,
                        },
                        children,
                    ),
                    None => RenderNode::fragment(children),
                }
            }
        }
    }

    /// Render list items whose levels are all `>= level`.
    ///
    /// Items at `level` with the same kind share one list. Deeper items
    /// following an item nest inside it; deeper items with no preceding
    /// item at `level` are rendered as their own lists in place.
    fn render_lists(&self, items: &[&Block], level: u32) -> Vec<RenderNode> {
        let mut lists = Vec::new();
        let mut i = 0;

        while i < items.len() {
            if items[i].list_level() > level {
                let end = deeper_run_end(items, i, level);
                lists.extend(self.render_lists(&items[i..end], level + 1));
                i = end;
                continue;
            }

            let kind = list_kind(items[i]);
            let mut entries = Vec::new();
            while i < items.len() && items[i].list_level() <= level && list_kind(items[i]) == kind {
                let item = items[i];
                let nested_end = deeper_run_end(items, i + 1, level);
                let mut children = self.render_spans(item);
                children.extend(self.render_lists(&items[i + 1..nested_end], level + 1));
                entries.push(self.render_list_item(item, children));
                i = nested_end;
            }
            lists.push(self.render_list(kind, entries));
        }
        lists
    }

    fn render_list_item(&self, item: &Block, children: Vec<RenderNode>) -> RenderNode {
        match &self.components.list_item {
            Some(render) => render(item, children),
            None => RenderNode::fragment(children),
        }
    }

    fn render_list(&self, kind: &ListKind, entries: Vec<RenderNode>) -> RenderNode {
        match self.components.lists.get(kind.name()) {
            Some(render) => render(kind, entries),
            None => RenderNode::fragment(entries),
        }
    }
}

/// End of the run of items deeper than `level`, starting at `start`.
fn deeper_run_end(items: &[&Block], start: usize, level: u32) -> usize {
    items[start..]
        .iter()
        .position(|item| item.list_level() <= level)
        .map_or(items.len(), |offset| start + offset)
}

fn list_kind<'a>(block: &'a Block) -> &'a ListKind {
    static FALLBACK: ListKind = ListKind::Bullet;
    block.list_item.as_ref().unwrap_or(&FALLBACK)
}
