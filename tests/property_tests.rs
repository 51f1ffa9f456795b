//! Property-based tests for the rich-text renderer.
//!
//! These tests use proptest to verify that rendering never loses text and
//! that link isolation depends only on the href.

use proptest::prelude::*;

use groundwork::content::{Block, ListKind, MarkDef, PortableNode, RichTextBody, Span};
use groundwork::render::{Components, RenderNode};
use groundwork::store::ImageUrlBuilder;

fn render(body: &RichTextBody) -> Vec<RenderNode> {
    Components::site().render(body, &ImageUrlBuilder::new("proj", "production"))
}

fn text_of(nodes: &[RenderNode]) -> String {
    nodes.iter().map(RenderNode::text_content).collect()
}

/// Span text without characters that are significant to the tests.
fn span_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.]{1,16}"
}

/// Styles the site table does not handle.
fn unknown_style() -> impl Strategy<Value = String> {
    "[a-z]{2,8}".prop_filter("must not be a site style", |s| {
        !["normal", "blockquote"].contains(&s.as_str())
    })
}

/// Mark names that are neither decorators nor annotation keys.
fn unknown_mark() -> impl Strategy<Value = String> {
    "x-[a-z]{1,8}"
}

fn list_kind() -> impl Strategy<Value = ListKind> {
    prop_oneof![Just(ListKind::Bullet), Just(ListKind::Number)]
}

proptest! {
    /// A block with an unhandled style still renders all of its text.
    #[test]
    fn unknown_style_keeps_text(style in unknown_style(), texts in prop::collection::vec(span_text(), 1..5)) {
        let mut block = Block::new(style.as_str());
        for text in &texts {
            block = block.text(text.as_str());
        }
        let out = render(&RichTextBody::new(vec![block.into()]));
        prop_assert_eq!(text_of(&out), texts.concat());
    }

    /// Spans carrying unknown marks still render their text, in order.
    #[test]
    fn unknown_marks_keep_text(
        spans in prop::collection::vec((span_text(), prop::collection::vec(unknown_mark(), 0..3)), 1..6)
    ) {
        let mut block = Block::new("normal");
        for (text, marks) in &spans {
            block.children.push(Span::new(text.as_str()).with_marks(marks.iter().map(String::as_str)));
        }
        let expected: String = spans.iter().map(|(t, _)| t.as_str()).collect();
        let out = render(&RichTextBody::new(vec![block.into()]));
        prop_assert_eq!(text_of(&out), expected);
    }

    /// Links open a new context exactly when the href starts with `http`.
    #[test]
    fn link_isolation_follows_href(
        scheme in prop_oneof![
            Just("http://"),
            Just("https://"),
            Just("mailto:"),
            Just("tel:"),
            Just("/"),
        ],
        rest in "[a-z0-9]{1,12}",
    ) {
        let href = format!("{}{}", scheme, rest);
        let block = Block::new("normal")
            .marked("link text", &["k1"])
            .mark_def(MarkDef::link("k1", Some(href.as_str())));
        let out = render(&RichTextBody::new(vec![block.into()]));

        let html: String = out.iter().map(RenderNode::to_html).collect();
        let isolated = html.contains(r#"target="_blank""#);
        prop_assert_eq!(isolated, href.starts_with("http"));
        prop_assert_eq!(html.contains("noopener noreferrer"), isolated);
    }

    /// Any mix of list levels and kinds keeps every item's text, in order.
    #[test]
    fn lists_keep_item_order(items in prop::collection::vec((list_kind(), 1u32..5), 1..12)) {
        let nodes: Vec<PortableNode> = items
            .iter()
            .enumerate()
            .map(|(i, (kind, level))| {
                Block::new("normal")
                    .text(format!("[{}]", i))
                    .list(kind.clone(), *level)
                    .into()
            })
            .collect();
        let expected: String = (0..items.len()).map(|i| format!("[{}]", i)).collect();

        let out = render(&RichTextBody::new(nodes));
        prop_assert_eq!(text_of(&out), expected);
    }
}
