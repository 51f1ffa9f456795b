//! Rendered HTML for the site's component table.
//!
//! Bodies are built from the JSON the content store returns, so these tests
//! cover deserialization and rendering together.

use groundwork::content::RichTextBody;
use groundwork::render::{Components, RenderNode};
use groundwork::store::ImageUrlBuilder;
use serde_json::json;

fn render(body: serde_json::Value) -> String {
    let body: RichTextBody = serde_json::from_value(body).unwrap();
    Components::site()
        .render(&body, &ImageUrlBuilder::new("proj", "production"))
        .iter()
        .map(RenderNode::to_html)
        .collect()
}

fn block(style: &str, text: &str) -> serde_json::Value {
    json!({
        "_type": "block",
        "style": style,
        "children": [{ "_type": "span", "text": text }],
        "markDefs": []
    })
}

// =============================================================================
// Blocks
// =============================================================================

#[test]
fn paragraph_with_strong_run() {
    let html = render(json!([{
        "_type": "block",
        "style": "normal",
        "children": [
            { "_type": "span", "text": "Quality " },
            { "_type": "span", "text": "craftsmanship", "marks": ["strong"] }
        ],
        "markDefs": []
    }]));
    insta::assert_snapshot!(html, @r#"<p class="block-para">Quality <strong class="text-strong">craftsmanship</strong></p>"#);
}

#[test]
fn headings_two_and_three_carry_a_rule() {
    let html = render(json!([block("h2", "Our Process"), block("h4", "Step one")]));
    insta::assert_snapshot!(html, @r#"<h2 class="heading-2">Our Process<div class="line"></div></h2><h4 class="heading-4">Step one</h4>"#);
}

#[test]
fn blockquote() {
    let html = render(json!([block("blockquote", "Measure twice")]));
    insta::assert_snapshot!(html, @r#"<blockquote class="custom-blockquote">Measure twice</blockquote>"#);
}

#[test]
fn text_is_escaped() {
    let html = render(json!([block("normal", "Tile & <grout>")]));
    insta::assert_snapshot!(html, @r#"<p class="block-para">Tile &amp; &lt;grout&gt;</p>"#);
}

// =============================================================================
// Links
// =============================================================================

#[test]
fn external_link_opens_new_context() {
    let html = render(json!([{
        "_type": "block",
        "style": "normal",
        "children": [
            { "_type": "span", "text": "See " },
            { "_type": "span", "text": "our reviews", "marks": ["r1"] }
        ],
        "markDefs": [{ "_key": "r1", "_type": "link", "href": "https://reviews.example.com" }]
    }]));
    insta::assert_snapshot!(html, @r#"<p class="block-para">See <a href="https://reviews.example.com" target="_blank" rel="noopener noreferrer" class="text-link">our reviews</a></p>"#);
}

#[test]
fn phone_link_stays_in_context() {
    let html = render(json!([{
        "_type": "block",
        "style": "normal",
        "children": [{ "_type": "span", "text": "Call", "marks": ["t1"] }],
        "markDefs": [{ "_key": "t1", "_type": "link", "href": "tel:+15550100" }]
    }]));
    insta::assert_snapshot!(html, @r#"<p class="block-para"><a href="tel:+15550100" class="text-link">Call</a></p>"#);
}

// =============================================================================
// Lists
// =============================================================================

fn item(text: &str, kind: &str, level: u32) -> serde_json::Value {
    json!({
        "_type": "block",
        "style": "normal",
        "listItem": kind,
        "level": level,
        "children": [{ "_type": "span", "text": text }],
        "markDefs": []
    })
}

#[test]
fn nested_list() {
    let html = render(json!([
        item("Kitchen", "bullet", 1),
        item("Cabinets", "bullet", 2),
        item("Bath", "bullet", 1),
    ]));
    insta::assert_snapshot!(html, @"<ul><li>Kitchen<ul><li>Cabinets</li></ul></li><li>Bath</li></ul>");
}

#[test]
fn numbered_list_between_paragraphs() {
    let html = render(json!([
        block("normal", "Steps"),
        item("Demo", "number", 1),
        item("Frame", "number", 1),
        block("normal", "Done"),
    ]));
    insta::assert_snapshot!(html, @r#"<p class="block-para">Steps</p><ol><li>Demo</li><li>Frame</li></ol><p class="block-para">Done</p>"#);
}

// =============================================================================
// Images and unknown nodes
// =============================================================================

#[test]
fn captioned_image() {
    let html = render(json!([{
        "_type": "image",
        "asset": { "_ref": "image-abc-1600x900-jpg" },
        "alt": "Deck",
        "caption": "Cedar deck"
    }]));
    insta::assert_snapshot!(html, @r#"<div class="rich-image-container"><img src="https://cdn.sanity.io/images/proj/production/abc-1600x900.jpg?w=800" alt="Deck" class="rich-image" /><div class="image-caption">Cedar deck<div class="line"></div></div></div>"#);
}

#[test]
fn image_without_asset_renders_nothing() {
    let html = render(json!([
        { "_type": "image", "alt": "Pending upload" },
        block("normal", "after"),
    ]));
    assert_eq!(html, r#"<p class="block-para">after</p>"#);
}

#[test]
fn unknown_style_keeps_text() {
    let html = render(json!([block("h6", "Fine print")]));
    assert_eq!(html, "Fine print");
}

#[test]
fn unknown_node_without_text_renders_nothing() {
    let html = render(json!([
        { "_type": "videoEmbed", "url": "https://video.example.com/1" },
        block("normal", "Tour"),
    ]));
    assert_eq!(html, r#"<p class="block-para">Tour</p>"#);
}
