//! render::site
//!
//! The site's component table, shared by the About, Services and Projects
//! pages.

use super::components::{Components, MarkContext};
use super::node::{Element, RenderNode};
use crate::content::ImageValue;
use crate::store::ImageUrlBuilder;

/// Width requested for images inside rich text.
pub const RICH_IMAGE_WIDTH: u32 = 800;

/// Alt text used when an image has none.
pub const FALLBACK_ALT: &str = "Image";

impl Components {
    /// The site's default table.
    ///
    /// # Example
    ///
    /// ```
    /// use groundwork::content::{Block, RichTextBody};
    /// use groundwork::render::Components;
    /// use groundwork::store::ImageUrlBuilder;
    ///
    /// let body = RichTextBody::new(vec![Block::new("h2").text("Our Work").into()]);
    /// let nodes = Components::site().render(&body, &ImageUrlBuilder::new("p", "production"));
    ///
    /// assert_eq!(
    ///     nodes[0].to_html(),
    ///     r#"<h2 class="heading-2">Our Work<div class="line"></div></h2>"#
    /// );
    /// ```
    pub fn site() -> Self {
        Components::new()
            .block("normal", |_, c| wrap("p", "block-para", c))
            .block("h1", |_, c| wrap("h1", "heading-1", c))
            .block("h2", |_, c| underlined("h2", "heading-2", c))
            .block("h3", |_, c| underlined("h3", "heading-3", c))
            .block("h4", |_, c| wrap("h4", "heading-4", c))
            .block("blockquote", |_, c| wrap("blockquote", "custom-blockquote", c))
            .mark("strong", |_, c| wrap("strong", "text-strong", c))
            .mark("em", |_, c| wrap("em", "text-emphasis", c))
            .mark("underline", |_, c| wrap("span", "text-underline", c))
            .mark("strike-through", |_, c| wrap("span", "text-strike", c))
            .mark("code", |_, c| wrap("code", "text-code", c))
            .mark("link", link)
            .list("bullet", |_, c| Element::new("ul").children(c).into())
            .list("number", |_, c| Element::new("ol").children(c).into())
            .list_item(|_, c| Element::new("li").children(c).into())
            .image(rich_image)
    }
}

/// The thin separator rule drawn under headings and captions.
pub fn separator() -> RenderNode {
    Element::new("div").class("line").into()
}

/// Whether a link target opens in a new browsing context.
pub fn opens_new_context(href: &str) -> bool {
    href.starts_with("http")
}

fn wrap(tag: &'static str, class: &str, children: Vec<RenderNode>) -> RenderNode {
    Element::new(tag).class(class).children(children).into()
}

fn underlined(tag: &'static str, class: &str, children: Vec<RenderNode>) -> RenderNode {
    Element::new(tag)
        .class(class)
        .children(children)
        .child(separator())
        .into()
}

fn link(ctx: MarkContext<'_>, children: Vec<RenderNode>) -> RenderNode {
    let href = ctx.href().unwrap_or_default();
    let mut anchor = Element::new("a").attr("href", href);
    if opens_new_context(href) {
        anchor = anchor
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer");
    }
    anchor.class("text-link").children(children).into()
}

fn rich_image(image: &ImageValue, images: &ImageUrlBuilder) -> RenderNode {
    let Some(src) = images.image(image).width(RICH_IMAGE_WIDTH).url() else {
        return RenderNode::Empty;
    };
    let mut container = Element::new("div").class("rich-image-container").child(
        Element::new("img")
            .attr("src", src)
            .attr("alt", image.alt_text().unwrap_or(FALLBACK_ALT))
            .class("rich-image"),
    );
    if let Some(caption) = image.caption() {
        container = container.child(
            Element::new("div")
                .class("image-caption")
                .child(caption)
                .child(separator()),
        );
    }
    container.into()
}
