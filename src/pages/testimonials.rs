//! pages::testimonials
//!
//! The client testimonial strip, embedded in the About and Home pages.
//!
//! The strip loads independently of its host page. While loading, or when
//! the load fails, it renders nothing.

use super::carousel::Carousel;
use super::state::ViewState;
use super::RenderContext;
use crate::content::Testimonial;
use crate::render::{Element, RenderNode};
use crate::store::{fetch_as, ContentStore, Direction, Query, StoreError};

/// Width requested for reviewer portraits.
pub const PORTRAIT_WIDTH: u32 = 100;

pub const FAILURE_MESSAGE: &str = "Failed to fetch testimonials";

pub const HEADING: &str = "Testimonials from our Clients";

/// Testimonials, newest first.
pub fn query() -> Query {
    Query::documents("testimonial")
        .order_by("_createdAt", Direction::Desc)
        .fields(["_id", "name", "review", "image"])
}

pub async fn fetch(store: &dyn ContentStore) -> Result<Vec<Testimonial>, StoreError> {
    fetch_as(store, &query()).await
}

/// Render the strip for a view state.
pub fn render_state(state: &ViewState<Vec<Testimonial>>, ctx: &RenderContext) -> RenderNode {
    match state.loaded() {
        Some(testimonials) if !testimonials.is_empty() => render(testimonials, ctx),
        _ => RenderNode::Empty,
    }
}

pub fn render(testimonials: &[Testimonial], ctx: &RenderContext) -> RenderNode {
    let slides = testimonials.iter().map(|t| card(t, ctx)).collect();
    Element::new("div")
        .class("testo")
        .child(Element::new("h2").class("hello").child(HEADING))
        .child(Carousel::new(testimonials.len()).looping().render("top", slides))
        .into()
}

fn card(testimonial: &Testimonial, ctx: &RenderContext) -> RenderNode {
    let portrait = testimonial
        .image
        .as_ref()
        .and_then(|image| ctx.images.image(image).width(PORTRAIT_WIDTH).url())
        .map(|src| -> RenderNode {
            Element::new("div")
                .class("animated-border")
                .child(
                    Element::new("img")
                        .attr("src", src)
                        .attr("alt", testimonial.name.as_str())
                        .class("testo_p"),
                )
                .into()
        })
        .unwrap_or(RenderNode::Empty);

    Element::new("div")
        .class("testo_card")
        .child(
            Element::new("div")
                .class("testo_mini_card")
                .child(portrait)
                .child(
                    Element::new("h2")
                        .class("testo_person_name")
                        .child(testimonial.name.as_str()),
                )
                .child(Element::new("p").class("review").child(testimonial.review.as_str())),
        )
        .into()
}
