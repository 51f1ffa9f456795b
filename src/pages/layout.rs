//! pages::layout
//!
//! Markup shared by every page: hero banner, loading and failure states.

use super::state::{ViewError, ViewState};
use crate::render::{separator, Element, RenderNode};

/// Page banner with the page title.
pub fn hero(title: &str, modifier: Option<&str>) -> RenderNode {
    let class = match modifier {
        Some(modifier) => format!("about_img {modifier}"),
        None => "about_img".to_string(),
    };
    Element::new("div")
        .class(class)
        .child(Element::new("h1").class("about_title").child(title))
        .into()
}

/// Section heading followed by the accent rule.
pub fn section_title(title: &str) -> RenderNode {
    RenderNode::fragment([
        Element::new("h2").class("recent_title").child(title),
        Element::new("div").class("tol"),
    ])
}

/// Spinner shown while a view loads.
pub fn loading(label: &str) -> RenderNode {
    Element::new("div")
        .class("loading-container")
        .child(Element::new("div").class("loading-spinner"))
        .child(Element::new("p").child(label))
        .into()
}

/// Failure message with the retry affordance.
pub fn failure(err: &ViewError) -> RenderNode {
    Element::new("div")
        .class("error-container")
        .child(Element::new("p").child(err.message.as_str()))
        .child(
            Element::new("button")
                .attr("type", "button")
                .class("retry")
                .child("Retry"),
        )
        .into()
}

/// Render a view state, delegating `Loaded` to `render`.
pub fn view<T>(
    state: &ViewState<T>,
    loading_label: &str,
    render: impl FnOnce(&T) -> RenderNode,
) -> RenderNode {
    match state {
        ViewState::Loading => loading(loading_label),
        ViewState::Loaded(data) => render(data),
        ViewState::Failed(err) => failure(err),
    }
}

/// A heading with the separator rule under it.
pub fn rule_heading(tag: &'static str, class: &str, text: &str) -> RenderNode {
    RenderNode::fragment([
        RenderNode::from(Element::new(tag).class(class).child(text)),
        separator(),
    ])
}
