//! pages::services
//!
//! The Services page: every service in display order, each with a card and
//! a detail section holding its full description.

use async_trait::async_trait;

use super::layout;
use super::state::{PageView, ViewState};
use super::{Page, RenderContext, Route};
use crate::content::Service;
use crate::render::{Element, RenderNode};
use crate::store::{fetch_as, ContentStore, Direction, Query, StoreError};

pub const FAILURE_MESSAGE: &str = "Failed to load services";

pub const LOADING_LABEL: &str = "Loading services...";

/// Width requested for service images.
pub const CARD_IMAGE_WIDTH: u32 = 600;

pub const HEADING: &str = "Our services & solutions";

pub const INTRO: &str = "We deliver exceptional craftsmanship with attention to detail. \
Our team combines traditional techniques with modern innovation.";

/// Services by ascending `order`, then creation order.
pub fn query() -> Query {
    Query::documents("service")
        .order_by("order", Direction::Asc)
        .order_by("_createdAt", Direction::Asc)
        .fields([
            "_id",
            "_createdAt",
            "title",
            "shortDescription",
            "fullDescription",
            "image",
            "order",
        ])
}

pub async fn fetch(store: &dyn ContentStore) -> Result<Vec<Service>, StoreError> {
    fetch_as(store, &query()).await
}

/// The Services page view.
#[derive(Debug, Clone)]
pub struct ServicesPage {
    pub services: PageView<Vec<Service>>,
}

impl ServicesPage {
    pub fn new() -> Self {
        Self {
            services: PageView::new(FAILURE_MESSAGE),
        }
    }

    /// Retry a failed load.
    pub async fn retry(&self, store: &dyn ContentStore) {
        self.services.retry(fetch(store)).await;
    }
}

impl Default for ServicesPage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Page for ServicesPage {
    fn route(&self) -> Route {
        Route::Services
    }

    async fn activate(&self, store: &dyn ContentStore) {
        self.services.load(fetch(store)).await;
    }

    fn unmount(&self) {
        self.services.unmount();
    }

    fn render(&self, ctx: &RenderContext) -> RenderNode {
        render(&self.services.state(), ctx)
    }
}

pub fn render(state: &ViewState<Vec<Service>>, ctx: &RenderContext) -> RenderNode {
    layout::view(state, LOADING_LABEL, |services| {
        Element::new("div")
            .class("entry_container")
            .child(section(services, ctx))
            .into()
    })
}

/// Heading, intro and the service grid; also used on the home page.
pub fn section(services: &[Service], ctx: &RenderContext) -> RenderNode {
    Element::new("div")
        .class("ep")
        .child(layout::section_title(HEADING))
        .child(Element::new("p").class("service_p").child(INTRO))
        .child(
            Element::new("div")
                .class("service_grid")
                .children(services.iter().map(|s| service_entry(s, ctx))),
        )
        .into()
}

fn service_entry(service: &Service, ctx: &RenderContext) -> RenderNode {
    Element::new("article")
        .class("service_sub")
        .child(card(service, ctx))
        .child(detail(service, ctx))
        .into()
}

/// Grid card: image, hover blurb and title.
pub fn card(service: &Service, ctx: &RenderContext) -> RenderNode {
    let image = service
        .image
        .as_ref()
        .and_then(|image| {
            let src = ctx.images.image(image).width(CARD_IMAGE_WIDTH).url()?;
            Some(
                Element::new("img")
                    .attr("src", src)
                    .attr("alt", image.alt_text().unwrap_or(&service.title))
                    .class("service_img"),
            )
        })
        .map_or(RenderNode::Empty, RenderNode::from);

    let overlay = match service.short_description.as_deref() {
        Some(text) if !text.trim().is_empty() => Element::new("div")
            .class("service-overlay")
            .child(Element::new("p").child(text))
            .into(),
        _ => RenderNode::Empty,
    };

    RenderNode::fragment([
        Element::new("div")
            .class("img-container")
            .child(image)
            .child(overlay),
        Element::new("h2")
            .class("service_name")
            .child(service.title.as_str()),
    ])
}

/// Detail section with the full description.
pub fn detail(service: &Service, ctx: &RenderContext) -> RenderNode {
    let mut detail = Element::new("div").class("service-detail");
    if let Some(text) = service.short_description.as_deref() {
        detail = detail.child(Element::new("p").class("service-subtitle").child(text));
    }
    detail.children(ctx.body(&service.full_description)).into()
}
