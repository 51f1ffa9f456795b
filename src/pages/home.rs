//! pages::home
//!
//! The landing page: static hero, the services grid and the testimonial
//! strip. The two reads run concurrently.

use async_trait::async_trait;

use super::layout;
use super::services;
use super::state::{PageView, ViewState};
use super::testimonials;
use super::{Page, RenderContext, Route};
use crate::content::{Service, Testimonial};
use crate::render::{Element, RenderNode};
use crate::store::ContentStore;

pub const TAGLINE: &str = "Your Trusted Construction Company";

pub const HEADLINE: &str = "Building the future, one strong foundation at a time";

/// The home page view.
#[derive(Debug, Clone)]
pub struct HomePage {
    pub services: PageView<Vec<Service>>,
    pub testimonials: PageView<Vec<Testimonial>>,
}

impl HomePage {
    pub fn new() -> Self {
        Self {
            services: PageView::new(services::FAILURE_MESSAGE),
            testimonials: PageView::new(testimonials::FAILURE_MESSAGE),
        }
    }
}

impl Default for HomePage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Page for HomePage {
    fn route(&self) -> Route {
        Route::Home
    }

    async fn activate(&self, store: &dyn ContentStore) {
        tokio::join!(
            self.services.load(services::fetch(store)),
            self.testimonials.load(testimonials::fetch(store)),
        );
    }

    fn unmount(&self) {
        self.services.unmount();
        self.testimonials.unmount();
    }

    fn render(&self, ctx: &RenderContext) -> RenderNode {
        render(&self.services.state(), &self.testimonials.state(), ctx)
    }
}

pub fn render(
    services: &ViewState<Vec<Service>>,
    testimonials: &ViewState<Vec<Testimonial>>,
    ctx: &RenderContext,
) -> RenderNode {
    RenderNode::fragment([
        hero(),
        Element::new("div")
            .class("entry_container")
            .child(layout::view(services, services::LOADING_LABEL, |list| {
                services::section(list, ctx)
            }))
            .into(),
        testimonials::render_state(testimonials, ctx),
    ])
}

fn hero() -> RenderNode {
    Element::new("div")
        .class("home_container")
        .child(
            Element::new("div")
                .class("home_content")
                .child(Element::new("p").class("sm_para").child(TAGLINE))
                .child(Element::new("h1").class("home_para").child(HEADLINE))
                .child(
                    Element::new("a")
                        .attr("href", Route::Projects.path())
                        .class("btn")
                        .child("View Projects"),
                ),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::ViewError;
    use crate::store::StoreError;

    #[test]
    fn hero_renders_while_services_load() {
        let ctx = RenderContext::new("proj", "production");
        let node = render(&ViewState::Loading, &ViewState::Loading, &ctx);
        assert_eq!(node.select("h1.home_para").len(), 1);
        assert!(node.text_content().contains(services::LOADING_LABEL));
        assert_eq!(node.select("a.btn")[0].attr_value("href"), Some("/projects"));
    }

    #[test]
    fn services_failure_keeps_hero() {
        let ctx = RenderContext::new("proj", "production");
        let failed = ViewState::Failed(ViewError::new(
            services::FAILURE_MESSAGE,
            &StoreError::NetworkError("offline".into()),
        ));
        let node = render(&failed, &ViewState::Loaded(Vec::new()), &ctx);
        assert_eq!(node.select("div.error-container").len(), 1);
        assert_eq!(node.select("div.home_container").len(), 1);
    }
}
