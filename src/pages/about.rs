//! pages::about
//!
//! The About page: the first `aboutus` document plus the testimonial strip.
//! Both reads are issued together on activation.

use async_trait::async_trait;

use super::layout;
use super::state::{PageView, ViewState};
use super::testimonials;
use super::{Page, RenderContext, Route};
use crate::content::{AboutUs, Testimonial};
use crate::render::{Element, RenderNode};
use crate::store::{fetch_as, ContentStore, Query, StoreError};

/// Shown when there is no about document or it could not be read.
pub const NOT_FOUND_MESSAGE: &str = "No about data found";

pub const LOADING_LABEL: &str = "Loading...";

/// Title used when the document has none.
pub const DEFAULT_TITLE: &str = "About Us";

/// The first about document.
pub fn query() -> Query {
    Query::documents("aboutus").fields(["title", "description"]).first()
}

/// Read the about document; `None` when the dataset has none.
pub async fn fetch(store: &dyn ContentStore) -> Result<Option<AboutUs>, StoreError> {
    fetch_as(store, &query()).await
}

/// The About page view.
#[derive(Debug, Clone)]
pub struct AboutPage {
    pub about: PageView<Option<AboutUs>>,
    pub testimonials: PageView<Vec<Testimonial>>,
}

impl AboutPage {
    pub fn new() -> Self {
        Self {
            about: PageView::new(NOT_FOUND_MESSAGE),
            testimonials: PageView::new(testimonials::FAILURE_MESSAGE),
        }
    }
}

impl Default for AboutPage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Page for AboutPage {
    fn route(&self) -> Route {
        Route::About
    }

    async fn activate(&self, store: &dyn ContentStore) {
        tokio::join!(
            self.about.load(fetch(store)),
            self.testimonials.load(testimonials::fetch(store)),
        );
    }

    fn unmount(&self) {
        self.about.unmount();
        self.testimonials.unmount();
    }

    fn render(&self, ctx: &RenderContext) -> RenderNode {
        render(&self.about.state(), &self.testimonials.state(), ctx)
    }
}

/// Render the page for the given view states.
pub fn render(
    about: &ViewState<Option<AboutUs>>,
    testimonials: &ViewState<Vec<Testimonial>>,
    ctx: &RenderContext,
) -> RenderNode {
    let about = match about {
        ViewState::Loading => {
            return Element::new("div").class("loading").child(LOADING_LABEL).into();
        }
        ViewState::Failed(err) => return layout::failure(err),
        ViewState::Loaded(None) => {
            return Element::new("div").class("error").child(NOT_FOUND_MESSAGE).into();
        }
        ViewState::Loaded(Some(about)) => about,
    };

    let title = match about.title.trim() {
        "" => DEFAULT_TITLE,
        title => title,
    };

    Element::new("div")
        .class("about-container")
        .child(layout::hero(title, None))
        .child(
            Element::new("div")
                .class("about-content")
                .children(ctx.body(&about.description)),
        )
        .child(testimonials::render_state(testimonials, ctx))
        .into()
}
