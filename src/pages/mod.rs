//! pages
//!
//! Page views for the site's routes.
//!
//! Each page owns one or more [`PageView`]s. Activating a page issues its
//! reads; rendering reflects whatever state the views are in, so a page can
//! be rendered while loading, after a failure or once loaded.
//!
//! # Modules
//!
//! - [`state`] - View state machine and lifecycle
//! - [`layout`] - Shared markup (hero, loading, failure)
//! - [`carousel`] - Slide carousel state
//! - [`about`], [`services`], [`projects`], [`home`], [`contact`] - Routes
//! - [`testimonials`] - Testimonial strip embedded in other pages
//!
//! # Example
//!
//! ```
//! use groundwork::pages::{page_for, RenderContext, Route};
//! use groundwork::store::MemoryStore;
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let store = MemoryStore::new();
//! store.insert(json!({ "_id": "s1", "_type": "service", "title": "Flooring", "order": 1 })).unwrap();
//!
//! let page = page_for(Route::Services);
//! page.activate(&store).await;
//!
//! let html = page.render(&RenderContext::new("proj", "production")).to_html();
//! assert!(html.contains("Flooring"));
//! # });
//! ```

pub mod about;
pub mod carousel;
pub mod contact;
pub mod home;
pub mod layout;
pub mod projects;
pub mod services;
pub mod state;
pub mod testimonials;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

pub use about::AboutPage;
pub use carousel::Carousel;
pub use contact::ContactPage;
pub use home::HomePage;
pub use projects::ProjectsPage;
pub use services::ServicesPage;
pub use state::{LoadOutcome, PageView, ViewError, ViewState};

use crate::content::RichTextBody;
use crate::core::config::Config;
use crate::render::{Components, RenderNode};
use crate::store::{ContentStore, ImageUrlBuilder, Query};

/// A route of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Projects,
    Services,
    Contact,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[
            Route::Home,
            Route::About,
            Route::Projects,
            Route::Services,
            Route::Contact,
        ]
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Projects => "/projects",
            Route::Services => "/services",
            Route::Contact => "/contact",
        }
    }

    /// Short name, as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::About => "about",
            Route::Projects => "projects",
            Route::Services => "services",
            Route::Contact => "contact",
        }
    }

    /// Parse a path (`/about`) or a name (`about`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|r| r.path() == s || r.name() == s || r.path().trim_start_matches('/') == s)
    }

    /// The reads the route's page issues on activation.
    pub fn queries(&self) -> Vec<Query> {
        match self {
            Route::Home => vec![services::query(), testimonials::query()],
            Route::About => vec![about::query(), testimonials::query()],
            Route::Projects => vec![projects::query()],
            Route::Services => vec![services::query()],
            Route::Contact => Vec::new(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let names: Vec<_> = Self::all().iter().map(|r| r.name()).collect();
            format!("unknown route '{}' (expected one of: {})", s, names.join(", "))
        })
    }
}

/// What every page renders with.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub components: Components,
    pub images: ImageUrlBuilder,
}

impl RenderContext {
    /// The site's components with images from `project_id`/`dataset`.
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self::with_images(ImageUrlBuilder::new(project_id, dataset))
    }

    pub fn with_images(images: ImageUrlBuilder) -> Self {
        Self {
            components: Components::site(),
            images,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_images(ImageUrlBuilder::from_config(config))
    }

    /// Render a rich-text body with this context.
    pub fn body(&self, body: &RichTextBody) -> Vec<RenderNode> {
        self.components.render(body, &self.images)
    }
}

/// A routed page.
#[async_trait]
pub trait Page: Send + Sync {
    fn route(&self) -> Route;

    /// Issue the page's reads. Views that are unmounted meanwhile discard
    /// their results.
    async fn activate(&self, store: &dyn ContentStore);

    /// Detach the page from its in-flight reads.
    fn unmount(&self);

    /// Render the page in its current state.
    fn render(&self, ctx: &RenderContext) -> RenderNode;
}

/// A fresh page for `route`.
pub fn page_for(route: Route) -> Box<dyn Page> {
    match route {
        Route::Home => Box::new(HomePage::new()),
        Route::About => Box::new(AboutPage::new()),
        Route::Projects => Box::new(ProjectsPage::new()),
        Route::Services => Box::new(ServicesPage::new()),
        Route::Contact => Box::new(ContactPage::new()),
    }
}
