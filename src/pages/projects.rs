//! pages::projects
//!
//! The Projects page: the six most recently completed projects as cards,
//! each followed by its detail view (image gallery, service, completion
//! month, key features, rich-text details and an optional client quote).

use async_trait::async_trait;

use super::carousel::Carousel;
use super::layout;
use super::state::{PageView, ViewState};
use super::{Page, RenderContext, Route};
use crate::content::{Project, ProjectTestimonial};
use crate::render::{separator, Element, RenderNode};
use crate::store::{fetch_as, ContentStore, Direction, Query, StoreError};

pub const FAILURE_MESSAGE: &str = "Failed to load projects";

pub const LOADING_LABEL: &str = "Loading projects...";

/// Width requested for gallery images.
pub const GALLERY_IMAGE_WIDTH: u32 = 1200;

/// Index of the last project shown (the slice is inclusive).
pub const LAST_INDEX: usize = 5;

pub const HEADING: &str = "Our Recent Projects";

pub const INTRO: &str = "Explore our portfolio of completed projects showcasing our \
craftsmanship and attention to detail.";

/// Newest-first projects, at most six.
pub fn query() -> Query {
    Query::documents("project")
        .order_by("completionDate", Direction::Desc)
        .fields(["_id", "title", "shortDescription", "slug"])
        .deref("service", &["title"])
        .fields(["images", "completionDate", "features", "details", "testimonial"])
        .slice(0, LAST_INDEX)
}

pub async fn fetch(store: &dyn ContentStore) -> Result<Vec<Project>, StoreError> {
    fetch_as(store, &query()).await
}

/// The Projects page view.
#[derive(Debug, Clone)]
pub struct ProjectsPage {
    pub projects: PageView<Vec<Project>>,
}

impl ProjectsPage {
    pub fn new() -> Self {
        Self {
            projects: PageView::new(FAILURE_MESSAGE),
        }
    }

    /// Retry a failed load.
    pub async fn retry(&self, store: &dyn ContentStore) {
        self.projects.retry(fetch(store)).await;
    }
}

impl Default for ProjectsPage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Page for ProjectsPage {
    fn route(&self) -> Route {
        Route::Projects
    }

    async fn activate(&self, store: &dyn ContentStore) {
        self.projects.load(fetch(store)).await;
    }

    fn unmount(&self) {
        self.projects.unmount();
    }

    fn render(&self, ctx: &RenderContext) -> RenderNode {
        render(&self.projects.state(), ctx)
    }
}

pub fn render(state: &ViewState<Vec<Project>>, ctx: &RenderContext) -> RenderNode {
    layout::view(state, LOADING_LABEL, |projects| {
        Element::new("div")
            .class("about-container")
            .child(layout::hero("Recent Projects", Some("pola")))
            .child(
                Element::new("div").class("entry_container").child(
                    Element::new("div")
                        .class("ep")
                        .child(layout::section_title(HEADING))
                        .child(Element::new("p").class("service_p").child(INTRO))
                        .child(
                            Element::new("div").class("service_grid").children(
                                projects
                                    .iter()
                                    .enumerate()
                                    .map(|(i, p)| project_entry(i, p, ctx)),
                            ),
                        ),
                ),
            )
            .into()
    })
}

fn project_entry(index: usize, project: &Project, ctx: &RenderContext) -> RenderNode {
    Element::new("article")
        .class("service_sub")
        .child(card(index, project, ctx))
        .child(detail(project, 0, ctx))
        .into()
}

/// Grid card: cover image, hover blurb and title.
pub fn card(index: usize, project: &Project, ctx: &RenderContext) -> RenderNode {
    let cover = project
        .cover_image()
        .and_then(|image| {
            let src = ctx.images.image(image).url()?;
            let alt = image
                .alt_text()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Project {}", index + 1));
            Some(
                Element::new("img")
                    .attr("src", src)
                    .attr("alt", alt)
                    .class("service_img"),
            )
        })
        .map_or(RenderNode::Empty, RenderNode::from);

    RenderNode::fragment([
        Element::new("div")
            .class("img-container")
            .child(cover)
            .child(
                Element::new("div")
                    .class("service-overlay")
                    .child(Element::new("p").child(project.short_description.as_str())),
            ),
        Element::new("h2")
            .class("service_name")
            .child(project.title.as_str()),
    ])
}

/// Detail view with the gallery opened at `active_image`.
pub fn detail(project: &Project, active_image: usize, ctx: &RenderContext) -> RenderNode {
    Element::new("div")
        .class("project-modal-content")
        .child(
            Element::new("div")
                .class("project-modal-slider")
                .child(gallery(project, active_image, ctx)),
        )
        .child(details_column(project, ctx))
        .into()
}

fn gallery(project: &Project, active_image: usize, ctx: &RenderContext) -> RenderNode {
    let slides: Vec<RenderNode> = project
        .images
        .iter()
        .enumerate()
        .filter_map(|(i, image)| {
            let src = ctx.images.image(image).width(GALLERY_IMAGE_WIDTH).url()?;
            let alt = image
                .alt_text()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Project image {}", i + 1));
            Some(
                Element::new("div")
                    .class("modal-image-container")
                    .child(
                        Element::new("img")
                            .attr("src", src)
                            .attr("alt", alt)
                            .class("modal-image"),
                    )
                    .into(),
            )
        })
        .collect();
    Carousel::new(slides.len())
        .starting_at(active_image)
        .render("modal-swiper", slides)
}

fn details_column(project: &Project, ctx: &RenderContext) -> RenderNode {
    let mut facts = Element::new("div").class("flexy");
    if let Some(service) = project.service_title() {
        facts = facts.child(fact("Service:", service));
    }
    if let Some(completed) = project.completion_label() {
        facts = facts.child(fact("Completed:", &completed));
    }

    let mut column = Element::new("div")
        .class("project-modal-details")
        .child(
            Element::new("h2")
                .class("project-modal-title")
                .child(project.title.as_str()),
        )
        .child(separator())
        .child(facts)
        .child(separator());

    if !project.features.is_empty() {
        column = column.child(
            Element::new("div")
                .class("project-features")
                .child(Element::new("h4").class("dirty").child("Key Features"))
                .child(separator())
                .child(
                    Element::new("ul").class("features-list").children(
                        project.features.iter().map(|feature| -> RenderNode {
                            Element::new("li")
                                .class("feature-item")
                                .child(feature.as_str())
                                .into()
                        }),
                    ),
                ),
        );
    }

    if !project.details.is_empty() {
        column = column.child(
            Element::new("div")
                .class("project-full-details")
                .children(ctx.body(&project.details)),
        );
    }

    if let Some(testimonial) = project.testimonial.as_ref().filter(|t| t.is_presentable()) {
        column = column.child(quote(testimonial));
    }

    column.into()
}

fn fact(label: &str, value: &str) -> RenderNode {
    Element::new("div")
        .class("project-service")
        .child(Element::new("span").class("dirty").child(label))
        .child(Element::new("h2").class("dota").child(value))
        .into()
}

fn quote(testimonial: &ProjectTestimonial) -> RenderNode {
    let mut cite = Element::new("cite").class("testimonial-author").child(format!(
        "\u{2014} {}",
        testimonial.client_name.as_deref().unwrap_or_default()
    ));
    if let Some(role) = testimonial.client_role.as_deref().filter(|r| !r.is_empty()) {
        cite = cite.child(Element::new("span").child(format!(", {role}")));
    }
    Element::new("div")
        .class("project-testimonial")
        .child(
            Element::new("blockquote")
                .class("testimonial-quote")
                .child(format!("\"{}\"", testimonial.quote.as_deref().unwrap_or_default())),
        )
        .child(cite)
        .into()
}
