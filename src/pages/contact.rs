//! pages::contact
//!
//! The Contact page: the consultation form with per-field error messages
//! and the latest notice.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::layout;
use super::{Page, RenderContext, Route};
use crate::contact::{ContactField, ContactForm, ContactView, Notice, NoticeKind, ServiceType};
use crate::notify::NotificationRelay;
use crate::render::{Element, RenderNode};
use crate::store::ContentStore;

pub const INTRO: &str = "Tell us about your project and we'll handle the rest! \
Fill out the form below to schedule your consultation.";

/// The Contact page view. Clones share the form.
#[derive(Debug, Clone, Default)]
pub struct ContactPage {
    view: Arc<Mutex<ContactView>>,
}

impl ContactPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ContactView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current form state.
    pub fn view(&self) -> ContactView {
        self.lock().clone()
    }

    pub fn set_field(&self, field: ContactField, value: impl Into<String>) {
        self.lock().form.set(field, value);
    }

    pub fn set_form(&self, form: ContactForm) {
        self.lock().form = form;
    }

    /// Validate and send the form through `relay`.
    pub async fn submit(&self, relay: &dyn NotificationRelay) -> Notice {
        let mut view = self.view();
        let notice = view.submit(relay).await.clone();
        *self.lock() = view;
        notice
    }
}

#[async_trait]
impl Page for ContactPage {
    fn route(&self) -> Route {
        Route::Contact
    }

    async fn activate(&self, _store: &dyn ContentStore) {}

    fn unmount(&self) {}

    fn render(&self, _ctx: &RenderContext) -> RenderNode {
        render(&self.view())
    }
}

pub fn render(view: &ContactView) -> RenderNode {
    let fields = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::Address,
        ContactField::Phone,
        ContactField::ServiceType,
        ContactField::PreferredTime,
        ContactField::SpecialNotes,
    ];

    let grid = Element::new("div")
        .class("form_grid")
        .children(fields.iter().map(|field| form_field(view, *field)))
        .child(
            Element::new("div").class("form_sub one").child(
                Element::new("button")
                    .attr("type", "submit")
                    .class("cosa")
                    .child("Confirm Info"),
            ),
        );

    Element::new("div")
        .class("about-container")
        .child(layout::hero("Contact Us", Some("dawos")))
        .child(view.notice().map_or(RenderNode::Empty, notice))
        .child(
            Element::new("div")
                .class("lokesh")
                .child(layout::rule_heading("h2", "loka", "Let's Get Started"))
                .child(Element::new("p").class("loke_p").child(INTRO))
                .child(
                    Element::new("form")
                        .class("contact_form")
                        .child(layout::rule_heading("h2", "contact", "Contact Information"))
                        .child(grid),
                ),
        )
        .into()
}

fn notice(notice: &Notice) -> RenderNode {
    let class = match notice.kind {
        NoticeKind::Success => "notice notice-success",
        NoticeKind::Error => "notice notice-error",
    };
    Element::new("div")
        .class(class)
        .attr("role", "status")
        .child(notice.message)
        .into()
}

fn form_field(view: &ContactView, field: ContactField) -> RenderNode {
    let value = view.form.get(field);
    let control: RenderNode = match field {
        ContactField::ServiceType => {
            let placeholder = Element::new("option")
                .attr("value", "")
                .attr("disabled", "disabled")
                .child(field.placeholder());
            let options = ServiceType::all().iter().map(|t| {
                let option = Element::new("option").attr("value", t.value());
                let option = if value == t.value() {
                    option.attr("selected", "selected")
                } else {
                    option
                };
                option.child(t.label())
            });
            Element::new("select")
                .attr("name", field.name())
                .class("form_input")
                .child(placeholder)
                .children(options)
                .into()
        }
        ContactField::SpecialNotes => Element::new("textarea")
            .attr("name", field.name())
            .class("form_input")
            .attr("placeholder", field.placeholder())
            .child(value)
            .into(),
        _ => Element::new("input")
            .attr("type", input_type(field))
            .attr("name", field.name())
            .class("form_input")
            .attr("placeholder", field.placeholder())
            .attr("value", value)
            .into(),
    };

    let class = match field {
        ContactField::FirstName | ContactField::LastName | ContactField::Address | ContactField::Phone => {
            "form_sub"
        }
        _ => "form_sub one",
    };
    let mut wrapper = Element::new("div").class(class).child(control);
    if view.is_flagged(field) {
        wrapper = wrapper.child(
            Element::new("span")
                .class("error-message")
                .child(field.required_message()),
        );
    }
    wrapper.into()
}

fn input_type(field: ContactField) -> &'static str {
    match field {
        ContactField::Phone => "tel",
        ContactField::PreferredTime => "datetime-local",
        _ => "text",
    }
}
