//! Integration tests for page view lifecycles and the contact form.

use serde_json::json;

use groundwork::contact::{ContactField, ContactForm, INCOMPLETE_MESSAGE, SENT_MESSAGE};
use groundwork::notify::MockRelay;
use groundwork::pages::{
    about, page_for, services, AboutPage, ContactPage, HomePage, Page, ProjectsPage,
    RenderContext, Route, ServicesPage, ViewState,
};
use groundwork::store::{FailOn, MemoryStore, StoreError};

fn ctx() -> RenderContext {
    RenderContext::new("proj", "production")
}

fn services_store() -> MemoryStore {
    MemoryStore::with_documents(vec![
        json!({ "_id": "s-1", "_type": "service", "title": "Flooring", "order": 1 }),
        json!({ "_id": "s-2", "_type": "service", "title": "Painting", "order": 2 }),
    ])
    .unwrap()
}

fn complete_form() -> ContactForm {
    ContactForm::new()
        .with(ContactField::FirstName, "Ada")
        .with(ContactField::LastName, "Byron")
        .with(ContactField::Address, "12 Elm St")
        .with(ContactField::Phone, "555-0100")
        .with(ContactField::ServiceType, "flooring")
        .with(ContactField::PreferredTime, "2025-03-04T09:30")
}

// =============================================================================
// Lifecycle
// =============================================================================

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn unmounted_view_ignores_late_result() {
        let store = services_store();
        store.hold();

        let page = ServicesPage::new();
        let handle = tokio::spawn({
            let page = page.clone();
            let store = store.clone();
            async move { page.activate(&store).await }
        });

        tokio::task::yield_now().await;
        page.unmount();
        store.release();
        handle.await.unwrap();

        assert!(page.services.state().is_loading());
        assert_eq!(store.fetch_count(), 1);
    }

    #[tokio::test]
    async fn unmounted_view_ignores_late_failure() {
        let store = services_store().fail_on(FailOn::Fetch(StoreError::NetworkError(
            "connection reset".into(),
        )));
        store.hold();

        let page = ServicesPage::new();
        let handle = tokio::spawn({
            let page = page.clone();
            let store = store.clone();
            async move { page.activate(&store).await }
        });

        tokio::task::yield_now().await;
        page.unmount();
        store.release();
        handle.await.unwrap();

        assert!(page.services.state().error().is_none());
        assert!(page.services.state().is_loading());
    }

    #[tokio::test]
    async fn retry_recovers_after_failure() {
        let store = services_store().fail_on(FailOn::Fetch(StoreError::RateLimited));
        let page = ServicesPage::new();

        page.activate(&store).await;
        let error = page.services.state().error().cloned().unwrap();
        assert_eq!(error.message, services::FAILURE_MESSAGE);

        store.clear_fail_on();
        page.retry(&store).await;

        match page.services.state() {
            ViewState::Loaded(list) => assert_eq!(list.len(), 2),
            other => panic!("expected loaded, got {other:?}"),
        }
        assert_eq!(store.fetch_count(), 2);
    }

    #[tokio::test]
    async fn second_activation_does_not_refetch() {
        let store = services_store();
        let page = ServicesPage::new();
        page.activate(&store).await;
        page.activate(&store).await;
        assert_eq!(store.fetch_count(), 1);
    }

    #[tokio::test]
    async fn failed_testimonials_leave_home_intact() {
        let store = services_store().fail_on(FailOn::FetchType(
            "testimonial".into(),
            StoreError::NetworkError("timeout".into()),
        ));
        let page = HomePage::new();
        page.activate(&store).await;

        let node = page.render(&ctx());
        assert_eq!(node.select("h2.service_name").len(), 2);
        assert!(node.select("div.testo").is_empty());
        assert!(node.select("div.error-container").is_empty());
    }
}

// =============================================================================
// Pages
// =============================================================================

mod pages {
    use super::*;

    #[tokio::test]
    async fn about_without_document_shows_not_found() {
        let store = MemoryStore::new();
        let page = AboutPage::new();
        page.activate(&store).await;

        let node = page.render(&ctx());
        assert_eq!(node.select("div.error").len(), 1);
        assert!(node.text_content().contains(about::NOT_FOUND_MESSAGE));
    }

    #[tokio::test]
    async fn about_renders_description_and_testimonials() {
        let store = MemoryStore::with_documents(vec![
            json!({
                "_id": "aboutus",
                "_type": "aboutus",
                "title": "Built on Trust",
                "description": [{
                    "_type": "block",
                    "style": "normal",
                    "children": [{ "_type": "span", "text": "Family owned." }],
                    "markDefs": []
                }]
            }),
            json!({ "_id": "t-1", "_type": "testimonial", "name": "Dana", "review": "Spotless." }),
        ])
        .unwrap();

        let page = AboutPage::new();
        page.activate(&store).await;

        let html = page.render(&ctx()).to_html();
        assert!(html.contains("Built on Trust"));
        assert!(html.contains(r#"<p class="block-para">Family owned.</p>"#));
        assert!(html.contains("Spotless."));
    }

    #[tokio::test]
    async fn loading_page_renders_label() {
        let page = ProjectsPage::new();
        let html = page.render(&ctx()).to_html();
        assert!(html.contains("Loading projects..."));
    }

    #[tokio::test]
    async fn every_route_renders_with_empty_store() {
        let store = MemoryStore::new();
        for route in Route::all() {
            let page = page_for(*route);
            page.activate(&store).await;
            assert!(!page.render(&ctx()).is_empty(), "{route} rendered nothing");
        }
    }
}

// =============================================================================
// Contact form
// =============================================================================

mod contact {
    use super::*;

    #[tokio::test]
    async fn missing_phone_blocks_and_flags_only_phone() {
        let relay = MockRelay::new();
        let page = ContactPage::new();
        page.set_form(complete_form().with(ContactField::Phone, ""));

        let notice = page.submit(&relay).await;

        assert_eq!(notice.message, INCOMPLETE_MESSAGE);
        assert_eq!(page.view().flagged(), &[ContactField::Phone]);
        assert!(relay.sent().is_empty());
        assert_eq!(relay.attempts(), 0);

        let node = page.render(&ctx());
        let errors = node.select("span.error-message");
        assert_eq!(errors.len(), 1);
    }

    #[tokio::test]
    async fn complete_form_is_sent_and_cleared() {
        let relay = MockRelay::new();
        let page = ContactPage::new();
        page.set_form(complete_form());

        let notice = page.submit(&relay).await;

        assert_eq!(notice.message, SENT_MESSAGE);
        let sent = relay.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].get("phone"), Some("555-0100"));
        assert_eq!(sent[0].get("preferred_time"), Some("2025-03-04T09:30"));
        assert_eq!(page.view().form, ContactForm::new());
    }
}
