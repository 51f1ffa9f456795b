//! content::documents
//!
//! Typed views of documents as returned by page queries.
//!
//! Query projections return `null` for fields a document does not have, so
//! every non-`Option` field here accepts `null` and falls back to its
//! default. Missing optional content never fails deserialization.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::image::ImageValue;
use super::portable::RichTextBody;

/// Deserialize `null` as `T::default()`.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// System fields every stored document carries. Projections may omit them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemFields {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,

    #[serde(rename = "_createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "_updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
}

/// A slug object (`{ "current": "..." }`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugValue {
    #[serde(default, deserialize_with = "null_default")]
    pub current: String,
}

/// An unresolved reference (`{ "_ref": "..." }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "_ref")]
    pub reference: String,
}

/// The About page singleton.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AboutUs {
    #[serde(flatten)]
    pub meta: SystemFields,

    #[serde(default, deserialize_with = "null_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_default")]
    pub description: RichTextBody,
}

/// A client testimonial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(flatten)]
    pub meta: SystemFields,

    #[serde(default, deserialize_with = "null_default")]
    pub name: String,

    #[serde(default)]
    pub image: Option<ImageValue>,

    #[serde(default, deserialize_with = "null_default")]
    pub review: String,
}

/// A service the company offers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(flatten)]
    pub meta: SystemFields,

    #[serde(default, deserialize_with = "null_default")]
    pub title: String,

    #[serde(default)]
    pub short_description: Option<String>,

    #[serde(default, deserialize_with = "null_default")]
    pub full_description: RichTextBody,

    #[serde(default)]
    pub image: Option<ImageValue>,

    #[serde(default)]
    pub order: Option<f64>,
}

/// The projected service of a project (`service->{title}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    #[serde(default)]
    pub title: Option<String>,
}

/// A client quote attached to a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTestimonial {
    #[serde(default)]
    pub quote: Option<String>,

    #[serde(default)]
    pub client_name: Option<String>,

    #[serde(default)]
    pub client_role: Option<String>,
}

impl ProjectTestimonial {
    /// A testimonial is shown only when it has a quote.
    pub fn is_presentable(&self) -> bool {
        self.quote.as_deref().is_some_and(|q| !q.trim().is_empty())
    }
}

/// A completed project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(flatten)]
    pub meta: SystemFields,

    #[serde(default, deserialize_with = "null_default")]
    pub title: String,

    #[serde(default)]
    pub slug: Option<SlugValue>,

    #[serde(default, deserialize_with = "null_default")]
    pub short_description: String,

    #[serde(default)]
    pub service: Option<ServiceSummary>,

    #[serde(default, deserialize_with = "null_default")]
    pub images: Vec<ImageValue>,

    #[serde(default)]
    pub completion_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "null_default")]
    pub features: Vec<String>,

    #[serde(default, deserialize_with = "null_default")]
    pub details: RichTextBody,

    #[serde(default)]
    pub testimonial: Option<ProjectTestimonial>,
}

impl Project {
    /// The project's cover image (first resolvable image).
    pub fn cover_image(&self) -> Option<&ImageValue> {
        self.images.iter().find(|image| image.is_resolvable())
    }

    /// Title of the related service, if projected and present.
    pub fn service_title(&self) -> Option<&str> {
        self.service
            .as_ref()?
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
    }

    /// Completion date formatted as `Month YYYY`.
    pub fn completion_label(&self) -> Option<String> {
        self.completion_date
            .map(|date| date.format("%B %Y").to_string())
    }
}

/// A blog post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(flatten)]
    pub meta: SystemFields,

    #[serde(default, deserialize_with = "null_default")]
    pub title: String,

    #[serde(default)]
    pub slug: Option<SlugValue>,

    #[serde(default)]
    pub author: Option<Reference>,

    #[serde(default)]
    pub main_image: Option<ImageValue>,

    #[serde(default, deserialize_with = "null_default")]
    pub categories: Vec<Reference>,

    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "null_default")]
    pub body: RichTextBody,
}

/// A blog author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(flatten)]
    pub meta: SystemFields,

    #[serde(default, deserialize_with = "null_default")]
    pub name: String,

    #[serde(default)]
    pub slug: Option<SlugValue>,

    #[serde(default)]
    pub image: Option<ImageValue>,

    #[serde(default, deserialize_with = "null_default")]
    pub bio: RichTextBody,
}

/// A blog category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(flatten)]
    pub meta: SystemFields,

    #[serde(default, deserialize_with = "null_default")]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn project_tolerates_nulls() {
        let project: Project = serde_json::from_value(json!({
            "_id": "p1",
            "title": "Deck",
            "shortDescription": null,
            "service": null,
            "images": null,
            "completionDate": null,
            "features": null,
            "details": null,
            "testimonial": null
        }))
        .unwrap();

        assert_eq!(project.title, "Deck");
        assert!(project.images.is_empty());
        assert!(project.service_title().is_none());
        assert!(project.cover_image().is_none());
        assert!(project.testimonial.is_none());
        assert!(project.completion_label().is_none());
    }

    #[test]
    fn project_full_projection() {
        let project: Project = serde_json::from_value(json!({
            "_id": "p1",
            "title": "Kitchen",
            "shortDescription": "Full gut and rebuild",
            "service": { "title": "Interior Remodeling" },
            "images": [{ "asset": { "_ref": "image-a-100x100-jpg" }, "alt": "Kitchen" }],
            "completionDate": "2024-03-15",
            "features": ["Quartz counters"],
            "testimonial": { "quote": "Superb", "clientName": "Sam" }
        }))
        .unwrap();

        assert_eq!(project.service_title(), Some("Interior Remodeling"));
        assert_eq!(project.completion_label().as_deref(), Some("March 2024"));
        assert!(project.cover_image().is_some());
        let testimonial = project.testimonial.unwrap();
        assert!(testimonial.is_presentable());
        assert!(testimonial.client_role.is_none());
    }

    #[test]
    fn blank_testimonial_quote_not_presentable() {
        let t = ProjectTestimonial {
            quote: Some("  ".into()),
            ..Default::default()
        };
        assert!(!t.is_presentable());
    }

    #[test]
    fn service_with_system_fields() {
        let service: Service = serde_json::from_value(json!({
            "_id": "s1",
            "_createdAt": "2024-01-02T03:04:05Z",
            "title": "Flooring",
            "order": 2
        }))
        .unwrap();
        assert_eq!(service.meta.id.as_deref(), Some("s1"));
        assert!(service.meta.created_at.is_some());
        assert_eq!(service.order, Some(2.0));
        assert!(service.full_description.is_empty());
    }

    #[test]
    fn testimonial_without_image() {
        let t: Testimonial =
            serde_json::from_value(json!({ "name": "Ana", "review": "Great", "image": null })).unwrap();
        assert!(t.image.is_none());
    }
}
