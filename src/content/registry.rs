//! content::registry
//!
//! The site's document type registry.
//!
//! Every rich-text field (About description, Service full description,
//! Project details) shares one block declaration so that editors get the
//! same styles and marks everywhere, and so that the single site renderer
//! covers everything the editor can produce.

use std::sync::OnceLock;

use super::fields::{
    AnnotationSpec, BlockSpec, DocumentType, FieldKind, FieldSpec, ImageSpec, NamedType,
};
use crate::core::types::{LinkScheme, SLUG_MAX_LENGTH};

/// Maximum length of a project's short description.
pub const SHORT_DESCRIPTION_MAX: usize = 100;

/// Maximum number of key features on a project.
pub const FEATURES_MAX: usize = 5;

static DOCUMENT_TYPES: OnceLock<Vec<DocumentType>> = OnceLock::new();
static NAMED_TYPES: OnceLock<Vec<NamedType>> = OnceLock::new();

/// All document types, in declaration order.
pub fn schema_types() -> &'static [DocumentType] {
    DOCUMENT_TYPES.get_or_init(|| {
        vec![
            post(),
            author(),
            category(),
            about_us(),
            testimonial(),
            service(),
            project(),
        ]
    })
}

/// Reusable non-document types (currently only `blockContent`).
pub fn named_types() -> &'static [NamedType] {
    NAMED_TYPES.get_or_init(|| {
        vec![NamedType {
            name: "blockContent",
            title: "Block Content",
            kind: block_content(),
        }]
    })
}

/// Look up a document type by name.
///
/// # Example
///
/// ```
/// use groundwork::content::document_type;
///
/// let project = document_type("project").unwrap();
/// assert!(project.field("images").unwrap().is_required());
/// assert!(document_type("invoice").is_none());
/// ```
pub fn document_type(name: &str) -> Option<&'static DocumentType> {
    schema_types().iter().find(|t| t.name == name)
}

/// Names of every registered type, documents first.
pub fn type_names() -> Vec<&'static str> {
    schema_types()
        .iter()
        .map(|t| t.name)
        .chain(named_types().iter().map(|t| t.name))
        .collect()
}

fn link_schemes() -> Vec<&'static str> {
    LinkScheme::all().iter().map(LinkScheme::name).collect()
}

/// Image with required alt text and an optional caption.
fn captioned_image() -> ImageSpec {
    ImageSpec {
        hotspot: true,
        fields: vec![
            FieldSpec::new("alt", "Alternative Text", FieldKind::String).required(),
            FieldSpec::new("caption", "Caption", FieldKind::String),
        ],
    }
}

fn image_with_alt() -> ImageSpec {
    ImageSpec {
        hotspot: true,
        fields: vec![FieldSpec::new("alt", "Alternative Text", FieldKind::String).required()],
    }
}

fn site_block() -> BlockSpec {
    BlockSpec {
        styles: vec!["normal", "h1", "h2", "h3", "h4", "blockquote"],
        lists: vec!["bullet", "number"],
        decorators: vec!["strong", "em", "underline", "strike-through", "code"],
        annotations: vec![AnnotationSpec::link(&link_schemes())],
    }
}

/// The shared rich-text body: text blocks plus captioned images.
pub fn rich_text_body() -> FieldKind {
    FieldKind::Array {
        of: vec![
            FieldKind::Block(site_block()),
            FieldKind::Image(captioned_image()),
        ],
    }
}

/// The blog's `blockContent` type.
pub fn block_content() -> FieldKind {
    FieldKind::Array {
        of: vec![
            FieldKind::Block(BlockSpec {
                styles: vec!["normal", "h1", "h2", "h3", "h4", "blockquote"],
                lists: vec!["bullet"],
                decorators: vec!["strong", "em"],
                annotations: vec![AnnotationSpec::link(&["http", "https"])],
            }),
            FieldKind::Image(image_with_alt()),
        ],
    }
}

fn slug(source: &'static str) -> FieldKind {
    FieldKind::Slug {
        source,
        max_length: SLUG_MAX_LENGTH,
    }
}

fn post() -> DocumentType {
    DocumentType {
        name: "post",
        title: "Post",
        fields: vec![
            FieldSpec::new("title", "Title", FieldKind::String).required(),
            FieldSpec::new("slug", "Slug", slug("title")).required(),
            FieldSpec::new("author", "Author", FieldKind::Reference { to: vec!["author"] }),
            FieldSpec::new("mainImage", "Main image", FieldKind::Image(image_with_alt())),
            FieldSpec::new(
                "categories",
                "Categories",
                FieldKind::Array {
                    of: vec![FieldKind::Reference {
                        to: vec!["category"],
                    }],
                },
            ),
            FieldSpec::new("publishedAt", "Published at", FieldKind::Datetime),
            FieldSpec::new("body", "Body", block_content()),
        ],
    }
}

fn author() -> DocumentType {
    DocumentType {
        name: "author",
        title: "Author",
        fields: vec![
            FieldSpec::new("name", "Name", FieldKind::String).required(),
            FieldSpec::new("slug", "Slug", slug("name")),
            FieldSpec::new(
                "image",
                "Image",
                FieldKind::Image(ImageSpec {
                    hotspot: true,
                    fields: Vec::new(),
                }),
            ),
            FieldSpec::new(
                "bio",
                "Bio",
                FieldKind::Array {
                    of: vec![FieldKind::Block(BlockSpec {
                        styles: vec!["normal"],
                        lists: Vec::new(),
                        decorators: vec!["strong", "em"],
                        annotations: Vec::new(),
                    })],
                },
            ),
        ],
    }
}

fn category() -> DocumentType {
    DocumentType {
        name: "category",
        title: "Category",
        fields: vec![
            FieldSpec::new("title", "Title", FieldKind::String).required(),
            FieldSpec::new("description", "Description", FieldKind::Text),
        ],
    }
}

fn about_us() -> DocumentType {
    DocumentType {
        name: "aboutus",
        title: "About Us",
        fields: vec![
            FieldSpec::new("title", "Title", FieldKind::String).required(),
            FieldSpec::new("description", "Description", rich_text_body())
                .required()
                .min(1),
        ],
    }
}

fn testimonial() -> DocumentType {
    DocumentType {
        name: "testimonial",
        title: "Testimonial",
        fields: vec![
            FieldSpec::new("name", "Client Name", FieldKind::String).required(),
            FieldSpec::new(
                "image",
                "Client Image",
                FieldKind::Image(ImageSpec {
                    hotspot: true,
                    fields: Vec::new(),
                }),
            ),
            FieldSpec::new("review", "Review", FieldKind::Text).required(),
        ],
    }
}

fn service() -> DocumentType {
    DocumentType {
        name: "service",
        title: "Service",
        fields: vec![
            FieldSpec::new("title", "Service Title", FieldKind::String).required(),
            FieldSpec::new("shortDescription", "Short Description", FieldKind::Text),
            FieldSpec::new("fullDescription", "Full Description", rich_text_body()),
            FieldSpec::new("image", "Service Image", FieldKind::Image(image_with_alt())),
            FieldSpec::new("order", "Display Order", FieldKind::Number),
        ],
    }
}

fn project() -> DocumentType {
    DocumentType {
        name: "project",
        title: "Project",
        fields: vec![
            FieldSpec::new("title", "Project Title", FieldKind::String).required(),
            FieldSpec::new("slug", "Slug", slug("title")).required(),
            FieldSpec::new("shortDescription", "Short Description", FieldKind::String)
                .required()
                .max(SHORT_DESCRIPTION_MAX),
            FieldSpec::new(
                "service",
                "Related Service",
                FieldKind::Reference {
                    to: vec!["service"],
                },
            )
            .required(),
            FieldSpec::new(
                "images",
                "Project Images",
                FieldKind::Array {
                    of: vec![FieldKind::Image(image_with_alt())],
                },
            )
            .required()
            .min(1),
            FieldSpec::new("completionDate", "Completion Date", FieldKind::Date),
            FieldSpec::new(
                "features",
                "Key Features",
                FieldKind::Array {
                    of: vec![FieldKind::String],
                },
            )
            .max(FEATURES_MAX),
            FieldSpec::new("details", "Project Details", rich_text_body()),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fields::Rule;

    #[test]
    fn registry_has_all_types() {
        assert_eq!(
            type_names(),
            vec![
                "post",
                "author",
                "category",
                "aboutus",
                "testimonial",
                "service",
                "project",
                "blockContent"
            ]
        );
    }

    #[test]
    fn project_constraints() {
        let project = document_type("project").unwrap();
        let short = project.field("shortDescription").unwrap();
        assert_eq!(short.rules, vec![Rule::Required, Rule::Max(100)]);

        let features = project.field("features").unwrap();
        assert_eq!(features.rules, vec![Rule::Max(5)]);

        let service = project.field("service").unwrap();
        assert_eq!(
            service.kind,
            FieldKind::Reference {
                to: vec!["service"]
            }
        );
    }

    #[test]
    fn rich_text_fields_share_one_declaration() {
        let about = document_type("aboutus").unwrap();
        let service = document_type("service").unwrap();
        let project = document_type("project").unwrap();
        let body = rich_text_body();
        assert_eq!(about.field("description").unwrap().kind, body);
        assert_eq!(service.field("fullDescription").unwrap().kind, body);
        assert_eq!(project.field("details").unwrap().kind, body);
    }

    #[test]
    fn link_annotation_allows_four_schemes() {
        let FieldKind::Array { of } = rich_text_body() else {
            panic!("rich text body is an array");
        };
        let FieldKind::Block(block) = &of[0] else {
            panic!("first member is a block");
        };
        assert_eq!(
            block.annotations[0].schemes,
            vec!["http", "https", "mailto", "tel"]
        );
    }
}
