//! content
//!
//! The content schema: document types as data, the portable text model
//! shared by every rich-text field, typed read-side documents, and the
//! write-time validator.
//!
//! # Modules
//!
//! - [`fields`] - Field and document type declarations
//! - [`registry`] - The site's registered types
//! - [`portable`] - Rich-text bodies
//! - [`image`] - Image values
//! - [`documents`] - Typed documents for page queries
//! - [`validate`] - Schema validation

pub mod documents;
pub mod fields;
pub mod image;
pub mod portable;
pub mod registry;
pub mod validate;

pub use documents::{
    AboutUs, Author, Category, Post, Project, ProjectTestimonial, Reference, Service,
    ServiceSummary, SlugValue, SystemFields, Testimonial,
};
pub use fields::{DocumentType, FieldKind, FieldSpec, NamedType, Rule};
pub use image::{AssetPointer, Crop, Hotspot, ImageValue};
pub use portable::{
    Block, BlockStyle, Decorator, ListKind, MarkDef, PortableNode, RichTextBody, Span, UnknownNode,
};
pub use registry::{document_type, named_types, rich_text_body, schema_types, type_names};
pub use validate::{
    validate, validate_document, validate_document_with, validate_with, DocumentsResolver,
    NoResolver, ReferenceResolver, Resolution, ValidationReport, Violation, ViolationKind,
};
