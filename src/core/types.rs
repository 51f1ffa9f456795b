//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`DocumentId`] - Validated content document identifier
//! - [`Slug`] - URL slug with the 96-character ceiling used by the schema
//! - [`AssetRef`] - Parsed image asset reference (`image-<id>-<w>x<h>-<fmt>`)
//! - [`LinkHref`] - Link annotation target restricted to allowed schemes
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use groundwork::core::types::{AssetRef, DocumentId, LinkHref, Slug};
//!
//! let id = DocumentId::new("project-riverside-loft").unwrap();
//! let slug = Slug::new("riverside-loft").unwrap();
//! let asset = AssetRef::parse("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg").unwrap();
//! let href = LinkHref::parse("https://example.com").unwrap();
//!
//! assert!(!id.is_draft());
//! assert_eq!(slug.as_str(), "riverside-loft");
//! assert_eq!(asset.width, 2000);
//! assert!(href.is_web());
//!
//! assert!(DocumentId::new("").is_err());
//! assert!(LinkHref::parse("javascript:alert(1)").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of a generated or stored slug.
pub const SLUG_MAX_LENGTH: usize = 96;

/// Maximum length of a document id accepted by the content lake.
const DOCUMENT_ID_MAX_LENGTH: usize = 128;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid document id: {0}")]
    InvalidDocumentId(String),

    #[error("invalid slug: {0}")]
    InvalidSlug(String),

    #[error("invalid asset reference: {0}")]
    InvalidAssetRef(String),

    #[error("invalid link: {0}")]
    InvalidLink(String),
}

/// A validated document identifier.
///
/// Document ids must:
/// - Be non-empty and at most 128 characters
/// - Contain only ASCII letters, digits, `.`, `_` and `-`
/// - Not start with `-`
///
/// Ids prefixed with `drafts.` identify unpublished drafts.
///
/// # Example
///
/// ```
/// use groundwork::core::types::DocumentId;
///
/// let id = DocumentId::new("drafts.aboutus").unwrap();
/// assert!(id.is_draft());
/// assert_eq!(id.published().as_str(), "aboutus");
///
/// assert!(DocumentId::new("has space").is_err());
/// assert!(DocumentId::new("-leading").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    const DRAFT_PREFIX: &'static str = "drafts.";

    /// Create a new validated document id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidDocumentId` if the id violates the rules above.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    fn validate(id: &str) -> Result<(), TypeError> {
        if id.is_empty() {
            return Err(TypeError::InvalidDocumentId(
                "document id cannot be empty".into(),
            ));
        }
        if id.len() > DOCUMENT_ID_MAX_LENGTH {
            return Err(TypeError::InvalidDocumentId(format!(
                "document id cannot exceed {} characters",
                DOCUMENT_ID_MAX_LENGTH
            )));
        }
        if id.starts_with('-') {
            return Err(TypeError::InvalidDocumentId(
                "document id cannot start with '-'".into(),
            ));
        }
        if let Some(c) = id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        {
            return Err(TypeError::InvalidDocumentId(format!(
                "document id cannot contain '{c}'"
            )));
        }
        Ok(())
    }

    /// Whether this id names an unpublished draft.
    pub fn is_draft(&self) -> bool {
        self.0.starts_with(Self::DRAFT_PREFIX)
    }

    /// The published counterpart of this id (itself if not a draft).
    pub fn published(&self) -> DocumentId {
        match self.0.strip_prefix(Self::DRAFT_PREFIX) {
            Some(rest) => DocumentId(rest.to_string()),
            None => self.clone(),
        }
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DocumentId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated URL slug.
///
/// Slugs are non-empty, at most [`SLUG_MAX_LENGTH`] characters and contain
/// no whitespace or `/`.
///
/// # Example
///
/// ```
/// use groundwork::core::types::Slug;
///
/// let slug = Slug::from_title("Riverside Loft: Full Renovation").unwrap();
/// assert_eq!(slug.as_str(), "riverside-loft-full-renovation");
///
/// assert!(Slug::new("").is_err());
/// assert!(Slug::new("a/b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Create a new validated slug.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidSlug` if the slug is empty, too long, or
    /// contains whitespace or `/`.
    pub fn new(slug: impl Into<String>) -> Result<Self, TypeError> {
        let slug = slug.into();
        Self::validate(&slug)?;
        Ok(Self(slug))
    }

    /// Derive a slug from a document title.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidSlug` if the title has no sluggable characters.
    pub fn from_title(title: &str) -> Result<Self, TypeError> {
        Self::new(crate::core::naming::slugify(title))
    }

    fn validate(slug: &str) -> Result<(), TypeError> {
        if slug.is_empty() {
            return Err(TypeError::InvalidSlug("slug cannot be empty".into()));
        }
        let len = slug.chars().count();
        if len > SLUG_MAX_LENGTH {
            return Err(TypeError::InvalidSlug(format!(
                "slug is {len} characters, maximum is {SLUG_MAX_LENGTH}"
            )));
        }
        if slug.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(TypeError::InvalidSlug(
                "slug cannot contain whitespace or '/'".into(),
            ));
        }
        Ok(())
    }

    /// Get the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A parsed image asset reference.
///
/// Image assets are referenced as `image-<id>-<width>x<height>-<format>`.
/// The dimensions are needed to apply crop rectangles when building URLs.
///
/// # Example
///
/// ```
/// use groundwork::core::types::AssetRef;
///
/// let asset = AssetRef::parse("image-abc123-1200x800-png").unwrap();
/// assert_eq!(asset.id, "abc123");
/// assert_eq!((asset.width, asset.height), (1200, 800));
/// assert_eq!(asset.format, "png");
/// assert_eq!(asset.file_name(), "abc123-1200x800.png");
///
/// assert!(AssetRef::parse("file-abc123-pdf").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetRef {
    /// Content hash identifying the asset
    pub id: String,
    /// Original width in pixels
    pub width: u32,
    /// Original height in pixels
    pub height: u32,
    /// File extension (jpg, png, webp, ...)
    pub format: String,
}

impl AssetRef {
    /// Parse an asset reference string.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidAssetRef` if the reference is not an image
    /// reference of the expected shape.
    pub fn parse(reference: &str) -> Result<Self, TypeError> {
        let invalid = || TypeError::InvalidAssetRef(reference.to_string());

        let rest = reference.strip_prefix("image-").ok_or_else(invalid)?;
        let mut parts = rest.rsplitn(3, '-');
        let format = parts.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let dimensions = parts.next().ok_or_else(invalid)?;
        let id = parts.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;

        let (width, height) = dimensions.split_once('x').ok_or_else(invalid)?;
        let width: u32 = width.parse().map_err(|_| invalid())?;
        let height: u32 = height.parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }

        Ok(Self {
            id: id.to_string(),
            width,
            height,
            format: format.to_string(),
        })
    }

    /// File name of the asset on the image CDN.
    pub fn file_name(&self) -> String {
        format!("{}-{}x{}.{}", self.id, self.width, self.height, self.format)
    }
}

/// URL schemes a link annotation may point to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkScheme {
    Http,
    Https,
    Mailto,
    Tel,
}

impl LinkScheme {
    /// All allowed schemes, in schema order.
    pub fn all() -> &'static [LinkScheme] {
        &[
            LinkScheme::Http,
            LinkScheme::Https,
            LinkScheme::Mailto,
            LinkScheme::Tel,
        ]
    }

    /// Scheme name as it appears in a URL.
    pub fn name(&self) -> &'static str {
        match self {
            LinkScheme::Http => "http",
            LinkScheme::Https => "https",
            LinkScheme::Mailto => "mailto",
            LinkScheme::Tel => "tel",
        }
    }

    /// Parse a scheme name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Some(LinkScheme::Http),
            "https" => Some(LinkScheme::Https),
            "mailto" => Some(LinkScheme::Mailto),
            "tel" => Some(LinkScheme::Tel),
            _ => None,
        }
    }
}

impl std::fmt::Display for LinkScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A link annotation target whose scheme is one of [`LinkScheme::all`].
///
/// # Example
///
/// ```
/// use groundwork::core::types::{LinkHref, LinkScheme};
///
/// let tel = LinkHref::parse("tel:+15551234567").unwrap();
/// assert_eq!(tel.scheme(), LinkScheme::Tel);
/// assert!(!tel.is_web());
///
/// assert!(LinkHref::parse("ftp://files.example.com").is_err());
/// assert!(LinkHref::parse("/relative/path").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkHref {
    raw: String,
    scheme: LinkScheme,
}

impl LinkHref {
    /// Parse and validate a link target.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidLink` if the value is not an absolute URL
    /// or its scheme is not allowed.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let parsed = url::Url::parse(raw)
            .map_err(|e| TypeError::InvalidLink(format!("'{raw}': {e}")))?;
        let scheme = LinkScheme::parse(parsed.scheme()).ok_or_else(|| {
            TypeError::InvalidLink(format!(
                "scheme '{}' is not allowed, must be one of: {}",
                parsed.scheme(),
                LinkScheme::all()
                    .iter()
                    .map(LinkScheme::name)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })?;
        Ok(Self {
            raw: raw.to_string(),
            scheme,
        })
    }

    /// The validated scheme.
    pub fn scheme(&self) -> LinkScheme {
        self.scheme
    }

    /// Whether this is an http(s) link.
    pub fn is_web(&self) -> bool {
        matches!(self.scheme, LinkScheme::Http | LinkScheme::Https)
    }

    /// The link as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for LinkHref {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod document_id {
        use super::*;

        #[test]
        fn valid_ids() {
            assert!(DocumentId::new("aboutus").is_ok());
            assert!(DocumentId::new("drafts.aboutus").is_ok());
            assert!(DocumentId::new("9f1c2e6a-3b1d-4b44-a1a0-1c3a4b5d6e7f").is_ok());
            assert!(DocumentId::new("image-abc_123").is_ok());
        }

        #[test]
        fn empty_rejected() {
            assert!(DocumentId::new("").is_err());
        }

        #[test]
        fn too_long_rejected() {
            assert!(DocumentId::new("a".repeat(129)).is_err());
            assert!(DocumentId::new("a".repeat(128)).is_ok());
        }

        #[test]
        fn invalid_chars_rejected() {
            assert!(DocumentId::new("has space").is_err());
            assert!(DocumentId::new("slash/id").is_err());
            assert!(DocumentId::new("-dash").is_err());
        }

        #[test]
        fn draft_published_counterpart() {
            let draft = DocumentId::new("drafts.project-1").unwrap();
            assert!(draft.is_draft());
            assert_eq!(draft.published().as_str(), "project-1");

            let published = DocumentId::new("project-1").unwrap();
            assert_eq!(published.published(), published);
        }

        #[test]
        fn serde_rejects_invalid() {
            let result: Result<DocumentId, _> = serde_json::from_str("\"bad id\"");
            assert!(result.is_err());
        }
    }

    mod slug {
        use super::*;

        #[test]
        fn max_length_enforced() {
            assert!(Slug::new("a".repeat(SLUG_MAX_LENGTH)).is_ok());
            assert!(Slug::new("a".repeat(SLUG_MAX_LENGTH + 1)).is_err());
        }

        #[test]
        fn from_title_truncates() {
            let title = "word ".repeat(40);
            let slug = Slug::from_title(&title).unwrap();
            assert!(slug.as_str().chars().count() <= SLUG_MAX_LENGTH);
            assert!(!slug.as_str().ends_with('-'));
        }

        #[test]
        fn from_title_without_content_fails() {
            assert!(Slug::from_title("!!!").is_err());
        }
    }

    mod asset_ref {
        use super::*;

        #[test]
        fn parses_dimensions_and_format() {
            let asset = AssetRef::parse("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg").unwrap();
            assert_eq!(asset.id, "Tb9Ew8CXIwaY6R1kjMvI0uRR");
            assert_eq!(asset.width, 2000);
            assert_eq!(asset.height, 3000);
            assert_eq!(asset.format, "jpg");
        }

        #[test]
        fn rejects_malformed() {
            assert!(AssetRef::parse("").is_err());
            assert!(AssetRef::parse("image-").is_err());
            assert!(AssetRef::parse("image-abc-0x10-png").is_err());
            assert!(AssetRef::parse("image-abc-10by10-png").is_err());
            assert!(AssetRef::parse("image-abc-10x10-").is_err());
        }
    }

    mod link_href {
        use super::*;

        #[test]
        fn allowed_schemes() {
            for href in [
                "http://example.com",
                "https://example.com/path?q=1",
                "mailto:office@example.com",
                "tel:+15551234567",
            ] {
                assert!(LinkHref::parse(href).is_ok(), "{href} should parse");
            }
        }

        #[test]
        fn disallowed_schemes() {
            assert!(LinkHref::parse("ftp://example.com").is_err());
            assert!(LinkHref::parse("javascript:void(0)").is_err());
            assert!(LinkHref::parse("relative/path").is_err());
        }

        #[test]
        fn scheme_display() {
            assert_eq!(format!("{}", LinkScheme::Mailto), "mailto");
            assert_eq!(LinkScheme::parse("HTTPS"), Some(LinkScheme::Https));
        }
    }
}
