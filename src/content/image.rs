//! content::image
//!
//! Image values as stored on documents and inside rich text bodies.
//!
//! An image value points at an asset (by `_ref`, or by a dereferenced asset
//! document carrying `_id` and `url`) and carries editor metadata: alt text,
//! an optional caption, and crop/hotspot rectangles used when building URLs.

use serde::{Deserialize, Serialize};

use crate::core::types::AssetRef;

/// Pointer to a stored image asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetPointer {
    /// Asset document id on a reference
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Asset document id on a dereferenced asset
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Direct URL, present when the asset was dereferenced in the query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl AssetPointer {
    /// The asset id, preferring `_ref` over `_id`.
    pub fn asset_id(&self) -> Option<&str> {
        self.reference.as_deref().or(self.id.as_deref())
    }
}

/// Focal point of an image, in fractions of its dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub x: f64,
    pub y: f64,
    pub height: f64,
    pub width: f64,
}

/// Crop insets, in fractions of the image dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub right: f64,
}

impl Crop {
    /// Whether any side is actually inset.
    pub fn is_trivial(&self) -> bool {
        self.top <= 0.0 && self.bottom <= 0.0 && self.left <= 0.0 && self.right <= 0.0
    }
}

/// An image value (document field, array member or rich text node).
///
/// # Example
///
/// ```
/// use groundwork::content::ImageValue;
///
/// let image: ImageValue = serde_json::from_value(serde_json::json!({
///     "_type": "image",
///     "asset": { "_ref": "image-abc123-1200x800-jpg" },
///     "alt": "Finished kitchen"
/// })).unwrap();
///
/// assert!(image.is_resolvable());
/// assert_eq!(image.alt_text(), Some("Finished kitchen"));
/// assert!(image.caption().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageValue {
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetPointer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotspot: Option<Hotspot>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<Crop>,
}

impl ImageValue {
    /// Create an image value referencing an asset id.
    pub fn from_ref(reference: impl Into<String>) -> Self {
        Self {
            asset: Some(AssetPointer {
                reference: Some(reference.into()),
                id: None,
                url: None,
            }),
            ..Default::default()
        }
    }

    /// Set the alt text.
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Set the caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// The parsed asset reference, if the value points at a well-formed one.
    pub fn asset_ref(&self) -> Option<AssetRef> {
        let reference = self.asset.as_ref()?.asset_id()?;
        AssetRef::parse(reference).ok()
    }

    /// The dereferenced asset URL, if the query resolved one.
    pub fn asset_url(&self) -> Option<&str> {
        self.asset
            .as_ref()?
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
    }

    /// Whether a URL can be built for this image.
    pub fn is_resolvable(&self) -> bool {
        self.asset_ref().is_some() || self.asset_url().is_some()
    }

    /// Alt text, if non-blank.
    pub fn alt_text(&self) -> Option<&str> {
        non_blank(self.alt.as_deref())
    }

    /// Caption, if non-blank.
    pub fn caption(&self) -> Option<&str> {
        non_blank(self.caption.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_asset_is_unresolvable() {
        let image: ImageValue = serde_json::from_value(json!({ "_type": "image", "alt": "x" })).unwrap();
        assert!(!image.is_resolvable());
    }

    #[test]
    fn malformed_ref_is_unresolvable() {
        let image = ImageValue::from_ref("not-an-image-ref");
        assert!(!image.is_resolvable());
    }

    #[test]
    fn dereferenced_asset_resolves_by_url() {
        let image: ImageValue = serde_json::from_value(json!({
            "asset": {
                "_id": "image-abc-10x10-png",
                "url": "https://cdn.sanity.io/images/p/d/abc-10x10.png"
            }
        }))
        .unwrap();
        assert!(image.is_resolvable());
        assert_eq!(image.asset_ref().unwrap().id, "abc");
        assert!(image.asset_url().is_some());
    }

    #[test]
    fn asset_with_ref_and_id_prefers_ref() {
        let image: ImageValue = serde_json::from_value(json!({
            "_type": "image",
            "asset": {
                "_ref": "image-abc-10x10-png",
                "_id": "image-other-20x20-jpg"
            },
            "alt": "Porch"
        }))
        .unwrap();
        assert_eq!(image.asset_ref().unwrap().id, "abc");
    }

    #[test]
    fn blank_caption_is_absent() {
        let image = ImageValue::from_ref("image-abc-10x10-png").with_caption("   ");
        assert!(image.caption().is_none());
    }

    #[test]
    fn crop_triviality() {
        assert!(Crop::default().is_trivial());
        let crop = Crop {
            left: 0.1,
            ..Default::default()
        };
        assert!(!crop.is_trivial());
    }
}
