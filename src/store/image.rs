//! store::image
//!
//! Image URL builder.
//!
//! Turns an image value into a fetchable CDN URL:
//! `{base}/images/{project}/{dataset}/{id}-{w}x{h}.{fmt}?w={width}`.
//! Crop metadata is applied as a `rect=left,top,width,height` parameter in
//! source pixels. Assets that were dereferenced in the query are built from
//! their `url` instead.

use crate::content::{Crop, ImageValue};
use crate::core::config::{Config, DEFAULT_IMAGE_BASE};
use crate::core::types::AssetRef;

/// Builds CDN URLs for image values.
///
/// # Example
///
/// ```
/// use groundwork::content::ImageValue;
/// use groundwork::store::ImageUrlBuilder;
///
/// let builder = ImageUrlBuilder::new("snti8zdm", "production");
/// let image = ImageValue::from_ref("image-abc123-1200x800-jpg");
///
/// assert_eq!(
///     builder.image(&image).width(800).url().unwrap(),
///     "https://cdn.sanity.io/images/snti8zdm/production/abc123-1200x800.jpg?w=800"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
    base_url: String,
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_IMAGE_BASE.to_string(),
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.project_id(), config.dataset()).with_base_url(config.image_base())
    }

    /// Serve images from a different CDN host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Start building a URL for one image.
    pub fn image<'a>(&'a self, image: &'a ImageValue) -> ImageUrl<'a> {
        ImageUrl {
            builder: self,
            image,
            width: None,
        }
    }
}

/// URL under construction for a single image.
#[derive(Debug, Clone, Copy)]
pub struct ImageUrl<'a> {
    builder: &'a ImageUrlBuilder,
    image: &'a ImageValue,
    width: Option<u32>,
}

impl ImageUrl<'_> {
    /// Target display width in pixels.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// The URL, or `None` if the image has no resolvable asset.
    pub fn url(&self) -> Option<String> {
        let (base, mut params) = match self.image.asset_ref() {
            Some(asset) => {
                let base = format!(
                    "{}/images/{}/{}/{}",
                    self.builder.base_url,
                    self.builder.project_id,
                    self.builder.dataset,
                    asset.file_name()
                );
                let params = self
                    .image
                    .crop
                    .filter(|crop| !crop.is_trivial())
                    .map(|crop| vec![format!("rect={}", crop_rect(&asset, &crop))])
                    .unwrap_or_default();
                (base, params)
            }
            None => (self.image.asset_url()?.to_string(), Vec::new()),
        };

        if let Some(width) = self.width {
            params.push(format!("w={width}"));
        }

        if params.is_empty() {
            return Some(base);
        }
        let separator = if base.contains('?') { '&' } else { '?' };
        Some(format!("{base}{separator}{}", params.join("&")))
    }
}

/// Crop rectangle in source pixels: `left,top,width,height`.
fn crop_rect(asset: &AssetRef, crop: &Crop) -> String {
    let w = f64::from(asset.width);
    let h = f64::from(asset.height);
    let left = crop.left * w;
    let top = crop.top * h;
    let width = (w - crop.right * w - left).round();
    let height = (h - crop.bottom * h - top).round();
    format!(
        "{},{},{},{}",
        left.round() as i64,
        top.round() as i64,
        width as i64,
        height as i64
    )
}
