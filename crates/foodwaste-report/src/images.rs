//! Product image download for the PDF rendition.
//!
//! Images are fetched one at a time, decoded with the `image` crate and
//! flattened to RGB (the PDF backend rejects alpha channels). Any failure
//! leaves that image out; it never fails the report. A URL that failed once
//! is not requested again in the same run.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use foodwaste_core::Store;
use image::DynamicImage;
use reqwest::Client;

use crate::error::{ImageError, RenderError};

/// Largest image body accepted, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Decoded images keyed by their URL.
#[derive(Default)]
pub struct ProductImages {
    images: HashMap<String, DynamicImage>,
}

impl ProductImages {
    #[must_use]
    pub fn get(&self, url: &str) -> Option<&DynamicImage> {
        self.images.get(url)
    }

    pub fn insert(&mut self, url: impl Into<String>, image: DynamicImage) {
        self.images.insert(url.into(), image);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Downloads product images. Carries no API credentials.
pub struct ImageFetcher {
    client: Client,
}

impl ImageFetcher {
    /// # Errors
    ///
    /// Returns [`RenderError::ImageClient`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, RenderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches every distinct image URL referenced by `stores`, sequentially.
    pub async fn fetch_all(&self, stores: &[Store]) -> ProductImages {
        let mut images = ProductImages::default();
        let mut failed = HashSet::new();
        let urls = stores
            .iter()
            .flat_map(|s| s.products.iter())
            .filter_map(|p| p.image_url.as_deref());

        for url in urls {
            if images.get(url).is_some() || failed.contains(url) {
                continue;
            }
            match self.fetch_one(url).await {
                Ok(image) => images.insert(url, image),
                Err(err) => {
                    tracing::warn!(url, error = %err, "omitting product image from PDF");
                    failed.insert(url);
                }
            }
        }

        tracing::debug!(
            count = images.len(),
            failed = failed.len(),
            "downloaded product images"
        );
        images
    }

    async fn fetch_one(&self, url: &str) -> Result<DynamicImage, ImageError> {
        let mut response = self
            .client
            .get(url)
            // Ask the CDN for formats the decoder handles.
            .header(reqwest::header::ACCEPT, "image/jpeg,image/png;q=0.9")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::Status(status));
        }

        let too_large = || ImageError::TooLarge {
            limit: MAX_IMAGE_BYTES,
        };
        if response
            .content_length()
            .is_some_and(|len| len > MAX_IMAGE_BYTES as u64)
        {
            return Err(too_large());
        }
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > MAX_IMAGE_BYTES {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }
        decode_image(&body)
    }
}

/// Decodes image bytes and flattens them to 8-bit RGB.
fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(DynamicImage::ImageRgb8(decoded.to_rgb8()))
}
