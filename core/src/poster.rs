//! Poster loading collaborator.
//!
//! The details presenter never fetches images itself; it is handed an
//! `ImageLoader` and only cares whether a decoded poster came back.
//! Caching and CDN retries, if any, belong to the loader.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::error::ImageError;

/// Bundled asset shown when a poster cannot be loaded.
pub const PLACEHOLDER_POSTER: &str = "notfound.jpg";

/// A decoded poster as RGBA8 pixels, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct PosterImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl PosterImage {
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageError> {
        let rgba = image::load_from_memory(bytes)
            .map_err(|e| ImageError::Decode(e.to_string()))?
            .to_rgba8();
        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
        })
    }
}

impl fmt::Debug for PosterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PosterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

pub trait ImageLoader: Send + Sync {
    fn load(&self, url: &str) -> Result<PosterImage, ImageError>;
}

/// Fetches posters over HTTP with ureq and decodes them in place.
#[derive(Debug, Clone)]
pub struct UreqImageLoader {
    agent: ureq::Agent,
}

impl UreqImageLoader {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl ImageLoader for UreqImageLoader {
    fn load(&self, url: &str) -> Result<PosterImage, ImageError> {
        let mut response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| ImageError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(ImageError::Transport(format!("HTTP {status}")));
        }
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| ImageError::Transport(e.to_string()))?;
        debug!(url, bytes = bytes.len(), "poster downloaded");
        PosterImage::decode(&bytes)
    }
}
