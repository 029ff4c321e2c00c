//! Image materializer: converts each unique card image URL into a
//! reusable JPEG encoding, tolerating slow and broken hosts.
//!
//! URLs are de-duplicated on `card_src` (variant codes share images),
//! fetched strictly sequentially, rasterized onto a fixed white canvas,
//! and cached as tagged entries. A failed load never aborts a report —
//! the composer renders a placeholder for that card instead.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage, Rgba};
use reqwest::blocking::Client;

use crate::config;
use crate::error::{ReportError, Result};
use crate::models::CardValuation;

/// Materialized images keyed by the original (unproxied) `card_src` URL.
pub type ImageCache = HashMap<String, CachedImage>;

// ---------------------------------------------------------------------------
// Cache entries
// ---------------------------------------------------------------------------

/// A cache entry for one image URL.
///
/// `Failed` is a first-class variant rather than a sentinel value mixed
/// into the success type: downstream layout matches on it to draw a
/// placeholder and never retries.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedImage {
    Ready(EncodedImage),
    Failed,
}

impl CachedImage {
    pub fn is_ready(&self) -> bool {
        matches!(self, CachedImage::Ready(_))
    }
}

/// A rasterized card image: JPEG bytes at the fixed canvas size.
#[derive(Clone, PartialEq)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("bytes", &self.data.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ImageSource
// ---------------------------------------------------------------------------

/// Source of raw image bytes for a URL.
///
/// The production implementation is [`HttpImageSource`]; tests substitute
/// counting or failing sources to exercise de-duplication and placeholder
/// degradation.
pub trait ImageSource: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP-backed image source with proxy rewriting for blocked CDNs.
pub struct HttpImageSource {
    base_url: String,
    timeout: Duration,
    client: OnceLock<Client>,
}

impl HttpImageSource {
    /// Create a source whose proxy endpoint lives under `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
            client: OnceLock::new(),
        }
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> &Client {
        self.client.get_or_init(|| {
            Client::builder()
                .timeout(self.timeout)
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()
                .expect("failed to build HTTP client")
        })
    }

    /// Rewrite allow-listed CDN URLs through the proxy endpoint; all
    /// other URLs are used directly.
    pub fn resolve_url(&self, url: &str) -> String {
        if config::requires_image_proxy(url) {
            config::proxy_image_url(&self.base_url, url)
        } else {
            url.to_string()
        }
    }
}

impl ImageSource for HttpImageSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let resolved = self.resolve_url(url);
        let resp = self.client().get(&resolved).send()?.error_for_status()?;
        Ok(resp.bytes()?.to_vec())
    }
}

// ---------------------------------------------------------------------------
// Materialization
// ---------------------------------------------------------------------------

/// Unique image URLs in first-seen order. Cards without a source are
/// skipped — they render as placeholders without consuming a load.
pub fn unique_sources(cards: &[CardValuation]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut sources = Vec::new();
    for card in cards {
        if card.has_image_source() && seen.insert(card.card_src.as_str()) {
            sources.push(card.card_src.as_str());
        }
    }
    sources
}

/// Materialize every unique image for `cards`, one at a time.
///
/// Progress is reported per unique URL (`current`/`total`), not per card.
/// Failures are absorbed as [`CachedImage::Failed`]; this function never
/// errors.
pub fn materialize_images(
    cards: &[CardValuation],
    source: &dyn ImageSource,
    progress: &mut dyn FnMut(usize, usize),
) -> ImageCache {
    let sources = unique_sources(cards);
    let total = sources.len();
    let mut cache = ImageCache::with_capacity(total);

    for (index, url) in sources.into_iter().enumerate() {
        let entry = match materialize_one(source, url) {
            Ok(encoded) => {
                log::debug!("materialized image {url}");
                CachedImage::Ready(encoded)
            }
            Err(err) => {
                log::warn!("image load failed for {url}: {err}");
                CachedImage::Failed
            }
        };
        cache.insert(url.to_string(), entry);
        progress(index + 1, total);
    }

    cache
}

fn materialize_one(source: &dyn ImageSource, url: &str) -> Result<EncodedImage> {
    let bytes = source.fetch(url)?;
    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| ReportError::Image(format!("decode failed: {e}")))?;
    let canvas = rasterize(&decoded);
    encode_jpeg(&canvas)
}

/// Draw a decoded image onto the fixed white card canvas: alpha is
/// composited over white to normalize transparency, the image is
/// aspect-fit scaled and centered.
fn rasterize(decoded: &DynamicImage) -> RgbImage {
    let fitted = decoded
        .resize(
            config::CARD_CANVAS_WIDTH,
            config::CARD_CANVAS_HEIGHT,
            FilterType::Triangle,
        )
        .to_rgba8();

    let mut canvas = RgbImage::from_pixel(
        config::CARD_CANVAS_WIDTH,
        config::CARD_CANVAS_HEIGHT,
        Rgb([255, 255, 255]),
    );
    let x0 = (config::CARD_CANVAS_WIDTH - fitted.width()) / 2;
    let y0 = (config::CARD_CANVAS_HEIGHT - fitted.height()) / 2;

    for (x, y, pixel) in fitted.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = a as f32 / 255.0;
        let bg = 255.0;
        let out_r = (r as f32 * alpha + bg * (1.0 - alpha)) as u8;
        let out_g = (g as f32 * alpha + bg * (1.0 - alpha)) as u8;
        let out_b = (b as f32 * alpha + bg * (1.0 - alpha)) as u8;
        canvas.put_pixel(x0 + x, y0 + y, Rgb([out_r, out_g, out_b]));
    }

    canvas
}

fn encode_jpeg(canvas: &RgbImage) -> Result<EncodedImage> {
    let mut data = Vec::new();
    JpegEncoder::new_with_quality(&mut data, config::JPEG_QUALITY)
        .encode_image(canvas)
        .map_err(|e| ReportError::Image(format!("encode failed: {e}")))?;
    Ok(EncodedImage {
        data,
        width: canvas.width(),
        height: canvas.height(),
    })
}
