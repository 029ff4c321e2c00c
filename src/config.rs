//! Endpoint paths, the proxy-image host allow-list, and layout constants.

use std::path::PathBuf;
use std::time::Duration;

/// Per-request timeout for the sales-report fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-image load timeout. Loads exceeding this degrade to a placeholder.
pub const IMAGE_TIMEOUT: Duration = Duration::from_secs(15);

/// Fixed canvas card images are rasterized onto before JPEG encoding.
pub const CARD_CANVAS_WIDTH: u32 = 744;
pub const CARD_CANVAS_HEIGHT: u32 = 1044;

/// JPEG encoding quality for materialized card images.
pub const JPEG_QUALITY: u8 = 85;

// -- Page layout ------------------------------------------------------------

/// A4 portrait dimensions in mm.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

pub const MARGIN_MM: f32 = 15.0;

/// Cards per detail page.
pub const CARDS_PER_DETAIL_PAGE: usize = 4;

/// Hard page break interval for the breakdown table.
pub const BREAKDOWN_ROWS_PER_PAGE: usize = 30;

/// Card-name truncation limits (detail rows vs. breakdown table).
pub const DETAIL_NAME_MAX_CHARS: usize = 35;
pub const BREAKDOWN_NAME_MAX_CHARS: usize = 40;

// -- Endpoints --------------------------------------------------------------

/// CDN hosts whose images must be fetched through the proxy endpoint to
/// work around cross-origin pixel-read restrictions. Matching is
/// exact-or-subdomain on the URL host.
pub const PROXIED_IMAGE_HOSTS: &[&str] = &[
    "digitaloceanspaces.com",
    "onepiece-cardgame.com",
    "dotgg.gg",
    "pinimg.com",
    "pokemon.com",
    "tcgplayer.com",
    "limitlesstcg.com",
];

/// Build the sales-report endpoint URL for a list.
pub fn sales_report_url(base_url: &str, list_id: &str) -> String {
    format!(
        "{}/api/lists/{}/sales-report",
        base_url.trim_end_matches('/'),
        list_id
    )
}

/// Build the proxy-image endpoint URL wrapping `image_url`.
pub fn proxy_image_url(base_url: &str, image_url: &str) -> String {
    format!(
        "{}/api/proxy-image?url={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(image_url)
    )
}

/// Whether an image URL points at a host on the proxy allow-list.
///
/// Unparseable URLs are never proxied; the direct load will fail and
/// degrade to a placeholder like any other broken source.
pub fn requires_image_proxy(image_url: &str) -> bool {
    let Ok(parsed) = reqwest::Url::parse(image_url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    PROXIED_IMAGE_HOSTS
        .iter()
        .any(|h| host == *h || host.ends_with(&format!(".{h}")))
}

/// Default directory for downloaded reports: the platform downloads
/// directory, falling back to the current directory.
pub fn default_download_dir() -> PathBuf {
    if let Some(dir) = dirs::download_dir() {
        dir
    } else {
        PathBuf::from(".")
    }
}
