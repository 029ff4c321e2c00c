//! Shared fixtures for the collection-report integration tests.
//!
//! Provides sample valuation payloads plus stub [`ImageSource`]
//! implementations so the materializer and the full pipeline can run
//! without a network.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use collection_report::currency::round_currency;
use collection_report::images::ImageSource;
use collection_report::models::{CardValuation, CollectionReportData, SaleRecord};
use collection_report::{ReportError, Result};
use image::{ImageOutputFormat, Rgb, RgbImage};

/// A card row with its subtotal derived the way the server derives it.
pub fn sample_card(
    code: &str,
    name: &str,
    src: &str,
    quantity: u32,
    top3_average: Option<f64>,
) -> CardValuation {
    let subtotal = top3_average
        .map(|avg| round_currency(avg * quantity as f64))
        .unwrap_or(0.0);
    CardValuation {
        card_code: code.to_string(),
        card_name: name.to_string(),
        card_src: src.to_string(),
        quantity,
        last_sales: Vec::new(),
        top3_average,
        subtotal,
        error: None,
    }
}

pub fn sample_sales() -> Vec<SaleRecord> {
    vec![
        SaleRecord {
            order_date: "2026-07-28".to_string(),
            condition: "Near Mint".to_string(),
            purchase_price: 15.5,
        },
        SaleRecord {
            order_date: "2026-07-21".to_string(),
            condition: "Lightly Played".to_string(),
            purchase_price: 14.75,
        },
        SaleRecord {
            order_date: "2026-07-14".to_string(),
            condition: "Near Mint".to_string(),
            purchase_price: 14.75,
        },
    ]
}

/// Assemble a payload whose totals satisfy the server contract
/// (`totalValue == sum of subtotals`, 80%/70% rounded to cents).
pub fn sample_report(list_name: &str, cards: Vec<CardValuation>) -> CollectionReportData {
    let total_value = round_currency(cards.iter().map(|c| c.subtotal).sum());
    let successful_lookups = cards.iter().filter(|c| c.top3_average.is_some()).count() as u32;
    CollectionReportData {
        list_name: list_name.to_string(),
        generated_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
        total_cards: cards.len() as u32,
        total_quantity: cards.iter().map(|c| c.quantity).sum(),
        successful_lookups,
        failed_lookups: cards.len() as u32 - successful_lookups,
        total_value,
        value_80_percent: round_currency(total_value * 0.80),
        value_70_percent: round_currency(total_value * 0.70),
        cards,
    }
}

/// A small decodable image (PNG) for stub sources. Deliberately wide,
/// so the aspect-fit rasterization letterboxes it and the white canvas
/// background stays visible above and below.
pub fn tiny_card_png() -> Vec<u8> {
    let img = RgbImage::from_pixel(60, 30, Rgb([140, 36, 36]));
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, ImageOutputFormat::Png)
        .unwrap();
    buf.into_inner()
}

// ---------------------------------------------------------------------------
// Stub image sources
// ---------------------------------------------------------------------------

/// Records every requested URL and serves the same tiny PNG for all of
/// them. Clones share the request log.
#[derive(Clone)]
pub struct CountingImageSource {
    bytes: Vec<u8>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CountingImageSource {
    pub fn new() -> Self {
        Self {
            bytes: tiny_card_png(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl ImageSource for CountingImageSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        Ok(self.bytes.clone())
    }
}

/// Fails every load, standing in for timeouts and broken hosts.
pub struct FailingImageSource;

impl ImageSource for FailingImageSource {
    fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
        Err(ReportError::Image("simulated load timeout".to_string()))
    }
}
