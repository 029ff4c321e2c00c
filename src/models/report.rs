use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CollectionReportData — Per-list valuation payload (server-provided)
// ---------------------------------------------------------------------------

/// The full valuation payload for one list, as returned by the
/// sales-report endpoint. Consumed as-is: totals and averages are
/// computed server-side and never re-derived here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionReportData {
    pub list_name: String,
    pub generated_at: DateTime<Utc>,
    /// Unique card count.
    pub total_cards: u32,
    /// Sum of owned quantities.
    pub total_quantity: u32,
    pub successful_lookups: u32,
    pub failed_lookups: u32,
    pub total_value: f64,
    #[serde(rename = "value80Percent")]
    pub value_80_percent: f64,
    #[serde(rename = "value70Percent")]
    pub value_70_percent: f64,
    pub cards: Vec<CardValuation>,
}

// ---------------------------------------------------------------------------
// CardValuation — One card's valuation row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardValuation {
    pub card_code: String,
    pub card_name: String,
    /// Image URL. The de-duplication key for image loading: multiple
    /// variant codes can share one image, so never key on `card_code`.
    pub card_src: String,
    pub quantity: u32,
    /// Up to 3 most-recent sales, newest first.
    #[serde(default)]
    pub last_sales: Vec<SaleRecord>,
    /// Average of the recorded recent sales; `None` when no sales exist.
    #[serde(rename = "top3Average", default)]
    pub top3_average: Option<f64>,
    /// `top3_average * quantity`, 0 when there is no average.
    pub subtotal: f64,
    /// Lookup failure reason, if the price lookup failed server-side.
    #[serde(default)]
    pub error: Option<String>,
}

impl CardValuation {
    /// Whether the card carries an image URL at all.
    pub fn has_image_source(&self) -> bool {
        !self.card_src.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SaleRecord — Single recorded marketplace sale
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub order_date: String,
    pub condition: String,
    pub purchase_price: f64,
}
