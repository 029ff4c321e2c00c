//! Sales-data fetcher: one request per report generation, no retries.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::config;
use crate::error::{ReportError, Result};
use crate::models::CollectionReportData;

// ---------------------------------------------------------------------------
// SalesReportClient
// ---------------------------------------------------------------------------

/// Fetches the per-list valuation payload from the sales-report endpoint.
///
/// A single attempt per generation cycle: any failure is terminal for
/// that report and surfaces to the caller unchanged.
pub struct SalesReportClient {
    base_url: String,
    timeout: Duration,
    client: OnceLock<Client>,
}

impl SalesReportClient {
    /// Create a client against the given backend base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
            client: OnceLock::new(),
        }
    }

    /// The backend base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
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

    /// Fetch the valuation payload for a list.
    ///
    /// # Errors
    ///
    /// * [`ReportError::Fetch`] on a non-2xx response, with the
    ///   server-provided `error` message when the body carries one.
    /// * [`ReportError::NoData`] when the fetch succeeds but the list has
    ///   no cards with sales data.
    /// * [`ReportError::Http`] / [`ReportError::Json`] on transport or
    ///   decode failures.
    pub fn fetch_sales_report(&self, list_id: &str) -> Result<CollectionReportData> {
        let url = config::sales_report_url(&self.base_url, list_id);
        log::debug!("fetching sales report from {url}");

        let resp = self.client().get(&url).send()?;
        let status = resp.status();
        let body = resp.text()?;
        parse_report_response(status, &body)
    }
}

// ---------------------------------------------------------------------------
// Response handling
// ---------------------------------------------------------------------------

/// Turn a raw status/body pair into a report payload or a terminal error.
///
/// Split from the network call so the contract is testable offline.
pub fn parse_report_response(status: StatusCode, body: &str) -> Result<CollectionReportData> {
    if !status.is_success() {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.as_str())
                    .map(|s| s.to_string())
            })
            .unwrap_or_else(|| format!("Failed to generate report (HTTP {})", status.as_u16()));
        return Err(ReportError::Fetch(message));
    }

    let data: CollectionReportData = serde_json::from_str(body)?;
    if data.cards.is_empty() {
        return Err(ReportError::NoData);
    }
    Ok(data)
}
