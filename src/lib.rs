//! Collection valuation reports for trading card lists.
//!
//! Fetches a per-list valuation payload (cards + recent sale prices)
//! from the platform backend, materializes each unique card image
//! (proxying blocked CDNs), and composes a paginated A4 PDF — cover
//! page, card-detail pages, and a breakdown table — held in memory as a
//! downloadable artifact.
//!
//! # Quick start
//!
//! ```no_run
//! use collection_report::{ReportGenerator, ReportSession};
//!
//! let generator = ReportGenerator::builder()
//!     .base_url("https://cards.example.com")
//!     .build()
//!     .unwrap();
//!
//! let mut session = ReportSession::new();
//! session.generate(&generator, "list-123", |state| {
//!     eprintln!("{state}");
//! });
//! let path = session.download().unwrap();
//! eprintln!("saved {}", path.display());
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod artifact;
pub mod config;
pub mod currency;
pub mod error;
pub mod fetcher;
pub mod images;
pub mod models;
pub mod pdf;
pub mod session;
pub mod state;

#[cfg(feature = "async")]
pub use async_client::AsyncReportGenerator;
pub use artifact::ReportArtifact;
pub use error::{ReportError, Result};
pub use fetcher::SalesReportClient;
pub use images::{HttpImageSource, ImageSource};
pub use session::ReportSession;
pub use state::{ProgressEvent, ReportState};

use std::fmt;
use std::time::Duration;

use models::CollectionReportData;

// ---------------------------------------------------------------------------
// ReportGeneratorBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`ReportGenerator`].
///
/// Use [`ReportGenerator::builder()`] to obtain a builder, chain
/// configuration methods, and call
/// [`build()`](ReportGeneratorBuilder::build) to create the generator.
pub struct ReportGeneratorBuilder {
    base_url: Option<String>,
    fetch_timeout: Duration,
    image_timeout: Duration,
    image_source: Option<Box<dyn ImageSource>>,
}

impl Default for ReportGeneratorBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            fetch_timeout: config::FETCH_TIMEOUT,
            image_timeout: config::IMAGE_TIMEOUT,
            image_source: None,
        }
    }
}

impl ReportGeneratorBuilder {
    /// Set the backend base URL (required). The sales-report and
    /// proxy-image endpoints live under it.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the sales-report request timeout. Defaults to 30 seconds.
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the per-image load timeout. Defaults to 15 seconds; loads
    /// exceeding it degrade that card to a placeholder.
    pub fn image_timeout(mut self, timeout: Duration) -> Self {
        self.image_timeout = timeout;
        self
    }

    /// Replace the HTTP image source with a custom one.
    pub fn image_source(mut self, source: Box<dyn ImageSource>) -> Self {
        self.image_source = Some(source);
        self
    }

    /// Build the generator.
    pub fn build(self) -> Result<ReportGenerator> {
        let base_url = self
            .base_url
            .ok_or_else(|| ReportError::InvalidArgument("base_url is required".into()))?;
        let image_source = self.image_source.unwrap_or_else(|| {
            Box::new(HttpImageSource::new(base_url.clone(), self.image_timeout))
        });
        Ok(ReportGenerator {
            client: SalesReportClient::new(base_url, self.fetch_timeout),
            image_source,
        })
    }
}

// ---------------------------------------------------------------------------
// ReportGenerator
// ---------------------------------------------------------------------------

/// The report-generation pipeline: fetch, materialize images, compose.
///
/// Stateless between calls — per-generation state lives in the
/// [`ReportSession`] that drives it. Created via
/// [`ReportGenerator::builder()`].
pub struct ReportGenerator {
    client: SalesReportClient,
    image_source: Box<dyn ImageSource>,
}

impl ReportGenerator {
    /// Create a new builder for configuring the generator.
    pub fn builder() -> ReportGeneratorBuilder {
        ReportGeneratorBuilder::default()
    }

    /// Generate the report for a list.
    pub fn generate(&self, list_id: &str) -> Result<ReportArtifact> {
        self.generate_with_events(list_id, &mut |_| {})
    }

    /// Generate the report, emitting a [`ProgressEvent`] at each phase
    /// boundary and per materialized image.
    pub fn generate_with_events(
        &self,
        list_id: &str,
        on_event: &mut dyn FnMut(ProgressEvent),
    ) -> Result<ReportArtifact> {
        on_event(ProgressEvent::FetchStarted);
        let data = self.client.fetch_sales_report(list_id)?;
        self.generate_from_data(&data, on_event)
    }

    /// The lower half of the pipeline: materialize images for an
    /// already-fetched payload and compose the document.
    pub fn generate_from_data(
        &self,
        data: &CollectionReportData,
        on_event: &mut dyn FnMut(ProgressEvent),
    ) -> Result<ReportArtifact> {
        let total = images::unique_sources(&data.cards).len();
        on_event(ProgressEvent::ImagesStarted { total });
        let mut forward = |current: usize, total: usize| {
            on_event(ProgressEvent::ImageMaterialized { current, total });
        };
        let cache = images::materialize_images(&data.cards, self.image_source.as_ref(), &mut forward);

        on_event(ProgressEvent::PdfStarted);
        let bytes = pdf::compose(data, &cache)?;
        log::debug!(
            "composed report for {} ({} cards, {} bytes)",
            data.list_name,
            data.cards.len(),
            bytes.len()
        );
        Ok(ReportArtifact::new(data.list_name.clone(), bytes))
    }

    /// The sales-report client this generator fetches with.
    pub fn client(&self) -> &SalesReportClient {
        &self.client
    }
}

impl fmt::Display for ReportGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReportGenerator(base_url={})", self.client.base_url())
    }
}
