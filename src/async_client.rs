//! Async wrapper around [`ReportGenerator`] for use in async runtimes
//! (Tokio, etc.).
//!
//! Generation is blocking end to end (network fetch, sequential image
//! decodes, PDF assembly), so it is dispatched to the blocking thread
//! pool via [`tokio::task::spawn_blocking`], keeping the async event
//! loop free. The generator is immutable, so no lock is needed.
//!
//! # Example
//!
//! ```no_run
//! # use collection_report::AsyncReportGenerator;
//! # async fn example() -> collection_report::Result<()> {
//! let generator = AsyncReportGenerator::builder()
//!     .base_url("https://cards.example.com")
//!     .build()
//!     .await?;
//!
//! let artifact = generator.generate("list-123").await?;
//! eprintln!("{} ({} bytes)", artifact.file_name(), artifact.len());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::error::{ReportError, Result};
use crate::images::ImageSource;
use crate::{ReportArtifact, ReportGenerator};

// ---------------------------------------------------------------------------
// AsyncReportGeneratorBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncReportGenerator`].
#[derive(Default)]
pub struct AsyncReportGeneratorBuilder {
    base_url: Option<String>,
    fetch_timeout: Option<Duration>,
    image_timeout: Option<Duration>,
    image_source: Option<Box<dyn ImageSource>>,
}

impl AsyncReportGeneratorBuilder {
    /// Set the backend base URL (required).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the sales-report request timeout.
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Set the per-image load timeout.
    pub fn image_timeout(mut self, timeout: Duration) -> Self {
        self.image_timeout = Some(timeout);
        self
    }

    /// Replace the HTTP image source with a custom one.
    pub fn image_source(mut self, source: Box<dyn ImageSource>) -> Self {
        self.image_source = Some(source);
        self
    }

    /// Build the async generator on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncReportGenerator> {
        tokio::task::spawn_blocking(move || {
            let mut builder = ReportGenerator::builder();
            if let Some(base_url) = self.base_url {
                builder = builder.base_url(base_url);
            }
            if let Some(timeout) = self.fetch_timeout {
                builder = builder.fetch_timeout(timeout);
            }
            if let Some(timeout) = self.image_timeout {
                builder = builder.image_timeout(timeout);
            }
            if let Some(source) = self.image_source {
                builder = builder.image_source(source);
            }
            let generator = builder.build()?;
            Ok(AsyncReportGenerator {
                inner: Arc::new(generator),
            })
        })
        .await
        .map_err(|e| ReportError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncReportGenerator
// ---------------------------------------------------------------------------

/// Async wrapper around [`ReportGenerator`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`].
pub struct AsyncReportGenerator {
    inner: Arc<ReportGenerator>,
}

impl AsyncReportGenerator {
    /// Create a new builder for configuring the async generator.
    pub fn builder() -> AsyncReportGeneratorBuilder {
        AsyncReportGeneratorBuilder::default()
    }

    /// Run a sync generator operation on the blocking thread pool.
    ///
    /// The closure receives a `&ReportGenerator` reference and should
    /// return a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ReportGenerator) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let generator = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&generator))
            .await
            .map_err(|e| ReportError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Generate the report for a list.
    ///
    /// Convenience wrapper around [`run()`](Self::run) for
    /// [`ReportGenerator::generate()`].
    pub async fn generate(&self, list_id: &str) -> Result<ReportArtifact> {
        let list_id = list_id.to_string();
        self.run(move |g| g.generate(&list_id)).await
    }
}
