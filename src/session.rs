//! Report session: the state-holding shell a host UI binds to.
//!
//! Owns the [`ReportState`] machine and exposes the panel actions —
//! generate, regenerate, download, reset — with the same guards the
//! drawer UI enforces: no second generation while one is in flight, no
//! closing mid-generation.

use std::mem;
use std::path::{Path, PathBuf};

use crate::artifact::ReportArtifact;
use crate::config;
use crate::error::{ReportError, Result};
use crate::state::{ProgressEvent, ReportState};
use crate::ReportGenerator;

// ---------------------------------------------------------------------------
// ReportSession
// ---------------------------------------------------------------------------

/// One report panel's worth of state. Exactly one generation is in
/// flight at a time, enforced by the state machine's phase.
#[derive(Debug, Default)]
pub struct ReportSession {
    state: ReportState,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ReportState {
        &self.state
    }

    /// Whether generation is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Whether the panel may be closed. Closing is suppressed while a
    /// generation is in flight — in-flight work cannot be cancelled.
    pub fn can_close(&self) -> bool {
        !self.state.is_loading()
    }

    /// Generate (or regenerate) the report for a list.
    ///
    /// Ignored unless the session is idle, ready, or errored — the
    /// "Generate" button is inert while work is in flight. The observer
    /// is invoked on every state transition, ending with `Ready` or
    /// `Error`. Retry after an error restarts from scratch; nothing is
    /// resumed.
    pub fn generate<F>(
        &mut self,
        generator: &ReportGenerator,
        list_id: &str,
        observer: F,
    ) -> &ReportState
    where
        F: FnMut(&ReportState),
    {
        self.generate_with(
            |events| generator.generate_with_events(list_id, events),
            observer,
        )
    }

    /// Lower-level driver: run any generation closure under the state
    /// machine. This is the seam the tests (and async hosts) use.
    pub fn generate_with<G, F>(&mut self, run: G, mut observer: F) -> &ReportState
    where
        G: FnOnce(&mut dyn FnMut(ProgressEvent)) -> Result<ReportArtifact>,
        F: FnMut(&ReportState),
    {
        if !self.state.can_start() {
            log::warn!("report generation already in flight; request ignored");
            return &self.state;
        }

        // A regeneration discards the previous artifact here.
        let mut state = mem::take(&mut self.state);
        let result = run(&mut |event| {
            state = mem::take(&mut state).advance(&event);
            observer(&state);
        });

        self.state = match result {
            Ok(artifact) => ReportState::Ready(artifact),
            Err(err) => {
                log::error!("report generation failed: {err}");
                ReportState::Error(err.to_string())
            }
        };
        observer(&self.state);
        &self.state
    }

    /// Return to `Idle`, dropping any held artifact. Ignored while
    /// generation is in flight.
    pub fn reset(&mut self) {
        if self.state.is_loading() {
            return;
        }
        self.state = ReportState::Idle;
    }

    /// The generated artifact, when ready.
    pub fn artifact(&self) -> Option<&ReportArtifact> {
        self.state.artifact()
    }

    /// Write the ready report into `dir` under its download filename.
    pub fn download_to(&self, dir: &Path) -> Result<PathBuf> {
        let artifact = self
            .state
            .artifact()
            .ok_or_else(|| ReportError::InvalidArgument("no report ready to download".into()))?;
        artifact.write_to_dir(dir)
    }

    /// Write the ready report into the platform downloads directory.
    pub fn download(&self) -> Result<PathBuf> {
        self.download_to(&config::default_download_dir())
    }
}
