//! Generation state machine: one tagged union instead of a pile of
//! booleans, advanced by a reducer so impossible combinations cannot be
//! represented.

use std::fmt;

use crate::artifact::ReportArtifact;

// ---------------------------------------------------------------------------
// ProgressEvent
// ---------------------------------------------------------------------------

/// In-progress notifications emitted while a report is being generated.
///
/// Terminal outcomes (`Ready`/`Error`) are not events; the session derives
/// them from the generation result so an error can interrupt any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    FetchStarted,
    ImagesStarted { total: usize },
    ImageMaterialized { current: usize, total: usize },
    PdfStarted,
}

// ---------------------------------------------------------------------------
// ReportState
// ---------------------------------------------------------------------------

/// Phase of one report-generation cycle.
///
/// `Idle` is both the initial state and the state after a reset. `Ready`
/// owns the artifact, so dropping or resetting the state releases the
/// PDF bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ReportState {
    #[default]
    Idle,
    Fetching,
    GeneratingImages {
        current: usize,
        total: usize,
    },
    GeneratingPdf,
    Ready(ReportArtifact),
    Error(String),
}

impl ReportState {
    /// Whether a new generation may start. Acts as the mutual-exclusion
    /// flag: exactly one generation is in flight per session.
    pub fn can_start(&self) -> bool {
        matches!(
            self,
            ReportState::Idle | ReportState::Ready(_) | ReportState::Error(_)
        )
    }

    /// Whether generation is in flight (blocks closing the panel).
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            ReportState::Fetching
                | ReportState::GeneratingImages { .. }
                | ReportState::GeneratingPdf
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ReportState::Ready(_) | ReportState::Error(_))
    }

    /// The generated artifact, when ready.
    pub fn artifact(&self) -> Option<&ReportArtifact> {
        match self {
            ReportState::Ready(artifact) => Some(artifact),
            _ => None,
        }
    }

    /// The failure message, when in the error state.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ReportState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Reducer: apply one progress event.
    ///
    /// Phases advance strictly in order — fetch, images, pdf. An event
    /// that is not legal for the current phase leaves the state
    /// unchanged, so a stray notification can never skip a phase or
    /// resurrect a finished cycle.
    pub fn advance(self, event: &ProgressEvent) -> ReportState {
        match (self, event) {
            (state, ProgressEvent::FetchStarted) if state.can_start() => ReportState::Fetching,
            (ReportState::Fetching, ProgressEvent::ImagesStarted { total }) => {
                ReportState::GeneratingImages {
                    current: 0,
                    total: *total,
                }
            }
            (
                ReportState::GeneratingImages { .. },
                ProgressEvent::ImageMaterialized { current, total },
            ) => ReportState::GeneratingImages {
                current: *current,
                total: *total,
            },
            (ReportState::GeneratingImages { .. }, ProgressEvent::PdfStarted) => {
                ReportState::GeneratingPdf
            }
            (state, _) => state,
        }
    }
}

impl fmt::Display for ReportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportState::Idle => write!(f, "idle"),
            ReportState::Fetching => write!(f, "fetching sales data"),
            ReportState::GeneratingImages { current, total } => {
                write!(f, "loading images ({current}/{total})")
            }
            ReportState::GeneratingPdf => write!(f, "generating PDF"),
            ReportState::Ready(_) => write!(f, "ready"),
            ReportState::Error(message) => write!(f, "error: {message}"),
        }
    }
}
