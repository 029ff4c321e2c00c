//! State machine tests: the reducer advances phases strictly in order
//! and the phase field acts as the mutual-exclusion flag.

use collection_report::{ProgressEvent, ReportArtifact, ReportState};

fn sample_artifact() -> ReportArtifact {
    ReportArtifact::new("My OP Collection", b"%PDF-1.3 stub".to_vec())
}

// ---------------------------------------------------------------------------
// Legal transitions
// ---------------------------------------------------------------------------

#[test]
fn default_state_is_idle() {
    assert_eq!(ReportState::default(), ReportState::Idle);
}

#[test]
fn phases_advance_in_order() {
    let state = ReportState::Idle;
    let state = state.advance(&ProgressEvent::FetchStarted);
    assert_eq!(state, ReportState::Fetching);

    let state = state.advance(&ProgressEvent::ImagesStarted { total: 2 });
    assert_eq!(state, ReportState::GeneratingImages { current: 0, total: 2 });

    let state = state.advance(&ProgressEvent::ImageMaterialized { current: 1, total: 2 });
    let state = state.advance(&ProgressEvent::ImageMaterialized { current: 2, total: 2 });
    assert_eq!(state, ReportState::GeneratingImages { current: 2, total: 2 });

    let state = state.advance(&ProgressEvent::PdfStarted);
    assert_eq!(state, ReportState::GeneratingPdf);
}

#[test]
fn ready_and_error_states_can_restart() {
    let from_ready = ReportState::Ready(sample_artifact()).advance(&ProgressEvent::FetchStarted);
    assert_eq!(from_ready, ReportState::Fetching);

    let from_error =
        ReportState::Error("boom".to_string()).advance(&ProgressEvent::FetchStarted);
    assert_eq!(from_error, ReportState::Fetching);
}

// ---------------------------------------------------------------------------
// Illegal transitions
// ---------------------------------------------------------------------------

#[test]
fn phases_cannot_be_skipped() {
    // PDF cannot start before images have.
    let state = ReportState::Fetching.advance(&ProgressEvent::PdfStarted);
    assert_eq!(state, ReportState::Fetching);

    // Images cannot start from idle.
    let state = ReportState::Idle.advance(&ProgressEvent::ImagesStarted { total: 3 });
    assert_eq!(state, ReportState::Idle);
}

#[test]
fn a_new_generation_cannot_start_mid_flight() {
    let state = ReportState::GeneratingPdf.advance(&ProgressEvent::FetchStarted);
    assert_eq!(state, ReportState::GeneratingPdf);

    let state = ReportState::GeneratingImages { current: 1, total: 4 }
        .advance(&ProgressEvent::FetchStarted);
    assert_eq!(state, ReportState::GeneratingImages { current: 1, total: 4 });
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

#[test]
fn can_start_only_outside_in_flight_phases() {
    assert!(ReportState::Idle.can_start());
    assert!(ReportState::Ready(sample_artifact()).can_start());
    assert!(ReportState::Error("boom".to_string()).can_start());

    assert!(!ReportState::Fetching.can_start());
    assert!(!ReportState::GeneratingImages { current: 0, total: 1 }.can_start());
    assert!(!ReportState::GeneratingPdf.can_start());
}

#[test]
fn is_loading_matches_in_flight_phases() {
    assert!(ReportState::Fetching.is_loading());
    assert!(ReportState::GeneratingImages { current: 0, total: 1 }.is_loading());
    assert!(ReportState::GeneratingPdf.is_loading());

    assert!(!ReportState::Idle.is_loading());
    assert!(!ReportState::Ready(sample_artifact()).is_loading());
    assert!(!ReportState::Error("boom".to_string()).is_loading());
}

#[test]
fn accessors_expose_terminal_payloads() {
    let ready = ReportState::Ready(sample_artifact());
    assert_eq!(ready.artifact().unwrap().list_name(), "My OP Collection");
    assert!(ready.is_terminal());

    let error = ReportState::Error("boom".to_string());
    assert_eq!(error.error_message(), Some("boom"));
    assert!(error.is_terminal());

    assert!(ReportState::Idle.artifact().is_none());
    assert!(ReportState::Idle.error_message().is_none());
}
