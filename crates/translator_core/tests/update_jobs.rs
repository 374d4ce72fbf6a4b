use std::path::PathBuf;
use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use translator_core::{
    update, AppState, DocumentId, Effect, JobId, Msg, ProgressSnapshot, SelectedFile, UiState,
};

const MB: u64 = 1024 * 1024;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(translator_logging::initialize_for_tests);
}

fn report() -> SelectedFile {
    SelectedFile::new("/tmp/report.pdf", "report.pdf", 2 * MB)
}

/// Picks `report.pdf`, chooses Russian and clicks start. Returns the submitted job id.
fn start_job(state: AppState) -> (AppState, JobId) {
    let (state, _) = update(state, Msg::FileChosen(report()));
    let (state, _) = update(state, Msg::LanguageChosen("ru".to_string()));
    let (state, effects) = update(state, Msg::StartClicked);
    let job_id = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SubmitUpload { job_id, .. } => Some(*job_id),
            _ => None,
        })
        .expect("submit effect");
    (state, job_id)
}

fn accept(state: AppState, job_id: JobId) -> AppState {
    let (state, _) = update(
        state,
        Msg::UploadAccepted {
            job_id,
            document_id: DocumentId::new("abc123"),
            total_pages: Some(5),
        },
    );
    state
}

fn poll(state: AppState, job_id: JobId, current: u32, total: u32) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::ProgressReported {
            job_id,
            snapshot: ProgressSnapshot::new(current, total),
        },
    )
}

#[test]
fn full_translation_scenario() {
    init_logging();
    let mut stages = Vec::new();

    let (state, _) = update(AppState::new(), Msg::FileChosen(report()));
    stages.push(state.stage());
    let (state, _) = update(state, Msg::LanguageChosen("RU".to_string()));
    let (state, effects) = update(state, Msg::StartClicked);
    assert_eq!(
        effects,
        vec![Effect::SubmitUpload {
            job_id: 1,
            file: report(),
            language: "RU".to_string(),
        }]
    );

    let (state, effects) = update(
        state,
        Msg::UploadAccepted {
            job_id: 1,
            document_id: DocumentId::new("abc123"),
            total_pages: Some(5),
        },
    );
    stages.push(state.stage());
    assert_eq!(
        effects,
        vec![Effect::StartPolling {
            job_id: 1,
            document_id: DocumentId::new("abc123"),
            interval: Duration::from_secs(1),
        }]
    );

    let (state, effects) = poll(state, 1, 1, 5);
    stages.push(state.stage());
    assert!(effects.is_empty());
    let (state, effects) = poll(state, 1, 3, 5);
    stages.push(state.stage());
    assert!(effects.is_empty());
    assert_eq!(state.view().current_page, Some(3));
    let (state, effects) = poll(state, 1, 5, 5);
    stages.push(state.stage());

    assert_eq!(
        stages,
        vec![
            UiState::FileSelected,
            UiState::Translating,
            UiState::Translating,
            UiState::Translating,
            UiState::Complete,
        ]
    );
    assert_eq!(
        effects,
        vec![
            Effect::StopPolling { job_id: 1 },
            Effect::DownloadResult {
                job_id: 1,
                url: "/media/abc123/translations/translated_abc123.pdf".to_string(),
                file_name: "translated_abc123.pdf".to_string(),
            },
        ]
    );

    let view = state.view();
    assert_eq!(view.progress_percent, 100.0);
    assert_eq!(
        view.download_url.as_deref(),
        Some("/media/abc123/translations/translated_abc123.pdf")
    );

    // A late duplicate of the final poll must not complete the job twice.
    let (_state, effects) = poll(state, 1, 5, 5);
    assert!(effects.is_empty());
}

#[test]
fn displayed_progress_never_decreases_for_growing_snapshots() {
    init_logging();
    let (state, job_id) = start_job(AppState::new());
    let mut state = accept(state, job_id);

    let mut last = state.view().progress_percent;
    for current in [0, 1, 1, 2, 4, 6, 9] {
        let (next, _) = poll(state, job_id, current, 10);
        let percent = next.view().progress_percent;
        assert!(percent >= last, "{percent} < {last}");
        last = percent;
        state = next;
    }
    assert_eq!(state.stage(), UiState::Translating);
}

#[test]
fn backward_progress_report_keeps_the_highest_page() {
    init_logging();
    let (state, job_id) = start_job(AppState::new());
    let state = accept(state, job_id);

    let (state, _) = poll(state, job_id, 3, 5);
    let shown = state.view().progress_percent;
    let (state, effects) = poll(state, job_id, 2, 5);

    assert!(effects.is_empty());
    assert_eq!(state.stage(), UiState::Translating);
    assert_eq!(state.view().current_page, Some(3));
    assert_eq!(state.view().progress_percent, shown);

    let (state, _) = poll(state, job_id, 4, 5);
    assert_eq!(state.view().current_page, Some(4));
}

#[test]
fn document_id_is_escaped_in_result_url_and_file_name() {
    init_logging();
    let (state, job_id) = start_job(AppState::new());
    let (state, _) = update(
        state,
        Msg::UploadAccepted {
            job_id,
            document_id: DocumentId::new("x/../../etc"),
            total_pages: Some(1),
        },
    );
    let (state, effects) = poll(state, job_id, 1, 1);

    assert_eq!(state.stage(), UiState::Complete);
    assert_eq!(
        effects,
        vec![
            Effect::StopPolling { job_id },
            Effect::DownloadResult {
                job_id,
                url: "/media/x%2F..%2F..%2Fetc/translations/translated_x%2F..%2F..%2Fetc.pdf"
                    .to_string(),
                file_name: "translated_x%2F..%2F..%2Fetc.pdf".to_string(),
            },
        ]
    );
    let done = state.completed().unwrap();
    assert!(!done.file_name.contains('/'));
}

#[test]
fn dot_document_id_is_rejected() {
    init_logging();
    let (state, job_id) = start_job(AppState::new());
    let (state, effects) = update(
        state,
        Msg::UploadAccepted {
            job_id,
            document_id: DocumentId::new(".."),
            total_pages: Some(1),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.stage(), UiState::AwaitingUpload);
    assert_eq!(state.active_job_id(), None);
    assert_eq!(
        state.view().error.as_deref(),
        Some("The service returned an invalid document id.")
    );
}

#[test]
fn unknown_page_total_does_not_complete() {
    init_logging();
    let (state, job_id) = start_job(AppState::new());
    let state = accept(state, job_id);

    let (state, effects) = poll(state, job_id, 0, 0);

    assert_eq!(state.stage(), UiState::Translating);
    assert!(effects.is_empty());
}

#[test]
fn start_requires_language() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FileChosen(report()));
    let (state, effects) = update(state, Msg::StartClicked);

    assert!(effects.is_empty());
    assert_eq!(state.stage(), UiState::FileSelected);
    assert!(state.view().error.is_some());
}

#[test]
fn start_rejects_unknown_language() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FileChosen(report()));
    let (state, _) = update(state, Msg::LanguageChosen("klingon".to_string()));
    let (state, effects) = update(state, Msg::StartClicked);

    assert!(effects.is_empty());
    assert!(state.view().error.unwrap().contains("KLINGON"));
}

#[test]
fn second_start_click_does_not_resubmit() {
    init_logging();
    let (state, _job_id) = start_job(AppState::new());

    let (state, effects) = update(state, Msg::StartClicked);

    assert!(effects.is_empty());
    assert_eq!(state.stage(), UiState::Translating);
}

#[test]
fn rejected_upload_returns_to_awaiting_upload() {
    init_logging();
    let (state, job_id) = start_job(AppState::new());

    let (state, effects) = update(
        state,
        Msg::UploadRejected {
            job_id,
            message: "Unsupported document".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.stage(), UiState::AwaitingUpload);
    assert_eq!(state.view().error.as_deref(), Some("Unsupported document"));
    assert!(state.active_job_id().is_none());
}

#[test]
fn poll_error_stops_polling_and_shows_message() {
    init_logging();
    let (state, job_id) = start_job(AppState::new());
    let state = accept(state, job_id);
    assert!(state.is_polling());

    let (state, effects) = update(
        state,
        Msg::ProgressFailed {
            job_id,
            message: "OCR service unavailable".to_string(),
        },
    );

    assert_eq!(effects, vec![Effect::StopPolling { job_id }]);
    assert_eq!(state.stage(), UiState::AwaitingUpload);
    assert_eq!(state.view().error.as_deref(), Some("OCR service unavailable"));
    assert!(!state.is_polling());
}

#[test]
fn cancel_after_two_polls_ignores_late_response() {
    init_logging();
    let (state, job_id) = start_job(AppState::new());
    let state = accept(state, job_id);
    let (state, _) = poll(state, job_id, 1, 5);
    let (state, _) = poll(state, job_id, 2, 5);

    let (state, effects) = update(state, Msg::CancelClicked);
    assert_eq!(effects, vec![Effect::StopPolling { job_id }]);
    assert_eq!(state.stage(), UiState::AwaitingUpload);
    assert!(state.selected_file().is_none());
    assert!(state.language().is_none());

    let before = state.clone();
    let (state, effects) = poll(state, job_id, 3, 5);
    assert!(effects.is_empty());
    assert_eq!(state, before);
    assert_eq!(state.view().error, None);
}

#[test]
fn cancel_during_submission_ignores_late_acceptance() {
    init_logging();
    let (state, job_id) = start_job(AppState::new());

    let (state, effects) = update(state, Msg::CancelClicked);
    assert!(effects.is_empty());

    let (state, effects) = update(
        state,
        Msg::UploadAccepted {
            job_id,
            document_id: DocumentId::new("late"),
            total_pages: None,
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.stage(), UiState::AwaitingUpload);
}

#[test]
fn new_job_ignores_messages_for_previous_job() {
    init_logging();
    let (state, first) = start_job(AppState::new());
    let state = accept(state, first);
    let (state, _) = update(state, Msg::CancelClicked);

    let (state, second) = start_job(state);
    assert_ne!(first, second);
    let state = accept(state, second);

    let (state, effects) = poll(state, first, 5, 5);
    assert!(effects.is_empty());
    assert_eq!(state.stage(), UiState::Translating);
    assert_eq!(state.active_job_id(), Some(second));
}

#[test]
fn reset_after_complete_clears_everything() {
    init_logging();
    let (state, job_id) = start_job(AppState::new());
    let state = accept(state, job_id);
    let (state, _) = poll(state, job_id, 5, 5);
    assert_eq!(state.stage(), UiState::Complete);

    let (state, effects) = update(state, Msg::ResetClicked);

    assert!(effects.is_empty());
    assert_eq!(state.stage(), UiState::AwaitingUpload);
    assert!(state.completed().is_none());
    assert_eq!(state.view().download_url, None);
}

#[test]
fn download_can_be_repeated_and_recorded() {
    init_logging();
    let (state, job_id) = start_job(AppState::new());
    let state = accept(state, job_id);
    let (state, _) = poll(state, job_id, 5, 5);

    let (state, effects) = update(state, Msg::DownloadClicked);
    assert_eq!(effects.len(), 1);
    assert!(matches!(effects[0], Effect::DownloadResult { .. }));

    let saved = PathBuf::from("/tmp/out/translated_abc123.pdf");
    let (state, _) = update(
        state,
        Msg::DownloadFinished {
            job_id,
            result: Ok(saved.clone()),
        },
    );
    assert_eq!(state.view().saved_to, Some(saved));
}

#[test]
fn file_choice_is_ignored_while_translating() {
    init_logging();
    let (state, _job_id) = start_job(AppState::new());

    let (state, _) = update(
        state,
        Msg::FileChosen(SelectedFile::new("/tmp/other.pdf", "other.pdf", MB)),
    );

    assert_eq!(state.stage(), UiState::Translating);
    assert_eq!(state.view().file_name.as_deref(), Some("report.pdf"));
}
