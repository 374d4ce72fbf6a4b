use pretty_assertions::assert_eq;
use translator_core::{
    find_language, truncate_display_name, update, validate_file, AppState, ClientConfig,
    DocumentId, Msg, ProgressMapping, ProgressSnapshot, ResultPath, SelectedFile, UiState,
    UploadLimits, ValidationError,
};

const MB: u64 = 1024 * 1024;

#[test]
fn accepts_supported_file_within_limit() {
    let limits = UploadLimits::default();
    let file = SelectedFile::new("/tmp/report.pdf", "report.pdf", 2 * MB);

    assert_eq!(validate_file(&file, &limits), Ok(()));
}

#[test]
fn extension_match_is_case_insensitive() {
    let limits = UploadLimits::default();
    let file = SelectedFile::new("/tmp/REPORT.PDF", "REPORT.PDF", MB);

    assert_eq!(file.extension().as_deref(), Some(".pdf"));
    assert_eq!(validate_file(&file, &limits), Ok(()));
}

#[test]
fn size_is_checked_before_format() {
    let limits = UploadLimits {
        max_size_mb: 10,
        supported_formats: vec![".pdf".to_string()],
    };
    let file = SelectedFile::new("/tmp/huge.exe", "huge.exe", 20 * MB);

    let err = validate_file(&file, &limits).unwrap_err();
    assert_eq!(
        err,
        ValidationError::TooLarge {
            max_size_mb: 10,
            size_bytes: 20 * MB
        }
    );
    assert!(err.to_string().contains("10 MB"));
}

#[test]
fn file_exactly_at_limit_is_accepted() {
    let limits = UploadLimits::default();
    let file = SelectedFile::new("/tmp/edge.pdf", "edge.pdf", 10 * MB);

    assert!(validate_file(&file, &limits).is_ok());
}

#[test]
fn unsupported_format_lists_supported_formats() {
    let limits = UploadLimits::default();
    let file = SelectedFile::new("/tmp/notes.txt", "notes.txt", 1024);

    let err = validate_file(&file, &limits).unwrap_err();
    assert!(matches!(err, ValidationError::UnsupportedFormat { .. }));
    assert!(err.to_string().contains(".pdf, .docx"));
}

#[test]
fn name_without_extension_is_unsupported() {
    let limits = UploadLimits::default();
    let file = SelectedFile::new("/tmp/README", "README", 1024);

    assert_eq!(file.extension(), None);
    assert!(validate_file(&file, &limits).is_err());
}

#[test]
fn oversized_selection_stays_awaiting_upload() {
    let (state, effects) = update(
        AppState::new(),
        Msg::FileChosen(SelectedFile::new("/tmp/big.pdf", "big.pdf", 20 * MB)),
    );

    assert_eq!(state.stage(), UiState::AwaitingUpload);
    assert!(state.selected_file().is_none());
    assert!(effects.is_empty());
    assert!(state.view().error.unwrap().contains("10 MB"));
}

#[test]
fn valid_selection_clears_prior_error() {
    let (state, _) = update(
        AppState::new(),
        Msg::FileChosen(SelectedFile::new("/tmp/notes.txt", "notes.txt", 10)),
    );
    assert!(state.view().error.is_some());

    let (state, _) = update(
        state,
        Msg::FileChosen(SelectedFile::new("/tmp/report.docx", "report.docx", 10)),
    );
    assert_eq!(state.stage(), UiState::FileSelected);
    assert_eq!(state.view().error, None);
    assert_eq!(state.view().file_name.as_deref(), Some("report.docx"));
}

#[test]
fn configured_limits_are_honoured() {
    let config = ClientConfig {
        limits: UploadLimits {
            max_size_mb: 1,
            supported_formats: vec![".png".to_string()],
        },
        ..ClientConfig::default()
    };
    let (state, _) = update(
        AppState::with_config(config),
        Msg::FileChosen(SelectedFile::new("/tmp/scan.png", "scan.png", 512 * 1024)),
    );

    assert_eq!(state.stage(), UiState::FileSelected);
}

#[test]
fn truncation_keeps_prefix_and_extension() {
    let name = "IJAAS-SCOPUS-very-long-name.pdf";
    let shown = truncate_display_name(name, 15, 7);

    assert_eq!(shown, "IJAAS-SC..ame.pdf");
    assert!(shown.starts_with(&name[..8]));
    assert!(shown.ends_with(&name[name.len() - 7..]));
    assert!(shown.chars().count() <= 17);
}

#[test]
fn short_names_are_not_truncated() {
    assert_eq!(truncate_display_name("report.pdf", 15, 7), "report.pdf");
    assert_eq!(truncate_display_name("exactly15chars.", 15, 7), "exactly15chars.");
}

#[test]
fn truncation_counts_characters_not_bytes() {
    let shown = truncate_display_name("перевод-документа-длинный.pdf", 15, 7);
    assert_eq!(shown, "перевод-..ный.pdf");
}

#[test]
fn progress_mapping_starts_at_floor_and_ends_at_full() {
    let mapping = ProgressMapping::default();

    assert_eq!(mapping.percent(None), 40.0);
    assert_eq!(mapping.percent(Some(ProgressSnapshot::new(0, 5))), 40.0);
    assert_eq!(mapping.percent(Some(ProgressSnapshot::new(5, 5))), 100.0);
    assert_eq!(mapping.percent(Some(ProgressSnapshot::new(7, 5))), 100.0);
    assert_eq!(mapping.percent(Some(ProgressSnapshot::new(3, 0))), 40.0);
}

#[test]
fn result_path_uses_document_id_and_extension() {
    let path = ResultPath::default();
    let url = path.render(&DocumentId::new("abc123"), ".pdf");

    assert_eq!(url, "/media/abc123/translations/translated_abc123.pdf");
}

#[test]
fn result_path_encodes_document_id_as_one_segment() {
    let path = ResultPath::default();

    assert_eq!(
        path.render(&DocumentId::new("x/../../etc"), ".pdf"),
        "/media/x%2F..%2F..%2Fetc/translations/translated_x%2F..%2F..%2Fetc.pdf"
    );
    assert_eq!(
        path.render(&DocumentId::new("a?b#c"), ".docx"),
        "/media/a%3Fb%23c/translations/translated_a%3Fb%23c.docx"
    );
}

#[test]
fn language_lookup_ignores_case() {
    assert_eq!(find_language("ru").map(|l| l.code), Some("RU"));
    assert_eq!(find_language(" pt-br ").map(|l| l.code), Some("PT-BR"));
    assert!(find_language("XX").is_none());
}
