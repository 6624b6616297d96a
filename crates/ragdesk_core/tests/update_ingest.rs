use pretty_assertions::assert_eq;
use ragdesk_core::{
    update, AppState, Effect, IngestResult, IngestStatus, IngestSubmission, Msg, SelectedFile,
    DEFAULT_SOURCE,
};

fn manual_pdf() -> SelectedFile {
    SelectedFile {
        name: "manual.pdf".to_string(),
        bytes: b"%PDF-1.4".to_vec(),
    }
}

fn submit(state: AppState) -> (AppState, Vec<Effect>) {
    update(state, Msg::IngestSubmitted)
}

fn ingest_id(effects: &[Effect]) -> u64 {
    match effects {
        [Effect::Ingest { request_id, .. }] => *request_id,
        other => panic!("expected one ingest effect, got {other:?}"),
    }
}

#[test]
fn nothing_to_ingest_is_noop() {
    let (mut state, _) = update(AppState::new(), Msg::IngestSourceChanged("Docs".into()));
    assert!(state.consume_dirty());
    let (mut next, effects) = submit(state);

    assert!(effects.is_empty());
    assert_eq!(next.view().ingest.status, None);
    assert!(!next.consume_dirty());
}

#[test]
fn empty_source_falls_back_to_default_label() {
    let (state, _) = update(AppState::new(), Msg::IngestTextChanged("fever".into()));
    let (state, _) = update(state, Msg::IngestSourceChanged(String::new()));
    let (state, effects) = submit(state);

    assert_eq!(
        effects,
        vec![Effect::Ingest {
            request_id: 1,
            submission: IngestSubmission {
                text: Some("fever".to_string()),
                file: None,
                source: DEFAULT_SOURCE.to_string(),
            },
        }]
    );
    assert_eq!(state.view().ingest.status, Some(IngestStatus::Processing));
}

#[test]
fn whitespace_source_label_is_sent_verbatim() {
    let (state, _) = update(AppState::new(), Msg::IngestTextChanged("fever".into()));
    let (state, _) = update(state, Msg::IngestSourceChanged("   ".into()));
    let (_state, effects) = submit(state);

    match effects.as_slice() {
        [Effect::Ingest { submission, .. }] => assert_eq!(submission.source, "   "),
        other => panic!("expected one ingest effect, got {other:?}"),
    }
}

#[test]
fn text_and_file_are_submitted_together() {
    let (state, _) = update(AppState::new(), Msg::IngestTextChanged("notes".into()));
    let (state, _) = update(state, Msg::IngestSourceChanged(" Cardiology ".into()));
    let (state, _) = update(state, Msg::IngestFileSelected(Some(manual_pdf())));
    let (_state, effects) = submit(state);

    assert_eq!(
        effects,
        vec![Effect::Ingest {
            request_id: 1,
            submission: IngestSubmission {
                text: Some("notes".to_string()),
                file: Some(manual_pdf()),
                source: " Cardiology ".to_string(),
            },
        }]
    );
}

#[test]
fn success_clears_text_and_file() {
    let (state, _) = update(AppState::new(), Msg::IngestTextChanged("notes".into()));
    let (state, _) = update(state, Msg::IngestFileSelected(Some(manual_pdf())));
    let (state, effects) = submit(state);
    let (state, _) = update(
        state,
        Msg::IngestCompleted {
            request_id: ingest_id(&effects),
            result: IngestResult::Succeeded,
        },
    );

    let ingest = state.view().ingest;
    assert_eq!(ingest.text, "");
    assert_eq!(ingest.file_name, None);
    assert_eq!(ingest.status, Some(IngestStatus::Succeeded));
    assert!(!IngestStatus::Succeeded.is_error());
}

#[test]
fn rejected_file_reports_detail_and_keeps_selection() {
    let (state, _) = update(AppState::new(), Msg::IngestFileSelected(Some(manual_pdf())));
    let (state, effects) = submit(state);
    let (state, _) = update(
        state,
        Msg::IngestCompleted {
            request_id: ingest_id(&effects),
            result: IngestResult::FileRejected {
                detail: "bad format".to_string(),
            },
        },
    );

    let ingest = state.view().ingest;
    assert_eq!(ingest.file_name.as_deref(), Some("manual.pdf"));
    let status = ingest.status.expect("status");
    assert!(status.message().contains("bad format"));
    assert!(status.is_error());
}

#[test]
fn generic_and_connection_failures_keep_form() {
    for (result, expected) in [
        (IngestResult::Failed, IngestStatus::Failed),
        (IngestResult::ConnectionFailed, IngestStatus::ConnectionFailed),
    ] {
        let (state, _) = update(AppState::new(), Msg::IngestTextChanged("notes".into()));
        let (state, effects) = submit(state);
        let (state, _) = update(
            state,
            Msg::IngestCompleted {
                request_id: ingest_id(&effects),
                result,
            },
        );

        let ingest = state.view().ingest;
        assert_eq!(ingest.text, "notes");
        assert_eq!(ingest.status, Some(expected));
    }
}

#[test]
fn stale_ingest_result_is_ignored() {
    let (state, _) = update(AppState::new(), Msg::IngestTextChanged("one".into()));
    let (state, first) = submit(state);
    let (state, second) = submit(state);
    assert_eq!(state.pending_ingest(), Some(ingest_id(&second)));

    let (state, _) = update(
        state,
        Msg::IngestCompleted {
            request_id: ingest_id(&first),
            result: IngestResult::Succeeded,
        },
    );
    assert_eq!(state.view().ingest.text, "one");
    assert_eq!(state.view().ingest.status, Some(IngestStatus::Processing));

    let (state, _) = update(
        state,
        Msg::IngestCompleted {
            request_id: ingest_id(&second),
            result: IngestResult::Succeeded,
        },
    );
    assert_eq!(state.view().ingest.text, "");
}

#[test]
fn clearing_file_selection() {
    let (state, _) = update(AppState::new(), Msg::IngestFileSelected(Some(manual_pdf())));
    let (state, _) = update(state, Msg::IngestFileSelected(None));
    let (_state, effects) = submit(state);

    assert!(effects.is_empty());
}
