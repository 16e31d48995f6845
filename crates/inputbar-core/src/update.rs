//! Widget reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state, event)`
//! and executes the returned effects.
//!
//! After every event the derived mode is recomputed in one place, and a
//! `ModeChanged` notice is appended when it moved.

use crate::effects::SessionEffect;
use crate::events::SessionEvent;
use crate::observe::Notice;
use crate::session;
use crate::state::WidgetState;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(state: &mut WidgetState, event: SessionEvent) -> Vec<SessionEffect> {
    let before = state.session.mode;

    let mut effects = match event {
        SessionEvent::TextChanged(text) => session::handle_text_changed(state, text),
        SessionEvent::FileSelected(file) => session::handle_file_selected(state, file),
        SessionEvent::FilesDropped(files) => session::handle_files_dropped(state, files),
        SessionEvent::FileRemoved => session::handle_file_removed(&mut state.session),
        SessionEvent::PageRemoved => session::handle_page_removed(&mut state.session),
        SessionEvent::CaptureRequested => session::handle_capture_requested(state),
        SessionEvent::CaptureResolved { task, outcome } => {
            session::handle_capture_resolved(state, task, outcome)
        }
        SessionEvent::SubmitRequested => session::handle_submit(state),
        SessionEvent::UploadResolved { task, outcome } => {
            session::handle_upload_resolved(&mut state.session, task, outcome)
        }
        SessionEvent::QueryInFlight(in_flight) => {
            state.session.submitting = in_flight;
            vec![]
        }
    };

    state.refresh_mode();
    let after = state.session.mode;
    if before != after {
        effects.push(SessionEffect::Report(Notice::ModeChanged {
            from: before,
            to: after,
        }));
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::TaskId;
    use crate::config::InputConfig;
    use crate::events::{CaptureOutcome, UploadOutcome};
    use crate::session::{FileRef, Mode, PageCapture, Severity, Source, UploadPayload};

    const MB: u64 = 1024 * 1024;

    fn new_state() -> WidgetState {
        WidgetState::new(InputConfig {
            max_file_size_bytes: 10 * MB,
            ..InputConfig::default()
        })
    }

    fn lines(n: usize) -> String {
        (0..n)
            .map(|i| format!("row {i}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn upload_task(effects: &[SessionEffect]) -> TaskId {
        effects
            .iter()
            .find_map(|effect| match effect {
                SessionEffect::UploadData { task, .. } => Some(*task),
                _ => None,
            })
            .expect("upload effect")
    }

    fn capture_task(effects: &[SessionEffect]) -> TaskId {
        effects
            .iter()
            .find_map(|effect| match effect {
                SessionEffect::CapturePage { task } => Some(*task),
                _ => None,
            })
            .expect("capture effect")
    }

    fn page_capture() -> PageCapture {
        PageCapture {
            url: Some("https://example.com/a".to_string()),
            content: "<html><body>table</body></html>".to_string(),
        }
    }

    fn has_mode_change(effects: &[SessionEffect], to: Mode) -> bool {
        effects.iter().any(|effect| {
            matches!(effect, SessionEffect::Report(Notice::ModeChanged { to: t, .. }) if *t == to)
        })
    }

    #[test]
    fn test_short_text_submits_question_once() {
        let mut state = new_state();
        update(&mut state, SessionEvent::TextChanged(lines(5)));
        assert_eq!(state.session.mode, Mode::Question);

        let effects = update(&mut state, SessionEvent::SubmitRequested);
        let queries: Vec<_> = effects
            .iter()
            .filter_map(|effect| match effect {
                SessionEffect::SubmitQuery { text } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(queries, vec![lines(5)]);
        assert!(
            !effects
                .iter()
                .any(|effect| matches!(effect, SessionEffect::UploadData { .. }))
        );
        assert!(state.session.text.is_empty());
        assert!(!state.session.busy().any());
    }

    #[test]
    fn test_empty_submit_is_noop() {
        let mut state = new_state();
        let before = state.session.clone();

        let effects = update(&mut state, SessionEvent::SubmitRequested);
        assert!(effects.is_empty());
        assert_eq!(state.session, before);

        update(&mut state, SessionEvent::TextChanged("   \n\t".to_string()));
        assert!(update(&mut state, SessionEvent::SubmitRequested).is_empty());
    }

    #[test]
    fn test_overlong_question_is_rejected_without_call() {
        let mut state = WidgetState::new(InputConfig {
            max_text_length: 10,
            ..InputConfig::default()
        });
        update(&mut state, SessionEvent::TextChanged("x".repeat(11)));

        let effects = update(&mut state, SessionEvent::SubmitRequested);
        assert!(
            !effects
                .iter()
                .any(|effect| matches!(effect, SessionEffect::SubmitQuery { .. }))
        );
        let validation = state.session.validation.clone().unwrap();
        assert_eq!(validation.severity, Severity::Error);
        assert_eq!(state.session.text.len(), 11);

        // Next keystroke clears the error.
        update(&mut state, SessionEvent::TextChanged("short".to_string()));
        assert_eq!(state.session.validation, None);
    }

    #[test]
    fn test_near_limit_warning_is_advisory() {
        let mut state = WidgetState::new(InputConfig {
            max_text_length: 100,
            ..InputConfig::default()
        });
        update(&mut state, SessionEvent::TextChanged("y".repeat(95)));
        assert_eq!(
            state.session.validation.as_ref().map(|v| v.severity),
            Some(Severity::Warning)
        );

        let effects = update(&mut state, SessionEvent::SubmitRequested);
        assert!(
            effects
                .iter()
                .any(|effect| matches!(effect, SessionEffect::SubmitQuery { .. }))
        );
    }

    #[test]
    fn test_long_text_flips_to_data_and_uploads() {
        let mut state = new_state();
        let effects = update(&mut state, SessionEvent::TextChanged(lines(150)));
        assert_eq!(state.session.mode, Mode::Data);
        assert!(has_mode_change(&effects, Mode::Data));

        let effects = update(&mut state, SessionEvent::SubmitRequested);
        let upload = effects
            .iter()
            .find_map(|effect| match effect {
                SessionEffect::UploadData {
                    payload, source, ..
                } => Some((payload.clone(), *source)),
                _ => None,
            })
            .unwrap();
        assert_eq!(upload, (UploadPayload::Text(lines(150)), Source::Text));
        assert!(state.session.busy().uploading_data);
        assert!(state.session.is_input_disabled());
    }

    #[test]
    fn test_upload_finalization_is_outcome_independent() {
        let outcomes = [
            UploadOutcome::Succeeded {
                message: "stored".to_string(),
            },
            UploadOutcome::Failed {
                message: "quota exceeded".to_string(),
            },
            UploadOutcome::Errored {
                error: "connection reset".to_string(),
            },
        ];

        for outcome in outcomes {
            let mut state = new_state();
            update(&mut state, SessionEvent::FileSelected(FileRef::new("a.csv", 10)));
            let task = upload_task(&update(&mut state, SessionEvent::SubmitRequested));

            let effects = update(&mut state, SessionEvent::UploadResolved { task, outcome });
            assert_eq!(state.session.text, "");
            assert!(state.session.selected_file().is_none());
            assert!(state.session.captured_page().is_none());
            assert!(!state.session.busy().uploading_data);
            assert_eq!(state.session.mode, Mode::Question);
            assert!(has_mode_change(&effects, Mode::Question));
        }
    }

    #[test]
    fn test_upload_outcomes_report_distinct_notices() {
        let mut state = new_state();
        update(&mut state, SessionEvent::TextChanged(lines(120)));
        let task = upload_task(&update(&mut state, SessionEvent::SubmitRequested));

        let effects = update(
            &mut state,
            SessionEvent::UploadResolved {
                task,
                outcome: UploadOutcome::Errored {
                    error: "boom".to_string(),
                },
            },
        );
        assert!(effects.contains(&SessionEffect::Report(Notice::UploadErrored {
            task,
            error: "boom".to_string(),
        })));
        assert!(!effects.iter().any(|effect| matches!(
            effect,
            SessionEffect::Report(Notice::UploadFailed { .. })
        )));
    }

    #[test]
    fn test_stale_upload_resolution_is_ignored() {
        let mut state = new_state();
        update(&mut state, SessionEvent::TextChanged(lines(120)));
        let task = upload_task(&update(&mut state, SessionEvent::SubmitRequested));

        let stale = TaskId(task.0 + 99);
        let effects = update(
            &mut state,
            SessionEvent::UploadResolved {
                task: stale,
                outcome: UploadOutcome::Succeeded {
                    message: String::new(),
                },
            },
        );
        assert!(matches!(
            effects.as_slice(),
            [SessionEffect::Report(Notice::StaleResolution { .. })]
        ));
        assert!(state.session.busy().uploading_data);
    }

    #[test]
    fn test_submit_while_uploading_is_noop() {
        let mut state = new_state();
        update(&mut state, SessionEvent::TextChanged(lines(120)));
        update(&mut state, SessionEvent::SubmitRequested);

        assert!(update(&mut state, SessionEvent::SubmitRequested).is_empty());
        assert!(update(&mut state, SessionEvent::CaptureRequested).is_empty());
        assert!(update(&mut state, SessionEvent::TextChanged("new".to_string())).is_empty());
        assert_eq!(state.session.text, lines(120));
    }

    #[test]
    fn test_question_submit_blocked_while_query_in_flight() {
        let mut state = new_state();
        update(&mut state, SessionEvent::TextChanged("hi".to_string()));
        update(&mut state, SessionEvent::QueryInFlight(true));
        assert!(update(&mut state, SessionEvent::SubmitRequested).is_empty());

        update(&mut state, SessionEvent::QueryInFlight(false));
        assert!(!update(&mut state, SessionEvent::SubmitRequested).is_empty());
    }

    #[test]
    fn test_oversized_file_is_rejected() {
        let mut state = new_state();
        let effects = update(
            &mut state,
            SessionEvent::FileSelected(FileRef::new("big.csv", 50 * MB)),
        );

        assert!(state.session.selected_file().is_none());
        assert_eq!(state.session.mode, Mode::Question);
        assert!(!has_mode_change(&effects, Mode::Data));
        let validation = state.session.validation.clone().unwrap();
        assert_eq!(validation.severity, Severity::Error);
        assert!(validation.message.contains("too large"));
    }

    #[test]
    fn test_file_boundary_and_extension() {
        let mut state = new_state();
        update(
            &mut state,
            SessionEvent::FileSelected(FileRef::new("exact.csv", 10 * MB + 1)),
        );
        assert!(state.session.selected_file().is_none());

        update(
            &mut state,
            SessionEvent::FileSelected(FileRef::new("exact.csv", 10 * MB)),
        );
        assert!(state.session.selected_file().is_some());
        assert_eq!(state.session.validation, None);

        let mut state = new_state();
        update(
            &mut state,
            SessionEvent::FileSelected(FileRef::new("report.PDF", 1)),
        );
        assert!(state.session.selected_file().is_some());

        let mut state = new_state();
        update(
            &mut state,
            SessionEvent::FileSelected(FileRef::new("archive.zip", 1)),
        );
        assert!(state.session.selected_file().is_none());
        assert!(state.session.validation.as_ref().unwrap().is_error());
    }

    #[test]
    fn test_rejected_file_keeps_previous_attachment() {
        let mut state = new_state();
        update(&mut state, SessionEvent::FileSelected(FileRef::new("a.csv", 1)));
        update(&mut state, SessionEvent::FileSelected(FileRef::new("b.zip", 1)));
        assert_eq!(
            state.session.selected_file().map(|f| f.name.as_str()),
            Some("a.csv")
        );
    }

    #[test]
    fn test_mime_mismatch_attaches_with_warning() {
        let mut state = new_state();
        update(
            &mut state,
            SessionEvent::FileSelected(
                FileRef::new("sheet.csv", 10).with_mime_type("application/octet-stream"),
            ),
        );
        assert!(state.session.selected_file().is_some());
        assert_eq!(
            state.session.validation.as_ref().map(|v| v.severity),
            Some(Severity::Warning)
        );
    }

    #[test]
    fn test_file_then_page_are_mutually_exclusive() {
        let mut state = new_state();
        let effects = update(&mut state, SessionEvent::FileSelected(FileRef::new("a.csv", 1)));
        assert_eq!(state.session.mode, Mode::Data);
        assert!(has_mode_change(&effects, Mode::Data));

        let task = capture_task(&update(&mut state, SessionEvent::CaptureRequested));
        update(
            &mut state,
            SessionEvent::CaptureResolved {
                task,
                outcome: CaptureOutcome::Captured(page_capture()),
            },
        );
        assert!(state.session.selected_file().is_none());
        assert!(state.session.captured_page().is_some());

        update(&mut state, SessionEvent::FileSelected(FileRef::new("b.json", 1)));
        assert!(state.session.captured_page().is_none());
        assert!(state.session.selected_file().is_some());
        assert_eq!(state.session.mode, Mode::Data);
    }

    #[test]
    fn test_removing_attachment_restores_text_mode() {
        let mut state = new_state();
        update(&mut state, SessionEvent::TextChanged("short".to_string()));
        update(&mut state, SessionEvent::FileSelected(FileRef::new("a.csv", 1)));
        assert_eq!(state.session.mode, Mode::Data);

        // Typing is locked while the attachment is present.
        update(&mut state, SessionEvent::TextChanged(lines(200)));
        assert_eq!(state.session.text, "short");

        update(&mut state, SessionEvent::PageRemoved);
        assert!(state.session.has_attachment());

        update(&mut state, SessionEvent::FileRemoved);
        assert!(!state.session.has_attachment());
        assert_eq!(state.session.mode, Mode::Question);
    }

    #[test]
    fn test_page_submit_uploads_content() {
        let mut state = new_state();
        let task = capture_task(&update(&mut state, SessionEvent::CaptureRequested));
        assert!(state.session.busy().capturing_page);
        update(
            &mut state,
            SessionEvent::CaptureResolved {
                task,
                outcome: CaptureOutcome::Captured(page_capture()),
            },
        );
        assert!(!state.session.busy().capturing_page);
        assert_eq!(state.session.mode, Mode::Data);

        let effects = update(&mut state, SessionEvent::SubmitRequested);
        assert!(effects.iter().any(|effect| matches!(
            effect,
            SessionEffect::UploadData {
                payload: UploadPayload::Text(content),
                source: Source::Page,
                ..
            } if content.starts_with("<html>")
        )));
    }

    #[test]
    fn test_capture_error_leaves_state_unchanged() {
        let mut state = new_state();
        update(&mut state, SessionEvent::TextChanged("draft".to_string()));
        let task = capture_task(&update(&mut state, SessionEvent::CaptureRequested));

        let effects = update(
            &mut state,
            SessionEvent::CaptureResolved {
                task,
                outcome: CaptureOutcome::Errored {
                    error: "tab crashed".to_string(),
                },
            },
        );
        assert!(!state.session.busy().capturing_page);
        assert!(state.session.captured_page().is_none());
        assert_eq!(state.session.mode, Mode::Question);
        assert_eq!(state.session.text, "draft");
        let validation = state.session.validation.clone().unwrap();
        assert_eq!(validation.severity, Severity::Error);
        assert!(validation.message.contains("tab crashed"));
        assert!(effects.iter().any(|effect| matches!(
            effect,
            SessionEffect::Report(Notice::CaptureErrored { .. })
        )));
    }

    #[test]
    fn test_blank_capture_and_missing_url_are_validation_errors() {
        for capture in [
            PageCapture {
                url: Some("https://example.com".to_string()),
                content: "   ".to_string(),
            },
            PageCapture {
                url: None,
                content: "<p>x</p>".to_string(),
            },
        ] {
            let mut state = new_state();
            update(&mut state, SessionEvent::FileSelected(FileRef::new("keep.csv", 1)));
            let task = capture_task(&update(&mut state, SessionEvent::CaptureRequested));
            update(
                &mut state,
                SessionEvent::CaptureResolved {
                    task,
                    outcome: CaptureOutcome::Captured(capture),
                },
            );
            assert!(state.session.captured_page().is_none());
            assert!(state.session.selected_file().is_some());
            assert!(state.session.validation.as_ref().unwrap().is_error());
        }
    }

    #[test]
    fn test_capture_retry_clears_previous_error() {
        let mut state = new_state();
        let task = capture_task(&update(&mut state, SessionEvent::CaptureRequested));
        update(
            &mut state,
            SessionEvent::CaptureResolved {
                task,
                outcome: CaptureOutcome::Errored {
                    error: "nope".to_string(),
                },
            },
        );
        assert!(state.session.validation.is_some());

        update(&mut state, SessionEvent::CaptureRequested);
        assert_eq!(state.session.validation, None);
    }

    #[test]
    fn test_drop_uses_first_file() {
        let mut state = new_state();
        update(
            &mut state,
            SessionEvent::FilesDropped(vec![
                FileRef::new("first.csv", 1),
                FileRef::new("second.csv", 1),
            ]),
        );
        assert_eq!(
            state.session.selected_file().map(|f| f.name.as_str()),
            Some("first.csv")
        );
        let validation = state.session.validation.clone().unwrap();
        assert_eq!(validation.severity, Severity::Warning);
        assert!(validation.message.contains("1 ignored"));

        let mut state = new_state();
        assert!(update(&mut state, SessionEvent::FilesDropped(vec![])).is_empty());
        assert!(!state.session.has_attachment());
    }

    #[test]
    fn test_mode_is_stable_without_text_change() {
        let mut state = new_state();
        update(&mut state, SessionEvent::TextChanged(lines(100)));
        assert_eq!(state.session.mode, Mode::Data);
        let effects = update(&mut state, SessionEvent::QueryInFlight(false));
        assert!(effects.is_empty());
        assert_eq!(state.session.mode, Mode::Data);
    }

    #[test]
    fn test_second_capture_request_while_capturing_is_noop() {
        let mut state = new_state();
        let task = capture_task(&update(&mut state, SessionEvent::CaptureRequested));

        assert!(update(&mut state, SessionEvent::CaptureRequested).is_empty());
        assert_eq!(state.session.tasks.capture.active, Some(task));
    }

    #[test]
    fn test_pickers_ignored_while_capturing() {
        let mut state = new_state();
        update(&mut state, SessionEvent::CaptureRequested);

        let effects = update(&mut state, SessionEvent::FileSelected(FileRef::new("a.csv", 1)));
        assert!(effects.is_empty());
        let effects = update(
            &mut state,
            SessionEvent::FilesDropped(vec![FileRef::new("b.csv", 1)]),
        );
        assert!(effects.is_empty());
        assert!(!state.session.has_attachment());
        assert_eq!(state.session.mode, Mode::Question);
    }

    #[test]
    fn test_pickers_ignored_while_uploading() {
        let mut state = new_state();
        update(&mut state, SessionEvent::FileSelected(FileRef::new("a.csv", 1)));
        update(&mut state, SessionEvent::SubmitRequested);
        assert!(state.session.busy().uploading_data);

        update(&mut state, SessionEvent::FileSelected(FileRef::new("big.exe", 50 * MB)));
        update(
            &mut state,
            SessionEvent::FilesDropped(vec![FileRef::new("b.json", 1)]),
        );
        assert_eq!(
            state.session.selected_file().map(|file| file.name.as_str()),
            Some("a.csv")
        );
        assert_eq!(state.session.validation, None);
    }

    #[test]
    fn test_removal_ignored_while_uploading() {
        let mut state = new_state();
        update(&mut state, SessionEvent::FileSelected(FileRef::new("a.csv", 1)));
        update(&mut state, SessionEvent::SubmitRequested);

        update(&mut state, SessionEvent::FileRemoved);
        assert!(state.session.selected_file().is_some());

        let mut state = new_state();
        let task = capture_task(&update(&mut state, SessionEvent::CaptureRequested));
        update(
            &mut state,
            SessionEvent::CaptureResolved {
                task,
                outcome: CaptureOutcome::Captured(page_capture()),
            },
        );
        update(&mut state, SessionEvent::SubmitRequested);
        assert!(state.session.busy().uploading_data);

        update(&mut state, SessionEvent::PageRemoved);
        assert!(state.session.captured_page().is_some());
        assert_eq!(state.session.mode, Mode::Data);
    }

    #[test]
    fn test_stale_capture_resolution_is_ignored() {
        let mut state = new_state();
        let task = capture_task(&update(&mut state, SessionEvent::CaptureRequested));

        let effects = update(
            &mut state,
            SessionEvent::CaptureResolved {
                task: TaskId(task.0 + 5),
                outcome: CaptureOutcome::Captured(page_capture()),
            },
        );
        assert!(matches!(
            effects.as_slice(),
            [SessionEffect::Report(Notice::StaleResolution { .. })]
        ));
        assert!(state.session.busy().capturing_page);
        assert!(!state.session.has_attachment());

        update(
            &mut state,
            SessionEvent::CaptureResolved {
                task,
                outcome: CaptureOutcome::Captured(page_capture()),
            },
        );
        assert!(!state.session.busy().capturing_page);
        assert!(state.session.captured_page().is_some());
    }
}
