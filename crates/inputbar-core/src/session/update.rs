//! Session feature reducer.
//!
//! Handles text edits, attachments, submission, and async resolutions.
//! All session mutations happen here; the top-level `update` refreshes the
//! derived mode afterwards and reports transitions.

use super::arbiter::{Submission, arbitrate};
use super::state::{InputSession, Validation};
use super::validation::{self, ValidationError, ValidationWarning};
use crate::common::{TaskId, TaskKind};
use crate::effects::SessionEffect;
use crate::events::{CaptureOutcome, UploadOutcome};
use crate::observe::Notice;
use crate::session::FileRef;
use crate::state::WidgetState;

/// Stores a validation outcome and reports it.
fn raise(session: &mut InputSession, validation: impl Into<Validation>) -> Vec<SessionEffect> {
    let validation = validation.into();
    session.validation = Some(validation.clone());
    vec![SessionEffect::Report(Notice::ValidationRaised(validation))]
}

/// Replaces the text if the surface is editable.
///
/// Clears the previous validation, then raises the near-limit advisory when
/// the text would go down the question path.
pub fn handle_text_changed(state: &mut WidgetState, text: String) -> Vec<SessionEffect> {
    if state.session.is_input_disabled() {
        return vec![];
    }

    state.session.text = text;
    state.session.validation = None;
    state.refresh_mode();

    if state.session.mode.is_question()
        && let Some(warning) = validation::text_length_advisory(&state.session.text, &state.config)
    {
        return raise(&mut state.session, warning);
    }
    vec![]
}

/// Marks `task` of `kind` finished, or describes it as stale when it is not
/// the one in flight.
fn finish_or_stale(
    session: &mut InputSession,
    kind: TaskKind,
    task: TaskId,
) -> Option<SessionEffect> {
    if session.tasks.state_mut(kind).finish_if_active(task) {
        None
    } else {
        Some(SessionEffect::Report(Notice::StaleResolution { kind, task }))
    }
}

/// Validates and attaches a picked file.
///
/// A rejected file leaves the current attachment untouched. Returns whether
/// the file was attached alongside the effects.
fn attach_checked(state: &mut WidgetState, file: FileRef) -> (bool, Vec<SessionEffect>) {
    state.session.validation = None;
    match validation::check_file(&file, &state.config) {
        Err(err) => (false, raise(&mut state.session, err)),
        Ok(warning) => {
            state.session.attach_file(file);
            let effects = match warning {
                Some(warning) => raise(&mut state.session, warning),
                None => vec![],
            };
            (true, effects)
        }
    }
}

pub fn handle_file_selected(state: &mut WidgetState, file: FileRef) -> Vec<SessionEffect> {
    if state.session.busy().any() {
        return vec![];
    }
    attach_checked(state, file).1
}

/// Uses the first dropped file; the rest are ignored with an advisory.
pub fn handle_files_dropped(state: &mut WidgetState, files: Vec<FileRef>) -> Vec<SessionEffect> {
    if state.session.busy().any() {
        return vec![];
    }
    let mut files = files.into_iter();
    let Some(first) = files.next() else {
        return vec![];
    };
    let ignored = files.count();

    let (attached, effects) = attach_checked(state, first);
    if attached && ignored > 0 && state.session.validation.is_none() {
        return raise(
            &mut state.session,
            ValidationWarning::ExtraFilesIgnored { ignored },
        );
    }
    effects
}

pub fn handle_file_removed(session: &mut InputSession) -> Vec<SessionEffect> {
    if !session.busy().uploading_data {
        session.remove_file();
    }
    vec![]
}

pub fn handle_page_removed(session: &mut InputSession) -> Vec<SessionEffect> {
    if !session.busy().uploading_data {
        session.remove_page();
    }
    vec![]
}

/// Starts a page capture unless something is already in flight.
pub fn handle_capture_requested(state: &mut WidgetState) -> Vec<SessionEffect> {
    if state.session.busy().any() {
        return vec![];
    }
    let task = state.task_seq.next_id();
    state.session.tasks.capture.start(task);
    state.session.validation = None;
    vec![
        SessionEffect::Report(Notice::CaptureStarted { task }),
        SessionEffect::CapturePage { task },
    ]
}

/// Applies a capture result.
///
/// The busy flag is cleared first on every path. Failures leave the
/// attachment and mode as they were.
pub fn handle_capture_resolved(
    state: &mut WidgetState,
    task: TaskId,
    outcome: CaptureOutcome,
) -> Vec<SessionEffect> {
    let session = &mut state.session;
    if let Some(stale) = finish_or_stale(session, TaskKind::Capture, task) {
        return vec![stale];
    }

    match outcome {
        CaptureOutcome::Errored { error } => {
            let mut effects = vec![SessionEffect::Report(Notice::CaptureErrored {
                task,
                error: error.clone(),
            })];
            effects.extend(raise(
                session,
                ValidationError::CaptureFailed { reason: error },
            ));
            effects
        }
        CaptureOutcome::Captured(capture) => match validation::check_capture(capture) {
            Err(err) => raise(session, err),
            Ok(page) => {
                let notice = Notice::CaptureSucceeded {
                    url: page.url.clone(),
                    bytes: page.content.len(),
                };
                session.validation = None;
                session.attach_page(page);
                vec![SessionEffect::Report(notice)]
            }
        },
    }
}

/// Routes a submit request to the question or data path.
///
/// Requests while busy, or with nothing to send, are no-ops.
pub fn handle_submit(state: &mut WidgetState) -> Vec<SessionEffect> {
    if state.session.busy().any() {
        return vec![];
    }

    match arbitrate(&state.session) {
        Submission::Empty => vec![],
        Submission::Question(text) => {
            if let Err(err) = validation::check_text_length(&text, &state.config) {
                return raise(&mut state.session, err);
            }
            state.session.text.clear();
            state.session.validation = None;
            let chars = text.chars().count();
            vec![
                SessionEffect::SubmitQuery { text },
                SessionEffect::Report(Notice::QuerySubmitted { chars }),
            ]
        }
        Submission::Data { payload, source } => {
            let task = state.task_seq.next_id();
            state.session.tasks.upload.start(task);
            vec![
                SessionEffect::Report(Notice::UploadStarted { task, source }),
                SessionEffect::UploadData {
                    task,
                    payload,
                    source,
                },
            ]
        }
    }
}

/// Finalizes an upload.
///
/// Text, attachment, validation and the upload flag are reset on every
/// outcome; a failed upload is not restored for retry.
pub fn handle_upload_resolved(
    session: &mut InputSession,
    task: TaskId,
    outcome: UploadOutcome,
) -> Vec<SessionEffect> {
    if let Some(stale) = finish_or_stale(session, TaskKind::Upload, task) {
        return vec![stale];
    }

    session.text.clear();
    session.clear_attachment();
    session.validation = None;

    let notice = match outcome {
        UploadOutcome::Succeeded { message } => Notice::UploadSucceeded { task, message },
        UploadOutcome::Failed { message } => Notice::UploadFailed { task, message },
        UploadOutcome::Errored { error } => Notice::UploadErrored { task, error },
    };
    vec![SessionEffect::Report(notice)]
}
