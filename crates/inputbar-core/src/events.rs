//! Session event types.
//!
//! Everything that can change the widget arrives as a [`SessionEvent`]:
//! user actions from the embedding surface and results of async work
//! delivered by the runtime's inbox.

use crate::common::TaskId;
use crate::session::{FileRef, PageCapture};

/// Outcome of an upload attempt as seen by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The collaborator reported success.
    Succeeded { message: String },
    /// The collaborator returned `success = false`.
    Failed { message: String },
    /// The collaborator errored, panicked, or its task was dropped.
    Errored { error: String },
}

/// Outcome of a page capture attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Captured(PageCapture),
    Errored { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The text area now holds this content.
    TextChanged(String),
    /// The file picker produced a candidate.
    FileSelected(FileRef),
    /// Files were dropped onto the widget.
    FilesDropped(Vec<FileRef>),
    FileRemoved,
    /// The user asked to capture the active page.
    CaptureRequested,
    PageRemoved,
    /// The send control was triggered.
    SubmitRequested,
    /// The surface started or finished answering a question.
    QueryInFlight(bool),
    UploadResolved {
        task: TaskId,
        outcome: UploadOutcome,
    },
    CaptureResolved {
        task: TaskId,
        outcome: CaptureOutcome,
    },
}
