//! Session effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent collaborator calls and observability notices only, so the
//! reducer never performs I/O itself.

use crate::common::TaskId;
use crate::observe::Notice;
use crate::session::{Source, UploadPayload};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// Hand a question to the query collaborator (fire-and-forget).
    SubmitQuery { text: String },

    /// Upload a payload. The runtime must answer with `UploadResolved`
    /// for `task` whatever happens.
    UploadData {
        task: TaskId,
        payload: UploadPayload,
        source: Source,
    },

    /// Capture the active page. The runtime must answer with
    /// `CaptureResolved` for `task` whatever happens.
    CapturePage { task: TaskId },

    /// Forward a notice to the observer.
    Report(Notice),
}
