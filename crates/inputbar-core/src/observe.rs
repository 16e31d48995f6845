//! Observability hook.
//!
//! The reducer describes what happened as [`Notice`]s; the runtime hands them
//! to an injected [`Observer`]. [`TracingObserver`] is the default and turns
//! notices into `tracing` events.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::common::{TaskId, TaskKind};
use crate::session::{Mode, Severity, Source, Validation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ModeChanged { from: Mode, to: Mode },
    QuerySubmitted { chars: usize },
    UploadStarted { task: TaskId, source: Source },
    UploadSucceeded { task: TaskId, message: String },
    /// The collaborator reported `success = false`.
    UploadFailed { task: TaskId, message: String },
    /// The collaborator errored or panicked.
    UploadErrored { task: TaskId, error: String },
    CaptureStarted { task: TaskId },
    CaptureSucceeded { url: String, bytes: usize },
    CaptureErrored { task: TaskId, error: String },
    ValidationRaised(Validation),
    /// A resolution arrived for a task that is no longer active.
    StaleResolution { kind: TaskKind, task: TaskId },
}

/// Receives notices from the runtime.
pub trait Observer: Send + Sync {
    fn notice(&self, notice: &Notice);
}

/// Logs notices through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn notice(&self, notice: &Notice) {
        match notice {
            Notice::ModeChanged { from, to } => info!(%from, %to, "Input mode changed"),
            Notice::QuerySubmitted { chars } => info!(chars, "Question submitted"),
            Notice::UploadStarted { task, source } => {
                debug!(task = task.0, source = source.as_str(), "Upload started");
            }
            Notice::UploadSucceeded { task, message } => {
                info!(task = task.0, %message, "Upload succeeded");
            }
            Notice::UploadFailed { task, message } => {
                warn!(task = task.0, %message, "Upload reported failure");
            }
            Notice::UploadErrored { task, error } => {
                error!(task = task.0, %error, "Upload errored");
            }
            Notice::CaptureStarted { task } => debug!(task = task.0, "Page capture started"),
            Notice::CaptureSucceeded { url, bytes } => info!(%url, bytes, "Page captured"),
            Notice::CaptureErrored { task, error } => {
                error!(task = task.0, %error, "Page capture errored");
            }
            Notice::ValidationRaised(validation) => match validation.severity {
                Severity::Warning => debug!(message = %validation.message, "Validation warning"),
                Severity::Error => info!(message = %validation.message, "Validation error"),
            },
            Notice::StaleResolution { kind, task } => {
                debug!(?kind, task = task.0, "Ignoring stale task resolution");
            }
        }
    }
}

impl<O: Observer + ?Sized> Observer for Arc<O> {
    fn notice(&self, notice: &Notice) {
        (**self).notice(notice);
    }
}
