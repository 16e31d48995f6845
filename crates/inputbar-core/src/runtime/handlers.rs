//! Async effect handlers.
//!
//! Each handler runs on a spawned task and reports back through the inbox.
//! A [`ResolveGuard`] is armed before the collaborator is called so the
//! reducer always hears back: if the task unwinds or is dropped first, the
//! guard's fallback event is sent from `Drop`.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use super::collaborators::Collaborators;
use crate::common::TaskId;
use crate::events::{CaptureOutcome, SessionEvent, UploadOutcome};
use crate::session::{Source, UploadPayload};

const UPLOAD_ABANDONED: &str = "upload task ended without a result";
const CAPTURE_ABANDONED: &str = "page capture ended without a result";

/// Sends exactly one resolution event for a task.
struct ResolveGuard {
    tx: UnboundedSender<SessionEvent>,
    fallback: Option<SessionEvent>,
}

impl ResolveGuard {
    fn new(tx: UnboundedSender<SessionEvent>, fallback: SessionEvent) -> Self {
        Self {
            tx,
            fallback: Some(fallback),
        }
    }

    fn resolve(mut self, event: SessionEvent) {
        self.fallback = None;
        let _ = self.tx.send(event);
    }
}

impl Drop for ResolveGuard {
    fn drop(&mut self) {
        if let Some(event) = self.fallback.take() {
            let _ = self.tx.send(event);
        }
    }
}

pub(super) fn spawn_upload<C: Collaborators>(
    collaborators: Arc<C>,
    tx: UnboundedSender<SessionEvent>,
    task: TaskId,
    payload: UploadPayload,
    source: Source,
) {
    tokio::spawn(async move {
        let guard = ResolveGuard::new(
            tx,
            SessionEvent::UploadResolved {
                task,
                outcome: UploadOutcome::Errored {
                    error: UPLOAD_ABANDONED.to_string(),
                },
            },
        );
        let outcome = match collaborators.upload_data(payload, source).await {
            Ok(report) if report.success => UploadOutcome::Succeeded {
                message: report.message,
            },
            Ok(report) => UploadOutcome::Failed {
                message: report.message,
            },
            Err(err) => UploadOutcome::Errored {
                error: format!("{err:#}"),
            },
        };
        guard.resolve(SessionEvent::UploadResolved { task, outcome });
    });
}

pub(super) fn spawn_capture<C: Collaborators>(
    collaborators: Arc<C>,
    tx: UnboundedSender<SessionEvent>,
    task: TaskId,
) {
    tokio::spawn(async move {
        let guard = ResolveGuard::new(
            tx,
            SessionEvent::CaptureResolved {
                task,
                outcome: CaptureOutcome::Errored {
                    error: CAPTURE_ABANDONED.to_string(),
                },
            },
        );
        let outcome = match collaborators.capture_page().await {
            Ok(capture) => CaptureOutcome::Captured(capture),
            Err(err) => CaptureOutcome::Errored {
                error: format!("{err:#}"),
            },
        };
        guard.resolve(SessionEvent::CaptureResolved { task, outcome });
    });
}
