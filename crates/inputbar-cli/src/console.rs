//! Terminal-facing observer.

use std::mem;
use std::sync::Mutex;

use inputbar_core::session::{Severity, Validation};
use inputbar_core::{Notice, Observer, TracingObserver};

/// How the most recent upload ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResult {
    Succeeded(String),
    Failed(String),
    Errored(String),
}

/// Logs every notice and echoes the user-facing ones to the terminal.
///
/// Validation errors are not echoed here. They are queued, one entry per
/// rejection, and the command loop decides how to surface them (`submit`
/// turns them into a non-zero exit).
#[derive(Debug, Default)]
pub struct ConsoleObserver {
    tracing: TracingObserver,
    last_upload: Mutex<Option<UploadResult>>,
    rejections: Mutex<Vec<Validation>>,
}

impl ConsoleObserver {
    /// Returns and clears the last recorded upload result.
    pub fn take_upload_result(&self) -> Option<UploadResult> {
        self.last_upload.lock().ok().and_then(|mut slot| slot.take())
    }

    /// Returns and clears the validation errors raised since the last call.
    pub fn take_rejections(&self) -> Vec<Validation> {
        self.rejections
            .lock()
            .map(|mut queue| mem::take(&mut *queue))
            .unwrap_or_default()
    }

    fn record(&self, result: UploadResult) {
        if let Ok(mut slot) = self.last_upload.lock() {
            *slot = Some(result);
        }
    }
}

impl Observer for ConsoleObserver {
    fn notice(&self, notice: &Notice) {
        self.tracing.notice(notice);

        match notice {
            Notice::ModeChanged { to, .. } => eprintln!("mode: {to}"),
            Notice::UploadStarted { source, .. } => {
                eprintln!("uploading {}...", source.as_str());
            }
            Notice::UploadSucceeded { message, .. } => {
                println!("upload succeeded: {message}");
                self.record(UploadResult::Succeeded(message.clone()));
            }
            Notice::UploadFailed { message, .. } => {
                eprintln!("upload failed: {message}");
                self.record(UploadResult::Failed(message.clone()));
            }
            Notice::UploadErrored { error, .. } => {
                eprintln!("upload error: {error}");
                self.record(UploadResult::Errored(error.clone()));
            }
            Notice::CaptureStarted { .. } => eprintln!("capturing page..."),
            Notice::CaptureSucceeded { url, bytes } => {
                eprintln!("captured {url} ({bytes} bytes)");
            }
            Notice::ValidationRaised(validation) => match validation.severity {
                Severity::Warning => eprintln!("warning: {}", validation.message),
                Severity::Error => {
                    if let Ok(mut queue) = self.rejections.lock() {
                        queue.push(validation.clone());
                    }
                }
            },
            Notice::QuerySubmitted { .. }
            | Notice::CaptureErrored { .. }
            | Notice::StaleResolution { .. } => {}
        }
    }
}
