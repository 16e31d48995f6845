//! External capabilities the session depends on.

use anyhow::Result;
use futures_util::future::BoxFuture;

use crate::session::{PageCapture, Source, UploadPayload};

/// Result reported by the upload collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub success: bool,
    pub message: String,
}

impl UploadReport {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Query sink, uploader, and page capture used by [`super::SessionRuntime`].
///
/// Collaborators only ever see request payloads; they cannot reach the
/// session state.
pub trait Collaborators: Send + Sync + 'static {
    /// Hands a question off. Not awaited.
    fn submit_query(&self, text: String);

    /// Uploads a payload. An `Err` is finalized like a reported failure.
    fn upload_data(
        &self,
        payload: UploadPayload,
        source: Source,
    ) -> BoxFuture<'static, Result<UploadReport>>;

    /// Captures the active page.
    fn capture_page(&self) -> BoxFuture<'static, Result<PageCapture>>;
}
