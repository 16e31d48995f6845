//! Source arbitration: picks the one payload a submit should carry.

use serde::Serialize;

use super::state::{Attachment, FileRef, InputSession, Mode};

/// Where an upload payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Text,
    File,
    Page,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Text => "text",
            Source::File => "file",
            Source::Page => "page",
        }
    }
}

/// Data handed to the upload collaborator.
///
/// A captured page is uploaded as its content, never its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPayload {
    Text(String),
    File(FileRef),
}

/// What a submit request resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Nothing to send.
    Empty,
    /// Short text with no attachment.
    Question(String),
    Data {
        payload: UploadPayload,
        source: Source,
    },
}

/// Decides the submission for the current session.
///
/// Priority: attached file, then captured page, then trimmed text. Text only
/// takes the data path when the session is in [`Mode::Data`].
pub fn arbitrate(session: &InputSession) -> Submission {
    match session.attachment() {
        Some(Attachment::File(file)) => Submission::Data {
            payload: UploadPayload::File(file.clone()),
            source: Source::File,
        },
        Some(Attachment::Page(page)) => Submission::Data {
            payload: UploadPayload::Text(page.content.clone()),
            source: Source::Page,
        },
        None => {
            let text = session.trimmed_text();
            if text.is_empty() {
                Submission::Empty
            } else if session.mode == Mode::Data {
                Submission::Data {
                    payload: UploadPayload::Text(text.to_string()),
                    source: Source::Text,
                }
            } else {
                Submission::Question(text.to_string())
            }
        }
    }
}
