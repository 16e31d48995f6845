//! Input session state.
//!
//! Holds the typed text, the single attachment slot, the latest validation
//! outcome, and the in-flight task markers for one widget instance.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::common::{TaskKind, Tasks};

/// Which submission path the widget currently believes applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Question,
    Data,
}

impl Mode {
    pub fn is_question(self) -> bool {
        self == Mode::Question
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Question => f.write_str("question"),
            Mode::Data => f.write_str("data"),
        }
    }
}

/// A file candidate produced by the picker or a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    /// Display name including the extension (e.g. `report.pdf`).
    pub name: String,
    /// Location on disk, when the surface has one.
    pub path: Option<PathBuf>,
    pub size_bytes: u64,
    /// MIME type reported by the surface (may be absent or empty).
    pub mime_type: Option<String>,
}

impl FileRef {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            path: None,
            size_bytes,
            mime_type: None,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }

    /// Substring after the final `.` of the name, if any.
    pub fn extension(&self) -> Option<&str> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }
}

/// Raw result of a page capture, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCapture {
    /// URL of the active tab, if it could be determined.
    pub url: Option<String>,
    pub content: String,
}

/// A validated page snapshot awaiting submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPage {
    pub url: String,
    pub content: String,
}

/// The single attachment slot. File and page are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    File(FileRef),
    Page(CapturedPage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Most recent validation outcome, rendered inline by the surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub message: String,
    pub severity: Severity,
}

impl Validation {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Independent in-flight flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BusyFlags {
    pub capturing_page: bool,
    pub uploading_data: bool,
    pub submitting: bool,
}

impl BusyFlags {
    pub fn any(self) -> bool {
        self.capturing_page || self.uploading_data || self.submitting
    }
}

/// State of one input widget instance.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputSession {
    pub text: String,
    /// Derived from `text` and the attachment; refreshed by the reducer.
    pub mode: Mode,
    attachment: Option<Attachment>,
    pub validation: Option<Validation>,
    pub tasks: Tasks,
    /// Set by the embedding surface while a question is being answered.
    pub submitting: bool,
}

impl InputSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn has_attachment(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn selected_file(&self) -> Option<&FileRef> {
        match &self.attachment {
            Some(Attachment::File(file)) => Some(file),
            _ => None,
        }
    }

    pub fn captured_page(&self) -> Option<&CapturedPage> {
        match &self.attachment {
            Some(Attachment::Page(page)) => Some(page),
            _ => None,
        }
    }

    /// Attaches a file, replacing any captured page.
    pub fn attach_file(&mut self, file: FileRef) {
        self.attachment = Some(Attachment::File(file));
    }

    /// Attaches a page snapshot, replacing any selected file.
    pub fn attach_page(&mut self, page: CapturedPage) {
        self.attachment = Some(Attachment::Page(page));
    }

    /// Removes the selected file. Returns false if no file was attached.
    pub fn remove_file(&mut self) -> bool {
        if self.selected_file().is_some() {
            self.attachment = None;
            true
        } else {
            false
        }
    }

    /// Removes the captured page. Returns false if no page was attached.
    pub fn remove_page(&mut self) -> bool {
        if self.captured_page().is_some() {
            self.attachment = None;
            true
        } else {
            false
        }
    }

    pub fn clear_attachment(&mut self) {
        self.attachment = None;
    }

    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    pub fn busy(&self) -> BusyFlags {
        BusyFlags {
            capturing_page: self.tasks.state(TaskKind::Capture).is_running(),
            uploading_data: self.tasks.state(TaskKind::Upload).is_running(),
            submitting: self.submitting,
        }
    }

    /// Whether the send control should be enabled.
    pub fn can_submit(&self) -> bool {
        (!self.trimmed_text().is_empty() || self.has_attachment()) && !self.busy().any()
    }

    /// Whether the editable surface is locked.
    ///
    /// An attachment locks typing until it is removed or submitted.
    pub fn is_input_disabled(&self) -> bool {
        self.busy().any() || self.has_attachment()
    }
}
