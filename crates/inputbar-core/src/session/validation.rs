//! Validation gates for text, files, and page captures.
//!
//! Errors block the action and warnings are advisory. Neither is ever
//! propagated out of the widget: the reducer turns both into a
//! [`Validation`] shown inline.

use thiserror::Error;

use super::state::{CapturedPage, FileRef, PageCapture, Severity, Validation};
use crate::config::InputConfig;

/// User-correctable problems that block an action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Question is too long ({len} characters, limit is {max}).")]
    TextTooLong { len: usize, max: usize },

    #[error("{name} is too large ({}, limit is {}).", human_size(*.size), human_size(*.max))]
    FileTooLarge { name: String, size: u64, max: u64 },

    #[error("{name}: .{extension} files are not supported.")]
    FileTypeNotAllowed { name: String, extension: String },

    #[error("{name} has no file extension.")]
    MissingExtension { name: String },

    #[error("The captured page is empty.")]
    EmptyCapture,

    #[error("Could not determine the URL of the active tab.")]
    MissingPageUrl,

    #[error("Page capture failed: {reason}")]
    CaptureFailed { reason: String },
}

/// Advisory notes that never block an action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    #[error("Approaching the question length limit ({len}/{max} characters).")]
    NearTextLimit { len: usize, max: usize },

    #[error("{name} has unexpected type {mime}; it will be uploaded anyway.")]
    UnexpectedMimeType { name: String, mime: String },

    #[error("Only the first dropped file is used ({ignored} ignored).")]
    ExtraFilesIgnored { ignored: usize },
}

impl From<ValidationError> for Validation {
    fn from(err: ValidationError) -> Self {
        Validation {
            message: err.to_string(),
            severity: Severity::Error,
        }
    }
}

impl From<ValidationWarning> for Validation {
    fn from(warning: ValidationWarning) -> Self {
        Validation {
            message: warning.to_string(),
            severity: Severity::Warning,
        }
    }
}

/// Rejects questions whose trimmed length exceeds the configured cap.
pub fn check_text_length(text: &str, config: &InputConfig) -> Result<(), ValidationError> {
    let len = text.trim().chars().count();
    if len > config.max_text_length {
        return Err(ValidationError::TextTooLong {
            len,
            max: config.max_text_length,
        });
    }
    Ok(())
}

/// Warns once typed length passes 90% of the cap.
pub fn text_length_advisory(text: &str, config: &InputConfig) -> Option<ValidationWarning> {
    let len = text.chars().count();
    (len > config.text_warning_threshold()).then_some(ValidationWarning::NearTextLimit {
        len,
        max: config.max_text_length,
    })
}

/// Checks a picked or dropped file.
///
/// Size is checked first (inclusive bound), then the extension. A MIME type
/// outside the allow-list only yields a warning.
pub fn check_file(
    file: &FileRef,
    config: &InputConfig,
) -> Result<Option<ValidationWarning>, ValidationError> {
    if file.size_bytes > config.max_file_size_bytes {
        return Err(ValidationError::FileTooLarge {
            name: file.name.clone(),
            size: file.size_bytes,
            max: config.max_file_size_bytes,
        });
    }

    let Some(extension) = file.extension() else {
        return Err(ValidationError::MissingExtension {
            name: file.name.clone(),
        });
    };
    if !config.allows_extension(extension) {
        return Err(ValidationError::FileTypeNotAllowed {
            name: file.name.clone(),
            extension: extension.to_ascii_lowercase(),
        });
    }

    let warning = file
        .mime_type
        .as_deref()
        .map(str::trim)
        .filter(|mime| !mime.is_empty() && !config.allows_mime_type(mime))
        .map(|mime| ValidationWarning::UnexpectedMimeType {
            name: file.name.clone(),
            mime: mime.to_string(),
        });
    Ok(warning)
}

/// Turns a raw capture into a snapshot, rejecting a missing URL or blank content.
pub fn check_capture(capture: PageCapture) -> Result<CapturedPage, ValidationError> {
    let url = capture
        .url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .ok_or(ValidationError::MissingPageUrl)?;
    if capture.content.trim().is_empty() {
        return Err(ValidationError::EmptyCapture);
    }
    Ok(CapturedPage {
        url,
        content: capture.content,
    })
}

/// Formats a byte count for messages (`512 B`, `1.5 KB`, `10.0 MB`).
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{value:.1} {unit}")
}
