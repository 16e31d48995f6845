//! The input session feature: state, mode detection, validation, source
//! arbitration, and the session reducer.

mod arbiter;
mod mode;
mod state;
mod update;
mod validation;
mod view;

pub use arbiter::{Source, Submission, UploadPayload, arbitrate};
pub use mode::{detect_mode, line_count};
pub use state::{
    Attachment, BusyFlags, CapturedPage, FileRef, InputSession, Mode, PageCapture, Severity,
    Validation,
};
pub use update::{
    handle_capture_requested, handle_capture_resolved, handle_file_removed, handle_file_selected,
    handle_files_dropped, handle_page_removed, handle_submit, handle_text_changed,
    handle_upload_resolved,
};
pub use validation::{
    ValidationError, ValidationWarning, check_capture, check_file, check_text_length, human_size,
    text_length_advisory,
};
pub use view::{SessionView, textarea_rows};
