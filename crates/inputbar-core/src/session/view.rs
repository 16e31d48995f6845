//! Derived display flags for the embedding surface.

use serde::Serialize;

use super::mode::line_count;
use super::state::{Attachment, BusyFlags, Mode, Validation};
use super::validation::human_size;
use crate::state::WidgetState;

/// Snapshot of everything a surface needs to render the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub mode: Mode,
    pub busy: BusyFlags,
    pub validation: Option<Validation>,
    pub has_file: bool,
    pub has_page: bool,
    /// Short description of the attachment (e.g. `report.pdf (1.2 MB)`).
    pub attachment_label: Option<String>,
    pub can_submit: bool,
    pub is_input_disabled: bool,
    pub textarea_rows: u16,
}

impl SessionView {
    pub fn from_state(state: &WidgetState) -> Self {
        let session = &state.session;
        let attachment_label = session.attachment().map(|attachment| match attachment {
            Attachment::File(file) => format!("{} ({})", file.name, human_size(file.size_bytes)),
            Attachment::Page(page) => format!("page: {}", page.url),
        });

        Self {
            mode: session.mode,
            busy: session.busy(),
            validation: session.validation.clone(),
            has_file: session.selected_file().is_some(),
            has_page: session.captured_page().is_some(),
            attachment_label,
            can_submit: session.can_submit(),
            is_input_disabled: session.is_input_disabled(),
            textarea_rows: textarea_rows(
                &session.text,
                state.config.min_textarea_rows,
                state.config.max_textarea_rows,
            ),
        }
    }
}

/// Rows to show for `text`, clamped to the configured range.
///
/// An inverted range yields `min`.
pub fn textarea_rows(text: &str, min: u16, max: u16) -> u16 {
    let lines = u16::try_from(line_count(text)).unwrap_or(u16::MAX);
    lines.min(max).max(min)
}
