//! Mode detection from text shape.

use super::state::Mode;

/// Number of lines in `text`: newline count plus one.
pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|b| *b == b'\n').count() + 1
}

/// Derives the mode for `text`.
///
/// An attachment always forces [`Mode::Data`].
pub fn detect_mode(text: &str, has_attachment: bool, threshold: usize) -> Mode {
    if has_attachment || line_count(text) >= threshold {
        Mode::Data
    } else {
        Mode::Question
    }
}
