//! Widget state composition.
//!
//! ```text
//! WidgetState
//! ├── session: InputSession   (text, mode, attachment, validation, tasks)
//! ├── config: InputConfig     (limits and thresholds)
//! └── task_seq: TaskSeq       (async task id generator)
//! ```

use crate::common::TaskSeq;
use crate::config::InputConfig;
use crate::session::{InputSession, detect_mode};

/// Everything the reducer reads and writes for one widget instance.
#[derive(Debug, Default)]
pub struct WidgetState {
    pub session: InputSession,
    pub config: InputConfig,
    pub task_seq: TaskSeq,
}

impl WidgetState {
    /// Creates an empty session governed by `config`.
    pub fn new(config: InputConfig) -> Self {
        Self {
            session: InputSession::new(),
            config,
            task_seq: TaskSeq::default(),
        }
    }

    /// Recomputes the derived mode from the current text and attachment.
    pub fn refresh_mode(&mut self) {
        self.session.mode = detect_mode(
            &self.session.text,
            self.session.has_attachment(),
            self.config.data_mode_line_threshold,
        );
    }
}
