//! Intent-classifying input widget core.
//!
//! One input surface decides between "ask a question" and "submit a data
//! payload" from the shape of what it holds: long text, an attached file, or
//! a captured page go down the data path; short text is a question.
//!
//! The crate follows an Elm-style split:
//! - [`update::update`] is the reducer: `(state, event) -> effects`, no I/O.
//! - [`runtime::SessionRuntime`] executes effects against injected
//!   [`runtime::Collaborators`] and reports [`observe::Notice`]s to an
//!   [`observe::Observer`].

pub mod common;
pub mod config;
pub mod effects;
pub mod events;
pub mod observe;
pub mod runtime;
pub mod session;
pub mod state;
pub mod update;

pub use config::{Config, InputConfig};
pub use effects::SessionEffect;
pub use events::{CaptureOutcome, SessionEvent, UploadOutcome};
pub use observe::{Notice, Observer, TracingObserver};
pub use runtime::{Collaborators, SessionRuntime, UploadReport};
pub use session::{FileRef, InputSession, Mode, PageCapture, SessionView, Source, UploadPayload};
pub use state::WidgetState;
