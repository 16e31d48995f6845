//! Session runtime - owns the state, executes effects, collects results.
//!
//! This is the boundary where side effects happen. The reducer stays pure and
//! produces effects; this module calls collaborators and the observer.
//!
//! ## Inbox Pattern
//!
//! Async handlers send their result events to `inbox_tx`; the runtime drains
//! `inbox_rx` (non-blocking via [`SessionRuntime::drain_inbox`], or awaiting
//! via [`SessionRuntime::settle`]) and feeds them back through the reducer.
//!
//! No timeout is applied: a collaborator that never resolves keeps its busy
//! flag set.

mod collaborators;
mod handlers;

use std::sync::Arc;

pub use collaborators::{Collaborators, UploadReport};
use tokio::sync::mpsc;

use crate::config::InputConfig;
use crate::effects::SessionEffect;
use crate::events::SessionEvent;
use crate::observe::{Observer, TracingObserver};
use crate::session::{InputSession, SessionView};
use crate::state::WidgetState;
use crate::update;

/// Drives one widget instance.
pub struct SessionRuntime<C: Collaborators> {
    /// Widget state. Mutated only through the reducer.
    state: WidgetState,
    collaborators: Arc<C>,
    observer: Arc<dyn Observer>,
    /// Inbox sender - handlers send result events here.
    inbox_tx: mpsc::UnboundedSender<SessionEvent>,
    /// Inbox receiver - drained by the runtime.
    inbox_rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl<C: Collaborators> SessionRuntime<C> {
    /// Creates a runtime that logs through `tracing`.
    pub fn new(config: InputConfig, collaborators: C) -> Self {
        Self::with_observer(config, collaborators, Arc::new(TracingObserver))
    }

    /// Creates a runtime reporting notices to `observer`.
    pub fn with_observer(
        config: InputConfig,
        collaborators: C,
        observer: Arc<dyn Observer>,
    ) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            state: WidgetState::new(config),
            collaborators: Arc::new(collaborators),
            observer,
            inbox_tx,
            inbox_rx,
        }
    }

    pub fn session(&self) -> &InputSession {
        &self.state.session
    }

    pub fn config(&self) -> &InputConfig {
        &self.state.config
    }

    /// Display flags for the embedding surface.
    pub fn view(&self) -> SessionView {
        SessionView::from_state(&self.state)
    }

    /// Runs one event through the reducer and executes its effects.
    ///
    /// Must be called from within a tokio runtime: upload and capture effects
    /// spawn tasks.
    pub fn dispatch(&mut self, event: SessionEvent) {
        let effects = update::update(&mut self.state, event);
        self.execute_effects(effects);
    }

    /// Dispatches every result already waiting in the inbox.
    ///
    /// Returns how many events were processed.
    pub fn drain_inbox(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.inbox_rx.try_recv() {
            self.dispatch(event);
            processed += 1;
        }
        processed
    }

    /// Waits until no upload or capture is in flight.
    pub async fn settle(&mut self) {
        while self.state.session.tasks.is_any_running() {
            let Some(event) = self.inbox_rx.recv().await else {
                break;
            };
            self.dispatch(event);
        }
    }

    fn execute_effects(&mut self, effects: Vec<SessionEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: SessionEffect) {
        match effect {
            SessionEffect::Report(notice) => self.observer.notice(&notice),
            SessionEffect::SubmitQuery { text } => self.collaborators.submit_query(text),
            SessionEffect::UploadData {
                task,
                payload,
                source,
            } => handlers::spawn_upload(
                Arc::clone(&self.collaborators),
                self.inbox_tx.clone(),
                task,
                payload,
                source,
            ),
            SessionEffect::CapturePage { task } => handlers::spawn_capture(
                Arc::clone(&self.collaborators),
                self.inbox_tx.clone(),
                task,
            ),
        }
    }
}
