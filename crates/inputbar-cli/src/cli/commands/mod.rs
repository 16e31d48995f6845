//! CLI command handlers.

pub mod config;
pub mod session;
pub mod submit;

use std::sync::Arc;

use anyhow::Result;
use inputbar_core::{Observer, SessionRuntime};
use inputbar_core::config::Config;
use inputbar_core::session::Validation;

use crate::collaborators::{ActiveTab, CliCollaborators};
use crate::console::ConsoleObserver;

/// A session runtime wired to the terminal.
struct Surface {
    runtime: SessionRuntime<CliCollaborators>,
    active_tab: ActiveTab,
    observer: Arc<ConsoleObserver>,
}

impl Surface {
    fn new(config: &Config) -> Result<Self> {
        let collaborators = CliCollaborators::from_config(config)?;
        let active_tab = collaborators.active_tab();
        let observer = Arc::new(ConsoleObserver::default());
        let runtime = SessionRuntime::with_observer(
            config.input.clone(),
            collaborators,
            Arc::clone(&observer) as Arc<dyn Observer>,
        );
        Ok(Self {
            runtime,
            active_tab,
            observer,
        })
    }

    /// The current validation, if it blocks progress.
    fn blocking_validation(&self) -> Option<&Validation> {
        self.runtime
            .session()
            .validation
            .as_ref()
            .filter(|validation| validation.is_error())
    }
}
