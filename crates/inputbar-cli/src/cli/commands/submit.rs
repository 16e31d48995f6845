//! One-shot submission.
//!
//! Feeds a single input through the session and exits non-zero when it is
//! rejected or the upload does not succeed.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use inputbar_core::SessionEvent;
use inputbar_core::config::Config;
use tokio::io::AsyncReadExt;

use super::Surface;
use crate::collaborators::file_ref_from_path;
use crate::console::UploadResult;

pub enum Input {
    Text(String),
    /// Read the text from stdin.
    Stdin,
    File(PathBuf),
    /// Capture the page at this URL.
    Page(String),
}

pub async fn run(config: &Config, input: Input) -> Result<()> {
    let mut surface = Surface::new(config)?;

    match input {
        Input::Text(text) => surface.runtime.dispatch(SessionEvent::TextChanged(text)),
        Input::Stdin => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("read stdin")?;
            let text = text.trim_end_matches(['\r', '\n']).to_string();
            surface.runtime.dispatch(SessionEvent::TextChanged(text));
        }
        Input::File(path) => {
            let file = file_ref_from_path(&path)?;
            surface.runtime.dispatch(SessionEvent::FileSelected(file));
        }
        Input::Page(url) => {
            surface.active_tab.set(url);
            surface.runtime.dispatch(SessionEvent::CaptureRequested);
            surface.runtime.settle().await;
        }
    }
    ensure_accepted(&surface)?;

    if !surface.runtime.view().can_submit {
        bail!("Nothing to submit.");
    }
    surface.runtime.dispatch(SessionEvent::SubmitRequested);
    ensure_accepted(&surface)?;
    surface.runtime.settle().await;

    match surface.observer.take_upload_result() {
        Some(UploadResult::Failed(message)) => bail!("Upload failed: {message}"),
        Some(UploadResult::Errored(error)) => bail!("Upload error: {error}"),
        Some(UploadResult::Succeeded(_)) | None => Ok(()),
    }
}

fn ensure_accepted(surface: &Surface) -> Result<()> {
    match surface.blocking_validation() {
        Some(validation) => bail!("{}", validation.message),
        None => Ok(()),
    }
}
