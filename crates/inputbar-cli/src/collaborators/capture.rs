//! Page capture over HTTP (or `file://` for local snapshots).

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use inputbar_core::PageCapture;
use inputbar_core::config::CaptureConfig;
use url::Url;

/// The URL the terminal treats as the "active tab".
///
/// Shared between the command loop, which sets it, and the capture
/// collaborator, which reads it when a capture starts.
#[derive(Debug, Clone, Default)]
pub struct ActiveTab(Arc<Mutex<Option<String>>>);

impl ActiveTab {
    pub fn set(&self, url: impl Into<String>) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(url.into());
        }
    }

    pub fn get(&self) -> Option<String> {
        self.0.lock().ok().and_then(|slot| slot.clone())
    }
}

pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn from_config(config: &CaptureConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build capture HTTP client")?;
        Ok(Self { client })
    }

    /// Captures the page at `url`.
    ///
    /// With no active URL an empty capture is returned so the session can
    /// report it the same way a tab without a URL would be reported.
    pub async fn capture(&self, url: Option<String>) -> Result<PageCapture> {
        let Some(raw) = url else {
            return Ok(PageCapture::default());
        };
        let url = Url::parse(&raw).with_context(|| format!("Invalid page URL '{raw}'"))?;

        let content = if url.scheme() == "file" {
            let path = url
                .to_file_path()
                .map_err(|()| anyhow::anyhow!("Invalid file URL '{raw}'"))?;
            tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?
        } else {
            self.client
                .get(url.clone())
                .send()
                .await
                .with_context(|| format!("Failed to fetch {url}"))?
                .error_for_status()
                .with_context(|| format!("Page request to {url} failed"))?
                .text()
                .await
                .context("Failed to read page body")?
        };

        tracing::debug!(%url, bytes = content.len(), "Fetched page");
        Ok(PageCapture {
            url: Some(url.to_string()),
            content,
        })
    }
}
