//! Concrete collaborators for the command-line surface.
//!
//! - questions are printed to stdout
//! - uploads go to an HTTP endpoint or the local outbox ([`Uploader`])
//! - page capture fetches the URL set as the active tab ([`PageFetcher`])

mod capture;
mod files;
mod upload;

use std::sync::Arc;

use anyhow::Result;
pub use capture::{ActiveTab, PageFetcher};
pub use files::file_ref_from_path;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use inputbar_core::config::Config;
use inputbar_core::{Collaborators, PageCapture, Source, UploadPayload, UploadReport};
pub use upload::Uploader;

pub struct CliCollaborators {
    uploader: Arc<Uploader>,
    fetcher: Arc<PageFetcher>,
    active_tab: ActiveTab,
}

impl CliCollaborators {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            uploader: Arc::new(Uploader::from_config(&config.upload)?),
            fetcher: Arc::new(PageFetcher::from_config(&config.capture)?),
            active_tab: ActiveTab::default(),
        })
    }

    /// Handle for pointing page capture at a URL.
    pub fn active_tab(&self) -> ActiveTab {
        self.active_tab.clone()
    }
}

impl Collaborators for CliCollaborators {
    fn submit_query(&self, text: String) {
        tracing::debug!(chars = text.chars().count(), "Forwarding question");
        println!("query: {text}");
    }

    fn upload_data(
        &self,
        payload: UploadPayload,
        source: Source,
    ) -> BoxFuture<'static, Result<UploadReport>> {
        let uploader = Arc::clone(&self.uploader);
        async move { uploader.upload(payload, source).await }.boxed()
    }

    fn capture_page(&self) -> BoxFuture<'static, Result<PageCapture>> {
        let fetcher = Arc::clone(&self.fetcher);
        let url = self.active_tab.get();
        async move { fetcher.capture(url).await }.boxed()
    }
}
