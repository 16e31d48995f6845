//! Delivery of data payloads.
//!
//! With `upload.endpoint` configured, payloads are POSTed as multipart forms.
//! Without one they land in the outbox directory, each next to a JSON record.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use inputbar_core::config::{UploadConfig, paths};
use inputbar_core::{FileRef, Source, UploadPayload, UploadReport};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

pub enum Uploader {
    Http { client: reqwest::Client, endpoint: Url },
    Outbox { dir: PathBuf },
}

/// Reply body an endpoint may send back.
#[derive(Debug, Deserialize)]
struct EndpointReply {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Sidecar written next to every outbox entry.
#[derive(Debug, Serialize)]
struct OutboxRecord<'a> {
    id: String,
    source: Source,
    /// Original file name, for file uploads.
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    bytes: u64,
    created_at: String,
}

impl Uploader {
    pub fn from_config(config: &UploadConfig) -> Result<Self> {
        if let Some(endpoint) = &config.endpoint {
            let endpoint = Url::parse(endpoint)
                .with_context(|| format!("Invalid upload endpoint '{endpoint}'"))?;
            let client = reqwest::Client::builder()
                .build()
                .context("Failed to build upload HTTP client")?;
            return Ok(Self::Http { client, endpoint });
        }

        let dir = config
            .outbox_dir
            .as_ref()
            .map_or_else(paths::outbox_dir, PathBuf::from);
        Ok(Self::Outbox { dir })
    }

    pub async fn upload(&self, payload: UploadPayload, source: Source) -> Result<UploadReport> {
        match self {
            Self::Http { client, endpoint } => post(client, endpoint, payload, source).await,
            Self::Outbox { dir } => store(dir, payload, source).await,
        }
    }
}

async fn post(
    client: &reqwest::Client,
    endpoint: &Url,
    payload: UploadPayload,
    source: Source,
) -> Result<UploadReport> {
    let part = match payload {
        UploadPayload::Text(text) => Part::text(text)
            .file_name(text_file_name(source))
            .mime_str(text_mime(source))?,
        UploadPayload::File(file) => {
            let bytes = tokio::fs::read(file_path(&file)?)
                .await
                .with_context(|| format!("Failed to read {}", file.name))?;
            let mime = file
                .mime_type
                .clone()
                .filter(|mime| !mime.is_empty())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            Part::bytes(bytes).file_name(file.name).mime_str(&mime)?
        }
    };
    let form = Form::new()
        .text("source", source.as_str())
        .part("content", part);

    let response = client
        .post(endpoint.clone())
        .multipart(form)
        .send()
        .await
        .with_context(|| format!("Failed to reach {endpoint}"))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read upload response")?;

    if let Ok(reply) = serde_json::from_str::<EndpointReply>(&body) {
        let message = reply.message.unwrap_or_else(|| status.to_string());
        return Ok(if reply.success {
            UploadReport::success(message)
        } else {
            UploadReport::failure(message)
        });
    }

    let body = body.trim();
    if status.is_success() {
        let message = if body.is_empty() { status.to_string() } else { body.to_string() };
        Ok(UploadReport::success(message))
    } else {
        Ok(UploadReport::failure(format!("HTTP {status}: {body}")))
    }
}

async fn store(dir: &Path, payload: UploadPayload, source: Source) -> Result<UploadReport> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create outbox {}", dir.display()))?;

    let id = Uuid::new_v4().to_string();
    let (target, name, bytes) = match &payload {
        UploadPayload::Text(text) => {
            let target = dir.join(format!("{id}.{}", text_extension(source)));
            tokio::fs::write(&target, text)
                .await
                .with_context(|| format!("Failed to write {}", target.display()))?;
            (target, None, text.len() as u64)
        }
        UploadPayload::File(file) => {
            let ext = file.extension().unwrap_or("bin").to_ascii_lowercase();
            let target = dir.join(format!("{id}.{ext}"));
            let bytes = tokio::fs::copy(file_path(file)?, &target)
                .await
                .with_context(|| format!("Failed to copy {}", file.name))?;
            (target, Some(file.name.as_str()), bytes)
        }
    };

    let record = OutboxRecord {
        id: id.clone(),
        source,
        name,
        bytes,
        created_at: Utc::now().to_rfc3339(),
    };
    let sidecar = dir.join(format!("{id}.json"));
    let json = serde_json::to_string_pretty(&record).context("Failed to encode outbox record")?;
    tokio::fs::write(&sidecar, json)
        .await
        .with_context(|| format!("Failed to write {}", sidecar.display()))?;

    tracing::debug!(path = %target.display(), bytes, "Stored upload in outbox");
    Ok(UploadReport::success(format!("saved to {}", target.display())))
}

fn file_path(file: &FileRef) -> Result<&Path> {
    match file.path.as_deref() {
        Some(path) => Ok(path),
        None => bail!("{} has no location on disk", file.name),
    }
}

fn text_extension(source: Source) -> &'static str {
    match source {
        Source::Page => "html",
        Source::Text | Source::File => "txt",
    }
}

fn text_file_name(source: Source) -> &'static str {
    match source {
        Source::Page => "page.html",
        Source::Text | Source::File => "content.txt",
    }
}

fn text_mime(source: Source) -> &'static str {
    match source {
        Source::Page => "text/html",
        Source::Text | Source::File => "text/plain",
    }
}
