//! JSON lookup services that resolve a post URL to a direct video link.
//!
//! TikTok goes through TikMate (`videoUrl`), Twitter through twdown
//! (`video_url`). Both are `GET <endpoint>?url=<post url>`.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::download::job::DownloadJob;
use crate::download::source::http::stream_to_file;
use crate::download::source::DownloadSource;

/// Adapter for a lookup service returning `{ "<field>": "<video url>" }`.
#[derive(Debug, Clone)]
pub struct LookupSource {
    service: &'static str,
    field: &'static str,
    endpoint: String,
    client: Client,
}

impl LookupSource {
    pub fn new(service: &'static str, field: &'static str, client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            service,
            field,
            endpoint: endpoint.into(),
            client,
        }
    }

    /// TikTok lookup via TikMate.
    pub fn tikmate(client: Client, endpoint: impl Into<String>) -> Self {
        Self::new("tikmate", "videoUrl", client, endpoint)
    }

    /// Twitter lookup via twdown.
    pub fn twdown(client: Client, endpoint: impl Into<String>) -> Self {
        Self::new("twdown", "video_url", client, endpoint)
    }

    /// Ask the service for the direct video link.
    pub async fn lookup(&self, url: &str) -> AppResult<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("url", url)])
            .timeout(config::download::lookup_timeout())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::HttpStatus(response.status()));
        }

        let body: Value = serde_json::from_str(&response.text().await?)?;
        video_url_field(&body, self.field).ok_or(AppError::MissingField {
            service: self.service,
            field: self.field,
        })
    }
}

/// Non-empty string under `field`.
pub(crate) fn video_url_field(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl DownloadSource for LookupSource {
    fn name(&self) -> &str {
        self.service
    }

    async fn download(&self, job: &DownloadJob) -> AppResult<PathBuf> {
        let video_url = self.lookup(&job.source_url).await?;
        stream_to_file(&self.client, &video_url, &job.output_path).await?;
        Ok(job.output_path.clone())
    }
}
