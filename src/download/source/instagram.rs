//! Instagram adapter: yt-dlp first, Snapinsta as fallback.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::download::job::DownloadJob;
use crate::download::source::http::stream_to_file;
use crate::download::source::{DownloadSource, YtDlpSource};

#[derive(Debug, Clone)]
pub struct InstagramSource {
    primary: YtDlpSource,
    client: Client,
    snapinsta_endpoint: String,
}

impl InstagramSource {
    pub fn new(primary: YtDlpSource, client: Client, snapinsta_endpoint: impl Into<String>) -> Self {
        Self {
            primary,
            client,
            snapinsta_endpoint: snapinsta_endpoint.into(),
        }
    }

    /// POST `q=<url>` to Snapinsta and return the first media link.
    async fn snapinsta_lookup(&self, url: &str) -> AppResult<String> {
        let response = self
            .client
            .post(&self.snapinsta_endpoint)
            .form(&[("q", url)])
            .timeout(config::download::lookup_timeout())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::HttpStatus(response.status()));
        }

        let body: Value = serde_json::from_str(&response.text().await?)?;
        first_link(&body).ok_or(AppError::MissingField {
            service: "snapinsta",
            field: "links[0].url",
        })
    }
}

/// `links[0].url` from a Snapinsta response.
fn first_link(body: &Value) -> Option<String> {
    body.get("links")?
        .get(0)?
        .get("url")?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl DownloadSource for InstagramSource {
    fn name(&self) -> &str {
        "yt-dlp+snapinsta"
    }

    async fn download(&self, job: &DownloadJob) -> AppResult<PathBuf> {
        match self.primary.download(job).await {
            Ok(path) => return Ok(path),
            Err(e) => log::warn!("yt-dlp failed: {}. Trying Snapinsta API...", e),
        }

        let video_url = self.snapinsta_lookup(&job.source_url).await?;
        stream_to_file(&self.client, &video_url, &job.output_path).await?;
        Ok(job.output_path.clone())
    }
}
