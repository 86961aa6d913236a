//! YtDlpSource: general-purpose extractor backend powered by the yt-dlp binary.
//!
//! Downloads the best single file in an mp4 container, never expands
//! playlists, and writes exactly to the job's output path.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::core::formatting::strip_ansi;
use crate::core::process::run_command;
use crate::download::job::DownloadJob;
use crate::download::source::DownloadSource;

/// Download source running yt-dlp as a child process.
#[derive(Debug, Clone)]
pub struct YtDlpSource {
    bin: String,
    /// Wall-clock limit for one run; `None` lets yt-dlp take as long as it needs.
    timeout: Option<Duration>,
}

impl YtDlpSource {
    pub fn new(bin: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Command line arguments for one job.
    pub fn build_args(job: &DownloadJob) -> Vec<String> {
        vec![
            "-f".to_string(),
            config::download::YTDLP_FORMAT.to_string(),
            "--no-playlist".to_string(),
            "--no-progress".to_string(),
            "-o".to_string(),
            job.output_path.to_string_lossy().into_owned(),
            job.source_url.clone(),
        ]
    }
}

/// Last non-empty stderr line, without colour codes.
fn summarize_stderr(stderr: &[u8]) -> String {
    let text = strip_ansi(&String::from_utf8_lossy(stderr));
    text.lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("no output")
        .to_string()
}

#[async_trait]
impl DownloadSource for YtDlpSource {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn download(&self, job: &DownloadJob) -> AppResult<PathBuf> {
        let args = Self::build_args(job);
        log::debug!("Running {} {}", self.bin, args.join(" "));

        let mut cmd = Command::new(&self.bin);
        cmd.args(&args).stdout(Stdio::null()).stderr(Stdio::piped());

        let output = run_command(&mut cmd, self.timeout).await?;
        if !output.status.success() {
            return Err(AppError::Download(format!(
                "yt-dlp exited with {}: {}",
                output.status,
                summarize_stderr(&output.stderr)
            )));
        }

        if !tokio::fs::try_exists(&job.output_path).await.unwrap_or(false) {
            return Err(AppError::Download(format!(
                "yt-dlp finished but {} was not created",
                job.output_path.display()
            )));
        }

        Ok(job.output_path.clone())
    }
}
