//! Platform download adapters.
//!
//! Provides the `DownloadSource` trait that every adapter implements and a
//! `SourceRegistry` that routes a classified `Platform` to its adapter.
//!
//! Built-in backends:
//! - `YtDlpSource`: YouTube via the yt-dlp binary
//! - `InstagramSource`: yt-dlp first, Snapinsta lookup as fallback
//! - `LookupSource`: TikTok (TikMate) and Twitter (twdown) JSON lookups
//!
//! `http::stream_to_file` is the shared streamed download used after a lookup.

pub mod http;
pub mod instagram;
pub mod lookup;
pub mod ytdlp;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::config::BotConfig;
use crate::core::error::AppResult;
use crate::download::job::DownloadJob;
use crate::download::platform::Platform;

pub use instagram::InstagramSource;
pub use lookup::LookupSource;
pub use ytdlp::YtDlpSource;

/// Trait for platform adapters.
///
/// An adapter turns `job.source_url` into a media file at `job.output_path`
/// (or another path it reports). Adapters are stateless between calls.
#[async_trait]
pub trait DownloadSource: Send + Sync {
    /// Human-readable name of this source (e.g., "yt-dlp", "tikmate")
    fn name(&self) -> &str;

    /// Fetch the media and return the path of the written file.
    async fn download(&self, job: &DownloadJob) -> AppResult<PathBuf>;
}

/// Routes platforms to adapters.
#[derive(Default, Clone)]
pub struct SourceRegistry {
    sources: HashMap<Platform, Arc<dyn DownloadSource>>,
}

impl SourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the adapter for a platform.
    pub fn register(&mut self, platform: Platform, source: Arc<dyn DownloadSource>) {
        self.sources.insert(platform, source);
    }

    pub fn resolve(&self, platform: Platform) -> Option<Arc<dyn DownloadSource>> {
        self.sources.get(&platform).cloned()
    }

    /// Build the production registry from config.
    pub fn from_config(config: &BotConfig) -> AppResult<Self> {
        let client = http::build_client()?;
        let ytdlp = YtDlpSource::new(config.ytdl_bin.clone()).with_timeout(config.ytdlp_timeout);

        let mut registry = Self::new();
        registry.register(Platform::YouTube, Arc::new(ytdlp.clone()));
        registry.register(
            Platform::Instagram,
            Arc::new(InstagramSource::new(ytdlp, client.clone(), config.snapinsta_api_url.clone())),
        );
        registry.register(
            Platform::TikTok,
            Arc::new(LookupSource::tikmate(client.clone(), config.tikmate_api_url.clone())),
        );
        registry.register(
            Platform::Twitter,
            Arc::new(LookupSource::twdown(client, config.twdown_api_url.clone())),
        );
        Ok(registry)
    }

    /// Run the adapter for `job.platform`.
    ///
    /// This is the adapter boundary: failures are logged here and come back
    /// as `None`, never as an error.
    pub async fn fetch(&self, job: &mut DownloadJob) -> Option<PathBuf> {
        let Some(source) = self.resolve(job.platform) else {
            log::error!("No download source registered for {}", job.platform);
            return None;
        };

        log::info!("📥 {} download via {}: {}", job.platform, source.name(), job.source_url);
        match source.download(job).await {
            Ok(path) => {
                log::info!("✅ {} download finished: {}", job.platform, path.display());
                job.local_path = Some(path.clone());
                Some(path)
            }
            Err(e) => {
                log::error!("{} download error ({}): {}", job.platform, source.name(), e);
                None
            }
        }
    }
}
