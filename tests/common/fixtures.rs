//! Test environment and stub download sources

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;
use teloxide::types::ChatId;
use vidgrab::core::error::{AppError, AppResult};
use vidgrab::download::{DownloadJob, DownloadSource, SourceRegistry};
use vidgrab::storage::CountersStore;
use vidgrab::telegram::HandlerDeps;
use vidgrab::BotConfig;

use super::transport::MockTransport;

pub fn test_chat_id() -> ChatId {
    ChatId(123456789)
}

/// Create a sparse file of exactly `size` bytes.
pub fn write_sized_file(path: &Path, size: u64) {
    let file = std::fs::File::create(path).unwrap();
    file.set_len(size).unwrap();
}

/// Source that "downloads" by writing a file of a fixed size to the job path.
pub struct StubSource {
    pub size: u64,
}

#[async_trait]
impl DownloadSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn download(&self, job: &DownloadJob) -> AppResult<PathBuf> {
        write_sized_file(&job.output_path, self.size);
        Ok(job.output_path.clone())
    }
}

/// Source that always fails.
pub struct FailingSource;

#[async_trait]
impl DownloadSource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    async fn download(&self, _job: &DownloadJob) -> AppResult<PathBuf> {
        Err(AppError::Download("service unavailable".to_string()))
    }
}

/// Handler dependencies wired to a temp directory and a recording transport.
pub struct TestEnvironment {
    pub dir: TempDir,
    pub transport: Arc<MockTransport>,
    pub deps: HandlerDeps,
}

impl TestEnvironment {
    pub fn new(sources: SourceRegistry) -> Self {
        Self::with_config(sources, |_| {})
    }

    pub fn with_config(sources: SourceRegistry, adjust: impl FnOnce(&mut BotConfig)) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = BotConfig {
            data_file: dir.path().join("videoBotData.json"),
            download_dir: dir.path().to_path_buf(),
            ..BotConfig::default()
        };
        adjust(&mut config);

        let transport = Arc::new(MockTransport::new());
        let counters = Arc::new(CountersStore::new(config.data_file.clone()));
        let deps = HandlerDeps::new(Arc::new(config), counters, Arc::new(sources), transport.clone());

        Self { dir, transport, deps }
    }

    /// Registry that answers every platform with the given source.
    pub fn registry_with(source: Arc<dyn DownloadSource>) -> SourceRegistry {
        let mut registry = SourceRegistry::new();
        for platform in vidgrab::Platform::ALL {
            registry.register(platform, Arc::clone(&source));
        }
        registry
    }

    pub fn downloads(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.dir.path())
            .unwrap()
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "mp4"))
            .collect()
    }
}
