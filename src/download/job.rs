use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::download::platform::Platform;

/// One link being downloaded. Lives for a single request and is never persisted.
#[derive(Debug, Clone)]
pub struct DownloadJob {
    pub source_url: String,
    pub platform: Platform,
    /// Where adapters write the file.
    pub output_path: PathBuf,
    /// Set once an adapter produced a file.
    pub local_path: Option<PathBuf>,
}

impl DownloadJob {
    /// Create a job writing to `<dir>/<platform>_<unix millis>.mp4`.
    pub fn new(source_url: impl Into<String>, platform: Platform, dir: &Path) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let output_path = dir.join(format!("{}_{}.mp4", platform.file_prefix(), millis));

        Self {
            source_url: source_url.into(),
            platform,
            output_path,
            local_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_uses_prefix_and_timestamp() {
        let job = DownloadJob::new("https://youtu.be/abc", Platform::YouTube, Path::new("/tmp/dl"));
        let name = job.output_path.file_name().unwrap().to_str().unwrap();

        assert!(job.output_path.starts_with("/tmp/dl"));
        assert!(name.starts_with("youtube_"));
        assert!(name.ends_with(".mp4"));
        assert!(name["youtube_".len()..name.len() - 4].parse::<u128>().is_ok());
        assert!(job.local_path.is_none());
    }
}
