//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - A panic hook that routes panics through the logger
//! - An extractor availability check run at startup

use anyhow::Result;
use simplelog::*;
use std::fs::File;
use std::process::Stdio;

use crate::core::process::run_with_timeout;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to create the file or a logger is already set
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Log panics instead of letting them print raw to stderr.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));
}

/// Logs whether the extractor binary can be executed.
///
/// A missing yt-dlp is not fatal: TikTok and Twitter links go through
/// lookup services and keep working.
pub async fn log_extractor_availability(ytdl_bin: &str) {
    let mut cmd = tokio::process::Command::new(ytdl_bin);
    cmd.arg("--version").stdout(Stdio::piped()).stderr(Stdio::null());

    match run_with_timeout(&mut cmd, std::time::Duration::from_secs(10)).await {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            log::info!("✅ {} version: {}", ytdl_bin, version.trim());
        }
        Ok(output) => {
            log::warn!("⚠️  {} --version exited with {}", ytdl_bin, output.status);
        }
        Err(e) => {
            log::error!("❌ {} is not available: {}", ytdl_bin, e);
            log::error!("   YouTube and Instagram downloads will fall back or FAIL");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("app.log");
        assert!(!log_path.exists());

        // The file is created before the global logger is installed.
        let _ = init_logger(log_path.to_str().unwrap());
        assert!(log_path.exists());
    }

    #[tokio::test]
    async fn test_missing_extractor_does_not_panic() {
        log_extractor_availability("definitely-not-a-real-binary-vidgrab").await;
    }
}
