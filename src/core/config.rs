use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration constants for the bot
/// Cached yt-dlp binary path
/// Read once at startup from YTDL_BIN environment variable or defaults to "yt-dlp"
pub static YTDL_BIN: Lazy<String> = Lazy::new(|| env::var("YTDL_BIN").unwrap_or_else(|_| "yt-dlp".to_string()));

/// Download folder path
/// Read from DOWNLOAD_FOLDER environment variable
/// Defaults to the current directory, supports tilde (~) expansion
pub static DOWNLOAD_FOLDER: Lazy<String> =
    Lazy::new(|| env::var("DOWNLOAD_FOLDER").unwrap_or_else(|_| ".".to_string()));

/// Counters store file path
/// Read from DATA_FILE environment variable
/// Default: videoBotData.json
pub static DATA_FILE: Lazy<String> =
    Lazy::new(|| env::var("DATA_FILE").unwrap_or_else(|_| "videoBotData.json".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Link shown on the "Contact & Support" button of the welcome message
pub static SUPPORT_URL: Lazy<String> =
    Lazy::new(|| env::var("SUPPORT_URL").unwrap_or_else(|_| "https://t.me/+6peJqny8QKA5ZDU1".to_string()));

/// Owner configuration
pub mod owner {
    use once_cell::sync::Lazy;

    /// Identifier allowed to run /stats when OWNER_ID is not set
    pub const DEFAULT_OWNER_ID: u64 = 7_574_316_340;

    /// Sole identifier authorized for /stats
    /// Read from OWNER_ID environment variable
    pub static OWNER_ID: Lazy<u64> = Lazy::new(|| {
        std::env::var("OWNER_ID")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_OWNER_ID)
    });
}

/// Third-party lookup endpoints
pub mod endpoints {
    use once_cell::sync::Lazy;
    use std::env;

    /// Instagram fallback (form POST, `q=<url>`)
    pub static SNAPINSTA_API_URL: Lazy<String> = Lazy::new(|| {
        env::var("SNAPINSTA_API_URL").unwrap_or_else(|_| "https://snapinsta.io/api/ajaxSearch".to_string())
    });

    /// TikTok lookup (GET, `?url=<url>`)
    pub static TIKMATE_API_URL: Lazy<String> = Lazy::new(|| {
        env::var("TIKMATE_API_URL").unwrap_or_else(|_| "https://api.tikmate.app/api/lookup".to_string())
    });

    /// Twitter lookup (GET, `?url=<url>`)
    pub static TWDOWN_API_URL: Lazy<String> =
        Lazy::new(|| env::var("TWDOWN_API_URL").unwrap_or_else(|_| "https://twdown.net/download".to_string()));
}

/// Download configuration
pub mod download {
    use super::Duration;
    use once_cell::sync::Lazy;

    /// Timeout for a third-party lookup request (in seconds)
    pub const LOOKUP_TIMEOUT_SECS: u64 = 10;

    /// Timeout for streaming a media file to disk (in seconds)
    pub const STREAM_TIMEOUT_SECS: u64 = 20;

    /// Size of the pieces written to disk while streaming
    pub const STREAM_CHUNK_SIZE: usize = 1024;

    /// Optional wall-clock limit for yt-dlp (in seconds)
    /// Read from YTDLP_TIMEOUT_SECS; unset or 0 means the extractor runs until it exits
    pub static YTDLP_TIMEOUT: Lazy<Option<Duration>> = Lazy::new(|| {
        std::env::var("YTDLP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| parse_timeout_secs(&v))
    });

    /// yt-dlp format selector: best single file in an mp4 container
    pub const YTDLP_FORMAT: &str = "best[ext=mp4]";

    pub fn lookup_timeout() -> Duration {
        Duration::from_secs(LOOKUP_TIMEOUT_SECS)
    }

    pub fn stream_timeout() -> Duration {
        Duration::from_secs(STREAM_TIMEOUT_SECS)
    }

    /// `"0"`, empty and garbage all mean "no limit".
    pub fn parse_timeout_secs(value: &str) -> Option<Duration> {
        match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
            _ => None,
        }
    }
}

/// Delivery configuration
pub mod delivery {
    use super::Duration;

    /// Largest file sent with send_video; anything bigger goes out as a document
    pub const VIDEO_SIZE_LIMIT: u64 = 50 * 1024 * 1024;

    /// Delay before sent and request messages are deleted (in seconds)
    pub const DELETE_DELAY_SECS: u64 = 1800; // 30 minutes

    pub fn delete_delay() -> Duration {
        Duration::from_secs(DELETE_DELAY_SECS)
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API requests (in seconds)
    /// Large enough for 50 MB+ uploads
    pub const REQUEST_TIMEOUT_SECS: u64 = 900; // 15 minutes

    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Runtime settings snapshotted from the environment and handed to every handler.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub owner_id: u64,
    pub data_file: PathBuf,
    pub download_dir: PathBuf,
    pub ytdl_bin: String,
    pub ytdlp_timeout: Option<Duration>,
    pub support_url: String,
    pub snapinsta_api_url: String,
    pub tikmate_api_url: String,
    pub twdown_api_url: String,
    pub delete_delay: Duration,
}

impl BotConfig {
    /// Build the config from the cached environment statics.
    pub fn from_env() -> Self {
        Self {
            owner_id: *owner::OWNER_ID,
            data_file: PathBuf::from(DATA_FILE.as_str()),
            download_dir: PathBuf::from(shellexpand::tilde(DOWNLOAD_FOLDER.as_str()).into_owned()),
            ytdl_bin: YTDL_BIN.clone(),
            ytdlp_timeout: *download::YTDLP_TIMEOUT,
            support_url: SUPPORT_URL.clone(),
            snapinsta_api_url: endpoints::SNAPINSTA_API_URL.clone(),
            tikmate_api_url: endpoints::TIKMATE_API_URL.clone(),
            twdown_api_url: endpoints::TWDOWN_API_URL.clone(),
            delete_delay: delivery::delete_delay(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            owner_id: owner::DEFAULT_OWNER_ID,
            data_file: PathBuf::from("videoBotData.json"),
            download_dir: PathBuf::from("."),
            ytdl_bin: "yt-dlp".to_string(),
            ytdlp_timeout: None,
            support_url: "https://t.me/+6peJqny8QKA5ZDU1".to_string(),
            snapinsta_api_url: "https://snapinsta.io/api/ajaxSearch".to_string(),
            tikmate_api_url: "https://api.tikmate.app/api/lookup".to_string(),
            twdown_api_url: "https://twdown.net/download".to_string(),
            delete_delay: delivery::delete_delay(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_constants() {
        let config = BotConfig::default();
        assert_eq!(config.owner_id, 7574316340);
        assert_eq!(config.delete_delay, Duration::from_secs(1800));
        assert_eq!(config.data_file, PathBuf::from("videoBotData.json"));
    }

    #[test]
    fn test_extractor_has_no_time_limit_by_default() {
        assert_eq!(BotConfig::default().ytdlp_timeout, None);
        assert_eq!(download::parse_timeout_secs(""), None);
        assert_eq!(download::parse_timeout_secs("0"), None);
        assert_eq!(download::parse_timeout_secs("soon"), None);
        assert_eq!(download::parse_timeout_secs(" 600 "), Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_video_limit_is_50_mib() {
        assert_eq!(delivery::VIDEO_SIZE_LIMIT, 52_428_800);
    }
}
