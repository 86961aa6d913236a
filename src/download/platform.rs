//! Link validation and platform routing

use lazy_regex::regex;
use std::fmt;

/// Supported source platforms, in routing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    YouTube,
    Instagram,
    TikTok,
    Twitter,
}

/// Substring table checked in order; the first entry found in the URL wins.
const PLATFORM_TABLE: &[(&str, Platform)] = &[
    ("youtube.com", Platform::YouTube),
    ("youtu.be", Platform::YouTube),
    ("instagram.com", Platform::Instagram),
    ("tiktok.com", Platform::TikTok),
    ("twitter.com", Platform::Twitter),
];

impl Platform {
    pub const ALL: [Platform; 4] = [Platform::YouTube, Platform::Instagram, Platform::TikTok, Platform::Twitter];

    /// Route a URL by substring. `None` means the link is unsupported.
    pub fn classify(url: &str) -> Option<Self> {
        PLATFORM_TABLE
            .iter()
            .find(|(needle, _)| url.contains(needle))
            .map(|(_, platform)| *platform)
    }

    /// Prefix used for downloaded file names.
    pub fn file_prefix(self) -> &'static str {
        match self {
            Platform::YouTube => "youtube",
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
            Platform::Twitter => "twitter",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::YouTube => "YouTube",
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::Twitter => "Twitter",
        };
        f.write_str(name)
    }
}

/// Returns the link at the start of a message, or `None` if the message
/// does not begin with `http://` or `https://` followed by non-space characters.
pub fn extract_url(text: &str) -> Option<&str> {
    regex!(r"^https?://\S+").find(text.trim()).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_url_requires_scheme_at_start() {
        assert_eq!(extract_url("https://youtu.be/abc123"), Some("https://youtu.be/abc123"));
        assert_eq!(extract_url("  http://x.y/z  "), Some("http://x.y/z"));
        assert_eq!(extract_url("look at https://youtu.be/abc"), None);
        assert_eq!(extract_url("https://"), None);
        assert_eq!(extract_url("ftp://host/file"), None);
        assert_eq!(extract_url(""), None);
    }

    #[test]
    fn test_extract_url_stops_at_whitespace() {
        assert_eq!(
            extract_url("https://www.instagram.com/reel/xyz please"),
            Some("https://www.instagram.com/reel/xyz")
        );
    }

    #[test]
    fn test_classify_table() {
        assert_eq!(Platform::classify("https://www.youtube.com/watch?v=1"), Some(Platform::YouTube));
        assert_eq!(Platform::classify("https://youtu.be/abc123"), Some(Platform::YouTube));
        assert_eq!(Platform::classify("https://instagram.com/p/1"), Some(Platform::Instagram));
        assert_eq!(Platform::classify("https://vm.tiktok.com/ZM1/"), Some(Platform::TikTok));
        assert_eq!(Platform::classify("https://twitter.com/u/status/1"), Some(Platform::Twitter));
        assert_eq!(Platform::classify("https://vimeo.com/1"), None);
    }

    #[test]
    fn test_classify_first_table_entry_wins() {
        assert_eq!(
            Platform::classify("https://tiktok.com/@u/video/1?ref=twitter.com"),
            Some(Platform::TikTok)
        );
        assert_eq!(
            Platform::classify("https://twitter.com/share?u=instagram.com"),
            Some(Platform::Instagram)
        );
    }
}
