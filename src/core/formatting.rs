//! Outbound text formatting.
//!
//! Bot texts are written with `**bold**` markers and sent with HTML parse
//! mode, so every text passes through [`format_bold`] first.

use lazy_regex::regex;

/// Rewrite `**text**` to `<b>text</b>` (non-greedy, pairs left to right).
pub fn format_bold(text: &str) -> String {
    regex!(r"\*\*(.*?)\*\*").replace_all(text, "<b>$1</b>").into_owned()
}

/// Remove ANSI colour sequences (yt-dlp colours its stderr).
pub fn strip_ansi(text: &str) -> String {
    regex!(r"\x1b\[[0-9;]*m").replace_all(text, "").into_owned()
}
