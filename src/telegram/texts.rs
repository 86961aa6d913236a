//! User-facing texts. `**bold**` markers are rendered by `Outbound`.

pub const WELCOME: &str = "👋 **Welcome to Video Downloader Bot!**\n\n\
    📌 Send me a **YouTube**, **Instagram**, **TikTok**, or **Twitter** video link, and I'll download it for you! 🎥";

pub const HELP: &str = "ℹ️ **How to Use:**\n\n\
    1️⃣ Send me a valid video link from YouTube, Instagram, TikTok, or Twitter.\n\
    2️⃣ Wait for processing, and I'll send your video! 🎬\n\n\
    ⚠️ **Note:** Videos are deleted after 30 minutes to prevent copyright issues.";

pub const HELP_BUTTON: &str = "📜 Help";
pub const SUPPORT_BUTTON: &str = "💬 Contact & Support";
pub const HELP_CALLBACK: &str = "help";

pub const PROCESSING: &str = "⏳ **Processing your request... This may take a minute.**";
pub const INVALID_URL: &str = "❌ **Invalid URL!** Please send a valid video link.";
pub const DOWNLOAD_FAILED: &str = "❌ **Failed to download the video. Please try again.**";
pub const SEND_FAILED: &str = "❌ **Failed to send the file. Please try again.**";

pub const VIDEO_CAPTION: &str =
    "🎥 Here is your video.\n\n🚀 **This message will be deleted in 30 minutes to prevent copyright issues.**";
pub const DOCUMENT_CAPTION: &str =
    "📁 Here is your video.\n\n🚀 **This message will be deleted in 30 minutes to prevent copyright issues.**";

pub const STATS_UNAUTHORIZED: &str = "❌ You are not authorized to view stats!";

pub fn stats(total_users: u64, blocked_users: u64) -> String {
    format!(
        "📊 **Bot Stats**:\n\n\
        👥 **Total Users:** {}\n\
        🚫 **Blocked Users:** {}\n",
        total_users, blocked_users
    )
}
