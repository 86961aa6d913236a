use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vidgrab")]
#[command(author, version, about = "Telegram bot that downloads YouTube, Instagram, TikTok and Twitter videos", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot in long polling mode (default)
    Run,

    /// Download a single link without Telegram
    Download {
        /// Video URL (YouTube, Instagram, TikTok or Twitter)
        url: String,

        /// Output directory (defaults to DOWNLOAD_FOLDER)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the user counters
    Stats {
        /// Counters file (defaults to DATA_FILE)
        #[arg(long)]
        data_file: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
