//! vidgrab - Telegram bot that turns video links into video files
//!
//! Users send a YouTube, Instagram, TikTok or Twitter link; the bot
//! downloads the clip through the matching adapter, uploads it back to the
//! chat and removes both messages after half an hour.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging and small shared helpers
//! - `storage`: JSON user counters
//! - `download`: Link classification, download adapters and delivery
//! - `telegram`: Telegram bot integration and handlers
//! - `cli`: Command-line interface

pub mod cli;
pub mod core;
pub mod download;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use core::{config, AppError, AppResult, BotConfig};
pub use download::{DownloadJob, Platform, SourceRegistry};
pub use storage::{CounterRecord, CountersStore};
pub use telegram::{schema, HandlerDeps};
