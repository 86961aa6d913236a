//! Core utilities, configuration, and common functionality

pub mod config;
pub mod error;
pub mod formatting;
pub mod logging;
pub mod process;

// Re-exports for convenience
pub use config::BotConfig;
pub use error::{AppError, AppResult};
pub use logging::{init_logger, install_panic_hook, log_extractor_availability};
