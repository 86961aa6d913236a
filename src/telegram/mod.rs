//! Telegram bot integration and handlers

pub mod bot;
pub mod cleanup;
pub mod handlers;
pub mod outbound;
pub mod texts;
pub mod transport;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use cleanup::DeletionRegistry;
pub use handlers::{process_link, schema, HandlerDeps, HandlerError, LinkOutcome};
pub use outbound::Outbound;
pub use teloxide::Bot;
pub use transport::{ChatTransport, TelegramTransport};
