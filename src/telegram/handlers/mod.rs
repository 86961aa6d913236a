//! Dispatcher schema and request handlers

pub mod commands;
pub mod membership;
pub mod messages;
pub mod schema;
pub mod types;

pub use messages::{process_link, LinkOutcome};
pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
