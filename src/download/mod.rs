//! Download management: routing, adapters and delivery

pub mod job;
pub mod platform;
pub mod send;
pub mod source;

// Re-exports for convenience
pub use job::DownloadJob;
pub use platform::{extract_url, Platform};
pub use send::{deliver, UploadMethod};
pub use source::{DownloadSource, SourceRegistry};
