//! Common test utilities
//!
//! This module is shared across all integration tests

pub mod fixtures;
pub mod transport;

#[allow(unused_imports)]
pub use fixtures::{test_chat_id, write_sized_file, FailingSource, StubSource, TestEnvironment};
#[allow(unused_imports)]
pub use transport::{MockTransport, SentItem};
