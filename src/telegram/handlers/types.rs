//! Handler types and dependencies

use std::sync::Arc;

use teloxide::types::{ChatId, User};

use crate::core::config::BotConfig;
use crate::download::source::SourceRegistry;
use crate::storage::CountersStore;
use crate::telegram::cleanup::DeletionRegistry;
use crate::telegram::outbound::Outbound;
use crate::telegram::transport::ChatTransport;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers.
///
/// Built once in `main` and cloned into every dispatcher branch.
#[derive(Clone)]
pub struct HandlerDeps {
    pub config: Arc<BotConfig>,
    pub counters: Arc<CountersStore>,
    pub sources: Arc<SourceRegistry>,
    pub transport: Arc<dyn ChatTransport>,
    pub deletions: DeletionRegistry,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(
        config: Arc<BotConfig>,
        counters: Arc<CountersStore>,
        sources: Arc<SourceRegistry>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        let deletions = DeletionRegistry::new(Arc::clone(&transport));
        Self {
            config,
            counters,
            sources,
            transport,
            deletions,
        }
    }

    /// Formatting sender bound to `chat_id`.
    pub fn outbound(&self, chat_id: ChatId) -> Outbound {
        Outbound::new(Arc::clone(&self.transport), chat_id)
    }
}

/// Telegram user id as stored in the counters file.
pub fn user_key(user: &User) -> Option<i64> {
    i64::try_from(user.id.0).ok()
}
