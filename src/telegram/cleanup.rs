//! Delayed message deletion.
//!
//! Every scheduled deletion is a tokio task owned by `DeletionRegistry`,
//! keyed by chat and message. Deletion is best-effort: failures are logged
//! and swallowed. Pending deletions live only in memory and are lost on restart.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use teloxide::types::{ChatId, MessageId};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::telegram::transport::ChatTransport;

type DeletionKey = (ChatId, MessageId);

struct PendingDeletion {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Owner of pending deletion tasks.
#[derive(Clone)]
pub struct DeletionRegistry {
    transport: Arc<dyn ChatTransport>,
    tasks: Arc<DashMap<DeletionKey, PendingDeletion>>,
    next_generation: Arc<AtomicU64>,
}

impl DeletionRegistry {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            tasks: Arc::new(DashMap::new()),
            next_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Delete `message_id` after `delay`.
    ///
    /// Scheduling the same message again replaces the earlier timer.
    pub fn schedule(&self, chat_id: ChatId, message_id: MessageId, delay: Duration) {
        let key = (chat_id, message_id);
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let transport = Arc::clone(&self.transport);
        let tasks = Arc::clone(&self.tasks);
        // The task must not finish before its entry is in the map.
        let (registered_tx, registered_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let _ = registered_rx.await;
            tokio::time::sleep(delay).await;
            match transport.delete_message(chat_id, message_id).await {
                Ok(()) => log::info!("Deleted message {} in chat {} after delay", message_id.0, chat_id),
                Err(e) => log::error!("Error deleting message {} in chat {}: {}", message_id.0, chat_id, e),
            }
            tasks.remove_if(&key, |_, pending| pending.generation == generation);
        });

        if let Some(previous) = self.tasks.insert(key, PendingDeletion { generation, handle }) {
            previous.handle.abort();
        }
        let _ = registered_tx.send(());

        log::debug!(
            "Scheduled deletion of message {} in chat {} in {}s",
            message_id.0,
            chat_id,
            delay.as_secs()
        );
    }

    /// Cancel a pending deletion. Returns `false` if nothing was pending.
    pub fn cancel(&self, chat_id: ChatId, message_id: MessageId) -> bool {
        match self.tasks.remove(&(chat_id, message_id)) {
            Some((_, pending)) => {
                pending.handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, chat_id: ChatId, message_id: MessageId) -> bool {
        self.tasks.contains_key(&(chat_id, message_id))
    }

    /// Number of deletions still waiting to fire.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Drop every pending deletion (shutdown).
    pub fn abort_all(&self) {
        let count = self.tasks.len();
        self.tasks.retain(|_, pending| {
            pending.handle.abort();
            false
        });
        if count > 0 {
            log::info!("Dropped {} pending message deletions", count);
        }
    }
}
