//! Single path for every outbound text.
//!
//! Texts are written with `**bold**` markers; `Outbound` renders them to
//! HTML before handing them to the transport.

use std::path::Path;
use std::sync::Arc;

use teloxide::types::{ChatId, InlineKeyboardMarkup, MessageId};

use crate::core::error::AppResult;
use crate::core::formatting::format_bold;
use crate::telegram::transport::ChatTransport;

/// Formatting wrapper around a `ChatTransport`, bound to one chat.
#[derive(Clone)]
pub struct Outbound {
    transport: Arc<dyn ChatTransport>,
    chat_id: ChatId,
}

impl Outbound {
    pub fn new(transport: Arc<dyn ChatTransport>, chat_id: ChatId) -> Self {
        Self { transport, chat_id }
    }

    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    pub async fn text(&self, text: &str) -> AppResult<MessageId> {
        self.transport.send_html(self.chat_id, &format_bold(text), None).await
    }

    pub async fn text_with_keyboard(&self, text: &str, keyboard: InlineKeyboardMarkup) -> AppResult<MessageId> {
        self.transport
            .send_html(self.chat_id, &format_bold(text), Some(keyboard))
            .await
    }

    pub async fn edit(&self, message_id: MessageId, text: &str) -> AppResult<()> {
        self.transport
            .edit_html(self.chat_id, message_id, &format_bold(text))
            .await
    }

    pub async fn video(&self, path: &Path, caption: &str) -> AppResult<MessageId> {
        self.transport
            .send_video(self.chat_id, path, &format_bold(caption))
            .await
    }

    pub async fn document(&self, path: &Path, caption: &str) -> AppResult<MessageId> {
        self.transport
            .send_document(self.chat_id, path, &format_bold(caption))
            .await
    }

    /// Send a notice where a failed send is only worth a log line.
    pub async fn notify(&self, text: &str) {
        if let Err(e) = self.text(text).await {
            log::error!("Failed to send message to chat {}: {}", self.chat_id, e);
        }
    }
}
