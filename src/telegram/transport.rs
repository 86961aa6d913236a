//! Seam between bot logic and the Telegram Bot API.
//!
//! Handlers talk to `ChatTransport` instead of `Bot` directly so the whole
//! request flow can run against a recording mock in tests.

use std::path::Path;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, InputFile, MessageId, ParseMode};

use crate::core::error::AppResult;

/// Outbound operations the bot needs from the chat platform.
///
/// All text arguments are already-rendered HTML.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_html(
        &self,
        chat_id: ChatId,
        html: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> AppResult<MessageId>;

    async fn edit_html(&self, chat_id: ChatId, message_id: MessageId, html: &str) -> AppResult<()>;

    async fn send_video(&self, chat_id: ChatId, path: &Path, caption_html: &str) -> AppResult<MessageId>;

    async fn send_document(&self, chat_id: ChatId, path: &Path, caption_html: &str) -> AppResult<MessageId>;

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> AppResult<()>;
}

/// `ChatTransport` backed by a teloxide `Bot`.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_html(
        &self,
        chat_id: ChatId,
        html: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> AppResult<MessageId> {
        let mut req = self.bot.send_message(chat_id, html).parse_mode(ParseMode::Html);
        if let Some(kb) = keyboard {
            req = req.reply_markup(kb);
        }
        let msg = req.await?;
        Ok(msg.id)
    }

    async fn edit_html(&self, chat_id: ChatId, message_id: MessageId, html: &str) -> AppResult<()> {
        self.bot
            .edit_message_text(chat_id, message_id, html)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }

    async fn send_video(&self, chat_id: ChatId, path: &Path, caption_html: &str) -> AppResult<MessageId> {
        let msg = self
            .bot
            .send_video(chat_id, InputFile::file(path.to_path_buf()))
            .caption(caption_html)
            .parse_mode(ParseMode::Html)
            .supports_streaming(true)
            .await?;
        Ok(msg.id)
    }

    async fn send_document(&self, chat_id: ChatId, path: &Path, caption_html: &str) -> AppResult<MessageId> {
        let msg = self
            .bot
            .send_document(chat_id, InputFile::file(path.to_path_buf()))
            .caption(caption_html)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(msg.id)
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> AppResult<()> {
        self.bot.delete_message(chat_id, message_id).await?;
        Ok(())
    }
}
