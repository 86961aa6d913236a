//! Recording `ChatTransport` for handler tests
//!
//! Every outbound call is stored in order. Uploads and deletions can be
//! switched to fail to exercise the error paths.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use teloxide::types::{ChatId, InlineKeyboardMarkup, MessageId};
use vidgrab::core::error::{AppError, AppResult};
use vidgrab::telegram::ChatTransport;

/// One recorded outbound call
#[derive(Debug, Clone, PartialEq)]
pub enum SentItem {
    Text {
        chat_id: ChatId,
        html: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    Edit {
        chat_id: ChatId,
        message_id: MessageId,
        html: String,
    },
    Video {
        chat_id: ChatId,
        path: PathBuf,
        caption: String,
    },
    Document {
        chat_id: ChatId,
        path: PathBuf,
        caption: String,
    },
    Delete {
        chat_id: ChatId,
        message_id: MessageId,
    },
}

pub struct MockTransport {
    calls: Mutex<Vec<SentItem>>,
    next_id: AtomicI32,
    fail_uploads: AtomicBool,
    fail_deletes: AtomicBool,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1000),
            fail_uploads: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
        }
    }

    pub fn fail_uploads(&self) {
        self.fail_uploads.store(true, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<SentItem> {
        self.calls.lock().unwrap().clone()
    }

    /// HTML of every plain text message, in order.
    pub fn texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SentItem::Text { html, .. } => Some(html),
                _ => None,
            })
            .collect()
    }

    pub fn deleted(&self) -> Vec<MessageId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SentItem::Delete { message_id, .. } => Some(message_id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, item: SentItem) {
        self.calls.lock().unwrap().push(item);
    }

    fn next_message_id(&self) -> MessageId {
        MessageId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send_html(
        &self,
        chat_id: ChatId,
        html: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> AppResult<MessageId> {
        self.record(SentItem::Text {
            chat_id,
            html: html.to_string(),
            keyboard,
        });
        Ok(self.next_message_id())
    }

    async fn edit_html(&self, chat_id: ChatId, message_id: MessageId, html: &str) -> AppResult<()> {
        self.record(SentItem::Edit {
            chat_id,
            message_id,
            html: html.to_string(),
        });
        Ok(())
    }

    async fn send_video(&self, chat_id: ChatId, path: &Path, caption_html: &str) -> AppResult<MessageId> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(AppError::Download("upload rejected".to_string()));
        }
        self.record(SentItem::Video {
            chat_id,
            path: path.to_path_buf(),
            caption: caption_html.to_string(),
        });
        Ok(self.next_message_id())
    }

    async fn send_document(&self, chat_id: ChatId, path: &Path, caption_html: &str) -> AppResult<MessageId> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(AppError::Download("upload rejected".to_string()));
        }
        self.record(SentItem::Document {
            chat_id,
            path: path.to_path_buf(),
            caption: caption_html.to_string(),
        });
        Ok(self.next_message_id())
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> AppResult<()> {
        self.record(SentItem::Delete { chat_id, message_id });
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::Download("message to delete not found".to_string()));
        }
        Ok(())
    }
}
