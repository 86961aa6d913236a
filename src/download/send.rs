//! Delivery of a downloaded file back to the requesting chat.
//!
//! - Files up to 50 MiB go out with send_video, bigger ones as a document
//! - The local file is removed right after a successful upload
//! - The sent message is scheduled for deletion
//!
//! No retries: an upload error is logged and reported to the user once.

use std::path::Path;
use std::time::Duration;

use teloxide::types::MessageId;

use crate::core::config;
use crate::telegram::cleanup::DeletionRegistry;
use crate::telegram::outbound::Outbound;
use crate::telegram::texts;

/// How a file is uploaded to Telegram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMethod {
    Video,
    Document,
}

impl UploadMethod {
    /// send_video is capped near 50 MB; anything strictly bigger goes as a document.
    pub fn for_size(file_size: u64) -> Self {
        if file_size > config::delivery::VIDEO_SIZE_LIMIT {
            UploadMethod::Document
        } else {
            UploadMethod::Video
        }
    }
}

/// Upload `path` to the chat behind `outbound`.
///
/// Returns the id of the sent message, or `None` when the user was told
/// about a failure instead. After a failed upload the file stays on disk.
pub async fn deliver(
    outbound: &Outbound,
    deletions: &DeletionRegistry,
    path: &Path,
    delete_after: Duration,
) -> Option<MessageId> {
    let file_size = match fs_err::tokio::metadata(path).await {
        Ok(meta) => meta.len(),
        Err(e) => {
            log::error!("Error sending file {}: cannot read metadata: {}", path.display(), e);
            outbound.notify(texts::SEND_FAILED).await;
            return None;
        }
    };

    let method = UploadMethod::for_size(file_size);
    log::info!(
        "Uploading {} ({:.2} MB) as {:?}",
        path.display(),
        file_size as f64 / (1024.0 * 1024.0),
        method
    );

    let sent = match method {
        UploadMethod::Document => outbound.document(path, texts::DOCUMENT_CAPTION).await,
        UploadMethod::Video => outbound.video(path, texts::VIDEO_CAPTION).await,
    };

    let message_id = match sent {
        Ok(id) => id,
        Err(e) => {
            log::error!("Error sending file {}: {}", path.display(), e);
            outbound.notify(texts::SEND_FAILED).await;
            return None;
        }
    };

    match fs_err::tokio::remove_file(path).await {
        Ok(()) => log::info!("Deleted file: {}", path.display()),
        Err(e) => log::error!("Failed to delete file {}: {}", path.display(), e),
    }

    deletions.schedule(outbound.chat_id(), message_id, delete_after);
    Some(message_id)
}
