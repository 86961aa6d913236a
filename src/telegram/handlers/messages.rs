//! Link handling: validate, route, download, deliver.

use teloxide::types::{ChatId, MessageId};

use super::types::HandlerDeps;
use crate::download::{deliver, extract_url, DownloadJob, Platform};
use crate::telegram::texts;

/// What happened to one incoming text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Not a link; nothing was sent.
    Ignored,
    /// A link to a site we don't handle.
    Unsupported,
    /// The adapter produced no file.
    DownloadFailed,
    /// The file was downloaded but the upload failed.
    SendFailed,
    /// The file was sent as this message.
    Delivered(MessageId),
}

/// Handle a text message that may contain a video link.
///
/// Runs one sequential pipeline per message. Adapter and upload failures
/// are logged where they happen; the user only sees a generic notice.
pub async fn process_link(deps: &HandlerDeps, chat_id: ChatId, request_id: MessageId, text: &str) -> LinkOutcome {
    let Some(url) = extract_url(text) else {
        return LinkOutcome::Ignored;
    };

    let outbound = deps.outbound(chat_id);
    outbound.notify(texts::PROCESSING).await;

    let Some(platform) = Platform::classify(url) else {
        log::info!("Unsupported link from chat {}: {}", chat_id, url);
        outbound.notify(texts::INVALID_URL).await;
        return LinkOutcome::Unsupported;
    };

    let mut job = DownloadJob::new(url, platform, &deps.config.download_dir);
    let Some(path) = deps.sources.fetch(&mut job).await else {
        outbound.notify(texts::DOWNLOAD_FAILED).await;
        return LinkOutcome::DownloadFailed;
    };

    let sent = deliver(&outbound, &deps.deletions, &path, deps.config.delete_delay).await;
    deps.deletions.schedule(chat_id, request_id, deps.config.delete_delay);

    match sent {
        Some(message_id) => LinkOutcome::Delivered(message_id),
        None => LinkOutcome::SendFailed,
    }
}
