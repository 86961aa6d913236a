//! /start, /help, /stats and the Help button.

use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId};

use super::types::HandlerDeps;
use crate::core::error::AppResult;
use crate::telegram::texts;

/// Welcome keyboard: Help callback plus a support link when it parses.
pub fn welcome_keyboard(support_url: &str) -> InlineKeyboardMarkup {
    let mut rows = vec![vec![InlineKeyboardButton::callback(
        texts::HELP_BUTTON,
        texts::HELP_CALLBACK,
    )]];

    match url::Url::parse(support_url) {
        Ok(url) => rows.push(vec![InlineKeyboardButton::url(texts::SUPPORT_BUTTON, url)]),
        Err(e) => log::warn!("Ignoring invalid SUPPORT_URL {:?}: {}", support_url, e),
    }

    InlineKeyboardMarkup::new(rows)
}

/// /start: count the user, then greet.
pub async fn handle_start_command(deps: &HandlerDeps, chat_id: ChatId, user_id: Option<i64>) -> AppResult<()> {
    if let Some(user_id) = user_id {
        match deps.counters.update(|record| record.register_user(user_id)).await {
            Ok(record) => log::info!("User {} started the bot ({} users)", user_id, record.total_users),
            Err(e) => log::error!("Failed to save counters for user {}: {}", user_id, e),
        }
    }

    deps.outbound(chat_id)
        .text_with_keyboard(texts::WELCOME, welcome_keyboard(&deps.config.support_url))
        .await?;
    Ok(())
}

pub async fn handle_help_command(deps: &HandlerDeps, chat_id: ChatId) -> AppResult<()> {
    deps.outbound(chat_id).text(texts::HELP).await?;
    Ok(())
}

/// /stats: owner only.
pub async fn handle_stats_command(deps: &HandlerDeps, chat_id: ChatId, user_id: Option<u64>) -> AppResult<()> {
    log::info!("Received /stats command from user: {:?}", user_id);
    let outbound = deps.outbound(chat_id);

    if user_id != Some(deps.config.owner_id) {
        log::warn!("Unauthorized access attempt by user: {:?}", user_id);
        outbound.text(texts::STATS_UNAUTHORIZED).await?;
        return Ok(());
    }

    let record = deps.counters.load().await;
    outbound
        .text(&texts::stats(record.total_users, record.blocked_users))
        .await?;
    log::info!("Sent bot stats to the owner.");
    Ok(())
}

/// Inline button press. Returns `false` for unknown callback data.
pub async fn handle_help_callback(
    deps: &HandlerDeps,
    chat_id: ChatId,
    message_id: MessageId,
    data: &str,
) -> AppResult<bool> {
    if data != texts::HELP_CALLBACK {
        return Ok(false);
    }
    deps.outbound(chat_id).edit(message_id, texts::HELP).await?;
    Ok(true)
}
