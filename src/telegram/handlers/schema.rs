//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{ChatMemberUpdated, Message};

use super::commands::{handle_help_callback, handle_help_command, handle_start_command, handle_stats_command};
use super::membership::{handle_membership_change, transition_for};
use super::messages::process_link;
use super::types::{user_key, HandlerDeps, HandlerError};
use crate::telegram::bot::Command;

/// Creates the dispatcher schema for the bot.
///
/// Branch order matters: commands first, then plain text links, then
/// button presses and membership updates. The membership tracker is
/// registered exactly once.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry()
        .branch(command_handler(deps.clone()))
        .branch(message_handler(deps.clone()))
        .branch(callback_handler(deps.clone()))
        .branch(membership_handler(deps))
}

/// Handler for bot commands (/start, /help, /stats)
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("🎯 Received command: {:?} from chat {}", cmd, msg.chat.id);
                let from = msg.from.as_ref();

                let result = match cmd {
                    Command::Start => handle_start_command(&deps, msg.chat.id, from.and_then(user_key)).await,
                    Command::Help => handle_help_command(&deps, msg.chat.id).await,
                    Command::Stats => handle_stats_command(&deps, msg.chat.id, from.map(|u| u.id.0)).await,
                };

                if let Err(e) = result {
                    log::error!("❌ {:?} handler failed for chat {}: {}", cmd, msg.chat.id, e);
                }
                Ok(())
            }
        },
    ))
}

/// Handler for regular text messages (video links)
fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.text().is_some())
        .endpoint(move |msg: Message| {
            let deps = deps.clone();
            async move {
                let text = msg.text().unwrap_or_default();
                let outcome = process_link(&deps, msg.chat.id, msg.id, text).await;
                log::debug!("Message {} in chat {}: {:?}", msg.id.0, msg.chat.id, outcome);
                Ok(())
            }
        })
}

/// Handler for callback queries (inline keyboard buttons)
fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            if let (Some(data), Some(message)) = (q.data.as_deref(), q.regular_message()) {
                match handle_help_callback(&deps, message.chat.id, message.id, data).await {
                    Ok(true) => {}
                    Ok(false) => log::debug!("Ignoring callback data {:?}", data),
                    Err(e) => log::error!("Failed to show help for chat {}: {}", message.chat.id, e),
                }
            }

            if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
                log::warn!("Failed to answer callback query: {}", e);
            }
            Ok(())
        }
    })
}

/// Handler for the bot's own membership changes (user blocked/unblocked the bot)
fn membership_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_my_chat_member().endpoint(move |upd: ChatMemberUpdated| {
        let deps = deps.clone();
        async move {
            let (Some(user_id), Some(transition)) = (user_key(&upd.from), transition_for(&upd.new_chat_member.kind))
            else {
                return Ok(());
            };

            if let Err(e) = handle_membership_change(&deps, user_id, transition).await {
                log::error!("Failed to record membership change for user {}: {}", user_id, e);
            }
            Ok(())
        }
    })
}
