//! Block/unblock tracking from `my_chat_member` updates.

use teloxide::types::ChatMemberKind;

use super::types::HandlerDeps;
use crate::core::error::AppResult;
use crate::storage::{CounterRecord, MembershipTransition};

/// `kicked`/`left` block the bot, `member` restores it; other statuses are ignored.
pub fn transition_for(kind: &ChatMemberKind) -> Option<MembershipTransition> {
    if kind.is_banned() || kind.is_left() {
        Some(MembershipTransition::Blocked)
    } else if kind.is_member() {
        Some(MembershipTransition::Active)
    } else {
        None
    }
}

/// Persist one membership change.
pub async fn handle_membership_change(
    deps: &HandlerDeps,
    user_id: i64,
    transition: MembershipTransition,
) -> AppResult<CounterRecord> {
    let record = deps
        .counters
        .update(|record| {
            if !record.apply(user_id, transition) {
                log::debug!("{:?} for user {} changes nothing", transition, user_id);
            }
        })
        .await?;

    log::info!(
        "User {} is now {:?} (total: {}, blocked: {})",
        user_id,
        transition,
        record.total_users,
        record.blocked_users
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_blocks() {
        assert_eq!(transition_for(&ChatMemberKind::Left), Some(MembershipTransition::Blocked));
    }
}
