//! Persistent user counters kept in a single JSON file.
//!
//! The file is read and rewritten wholesale on every change. A missing or
//! corrupt file is an empty record, never an error. Load-mutate-save runs
//! under one lock so concurrent start/block/unblock events can't lose
//! updates.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::core::error::AppResult;

/// Membership change reported by Telegram for the bot's private chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipTransition {
    /// Status `kicked` or `left`: the user blocked the bot.
    Blocked,
    /// Status `member`: the user (re)started the bot.
    Active,
}

/// Snapshot of known and blocked users.
///
/// `user_ids` keeps insertion order for display; both lists behave as sets
/// and an id is in at most one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRecord {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub blocked_users: u64,
    #[serde(default)]
    pub user_ids: Vec<i64>,
    #[serde(default)]
    pub blocked_user_ids: Vec<i64>,
}

impl CounterRecord {
    pub fn is_active(&self, user_id: i64) -> bool {
        self.user_ids.contains(&user_id)
    }

    pub fn is_blocked(&self, user_id: i64) -> bool {
        self.blocked_user_ids.contains(&user_id)
    }

    /// Record a /start: the user becomes active, leaving the blocked list if present.
    pub fn register_user(&mut self, user_id: i64) {
        self.apply(user_id, MembershipTransition::Active);
    }

    /// Apply a membership transition. Repeating a transition is a no-op.
    ///
    /// Returns `true` when the record changed.
    pub fn apply(&mut self, user_id: i64, transition: MembershipTransition) -> bool {
        let changed = match transition {
            MembershipTransition::Blocked => {
                // Only users who started the bot can be counted as blocked.
                if self.is_blocked(user_id) || !self.is_active(user_id) {
                    false
                } else {
                    self.user_ids.retain(|id| *id != user_id);
                    self.blocked_user_ids.push(user_id);
                    true
                }
            }
            MembershipTransition::Active => {
                let was_blocked = self.is_blocked(user_id);
                self.blocked_user_ids.retain(|id| *id != user_id);
                let is_new = !self.is_active(user_id);
                if is_new {
                    self.user_ids.push(user_id);
                }
                was_blocked || is_new
            }
        };
        self.normalize();
        changed
    }

    /// Re-derive the totals and drop duplicate ids, keeping first occurrences.
    ///
    /// An id present in both lists stays only in `blocked_user_ids`.
    pub fn normalize(&mut self) {
        dedup_in_order(&mut self.user_ids);
        dedup_in_order(&mut self.blocked_user_ids);
        let blocked = self.blocked_user_ids.clone();
        self.user_ids.retain(|id| !blocked.contains(id));
        self.total_users = self.user_ids.len() as u64;
        self.blocked_users = self.blocked_user_ids.len() as u64;
    }
}

fn dedup_in_order(ids: &mut Vec<i64>) {
    let mut seen = Vec::with_capacity(ids.len());
    ids.retain(|id| {
        if seen.contains(id) {
            false
        } else {
            seen.push(*id);
            true
        }
    });
}

/// File-backed counters with a single-writer lock around every update.
#[derive(Debug)]
pub struct CountersStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CountersStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current record. Missing or unreadable files yield an empty record.
    pub async fn load(&self) -> CounterRecord {
        let _guard = self.lock.lock().await;
        self.read_unlocked().await
    }

    /// Replace the stored record.
    pub async fn save(&self, record: &CounterRecord) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        self.write_unlocked(record).await
    }

    /// Load, mutate, normalize and persist as one step.
    ///
    /// Returns the record as written.
    pub async fn update<F>(&self, mutate: F) -> AppResult<CounterRecord>
    where
        F: FnOnce(&mut CounterRecord),
    {
        let _guard = self.lock.lock().await;
        let mut record = self.read_unlocked().await;
        mutate(&mut record);
        record.normalize();
        self.write_unlocked(&record).await?;
        Ok(record)
    }

    async fn read_unlocked(&self) -> CounterRecord {
        let raw = match fs_err::tokio::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return CounterRecord::default(),
            Err(e) => {
                log::warn!("Failed to read counters file, starting empty: {}", e);
                return CounterRecord::default();
            }
        };

        match serde_json::from_str::<CounterRecord>(&raw) {
            Ok(mut record) => {
                record.normalize();
                record
            }
            Err(e) => {
                log::warn!(
                    "Counters file {} is corrupt, starting empty: {}",
                    self.path.display(),
                    e
                );
                CounterRecord::default()
            }
        }
    }

    async fn write_unlocked(&self, record: &CounterRecord) -> AppResult<()> {
        let json = serde_json::to_string_pretty(record)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs_err::tokio::write(&tmp, json).await?;
        fs_err::tokio::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
