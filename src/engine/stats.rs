//! Per-user statistics lookup. Storage is owned elsewhere; this side only reads.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::models::UserId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatsRecord {
    #[serde(default)]
    pub games_played: u64,
    #[serde(default)]
    pub first_places: u64,
    #[serde(default)]
    pub cards_played: u64,
    /// The user opted in to statistics.
    #[serde(default)]
    pub stats: bool,
}

impl UserStatsRecord {
    /// Share of first places, rounded half to even; 0 without games.
    pub fn first_place_percent(&self) -> u64 {
        if self.games_played == 0 {
            return 0;
        }
        let ratio = self.first_places as f64 / self.games_played as f64 * 100.0;
        ratio.round_ties_even() as u64
    }
}

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("failed to read stats file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse stats file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Blocking read access to persisted statistics.
pub trait StatsStore: Send + Sync {
    fn fetch(&self, user_id: UserId) -> Result<Option<UserStatsRecord>, StatsError>;
}

#[derive(Debug, Default)]
pub struct MemoryStatsStore {
    records: HashMap<UserId, UserStatsRecord>,
}

impl MemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, user_id: UserId, record: UserStatsRecord) {
        self.records.insert(user_id, record);
    }
}

impl StatsStore for MemoryStatsStore {
    fn fetch(&self, user_id: UserId) -> Result<Option<UserStatsRecord>, StatsError> {
        Ok(self.records.get(&user_id).cloned())
    }
}

/// JSON object keyed by user id, re-read on every lookup so external
/// updates are picked up.
#[derive(Debug, Clone)]
pub struct JsonFileStatsStore {
    path: PathBuf,
}

impl JsonFileStatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StatsStore for JsonFileStatsStore {
    fn fetch(&self, user_id: UserId) -> Result<Option<UserStatsRecord>, StatsError> {
        let path = self.path.display().to_string();
        let content = std::fs::read_to_string(&self.path).map_err(|e| StatsError::Read {
            path: path.clone(),
            source: e,
        })?;
        let mut records: HashMap<String, UserStatsRecord> = serde_json::from_str(&content)
            .map_err(|e| StatsError::Parse { path, source: e })?;
        Ok(records.remove(&user_id.to_string()))
    }
}

/// Look up a record on the blocking pool, bounded by `limit`. Any failure
/// reads as "no record".
pub async fn fetch_with_timeout(
    store: Arc<dyn StatsStore>,
    user_id: UserId,
    limit: Duration,
) -> Option<UserStatsRecord> {
    let lookup = tokio::task::spawn_blocking(move || store.fetch(user_id));
    match tokio::time::timeout(limit, lookup).await {
        Ok(Ok(Ok(record))) => record,
        Ok(Ok(Err(e))) => {
            tracing::warn!(user_id, error = %e, "stats lookup failed");
            None
        }
        Ok(Err(e)) => {
            tracing::warn!(user_id, error = %e, "stats lookup task failed");
            None
        }
        Err(_) => {
            tracing::warn!(user_id, limit_ms = limit.as_millis() as u64, "stats lookup timed out");
            None
        }
    }
}
