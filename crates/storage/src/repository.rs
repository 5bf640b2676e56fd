use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};
use study_core::model::SessionRecord;
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),
}

/// Storage identifier of an appended session record.
pub type SessionRecordId = i64;

/// Aggregates over every stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTotals {
    pub sessions: u64,
    /// Sessions that reached review and carry a score.
    pub scored_sessions: u64,
    pub score_sum: u64,
    pub study_time: Duration,
}

impl Default for SessionTotals {
    fn default() -> Self {
        Self {
            sessions: 0,
            scored_sessions: 0,
            score_sum: 0,
            study_time: Duration::zero(),
        }
    }
}

impl SessionTotals {
    #[must_use]
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a SessionRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut totals, record| {
            totals.add(record);
            totals
        })
    }

    pub fn add(&mut self, record: &SessionRecord) {
        self.sessions += 1;
        if let Some(score) = record.score() {
            self.scored_sessions += 1;
            self.score_sum += u64::from(score);
        }
        self.study_time += record.duration();
    }
}

/// Persistence boundary for finished study sessions.
///
/// Integrators back this with their own store; the workspace only ships the
/// in-memory adapter.
#[async_trait]
pub trait SessionRecordRepository: Send + Sync {
    /// Append a finished session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if a record with the same session id exists,
    /// or other storage errors.
    async fn append_record(&self, record: &SessionRecord) -> Result<SessionRecordId, StorageError>;

    /// Fetch a record by its storage id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_record(&self, id: SessionRecordId) -> Result<SessionRecord, StorageError>;

    /// List records ended at or after `ended_from`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the records cannot be read.
    async fn list_recent(
        &self,
        ended_from: Option<DateTime<Utc>>,
        limit: u32,
    ) -> Result<Vec<SessionRecord>, StorageError>;

    /// Totals over all stored records, regardless of how many exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the records cannot be read.
    async fn totals(&self) -> Result<SessionTotals, StorageError>;
}

/// Simple in-memory repository for the desktop app and tests.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<Mutex<Vec<(SessionRecordId, SessionRecord)>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRecordRepository for InMemoryRepository {
    async fn append_record(&self, record: &SessionRecord) -> Result<SessionRecordId, StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.iter().any(|(_, existing)| existing.id() == record.id()) {
            return Err(StorageError::Conflict);
        }
        let id = guard.last().map_or(1, |(last, _)| last + 1);
        guard.push((id, record.clone()));
        Ok(id)
    }

    async fn get_record(&self, id: SessionRecordId) -> Result<SessionRecord, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .iter()
            .find(|(stored, _)| *stored == id)
            .map(|(_, record)| record.clone())
            .ok_or(StorageError::NotFound)
    }

    async fn list_recent(
        &self,
        ended_from: Option<DateTime<Utc>>,
        limit: u32,
    ) -> Result<Vec<SessionRecord>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut records: Vec<SessionRecord> = guard
            .iter()
            .map(|(_, record)| record)
            .filter(|record| ended_from.is_none_or(|from| record.ended_at() >= from))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.ended_at().cmp(&a.ended_at()));
        records.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(records)
    }

    async fn totals(&self) -> Result<SessionTotals, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(SessionTotals::from_records(guard.iter().map(|(_, record)| record)))
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub session_records: Arc<dyn SessionRecordRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            session_records: Arc::new(repo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use study_core::model::{Difficulty, Focus, SessionId, SessionParameters};
    use study_core::time::fixed_now;

    fn record(topic: &str, ended_offset_mins: i64) -> SessionRecord {
        let params = SessionParameters::new(topic, Difficulty::Beginner, Focus::Mixed).unwrap();
        let now = fixed_now();
        SessionRecord::new(
            SessionId::new(),
            &params,
            now,
            now + Duration::minutes(ended_offset_mins),
            3,
            3,
            Some(100),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn appends_and_fetches_records() {
        let repo = InMemoryRepository::new();
        let first = record("Rust lifetimes", 5);
        let id = repo.append_record(&first).await.unwrap();
        assert_eq!(id, 1);
        assert_eq!(repo.get_record(id).await.unwrap(), first);
        assert!(matches!(
            repo.get_record(42).await.unwrap_err(),
            StorageError::NotFound
        ));
    }

    #[tokio::test]
    async fn duplicate_session_ids_conflict() {
        let repo = InMemoryRepository::new();
        let rec = record("Rust lifetimes", 5);
        repo.append_record(&rec).await.unwrap();
        assert!(matches!(
            repo.append_record(&rec).await.unwrap_err(),
            StorageError::Conflict
        ));
    }

    #[tokio::test]
    async fn lists_most_recent_first_with_filter_and_limit() {
        let repo = InMemoryRepository::new();
        for (topic, offset) in [("Old", 1), ("Newest", 30), ("Middle", 10)] {
            repo.append_record(&record(topic, offset)).await.unwrap();
        }

        let all = repo.list_recent(None, 10).await.unwrap();
        let topics: Vec<_> = all.iter().map(SessionRecord::topic).collect();
        assert_eq!(topics, vec!["Newest", "Middle", "Old"]);

        let limited = repo.list_recent(None, 1).await.unwrap();
        assert_eq!(limited.len(), 1);

        let since = fixed_now() + Duration::minutes(5);
        let recent = repo.list_recent(Some(since), 10).await.unwrap();
        assert_eq!(recent.len(), 2);
    }

    #[tokio::test]
    async fn totals_cover_every_record() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.totals().await.unwrap(), SessionTotals::default());

        for offset in [3, 7] {
            repo.append_record(&record("Rust lifetimes", offset)).await.unwrap();
        }
        let totals = repo.totals().await.unwrap();
        assert_eq!(totals.sessions, 2);
        assert_eq!(totals.scored_sessions, 2);
        assert_eq!(totals.score_sum, 200);
        assert_eq!(totals.study_time, Duration::minutes(10));
    }
}
