use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use storage::{SessionRecordRepository, SessionTotals};
use study_core::model::{Difficulty, SessionRecord};

use crate::error::ProgressError;

/// Most recent records scanned for distinct recent topics.
const RECENT_WINDOW: u32 = 500;

/// A topic studied recently, for the recent-topics widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentTopic {
    pub topic: String,
    pub difficulty: Difficulty,
    pub ended_at: DateTime<Utc>,
    pub score: Option<u8>,
}

/// Aggregate study progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressOverview {
    pub sessions_completed: usize,
    /// Mean over sessions that reached review, rounded half up.
    pub average_score: Option<u8>,
    pub total_study_time: Duration,
    /// Most recent first, one entry per topic.
    pub recent_topics: Vec<RecentTopic>,
}

impl ProgressOverview {
    /// Overview of a complete history held in memory.
    #[must_use]
    pub fn from_records(records: &[SessionRecord], topic_limit: usize) -> Self {
        Self::from_totals(SessionTotals::from_records(records), records, topic_limit)
    }

    /// Overview from repository totals plus a window of recent records.
    #[must_use]
    pub fn from_totals(
        totals: SessionTotals,
        recent: &[SessionRecord],
        topic_limit: usize,
    ) -> Self {
        let average_score = (totals.scored_sessions > 0).then(|| {
            let count = totals.scored_sessions;
            let rounded = (2 * totals.score_sum + count) / (2 * count);
            u8::try_from(rounded.min(100)).unwrap_or(100)
        });

        let mut sorted: Vec<&SessionRecord> = recent.iter().collect();
        sorted.sort_by(|a, b| b.ended_at().cmp(&a.ended_at()));
        let mut seen = HashSet::new();
        let recent_topics = sorted
            .into_iter()
            .filter(|record| seen.insert(record.topic().to_lowercase()))
            .take(topic_limit)
            .map(|record| RecentTopic {
                topic: record.topic().to_string(),
                difficulty: record.difficulty(),
                ended_at: record.ended_at(),
                score: record.score(),
            })
            .collect();

        Self {
            sessions_completed: usize::try_from(totals.sessions).unwrap_or(usize::MAX),
            average_score,
            total_study_time: totals.study_time,
            recent_topics,
        }
    }
}

/// Reads recorded sessions and aggregates them for the progress widgets.
#[derive(Clone)]
pub struct ProgressService {
    records: Arc<dyn SessionRecordRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(records: Arc<dyn SessionRecordRepository>) -> Self {
        Self { records }
    }

    /// Aggregate recorded sessions.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if records cannot be read.
    pub async fn overview(&self, topic_limit: usize) -> Result<ProgressOverview, ProgressError> {
        let totals = self.records.totals().await?;
        let recent = self.records.list_recent(None, RECENT_WINDOW).await?;
        Ok(ProgressOverview::from_totals(totals, &recent, topic_limit))
    }
}
