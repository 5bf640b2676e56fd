use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Difficulty, Focus, FormValidationError, SessionId, SessionParameters};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionRecordError {
    #[error("ended_at is before started_at")]
    InvalidTimeRange,

    #[error("answered questions ({answered}) exceed total questions ({total})")]
    AnsweredExceedsTotal { answered: u32, total: u32 },

    #[error("score must be at most 100, got {0}")]
    ScoreOutOfRange(u8),

    #[error(transparent)]
    Parameters(#[from] FormValidationError),
}

/// Outcome of a finished study session, as handed to persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSessionRecord")]
pub struct SessionRecord {
    id: SessionId,
    topic: String,
    difficulty: Difficulty,
    focus: Focus,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    total_questions: u32,
    answered: u32,
    score: Option<u8>,
}

impl SessionRecord {
    /// # Errors
    ///
    /// Returns `SessionRecordError` if the time range or counts are inconsistent.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: SessionId,
        params: &SessionParameters,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        total_questions: u32,
        answered: u32,
        score: Option<u8>,
    ) -> Result<Self, SessionRecordError> {
        if ended_at < started_at {
            return Err(SessionRecordError::InvalidTimeRange);
        }
        if answered > total_questions {
            return Err(SessionRecordError::AnsweredExceedsTotal {
                answered,
                total: total_questions,
            });
        }
        if let Some(score) = score.filter(|score| *score > 100) {
            return Err(SessionRecordError::ScoreOutOfRange(score));
        }

        Ok(Self {
            id,
            topic: params.topic().to_string(),
            difficulty: params.difficulty(),
            focus: params.focus(),
            started_at,
            ended_at,
            total_questions,
            answered,
            score,
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn ended_at(&self) -> DateTime<Utc> {
        self.ended_at
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.ended_at - self.started_at
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    /// Score when the session reached review; `None` if it never did.
    #[must_use]
    pub fn score(&self) -> Option<u8> {
        self.score
    }
}

#[derive(Deserialize)]
struct RawSessionRecord {
    id: SessionId,
    topic: String,
    difficulty: Difficulty,
    focus: Focus,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    total_questions: u32,
    answered: u32,
    score: Option<u8>,
}

impl TryFrom<RawSessionRecord> for SessionRecord {
    type Error = SessionRecordError;

    fn try_from(raw: RawSessionRecord) -> Result<Self, Self::Error> {
        let params = SessionParameters::new(raw.topic, raw.difficulty, raw.focus)?;
        Self::new(
            raw.id,
            &params,
            raw.started_at,
            raw.ended_at,
            raw.total_questions,
            raw.answered,
            raw.score,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn params() -> SessionParameters {
        SessionParameters::new("Photosynthesis", Difficulty::Beginner, Focus::Mixed).unwrap()
    }

    #[test]
    fn record_keeps_parameters_and_duration() {
        let now = fixed_now();
        let record = SessionRecord::new(
            SessionId::new(),
            &params(),
            now,
            now + Duration::minutes(4),
            3,
            2,
            Some(67),
        )
        .unwrap();
        assert_eq!(record.topic(), "Photosynthesis");
        assert_eq!(record.duration(), Duration::minutes(4));
        assert_eq!(record.score(), Some(67));
    }

    #[test]
    fn inconsistent_records_are_rejected() {
        let now = fixed_now();
        let id = SessionId::new();
        assert_eq!(
            SessionRecord::new(id, &params(), now, now - Duration::seconds(1), 3, 0, None)
                .unwrap_err(),
            SessionRecordError::InvalidTimeRange
        );
        assert_eq!(
            SessionRecord::new(id, &params(), now, now, 2, 3, None).unwrap_err(),
            SessionRecordError::AnsweredExceedsTotal {
                answered: 3,
                total: 2
            }
        );
        assert_eq!(
            SessionRecord::new(id, &params(), now, now, 2, 2, Some(101)).unwrap_err(),
            SessionRecordError::ScoreOutOfRange(101)
        );
    }

    #[test]
    fn deserializing_records_runs_the_same_checks() {
        let record = SessionRecord::new(
            SessionId::new(),
            &params(),
            fixed_now(),
            fixed_now() + Duration::minutes(4),
            3,
            2,
            Some(67),
        )
        .unwrap();
        let json = serde_json::to_value(&record).unwrap();
        let back: SessionRecord = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back, record);

        let mut short_topic = json.clone();
        short_topic["topic"] = "ab".into();
        assert!(serde_json::from_value::<SessionRecord>(short_topic).is_err());

        let mut over_answered = json;
        over_answered["answered"] = 4.into();
        assert!(serde_json::from_value::<SessionRecord>(over_answered).is_err());
    }
}
