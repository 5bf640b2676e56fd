use chrono::{DateTime, Utc};
use std::sync::Arc;
use storage::{SessionRecordId, SessionRecordRepository};
use study_core::model::{SessionId, SessionParameters, StudyContent};
use study_core::ScoreDenominator;
use tracing::{debug, info, warn};

use super::runner::{GenerationOutcome, SessionOutcome, SessionRunner};
use crate::Clock;
use crate::error::{GenerationError, RunnerError};
use crate::generation::ContentGenerator;

/// Ended session plus the storage id its record was appended under, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndedSession {
    pub outcome: SessionOutcome,
    pub record_id: Option<SessionRecordId>,
}

/// Activates, feeds, and ends study sessions.
#[derive(Clone)]
pub struct StudySessionService {
    clock: Clock,
    generator: Arc<dyn ContentGenerator>,
    records: Arc<dyn SessionRecordRepository>,
    denominator: ScoreDenominator,
}

impl StudySessionService {
    #[must_use]
    pub fn new(
        clock: Clock,
        generator: Arc<dyn ContentGenerator>,
        records: Arc<dyn SessionRecordRepository>,
    ) -> Self {
        Self {
            clock,
            generator,
            records,
            denominator: ScoreDenominator::default(),
        }
    }

    #[must_use]
    pub fn with_score_denominator(mut self, denominator: ScoreDenominator) -> Self {
        self.denominator = denominator;
        self
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[must_use]
    pub fn generator_name(&self) -> &'static str {
        self.generator.name()
    }

    /// Start a session in the concepts phase with content pending.
    #[must_use]
    pub fn activate(&self, params: SessionParameters) -> SessionRunner {
        let id = SessionId::new();
        info!(
            session = %id,
            topic = params.topic(),
            difficulty = %params.difficulty(),
            focus = %params.focus(),
            "study session activated"
        );
        SessionRunner::new(id, params, self.clock.now(), self.denominator)
    }

    /// Run one generation attempt for `params`.
    ///
    /// # Errors
    ///
    /// Returns the generator's `GenerationError` unchanged.
    pub async fn generate(
        &self,
        session: SessionId,
        params: &SessionParameters,
    ) -> Result<StudyContent, GenerationError> {
        debug!(session = %session, generator = self.generator.name(), "generating study content");
        match self.generator.generate(params).await {
            Ok(content) => {
                info!(
                    session = %session,
                    concepts = content.concepts().len(),
                    questions = content.questions().len(),
                    "study content generated"
                );
                Ok(content)
            }
            Err(err) => {
                warn!(session = %session, error = %err, "study content generation failed");
                Err(err)
            }
        }
    }

    /// Begin, run, and resolve one generation attempt for `runner`.
    ///
    /// The UI drives the three steps itself so the runner is not borrowed across
    /// the await; this helper serves callers that own the runner outright.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError` if the runner refuses a new attempt.
    pub async fn load_content(
        &self,
        runner: &mut SessionRunner,
    ) -> Result<GenerationOutcome, RunnerError> {
        let ticket = runner.begin_generation()?;
        let result = self.generate(runner.id(), runner.params()).await;
        let outcome = runner.resolve_generation(ticket, result);
        log_resolution(runner.id(), outcome);
        Ok(outcome)
    }

    /// End `runner` and append its record.
    ///
    /// Storage failures are logged and never block returning to the form.
    pub async fn end_session(&self, runner: &mut SessionRunner) -> EndedSession {
        let outcome = runner.end(self.clock.now());
        info!(
            session = %outcome.session_id,
            answered = outcome.answered,
            total = outcome.total_questions,
            score = ?outcome.score,
            "study session ended"
        );

        let Some(record) = outcome.to_record() else {
            debug!(session = %outcome.session_id, "no content loaded; nothing to record");
            return EndedSession {
                outcome,
                record_id: None,
            };
        };

        let record_id = match self.records.append_record(&record).await {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(
                    session = %outcome.session_id,
                    error = %err,
                    "failed to record study session"
                );
                None
            }
        };
        EndedSession { outcome, record_id }
    }
}

/// Log how a generation attempt resolved.
pub fn log_resolution(session: SessionId, outcome: GenerationOutcome) {
    match outcome {
        GenerationOutcome::Applied => debug!(session = %session, "study content applied"),
        GenerationOutcome::Failed => debug!(session = %session, "study content unavailable"),
        GenerationOutcome::Stale => debug!(session = %session, "ignored stale generation result"),
    }
}
