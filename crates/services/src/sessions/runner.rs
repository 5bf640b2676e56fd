use chrono::{DateTime, Duration, Utc};
use std::fmt;
use study_core::model::{
    Phase, Question, SessionEvent, SessionId, SessionParameters, SessionRecord, SessionState,
    StudyContent,
};
use study_core::{ScoreBreakdown, ScoreDenominator};

use crate::error::{GenerationError, RunnerError};

//
// ─── CONTENT ───────────────────────────────────────────────────────────────────
//

/// Where the session's content stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentStatus {
    Loading,
    Ready(StudyContent),
    /// The last attempt failed; a retry may be started.
    Unavailable,
}

/// Identifies one generation attempt. Only the latest ticket may resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenerationTicket(u64);

impl GenerationTicket {
    #[must_use]
    pub fn attempt(self) -> u64 {
        self.0
    }
}

/// What resolving a generation attempt did to the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    Applied,
    Failed,
    /// The attempt was superseded or the session ended; nothing changed.
    Stale,
}

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// Result handed back to the form when a session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub session_id: SessionId,
    pub params: SessionParameters,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub total_questions: usize,
    pub answered: usize,
    /// Last score computed on entering review, if review was reached.
    pub score: Option<u8>,
}

impl SessionOutcome {
    /// Persisted shape of this outcome. `None` when content never loaded.
    #[must_use]
    pub fn to_record(&self) -> Option<SessionRecord> {
        if self.total_questions == 0 {
            return None;
        }
        let total = u32::try_from(self.total_questions).ok()?;
        let answered = u32::try_from(self.answered).ok()?;
        SessionRecord::new(
            self.session_id,
            &self.params,
            self.started_at,
            self.ended_at,
            total,
            answered,
            self.score,
        )
        .ok()
    }
}

//
// ─── RUNNER ────────────────────────────────────────────────────────────────────
//

/// Drives one study session: concepts, practice, review.
///
/// Owns the session's state exclusively. Content arrives asynchronously through
/// `begin_generation` / `resolve_generation`; every other transition is
/// synchronous through `dispatch`.
pub struct SessionRunner {
    id: SessionId,
    params: SessionParameters,
    denominator: ScoreDenominator,
    state: SessionState,
    content: ContentStatus,
    latest_attempt: u64,
    last_error: Option<String>,
    score: Option<u8>,
    ended_at: Option<DateTime<Utc>>,
}

impl SessionRunner {
    #[must_use]
    pub(crate) fn new(
        id: SessionId,
        params: SessionParameters,
        started_at: DateTime<Utc>,
        denominator: ScoreDenominator,
    ) -> Self {
        Self {
            id,
            params,
            denominator,
            state: SessionState::new(started_at),
            content: ContentStatus::Loading,
            latest_attempt: 0,
            last_error: None,
            score: None,
            ended_at: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn params(&self) -> &SessionParameters {
        &self.params
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn content_status(&self) -> &ContentStatus {
        &self.content
    }

    #[must_use]
    pub fn content(&self) -> Option<&StudyContent> {
        match &self.content {
            ContentStatus::Ready(content) => Some(content),
            ContentStatus::Loading | ContentStatus::Unavailable => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.content, ContentStatus::Loading)
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Message of the last failed generation attempt, for diagnostics.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn score_denominator(&self) -> ScoreDenominator {
        self.denominator
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.content()
            .and_then(|content| self.state.current_question(content))
    }

    /// Score computed when the session last entered review.
    #[must_use]
    pub fn score(&self) -> Option<u8> {
        self.score
    }

    #[must_use]
    pub fn breakdown(&self) -> Option<ScoreBreakdown> {
        self.content()
            .map(|content| ScoreBreakdown::tally(content, self.state.answers()))
    }

    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        self.state.elapsed(now)
    }

    /// Start a generation attempt. Any earlier attempt becomes stale.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Ended` after the session ended and
    /// `ContentAlreadyLoaded` once content is ready.
    pub fn begin_generation(&mut self) -> Result<GenerationTicket, RunnerError> {
        if self.is_ended() {
            return Err(RunnerError::Ended);
        }
        if self.content().is_some() {
            return Err(RunnerError::ContentAlreadyLoaded);
        }
        self.latest_attempt += 1;
        self.content = ContentStatus::Loading;
        Ok(GenerationTicket(self.latest_attempt))
    }

    /// Apply the result of the attempt identified by `ticket`.
    pub fn resolve_generation(
        &mut self,
        ticket: GenerationTicket,
        result: Result<StudyContent, GenerationError>,
    ) -> GenerationOutcome {
        if self.is_ended() || ticket.0 != self.latest_attempt || !self.is_loading() {
            return GenerationOutcome::Stale;
        }
        match result {
            Ok(content) => {
                self.content = ContentStatus::Ready(content);
                self.last_error = None;
                GenerationOutcome::Applied
            }
            Err(err) => {
                self.content = ContentStatus::Unavailable;
                self.last_error = Some(err.to_string());
                GenerationOutcome::Failed
            }
        }
    }

    /// Apply a user event.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Ended` after the session ended, `ContentUnavailable`
    /// before content is ready, and `Transition` when the state machine rejects
    /// the event. The state is unchanged on error.
    pub fn dispatch(&mut self, event: SessionEvent) -> Result<&SessionState, RunnerError> {
        if self.is_ended() {
            return Err(RunnerError::Ended);
        }
        let ContentStatus::Ready(content) = &self.content else {
            return Err(RunnerError::ContentUnavailable);
        };

        let next = self.state.apply(content, event)?;
        if next.phase() == Phase::Review && self.state.phase() != Phase::Review {
            let breakdown = ScoreBreakdown::tally(content, next.answers());
            self.score = Some(breakdown.percent(self.denominator));
        }
        self.state = next;
        Ok(&self.state)
    }

    /// End the session. Later calls return the same end time.
    pub fn end(&mut self, now: DateTime<Utc>) -> SessionOutcome {
        let ended_at = *self.ended_at.get_or_insert(now.max(self.state.started_at()));
        let (total_questions, answered) = self.content().map_or((0, 0), |content| {
            let breakdown = ScoreBreakdown::tally(content, self.state.answers());
            (breakdown.total_questions, breakdown.answered)
        });
        SessionOutcome {
            session_id: self.id,
            params: self.params.clone(),
            started_at: self.state.started_at(),
            ended_at,
            total_questions,
            answered,
            score: self.score,
        }
    }
}

impl fmt::Debug for SessionRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRunner")
            .field("id", &self.id)
            .field("topic", &self.params.topic())
            .field("phase", &self.state.phase())
            .field("index", &self.state.current_question_index())
            .field("answers", &self.state.answers().len())
            .field("loading", &self.is_loading())
            .field("latest_attempt", &self.latest_attempt)
            .field("ended_at", &self.ended_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::TemplateContentGenerator;
    use study_core::model::{ContentContractError, Difficulty, Focus};
    use study_core::time::fixed_now;

    fn params() -> SessionParameters {
        SessionParameters::new("Photosynthesis", Difficulty::Beginner, Focus::Mixed).unwrap()
    }

    fn runner() -> SessionRunner {
        SessionRunner::new(
            SessionId::new(),
            params(),
            fixed_now(),
            ScoreDenominator::AllQuestions,
        )
    }

    fn content() -> StudyContent {
        TemplateContentGenerator::build(&params()).unwrap()
    }

    fn loaded() -> SessionRunner {
        let mut runner = runner();
        let ticket = runner.begin_generation().unwrap();
        assert_eq!(
            runner.resolve_generation(ticket, Ok(content())),
            GenerationOutcome::Applied
        );
        runner
    }

    #[test]
    fn activation_is_concepts_and_loading() {
        let runner = runner();
        assert_eq!(runner.phase(), Phase::Concepts);
        assert!(runner.is_loading());
        assert!(runner.state().answers().is_empty());
    }

    #[test]
    fn events_wait_for_content() {
        let mut runner = runner();
        assert_eq!(
            runner.dispatch(SessionEvent::Advance).unwrap_err(),
            RunnerError::ContentUnavailable
        );
    }

    #[test]
    fn failed_generation_can_be_retried() {
        let mut runner = runner();
        let first = runner.begin_generation().unwrap();
        let outcome = runner.resolve_generation(
            first,
            Err(GenerationError::Contract(ContentContractError::NoQuestions)),
        );
        assert_eq!(outcome, GenerationOutcome::Failed);
        assert_eq!(runner.content_status(), &ContentStatus::Unavailable);
        assert!(runner.last_error().is_some());

        let retry = runner.begin_generation().unwrap();
        assert!(retry > first);
        assert_eq!(
            runner.resolve_generation(retry, Ok(content())),
            GenerationOutcome::Applied
        );
        assert!(runner.content().is_some());
        assert!(runner.last_error().is_none());
    }

    #[test]
    fn superseded_attempts_are_stale() {
        let mut runner = runner();
        let first = runner.begin_generation().unwrap();
        let second = runner.begin_generation().unwrap();
        assert_eq!(
            runner.resolve_generation(first, Ok(content())),
            GenerationOutcome::Stale
        );
        assert!(runner.is_loading());
        assert_eq!(
            runner.resolve_generation(second, Ok(content())),
            GenerationOutcome::Applied
        );
    }

    #[test]
    fn resolution_after_end_is_ignored() {
        let mut runner = runner();
        let ticket = runner.begin_generation().unwrap();
        let outcome = runner.end(fixed_now());
        assert_eq!(outcome.total_questions, 0);
        assert!(outcome.to_record().is_none());

        assert_eq!(
            runner.resolve_generation(ticket, Ok(content())),
            GenerationOutcome::Stale
        );
        assert!(runner.content().is_none());
        assert_eq!(runner.begin_generation().unwrap_err(), RunnerError::Ended);
    }

    #[test]
    fn loaded_content_cannot_be_regenerated() {
        let mut runner = loaded();
        assert_eq!(
            runner.begin_generation().unwrap_err(),
            RunnerError::ContentAlreadyLoaded
        );
    }

    #[test]
    fn entering_review_computes_score() {
        let mut runner = loaded();
        runner.dispatch(SessionEvent::Advance).unwrap();
        let correct = runner
            .current_question()
            .and_then(Question::correct_answer)
            .unwrap()
            .to_string();
        runner.dispatch(SessionEvent::SubmitAnswer(correct)).unwrap();
        runner.dispatch(SessionEvent::Next).unwrap();
        runner
            .dispatch(SessionEvent::SubmitAnswer("True".into()))
            .unwrap();
        runner.dispatch(SessionEvent::Next).unwrap();
        assert!(runner.score().is_none());
        runner.dispatch(SessionEvent::Next).unwrap();

        assert_eq!(runner.phase(), Phase::Review);
        // Two of three questions right; the open-ended one counts against.
        assert_eq!(runner.score(), Some(67));
    }

    #[test]
    fn rejected_events_leave_state_untouched() {
        let mut runner = loaded();
        let before = runner.state().clone();
        let err = runner.dispatch(SessionEvent::Next).unwrap_err();
        assert!(matches!(err, RunnerError::Transition(_)));
        assert_eq!(runner.state(), &before);
    }

    #[test]
    fn end_is_idempotent_and_blocks_events() {
        let mut runner = loaded();
        let later = fixed_now() + Duration::minutes(3);
        let first = runner.end(later);
        let second = runner.end(later + Duration::minutes(1));
        assert_eq!(first.ended_at, second.ended_at);
        assert_eq!(first.total_questions, 3);
        assert_eq!(
            runner.dispatch(SessionEvent::Advance).unwrap_err(),
            RunnerError::Ended
        );

        let record = first.to_record().unwrap();
        assert_eq!(record.duration(), Duration::minutes(3));
        assert_eq!(record.score(), None);
    }
}
