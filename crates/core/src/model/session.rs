use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::answers::AnswerRecord;
use crate::model::content::{Question, StudyContent};
use crate::model::ids::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransitionError {
    #[error("{event} is not allowed during the {phase} phase")]
    NotAllowed { phase: Phase, event: &'static str },

    #[error("answer is not one of the options of question {0}")]
    UnknownOption(QuestionId),

    #[error("answer cannot be empty")]
    EmptyAnswer,
}

/// Stage of a study session. Sessions only move forward, except for
/// "review again" which returns to `Concepts`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Concepts,
    Practice,
    Review,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Concepts => "concepts",
            Self::Practice => "practice",
            Self::Review => "review",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-driven events of the session runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Leave the concepts overview and start practicing.
    Advance,
    /// Answer the current question (option text or free text).
    SubmitAnswer(String),
    Next,
    Previous,
    ReviewAgain,
}

impl SessionEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Advance => "advance",
            Self::SubmitAnswer(_) => "submit answer",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::ReviewAgain => "review again",
        }
    }
}

/// Runtime state of one study session.
///
/// Transitions are pure: `apply` returns a new state and never mutates `self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    phase: Phase,
    current_question_index: usize,
    explanation_visible: bool,
    answers: AnswerRecord,
    started_at: DateTime<Utc>,
}

impl SessionState {
    /// Fresh state at activation: concepts phase, no answers.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            phase: Phase::Concepts,
            current_question_index: 0,
            explanation_visible: false,
            answers: AnswerRecord::new(),
            started_at,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    #[must_use]
    pub fn explanation_visible(&self) -> bool {
        self.explanation_visible
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Time since the session started, never negative.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (now - self.started_at).max(Duration::zero())
    }

    /// The question being practiced, if the session is in the practice phase.
    #[must_use]
    pub fn current_question<'a>(&self, content: &'a StudyContent) -> Option<&'a Question> {
        if self.phase == Phase::Practice {
            content.question(self.current_question_index)
        } else {
            None
        }
    }

    /// Apply `event` and return the resulting state.
    ///
    /// `Previous` on the first question is a no-op and returns the state
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::NotAllowed` if the event has no transition in the
    /// current phase, `UnknownOption` if a choice answer is not one of the
    /// question's options, and `EmptyAnswer` for a blank free-text answer.
    pub fn apply(
        &self,
        content: &StudyContent,
        event: SessionEvent,
    ) -> Result<Self, TransitionError> {
        let mut next = self.clone();
        match (self.phase, event) {
            (Phase::Concepts, SessionEvent::Advance) => {
                next.phase = Phase::Practice;
                next.current_question_index = 0;
                next.explanation_visible = false;
            }
            (Phase::Practice, SessionEvent::SubmitAnswer(answer)) => {
                let Some(question) = content.question(self.current_question_index) else {
                    return Err(TransitionError::NotAllowed {
                        phase: self.phase,
                        event: "submit answer",
                    });
                };
                check_answer(question, &answer)?;
                next.answers.record(question.id().clone(), answer);
                next.explanation_visible = true;
            }
            (Phase::Practice, SessionEvent::Next) => {
                if self.current_question_index < content.last_index() {
                    next.current_question_index += 1;
                    next.explanation_visible = false;
                } else {
                    next.phase = Phase::Review;
                }
            }
            (Phase::Practice, SessionEvent::Previous) => {
                if self.current_question_index > 0 {
                    next.current_question_index -= 1;
                    next.explanation_visible = false;
                }
            }
            (Phase::Review, SessionEvent::ReviewAgain) => {
                next.phase = Phase::Concepts;
                next.current_question_index = 0;
                next.explanation_visible = false;
            }
            (phase, event) => {
                return Err(TransitionError::NotAllowed {
                    phase,
                    event: event.name(),
                });
            }
        }
        Ok(next)
    }
}

fn check_answer(question: &Question, answer: &str) -> Result<(), TransitionError> {
    if question.kind().has_options() {
        if !question.has_option(answer) {
            return Err(TransitionError::UnknownOption(question.id().clone()));
        }
    } else if answer.trim().is_empty() {
        return Err(TransitionError::EmptyAnswer);
    }
    Ok(())
}

/// Format a duration as `m:ss`, e.g. `3:07`.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    let minutes = total / 60;
    let seconds = total % 60;
    format!("{minutes}:{seconds:02}")
}
