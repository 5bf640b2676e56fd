use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::{AnswerRecord, StudyContent};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown score denominator: {0} (expected `all` or `scored`)")]
pub struct ScoreDenominatorParseError(pub String);

/// What a session score is divided by.
///
/// `AllQuestions` counts open-ended questions too, even though they can never
/// be marked correct, so sessions containing them cannot reach 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDenominator {
    #[default]
    AllQuestions,
    ScoredQuestions,
}

impl ScoreDenominator {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllQuestions => "all",
            Self::ScoredQuestions => "scored",
        }
    }
}

impl FromStr for ScoreDenominator {
    type Err = ScoreDenominatorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::AllQuestions),
            "scored" => Ok(Self::ScoredQuestions),
            other => Err(ScoreDenominatorParseError(other.to_string())),
        }
    }
}

impl fmt::Display for ScoreDenominator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tally of a session's answers against the content's correct answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub correct: usize,
    pub scored_questions: usize,
    pub total_questions: usize,
    pub answered: usize,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn tally(content: &StudyContent, answers: &AnswerRecord) -> Self {
        let questions = content.questions();
        let mut correct = 0;
        let mut scored_questions = 0;
        for question in questions {
            let Some(expected) = question.correct_answer() else {
                continue;
            };
            scored_questions += 1;
            if answers.get(question.id()) == Some(expected) {
                correct += 1;
            }
        }
        let answered = questions
            .iter()
            .filter(|question| answers.contains(question.id()))
            .count();

        Self {
            correct,
            scored_questions,
            total_questions: questions.len(),
            answered,
        }
    }

    /// Percentage score in `0..=100`, rounded half up.
    #[must_use]
    pub fn percent(&self, denominator: ScoreDenominator) -> u8 {
        let denom = match denominator {
            ScoreDenominator::AllQuestions => self.total_questions,
            ScoreDenominator::ScoredQuestions => self.scored_questions,
        };
        if denom == 0 {
            return 0;
        }
        let rounded = (200 * self.correct + denom) / (2 * denom);
        u8::try_from(rounded.min(100)).unwrap_or(100)
    }
}

/// Score of `answers` against `content`, in percent.
#[must_use]
pub fn score(content: &StudyContent, answers: &AnswerRecord, denominator: ScoreDenominator) -> u8 {
    ScoreBreakdown::tally(content, answers).percent(denominator)
}
