use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentContractError {
    #[error("content is not valid JSON: {0}")]
    Malformed(String),

    #[error("content has no questions")]
    NoQuestions,

    #[error("unknown question type: {0}")]
    UnknownKind(String),

    #[error("question {0} has no options")]
    MissingOptions(QuestionId),

    #[error("question {0} has no correct answer")]
    MissingCorrectAnswer(QuestionId),

    #[error("correct answer of question {0} is not one of its options")]
    CorrectAnswerNotAnOption(QuestionId),

    #[error("duplicate question id: {0}")]
    DuplicateQuestionId(QuestionId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    OpenEnded,
}

impl QuestionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple-choice",
            Self::TrueFalse => "true-false",
            Self::OpenEnded => "open-ended",
        }
    }

    /// Choice questions carry options and a correct answer.
    #[must_use]
    pub fn has_options(self) -> bool {
        !matches!(self, Self::OpenEnded)
    }
}

impl FromStr for QuestionKind {
    type Err = ContentContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple-choice" => Ok(Self::MultipleChoice),
            "true-false" => Ok(Self::TrueFalse),
            "open-ended" => Ok(Self::OpenEnded),
            other => Err(ContentContractError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options offered for a true-false question when none are supplied.
pub const TRUE_FALSE_OPTIONS: [&str; 2] = ["True", "False"];

/// A single practice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
    id: QuestionId,
    prompt: String,
    kind: QuestionKind,
    options: Option<Vec<String>>,
    correct_answer: Option<String>,
    explanation: String,
}

impl Question {
    /// # Errors
    ///
    /// Returns `ContentContractError` if options are empty or the correct answer
    /// is not one of them.
    pub fn multiple_choice(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Result<Self, ContentContractError> {
        Self::choice(
            id,
            prompt.into(),
            QuestionKind::MultipleChoice,
            options,
            correct_answer.into(),
            explanation.into(),
        )
    }

    /// # Errors
    ///
    /// Returns `ContentContractError` if the correct answer is not "True" or "False".
    pub fn true_false(
        id: QuestionId,
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Result<Self, ContentContractError> {
        let options = TRUE_FALSE_OPTIONS.iter().map(|s| (*s).to_string()).collect();
        Self::choice(
            id,
            prompt.into(),
            QuestionKind::TrueFalse,
            options,
            correct_answer.into(),
            explanation.into(),
        )
    }

    #[must_use]
    pub fn open_ended(
        id: QuestionId,
        prompt: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            kind: QuestionKind::OpenEnded,
            options: None,
            correct_answer: None,
            explanation: explanation.into(),
        }
    }

    pub(crate) fn choice(
        id: QuestionId,
        prompt: String,
        kind: QuestionKind,
        options: Vec<String>,
        correct_answer: String,
        explanation: String,
    ) -> Result<Self, ContentContractError> {
        if options.is_empty() {
            return Err(ContentContractError::MissingOptions(id));
        }
        if !options.contains(&correct_answer) {
            return Err(ContentContractError::CorrectAnswerNotAnOption(id));
        }
        Ok(Self {
            id,
            prompt,
            kind,
            options: Some(options),
            correct_answer: Some(correct_answer),
            explanation,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    /// Options in display order; `None` for open-ended questions.
    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        self.options.as_deref()
    }

    #[must_use]
    pub fn correct_answer(&self) -> Option<&str> {
        self.correct_answer.as_deref()
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.correct_answer.is_some()
    }

    #[must_use]
    pub fn has_option(&self, answer: &str) -> bool {
        self.options
            .as_ref()
            .is_some_and(|options| options.iter().any(|option| option == answer))
    }
}

/// Everything a session studies: concepts, practice questions, and a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStudyContent")]
pub struct StudyContent {
    concepts: Vec<String>,
    questions: Vec<Question>,
    summary: String,
}

impl StudyContent {
    /// # Errors
    ///
    /// Returns `ContentContractError::NoQuestions` when `questions` is empty, or
    /// `DuplicateQuestionId` when two questions share an id.
    pub fn new(
        concepts: Vec<String>,
        questions: Vec<Question>,
        summary: impl Into<String>,
    ) -> Result<Self, ContentContractError> {
        if questions.is_empty() {
            return Err(ContentContractError::NoQuestions);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(ContentContractError::DuplicateQuestionId(
                    question.id().clone(),
                ));
            }
        }
        Ok(Self {
            concepts,
            questions,
            summary: summary.into(),
        })
    }

    #[must_use]
    pub fn concepts(&self) -> &[String] {
        &self.concepts
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn question_by_id(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id() == id)
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Index of the last question. Content always has at least one.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }
}

//
// ─── DESERIALIZATION ───────────────────────────────────────────────────────────
//

#[derive(Deserialize)]
struct RawQuestion {
    id: QuestionId,
    prompt: String,
    kind: QuestionKind,
    options: Option<Vec<String>>,
    correct_answer: Option<String>,
    explanation: String,
}

impl TryFrom<RawQuestion> for Question {
    type Error = ContentContractError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        if !raw.kind.has_options() {
            return Ok(Self::open_ended(raw.id, raw.prompt, raw.explanation));
        }
        let Some(options) = raw.options else {
            return Err(ContentContractError::MissingOptions(raw.id));
        };
        let Some(correct_answer) = raw.correct_answer else {
            return Err(ContentContractError::MissingCorrectAnswer(raw.id));
        };
        Self::choice(
            raw.id,
            raw.prompt,
            raw.kind,
            options,
            correct_answer,
            raw.explanation,
        )
    }
}

#[derive(Deserialize)]
struct RawStudyContent {
    concepts: Vec<String>,
    questions: Vec<Question>,
    summary: String,
}

impl TryFrom<RawStudyContent> for StudyContent {
    type Error = ContentContractError;

    fn try_from(raw: RawStudyContent) -> Result<Self, Self::Error> {
        Self::new(raw.concepts, raw.questions, raw.summary)
    }
}
