//! JSON contract spoken by content generators.
//!
//! ```json
//! {
//!   "concepts": ["..."],
//!   "questions": [
//!     { "question": "...", "type": "multiple-choice", "options": ["..."],
//!       "correctAnswer": "...", "explanation": "..." }
//!   ],
//!   "summary": "..."
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::model::content::{
    ContentContractError, Question, QuestionKind, StudyContent, TRUE_FALSE_OPTIONS,
};
use crate::model::ids::QuestionId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireContent {
    concepts: Vec<String>,
    questions: Vec<WireQuestion>,
    summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireQuestion {
    question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    correct_answer: Option<String>,
    #[serde(default)]
    explanation: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Parse a generator reply into `StudyContent`.
///
/// A reply wrapped in a fenced code block is accepted. Question ids are
/// assigned by position (`q1`, `q2`, ...).
///
/// # Errors
///
/// Returns `ContentContractError` when the reply is not the expected JSON shape
/// or a question is inconsistent with its type.
pub fn parse_study_content(raw: &str) -> Result<StudyContent, ContentContractError> {
    let body = strip_code_fence(raw);
    let wire: WireContent = serde_json::from_str(body)
        .map_err(|err| ContentContractError::Malformed(err.to_string()))?;

    let questions = wire
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, question)| question.into_question(QuestionId::for_position(index)))
        .collect::<Result<Vec<_>, _>>()?;

    StudyContent::new(wire.concepts, questions, wire.summary)
}

/// Render content back into the contract shape.
///
/// # Errors
///
/// Returns `ContentContractError::Malformed` if serialization fails.
pub fn to_contract_json(content: &StudyContent) -> Result<String, ContentContractError> {
    let wire = WireContent {
        concepts: content.concepts().to_vec(),
        questions: content
            .questions()
            .iter()
            .map(|question| WireQuestion {
                question: question.prompt().to_string(),
                options: question.options().map(<[String]>::to_vec),
                correct_answer: question.correct_answer().map(str::to_string),
                explanation: question.explanation().to_string(),
                kind: question.kind().as_str().to_string(),
            })
            .collect(),
        summary: content.summary().to_string(),
    };
    serde_json::to_string(&wire).map_err(|err| ContentContractError::Malformed(err.to_string()))
}

impl WireQuestion {
    fn into_question(self, id: QuestionId) -> Result<Question, ContentContractError> {
        let kind: QuestionKind = self.kind.trim().parse()?;
        if !kind.has_options() {
            return Ok(Question::open_ended(id, self.question, self.explanation));
        }

        let options = match (kind, self.options) {
            (_, Some(options)) if !options.is_empty() => options,
            (QuestionKind::TrueFalse, _) => TRUE_FALSE_OPTIONS
                .iter()
                .map(|option| (*option).to_string())
                .collect(),
            _ => return Err(ContentContractError::MissingOptions(id)),
        };
        let Some(correct_answer) = self.correct_answer else {
            return Err(ContentContractError::MissingCorrectAnswer(id));
        };

        Question::choice(
            id,
            self.question,
            kind,
            options,
            correct_answer,
            self.explanation,
        )
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening fence line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
