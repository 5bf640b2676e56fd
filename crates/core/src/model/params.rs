use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Minimum topic length, counted in characters after trimming.
pub const MIN_TOPIC_CHARS: usize = 3;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormValidationError {
    #[error("topic is required")]
    TopicRequired,

    #[error("topic must be at least {min} characters")]
    TopicTooShort { min: usize },

    #[error("unknown difficulty: {0}")]
    InvalidDifficulty(String),

    #[error("unknown focus area: {0}")]
    InvalidFocus(String),
}

impl FormValidationError {
    /// The form field the error belongs to.
    #[must_use]
    pub fn field(&self) -> FormField {
        match self {
            Self::TopicRequired | Self::TopicTooShort { .. } => FormField::Topic,
            Self::InvalidDifficulty(_) => FormField::Difficulty,
            Self::InvalidFocus(_) => FormField::Focus,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Topic,
    Difficulty,
    Focus,
}

//
// ─── ENUMS ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl FromStr for Difficulty {
    type Err = FormValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| FormValidationError::InvalidDifficulty(s.to_string()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which part of the study flow the generated content should emphasize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    Concepts,
    Practice,
    Review,
    #[default]
    Mixed,
}

impl Focus {
    pub const ALL: [Self; 4] = [Self::Concepts, Self::Practice, Self::Review, Self::Mixed];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Concepts => "concepts",
            Self::Practice => "practice",
            Self::Review => "review",
            Self::Mixed => "mixed",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Concepts => "Understanding concepts",
            Self::Practice => "Practice problems",
            Self::Review => "Review & summary",
            Self::Mixed => "Mixed approach",
        }
    }
}

impl FromStr for Focus {
    type Err = FormValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|focus| focus.as_str() == s)
            .ok_or_else(|| FormValidationError::InvalidFocus(s.to_string()))
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── PARAMETERS ────────────────────────────────────────────────────────────────
//

/// Validated parameters a session is activated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSessionParameters")]
pub struct SessionParameters {
    topic: String,
    difficulty: Difficulty,
    focus: Focus,
}

impl SessionParameters {
    /// # Errors
    ///
    /// Returns `FormValidationError` if the topic is blank or too short.
    pub fn new(
        topic: impl Into<String>,
        difficulty: Difficulty,
        focus: Focus,
    ) -> Result<Self, FormValidationError> {
        let topic = validate_topic(&topic.into())?;
        Ok(Self {
            topic,
            difficulty,
            focus,
        })
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
}

#[derive(Deserialize)]
struct RawSessionParameters {
    topic: String,
    difficulty: Difficulty,
    focus: Focus,
}

impl TryFrom<RawSessionParameters> for SessionParameters {
    type Error = FormValidationError;

    fn try_from(raw: RawSessionParameters) -> Result<Self, Self::Error> {
        Self::new(raw.topic, raw.difficulty, raw.focus)
    }
}

/// Raw form input as typed/selected by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParametersDraft {
    pub topic: String,
    pub difficulty: String,
    pub focus: String,
}

impl Default for SessionParametersDraft {
    fn default() -> Self {
        Self {
            topic: String::new(),
            difficulty: Difficulty::default().as_str().to_string(),
            focus: Focus::default().as_str().to_string(),
        }
    }
}

impl SessionParametersDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the draft and return the first error per field.
    ///
    /// # Errors
    ///
    /// Returns every field error found, in field order (topic, difficulty, focus).
    pub fn validate_all(&self) -> Result<SessionParameters, Vec<FormValidationError>> {
        let topic = validate_topic(&self.topic);
        let difficulty = self.difficulty.parse::<Difficulty>();
        let focus = self.focus.parse::<Focus>();

        match (topic, difficulty, focus) {
            (Ok(topic), Ok(difficulty), Ok(focus)) => Ok(SessionParameters {
                topic,
                difficulty,
                focus,
            }),
            (topic, difficulty, focus) => Err([topic.err(), difficulty.err(), focus.err()]
                .into_iter()
                .flatten()
                .collect()),
        }
    }

    /// Validate the draft into session parameters.
    ///
    /// # Errors
    ///
    /// Returns the first `FormValidationError` encountered.
    pub fn validate(&self) -> Result<SessionParameters, FormValidationError> {
        self.validate_all().map_err(|mut errors| errors.remove(0))
    }
}

fn validate_topic(raw: &str) -> Result<String, FormValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FormValidationError::TopicRequired);
    }
    if trimmed.chars().count() < MIN_TOPIC_CHARS {
        return Err(FormValidationError::TopicTooShort {
            min: MIN_TOPIC_CHARS,
        });
    }
    Ok(trimmed.to_string())
}
