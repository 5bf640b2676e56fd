use async_trait::async_trait;
use study_core::model::{
    ContentContractError, Difficulty, Focus, Question, QuestionId, SessionParameters,
    StudyContent,
};

use super::ContentGenerator;
use crate::error::GenerationError;

/// Offline generator that fills fixed templates with the session parameters.
///
/// Used when no API key is configured and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateContentGenerator;

impl TemplateContentGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build the templated content synchronously.
    ///
    /// # Errors
    ///
    /// Returns `ContentContractError` if a template produces an inconsistent question.
    pub fn build(params: &SessionParameters) -> Result<StudyContent, ContentContractError> {
        let topic = params.topic();
        let depth = depth_phrase(params.difficulty());

        let concepts = vec![
            format!("What {topic} is and why it matters, {depth}."),
            format!("The core building blocks of {topic} and how they relate."),
            format!("Common misconceptions about {topic}."),
            focus_concept(topic, params.focus()),
        ];

        let correct = format!("It describes the fundamental principles of {topic}");
        let questions = vec![
            Question::multiple_choice(
                QuestionId::for_position(0),
                format!("Which statement best describes {topic}?"),
                vec![
                    correct.clone(),
                    format!("It is unrelated to the study of {topic}"),
                    "It only applies to advanced edge cases".to_string(),
                    "None of the above".to_string(),
                ],
                correct,
                format!(
                    "{topic} is first of all a set of fundamental principles; \
                     the other options miss that."
                ),
            )?,
            Question::true_false(
                QuestionId::for_position(1),
                format!("Understanding the basics of {topic} helps with its advanced topics."),
                "True",
                "Advanced material builds directly on the fundamentals.",
            )?,
            Question::open_ended(
                QuestionId::for_position(2),
                format!(
                    "In your own words, explain how you would apply {topic} to a real problem."
                ),
                format!(
                    "A good answer names a concrete situation and walks through \
                     how the principles of {topic} apply to it."
                ),
            ),
        ];

        let summary = format!(
            "You studied {topic} at the {level} level: its definition, its core building blocks, \
             common misconceptions, and how to apply it. Revisit the questions you missed and try \
             explaining the concepts aloud.",
            level = params.difficulty().as_str(),
        );

        StudyContent::new(concepts, questions, summary)
    }
}

#[async_trait]
impl ContentGenerator for TemplateContentGenerator {
    async fn generate(&self, params: &SessionParameters) -> Result<StudyContent, GenerationError> {
        Ok(Self::build(params)?)
    }

    fn name(&self) -> &'static str {
        "template"
    }
}

fn depth_phrase(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Beginner => "starting from first principles",
        Difficulty::Intermediate => "building on the basics",
        Difficulty::Advanced => "including the subtle cases",
    }
}

fn focus_concept(topic: &str, focus: Focus) -> String {
    match focus {
        Focus::Concepts => format!("Key vocabulary you need to talk precisely about {topic}."),
        Focus::Practice => format!("Step-by-step strategies for solving {topic} problems."),
        Focus::Review => format!("A quick recap checklist for {topic}."),
        Focus::Mixed => format!("How theory and practice of {topic} fit together."),
    }
}
