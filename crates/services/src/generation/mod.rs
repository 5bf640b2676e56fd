mod chat;
mod prompt;
mod template;

use async_trait::async_trait;
use study_core::model::{SessionParameters, StudyContent};

use crate::error::GenerationError;

pub use chat::ChatContentGenerator;
pub use prompt::{SYSTEM_PROMPT, build_user_prompt};
pub use template::TemplateContentGenerator;

/// Boundary to whatever produces study content for a session.
///
/// One call is one attempt: implementations must not retry internally.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Produce concepts, questions, and a summary for `params`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the content cannot be produced or parsed.
    async fn generate(&self, params: &SessionParameters) -> Result<StudyContent, GenerationError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
