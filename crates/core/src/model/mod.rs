mod answers;
pub mod content;
pub mod contract;
mod generator_settings;
mod ids;
mod params;
mod record;
mod session;

pub use answers::AnswerRecord;
pub use content::{ContentContractError, Question, QuestionKind, StudyContent};
pub use contract::{parse_study_content, to_contract_json};
pub use generator_settings::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, GeneratorSettings, GeneratorSettingsDraft,
    GeneratorSettingsError,
};
pub use ids::{QuestionId, SessionId};
pub use params::{
    Difficulty, Focus, FormField, FormValidationError, MIN_TOPIC_CHARS, SessionParameters,
    SessionParametersDraft,
};
pub use record::{SessionRecord, SessionRecordError};
pub use session::{Phase, SessionEvent, SessionState, TransitionError, format_elapsed};
