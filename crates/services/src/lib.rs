#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod generation;
pub mod sessions;

pub use study_core::Clock;

pub use app_services::AppServices;
pub use error::{GenerationError, ProgressError, RunnerError};
pub use generation::{ChatContentGenerator, ContentGenerator, TemplateContentGenerator};
pub use sessions::{
    ContentStatus, EndedSession, GenerationOutcome, GenerationTicket, ProgressOverview,
    ProgressService, RecentTopic, SessionOutcome, SessionRunner, StudySessionService,
    log_resolution,
};
