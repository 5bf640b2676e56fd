mod progress;
mod runner;
mod service;

// Public API of the session subsystem.
pub use progress::{ProgressOverview, ProgressService, RecentTopic};
pub use runner::{
    ContentStatus, GenerationOutcome, GenerationTicket, SessionOutcome, SessionRunner,
};
pub use service::{EndedSession, StudySessionService, log_resolution};
