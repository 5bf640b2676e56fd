//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;
use study_core::model::{ContentContractError, TransitionError};

/// Errors emitted by content generators.
///
/// The UI treats every variant the same way: a transient notice plus a retry
/// affordance.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("content generation returned an empty response")]
    EmptyResponse,
    #[error("content generation request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Contract(#[from] ContentContractError),
}

/// Errors emitted by a running study session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RunnerError {
    #[error("study content is not available yet")]
    ContentUnavailable,
    #[error("study content is already loaded")]
    ContentAlreadyLoaded,
    #[error("session already ended")]
    Ended,
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
