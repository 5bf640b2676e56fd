use thiserror::Error;

use crate::model::{
    ContentContractError, FormValidationError, GeneratorSettingsError, SessionRecordError,
    TransitionError,
};
use crate::scoring::ScoreDenominatorParseError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    FormValidation(#[from] FormValidationError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    ContentContract(#[from] ContentContractError),
    #[error(transparent)]
    GeneratorSettings(#[from] GeneratorSettingsError),
    #[error(transparent)]
    SessionRecord(#[from] SessionRecordError),
    #[error(transparent)]
    ScoreDenominator(#[from] ScoreDenominatorParseError),
}
