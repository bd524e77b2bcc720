use crate::lift::DecodeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid lift request: {0}")]
    InvalidRequest(InvalidRequestReason),
    #[error("invalid lift state: {0}")]
    InvalidLiftState(#[from] DecodeError),
    #[error("malformed dispatch input: {0}")]
    MalformedInput(String),
    #[error("fleet has no lifts")]
    EmptyFleet,
    #[error("dispatch invariant violated: {0}")]
    InternalInvariant(&'static str),
    #[error("watch channel send failed")]
    WatchSend,
    #[error("state lock poisoned")]
    StateLock,
}

/// Which validation rule rejected a floor request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidRequestReason {
    #[error("cannot go down from floor 0; and cannot go up from floor 20")]
    ImpossibleBoundary,
    #[error("expected the last character to be one of 'U', 'D'")]
    MissingDirection,
    #[error("all characters until the last must be an integer floor")]
    FloorNotInteger,
    #[error("floor range is 0-20")]
    FloorOutOfRange,
    #[error("requested direction is impossible from this floor")]
    ImpossibleDirection,
}

impl From<InvalidRequestReason> for AppError {
    fn from(reason: InvalidRequestReason) -> Self {
        AppError::InvalidRequest(reason)
    }
}
