//! Error types for the issuelite library.

use crate::models::issue::Status;

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("not signed in")]
    Unauthorized,

    #[error("cannot move an issue from '{from}' straight to '{to}'; move it to 'in_progress' first")]
    TransitionRejected { from: Status, to: Status },

    #[error("issue '{0}' has no usable title")]
    InvalidRecord(String),

    #[error("no issue with id '{0}'")]
    NotFound(String),

    #[error("a submission is already in flight")]
    SubmissionInProgress,

    #[error("sign-in requires a non-empty identity")]
    BlankIdentity,

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
