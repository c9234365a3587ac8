use thiserror::Error;

use crate::input::InputError;

pub type LbhResult<T> = Result<T, LbhError>;

#[derive(Debug, Error)]
pub enum LbhError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("report error: {0}")]
    Report(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("restaurant not found: {0}")]
    NotFound(String),

    #[error("consistency check failed: {failed} of {total} scenarios out of tolerance")]
    CheckFailed { failed: usize, total: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
