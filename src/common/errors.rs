use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::core::{InvertedIndexError, IteratorError, PostingListError};

/// The library's error enum
#[derive(Debug, Clone, Error)]
pub enum HitIndexError {
    /// IO Error.
    #[error("An IO error occurred: '{0}'")]
    IoError(Arc<io::Error>),
    /// Invalid argument was passed by the user.
    #[error("An invalid argument was passed: '{0}'")]
    InvalidArgument(String),
    /// System error. (e.g.: a config file can't be parsed).
    #[error("System error.'{0}'")]
    SystemError(String),

    #[error("'{0:?}'")]
    PostingListError(#[from] PostingListError),

    #[error("'{0:?}'")]
    InvertedIndexError(#[from] InvertedIndexError),

    #[error("'{0:?}'")]
    IteratorError(#[from] IteratorError),
}

impl From<io::Error> for HitIndexError {
    fn from(io_err: io::Error) -> HitIndexError {
        HitIndexError::IoError(Arc::new(io_err))
    }
}

impl From<serde_json::Error> for HitIndexError {
    fn from(serde_error: serde_json::Error) -> HitIndexError {
        HitIndexError::SystemError(serde_error.to_string())
    }
}
