use thiserror::Error;

use crate::core::inverted_index::InvertedIndexError;
use crate::core::posting_list::PostingListError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IteratorError {
    /// The iterator is exhausted, not a failure.
    #[error("No more hits")]
    NoMoreHits,

    #[error("Iterator was aborted by an earlier failure")]
    Aborted,

    #[error("'{0:?}'")]
    PostingList(#[from] PostingListError),

    #[error("'{0:?}'")]
    InvertedIndex(#[from] InvertedIndexError),
}

impl IteratorError {
    pub fn is_no_more_hits(&self) -> bool {
        matches!(self, IteratorError::NoMoreHits)
    }
}
