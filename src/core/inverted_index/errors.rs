use thiserror::Error;

use crate::core::hit::Hit;
use crate::core::posting_list::PostingListError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvertedIndexError {
    #[error("Invalid MainIndexConfig: '{0}'")]
    InvalidIndexConfig(String),

    #[error("Invalid hit {hit:?} for term '{term}': '{reason}'")]
    InvalidHit { term: String, hit: Hit, reason: String },

    #[error("'{0:?}'")]
    PostingListError(#[from] PostingListError),
}
