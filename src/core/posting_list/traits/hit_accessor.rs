use crate::core::hit::Hit;
use crate::core::posting_list::PostingListError;

/// Sequential reader over the posting list chain of one term.
pub trait PostingListHitAccessor {
    /// Return the next page of hits, sorted by encoded value ascending.
    /// Document ids of a page never exceed those of the page before it.
    ///
    /// `Ok(None)` once the chain is exhausted; an `Err` means the chain can't be decoded and
    /// must not be read any further.
    fn next_page(&mut self) -> Result<Option<Vec<Hit>>, PostingListError>;
}

impl<A: PostingListHitAccessor + ?Sized> PostingListHitAccessor for Box<A> {
    fn next_page(&mut self) -> Result<Option<Vec<Hit>>, PostingListError> {
        (**self).next_page()
    }
}
