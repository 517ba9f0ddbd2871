use crate::core::common::types::SectionIdMask;
use crate::core::hit::{DocHitInfo, TermMatchInfo};
use crate::core::iterator::IteratorError;

/// Leaf of a query plan: walks matching documents from the largest document id down.
pub trait DocHitInfoIterator {
    /// Move to the next matching document.
    /// `Err(IteratorError::NoMoreHits)` once exhausted, any other error is fatal for the query.
    fn advance(&mut self) -> Result<(), IteratorError>;

    /// Only meaningful after a successful [`DocHitInfoIterator::advance`].
    fn current_document(&self) -> &DocHitInfo;

    /// Append the statistics of the current document to `matched_terms_stats`, sections limited to
    /// `filtering_section_mask`. Nothing is appended for a term already in the list or when the
    /// iterator isn't positioned on a document.
    fn populate_matched_terms_stats(
        &self,
        matched_terms_stats: &mut Vec<TermMatchInfo>,
        filtering_section_mask: SectionIdMask,
    );

    fn num_blocks_inspected(&self) -> u32;

    fn num_advance_calls(&self) -> u32;

    fn into_std_iter(self) -> DocHitInfoStdIterator<Self>
    where
        Self: Sized,
    {
        DocHitInfoStdIterator::new(self)
    }
}

impl<I: DocHitInfoIterator + ?Sized> DocHitInfoIterator for Box<I> {
    fn advance(&mut self) -> Result<(), IteratorError> {
        (**self).advance()
    }

    fn current_document(&self) -> &DocHitInfo {
        (**self).current_document()
    }

    fn populate_matched_terms_stats(
        &self,
        matched_terms_stats: &mut Vec<TermMatchInfo>,
        filtering_section_mask: SectionIdMask,
    ) {
        (**self).populate_matched_terms_stats(matched_terms_stats, filtering_section_mask)
    }

    fn num_blocks_inspected(&self) -> u32 {
        (**self).num_blocks_inspected()
    }

    fn num_advance_calls(&self) -> u32 {
        (**self).num_advance_calls()
    }
}

/// [`Iterator`] over the documents of a [`DocHitInfoIterator`]. Ends on exhaustion, a fatal error
/// is yielded once and ends it too.
pub struct DocHitInfoStdIterator<I> {
    inner: I,
    finished: bool,
}

impl<I: DocHitInfoIterator> DocHitInfoStdIterator<I> {
    pub fn new(inner: I) -> Self {
        Self { inner, finished: false }
    }

    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: DocHitInfoIterator> Iterator for DocHitInfoStdIterator<I> {
    type Item = Result<DocHitInfo, IteratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.inner.advance() {
            Ok(()) => Some(Ok(*self.inner.current_document())),
            Err(IteratorError::NoMoreHits) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
