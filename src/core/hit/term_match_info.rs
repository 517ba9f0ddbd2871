use crate::core::common::types::{SectionIdMask, TermFrequencyArray};

/// Per-term statistics of the document an iterator is positioned on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermMatchInfo {
    pub term: String,
    /// Sections of the current document the term matched in.
    pub section_ids_mask: SectionIdMask,
    /// Term frequency per section, `NO_TERM_FREQUENCY` when not collected.
    pub term_frequencies: TermFrequencyArray,
}

impl TermMatchInfo {
    pub fn new(term: impl Into<String>, section_ids_mask: SectionIdMask, term_frequencies: TermFrequencyArray) -> Self {
        Self { term: term.into(), section_ids_mask, term_frequencies }
    }
}
