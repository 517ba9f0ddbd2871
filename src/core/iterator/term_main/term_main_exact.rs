use crate::core::common::types::SectionIdMask;
use crate::core::inverted_index::MainIndexAccess;
use crate::core::iterator::term_main::{DocHitInfoIteratorTermMain, TermMainState, TermMainVariant};
use crate::core::iterator::IteratorError;

/// Matches the term itself, prefix hits copied from longer terms are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactMatch;

impl TermMainVariant for ExactMatch {
    const TERM_SUFFIX: &'static str = "";

    fn retrieve_more_hits<'a, M: MainIndexAccess + 'a>(
        &mut self,
        state: &mut TermMainState<'a, M>,
    ) -> Result<(), IteratorError> {
        let Some(hits) = state.next_page(|main_index, term| main_index.accessor_for_exact_term(term))? else {
            return Ok(());
        };
        // a document and section appears once per term
        state.cache_hits(hits.into_iter().filter(|hit| !hit.is_prefix_hit()), |_, incoming| incoming)
    }
}

pub type DocHitInfoIteratorTermMainExact<'a, M> = DocHitInfoIteratorTermMain<'a, M, ExactMatch>;

impl<'a, M: MainIndexAccess + 'a> DocHitInfoIteratorTermMain<'a, M, ExactMatch> {
    pub fn new(
        main_index: &'a M,
        term: impl Into<String>,
        section_restrict_mask: SectionIdMask,
        need_hit_term_frequency: bool,
    ) -> Self {
        Self::new_with_variant(main_index, term, section_restrict_mask, need_hit_term_frequency, ExactMatch)
    }
}
