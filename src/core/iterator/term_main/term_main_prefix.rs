use crate::core::common::types::SectionIdMask;
use crate::core::inverted_index::MainIndexAccess;
use crate::core::iterator::term_main::{DocHitInfoIteratorTermMain, TermMainState, TermMainVariant};
use crate::core::iterator::IteratorError;

/// Matches every term starting with the query term.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrefixMatch {
    // whether the chain read belongs to the query term itself
    exact: bool,
}

impl PrefixMatch {
    pub fn exact(&self) -> bool {
        self.exact
    }
}

impl TermMainVariant for PrefixMatch {
    const TERM_SUFFIX: &'static str = "*";

    fn retrieve_more_hits<'a, M: MainIndexAccess + 'a>(
        &mut self,
        state: &mut TermMainState<'a, M>,
    ) -> Result<(), IteratorError> {
        let exact = &mut self.exact;
        let page = state.next_page(|main_index, term| {
            main_index.accessor_for_prefix_term(term).map(|found| {
                found.map(|prefix| {
                    *exact = prefix.exact;
                    prefix.accessor
                })
            })
        })?;
        let Some(hits) = page else {
            return Ok(());
        };

        // Ordinary sections only count for the query term itself.
        let exact = self.exact;
        state.cache_hits(
            hits.into_iter().filter(|hit| hit.is_in_prefix_section() || (exact && !hit.is_prefix_hit())),
            |existing, incoming| existing.saturating_add(incoming),
        )
    }
}

pub type DocHitInfoIteratorTermMainPrefix<'a, M> = DocHitInfoIteratorTermMain<'a, M, PrefixMatch>;

impl<'a, M: MainIndexAccess + 'a> DocHitInfoIteratorTermMain<'a, M, PrefixMatch> {
    pub fn new(
        main_index: &'a M,
        term: impl Into<String>,
        section_restrict_mask: SectionIdMask,
        need_hit_term_frequency: bool,
    ) -> Self {
        Self::new_with_variant(main_index, term, section_restrict_mask, need_hit_term_frequency, PrefixMatch::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::common::types::{SECTION_ID_MASK_ALL, TOTAL_NUM_SECTIONS};
    use crate::core::hit::{DocHitInfo, Hit, TermMatchInfo};
    use crate::core::inverted_index::{MainIndex, MainIndexBuilder, MainIndexConfig};
    use crate::core::iterator::DocHitInfoIterator;

    fn in_prefix_section(section_id: u8, document_id: u32, term_frequency: u8) -> Hit {
        Hit::new(section_id, document_id, term_frequency, true, false)
    }

    fn fo_index() -> MainIndex {
        let mut builder = MainIndexBuilder::new();
        builder.add_hit("foo", in_prefix_section(0, 1, 1)).unwrap();
        builder.add_hit("foo", Hit::exact(3, 1, 1)).unwrap();
        builder.add_hit("fool", in_prefix_section(1, 1, 1)).unwrap();
        builder.add_hit("food", Hit::exact(2, 1, 1)).unwrap();
        builder.build(MainIndexConfig::default()).unwrap()
    }

    fn collect(iterator: DocHitInfoIteratorTermMainPrefix<'_, MainIndex>) -> Vec<DocHitInfo> {
        iterator.into_std_iter().collect::<Result<Vec<_>, _>>().unwrap()
    }

    #[test]
    fn test_merges_extensions_of_prefix() {
        let index = fo_index();
        let documents = collect(DocHitInfoIteratorTermMainPrefix::new(&index, "fo", SECTION_ID_MASK_ALL, false));
        // section 3 of "foo" and section 2 of "food" aren't prefix sections.
        assert_eq!(documents, vec![DocHitInfo::with_mask(1, 0b11)]);
    }

    #[test]
    fn test_exact_term_surfaces_ordinary_sections() {
        let index = fo_index();
        let mut iterator = DocHitInfoIteratorTermMainPrefix::new(&index, "foo", SECTION_ID_MASK_ALL, false);
        assert_eq!(iterator.advance(), Ok(()));
        assert!(iterator.variant().exact());
        assert_eq!(*iterator.current_document(), DocHitInfo::with_mask(1, 0b1011));
        assert_eq!(iterator.advance(), Err(IteratorError::NoMoreHits));
    }

    #[test]
    fn test_unknown_prefix_matches_nothing() {
        let index = fo_index();
        let mut iterator = DocHitInfoIteratorTermMainPrefix::new(&index, "bar", SECTION_ID_MASK_ALL, false);
        assert_eq!(iterator.advance(), Err(IteratorError::NoMoreHits));
        assert_eq!(iterator.num_blocks_inspected(), 0);

        let mut iterator = DocHitInfoIteratorTermMainPrefix::new(&index, "", SECTION_ID_MASK_ALL, false);
        assert_eq!(iterator.advance(), Err(IteratorError::NoMoreHits));
    }

    #[test]
    fn test_term_frequencies_are_summed() {
        let mut builder = MainIndexBuilder::new();
        builder.add_hit("foo", in_prefix_section(0, 4, 2)).unwrap();
        builder.add_hit("fool", in_prefix_section(0, 4, 3)).unwrap();
        builder.add_hit("foot", in_prefix_section(0, 4, 252)).unwrap();
        let index = builder.build(MainIndexConfig::default()).unwrap();

        let mut iterator = DocHitInfoIteratorTermMainPrefix::new(&index, "foo", SECTION_ID_MASK_ALL, true);
        assert_eq!(iterator.advance(), Ok(()));
        let mut stats = Vec::new();
        iterator.populate_matched_terms_stats(&mut stats, SECTION_ID_MASK_ALL);

        let mut term_frequencies = [0; TOTAL_NUM_SECTIONS];
        term_frequencies[0] = u8::MAX;
        assert_eq!(stats, vec![TermMatchInfo::new("foo", 0b1, term_frequencies)]);
    }

    #[test]
    fn test_display() {
        let index = fo_index();
        let iterator = DocHitInfoIteratorTermMainPrefix::new(&index, "fo", 0b11, false);
        assert_eq!(iterator.to_string(), "0b11:fo*");
    }
}
