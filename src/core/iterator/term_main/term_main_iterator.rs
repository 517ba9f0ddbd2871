use std::cmp::Reverse;
use std::fmt;

use log::{debug, error, trace};

use crate::core::common::types::{
    section_id_to_mask, section_ids_in_mask, SectionIdMask, TermFrequency, TermFrequencyArray, NO_TERM_FREQUENCY,
    TOTAL_NUM_SECTIONS,
};
use crate::core::hit::{DocHitInfo, Hit, TermMatchInfo};
use crate::core::inverted_index::{InvertedIndexError, MainIndexAccess};
use crate::core::iterator::{DocHitInfoIterator, IteratorError};
use crate::core::posting_list::{PostingListError, PostingListHitAccessor};

/// How a term is matched against the main index.
pub trait TermMainVariant {
    /// Appended to the term when the iterator is displayed.
    const TERM_SUFFIX: &'static str;

    /// Decode the next page of the term's chain into `state`'s cache.
    /// Sets `all_pages_consumed` once the chain is drained.
    fn retrieve_more_hits<'a, M: MainIndexAccess + 'a>(
        &mut self,
        state: &mut TermMainState<'a, M>,
    ) -> Result<(), IteratorError>;
}

/// Page cache and cursor shared by every [`TermMainVariant`].
pub struct TermMainState<'a, M: MainIndexAccess + 'a> {
    main_index: &'a M,
    term: String,
    accessor: Option<M::Accessor<'a>>,

    cached_doc_hit_infos: Vec<DocHitInfo>,
    // parallel to `cached_doc_hit_infos`, empty unless `need_hit_term_frequency`
    cached_hit_term_frequency: Vec<TermFrequencyArray>,
    cursor: Option<usize>,

    num_advance_calls: u32,
    num_blocks_inspected: u32,
    all_pages_consumed: bool,
    failed: bool,

    section_restrict_mask: SectionIdMask,
    need_hit_term_frequency: bool,
    doc_hit_info: DocHitInfo,
}

impl<'a, M: MainIndexAccess + 'a> TermMainState<'a, M> {
    fn new(main_index: &'a M, term: String, section_restrict_mask: SectionIdMask, need_hit_term_frequency: bool) -> Self {
        Self {
            main_index,
            term,
            accessor: None,
            cached_doc_hit_infos: Vec::new(),
            cached_hit_term_frequency: Vec::new(),
            cursor: None,
            num_advance_calls: 0,
            num_blocks_inspected: 0,
            all_pages_consumed: false,
            failed: false,
            section_restrict_mask,
            need_hit_term_frequency,
            doc_hit_info: DocHitInfo::default(),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn section_restrict_mask(&self) -> SectionIdMask {
        self.section_restrict_mask
    }

    /// Next non-empty page of the chain, the accessor is opened by `open` on first use.
    /// A term `open` can't find leaves nothing to read.
    pub fn next_page<F>(&mut self, open: F) -> Result<Option<Vec<Hit>>, IteratorError>
    where
        F: FnOnce(&'a M, &str) -> Result<Option<M::Accessor<'a>>, InvertedIndexError>,
    {
        if self.accessor.is_none() {
            match open(self.main_index, &self.term)? {
                Some(accessor) => self.accessor = Some(accessor),
                None => {
                    debug!("[next_page] term '{}' has no posting list", self.term);
                    self.all_pages_consumed = true;
                    return Ok(None);
                }
            }
        }

        let page = match self.accessor.as_mut() {
            Some(accessor) => accessor.next_page()?,
            None => None,
        };
        match page {
            Some(hits) if !hits.is_empty() => {
                self.num_blocks_inspected += 1;
                trace!("[next_page] page {} of term '{}' holds {} hits", self.num_blocks_inspected, self.term, hits.len());
                Ok(Some(hits))
            }
            _ => {
                self.all_pages_consumed = true;
                Ok(None)
            }
        }
    }

    /// Group the hits of one page by document, largest document id first, and append them to the
    /// cache. Hits outside `section_restrict_mask` are dropped. The first document merges into the
    /// entry held back from the previous page when both are the same document.
    pub fn cache_hits<I>(
        &mut self,
        hits: I,
        merge_term_frequency: fn(TermFrequency, TermFrequency) -> TermFrequency,
    ) -> Result<(), IteratorError>
    where
        I: IntoIterator<Item = Hit>,
    {
        let section_restrict_mask = self.section_restrict_mask;
        let mut hits = hits
            .into_iter()
            .filter(|hit| section_restrict_mask & section_id_to_mask(hit.section_id()) != 0)
            .collect::<Vec<_>>();
        // stable, hits of one document keep their page order
        hits.sort_by_key(|hit| Reverse(hit.document_id()));

        if let (Some(previous), Some(first)) = (self.cached_doc_hit_infos.last(), hits.first()) {
            if first.document_id() > previous.document_id() {
                error!(
                    "[cache_hits] term '{}' page {} starts at document {} after document {}",
                    self.term,
                    self.num_blocks_inspected,
                    first.document_id(),
                    previous.document_id()
                );
                return Err(PostingListError::PagesOutOfOrder {
                    page_index: self.num_blocks_inspected,
                    previous_document_id: previous.document_id(),
                    document_id: first.document_id(),
                }
                .into());
            }
        }

        for hit in hits {
            let same_document =
                self.cached_doc_hit_infos.last().is_some_and(|last| last.document_id() == hit.document_id());
            if !same_document {
                self.cached_doc_hit_infos.push(DocHitInfo::new(hit.document_id()));
                if self.need_hit_term_frequency {
                    self.cached_hit_term_frequency.push([NO_TERM_FREQUENCY; TOTAL_NUM_SECTIONS]);
                }
            }

            let section_id = hit.section_id();
            if let Some(last) = self.cached_doc_hit_infos.last_mut() {
                last.update_section(section_id);
            }
            if let Some(term_frequencies) = self.cached_hit_term_frequency.last_mut() {
                let slot = &mut term_frequencies[section_id as usize];
                *slot = merge_term_frequency(*slot, hit.term_frequency());
            }
        }
        Ok(())
    }

    /// Drop the entries already returned, the entry held back for the next page survives.
    fn drop_consumed(&mut self) {
        let consumed = self.cursor.map_or(0, |cursor| cursor + 1).min(self.cached_doc_hit_infos.len());
        self.cached_doc_hit_infos.drain(..consumed);
        if self.need_hit_term_frequency {
            self.cached_hit_term_frequency.drain(..consumed);
        }
        self.cursor = None;
    }

    fn release(&mut self) {
        self.accessor = None;
        self.cached_doc_hit_infos = Vec::new();
        self.cached_hit_term_frequency = Vec::new();
        self.cursor = None;
        self.doc_hit_info = DocHitInfo::default();
    }
}

/// Iterates the documents a term matches in a main index, largest document id first.
pub struct DocHitInfoIteratorTermMain<'a, M: MainIndexAccess + 'a, V: TermMainVariant> {
    state: TermMainState<'a, M>,
    variant: V,
}

impl<'a, M: MainIndexAccess + 'a, V: TermMainVariant> DocHitInfoIteratorTermMain<'a, M, V> {
    pub fn new_with_variant(
        main_index: &'a M,
        term: impl Into<String>,
        section_restrict_mask: SectionIdMask,
        need_hit_term_frequency: bool,
        variant: V,
    ) -> Self {
        Self {
            state: TermMainState::new(main_index, term.into(), section_restrict_mask, need_hit_term_frequency),
            variant,
        }
    }

    pub fn term(&self) -> &str {
        self.state.term()
    }

    pub fn variant(&self) -> &V {
        &self.variant
    }
}

impl<'a, M: MainIndexAccess + 'a, V: TermMainVariant> DocHitInfoIterator for DocHitInfoIteratorTermMain<'a, M, V> {
    fn advance(&mut self) -> Result<(), IteratorError> {
        self.state.num_advance_calls = self.state.num_advance_calls.saturating_add(1);
        if self.state.failed {
            return Err(IteratorError::Aborted);
        }

        loop {
            let next = self.state.cursor.map_or(0, |cursor| cursor + 1);
            let cached = self.state.cached_doc_hit_infos.len();
            // the last cached document may continue on the next page
            if next < cached && (next + 1 < cached || self.state.all_pages_consumed) {
                self.state.cursor = Some(next);
                self.state.doc_hit_info = self.state.cached_doc_hit_infos[next];
                return Ok(());
            }
            if self.state.all_pages_consumed {
                self.state.release();
                return Err(IteratorError::NoMoreHits);
            }

            self.state.drop_consumed();
            if let Err(e) = self.variant.retrieve_more_hits(&mut self.state) {
                error!("[advance] iterator {} failed after {} pages: {}", self, self.state.num_blocks_inspected, e);
                self.state.failed = true;
                self.state.release();
                return Err(e);
            }
        }
    }

    fn current_document(&self) -> &DocHitInfo {
        &self.state.doc_hit_info
    }

    fn populate_matched_terms_stats(
        &self,
        matched_terms_stats: &mut Vec<TermMatchInfo>,
        filtering_section_mask: SectionIdMask,
    ) {
        let Some(cursor) = self.state.cursor.filter(|&cursor| cursor < self.state.cached_doc_hit_infos.len()) else {
            return;
        };
        if matched_terms_stats.iter().any(|info| info.term == self.state.term) {
            return;
        }

        let section_ids_mask = self.state.cached_doc_hit_infos[cursor].hit_section_ids_mask() & filtering_section_mask;
        let mut term_frequencies = [NO_TERM_FREQUENCY; TOTAL_NUM_SECTIONS];
        if let Some(cached) = self.state.cached_hit_term_frequency.get(cursor) {
            for section_id in section_ids_in_mask(section_ids_mask) {
                term_frequencies[section_id as usize] = cached[section_id as usize];
            }
        }
        matched_terms_stats.push(TermMatchInfo::new(self.state.term.clone(), section_ids_mask, term_frequencies));
    }

    fn num_blocks_inspected(&self) -> u32 {
        self.state.num_blocks_inspected
    }

    fn num_advance_calls(&self) -> u32 {
        self.state.num_advance_calls
    }
}

impl<'a, M: MainIndexAccess + 'a, V: TermMainVariant> fmt::Display for DocHitInfoIteratorTermMain<'a, M, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}:{}{}", self.state.section_restrict_mask, self.state.term, V::TERM_SUFFIX)
    }
}
