use std::collections::BTreeMap;

use log::{debug, warn};
use typed_builder::TypedBuilder;

use crate::core::hit::Hit;
use crate::core::inverted_index::main_index::dedup_document_sections;
use crate::core::inverted_index::{InvertedIndexError, MainIndex, MainIndexConfig};

/// Collects exact hits per term before they are folded into a [`MainIndex`].
#[derive(Debug, Default, Clone, TypedBuilder)]
pub struct MainIndexBuilder {
    #[builder(default = BTreeMap::new())]
    term_hits: BTreeMap<String, Vec<Hit>>,

    #[builder(default = 0)]
    num_hits: usize,
}

impl MainIndexBuilder {
    pub fn new() -> Self {
        MainIndexBuilder::builder().build()
    }

    /// ## brief
    /// record that `term` occurred in `hit.section_id()` of `hit.document_id()`.
    /// prefix hits are derived by the index itself and can't be added here.
    /// ## return
    /// `InvertedIndexError::InvalidHit` if the term is empty or the hit is invalid or a prefix hit.
    pub fn add_hit(&mut self, term: &str, hit: Hit) -> Result<(), InvertedIndexError> {
        let reason = if term.is_empty() {
            Some("term is empty")
        } else if !hit.is_valid() {
            Some("hit is invalid")
        } else if hit.is_prefix_hit() {
            Some("prefix hits are derived by the index")
        } else {
            None
        };
        if let Some(reason) = reason {
            warn!("[add_hit] rejecting {:?} for term '{}': {}", hit, term, reason);
            return Err(InvertedIndexError::InvalidHit { term: term.to_string(), hit, reason: reason.to_string() });
        }

        self.term_hits.entry(term.to_string()).or_default().push(hit);
        self.num_hits += 1;
        Ok(())
    }

    pub fn num_terms(&self) -> usize {
        self.term_hits.len()
    }

    /// Hits added so far, shadowed duplicates included.
    pub fn num_hits(&self) -> usize {
        self.num_hits
    }

    pub fn is_empty(&self) -> bool {
        self.num_hits == 0
    }

    pub fn build(self, config: MainIndexConfig) -> Result<MainIndex, InvertedIndexError> {
        debug!("[build] building main index from {} hits over {} terms", self.num_hits, self.term_hits.len());
        let mut index = MainIndex::empty(config)?;
        index.merge(self)?;
        Ok(index)
    }

    pub(super) fn into_term_hits(self) -> BTreeMap<String, Vec<Hit>> {
        let mut term_hits = self.term_hits;
        term_hits.values_mut().for_each(dedup_document_sections);
        term_hits
    }
}
