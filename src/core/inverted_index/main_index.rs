use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use itertools::Itertools;
use log::{debug, info};

use crate::core::hit::Hit;
use crate::core::inverted_index::{
    InvertedIndexError, MainIndexAccess, MainIndexBuilder, MainIndexConfig, MainIndexHitAccessor, PrefixAccessor,
};
use crate::core::posting_list::{PostingListBlock, PostingListError};

/// Generation-checked reference to a posting list chain owned by a [`MainIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainHandle {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// In-memory arena of posting list chains keyed by term.
///
/// Besides every indexed term, the lexicon holds the branch points between terms (the longest
/// common prefix of two neighbouring terms). The chain of each key also carries prefix hits copied
/// from every longer term starting with it, so one chain answers a whole prefix query.
#[derive(Debug, Clone)]
pub struct MainIndex {
    config: MainIndexConfig,
    lexicon: BTreeMap<String, ChainHandle>,
    chains: Vec<Vec<PostingListBlock>>,
    /// Hits added per term, the chains are rebuilt from them.
    term_hits: BTreeMap<String, Vec<Hit>>,
    generation: u32,
}

impl MainIndex {
    pub fn empty(config: MainIndexConfig) -> Result<Self, InvertedIndexError> {
        config.is_valid()?;
        Ok(Self {
            config,
            lexicon: BTreeMap::new(),
            chains: Vec::new(),
            term_hits: BTreeMap::new(),
            generation: 0,
        })
    }

    pub fn config(&self) -> &MainIndexConfig {
        &self.config
    }

    /// Bumped by every [`MainIndex::merge`], handles from older generations are rejected.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of indexed terms, branch points excluded.
    pub fn num_terms(&self) -> usize {
        self.term_hits.len()
    }

    /// Number of lexicon keys, branch points included.
    pub fn lexicon_len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.term_hits.is_empty()
    }

    pub fn handle(&self, term: &str) -> Option<ChainHandle> {
        self.lexicon.get(term).copied()
    }

    /// Number of posting list blocks chained under `term`.
    pub fn chain_len(&self, term: &str) -> Option<usize> {
        let handle = self.handle(term)?;
        self.chains.get(handle.index as usize).map(Vec::len)
    }

    pub fn accessor_for_handle(&self, handle: ChainHandle) -> Result<MainIndexHitAccessor<'_>, PostingListError> {
        self.chain(handle)?;
        Ok(MainIndexHitAccessor::new(self, handle))
    }

    pub(crate) fn chain(&self, handle: ChainHandle) -> Result<&[PostingListBlock], PostingListError> {
        match self.chains.get(handle.index as usize) {
            Some(chain) if handle.generation == self.generation => Ok(chain),
            _ => Err(PostingListError::StaleChainHandle {
                chain_index: handle.index,
                handle_generation: handle.generation,
                index_generation: self.generation,
            }),
        }
    }

    #[cfg(test)]
    pub(crate) fn chains_mut(&mut self) -> &mut Vec<Vec<PostingListBlock>> {
        &mut self.chains
    }

    /// Fold the hits collected by `builder` into this index and rebuild every chain.
    /// On error the index is left untouched.
    pub fn merge(&mut self, builder: MainIndexBuilder) -> Result<(), InvertedIndexError> {
        let mut term_hits = self.term_hits.clone();
        for (term, hits) in builder.into_term_hits() {
            let merged = term_hits.entry(term).or_default();
            merged.extend(hits);
            dedup_document_sections(merged);
        }

        let generation = self.generation.wrapping_add(1);
        let (lexicon, chains) = build_chains(&term_hits, &self.config, generation)?;
        info!(
            "[merge] main index rebuilt, terms: {}, lexicon keys: {}, blocks: {}, generation: {}",
            term_hits.len(),
            lexicon.len(),
            chains.iter().map(Vec::len).sum::<usize>(),
            generation
        );

        self.term_hits = term_hits;
        self.lexicon = lexicon;
        self.chains = chains;
        self.generation = generation;
        Ok(())
    }

    /// The shortest lexicon key starting with `prefix`. All other keys starting with `prefix` extend it.
    fn find_prefix_root(&self, prefix: &str) -> Option<(&str, ChainHandle)> {
        if prefix.is_empty() {
            return None;
        }
        self.lexicon
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix))
            .min_by_key(|(key, _)| key.len())
            .map(|(key, handle)| (key.as_str(), *handle))
    }
}

impl MainIndexAccess for MainIndex {
    type Accessor<'a> = MainIndexHitAccessor<'a>;

    fn accessor_for_exact_term(&self, term: &str) -> Result<Option<Self::Accessor<'_>>, InvertedIndexError> {
        match self.handle(term) {
            Some(handle) => Ok(Some(self.accessor_for_handle(handle)?)),
            None => Ok(None),
        }
    }

    fn accessor_for_prefix_term(
        &self,
        prefix: &str,
    ) -> Result<Option<PrefixAccessor<Self::Accessor<'_>>>, InvertedIndexError> {
        let Some((key, handle)) = self.find_prefix_root(prefix) else {
            return Ok(None);
        };
        debug!("[accessor_for_prefix_term] prefix '{}' resolved to lexicon key '{}'", prefix, key);
        Ok(Some(PrefixAccessor { accessor: self.accessor_for_handle(handle)?, exact: key == prefix }))
    }
}

/// Keep one hit per document and section, the last one added wins.
pub(super) fn dedup_document_sections(hits: &mut Vec<Hit>) {
    let mut seen = BTreeSet::new();
    let mut deduped = Vec::with_capacity(hits.len());
    for hit in hits.drain(..).rev() {
        if seen.insert((hit.document_id(), hit.section_id())) {
            deduped.push(hit);
        } else {
            debug!("[dedup_document_sections] dropping shadowed {:?}", hit);
        }
    }
    deduped.reverse();
    *hits = deduped;
}

fn common_prefix<'s>(left: &'s str, right: &str) -> &'s str {
    let len = left
        .char_indices()
        .zip(right.chars())
        .take_while(|((_, l), r)| l == r)
        .last()
        .map_or(0, |((idx, c), _)| idx + c.len_utf8());
    &left[..len]
}

/// Prefix hits from every term strictly longer than `key` starting with it. Duplicates for the same
/// document and section sum their term frequencies.
fn collect_prefix_hits(term_hits: &BTreeMap<String, Vec<Hit>>, key: &str) -> Vec<Hit> {
    let mut prefix_hits = term_hits
        .range::<str, _>((Bound::Excluded(key), Bound::Unbounded))
        .take_while(|(term, _)| term.starts_with(key))
        .flat_map(|(_, hits)| hits.iter().filter(|hit| hit.is_in_prefix_section()).map(Hit::to_prefix_hit))
        .collect::<Vec<_>>();
    prefix_hits.sort_unstable();
    prefix_hits
        .into_iter()
        .coalesce(|prev, cur| {
            if prev.equals_document_id_and_section_id(&cur) {
                Ok(prev.with_term_frequency(prev.term_frequency().saturating_add(cur.term_frequency())))
            } else {
                Err((prev, cur))
            }
        })
        .collect()
}

/// Newest documents first, a document may straddle two neighbouring blocks.
fn pack_into_blocks(mut hits: Vec<Hit>, config: &MainIndexConfig) -> Result<Vec<PostingListBlock>, PostingListError> {
    hits.sort_unstable_by(|a, b| b.document_id().cmp(&a.document_id()).then_with(|| a.cmp(b)));
    hits.chunks(config.max_hits_per_posting_list())
        .map(|chunk| {
            PostingListBlock::allocate(chunk.to_vec(), config.min_posting_list_bytes, config.max_posting_list_bytes)
        })
        .collect()
}

type Chains = (BTreeMap<String, ChainHandle>, Vec<Vec<PostingListBlock>>);

fn build_chains(
    term_hits: &BTreeMap<String, Vec<Hit>>,
    config: &MainIndexConfig,
    generation: u32,
) -> Result<Chains, InvertedIndexError> {
    let mut keys = term_hits.keys().cloned().collect::<BTreeSet<String>>();
    for (left, right) in term_hits.keys().tuple_windows() {
        let branch_point = common_prefix(left, right);
        if !branch_point.is_empty() {
            keys.insert(branch_point.to_string());
        }
    }

    let mut lexicon = BTreeMap::new();
    let mut chains = Vec::with_capacity(keys.len());
    for key in keys {
        let mut hits = term_hits.get(&key).cloned().unwrap_or_default();
        hits.extend(collect_prefix_hits(term_hits, &key));

        let handle = ChainHandle { index: chains.len() as u32, generation };
        chains.push(pack_into_blocks(hits, config)?);
        lexicon.insert(key, handle);
    }
    Ok((lexicon, chains))
}
