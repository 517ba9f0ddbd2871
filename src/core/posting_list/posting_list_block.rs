use log::{error, trace};

use crate::core::hit::Hit;
use crate::core::posting_list::posting_list_utils::{
    bytes_for_hits, hit_capacity, is_valid_posting_list_size, HIT_DATA_TYPE_BYTES, MIN_POSTING_LIST_BYTES,
};
use crate::core::posting_list::PostingListError;

/// One fixed-size posting list in a chain, hits sorted by encoded value ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingListBlock {
    posting_list_bytes: u32,
    pub(crate) hits: Vec<Hit>,
}

impl PostingListBlock {
    /// Carve a block sized for `hits`. The size is the smallest power of two holding them, clamped to
    /// `[min_posting_list_bytes, max_posting_list_bytes]`; an invalid size refuses the allocation.
    pub fn allocate(
        mut hits: Vec<Hit>,
        min_posting_list_bytes: u32,
        max_posting_list_bytes: u32,
    ) -> Result<Self, PostingListError> {
        let needed = bytes_for_hits(hits.len()).next_power_of_two();
        let posting_list_bytes = needed.max(min_posting_list_bytes as u64).min(max_posting_list_bytes as u64) as u32;

        if !is_valid_posting_list_size(posting_list_bytes, HIT_DATA_TYPE_BYTES, MIN_POSTING_LIST_BYTES)
            || hit_capacity(posting_list_bytes) < hits.len()
        {
            error!(
                "[allocate] can't carve a posting list of {} bytes for {} hits",
                posting_list_bytes,
                hits.len()
            );
            return Err(PostingListError::InvalidPostingListSize {
                size_in_bytes: posting_list_bytes,
                data_type_bytes: HIT_DATA_TYPE_BYTES,
                min_posting_list_size: MIN_POSTING_LIST_BYTES,
            });
        }

        hits.sort_unstable();
        trace!("[allocate] posting list of {} bytes holds {} hits", posting_list_bytes, hits.len());
        Ok(Self { posting_list_bytes, hits })
    }

    pub fn posting_list_bytes(&self) -> u32 {
        self.posting_list_bytes
    }

    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn capacity(&self) -> usize {
        hit_capacity(self.posting_list_bytes)
    }
}
