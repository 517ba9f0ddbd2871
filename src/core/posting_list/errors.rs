use thiserror::Error;

use crate::core::common::types::DocumentId;
use crate::core::hit::HitValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostingListError {
    #[error("Posting list size {size_in_bytes} is invalid for data type bytes {data_type_bytes} and min size {min_posting_list_size}")]
    InvalidPostingListSize {
        size_in_bytes: u32,
        data_type_bytes: u32,
        min_posting_list_size: u32,
    },

    #[error("Corrupted hit '{value:#x}' in block {block_index} of posting list chain {chain_index}")]
    CorruptedHit {
        chain_index: u32,
        block_index: usize,
        value: HitValue,
    },

    #[error("Posting list chain {chain_index} is out of order at block {block_index}: '{reason}'")]
    OutOfOrder {
        chain_index: u32,
        block_index: usize,
        reason: String,
    },

    #[error("Page {page_index} starts at document {document_id} above document {previous_document_id} of the page before")]
    PagesOutOfOrder {
        page_index: u32,
        previous_document_id: DocumentId,
        document_id: DocumentId,
    },

    #[error("Stale posting list chain handle {chain_index} (generation {handle_generation}, index generation {index_generation})")]
    StaleChainHandle {
        chain_index: u32,
        handle_generation: u32,
        index_generation: u32,
    },
}
