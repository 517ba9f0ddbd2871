mod errors;
mod posting_list_block;
pub mod posting_list_utils;
mod traits;

pub use errors::PostingListError;
pub use posting_list_block::PostingListBlock;
pub use posting_list_utils::{is_valid_posting_list_size, HIT_DATA_TYPE_BYTES, MIN_POSTING_LIST_BYTES};
pub use traits::*;
