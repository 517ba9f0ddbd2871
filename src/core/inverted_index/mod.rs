mod errors;
mod traits;

mod main_index;
mod main_index_builder;
mod main_index_config;
mod main_index_hit_accessor;

pub use errors::InvertedIndexError;
pub use traits::*;

pub use main_index::{ChainHandle, MainIndex};
pub use main_index_builder::MainIndexBuilder;
pub use main_index_config::{MainIndexConfig, DEFAULT_MAX_POSTING_LIST_BYTES};
pub use main_index_hit_accessor::MainIndexHitAccessor;
