use std::path::Path;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::core::posting_list::posting_list_utils::{hit_capacity, HIT_DATA_TYPE_BYTES, MIN_POSTING_LIST_BYTES};
use crate::core::{is_valid_posting_list_size, InvertedIndexError};

pub const DEFAULT_MAX_POSTING_LIST_BYTES: u32 = 2048;

fn default_min_posting_list_bytes() -> u32 {
    MIN_POSTING_LIST_BYTES
}

fn default_max_posting_list_bytes() -> u32 {
    DEFAULT_MAX_POSTING_LIST_BYTES
}

#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Copy, Clone, TypedBuilder)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub struct MainIndexConfig {
    /// Smallest posting list the block allocator may carve.
    #[serde(default = "default_min_posting_list_bytes")]
    #[builder(default = MIN_POSTING_LIST_BYTES)]
    pub min_posting_list_bytes: u32,

    /// Largest posting list, also the page size seen by iterators.
    #[serde(default = "default_max_posting_list_bytes")]
    #[builder(default = DEFAULT_MAX_POSTING_LIST_BYTES)]
    pub max_posting_list_bytes: u32,
}

impl Default for MainIndexConfig {
    fn default() -> Self {
        Self {
            min_posting_list_bytes: MIN_POSTING_LIST_BYTES,
            max_posting_list_bytes: DEFAULT_MAX_POSTING_LIST_BYTES,
        }
    }
}

impl MainIndexConfig {
    pub fn new(min_posting_list_bytes: u32, max_posting_list_bytes: u32) -> Result<Self, InvertedIndexError> {
        let config = MainIndexConfig { min_posting_list_bytes, max_posting_list_bytes };
        let _check_valid = config.is_valid()?;
        Ok(config)
    }

    /// Parse and validate a json config.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: MainIndexConfig = serde_json::from_str(json)?;
        config.is_valid()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn is_valid(&self) -> Result<bool, InvertedIndexError> {
        for (name, size) in [
            ("min_posting_list_bytes", self.min_posting_list_bytes),
            ("max_posting_list_bytes", self.max_posting_list_bytes),
        ] {
            if !is_valid_posting_list_size(size, HIT_DATA_TYPE_BYTES, MIN_POSTING_LIST_BYTES) {
                return Err(InvertedIndexError::InvalidIndexConfig(format!(
                    "`{}` {} must be a multiple of {} and at least {}.",
                    name, size, HIT_DATA_TYPE_BYTES, MIN_POSTING_LIST_BYTES
                )));
            }
        }
        if self.min_posting_list_bytes > self.max_posting_list_bytes {
            return Err(InvertedIndexError::InvalidIndexConfig(format!(
                "`min_posting_list_bytes` {} is larger than `max_posting_list_bytes` {}.",
                self.min_posting_list_bytes, self.max_posting_list_bytes
            )));
        }
        Ok(true)
    }

    /// Hits held by a full posting list.
    pub fn max_hits_per_posting_list(&self) -> usize {
        hit_capacity(self.max_posting_list_bytes)
    }
}
