mod doc_hit_info_iterator;
mod errors;
pub mod term_main;

pub use doc_hit_info_iterator::{DocHitInfoIterator, DocHitInfoStdIterator};
pub use errors::IteratorError;
pub use term_main::*;
