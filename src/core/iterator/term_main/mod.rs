mod term_main_exact;
mod term_main_iterator;
mod term_main_prefix;

pub use term_main_exact::{DocHitInfoIteratorTermMainExact, ExactMatch};
pub use term_main_iterator::{DocHitInfoIteratorTermMain, TermMainState, TermMainVariant};
pub use term_main_prefix::{DocHitInfoIteratorTermMainPrefix, PrefixMatch};
