mod basic_hit;
mod doc_hit_info;
#[allow(clippy::module_inception)]
mod hit;
mod term_match_info;

pub use basic_hit::{BasicHit, BasicHitValue};
pub use doc_hit_info::DocHitInfo;
pub use hit::{Hit, HitValue};
pub use term_match_info::TermMatchInfo;
