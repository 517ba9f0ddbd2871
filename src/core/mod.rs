pub mod common;
pub mod hit;
pub mod inverted_index;
pub mod iterator;
pub mod posting_list;

pub use common::*;
pub use hit::*;
pub use inverted_index::*;
pub use iterator::*;
pub use posting_list::*;
