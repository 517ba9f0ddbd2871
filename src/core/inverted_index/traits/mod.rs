mod main_index_access;

pub use main_index_access::*;
