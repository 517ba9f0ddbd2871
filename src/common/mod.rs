pub mod errors;

pub use errors::HitIndexError;
