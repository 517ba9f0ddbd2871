pub mod common;
pub mod core;

pub use common::errors::HitIndexError;
pub use crate::core::*;

pub type Result<T> = std::result::Result<T, HitIndexError>;

#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::Builder::from_default_env()
        .filter(None, log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}
