mod aliases;

pub use aliases::*;
