//! Terminal reporting for computed ratings.

pub mod format;

pub use format::*;
