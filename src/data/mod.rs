//! Synthetic schedule generation.

pub mod sample;

pub use sample::*;
