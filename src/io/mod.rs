//! CSV input/output for schedules and ratings.

pub mod export;
pub mod ingest;
