//! `srs-ratings` library crate.
//!
//! Computes Simple Rating System (SRS) values for every team in a league:
//! `rating = margin_of_victory + strength_of_schedule`, with the strength of
//! schedule defined recursively from opponents' ratings.
//!
//! The binary (`srs`) is a thin wrapper around this library so that:
//!
//! - the solvers are testable without spawning processes
//! - the core stays reusable by other schedule loaders/reporters

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
pub mod srs;
