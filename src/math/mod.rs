//! Linear-algebra backends shared by the solvers.

pub mod solve;

pub use solve::*;
