//! Simple Rating System solvers.
//!
//! `rating = margin_of_victory + strength_of_schedule`, where the strength of
//! schedule is the average rating of the opponents faced. The definition is
//! mutually recursive across the league, so ratings are obtained either by
//! relaxation on the definition itself (iterative) or by solving the linear
//! system it implies (direct / pseudo-inverse).
//!
//! Any solution is invariant under adding a constant to every rating, so each
//! solver's raw output is one member of an infinite family; the normalizer
//! selects the member whose ratings average to zero. Solvers never call each
//! other: falling back from a singular exact solve to the relaxation loop is
//! the caller's decision.

pub mod direct;
pub mod iterative;
pub mod normalize;
pub mod pseudo_inverse;
pub mod system;

pub use direct::*;
pub use iterative::*;
pub use normalize::*;
pub use pseudo_inverse::*;
pub use system::*;
