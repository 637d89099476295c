//! Exact and least-squares linear solvers.
//!
//! Both rating strategies that go through a matrix decomposition are funneled
//! through this module so the solver code upstream never touches a
//! decomposition directly:
//!
//! - the exact path uses LU (fails cleanly on a singular system)
//! - the least-squares path uses SVD with an explicit singularity gate on the
//!   product of singular values
//!
//! Problem sizes here are tiny (tens of teams), so decomposition cost is not
//! a concern; failure detection is.

use nalgebra::{DMatrix, DVector};

/// Solve `A · x = b` exactly via LU decomposition.
///
/// Returns `None` when the decomposition finds no unique solution (zero
/// pivot) or the back-substituted solution is non-finite.
pub fn solve_exact(a: DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    let x = a.lu().solve(b)?;
    if x.iter().all(|v| v.is_finite()) {
        Some(x)
    } else {
        None
    }
}

/// Least-squares solve of `M · x ≈ b` via singular value decomposition.
///
/// The system is treated as singular when the product of singular values
/// falls below `singularity_epsilon` in magnitude; callers are expected to
/// fall back to a decomposition-free strategy in that case. Otherwise the
/// minimum-norm solution `V · diag(1/S) · Uᵗ · b` is returned.
pub fn solve_least_squares(
    m: DMatrix<f64>,
    b: &DVector<f64>,
    singularity_epsilon: f64,
) -> Option<DVector<f64>> {
    let svd = m.svd(true, true);

    let product: f64 = svd.singular_values.iter().product();
    if product.abs() < singularity_epsilon {
        return None;
    }

    let x = svd.solve(b, 0.0).ok()?;
    if x.iter().all(|v| v.is_finite()) {
        Some(x)
    } else {
        None
    }
}
