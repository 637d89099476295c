/// Crate-wide error type.
///
/// Each variant carries the process exit code the binary should report, so
/// `main` stays a thin wrapper. The solver-facing variants (`SingularSystem`,
/// `NonConvergence`) are recoverable: callers are expected to match on them
/// and retry with the iterative solver where that policy applies.
#[derive(Debug, Clone, PartialEq)]
pub enum RatingError {
    /// Bad invocation, unreadable file, or an input that fails schema checks.
    Input(String),
    /// A team's schedule record violates the league invariants.
    InvalidRecord { team: String, message: String },
    /// The linear system has no unique solution.
    SingularSystem,
    /// The relaxation loop hit its iteration cap before reaching the
    /// convergence threshold.
    NonConvergence { iterations: usize, delta: f64 },
    /// Failed to write an output file.
    Output(String),
}

impl RatingError {
    pub fn exit_code(&self) -> u8 {
        match self {
            RatingError::Input(_) => 2,
            RatingError::InvalidRecord { .. } => 3,
            RatingError::SingularSystem | RatingError::NonConvergence { .. } => 4,
            RatingError::Output(_) => 4,
        }
    }
}

impl std::fmt::Display for RatingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingError::Input(message) => write!(f, "{message}"),
            RatingError::InvalidRecord { team, message } => {
                write!(f, "Invalid record for team '{team}': {message}")
            }
            RatingError::SingularSystem => {
                write!(f, "The rating system is singular (no unique solution).")
            }
            RatingError::NonConvergence { iterations, delta } => {
                write!(
                    f,
                    "Ratings did not converge after {iterations} passes (last delta {delta:.6})."
                )
            }
            RatingError::Output(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for RatingError {}
