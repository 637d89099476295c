//! Least-squares solve with an appended constant column.
//!
//! Instead of biasing the diagonal, this formulation keeps the pure averaging
//! coefficients and appends an (N+1)-th column of ones: its synthetic unknown
//! absorbs the additive degree of freedom the rating definition leaves open.
//! The augmented system has more unknowns than equations, so the
//! decomposition is taken over the square zero-row-padded form (SVD routines
//! of this kind require rows >= columns).
//!
//! The padding also makes the singular-value-product gate conservative: the
//! padded row contributes a vanishing singular value, so in practice this
//! path reports `SingularSystem` and defers to the iterative solver. It is
//! kept for the least-squares formulation and its gate, which are part of the
//! external contract.

use crate::domain::League;
use crate::error::RatingError;

use super::system::RatingSystem;

#[derive(Debug, Clone)]
pub struct PseudoInverseOptions {
    /// Shift the solved ratings to the zero-mean family member.
    pub normalize: bool,
    /// Treat the system as singular when the product of singular values is
    /// below this magnitude.
    pub singularity_epsilon: f64,
}

impl Default for PseudoInverseOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            singularity_epsilon: 1e-40,
        }
    }
}

/// Rate a league by a pseudo-inverse least-squares solve.
///
/// The first N components of the minimum-norm solution are the team ratings;
/// the trailing synthetic component is discarded. On `SingularSystem` the
/// league keeps only the margins attached during system construction.
pub fn solve_pseudo_inverse(
    league: &mut League,
    options: &PseudoInverseOptions,
) -> Result<(), RatingError> {
    let system = RatingSystem::build(league)?;
    let n = system.len();

    let m = system.augmented_matrix().insert_row(n, 0.0);
    let b = system.margins().clone().push(0.0);

    let Some(solution) = crate::math::solve_least_squares(m, &b, options.singularity_epsilon)
    else {
        return Err(RatingError::SingularSystem);
    };

    system.write_solution(league, &solution.as_slice()[..n]);
    if options.normalize {
        super::normalize::normalize(league);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_two_team_league_is_singular() {
        let mut league = League::new();
        league.record_game("A", "B", 10.0);

        let err = solve_pseudo_inverse(&mut league, &PseudoInverseOptions::default()).unwrap_err();
        assert_eq!(err, RatingError::SingularSystem);

        for (_, team) in league.iter() {
            assert!(team.margin_of_victory.is_some());
            assert!(team.rating.is_none());
            assert!(team.strength_of_schedule.is_none());
        }
    }

    #[test]
    fn round_robin_defers_to_the_fallback_policy() {
        let mut league = League::new();
        league.record_game("A", "B", 10.0);
        league.record_game("B", "C", 6.0);
        league.record_game("C", "A", 4.0);

        let err = solve_pseudo_inverse(&mut league, &PseudoInverseOptions::default()).unwrap_err();
        assert_eq!(err, RatingError::SingularSystem);
    }

    #[test]
    fn non_dyadic_schedule_also_defers_to_the_fallback_policy() {
        // Uneven game counts give thirds as opponent weights; the padded
        // square system still carries its structural zero singular value,
        // so the gate trips here too and the caller falls back.
        let mut league = League::new();
        league.record_game("A", "B", 6.0);
        league.record_game("A", "C", 5.0);
        league.record_game("A", "D", 3.0);
        league.record_game("B", "C", 4.0);
        league.record_game("C", "D", 4.0);

        let err = solve_pseudo_inverse(&mut league, &PseudoInverseOptions::default()).unwrap_err();
        assert_eq!(err, RatingError::SingularSystem);
        for (_, team) in league.iter() {
            assert!(team.margin_of_victory.is_some());
            assert!(team.rating.is_none());
        }
    }

    #[test]
    fn invalid_league_is_rejected_before_decomposition() {
        let mut league = League::new();
        league.insert("A", crate::domain::Team::new());
        let err =
            solve_pseudo_inverse(&mut league, &PseudoInverseOptions::default()).unwrap_err();
        assert!(matches!(err, RatingError::InvalidRecord { .. }));
    }
}
