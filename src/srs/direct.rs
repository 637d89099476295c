//! Exact solve of the rating system via LU decomposition.
//!
//! Singularity is expected and routine for this formulation: every team's
//! opponent weights sum to one, so the coefficient matrix annihilates the
//! all-ones vector whenever the arithmetic is exact. Whether the
//! decomposition detects that depends on how the weights round, which is why
//! the documented policy is for callers to fall back to the iterative solver
//! on `SingularSystem` rather than treat it as fatal.

use crate::domain::League;
use crate::error::RatingError;

use super::system::RatingSystem;

/// Rate a league by solving `A · rating = mov` exactly.
///
/// On `SingularSystem` the league keeps only the margins attached during
/// system construction; `rating` and `strength_of_schedule` stay unset.
pub fn solve_direct(league: &mut League, normalize: bool) -> Result<(), RatingError> {
    let system = RatingSystem::build(league)?;

    let a = system.coefficient_matrix();
    let Some(solution) = crate::math::solve_exact(a, system.margins()) else {
        return Err(RatingError::SingularSystem);
    };

    system.write_solution(league, solution.as_slice());
    if normalize {
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

        let err = solve_direct(&mut league, true).unwrap_err();
        assert_eq!(err, RatingError::SingularSystem);

        for (_, team) in league.iter() {
            assert!(team.margin_of_victory.is_some());
            assert!(team.rating.is_none());
            assert!(team.strength_of_schedule.is_none());
        }
    }

    #[test]
    fn closed_round_robin_is_singular() {
        // Everyone plays everyone once; the opponent weights are exact halves,
        // so elimination hits an exactly-zero pivot.
        let mut league = League::new();
        league.record_game("A", "B", 10.0);
        league.record_game("B", "C", 6.0);
        league.record_game("C", "A", 4.0);

        let err = solve_direct(&mut league, true).unwrap_err();
        assert_eq!(err, RatingError::SingularSystem);
    }

    #[test]
    fn invalid_league_is_rejected_before_decomposition() {
        let mut league = League::new();
        league.insert("A", crate::domain::Team::new());
        let err = solve_direct(&mut league, true).unwrap_err();
        assert!(matches!(err, RatingError::InvalidRecord { .. }));
    }
}
