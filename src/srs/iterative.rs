//! Gauss–Seidel relaxation on the recursive rating definition.
//!
//! Start every rating at the team's margin of victory, then repeatedly sweep
//! the league: recompute each team's strength of schedule as the average of
//! its opponents' current ratings and set `rating = mov + sos`. Updates are
//! applied in place, in sorted team order, so later teams in a sweep see the
//! earlier teams' fresh ratings; with simultaneous (Jacobi-style) updates a
//! two-team league oscillates forever instead of converging.
//!
//! This is the canonical fallback strategy: it needs no matrix inversion and
//! behaves even when the underlying system is singular.

use crate::domain::League;
use crate::error::RatingError;

use super::normalize::normalize;
use super::system::RatingSystem;

#[derive(Debug, Clone)]
pub struct IterativeOptions {
    /// Shift the converged ratings to the zero-mean family member.
    pub normalize: bool,
    /// Hard cap on relaxation sweeps; exceeding it is `NonConvergence`.
    pub max_iterations: usize,
    /// Convergence threshold on the max per-team SOS delta per sweep.
    pub tolerance: f64,
}

impl Default for IterativeOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            max_iterations: 10_000,
            tolerance: 1e-3,
        }
    }
}

/// How the relaxation loop terminated.
#[derive(Debug, Clone, Copy)]
pub struct Convergence {
    /// Sweeps over the league actually performed.
    pub iterations: usize,
    /// Max SOS delta observed in the final sweep.
    pub delta: f64,
}

/// Rate a league by relaxation.
///
/// On success, every team's `rating` and `strength_of_schedule` are filled
/// in. On `NonConvergence` the league keeps only the margins attached during
/// system construction.
pub fn solve_iterative(
    league: &mut League,
    options: &IterativeOptions,
) -> Result<Convergence, RatingError> {
    let system = RatingSystem::build(league)?;
    let n = system.len();

    let mut ratings: Vec<f64> = system.margins().iter().copied().collect();
    let mut sos = vec![0.0; n];
    let mut last_delta = f64::INFINITY;
    let mut converged = None;

    for pass in 1..=options.max_iterations {
        let mut delta: f64 = 0.0;
        for i in 0..n {
            let opps = &system.opponents()[i];
            let avg = opps.iter().map(|&j| ratings[j]).sum::<f64>() / opps.len() as f64;
            delta = delta.max((avg - sos[i]).abs());
            sos[i] = avg;
            ratings[i] = system.margins()[i] + avg;
        }
        last_delta = delta;
        if delta <= options.tolerance {
            converged = Some(Convergence {
                iterations: pass,
                delta,
            });
            break;
        }
    }

    // An empty league converges trivially (nothing to sweep).
    if n == 0 && converged.is_none() {
        converged = Some(Convergence {
            iterations: 0,
            delta: 0.0,
        });
    }

    let Some(outcome) = converged else {
        return Err(RatingError::NonConvergence {
            iterations: options.max_iterations,
            delta: last_delta,
        });
    };

    system.write_solution(league, &ratings);
    if options.normalize {
        normalize(league);
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_team_league() -> League {
        let mut league = League::new();
        league.record_game("A", "B", 10.0);
        league
    }

    fn worked_league() -> League {
        let mut league = League::new();
        league.record_game("A", "B", 10.0);
        league.record_game("C", "B", 6.0);
        league.record_game("C", "A", 4.0);
        league
    }

    #[test]
    fn two_team_league_converges_to_half_margin() {
        let mut league = two_team_league();
        let outcome = solve_iterative(&mut league, &IterativeOptions::default()).unwrap();

        assert!(outcome.iterations <= 10);
        let a = league.get("A").unwrap().rating.unwrap();
        let b = league.get("B").unwrap().rating.unwrap();
        assert!((a - 5.0).abs() < 0.01, "rating_A = {a}");
        assert!((b - -5.0).abs() < 0.01, "rating_B = {b}");
    }

    #[test]
    fn worked_example_satisfies_fixed_point_and_zero_sum() {
        let mut league = worked_league();
        let options = IterativeOptions::default();
        solve_iterative(&mut league, &options).unwrap();

        let sum: f64 = league.iter().map(|(_, t)| t.rating.unwrap()).sum();
        assert!(sum.abs() < 1e-9, "normalized ratings must sum to zero, got {sum}");

        // sos_i must be the average of opponents' ratings within the solver
        // tolerance at convergence.
        for (_, team) in league.clone().iter() {
            let avg: f64 = team
                .opponents
                .iter()
                .map(|o| league.get(o).unwrap().rating.unwrap())
                .sum::<f64>()
                / team.opponents.len() as f64;
            let sos = team.strength_of_schedule.unwrap();
            assert!((sos - avg).abs() < options.tolerance * 2.0);
        }

        // Exact solution of the zero-mean family: (2, -16/3, 10/3).
        assert!((league.get("A").unwrap().rating.unwrap() - 2.0).abs() < 0.01);
        assert!((league.get("B").unwrap().rating.unwrap() + 16.0 / 3.0).abs() < 0.01);
        assert!((league.get("C").unwrap().rating.unwrap() - 10.0 / 3.0).abs() < 0.01);
    }

    #[test]
    fn unbalanced_schedule_converges() {
        // Four teams, uneven game counts (B and D skip each other).
        let mut league = League::new();
        league.record_game("A", "B", 6.0);
        league.record_game("A", "C", 5.0);
        league.record_game("A", "D", 3.0);
        league.record_game("B", "C", 4.0);
        league.record_game("C", "D", 4.0);

        solve_iterative(&mut league, &IterativeOptions::default()).unwrap();

        assert!((league.get("A").unwrap().rating.unwrap() - 3.5).abs() < 0.01);
        assert!((league.get("B").unwrap().rating.unwrap() - 0.125).abs() < 0.01);
        assert!((league.get("C").unwrap().rating.unwrap() + 1.25).abs() < 0.01);
        assert!((league.get("D").unwrap().rating.unwrap() + 2.375).abs() < 0.01);
    }

    #[test]
    fn rating_equals_mov_plus_sos_exactly() {
        let mut league = worked_league();
        solve_iterative(&mut league, &IterativeOptions::default()).unwrap();

        for (_, team) in league.iter() {
            let rating = team.rating.unwrap();
            let mov = team.margin_of_victory.unwrap();
            let sos = team.strength_of_schedule.unwrap();
            assert_eq!(sos, rating - mov);
        }
    }

    #[test]
    fn iteration_cap_surfaces_nonconvergence_and_leaves_ratings_unset() {
        let mut league = worked_league();
        let options = IterativeOptions {
            normalize: true,
            max_iterations: 1,
            tolerance: 1e-12,
        };

        let err = solve_iterative(&mut league, &options).unwrap_err();
        assert!(matches!(err, RatingError::NonConvergence { iterations: 1, .. }));

        for (_, team) in league.iter() {
            // Margins are attached during construction, ratings are not.
            assert!(team.margin_of_victory.is_some());
            assert!(team.rating.is_none());
            assert!(team.strength_of_schedule.is_none());
        }
    }

    #[test]
    fn raw_output_differs_from_normalized_by_a_constant() {
        let mut normalized = worked_league();
        solve_iterative(&mut normalized, &IterativeOptions::default()).unwrap();

        let mut raw = worked_league();
        let options = IterativeOptions {
            normalize: false,
            ..IterativeOptions::default()
        };
        solve_iterative(&mut raw, &options).unwrap();

        let shift = raw.get("A").unwrap().rating.unwrap()
            - normalized.get("A").unwrap().rating.unwrap();
        for id in ["B", "C"] {
            let d = raw.get(id).unwrap().rating.unwrap()
                - normalized.get(id).unwrap().rating.unwrap();
            assert!((d - shift).abs() < 1e-9);
        }
    }
}
