//! League schedule → linear system construction.
//!
//! For a league of N teams the recursive rating definition
//! `rating_i = mov_i + average(rating_j for j in opponents_i)` rearranges to
//! the linear system `A · rating = mov` with `A[i][i] = 1` and
//! `A[i][j] -= 1/games_i` per game played against team j (rematches
//! accumulate). Matrix dimensions always come from the league itself.

use std::collections::HashMap;

use nalgebra::{DMatrix, DVector};

use crate::domain::League;
use crate::error::RatingError;

/// The linear system implied by a league's schedule.
///
/// Rows and columns are indexed by team in sorted-identifier order, which
/// keeps matrix assignment and relaxation order deterministic for a given
/// league.
#[derive(Debug)]
pub struct RatingSystem {
    names: Vec<String>,
    /// Per-team opponent indices, one entry per game played.
    opponents: Vec<Vec<usize>>,
    mov: DVector<f64>,
}

impl RatingSystem {
    /// Validate the schedule invariants and derive per-team margins.
    ///
    /// `margin_of_victory` is written back to the league here, as a side
    /// effect of construction; `rating` and `strength_of_schedule` are only
    /// touched once a solver succeeds, so callers can always distinguish "no
    /// rating computed".
    pub fn build(league: &mut League) -> Result<Self, RatingError> {
        league.validate()?;

        let names: Vec<String> = league.team_ids().cloned().collect();
        let index: HashMap<&str, usize> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let mut opponents = Vec::with_capacity(names.len());
        let mut mov = DVector::zeros(names.len());

        for (i, name) in names.iter().enumerate() {
            // Membership was checked by validate(), so the lookups hold.
            let team = league.get(name).ok_or_else(|| RatingError::InvalidRecord {
                team: name.clone(),
                message: "team disappeared during system construction".to_string(),
            })?;
            let opps: Vec<usize> = team.opponents.iter().map(|o| index[o.as_str()]).collect();
            mov[i] = team.point_spread / f64::from(team.games_played);
            opponents.push(opps);
        }

        for (i, name) in names.iter().enumerate() {
            if let Some(team) = league.get_mut(name) {
                team.margin_of_victory = Some(mov[i]);
            }
        }

        Ok(Self {
            names,
            opponents,
            mov,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn opponents(&self) -> &[Vec<usize>] {
        &self.opponents
    }

    /// Target vector: per-team margin of victory.
    pub fn margins(&self) -> &DVector<f64> {
        &self.mov
    }

    /// N×N coefficient matrix with the identity diagonal.
    pub fn coefficient_matrix(&self) -> DMatrix<f64> {
        let n = self.len();
        let mut a = DMatrix::identity(n, n);
        for (i, opps) in self.opponents.iter().enumerate() {
            let weight = 1.0 / opps.len() as f64;
            for &j in opps {
                a[(i, j)] -= weight;
            }
        }
        a
    }

    /// N×(N+1) augmented matrix for the least-squares formulation: pure
    /// averaging coefficients (no diagonal bias) plus a trailing column of
    /// ones whose synthetic unknown absorbs the additive degree of freedom.
    pub fn augmented_matrix(&self) -> DMatrix<f64> {
        let n = self.len();
        let mut m = DMatrix::zeros(n, n + 1);
        for (i, opps) in self.opponents.iter().enumerate() {
            let weight = 1.0 / opps.len() as f64;
            for &j in opps {
                m[(i, j)] -= weight;
            }
            m[(i, n)] = 1.0;
        }
        m
    }

    /// Write a solved rating vector back to the league.
    ///
    /// `strength_of_schedule` is derived as `rating - margin_of_victory` so
    /// the identity between the three fields holds exactly.
    pub fn write_solution(&self, league: &mut League, ratings: &[f64]) {
        for (i, name) in self.names.iter().enumerate() {
            if let Some(team) = league.get_mut(name) {
                team.rating = Some(ratings[i]);
                team.strength_of_schedule = Some(ratings[i] - self.mov[i]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worked_league() -> League {
        // A beat B by 10, C beat B by 6, C beat A by 4:
        // spreads A = +6, B = -16, C = +10 over two games each.
        let mut league = League::new();
        league.record_game("A", "B", 10.0);
        league.record_game("C", "B", 6.0);
        league.record_game("C", "A", 4.0);
        league
    }

    #[test]
    fn build_derives_margins_and_writes_them_back() {
        let mut league = worked_league();
        let system = RatingSystem::build(&mut league).unwrap();

        assert_eq!(system.names(), ["A", "B", "C"]);
        assert!((system.margins()[0] - 3.0).abs() < 1e-12);
        assert!((system.margins()[1] - -8.0).abs() < 1e-12);
        assert!((system.margins()[2] - 5.0).abs() < 1e-12);

        let a = league.get("A").unwrap();
        assert!((a.margin_of_victory.unwrap() - 3.0).abs() < 1e-12);
        assert!(a.rating.is_none());
        assert!(a.strength_of_schedule.is_none());
    }

    #[test]
    fn coefficient_matrix_averages_opponents() {
        let mut league = worked_league();
        let system = RatingSystem::build(&mut league).unwrap();
        let a = system.coefficient_matrix();

        assert_eq!(a.nrows(), 3);
        assert!((a[(0, 0)] - 1.0).abs() < 1e-12);
        assert!((a[(0, 1)] - -0.5).abs() < 1e-12);
        assert!((a[(0, 2)] - -0.5).abs() < 1e-12);
        assert!((a[(1, 0)] - -0.5).abs() < 1e-12);
    }

    #[test]
    fn rematches_accumulate_weight() {
        let mut league = League::new();
        league.record_game("A", "B", 3.0);
        league.record_game("A", "B", -1.0);
        league.record_game("A", "C", 2.0);
        league.record_game("B", "C", 1.0);

        let system = RatingSystem::build(&mut league).unwrap();
        let a = system.coefficient_matrix();

        // A played B twice out of three games: weight 2/3.
        assert!((a[(0, 1)] - (-2.0 / 3.0)).abs() < 1e-12);
        assert!((a[(0, 2)] - (-1.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn augmented_matrix_has_no_diagonal_bias_and_a_ones_column() {
        let mut league = worked_league();
        let system = RatingSystem::build(&mut league).unwrap();
        let m = system.augmented_matrix();

        assert_eq!((m.nrows(), m.ncols()), (3, 4));
        assert!(m[(0, 0)].abs() < 1e-12);
        assert!((m[(0, 1)] - -0.5).abs() < 1e-12);
        assert!((m[(0, 3)] - 1.0).abs() < 1e-12);
        assert!((m[(2, 3)] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn build_rejects_invalid_league_before_any_matrix_work() {
        let mut league = League::new();
        league.insert("A", crate::domain::Team::new());
        let err = RatingSystem::build(&mut league).unwrap_err();
        assert!(matches!(err, RatingError::InvalidRecord { .. }));
        // No margin may be attached when validation fails.
        assert!(league.get("A").unwrap().margin_of_victory.is_none());
    }
}
