//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built from a CSV game list or a synthetic schedule generator
//! - passed to any of the solvers in-memory
//! - exported to CSV/JSON afterwards

use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::RatingError;

/// Which solution strategy to run.
///
/// `Auto` means: try the exact solve first and fall back to the iterative
/// solver when the system is reported singular. Singularity is routine for
/// this formulation (ratings are defined only up to an additive constant),
/// so the fallback is policy, not an error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SolverChoice {
    Auto,
    Iterative,
    Direct,
    PseudoInverse,
}

impl SolverChoice {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            SolverChoice::Auto => "auto",
            SolverChoice::Iterative => "iterative",
            SolverChoice::Direct => "direct",
            SolverChoice::PseudoInverse => "pseudo-inverse",
        }
    }
}

/// A full run's configuration as understood by the rating pipeline.
///
/// This is derived from CLI flags (plus defaults). There are no process-wide
/// globals: every knob is passed explicitly into the solver calls.
#[derive(Debug, Clone)]
pub struct RateConfig {
    pub solver: SolverChoice,
    /// Shift the solved ratings to the zero-mean member of the solution
    /// family. Disabled when the caller wants to compare raw solver outputs.
    pub normalize: bool,
    /// Iteration cap for the relaxation solver.
    pub max_iterations: usize,
    /// Convergence threshold on the max per-team SOS delta.
    pub tolerance: f64,
    /// Singular-value-product gate for the pseudo-inverse solver.
    pub singularity_epsilon: f64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            solver: SolverChoice::Auto,
            normalize: true,
            max_iterations: 10_000,
            tolerance: 1e-3,
            singularity_epsilon: 1e-40,
        }
    }
}

/// One team's schedule record plus the fields the solvers attach.
///
/// `opponents` holds one entry per game played, in order, with duplicates for
/// rematches. The derived fields stay `None` until a solver succeeds, so "no
/// rating computed" is always distinguishable from a rating of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub games_played: u32,
    /// Cumulative signed point differential across all games.
    pub point_spread: f64,
    pub opponents: Vec<String>,
    pub margin_of_victory: Option<f64>,
    pub rating: Option<f64>,
    pub strength_of_schedule: Option<f64>,
}

impl Team {
    pub fn new() -> Self {
        Self {
            games_played: 0,
            point_spread: 0.0,
            opponents: Vec::new(),
            margin_of_victory: None,
            rating: None,
            strength_of_schedule: None,
        }
    }

    /// Record one game against `opponent` with this team's signed margin.
    pub fn record_game(&mut self, opponent: &str, margin: f64) {
        self.games_played += 1;
        self.point_spread += margin;
        self.opponents.push(opponent.to_string());
    }
}

impl Default for Team {
    fn default() -> Self {
        Self::new()
    }
}

/// A league: team identifier -> schedule record.
///
/// Backed by a `BTreeMap` so that iteration order (and therefore matrix
/// row/column assignment and relaxation order) is deterministic for a given
/// league.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct League {
    teams: BTreeMap<String, Team>,
}

impl League {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.teams.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Team> {
        self.teams.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Team> {
        self.teams.get_mut(id)
    }

    pub fn insert(&mut self, id: impl Into<String>, team: Team) {
        self.teams.insert(id.into(), team);
    }

    /// Iterate `(identifier, record)` pairs in sorted-identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Team)> {
        self.teams.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Team)> {
        self.teams.iter_mut()
    }

    pub fn team_ids(&self) -> impl Iterator<Item = &String> {
        self.teams.keys()
    }

    /// Record a finished game, creating either team on first sight.
    ///
    /// `margin` is signed from `home`'s perspective (positive if `home`
    /// outscored `away`).
    pub fn record_game(&mut self, home: &str, away: &str, margin: f64) {
        self.teams
            .entry(home.to_string())
            .or_default()
            .record_game(away, margin);
        self.teams
            .entry(away.to_string())
            .or_default()
            .record_game(home, -margin);
    }

    /// Check the schedule invariants required before any matrix is built.
    ///
    /// The coefficient construction divides by `games_played`, so a zero
    /// there is a correctness hazard and must be rejected up front rather
    /// than surfacing as a NaN-filled matrix.
    pub fn validate(&self) -> Result<(), RatingError> {
        for (id, team) in &self.teams {
            if team.games_played == 0 {
                return Err(RatingError::InvalidRecord {
                    team: id.clone(),
                    message: "games_played must be positive".to_string(),
                });
            }
            if team.opponents.len() != team.games_played as usize {
                return Err(RatingError::InvalidRecord {
                    team: id.clone(),
                    message: format!(
                        "opponents list has {} entries but games_played is {}",
                        team.opponents.len(),
                        team.games_played
                    ),
                });
            }
            for opponent in &team.opponents {
                if !self.teams.contains_key(opponent) {
                    return Err(RatingError::InvalidRecord {
                        team: id.clone(),
                        message: format!("opponent '{opponent}' is not a league member"),
                    });
                }
            }
        }
        Ok(())
    }
}
