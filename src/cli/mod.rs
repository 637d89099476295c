//! Command-line parsing for the SRS rating tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the solver/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::SolverChoice;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "srs", version, about = "Simple Rating System for league schedules")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rate a league from a game-list CSV and print the standings.
    Rate(RateArgs),
    /// Generate a synthetic league, rate it, and print the standings.
    Sample(SampleArgs),
}

/// Options shared by every rating run.
#[derive(Debug, Parser, Clone)]
pub struct SolverArgs {
    /// Solution strategy. `auto` tries the exact solve and falls back to the
    /// iterative solver when the system is singular.
    #[arg(short, long, value_enum, default_value_t = SolverChoice::Auto)]
    pub solver: SolverChoice,

    /// Print raw solver output without shifting ratings to zero mean.
    #[arg(long)]
    pub raw: bool,

    /// Iteration cap for the iterative solver.
    #[arg(long, default_value_t = 10_000)]
    pub max_iterations: usize,

    /// Convergence threshold on the max per-team SOS delta.
    #[arg(long, default_value_t = 0.001)]
    pub tolerance: f64,

    /// Singular-value-product gate for the pseudo-inverse solver.
    #[arg(long, default_value_t = 1e-40)]
    pub singularity_epsilon: f64,

    /// Export the computed ratings to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct RateArgs {
    /// Game results CSV (`home,away,home_points,away_points[,date]`).
    pub games: PathBuf,

    #[command(flatten)]
    pub solver: SolverArgs,
}

#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Number of teams in the generated league.
    #[arg(short = 'n', long, default_value_t = 12)]
    pub teams: usize,

    /// Games each pair of teams plays.
    #[arg(long, default_value_t = 2)]
    pub rounds: usize,

    /// Random seed for schedule generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Std dev of latent team strengths (points).
    #[arg(long, default_value_t = 6.0)]
    pub strength_sigma: f64,

    /// Std dev of per-game margin noise (points).
    #[arg(long, default_value_t = 9.0)]
    pub noise_sigma: f64,

    #[command(flatten)]
    pub solver: SolverArgs,
}
