//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads or generates a schedule
//! - runs the selected solver (with the auto-fallback policy)
//! - prints the summary and standings
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, RateArgs, SampleArgs, SolverArgs};
use crate::data::{SampleOptions, generate_league};
use crate::domain::{League, RateConfig, SolverChoice};
use crate::error::RatingError;
use crate::io::ingest::{ScheduleStats, load_schedule};
use crate::report::{RunSummary, format_ratings_table, format_run_summary};
use crate::srs::{
    IterativeOptions, PseudoInverseOptions, solve_direct, solve_iterative, solve_pseudo_inverse,
};

/// Entry point for the `srs` binary.
pub fn run() -> Result<(), RatingError> {
    // `srs games.csv` should behave like `srs rate games.csv`. Clap requires
    // a subcommand name, so we do a small, explicit rewrite of the argv list
    // before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Rate(args) => handle_rate(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_rate(args: RateArgs) -> Result<(), RatingError> {
    let ingest = load_schedule(&args.games)?;
    for row_error in &ingest.row_errors {
        eprintln!(
            "warning: line {}: {} (row skipped)",
            row_error.line, row_error.message
        );
    }

    let mut league = ingest.league;
    finish_run(&mut league, &ingest.stats, &args.solver)
}

fn handle_sample(args: SampleArgs) -> Result<(), RatingError> {
    let options = SampleOptions {
        teams: args.teams,
        rounds: args.rounds,
        seed: args.seed,
        strength_sigma: args.strength_sigma,
        noise_sigma: args.noise_sigma,
    };
    let mut league = generate_league(&options)?;

    println!(
        "Synthetic league: {} teams, {} rounds per pairing, seed {}",
        args.teams, args.rounds, args.seed
    );
    let stats = ScheduleStats {
        teams: league.len(),
        games: args.teams * (args.teams - 1) / 2 * args.rounds,
        first_date: None,
        last_date: None,
    };
    finish_run(&mut league, &stats, &args.solver)
}

fn finish_run(
    league: &mut League,
    stats: &ScheduleStats,
    args: &SolverArgs,
) -> Result<(), RatingError> {
    let config = rate_config_from_args(args);
    let summary = rate_league(league, &config)?;

    print!("{}", format_run_summary(stats, &summary));
    println!();
    print!("{}", format_ratings_table(league));

    if let Some(path) = &args.export {
        crate::io::export::write_ratings_csv(path, league)?;
        println!("\nRatings written to {}", path.display());
    }
    Ok(())
}

pub fn rate_config_from_args(args: &SolverArgs) -> RateConfig {
    RateConfig {
        solver: args.solver,
        normalize: !args.raw,
        max_iterations: args.max_iterations,
        tolerance: args.tolerance,
        singularity_epsilon: args.singularity_epsilon,
    }
}

/// Rate a league with the configured strategy.
///
/// `auto` implements the documented fallback policy: try the exact solve and
/// rerun with the iterative solver when the system is singular. An explicitly
/// selected solver surfaces its failure instead.
pub fn rate_league(league: &mut League, config: &RateConfig) -> Result<RunSummary, RatingError> {
    let iterative = IterativeOptions {
        normalize: config.normalize,
        max_iterations: config.max_iterations,
        tolerance: config.tolerance,
    };

    match config.solver {
        SolverChoice::Iterative => {
            let convergence = solve_iterative(league, &iterative)?;
            Ok(RunSummary {
                solver_label: "iterative",
                convergence: Some(convergence),
                fallback_note: None,
                normalized: config.normalize,
            })
        }
        SolverChoice::Direct => {
            solve_direct(league, config.normalize)?;
            Ok(RunSummary {
                solver_label: "direct",
                convergence: None,
                fallback_note: None,
                normalized: config.normalize,
            })
        }
        SolverChoice::PseudoInverse => {
            let options = PseudoInverseOptions {
                normalize: config.normalize,
                singularity_epsilon: config.singularity_epsilon,
            };
            solve_pseudo_inverse(league, &options)?;
            Ok(RunSummary {
                solver_label: "pseudo-inverse",
                convergence: None,
                fallback_note: None,
                normalized: config.normalize,
            })
        }
        SolverChoice::Auto => match solve_direct(league, config.normalize) {
            Ok(()) => Ok(RunSummary {
                solver_label: "direct",
                convergence: None,
                fallback_note: None,
                normalized: config.normalize,
            }),
            Err(RatingError::SingularSystem) => {
                let convergence = solve_iterative(league, &iterative)?;
                Ok(RunSummary {
                    solver_label: "iterative",
                    convergence: Some(convergence),
                    fallback_note: Some(
                        "fell back from direct: singular system".to_string(),
                    ),
                    normalized: config.normalize,
                })
            }
            Err(e) => Err(e),
        },
    }
}

/// Rewrite argv so `srs <path>` defaults to `srs rate <path>`.
///
/// Rules:
/// - `srs`                     -> unchanged (clap prints usage)
/// - `srs games.csv ...`       -> `srs rate games.csv ...`
/// - `srs --help/--version`    -> unchanged
/// - `srs rate/sample ...`     -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help" | "rate" | "sample"
    );
    if is_top_level || arg1.starts_with('-') {
        return argv;
    }

    argv.insert(1, "rate".to_string());
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_path_is_rewritten_to_rate() {
        let argv = rewrite_args(to_argv(&["srs", "games.csv"]));
        assert_eq!(argv, to_argv(&["srs", "rate", "games.csv"]));
    }

    #[test]
    fn subcommands_and_flags_pass_through() {
        let argv = rewrite_args(to_argv(&["srs", "sample", "--seed", "7"]));
        assert_eq!(argv, to_argv(&["srs", "sample", "--seed", "7"]));
        let argv = rewrite_args(to_argv(&["srs", "--help"]));
        assert_eq!(argv, to_argv(&["srs", "--help"]));
    }

    #[test]
    fn auto_falls_back_to_iterative_on_singular_system() {
        let mut league = League::new();
        league.record_game("A", "B", 10.0);

        let summary = rate_league(&mut league, &RateConfig::default()).unwrap();
        assert_eq!(summary.solver_label, "iterative");
        assert!(summary.fallback_note.is_some());
        assert!((league.get("A").unwrap().rating.unwrap() - 5.0).abs() < 0.01);
    }

    #[test]
    fn explicit_direct_choice_surfaces_the_failure() {
        let mut league = League::new();
        league.record_game("A", "B", 10.0);

        let config = RateConfig {
            solver: SolverChoice::Direct,
            ..RateConfig::default()
        };
        let err = rate_league(&mut league, &config).unwrap_err();
        assert_eq!(err, RatingError::SingularSystem);
        assert!(league.get("A").unwrap().rating.is_none());
    }
}
