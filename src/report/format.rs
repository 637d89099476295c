//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the solver code stays clean and testable
//! - output changes are localized

use crate::domain::League;
use crate::io::ingest::ScheduleStats;
use crate::srs::Convergence;

/// Per-run context lines printed above the table.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub solver_label: &'static str,
    pub convergence: Option<Convergence>,
    /// Set when `auto` fell back from the exact solve.
    pub fallback_note: Option<String>,
    pub normalized: bool,
}

impl Default for RunSummary {
    fn default() -> Self {
        Self {
            solver_label: "",
            convergence: None,
            fallback_note: None,
            normalized: true,
        }
    }
}

/// Format the run header (dataset stats + solver diagnostics).
pub fn format_run_summary(stats: &ScheduleStats, summary: &RunSummary) -> String {
    let mut out = String::new();

    out.push_str("=== srs - Simple Rating System ===\n");
    out.push_str(&format!(
        "Schedule: {} teams, {} games\n",
        stats.teams, stats.games
    ));
    if let (Some(first), Some(last)) = (stats.first_date, stats.last_date) {
        out.push_str(&format!("Dates: {first} through {last}\n"));
    }

    out.push_str(&format!("Solver: {}\n", summary.solver_label));
    if let Some(note) = &summary.fallback_note {
        out.push_str(&format!("  ({note})\n"));
    }
    if let Some(convergence) = summary.convergence {
        out.push_str(&format!(
            "Converged in {} passes (last delta {:.6})\n",
            convergence.iterations, convergence.delta
        ));
    }
    if !summary.normalized {
        out.push_str("Ratings are raw (not shifted to zero mean)\n");
    }

    out
}

/// Format the ratings table, best team first.
pub fn format_ratings_table(league: &League) -> String {
    let mut teams: Vec<_> = league.iter().collect();
    teams.sort_by(|(_, a), (_, b)| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut out = String::new();
    out.push_str(&format!(
        "{:<5}{:<24}{:>6}{:>9}{:>9}{:>9}\n",
        "#", "team", "games", "mov", "sos", "rating"
    ));
    for (rank, (id, team)) in teams.iter().enumerate() {
        out.push_str(&format!(
            "{:<5}{:<24}{:>6}{:>9}{:>9}{:>9}\n",
            rank + 1,
            id,
            team.games_played,
            fmt_opt(team.margin_of_victory),
            fmt_opt(team.strength_of_schedule),
            fmt_opt(team.rating),
        ));
    }
    out
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => "-".to_string(),
    }
}
