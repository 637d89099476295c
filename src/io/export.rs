//! Ratings CSV export.

use std::path::Path;

use crate::domain::League;
use crate::error::RatingError;

/// Write the computed ratings table to CSV, best team first.
pub fn write_ratings_csv(path: &Path, league: &League) -> Result<(), RatingError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        RatingError::Output(format!(
            "Failed to create ratings CSV '{}': {e}",
            path.display()
        ))
    })?;

    writer
        .write_record([
            "team",
            "games",
            "margin_of_victory",
            "strength_of_schedule",
            "rating",
        ])
        .map_err(|e| RatingError::Output(format!("Failed to write ratings CSV: {e}")))?;

    for row in ratings_rows(league) {
        writer
            .write_record(&row)
            .map_err(|e| RatingError::Output(format!("Failed to write ratings CSV: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| RatingError::Output(format!("Failed to write ratings CSV: {e}")))?;
    Ok(())
}

/// Export rows sorted by rating (descending); unrated teams sort last.
fn ratings_rows(league: &League) -> Vec<[String; 5]> {
    let mut teams: Vec<_> = league.iter().collect();
    teams.sort_by(|(_, a), (_, b)| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    teams
        .into_iter()
        .map(|(id, team)| {
            [
                id.clone(),
                team.games_played.to_string(),
                fmt_opt(team.margin_of_victory),
                fmt_opt(team.strength_of_schedule),
                fmt_opt(team.rating),
            ]
        })
        .collect()
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.6}"),
        _ => String::new(),
    }
}
