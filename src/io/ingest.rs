//! Game-list CSV ingest.
//!
//! This module turns a CSV of finished games into a `League` the solvers can
//! rate.
//!
//! Design goals:
//! - **Strict schema** for required fields (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Separation of concerns**: no rating logic here
//!
//! Expected columns: `home`, `away`, `home_points`, `away_points` and an
//! optional `date`. The `_points` columns also accept a `_score` alias, which
//! is what several common schedule exports use.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::League;
use crate::error::RatingError;

/// Summary stats about the games actually used.
#[derive(Debug, Clone)]
pub struct ScheduleStats {
    pub teams: usize,
    pub games: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the league built from the game list + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedSchedule {
    pub league: League,
    pub stats: ScheduleStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub games_used: usize,
}

/// Load a game-list CSV from disk.
pub fn load_schedule(path: &Path) -> Result<IngestedSchedule, RatingError> {
    let file = File::open(path).map_err(|e| {
        RatingError::Input(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    read_schedule(file)
}

/// Parse a game-list CSV from any reader and build the league.
pub fn read_schedule<R: std::io::Read>(input: R) -> Result<IngestedSchedule, RatingError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| RatingError::Input(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let home_points = resolve_points_column(&header_map, "home")?;
    let away_points = resolve_points_column(&header_map, "away")?;
    for required in ["home", "away"] {
        if !header_map.contains_key(required) {
            return Err(RatingError::Input(format!(
                "Missing required column: `{required}`"
            )));
        }
    }

    let mut league = League::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let mut games_used = 0usize;
    let mut first_date: Option<NaiveDate> = None;
    let mut last_date: Option<NaiveDate> = None;

    for (idx, result) in reader.records().enumerate() {
        // +2 because records() starts after the header row and CSV line
        // numbers are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_game(&record, &header_map, home_points, away_points) {
            Ok(game) => {
                league.record_game(&game.home, &game.away, game.margin);
                games_used += 1;
                if let Some(date) = game.date {
                    first_date = Some(first_date.map_or(date, |d| d.min(date)));
                    last_date = Some(last_date.map_or(date, |d| d.max(date)));
                }
            }
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    if games_used == 0 {
        return Err(RatingError::Input(
            "No valid games remain after row validation.".to_string(),
        ));
    }

    let stats = ScheduleStats {
        teams: league.len(),
        games: games_used,
        first_date,
        last_date,
    };

    Ok(IngestedSchedule {
        league,
        stats,
        row_errors,
        rows_read,
        games_used,
    })
}

struct GameRow {
    home: String,
    away: String,
    /// Signed margin from the home side's perspective.
    margin: f64,
    date: Option<NaiveDate>,
}

fn parse_game(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    home_points: usize,
    away_points: usize,
) -> Result<GameRow, String> {
    let home = get_required(record, header_map, "home")?.to_string();
    let away = get_required(record, header_map, "away")?.to_string();
    if home == away {
        return Err(format!("'{home}' cannot play itself"));
    }

    let home_pts = parse_points(record.get(home_points), "home points")?;
    let away_pts = parse_points(record.get(away_points), "away points")?;

    let date = match get_optional_by_name(record, header_map, "date") {
        Some(s) => Some(parse_date(s)?),
        None => None,
    };

    Ok(GameRow {
        home,
        away,
        margin: home_pts - away_pts,
        date,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header. If we don't strip it, schema validation incorrectly
    // reports a missing column.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_points_column(
    header_map: &HashMap<String, usize>,
    side: &str,
) -> Result<usize, RatingError> {
    let points = format!("{side}_points");
    let score = format!("{side}_score");
    header_map
        .get(&points)
        .or_else(|| header_map.get(&score))
        .copied()
        .ok_or_else(|| {
            RatingError::Input(format!(
                "Missing required column: `{points}` (or `{score}`)"
            ))
        })
}

fn parse_points(value: Option<&str>, what: &str) -> Result<f64, String> {
    let s = value.map(str::trim).filter(|s| !s.is_empty());
    let Some(s) = s else {
        return Err(format!("Missing {what} value."));
    };
    let v: f64 = s.parse().map_err(|_| format!("Invalid {what} '{s}'."))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("Non-finite {what} '{s}'."))
    }
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn get_optional_by_name<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // ISO dates are recommended, but schedule exports commonly use day-first
    // formats. We accept a small fixed set to keep parsing deterministic.
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY, YYYY/MM/DD."
    ))
}
