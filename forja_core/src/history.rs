//! Workout history loading.
//!
//! History is merged from the live WAL and the CSV archive so the
//! progression heuristics always see the full list of past sessions,
//! newest first. This is the "already-materialized snapshot" the pure
//! checks fold over.

use crate::types::{BodyWeightLog, MuscleGroup, WorkoutLog, WorkoutSet};
use crate::Result;
use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

/// CSV row format for reading archived workout logs
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    date: String,
    exercise_id: String,
    exercise_name: String,
    muscle_groups: String,
    sets: String,
    suggested_rest: u32,
    notes: Option<String>,
}

impl TryFrom<CsvRow> for WorkoutLog {
    type Error = crate::Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let date = DateTime::parse_from_rfc3339(&row.date)
            .map_err(|e| crate::Error::Other(format!("Invalid date: {}", e)))?
            .with_timezone(&Utc);

        let muscle_groups = row
            .muscle_groups
            .split('|')
            .filter(|part| !part.is_empty())
            .map(MuscleGroup::from_str)
            .collect::<Result<Vec<_>>>()?;

        let sets: Vec<WorkoutSet> = serde_json::from_str(&row.sets)?;

        Ok(WorkoutLog {
            id: row.id,
            date,
            exercise_id: row.exercise_id,
            exercise_name: row.exercise_name,
            muscle_groups,
            sets,
            suggested_rest: row.suggested_rest,
            notes: row.notes,
        })
    }
}

/// Load the full workout history from both WAL and CSV archive
///
/// Returns logs sorted by date (newest first). Automatically deduplicates
/// logs that appear in both WAL and CSV.
pub fn load_workout_logs(wal_path: &Path, csv_path: &Path) -> Result<Vec<WorkoutLog>> {
    let mut logs = Vec::new();
    let mut seen_ids = HashSet::new();

    // Load from WAL first (most recent)
    if wal_path.exists() {
        let wal_logs: Vec<WorkoutLog> = crate::wal::read_entries(wal_path)?;
        for log in wal_logs {
            seen_ids.insert(log.id.clone());
            logs.push(log);
        }
        tracing::debug!("Loaded {} workout logs from WAL", logs.len());
    }

    // Load from CSV (archived)
    if csv_path.exists() {
        let csv_logs = load_logs_from_csv(csv_path)?;
        let mut csv_count = 0;
        for log in csv_logs {
            if !seen_ids.contains(&log.id) {
                seen_ids.insert(log.id.clone());
                logs.push(log);
                csv_count += 1;
            }
        }
        tracing::debug!("Loaded {} workout logs from CSV", csv_count);
    }

    // Sort by date, newest first
    logs.sort_by(|a, b| b.date.cmp(&a.date));

    tracing::info!("Loaded {} total workout logs", logs.len());

    Ok(logs)
}

/// Load all workout logs from a CSV archive
fn load_logs_from_csv(path: &Path) -> Result<Vec<WorkoutLog>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut logs = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match WorkoutLog::try_from(row) {
                Ok(log) => logs.push(log),
                Err(e) => {
                    tracing::warn!("Failed to parse CSV row: {}", e);
                    // Continue processing other rows
                }
            },
            Err(e) => {
                tracing::warn!("Failed to deserialize CSV row: {}", e);
            }
        }
    }

    Ok(logs)
}

/// Load body weight history, newest first
pub fn load_body_weight_logs(wal_path: &Path) -> Result<Vec<BodyWeightLog>> {
    let mut logs: Vec<BodyWeightLog> = crate::wal::read_entries(wal_path)?;
    logs.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(logs)
}

/// The most recent log for a given exercise
pub fn find_last_log_for_exercise<'a>(
    logs: &'a [WorkoutLog],
    exercise_id: &str,
) -> Option<&'a WorkoutLog> {
    // Logs should already be sorted newest first
    logs.iter().find(|log| log.exercise_id == exercise_id)
}
