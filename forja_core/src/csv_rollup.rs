//! CSV rollup functionality for archiving workout WAL entries.
//!
//! This module implements atomic WAL-to-CSV conversion with proper error
//! handling to prevent data loss. The CSV archive is storage compaction,
//! not a user-facing export format.

use crate::types::WorkoutLog;
use crate::Result;
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the CSV archive
///
/// Sets are stored as an embedded JSON array and muscle groups as a
/// pipe-joined list.
#[derive(Debug, serde::Serialize)]
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

impl TryFrom<&WorkoutLog> for CsvRow {
    type Error = crate::Error;

    fn try_from(log: &WorkoutLog) -> Result<Self> {
        Ok(CsvRow {
            id: log.id.clone(),
            date: log.date.to_rfc3339(),
            exercise_id: log.exercise_id.clone(),
            exercise_name: log.exercise_name.clone(),
            muscle_groups: log
                .muscle_groups
                .iter()
                .map(|g| g.as_str())
                .collect::<Vec<_>>()
                .join("|"),
            sets: serde_json::to_string(&log.sets)?,
            suggested_rest: log.suggested_rest,
            notes: log.notes.clone(),
        })
    }
}

/// Roll up WAL entries into CSV and archive the WAL atomically
///
/// This function:
/// 1. Reads all workout logs from the WAL
/// 2. Appends them to the CSV file (creates with headers if needed)
/// 3. Syncs the CSV to disk
/// 4. Renames the WAL to .processed
/// 5. Returns the number of logs processed
///
/// # Safety
/// - CSV is fsynced before WAL is renamed
/// - WAL is renamed (not deleted) to allow manual recovery if needed
/// - Processed WAL files can be cleaned up separately
pub fn wal_to_csv_and_archive(wal_path: &Path, csv_path: &Path) -> Result<usize> {
    // Read all logs from WAL
    let logs: Vec<WorkoutLog> = crate::wal::read_entries(wal_path)?;

    if logs.is_empty() {
        tracing::info!("No workout logs in WAL to roll up");
        return Ok(0);
    }

    // Ensure parent directory exists
    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Open CSV file for appending
    let file = OpenOptions::new().create(true).append(true).open(csv_path)?;

    // Determine if we need to write headers by checking file size after
    // opening; avoids an extra stat() syscall
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    // Write all logs to CSV
    for log in &logs {
        let row = CsvRow::try_from(log)?;
        writer.serialize(row)?;
    }

    // Flush and sync to disk
    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Wrote {} workout logs to CSV", logs.len());

    // Atomically archive the WAL by renaming it
    let processed_path = wal_path.with_extension("wal.processed");
    std::fs::rename(wal_path, &processed_path)?;

    tracing::info!("Archived WAL to {:?}", processed_path);

    Ok(logs.len())
}

/// Clean up old processed WAL files
///
/// This removes all .wal.processed files in the given directory.
pub fn cleanup_processed_wals(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(extension) = path.extension() {
            if extension == "processed" {
                std::fs::remove_file(&path)?;
                tracing::debug!("Removed processed WAL: {:?}", path);
                count += 1;
            }
        }
    }

    if count > 0 {
        tracing::info!("Cleaned up {} processed WAL files", count);
    }

    Ok(count)
}
