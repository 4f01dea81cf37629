//! Write-Ahead Log (WAL) for workout and body weight entries.
//!
//! Entries are appended to JSONL (JSON Lines) files with file locking to
//! ensure safe concurrent access. The sink is generic so workout logs and
//! body weight logs share one implementation.

use crate::Result;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Sink trait for persisting log entries
pub trait LogSink<T> {
    fn append(&mut self, entry: &T) -> Result<()>;
}

/// JSONL-based sink with file locking
pub struct JsonlSink<T> {
    path: PathBuf,
    _entry: PhantomData<T>,
}

impl<T: Serialize> JsonlSink<T> {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _entry: PhantomData,
        }
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl<T: Serialize> LogSink<T> for JsonlSink<T> {
    fn append(&mut self, entry: &T) -> Result<()> {
        self.ensure_parent_dir()?;

        // Open file for appending
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Acquire exclusive lock
        file.lock_exclusive()?;

        // Write entry as JSON line
        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(entry)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        // Lock is automatically released when file is dropped
        file.unlock()?;

        tracing::debug!("Appended entry to {:?}", self.path);
        Ok(())
    }
}

/// Read all entries from a WAL file
///
/// Unparseable lines (including a partial final line from an interrupted
/// write) are skipped with a warning.
pub fn read_entries<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    // Acquire shared lock for reading
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<T>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("Failed to parse entry at line {}: {}", line_num + 1, e);
                // Continue reading, don't fail completely
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} entries from {:?}", entries.len(), path);
    Ok(entries)
}
