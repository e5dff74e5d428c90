// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Append-only status log for the cruise controller.
//!
//! Provides [`StatusLogConfig`] for TOML configuration and [`StatusLog`]
//! for writing human-readable status records, one block per snapshot.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use acc_core::StatusSnapshot;

/// First line of every record.
pub const RECORD_HEADER: &str = "=== ACC Status Record ===";
/// Last line of every record.
pub const RECORD_SEPARATOR: &str = "-------------------------------------";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Status log file names for each way of running the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusLogConfig {
    /// Default log file (one-shot runs and the viewer)
    pub file: String,
    /// Log file for demo mode
    pub demo_file: String,
    /// Default log file for interactive mode
    pub interactive_file: String,
}

impl Default for StatusLogConfig {
    fn default() -> Self {
        Self {
            file: "acc_log.txt".to_string(),
            demo_file: "demo_log.txt".to_string(),
            interactive_file: "interactive_log.txt".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StatusLogError {
    #[error("could not open log file '{}' for writing: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("could not write log file '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("could not read log file '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Render one status record. Timestamps use the classic `ctime` layout.
pub fn format_record<Tz>(timestamp: &DateTime<Tz>, snapshot: &StatusSnapshot) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", RECORD_HEADER);
    let _ = writeln!(out, "Timestamp: {}", timestamp.format("%a %b %e %H:%M:%S %Y"));
    let _ = writeln!(out, "Current Speed: {:.1} km/h", snapshot.ego_speed_kmh);
    let _ = writeln!(out, "Car Ahead Speed: {:.1} km/h", snapshot.ahead_speed_kmh);
    let _ = writeln!(out, "Distance: {:.1} m", snapshot.gap_m);
    let _ = writeln!(out, "Safe Distance: {:.1} m", snapshot.safe_distance_m);
    let _ = writeln!(out, "Status: {}", snapshot.advisory);
    let _ = writeln!(out, "{}", RECORD_SEPARATOR);
    out
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Append-only status log bound to a file path.
///
/// The file is opened for each record and closed again, so a log that
/// cannot be written only loses that one record.
#[derive(Debug, Clone)]
pub struct StatusLog {
    path: PathBuf,
}

impl StatusLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Point the log at a different file.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    /// Append a record stamped with the current local time.
    pub fn append(&self, snapshot: &StatusSnapshot) -> Result<(), StatusLogError> {
        self.append_at(&Local::now(), snapshot)
    }

    /// Append a record with an explicit timestamp.
    pub fn append_at<Tz>(
        &self,
        timestamp: &DateTime<Tz>,
        snapshot: &StatusSnapshot,
    ) -> Result<(), StatusLogError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| StatusLogError::Open {
                path: self.path.clone(),
                source,
            })?;

        let record = format_record(timestamp, snapshot);
        file.write_all(record.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| StatusLogError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!("status record appended to {}", self.path.display());
        Ok(())
    }
}

/// Read a whole log file for display.
pub fn read_log(path: &Path) -> Result<String, StatusLogError> {
    std::fs::read_to_string(path).map_err(|source| StatusLogError::Read {
        path: path.to_path_buf(),
        source,
    })
}
