// Season history ingestion: prior-week results from a CSV file.
//
// The power rankings want every completed week, not just the one being
// reported, so the binary feeds them the accumulated history plus the fresh
// week's results.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::analytics::power::TeamWeekResult;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to read history file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse history file {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load per-team weekly results from a CSV file with a header row of
/// `team_id,week,score[,bench_score][,division]`.
///
/// Rows are taken strictly: a malformed row fails the load rather than being
/// skipped, since a silently shortened history would skew the rankings.
pub fn load_history(path: &Path) -> Result<Vec<TeamWeekResult>, HistoryError> {
    let file = std::fs::File::open(path).map_err(|e| HistoryError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut results = Vec::new();
    for row in reader.deserialize::<TeamWeekResult>() {
        let result = row.map_err(|e| HistoryError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        results.push(result);
    }

    debug!(
        rows = results.len(),
        path = %path.display(),
        "loaded season history"
    );
    Ok(results)
}
