//! Error types for the Pitchside library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Pitchside operations.
#[derive(Debug, Error)]
pub enum PitchsideError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source table is missing columns its loader requires.
    ///
    /// This aborts the load outright: a join against a misnamed column
    /// would silently produce an empty table, which is a worse failure
    /// mode than an explicit stop.
    #[error("{table} table is missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        table: String,
        columns: Vec<String>,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to prepare.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Pitchside operations.
pub type Result<T> = std::result::Result<T, PitchsideError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_names_each_column() {
        let err = PitchsideError::MissingColumns {
            table: "match".to_string(),
            columns: vec!["date".to_string(), "total_runs".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("match table"));
        assert!(msg.contains("date"));
        assert!(msg.contains("total_runs"));
    }
}
