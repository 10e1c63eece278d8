//! Required-column validation.

use crate::error::{PitchsideError, Result};

/// Columns the match table must contain.
pub const MATCH_REQUIRED: &[&str] = &["date", "city", "total_runs"];

/// Columns the weather table must contain.
pub const WEATHER_REQUIRED: &[&str] = &["date", "city", "temp_c"];

/// Verify that every required column is present.
///
/// `headers` are expected to be already trimmed and lowercased by the
/// loader, which makes the match case-insensitive with respect to the
/// source file. Fails with [`PitchsideError::MissingColumns`] naming
/// exactly the absent columns.
pub fn require_columns(table: &str, headers: &[String], required: &[&str]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|r| !headers.iter().any(|h| h == *r))
        .map(|r| r.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PitchsideError::MissingColumns {
            table: table.to_string(),
            columns: missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn all_present_passes() {
        let h = headers(&["date", "city", "total_runs", "venue"]);
        assert!(require_columns("match", &h, MATCH_REQUIRED).is_ok());
    }

    #[test]
    fn missing_columns_are_named_exactly() {
        let h = headers(&["city", "venue"]);
        let err = require_columns("match", &h, MATCH_REQUIRED).unwrap_err();
        match err {
            PitchsideError::MissingColumns { table, columns } => {
                assert_eq!(table, "match");
                assert_eq!(columns, vec!["date".to_string(), "total_runs".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn weather_required_set_is_independent() {
        let h = headers(&["date", "city", "total_runs"]);
        let err = require_columns("weather", &h, WEATHER_REQUIRED).unwrap_err();
        assert!(err.to_string().contains("temp_c"));
    }
}
