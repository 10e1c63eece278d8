//! Typed record definitions and required-column validation.
//!
//! Every source table is validated once at load time against an explicit
//! record definition; downstream code works with typed fields instead of
//! string-keyed column lookups.

mod records;
mod validate;

pub use records::{MatchRecord, MergedRecord, TempBucket, WeatherRecord};
pub use validate::{require_columns, MATCH_REQUIRED, WEATHER_REQUIRED};
