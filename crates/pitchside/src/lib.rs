//! Pitchside: joins cricket match records with daily weather observations.
//!
//! The pipeline parses two delimited files, normalizes their
//! heterogeneous date formats, validates each table's schema, inner-joins
//! them on (date, city), and derives display fields. The joined table is
//! then queried through [`FilterSpec`] and aggregated by the summary
//! module; rendering is left to the callers.
//!
//! # Core principles
//!
//! - **Typed at the boundary**: each table is validated once at load time
//!   into explicit records; no string-keyed column access downstream.
//! - **Immutable transforms**: every stage consumes an input table and
//!   produces a new one, so the pipeline is deterministic and idempotent.
//! - **Best-effort rows, strict schema**: a row with an unreadable date is
//!   dropped and counted; a table with a missing column aborts the load.
//!
//! # Example
//!
//! ```no_run
//! use pitchside::{FilterSpec, Pitchside, Summary};
//!
//! let pipeline = Pitchside::new("matches.csv", "weather.csv");
//! let prepared = pipeline.prepare().unwrap();
//!
//! let spec = FilterSpec::select_all(&prepared.merged.records);
//! let rows = spec.apply(&prepared.merged.records);
//!
//! match Summary::compute(&rows) {
//!     Some(summary) => println!("{} matches", summary.matches),
//!     None => println!("no data for this selection"),
//! }
//! ```

pub mod date;
pub mod error;
pub mod export;
pub mod filter;
pub mod input;
pub mod join;
pub mod load;
pub mod schema;
pub mod summary;

mod pitchside;

pub use crate::pitchside::{Pitchside, PitchsideConfig, PreparedCache, PreparedData};
pub use date::parse_date;
pub use error::{PitchsideError, Result};
pub use filter::FilterSpec;
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use join::{join_match_weather, MergedTable};
pub use load::{load_match_table, load_weather_table, LoadReport, MatchTable, WeatherTable};
pub use schema::{MatchRecord, MergedRecord, TempBucket, WeatherRecord};
pub use summary::Summary;
