//! Top-level pipeline and the preparation cache.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::input::{hash_file, Parser, ParserConfig, SourceMetadata};
use crate::join::{join_match_weather, MergedTable};
use crate::load::{load_match_table, load_weather_table, LoadReport};

/// Configuration for a pipeline run.
#[derive(Debug, Clone)]
pub struct PitchsideConfig {
    /// Parser configuration, shared by both source files.
    pub parser: ParserConfig,
    /// Path to the match table.
    pub match_path: PathBuf,
    /// Path to the weather table.
    pub weather_path: PathBuf,
}

/// Everything the pipeline produces from one run.
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub merged: MergedTable,
    pub match_report: LoadReport,
    pub weather_report: LoadReport,
    pub match_source: SourceMetadata,
    pub weather_source: SourceMetadata,
}

/// The data-preparation pipeline: parse both files, normalize, join.
///
/// Each transform consumes an immutable input and produces a new output;
/// running the pipeline twice over unchanged files yields identical
/// merged tables.
pub struct Pitchside {
    config: PitchsideConfig,
    parser: Parser,
}

impl Pitchside {
    /// Create a pipeline over the two source files with default parsing.
    pub fn new(match_path: impl Into<PathBuf>, weather_path: impl Into<PathBuf>) -> Self {
        Self::with_config(PitchsideConfig {
            parser: ParserConfig::default(),
            match_path: match_path.into(),
            weather_path: weather_path.into(),
        })
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: PitchsideConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &PitchsideConfig {
        &self.config
    }

    /// Run the full pipeline: load, normalize, and join both tables.
    ///
    /// Schema failures abort immediately; row-level normalization
    /// failures are absorbed into the load reports. A zero-row join is a
    /// valid outcome.
    pub fn prepare(&self) -> Result<PreparedData> {
        let (match_raw, match_source) = self.parser.parse_file(&self.config.match_path)?;
        let (weather_raw, weather_source) = self.parser.parse_file(&self.config.weather_path)?;

        let matches = load_match_table(&match_raw)?;
        let weather = load_weather_table(&weather_raw)?;

        let merged = join_match_weather(&matches, &weather);

        tracing::info!(
            match_rows = matches.report.rows_kept,
            weather_rows = weather.report.rows_kept,
            merged_rows = merged.len(),
            "pipeline complete"
        );

        Ok(PreparedData {
            merged,
            match_report: matches.report,
            weather_report: weather.report,
            match_source,
            weather_source,
        })
    }
}

/// Explicit memoization boundary around [`Pitchside::prepare`].
///
/// The cache key is the pair of SHA-256 content hashes of the source
/// files: filter interactions reuse the cached table, while an edited
/// source file misses the key and re-runs the pipeline. `invalidate`
/// drops the entry unconditionally for callers that want to force a
/// re-prepare.
pub struct PreparedCache {
    entry: Option<CacheEntry>,
}

struct CacheEntry {
    match_hash: String,
    weather_hash: String,
    data: Arc<PreparedData>,
}

impl PreparedCache {
    pub fn new() -> Self {
        Self { entry: None }
    }

    /// Return the cached table when both source files are unchanged,
    /// re-running the pipeline otherwise.
    pub fn get_or_prepare(&mut self, pipeline: &Pitchside) -> Result<Arc<PreparedData>> {
        let match_hash = hash_file(&pipeline.config().match_path)?;
        let weather_hash = hash_file(&pipeline.config().weather_path)?;

        if let Some(entry) = &self.entry {
            if entry.match_hash == match_hash && entry.weather_hash == weather_hash {
                tracing::debug!("prepared table reused from cache");
                return Ok(Arc::clone(&entry.data));
            }
        }

        let data = Arc::new(pipeline.prepare()?);
        self.entry = Some(CacheEntry {
            match_hash,
            weather_hash,
            data: Arc::clone(&data),
        });
        Ok(data)
    }

    /// Drop the cached entry; the next lookup re-runs the pipeline.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

impl Default for PreparedCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn sample_files() -> (NamedTempFile, NamedTempFile) {
        let matches = write_file(
            "date,city,total_runs\n\
             2021-04-10,Mumbai,180\n\
             2021-04-11,Delhi,165\n",
        );
        let weather = write_file(
            "date,city,temp_c,humidity\n\
             2021-04-10,Mumbai,32,60\n\
             2021-04-11,Delhi,28,55\n",
        );
        (matches, weather)
    }

    #[test]
    fn prepare_end_to_end() {
        let (m, w) = sample_files();
        let pipeline = Pitchside::new(m.path(), w.path());
        let prepared = pipeline.prepare().unwrap();

        assert_eq!(prepared.merged.len(), 2);
        assert_eq!(prepared.match_report.rows_kept, 2);
        assert_eq!(prepared.weather_report.rows_kept, 2);
        assert!(prepared.match_source.hash.starts_with("sha256:"));
    }

    #[test]
    fn cache_hit_returns_the_same_table() {
        let (m, w) = sample_files();
        let pipeline = Pitchside::new(m.path(), w.path());
        let mut cache = PreparedCache::new();

        let first = cache.get_or_prepare(&pipeline).unwrap();
        let second = cache.get_or_prepare(&pipeline).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn changed_source_file_misses_the_cache() {
        let (m, w) = sample_files();
        let pipeline = Pitchside::new(m.path(), w.path());
        let mut cache = PreparedCache::new();

        let first = cache.get_or_prepare(&pipeline).unwrap();

        let mut handle = std::fs::OpenOptions::new()
            .append(true)
            .open(m.path())
            .unwrap();
        writeln!(handle, "2021-04-12,Chennai,150").unwrap();

        let second = cache.get_or_prepare(&pipeline).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.match_report.rows_read, 3);
    }

    #[test]
    fn invalidate_forces_a_re_prepare() {
        let (m, w) = sample_files();
        let pipeline = Pitchside::new(m.path(), w.path());
        let mut cache = PreparedCache::new();

        let first = cache.get_or_prepare(&pipeline).unwrap();
        cache.invalidate();
        let second = cache.get_or_prepare(&pipeline).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn repeated_prepares_are_idempotent() {
        let (m, w) = sample_files();
        let pipeline = Pitchside::new(m.path(), w.path());

        let a = pipeline.prepare().unwrap();
        let b = pipeline.prepare().unwrap();
        assert_eq!(a.merged.records, b.merged.records);
        assert_eq!(a.merged.columns, b.merged.columns);
    }
}
