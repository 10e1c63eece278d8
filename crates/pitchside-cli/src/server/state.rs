//! Application state for the API server.

use std::sync::Arc;
use tokio::sync::RwLock;

use pitchside::{Pitchside, PreparedCache, PreparedData};

/// Shared application state.
///
/// The prepared table lives behind the explicit preparation cache: filter
/// queries reuse it, and the reload endpoint is the invalidation path
/// when a source file changes on disk.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pitchside>,
    cache: Arc<RwLock<PreparedCache>>,
}

impl AppState {
    pub fn new(pipeline: Pitchside) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            cache: Arc::new(RwLock::new(PreparedCache::new())),
        }
    }

    /// The prepared table, from cache when the source files are unchanged.
    pub async fn prepared(&self) -> pitchside::Result<Arc<PreparedData>> {
        let mut cache = self.cache.write().await;
        cache.get_or_prepare(&self.pipeline)
    }

    /// Drop the cached table and re-run the pipeline.
    pub async fn reload(&self) -> pitchside::Result<Arc<PreparedData>> {
        let mut cache = self.cache.write().await;
        cache.invalidate();
        cache.get_or_prepare(&self.pipeline)
    }
}
