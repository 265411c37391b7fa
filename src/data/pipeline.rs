use std::path::Path;
use std::sync::Arc;

use super::cache::DatasetCache;
use super::error::LoadError;
use super::filter::{self, FilterSpec};
use super::metrics::{self, MetricsSnapshot};
use super::model::GameTable;
use super::series::{self, ChartSet};

/// Everything one filter request produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The shared, unfiltered source table.
    pub base: Arc<GameTable>,
    pub filtered: GameTable,
    pub metrics: MetricsSnapshot,
    pub charts: ChartSet,
}

impl Analysis {
    /// Run filter → metrics → charts against an already loaded table.
    pub fn new(base: Arc<GameTable>, spec: &FilterSpec) -> Self {
        let filtered = filter::apply(&base, spec);
        let metrics = metrics::compute(&filtered);
        let charts = series::build_charts(&filtered);
        Analysis {
            base,
            filtered,
            metrics,
            charts,
        }
    }
}

/// Load `path` through `cache`, then analyse it under `spec`.
pub fn analyze(
    cache: &mut DatasetCache,
    path: &Path,
    spec: &FilterSpec,
) -> Result<Analysis, LoadError> {
    let base = cache.get_or_load(path)?;
    Ok(Analysis::new(base, spec))
}
