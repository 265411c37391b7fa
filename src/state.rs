use std::path::PathBuf;
use std::sync::Arc;

use steam_explorer::data::series::ChartKind;
use steam_explorer::{Analysis, DatasetCache, FilterSpec, GameTable, Platform};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded base tables, keyed by source identity.
    pub cache: DatasetCache,

    /// File the current analysis came from.
    pub source: Option<PathBuf>,

    /// Current sidebar selections.
    pub filters: FilterSpec,

    /// Filtered table, metrics and chart series for `filters` (None until a
    /// file is loaded).
    pub analysis: Option<Analysis>,

    /// Colour per main genre of the base table.
    pub genre_colors: Option<ColorMap>,

    /// Chart shown in the central panel.
    pub chart: ChartKind,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cache: DatasetCache::new(),
            source: None,
            filters: FilterSpec::default(),
            analysis: None,
            genre_colors: None,
            chart: ChartKind::TimeTrend,
            status_message: None,
        }
    }
}

impl AppState {
    /// Load `path` (through the cache) and reset the filters to its bounds.
    /// Switching files drops the previous file's cached table.
    pub fn open(&mut self, path: PathBuf) {
        match self.cache.get_or_load(&path) {
            Ok(base) => {
                if let Some(previous) = self.source.take().filter(|p| *p != path) {
                    self.cache.invalidate(&previous);
                }
                self.set_base(base);
                self.source = Some(path);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Drop the cached table for the current file and load it again.
    pub fn reload(&mut self) {
        if let Some(path) = self.source.clone() {
            self.cache.invalidate(&path);
            self.open(path);
        }
    }

    /// Ingest a newly loaded base table, initialise filters and colours.
    fn set_base(&mut self, base: Arc<GameTable>) {
        self.filters = FilterSpec::for_table(&base);
        self.genre_colors = Some(ColorMap::new(&base.genres()));
        self.analysis = Some(Analysis::new(base, &self.filters));
    }

    pub fn base(&self) -> Option<&Arc<GameTable>> {
        self.analysis.as_ref().map(|a| &a.base)
    }

    /// Recompute filtered table, metrics and charts after a filter change.
    pub fn refilter(&mut self) {
        if let Some(base) = self.base().cloned() {
            self.analysis = Some(Analysis::new(base, &self.filters));
        }
    }

    pub fn toggle_genre(&mut self, genre: &str) {
        self.filters.toggle_genre(genre);
        self.refilter();
    }

    pub fn toggle_platform(&mut self, platform: Platform) {
        self.filters.toggle_platform(platform);
        self.refilter();
    }

    /// Select every genre of the base table.
    pub fn select_all_genres(&mut self) {
        let Some(genres) = self.base().map(|b| b.genres()) else {
            return;
        };
        self.filters.selected_genres = genres;
        self.refilter();
    }

    /// Clear the genre selection, which means "no genre constraint".
    pub fn select_no_genres(&mut self) {
        self.filters.selected_genres.clear();
        self.refilter();
    }
}
