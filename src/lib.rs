//! Steam catalog explorer core.
//!
//! Everything needed to turn a catalog export into filtered tables, summary
//! metrics and chart series lives under [`data`]. The desktop viewer in
//! `main.rs` only renders what this crate computes.

pub mod data;

pub use data::cache::DatasetCache;
pub use data::error::LoadError;
pub use data::filter::FilterSpec;
pub use data::metrics::MetricsSnapshot;
pub use data::model::{GameRecord, GameTable, Platform};
pub use data::pipeline::{analyze, Analysis};
