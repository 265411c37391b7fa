//! Data layer: core types, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐     ┌─────────┐
//!   │  loader   │◄────│  cache   │  keyed by path + mtime + size
//!   └──────────┘     └─────────┘
//!        │  RawGameRow → GameRecord (derived columns)
//!        ▼
//!   ┌──────────┐
//!   │ GameTable │  Vec<GameRecord>, shared as Arc
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  FilterSpec → filtered GameTable
//!   └──────────┘
//!        │
//!        ├──────────────┬──────────────┐
//!        ▼              ▼              ▼
//!   ┌──────────┐  ┌──────────┐  ┌──────────┐
//!   │ metrics  │  │  series   │  │ quality  │
//!   └──────────┘  └──────────┘  └──────────┘
//! ```
//!
//! [`pipeline`] wires the stages together for callers.

pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod quality;
pub mod series;

#[cfg(test)]
pub(crate) mod fixtures;
