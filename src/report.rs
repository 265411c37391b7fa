use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use steam_explorer::data::quality::{self, QualityReport};
use steam_explorer::data::series::ChartSet;
use steam_explorer::{analyze, DatasetCache, FilterSpec, MetricsSnapshot};

use crate::Args;

// ---------------------------------------------------------------------------
// Headless JSON report
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct Report<'a> {
    source: &'a Path,
    filters: &'a FilterSpec,
    metrics: &'a MetricsSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    charts: Option<&'a ChartSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<QualityReport>,
}

/// Build the filter from the command line. Unset bounds stay open.
pub fn filter_from_args(args: &Args) -> FilterSpec {
    let open = FilterSpec::default();
    FilterSpec {
        year_range: (
            args.year_min.unwrap_or(open.year_range.0),
            args.year_max.unwrap_or(open.year_range.1),
        ),
        price_range: (
            args.price_min.unwrap_or(open.price_range.0),
            args.price_max.unwrap_or(open.price_range.1),
        ),
        selected_genres: args.genres.iter().cloned().collect(),
        selected_platforms: args.platforms.iter().copied().collect(),
    }
}

pub fn run(args: &Args) -> Result<()> {
    let path = args.path.as_deref().context("--report needs a catalog path")?;
    let spec = filter_from_args(args);

    let mut cache = DatasetCache::new();
    let analysis = analyze(&mut cache, path, &spec)
        .with_context(|| format!("loading {}", path.display()))?;

    let report = Report {
        source: path,
        filters: &spec,
        metrics: &analysis.metrics,
        charts: args.charts.then_some(&analysis.charts),
        quality: args.quality.then(|| quality::report(&analysis.filtered)),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &report).context("writing report")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use steam_explorer::Platform;

    use super::*;

    #[test]
    fn flags_map_onto_filter_spec() {
        let args = Args::parse_from([
            "steam-explorer",
            "games.csv",
            "--report",
            "--year-min",
            "2010",
            "--price-max",
            "20",
            "--genre",
            "Action",
            "--genre",
            "RPG",
            "--platform",
            "linux",
        ]);
        let spec = filter_from_args(&args);
        assert_eq!(spec.year_range, (2010, i32::MAX));
        assert_eq!(spec.price_range, (f64::NEG_INFINITY, 20.0));
        assert_eq!(spec.selected_genres.len(), 2);
        assert!(spec.selected_platforms.contains(&Platform::Linux));
    }

    #[test]
    fn no_flags_is_unconstrained() {
        let args = Args::parse_from(["steam-explorer", "games.csv", "--report"]);
        assert_eq!(filter_from_args(&args), FilterSpec::default());
    }
}
