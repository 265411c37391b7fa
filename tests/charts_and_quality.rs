//! Chart series and data quality over the shared catalog fixture.

mod common;

use common::{catalog, row, table};
use steam_explorer::data::quality;
use steam_explorer::data::series::{build_charts, ChartKind};
use steam_explorer::data::metrics;
use steam_explorer::Platform;

#[test]
fn genre_distribution_agrees_with_top_genres() {
    let t = catalog();
    let charts = build_charts(&t);
    let m = metrics::compute(&t);

    let chart_genres: Vec<&str> = charts
        .genre_distribution
        .iter()
        .map(|p| p.key.as_str())
        .collect();
    let top: Vec<&str> = m.top_genres.iter().map(String::as_str).collect();
    assert_eq!(&chart_genres[..top.len()], top.as_slice());
    assert_eq!(top[0], "Action");
}

#[test]
fn platform_support_matches_metric_counts() {
    let t = catalog();
    let charts = build_charts(&t);
    let m = metrics::compute(&t);

    for p in &charts.platform_support {
        let expected = match p.key {
            Platform::Windows => m.windows_games,
            Platform::Mac => m.mac_games,
            Platform::Linux => m.linux_games,
        };
        assert_eq!(p.count, expected);
    }
}

#[test]
fn yearly_trend_sums_to_row_count() {
    let t = catalog();
    let charts = build_charts(&t);
    let total: usize = charts.time_trend.iter().map(|p| p.count).sum();
    assert_eq!(total, t.len());
    let monthly: usize = charts.monthly_trend.iter().map(|p| p.count).sum();
    assert_eq!(monthly, t.len());
}

#[test]
fn every_chart_kind_has_a_title() {
    for kind in ChartKind::ALL {
        assert!(!kind.title().is_empty());
    }
}

#[test]
fn quality_report_flags_missing_publishers() {
    let mut orphan = row("Orphan", "2016-01-01", 1.0, "Indie", "windows");
    orphan.publisher = None;
    let t = table(vec![
        row("A", "2016-01-01", 1.0, "Indie", "windows"),
        orphan,
    ]);

    let r = quality::report(&t);
    assert_eq!(r.missing_by_column.len(), 1);
    assert_eq!(r.missing_by_column[0].column, "publisher");
    assert_eq!(r.complete_percentage, 50.0);
    assert_eq!(r.duplicate_records, 0);
}
