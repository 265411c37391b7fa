//! End-to-end behaviour of load → filter → metrics.

mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use common::{catalog, row, table, write_csv};
use steam_explorer::data::filter;
use steam_explorer::data::metrics;
use steam_explorer::{analyze, Analysis, DatasetCache, FilterSpec, GameTable, Platform};

#[test]
fn two_game_scenario() {
    let t = table(vec![
        row("Free RPG", "2015-04-01", 0.0, "RPG", "windows"),
        row("Paid Action", "2016-04-01", 10.0, "Action", "windows;mac"),
    ]);
    let m = metrics::compute(&t);

    assert_eq!(m.total_games, 2);
    assert_eq!(m.free_game_percentage, 50.0);
    assert_eq!(m.peak_year, Some(2015));
    assert_eq!(m.peak_year_count, 1);
    assert_eq!(m.multi_platform_games, 1);
}

#[test]
fn owners_are_collapsed_to_midpoints() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "owners.csv",
        &[
            "Range,2015-01-01,1.0,1,1,1000000-2000000,Action,windows,P,0,0",
            "Single,2015-01-01,1.0,1,1,500000,Action,windows,P,0,0",
            "Unknown,2015-01-01,1.0,1,1,N/A,Action,windows,P,0,0",
        ],
    );

    let t = steam_explorer::data::loader::load_file(&path).unwrap();
    let owners: Vec<f64> = t.iter().map(|g| g.owners_median()).collect();
    assert_eq!(owners, [1_500_000.0, 500_000.0, 0.0]);
}

#[test]
fn derived_columns_hold_their_invariants() {
    let t = catalog();
    for g in &t {
        assert!((0.0..=1.0).contains(&g.positive_ratio));
        assert_eq!(g.positive_ratio == 0.0, g.total_ratings == 0 || g.positive_ratings == 0);
        assert!(g.owners_median() >= 0.0);
        let flags = [g.windows_support, g.mac_support, g.linux_support];
        assert_eq!(g.multi_platform(), flags.iter().filter(|f| **f).count() >= 2);
        assert!(g.main_genre.is_some());
    }
}

#[test]
fn full_selection_returns_table_unchanged() {
    let t = catalog();
    let spec = FilterSpec {
        year_range: (2012, 2018),
        price_range: (0.0, 59.99),
        selected_genres: t.genres(),
        selected_platforms: Platform::ALL.into_iter().collect(),
    };
    assert_eq!(filter::apply(&t, &spec), t);
    assert_eq!(filter::apply(&t, &FilterSpec::for_table(&t)), t);
}

#[test]
fn empty_genre_selection_means_all_genres() {
    let t = catalog();
    let all = FilterSpec {
        selected_genres: t.genres(),
        ..FilterSpec::default()
    };
    let none = FilterSpec {
        selected_genres: BTreeSet::new(),
        ..FilterSpec::default()
    };
    assert_eq!(filter::apply(&t, &none), filter::apply(&t, &all));
    assert_eq!(filter::apply(&t, &none).len(), t.len());
}

#[test]
fn filtering_twice_equals_filtering_once() {
    let t = catalog();
    let spec = FilterSpec {
        year_range: (2014, 2018),
        price_range: (0.0, 20.0),
        selected_genres: ["Indie", "Casual", "RPG"].into_iter().map(String::from).collect(),
        selected_platforms: [Platform::Linux, Platform::Mac].into_iter().collect(),
    };
    let once = filter::apply(&t, &spec);
    let names: Vec<&str> = once.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["Bravo", "Charlie", "Foxtrot"]);
    assert_eq!(filter::apply(&once, &spec), once);
}

#[test]
fn total_games_tracks_filtered_length() {
    let base = Arc::new(catalog());
    for platform in Platform::ALL {
        let spec = FilterSpec {
            selected_platforms: [platform].into_iter().collect(),
            ..FilterSpec::default()
        };
        let analysis = Analysis::new(Arc::clone(&base), &spec);
        assert_eq!(analysis.metrics.total_games, analysis.filtered.len());
    }
}

#[test]
fn empty_source_flows_through_every_stage() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "empty.csv", &[]);

    let mut cache = DatasetCache::new();
    let analysis = analyze(&mut cache, &path, &FilterSpec::default()).unwrap();
    assert!(analysis.base.is_empty());
    assert!(analysis.filtered.is_empty());

    let m = &analysis.metrics;
    assert_eq!(m.total_games, 0);
    for value in [m.free_game_percentage, m.avg_rating, m.avg_price, m.median_price] {
        assert_eq!(value, 0.0);
    }
    assert_eq!(m.peak_year, None);
    assert_eq!(m.peak_month, None);

    let spec = FilterSpec::for_table(&GameTable::default());
    assert!(filter::apply(&analysis.base, &spec).is_empty());
}

#[test]
fn analyze_reuses_cached_base_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "games.csv",
        &[
            "A,2015-01-01,0,10,0,0-20000,Action,windows,P,5,0",
            "B,2017-05-01,15,3,1,20000-50000,RPG,mac;linux,Q,50,3",
        ],
    );

    let mut cache = DatasetCache::new();
    let everything = analyze(&mut cache, &path, &FilterSpec::default()).unwrap();
    let paid = analyze(
        &mut cache,
        &path,
        &FilterSpec {
            price_range: (0.01, f64::INFINITY),
            ..FilterSpec::default()
        },
    )
    .unwrap();

    assert!(Arc::ptr_eq(&everything.base, &paid.base));
    assert_eq!(everything.metrics.total_games, 2);
    assert_eq!(paid.metrics.total_games, 1);
    assert_eq!(paid.metrics.avg_price, 15.0);
    assert_eq!(paid.metrics.multi_platform_games, 1);
}

#[test]
fn bad_dates_abort_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "broken.csv",
        &["A,someday,0,10,0,0-20000,Action,windows,P,5,0"],
    );
    let mut cache = DatasetCache::new();
    let err = analyze(&mut cache, &path, &FilterSpec::default()).unwrap_err();
    assert!(matches!(err, steam_explorer::LoadError::InvalidDate { row: 0, .. }));
    assert!(cache.is_empty());
}
