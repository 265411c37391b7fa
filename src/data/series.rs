//! Chart-ready series derived from a table snapshot.
//!
//! Nothing here knows how a chart is drawn; the viewer turns these series
//! into plots and the headless report serializes them as-is.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::metrics::{count_by, genre_frequencies, mean};
use super::model::{GameRecord, GameTable, Platform};

const TOP_GENRES: usize = 15;
const TOP_PUBLISHERS: usize = 15;
const SMALL_MULTIPLE_GENRES: usize = 6;
const MAX_SCATTER_PRICE: f64 = 100.0;
const MIN_RATINGS_FOR_ENGAGEMENT: u64 = 10;

/// The fixed set of charts the viewer offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChartKind {
    TimeTrend,
    PriceVsSales,
    RatingVsPlaytime,
    GenreDistribution,
    PublisherRanking,
    PlatformSupport,
    FreeVsPaid,
    MonthlyTrend,
    GenreSmallMultiples,
}

impl ChartKind {
    pub const ALL: [ChartKind; 9] = [
        ChartKind::TimeTrend,
        ChartKind::PriceVsSales,
        ChartKind::RatingVsPlaytime,
        ChartKind::GenreDistribution,
        ChartKind::PublisherRanking,
        ChartKind::PlatformSupport,
        ChartKind::FreeVsPaid,
        ChartKind::MonthlyTrend,
        ChartKind::GenreSmallMultiples,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::TimeTrend => "Releases per year",
            ChartKind::PriceVsSales => "Price vs. owners",
            ChartKind::RatingVsPlaytime => "Rating vs. playtime",
            ChartKind::GenreDistribution => "Top genres",
            ChartKind::PublisherRanking => "Top publishers",
            ChartKind::PlatformSupport => "Platform support",
            ChartKind::FreeVsPaid => "Free vs. paid",
            ChartKind::MonthlyTrend => "Releases per month",
            ChartKind::GenreSmallMultiples => "Price vs. rating by genre",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ---------------------------------------------------------------------------
// Series types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountPoint<K> {
    pub key: K,
    pub count: usize,
}

/// A labelled scatter point; `label` is the game name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublisherStats {
    pub publisher: String,
    pub game_count: usize,
    pub mean_positive_ratio: f64,
    pub mean_owners: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceGroupStats {
    pub is_free: bool,
    pub game_count: usize,
    pub mean_positive_ratio: f64,
    pub mean_playtime: f64,
    pub mean_owners: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenrePoint {
    pub price: f64,
    pub positive_ratio: f64,
    pub name: String,
    pub release_year: i32,
}

/// Points for one panel of the genre small multiples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenrePanel {
    pub genre: String,
    pub points: Vec<GenrePoint>,
}

/// Every chart's series for one table snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSet {
    pub time_trend: Vec<CountPoint<i32>>,
    pub price_vs_sales: Vec<ScatterPoint>,
    pub rating_vs_playtime: Vec<ScatterPoint>,
    pub genre_distribution: Vec<CountPoint<String>>,
    pub publisher_ranking: Vec<PublisherStats>,
    pub platform_support: Vec<CountPoint<Platform>>,
    pub free_vs_paid: Vec<PriceGroupStats>,
    pub monthly_trend: Vec<CountPoint<u32>>,
    pub genre_small_multiples: Vec<GenrePanel>,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Build every chart series for a table.
pub fn build_charts(table: &GameTable) -> ChartSet {
    let genres = genre_frequencies(table);

    ChartSet {
        time_trend: counts(table.iter().map(|g| g.release_year)),
        price_vs_sales: price_vs_sales(table),
        rating_vs_playtime: rating_vs_playtime(table),
        genre_distribution: genres
            .iter()
            .take(TOP_GENRES)
            .map(|(genre, count)| CountPoint {
                key: genre.clone(),
                count: *count,
            })
            .collect(),
        publisher_ranking: publisher_ranking(table),
        platform_support: Platform::ALL
            .into_iter()
            .map(|p| CountPoint {
                key: p,
                count: table.iter().filter(|g| g.supports(p)).count(),
            })
            .collect(),
        free_vs_paid: free_vs_paid(table),
        monthly_trend: counts(table.iter().map(|g| g.release_month)),
        genre_small_multiples: genre_small_multiples(table, &genres),
    }
}

fn counts<K: Ord>(keys: impl Iterator<Item = K>) -> Vec<CountPoint<K>> {
    count_by(keys)
        .into_iter()
        .map(|(key, count)| CountPoint { key, count })
        .collect()
}

fn price_vs_sales(table: &GameTable) -> Vec<ScatterPoint> {
    table
        .iter()
        .filter(|g| (0.0..=MAX_SCATTER_PRICE).contains(&g.price) && g.owners_median() > 0.0)
        .map(|g| ScatterPoint {
            x: g.price,
            y: g.owners_median(),
            label: g.name.clone(),
        })
        .collect()
}

fn rating_vs_playtime(table: &GameTable) -> Vec<ScatterPoint> {
    table
        .iter()
        .filter(|g| g.average_playtime > 0.0 && g.total_ratings > MIN_RATINGS_FOR_ENGAGEMENT)
        .map(|g| ScatterPoint {
            x: g.positive_ratio,
            y: g.average_playtime,
            label: g.name.clone(),
        })
        .collect()
}

/// Publishers with the most games. Equal counts are ordered by name.
fn publisher_ranking(table: &GameTable) -> Vec<PublisherStats> {
    let mut groups: BTreeMap<&str, Vec<&GameRecord>> = BTreeMap::new();
    for game in table.iter() {
        if let Some(publisher) = game.publisher.as_deref() {
            groups.entry(publisher).or_default().push(game);
        }
    }

    let mut stats: Vec<PublisherStats> = groups
        .into_iter()
        .map(|(publisher, games)| PublisherStats {
            publisher: publisher.to_string(),
            game_count: games.len(),
            mean_positive_ratio: mean(games.iter().map(|g| g.positive_ratio).sum(), games.len()),
            mean_owners: mean(games.iter().map(|g| g.owners_median()).sum(), games.len()),
        })
        .collect();

    stats.sort_by(|a, b| b.game_count.cmp(&a.game_count));
    stats.truncate(TOP_PUBLISHERS);
    stats
}

/// Paid group first, then free; groups with no games are omitted.
fn free_vs_paid(table: &GameTable) -> Vec<PriceGroupStats> {
    [false, true]
        .into_iter()
        .filter_map(|is_free| {
            let games: Vec<&GameRecord> = table.iter().filter(|g| g.is_free() == is_free).collect();
            let n = games.len();
            (n > 0).then(|| PriceGroupStats {
                is_free,
                game_count: n,
                mean_positive_ratio: mean(games.iter().map(|g| g.positive_ratio).sum(), n),
                mean_playtime: mean(games.iter().map(|g| g.average_playtime).sum(), n),
                mean_owners: mean(games.iter().map(|g| g.owners_median()).sum(), n),
            })
        })
        .collect()
}

fn genre_small_multiples(table: &GameTable, genres: &[(String, usize)]) -> Vec<GenrePanel> {
    genres
        .iter()
        .take(SMALL_MULTIPLE_GENRES)
        .map(|(genre, _)| GenrePanel {
            genre: genre.clone(),
            points: table
                .iter()
                .filter(|g| g.main_genre.as_deref() == Some(genre.as_str()))
                .map(|g| GenrePoint {
                    price: g.price,
                    positive_ratio: g.positive_ratio,
                    name: g.name.clone(),
                    release_year: g.release_year,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{game, table};

    fn sample() -> GameTable {
        let mut games = vec![
            game("A", "2015-01-01", 0.0, "Action", "windows"),
            game("B", "2015-06-01", 9.99, "Action", "windows;mac"),
            game("C", "2016-06-01", 150.0, "RPG", "linux"),
            game("D", "2017-02-01", 5.0, "Indie", "windows;linux"),
        ];
        games[1].publisher = Some("Zeta".into());
        games[2].publisher = None;
        games[3].owners_estimate = None;
        games[3].average_playtime = 0.0;
        table(games)
    }

    #[test]
    fn time_and_month_trends_are_sorted() {
        let charts = build_charts(&sample());
        let years: Vec<_> = charts.time_trend.iter().map(|p| (p.key, p.count)).collect();
        assert_eq!(years, [(2015, 2), (2016, 1), (2017, 1)]);
        let months: Vec<_> = charts.monthly_trend.iter().map(|p| (p.key, p.count)).collect();
        assert_eq!(months, [(1, 1), (2, 1), (6, 2)]);
    }

    #[test]
    fn price_vs_sales_skips_expensive_and_unknown_owners() {
        let charts = build_charts(&sample());
        let labels: Vec<_> = charts.price_vs_sales.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["A", "B"]);
        assert_eq!(charts.price_vs_sales[0].y, 35_000.0);
    }

    #[test]
    fn rating_vs_playtime_needs_playtime_and_ratings() {
        let charts = build_charts(&sample());
        let labels: Vec<_> = charts.rating_vs_playtime.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["A", "B", "C"]);
    }

    #[test]
    fn publisher_ranking_groups_and_skips_missing() {
        let charts = build_charts(&sample());
        let ranking: Vec<_> = charts
            .publisher_ranking
            .iter()
            .map(|p| (p.publisher.as_str(), p.game_count))
            .collect();
        assert_eq!(ranking, [("Valve", 2), ("Zeta", 1)]);
        let valve = &charts.publisher_ranking[0];
        assert!((valve.mean_positive_ratio - 0.9).abs() < 1e-12);
        // D's unknown owners count as zero in the mean
        assert_eq!(valve.mean_owners, 17_500.0);
    }

    #[test]
    fn platform_support_counts_each_platform() {
        let charts = build_charts(&sample());
        let counts: Vec<_> = charts.platform_support.iter().map(|p| (p.key, p.count)).collect();
        assert_eq!(
            counts,
            [(Platform::Windows, 3), (Platform::Mac, 1), (Platform::Linux, 2)]
        );
    }

    #[test]
    fn free_vs_paid_lists_paid_first() {
        let charts = build_charts(&sample());
        let groups: Vec<_> = charts.free_vs_paid.iter().map(|g| (g.is_free, g.game_count)).collect();
        assert_eq!(groups, [(false, 3), (true, 1)]);
        assert_eq!(charts.free_vs_paid[1].mean_playtime, 120.0);
    }

    #[test]
    fn small_multiples_follow_genre_frequency() {
        let charts = build_charts(&sample());
        let panels: Vec<_> = charts
            .genre_small_multiples
            .iter()
            .map(|p| (p.genre.as_str(), p.points.len()))
            .collect();
        assert_eq!(panels, [("Action", 2), ("RPG", 1), ("Indie", 1)]);
    }

    #[test]
    fn empty_table_gives_empty_series() {
        let charts = build_charts(&GameTable::default());
        assert!(charts.time_trend.is_empty());
        assert!(charts.free_vs_paid.is_empty());
        assert!(charts.platform_support.iter().all(|p| p.count == 0));
    }
}
