use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::model::GameTable;

/// Placeholder for `year_range` when the table has no rows.
pub const NO_YEAR_RANGE: &str = "N/A";

/// Summary statistics for one table snapshot.
///
/// Over an empty table every mean and percentage is `0.0`, every count is
/// `0` and the peak/slow keys are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub total_games: usize,
    pub free_game_percentage: f64,
    pub avg_rating: f64,
    pub year_range: String,

    pub peak_year: Option<i32>,
    pub peak_year_count: usize,

    /// Mean and median over paid games only.
    pub avg_price: f64,
    pub median_price: f64,

    pub windows_games: usize,
    pub mac_games: usize,
    pub linux_games: usize,
    pub multi_platform_games: usize,

    pub top_genres: Vec<String>,
    pub unique_genres: usize,

    pub peak_month: Option<u32>,
    pub peak_month_count: usize,
    pub slow_month: Option<u32>,
    pub slow_month_count: usize,
}

/// Compute the metrics snapshot for a table.
pub fn compute(table: &GameTable) -> MetricsSnapshot {
    let total_games = table.len();

    let free = table.iter().filter(|g| g.is_free()).count();
    let ratio_sum: f64 = table.iter().map(|g| g.positive_ratio).sum();

    let year_range = match table.year_bounds() {
        Some((min, max)) => format!("{min}-{max}"),
        None => NO_YEAR_RANGE.to_string(),
    };

    let yearly = count_by(table.iter().map(|g| g.release_year));
    let (peak_year, peak_year_count) = peak(&yearly).unzip();

    let mut paid: Vec<f64> = table
        .iter()
        .filter(|g| g.price > 0.0)
        .map(|g| g.price)
        .collect();
    let avg_price = mean(paid.iter().sum(), paid.len());
    let median_price = median(&mut paid);

    let genres = genre_frequencies(table);

    let monthly = count_by(table.iter().map(|g| g.release_month));
    let (peak_month, peak_month_count) = peak(&monthly).unzip();
    let (slow_month, slow_month_count) = trough(&monthly).unzip();

    MetricsSnapshot {
        total_games,
        free_game_percentage: 100.0 * mean(free as f64, total_games),
        avg_rating: 100.0 * mean(ratio_sum, total_games),
        year_range,
        peak_year,
        peak_year_count: peak_year_count.unwrap_or(0),
        avg_price,
        median_price,
        windows_games: table.iter().filter(|g| g.windows_support).count(),
        mac_games: table.iter().filter(|g| g.mac_support).count(),
        linux_games: table.iter().filter(|g| g.linux_support).count(),
        multi_platform_games: table.iter().filter(|g| g.multi_platform()).count(),
        top_genres: genres.iter().take(5).map(|(g, _)| g.clone()).collect(),
        unique_genres: genres.len(),
        peak_month,
        peak_month_count: peak_month_count.unwrap_or(0),
        slow_month,
        slow_month_count: slow_month_count.unwrap_or(0),
    }
}

// ---------------------------------------------------------------------------
// Aggregation helpers (shared with the chart series)
// ---------------------------------------------------------------------------

/// Mean that is 0 over zero items.
pub(crate) fn mean(sum: f64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Median that is 0 over zero items. Sorts `values` in place.
pub(crate) fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Row count per key, in ascending key order.
pub(crate) fn count_by<K: Ord>(keys: impl Iterator<Item = K>) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Key with the highest count; the lowest key wins ties.
pub(crate) fn peak<K: Copy>(counts: &BTreeMap<K, usize>) -> Option<(K, usize)> {
    counts
        .iter()
        .fold(None, |best: Option<(K, usize)>, (&k, &n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((k, n)),
        })
}

/// Key with the lowest count; the lowest key wins ties.
pub(crate) fn trough<K: Copy>(counts: &BTreeMap<K, usize>) -> Option<(K, usize)> {
    counts
        .iter()
        .fold(None, |best: Option<(K, usize)>, (&k, &n)| match best {
            Some((_, m)) if m <= n => best,
            _ => Some((k, n)),
        })
}

/// Main genres by descending frequency. Equal counts keep the order in which
/// the genres first appear in the table. Rows without a genre are skipped.
pub(crate) fn genre_frequencies(table: &GameTable) -> Vec<(String, usize)> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for genre in table.iter().filter_map(|g| g.main_genre.as_deref()) {
        match slot.get(genre) {
            Some(&i) => order[i].1 += 1,
            None => {
                slot.insert(genre, order.len());
                order.push((genre.to_string(), 1));
            }
        }
    }

    // stable: ties stay in first-seen order
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
}
