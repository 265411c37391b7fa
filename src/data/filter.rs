use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::model::{GameRecord, GameTable, Platform};

// ---------------------------------------------------------------------------
// FilterSpec: one request's worth of sidebar selections
// ---------------------------------------------------------------------------

/// User-chosen constraints narrowing the working table.
///
/// Ranges are inclusive at both ends. An empty genre or platform set means
/// "no constraint", matching a multi-select where nothing is picked.
///
/// Serialized price bounds that are open (infinite) are written as `null`
/// and read back as open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub year_range: (i32, i32),
    #[serde(with = "price_bounds")]
    pub price_range: (f64, f64),
    pub selected_genres: BTreeSet<String>,
    pub selected_platforms: BTreeSet<Platform>,
}

impl Default for FilterSpec {
    /// A spec that lets every row through.
    fn default() -> Self {
        FilterSpec {
            year_range: (i32::MIN, i32::MAX),
            price_range: (f64::NEG_INFINITY, f64::INFINITY),
            selected_genres: BTreeSet::new(),
            selected_platforms: BTreeSet::new(),
        }
    }
}

impl FilterSpec {
    /// Sidebar defaults for a freshly loaded table: full year span, price
    /// from 0 to the maximum, every genre and every platform selected.
    pub fn for_table(table: &GameTable) -> Self {
        FilterSpec {
            year_range: table.year_bounds().unwrap_or((0, 0)),
            price_range: (0.0, table.max_price()),
            selected_genres: table.genres(),
            selected_platforms: Platform::ALL.into_iter().collect(),
        }
    }

    /// Whether a single game passes every constraint.
    pub fn matches(&self, game: &GameRecord) -> bool {
        let (y0, y1) = self.year_range;
        let (p0, p1) = self.price_range;

        if game.release_year < y0 || game.release_year > y1 {
            return false;
        }
        if !(p0 <= game.price && game.price <= p1) {
            return false;
        }
        if !self.selected_genres.is_empty() {
            match &game.main_genre {
                Some(genre) if self.selected_genres.contains(genre) => {}
                _ => return false,
            }
        }
        if !self.selected_platforms.is_empty()
            && !self.selected_platforms.iter().any(|p| game.supports(*p))
        {
            return false;
        }
        true
    }

    pub fn toggle_genre(&mut self, genre: &str) {
        if !self.selected_genres.remove(genre) {
            self.selected_genres.insert(genre.to_string());
        }
    }

    pub fn toggle_platform(&mut self, platform: Platform) {
        if !self.selected_platforms.remove(&platform) {
            self.selected_platforms.insert(platform);
        }
    }
}

mod price_bounds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    fn finite(v: f64) -> Option<f64> {
        v.is_finite().then_some(v)
    }

    pub fn serialize<S: Serializer>(range: &(f64, f64), s: S) -> Result<S::Ok, S::Error> {
        (finite(range.0), finite(range.1)).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<(f64, f64), D::Error> {
        let (lo, hi) = <(Option<f64>, Option<f64>)>::deserialize(d)?;
        Ok((lo.unwrap_or(f64::NEG_INFINITY), hi.unwrap_or(f64::INFINITY)))
    }
}

/// Return indices of games that pass the filter, in table order.
pub fn filtered_indices(table: &GameTable, spec: &FilterSpec) -> Vec<usize> {
    table
        .games
        .iter()
        .enumerate()
        .filter(|(_, g)| spec.matches(g))
        .map(|(i, _)| i)
        .collect()
}

/// Build a new table from the games that pass the filter. The input is
/// left untouched.
pub fn apply(table: &GameTable, spec: &FilterSpec) -> GameTable {
    let games: Vec<GameRecord> = filtered_indices(table, spec)
        .into_iter()
        .map(|i| table.games[i].clone())
        .collect();
    log::debug!("filter kept {} of {} games", games.len(), table.len());
    GameTable::from_games(games)
}
