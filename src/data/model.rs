use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::error::LoadError;

/// Source columns every catalog file must provide.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "name",
    "release_date",
    "price",
    "positive_ratings",
    "negative_ratings",
    "owners",
    "genres",
    "platforms",
    "publisher",
    "average_playtime",
    "achievements",
];

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// One of the three tracked desktop platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Platform {
    Windows,
    Mac,
    Linux,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::Mac, Platform::Linux];

    /// Substring looked for in the source `platforms` column.
    pub fn token(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Mac => "mac",
            Platform::Linux => "linux",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::Mac => "Mac",
            Platform::Linux => "Linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.token().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown platform '{s}' (expected windows, mac or linux)"))
    }
}

// ---------------------------------------------------------------------------
// RawGameRow – one row exactly as the source file spells it
// ---------------------------------------------------------------------------

/// The eleven source columns, named as in the export.
///
/// Empty `genres` / `platforms` / `publisher` cells are source nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGameRow {
    pub name: String,
    pub release_date: String,
    pub price: f64,
    pub positive_ratings: u64,
    pub negative_ratings: u64,
    pub owners: String,
    pub genres: Option<String>,
    pub platforms: Option<String>,
    pub publisher: Option<String>,
    pub average_playtime: f64,
    pub achievements: u64,
}

// ---------------------------------------------------------------------------
// GameRecord – a row with its derived columns
// ---------------------------------------------------------------------------

/// A single game with the derived columns computed at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub name: String,
    pub release_date: NaiveDate,
    pub release_year: i32,
    /// Calendar month, 1–12.
    pub release_month: u32,
    pub price: f64,
    pub positive_ratings: u64,
    pub negative_ratings: u64,
    pub total_ratings: u64,
    /// `positive / total`, 0 when there are no ratings.
    pub positive_ratio: f64,
    pub owners: String,
    /// Midpoint of the owners band, `None` when the cell could not be parsed.
    pub owners_estimate: Option<f64>,
    pub genres: Option<String>,
    pub main_genre: Option<String>,
    pub platforms: Option<String>,
    pub windows_support: bool,
    pub mac_support: bool,
    pub linux_support: bool,
    pub publisher: Option<String>,
    pub average_playtime: f64,
    pub achievements: u64,
}

impl GameRecord {
    /// Derive all computed columns from a source row.
    ///
    /// `row` is the zero-based data row, used only for error messages.
    pub fn from_raw(raw: RawGameRow, row: usize) -> Result<Self, LoadError> {
        let release_date =
            parse_release_date(&raw.release_date).ok_or_else(|| LoadError::InvalidDate {
                row,
                value: raw.release_date.clone(),
            })?;

        let total_ratings = raw.positive_ratings.saturating_add(raw.negative_ratings);
        let positive_ratio = if total_ratings == 0 {
            0.0
        } else {
            let positive = raw.positive_ratings as f64;
            positive / (positive + raw.negative_ratings as f64)
        };

        let platforms = raw.platforms.as_deref().unwrap_or("");
        let windows_support = platforms.contains(Platform::Windows.token());
        let mac_support = platforms.contains(Platform::Mac.token());
        let linux_support = platforms.contains(Platform::Linux.token());

        Ok(GameRecord {
            release_year: release_date.year(),
            release_month: release_date.month(),
            release_date,
            price: raw.price,
            positive_ratings: raw.positive_ratings,
            negative_ratings: raw.negative_ratings,
            total_ratings,
            positive_ratio,
            owners_estimate: parse_owners(&raw.owners),
            owners: raw.owners,
            main_genre: raw.genres.as_deref().map(main_genre),
            genres: raw.genres,
            platforms: raw.platforms,
            windows_support,
            mac_support,
            linux_support,
            publisher: raw.publisher,
            average_playtime: raw.average_playtime,
            achievements: raw.achievements,
            name: raw.name,
        })
    }

    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }

    /// Owners estimate for aggregation; unparseable cells count as zero.
    pub fn owners_median(&self) -> f64 {
        self.owners_estimate.unwrap_or(0.0)
    }

    pub fn supports(&self, platform: Platform) -> bool {
        match platform {
            Platform::Windows => self.windows_support,
            Platform::Mac => self.mac_support,
            Platform::Linux => self.linux_support,
        }
    }

    pub fn platform_count(&self) -> usize {
        Platform::ALL.into_iter().filter(|p| self.supports(*p)).count()
    }

    pub fn multi_platform(&self) -> bool {
        self.platform_count() >= 2
    }
}

/// Parse the `owners` column.
///
/// `"low-high"` yields the midpoint, a bare number yields itself. Anything
/// else, including negative or non-finite values, yields `None`.
pub fn parse_owners(owners: &str) -> Option<f64> {
    let value = if owners.contains('-') {
        let mut parts = owners.split('-');
        let low = parts.next()?.trim().parse::<i64>().ok()?;
        let high = parts.next()?.trim().parse::<i64>().ok()?;
        if parts.next().is_some() {
            return None;
        }
        (low as f64 + high as f64) / 2.0
    } else {
        owners.trim().parse::<f64>().ok()?
    };

    (value.is_finite() && value >= 0.0).then_some(value)
}

/// First tag of a semicolon-delimited genre list.
pub fn main_genre(genres: &str) -> String {
    genres.split(';').next().unwrap_or(genres).to_string()
}

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d %b, %Y", "%b %d, %Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a release date. Time-of-day components are discarded.
pub fn parse_release_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

// ---------------------------------------------------------------------------
// GameTable – the complete loaded (or filtered) table
// ---------------------------------------------------------------------------

/// An ordered table of games. The base table is never mutated after load;
/// filtering produces new tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameTable {
    pub games: Vec<GameRecord>,
}

impl GameTable {
    pub fn from_games(games: Vec<GameRecord>) -> Self {
        GameTable { games }
    }

    /// Number of games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameRecord> {
        self.games.iter()
    }

    /// Sorted set of distinct main genres.
    pub fn genres(&self) -> BTreeSet<String> {
        self.games
            .iter()
            .filter_map(|g| g.main_genre.clone())
            .collect()
    }

    /// `(min, max)` release year, `None` for an empty table.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.games.iter().map(|g| g.release_year).min()?;
        let max = self.games.iter().map(|g| g.release_year).max()?;
        Some((min, max))
    }

    /// Highest price in the table, 0 for an empty table.
    pub fn max_price(&self) -> f64 {
        self.games.iter().map(|g| g.price).fold(0.0, f64::max)
    }
}

impl<'a> IntoIterator for &'a GameTable {
    type Item = &'a GameRecord;
    type IntoIter = std::slice::Iter<'a, GameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.games.iter()
    }
}
