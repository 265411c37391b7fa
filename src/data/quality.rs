//! Completeness and sanity checks over a loaded table.

use std::collections::HashSet;

use serde::Serialize;

use super::model::{GameRecord, GameTable, REQUIRED_COLUMNS};

/// Earliest release year considered plausible for the catalog.
pub const MIN_PLAUSIBLE_YEAR: i32 = 1990;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingColumn {
    pub column: &'static str,
    pub missing: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationCheck {
    pub name: &'static str,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    /// Only columns with at least one missing cell.
    pub missing_by_column: Vec<MissingColumn>,
    /// Missing cells over all source cells, in percent.
    pub missing_percentage: f64,
    /// Rows identical to an earlier row in every source field.
    pub duplicate_records: usize,
    /// Rows without any missing cell, in percent.
    pub complete_percentage: f64,
    pub checks: Vec<ValidationCheck>,
}

/// Source columns that may hold nulls, with their accessors.
const NULLABLE: [(&str, fn(&GameRecord) -> bool); 3] = [
    ("genres", |g: &GameRecord| g.genres.is_none()),
    ("platforms", |g: &GameRecord| g.platforms.is_none()),
    ("publisher", |g: &GameRecord| g.publisher.is_none()),
];

pub fn report(table: &GameTable) -> QualityReport {
    let rows = table.len();
    let percent = |n: usize, of: usize| if of == 0 { 0.0 } else { 100.0 * n as f64 / of as f64 };

    let missing_by_column: Vec<MissingColumn> = NULLABLE
        .iter()
        .map(|&(column, is_missing)| {
            let missing = table.iter().filter(|g| is_missing(g)).count();
            MissingColumn {
                column,
                missing,
                percentage: percent(missing, rows),
            }
        })
        .filter(|m| m.missing > 0)
        .collect();

    let missing_cells: usize = missing_by_column.iter().map(|m| m.missing).sum();
    let complete = table
        .iter()
        .filter(|g| NULLABLE.iter().all(|(_, is_missing)| !is_missing(g)))
        .count();

    QualityReport {
        missing_percentage: percent(missing_cells, rows * REQUIRED_COLUMNS.len()),
        missing_by_column,
        duplicate_records: duplicate_records(table),
        complete_percentage: percent(complete, rows),
        checks: vec![
            ValidationCheck {
                name: "Prices are non-negative",
                passed: table.iter().all(|g| g.price >= 0.0),
            },
            ValidationCheck {
                name: "Positive ratios between 0 and 1",
                passed: table
                    .iter()
                    .all(|g| (0.0..=1.0).contains(&g.positive_ratio)),
            },
            ValidationCheck {
                name: "Playtime is non-negative",
                passed: table.iter().all(|g| g.average_playtime >= 0.0),
            },
            ValidationCheck {
                name: "Release dates are reasonable",
                passed: table.iter().all(|g| g.release_year >= MIN_PLAUSIBLE_YEAR),
            },
        ],
    }
}

type SourceKey<'a> = (
    &'a str,
    chrono::NaiveDate,
    u64,
    u64,
    u64,
    &'a str,
    Option<&'a str>,
    Option<&'a str>,
    Option<&'a str>,
    u64,
    u64,
);

fn source_key(g: &GameRecord) -> SourceKey<'_> {
    (
        g.name.as_str(),
        g.release_date,
        g.price.to_bits(),
        g.positive_ratings,
        g.negative_ratings,
        g.owners.as_str(),
        g.genres.as_deref(),
        g.platforms.as_deref(),
        g.publisher.as_deref(),
        g.average_playtime.to_bits(),
        g.achievements,
    )
}

fn duplicate_records(table: &GameTable) -> usize {
    let mut seen = HashSet::with_capacity(table.len());
    table.iter().filter(|g| !seen.insert(source_key(g))).count()
}
