//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use steam_explorer::data::model::RawGameRow;
use steam_explorer::{GameRecord, GameTable};

pub const HEADER: &str = "name,release_date,price,positive_ratings,negative_ratings,owners,genres,platforms,publisher,average_playtime,achievements";

/// A row with sensible defaults for everything but the filterable fields.
pub fn row(name: &str, date: &str, price: f64, genres: &str, platforms: &str) -> RawGameRow {
    RawGameRow {
        name: name.to_string(),
        release_date: date.to_string(),
        price,
        positive_ratings: 80,
        negative_ratings: 20,
        owners: "1000000-2000000".to_string(),
        genres: Some(genres.to_string()),
        platforms: Some(platforms.to_string()),
        publisher: Some("Valve".to_string()),
        average_playtime: 60.0,
        achievements: 10,
    }
}

pub fn table(rows: Vec<RawGameRow>) -> GameTable {
    let games = rows
        .into_iter()
        .enumerate()
        .map(|(i, r)| GameRecord::from_raw(r, i).expect("fixture row should derive"))
        .collect();
    GameTable::from_games(games)
}

/// A small, varied catalog.
pub fn catalog() -> GameTable {
    table(vec![
        row("Alpha", "2012-03-14", 0.0, "Action;Free to Play", "windows"),
        row("Bravo", "2014-06-01", 9.99, "RPG;Indie", "windows;mac"),
        row("Charlie", "2014-11-20", 19.99, "Indie", "linux"),
        row("Delta", "2016-02-02", 59.99, "Action", "windows;mac;linux"),
        row("Echo", "2018-07-07", 4.99, "Strategy", "mac"),
        row("Foxtrot", "2018-12-24", 0.0, "Casual;Indie", "windows;linux"),
    ])
}

/// Write `lines` under a header into `dir/name` and return the path.
pub fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("create fixture file");
    writeln!(file, "{HEADER}").unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    path
}
