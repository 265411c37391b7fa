//! Row builders shared by the unit tests.

use super::model::{GameRecord, GameTable, RawGameRow};

pub(crate) fn raw(
    name: &str,
    release_date: &str,
    price: f64,
    genres: Option<&str>,
    platforms: Option<&str>,
) -> RawGameRow {
    RawGameRow {
        name: name.to_string(),
        release_date: release_date.to_string(),
        price,
        positive_ratings: 90,
        negative_ratings: 10,
        owners: "20000-50000".to_string(),
        genres: genres.map(str::to_string),
        platforms: platforms.map(str::to_string),
        publisher: Some("Valve".to_string()),
        average_playtime: 120.0,
        achievements: 0,
    }
}

pub(crate) fn game(
    name: &str,
    release_date: &str,
    price: f64,
    genre: &str,
    platforms: &str,
) -> GameRecord {
    GameRecord::from_raw(raw(name, release_date, price, Some(genre), Some(platforms)), 0)
        .expect("fixture row should derive")
}

pub(crate) fn table(games: Vec<GameRecord>) -> GameTable {
    GameTable::from_games(games)
}
