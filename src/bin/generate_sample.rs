use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use steam_explorer::data::model::RawGameRow;

/// Write a synthetic Steam catalog as CSV and Parquet.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Number of games to generate
    #[arg(long, default_value_t = 2000)]
    rows: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Directory for sample_steam.csv / sample_steam.parquet
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

const GENRES: [&str; 10] = [
    "Action", "Indie", "Adventure", "Casual", "Strategy", "RPG", "Simulation", "Racing",
    "Sports", "Free to Play",
];
const PLATFORMS: [&str; 5] = [
    "windows",
    "windows",
    "windows;mac",
    "windows;linux",
    "windows;mac;linux",
];
const OWNERS: [&str; 6] = [
    "0-20000",
    "20000-50000",
    "50000-100000",
    "100000-200000",
    "1000000-2000000",
    "10000000-20000000",
];
const PRICES: [f64; 8] = [0.0, 0.99, 2.99, 4.99, 9.99, 14.99, 19.99, 59.99];
const PUBLISHERS: [&str; 8] = [
    "Valve",
    "Ubisoft",
    "SEGA",
    "Paradox Interactive",
    "Devolver Digital",
    "Big Fish Games",
    "Square Enix",
    "THQ Nordic",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }
}

fn generate_row(i: usize, rng: &mut SimpleRng) -> RawGameRow {
    // Releases skew towards recent years, as on the real store.
    let year = 2019 - (rng.below(20) * rng.below(20) / 19) as i32;
    let month = 1 + rng.below(12);
    let day = 1 + rng.below(28);

    let n_genres = 1 + rng.below(3) as usize;
    let genres: Vec<&str> = (0..n_genres).map(|_| *rng.pick(&GENRES)).collect();

    let owners_band = rng.below(OWNERS.len() as u64) as usize;
    let popularity = 10u64.pow(owners_band as u32 + 1);
    let positive = rng.below(popularity * 5 + 1);
    let negative = rng.below(positive / 3 + 2);

    let mut owners = OWNERS[owners_band].to_string();
    if rng.below(200) == 0 {
        owners = "unknown".to_string();
    }

    RawGameRow {
        name: format!("Sample Game {i:05}"),
        release_date: format!("{year}-{month:02}-{day:02}"),
        price: *rng.pick(&PRICES),
        positive_ratings: positive,
        negative_ratings: negative,
        owners,
        genres: Some(genres.join(";")),
        platforms: Some(rng.pick(&PLATFORMS).to_string()),
        publisher: (rng.below(50) != 0).then(|| rng.pick(&PUBLISHERS).to_string()),
        average_playtime: (rng.below(4) * rng.below(900)) as f64,
        achievements: rng.below(4) * rng.below(60),
    }
}

fn write_csv(rows: &[RawGameRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn text_column<F>(rows: &[RawGameRow], f: F) -> ArrayRef
where
    F: Fn(&RawGameRow) -> Option<&str>,
{
    Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
}

fn float_column(rows: &[RawGameRow], f: impl Fn(&RawGameRow) -> f64) -> ArrayRef {
    Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
}

fn count_column(rows: &[RawGameRow], f: impl Fn(&RawGameRow) -> u64) -> ArrayRef {
    Arc::new(UInt64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
}

fn write_parquet(rows: &[RawGameRow], path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("release_date", DataType::Utf8, false),
        Field::new("price", DataType::Float64, false),
        Field::new("positive_ratings", DataType::UInt64, false),
        Field::new("negative_ratings", DataType::UInt64, false),
        Field::new("owners", DataType::Utf8, false),
        Field::new("genres", DataType::Utf8, true),
        Field::new("platforms", DataType::Utf8, true),
        Field::new("publisher", DataType::Utf8, true),
        Field::new("average_playtime", DataType::Float64, false),
        Field::new("achievements", DataType::UInt64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text_column(rows, |r| Some(r.name.as_str())),
            text_column(rows, |r| Some(r.release_date.as_str())),
            float_column(rows, |r| r.price),
            count_column(rows, |r| r.positive_ratings),
            count_column(rows, |r| r.negative_ratings),
            text_column(rows, |r| Some(r.owners.as_str())),
            text_column(rows, |r| r.genres.as_deref()),
            text_column(rows, |r| r.platforms.as_deref()),
            text_column(rows, |r| r.publisher.as_deref()),
            float_column(rows, |r| r.average_playtime),
            count_column(rows, |r| r.achievements),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = SimpleRng::new(args.seed);
    let rows: Vec<RawGameRow> = (0..args.rows).map(|i| generate_row(i, &mut rng)).collect();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let csv_path = args.out_dir.join("sample_steam.csv");
    let parquet_path = args.out_dir.join("sample_steam.parquet");

    write_csv(&rows, &csv_path)?;
    write_parquet(&rows, &parquet_path)?;

    log::info!("seed {} produced {} rows", args.seed, rows.len());
    println!(
        "Wrote {} games to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
