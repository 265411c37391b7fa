mod app;
mod color;
mod report;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use app::SteamExplorerApp;
use clap::Parser;
use eframe::egui;
use steam_explorer::Platform;

/// Explore a Steam catalog export.
#[derive(Parser, Debug)]
#[command(name = "steam-explorer", version)]
pub struct Args {
    /// Catalog file to open (.csv, .json or .parquet)
    path: Option<PathBuf>,

    /// Print the metrics for PATH as JSON instead of opening the window
    #[arg(long, requires = "path")]
    report: bool,

    /// Earliest release year to keep
    #[arg(long)]
    year_min: Option<i32>,

    /// Latest release year to keep
    #[arg(long)]
    year_max: Option<i32>,

    /// Lowest price to keep (USD)
    #[arg(long)]
    price_min: Option<f64>,

    /// Highest price to keep (USD)
    #[arg(long)]
    price_max: Option<f64>,

    /// Main genre to keep; repeat for several
    #[arg(long = "genre")]
    genres: Vec<String>,

    /// Platform to keep (windows, mac, linux); repeat for several
    #[arg(long = "platform")]
    platforms: Vec<Platform>,

    /// Include every chart series in the report
    #[arg(long, requires = "report")]
    charts: bool,

    /// Include the data quality report
    #[arg(long, requires = "report")]
    quality: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.report {
        return report::run(&args);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let initial = args.path.clone();
    eframe::run_native(
        "Steam Explorer",
        options,
        Box::new(move |_cc| {
            let mut app = SteamExplorerApp::default();
            if let Some(path) = initial {
                app.state.open(path);
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running viewer: {e}"))
}
