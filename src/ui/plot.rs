use eframe::egui::{self, Color32, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};
use steam_explorer::data::series::{ChartKind, ChartSet, ScatterPoint};

use crate::color::{platform_color, price_group_color};
use crate::state::AppState;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ---------------------------------------------------------------------------
// Chart selector
// ---------------------------------------------------------------------------

pub fn chart_selector(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Chart");
        egui::ComboBox::from_id_salt("chart_kind")
            .selected_text(state.chart.title())
            .show_ui(ui, |ui: &mut Ui| {
                for kind in ChartKind::ALL {
                    ui.selectable_value(&mut state.chart, kind, kind.title());
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Chart (central panel)
// ---------------------------------------------------------------------------

/// Render the selected chart for the filtered table.
pub fn chart(ui: &mut Ui, state: &AppState) {
    let Some(analysis) = &state.analysis else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a catalog to explore it  (File → Open…)");
        });
        return;
    };
    let charts = &analysis.charts;

    if analysis.filtered.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No games match the current filters");
        });
        return;
    }

    match state.chart {
        ChartKind::TimeTrend => time_trend(ui, charts),
        ChartKind::PriceVsSales => scatter(
            ui,
            "price_vs_sales",
            &charts.price_vs_sales,
            ("Price (USD)", "Estimated owners"),
            Color32::LIGHT_BLUE,
        ),
        ChartKind::RatingVsPlaytime => scatter(
            ui,
            "rating_vs_playtime",
            &charts.rating_vs_playtime,
            ("Positive ratio", "Average playtime (min)"),
            Color32::LIGHT_GREEN,
        ),
        ChartKind::GenreDistribution => genre_distribution(ui, state, charts),
        ChartKind::PublisherRanking => publisher_table(ui, charts),
        ChartKind::PlatformSupport => platform_support(ui, charts),
        ChartKind::FreeVsPaid => free_vs_paid(ui, charts),
        ChartKind::MonthlyTrend => monthly_trend(ui, charts),
        ChartKind::GenreSmallMultiples => genre_small_multiples(ui, state, charts),
    }
}

fn time_trend(ui: &mut Ui, charts: &ChartSet) {
    let points: PlotPoints = charts
        .time_trend
        .iter()
        .map(|p| [p.key as f64, p.count as f64])
        .collect();

    Plot::new("time_trend")
        .x_axis_label("Release year")
        .y_axis_label("Games released")
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name("Releases").width(3.0));
        });
}

fn scatter(
    ui: &mut Ui,
    id: &str,
    series: &[ScatterPoint],
    (x_label, y_label): (&str, &str),
    color: Color32,
) {
    let points: PlotPoints = series.iter().map(|p| [p.x, p.y]).collect();

    Plot::new(id)
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(Points::new(points).radius(2.5).color(color));
        });
}

fn genre_distribution(ui: &mut Ui, state: &AppState, charts: &ChartSet) {
    let bars: Vec<Bar> = charts
        .genre_distribution
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let color = state
                .genre_colors
                .as_ref()
                .map_or(Color32::LIGHT_BLUE, |c| c.color_for(&p.key));
            Bar::new(i as f64, p.count as f64).name(&p.key).fill(color)
        })
        .collect();

    Plot::new("genre_distribution")
        .legend(Legend::default())
        .y_axis_label("Games")
        .show_x(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Main genre"));
        });
}

fn platform_support(ui: &mut Ui, charts: &ChartSet) {
    Plot::new("platform_support")
        .legend(Legend::default())
        .y_axis_label("Games supported")
        .show_x(false)
        .show(ui, |plot_ui| {
            for (i, p) in charts.platform_support.iter().enumerate() {
                let bar = Bar::new(i as f64, p.count as f64).fill(platform_color(p.key));
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(p.key.label())
                        .color(platform_color(p.key)),
                );
            }
        });
}

fn monthly_trend(ui: &mut Ui, charts: &ChartSet) {
    let bars: Vec<Bar> = charts
        .monthly_trend
        .iter()
        .map(|p| {
            let name = MONTHS.get(p.key as usize - 1).copied().unwrap_or("?");
            Bar::new(p.key as f64, p.count as f64).name(name)
        })
        .collect();

    Plot::new("monthly_trend")
        .x_axis_label("Month")
        .y_axis_label("Games released")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
        });
}

fn genre_small_multiples(ui: &mut Ui, state: &AppState, charts: &ChartSet) {
    Plot::new("genre_small_multiples")
        .legend(Legend::default())
        .x_axis_label("Price (USD)")
        .y_axis_label("Positive ratio")
        .show(ui, |plot_ui| {
            for panel in &charts.genre_small_multiples {
                let points: PlotPoints = panel
                    .points
                    .iter()
                    .map(|p| [p.price, p.positive_ratio])
                    .collect();
                let color = state
                    .genre_colors
                    .as_ref()
                    .map_or(Color32::LIGHT_BLUE, |c| c.color_for(&panel.genre));
                plot_ui.points(
                    Points::new(points)
                        .radius(2.5)
                        .color(color)
                        .name(&panel.genre),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

fn publisher_table(ui: &mut Ui, charts: &ChartSet) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::remainder())
        .columns(Column::auto(), 3)
        .header(20.0, |mut header| {
            for title in ["Publisher", "Games", "Avg rating", "Avg owners"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for p in &charts.publisher_ranking {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&p.publisher);
                    });
                    row.col(|ui| {
                        ui.label(p.game_count.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.1}%", 100.0 * p.mean_positive_ratio));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.0}", p.mean_owners));
                    });
                });
            }
        });
}

fn free_vs_paid(ui: &mut Ui, charts: &ChartSet) {
    let label = |is_free: bool| if is_free { "Free" } else { "Paid" };

    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto(), 5)
        .header(20.0, |mut header| {
            for title in ["Group", "Games", "Avg rating", "Avg playtime (min)", "Avg owners"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for g in &charts.free_vs_paid {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.colored_label(price_group_color(g.is_free), label(g.is_free));
                    });
                    row.col(|ui| {
                        ui.label(g.game_count.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.1}%", 100.0 * g.mean_positive_ratio));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.0}", g.mean_playtime));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.0}", g.mean_owners));
                    });
                });
            }
        });
}
