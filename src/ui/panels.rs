use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use steam_explorer::{MetricsSnapshot, Platform};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone the handle so we can mutate state while reading the base table.
    let Some(base) = state.base().cloned() else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Release year ----
            if let Some((lo, hi)) = base.year_bounds() {
                ui.strong("Release year");
                let (from, to) = &mut state.filters.year_range;
                changed |= ui.add(egui::Slider::new(&mut *from, lo..=hi).text("from")).changed();
                changed |= ui.add(egui::Slider::new(&mut *to, lo..=hi).text("to")).changed();
                if *from > *to {
                    *to = *from;
                }
                ui.separator();
            }

            // ---- Price ----
            ui.strong("Price (USD)");
            let max_price = base.max_price();
            let (from, to) = &mut state.filters.price_range;
            changed |= ui
                .add(egui::Slider::new(&mut *from, 0.0..=max_price).text("from"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut *to, 0.0..=max_price).text("to"))
                .changed();
            if *from > *to {
                *to = *from;
            }
            ui.separator();

            // ---- Platforms ----
            ui.strong("Platforms");
            for platform in Platform::ALL {
                let mut checked = state.filters.selected_platforms.contains(&platform);
                if ui.checkbox(&mut checked, platform.label()).changed() {
                    state.filters.toggle_platform(platform);
                    changed = true;
                }
            }
            ui.separator();

            // ---- Genres (collapsible) ----
            let genres = base.genres();
            let n_selected = state.filters.selected_genres.len();
            let header_text = format!("Genres  ({n_selected}/{})", genres.len());

            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("genres")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_genres();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_genres();
                        }
                    });
                    if state.filters.selected_genres.is_empty() {
                        ui.weak("Nothing selected: all genres shown");
                    }

                    for genre in &genres {
                        let mut checked = state.filters.selected_genres.contains(genre);
                        let mut text = RichText::new(genre);
                        if let Some(colors) = &state.genre_colors {
                            text = text.color(colors.color_for(genre));
                        }
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_genre(genre);
                        }
                    }
                });
        });

    if changed {
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_reload = state.source.is_some();
            if ui.add_enabled(can_reload, egui::Button::new("Reload")).clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(analysis) = &state.analysis {
            ui.label(format!(
                "{} games loaded, {} visible",
                analysis.base.len(),
                analysis.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Metric strip
// ---------------------------------------------------------------------------

/// Render the key metrics of the filtered table above the chart.
pub fn metrics_strip(ui: &mut Ui, state: &AppState) {
    let Some(analysis) = &state.analysis else {
        return;
    };
    let m = &analysis.metrics;

    ui.horizontal_wrapped(|ui: &mut Ui| {
        metric(ui, "Games", m.total_games.to_string());
        metric(ui, "Free", format!("{:.1}%", m.free_game_percentage));
        metric(ui, "Avg rating", format!("{:.1}%", m.avg_rating));
        metric(ui, "Years", m.year_range.clone());
        metric(ui, "Peak year", peak_label(m.peak_year, m.peak_year_count));
        metric(ui, "Avg price", format!("${:.2}", m.avg_price));
        metric(ui, "Median price", format!("${:.2}", m.median_price));
        metric(ui, "Multi-platform", m.multi_platform_games.to_string());
        metric(ui, "Genres", m.unique_genres.to_string());
        metric(ui, "Peak month", peak_label(m.peak_month, m.peak_month_count));
        metric(ui, "Slow month", peak_label(m.slow_month, m.slow_month_count));
    });

    if !m.top_genres.is_empty() {
        ui.label(format!("Top genres: {}", m.top_genres.join(", ")));
    }
    platform_line(ui, m);
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.weak(label);
            ui.strong(value);
        });
    });
}

fn peak_label<K: std::fmt::Display>(key: Option<K>, count: usize) -> String {
    match key {
        Some(k) => format!("{k} ({count})"),
        None => "–".to_string(),
    }
}

fn platform_line(ui: &mut Ui, m: &MetricsSnapshot) {
    ui.label(format!(
        "Windows {} · Mac {} · Linux {}",
        m.windows_games, m.mac_games, m.linux_games
    ));
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open Steam catalog")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(path);
    }
}
