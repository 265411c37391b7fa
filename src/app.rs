use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SteamExplorerApp {
    pub state: AppState,
}

impl eframe::App for SteamExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics + chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::metrics_strip(ui, &self.state);
            ui.separator();
            plot::chart_selector(ui, &mut self.state);
            plot::chart(ui, &self.state);
        });
    }
}
