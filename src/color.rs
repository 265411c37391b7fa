use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use steam_explorer::Platform;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Fixed colours so platforms look the same across charts.
pub fn platform_color(platform: Platform) -> Color32 {
    match platform {
        Platform::Windows => hsl_to_color32(210.0, 0.75, 0.55),
        Platform::Mac => Color32::GRAY,
        Platform::Linux => hsl_to_color32(50.0, 0.9, 0.55),
    }
}

/// Bar colour for the free and paid groups.
pub fn price_group_color(is_free: bool) -> Color32 {
    if is_free {
        Color32::LIGHT_BLUE
    } else {
        Color32::LIGHT_RED
    }
}

// ---------------------------------------------------------------------------
// Color mapping: genre → Color32
// ---------------------------------------------------------------------------

/// Maps every main genre of the loaded table to a distinct colour.
///
/// Built once per base table so a genre keeps its colour while filters
/// change.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(genres: &BTreeSet<String>) -> Self {
        let palette = generate_palette(genres.len());
        ColorMap {
            mapping: genres.iter().cloned().zip(palette).collect(),
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, genre: &str) -> Color32 {
        self.mapping
            .get(genre)
            .copied()
            .unwrap_or(self.default_color)
    }
}
