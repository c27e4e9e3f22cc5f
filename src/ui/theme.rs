//! Theme configuration for egui.
//!
//! Three selectable themes (Light, Dark, Blue) applied as egui visuals
//! and persisted in the application config.

use egui::{Color32, Rounding, Stroke, Visuals};
use serde::{Deserialize, Serialize};

/// Selectable UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Blue,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Blue];

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Blue => "Blue",
        }
    }

    /// Apply this theme to the egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        style.visuals = match self {
            Theme::Light => light_visuals(),
            Theme::Dark => dark_visuals(),
            Theme::Blue => blue_visuals(),
        };
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        ctx.set_style(style);
    }
}

fn light_visuals() -> Visuals {
    let mut visuals = Visuals::light();

    let background = Color32::from_rgb(240, 240, 240); // #f0f0f0
    let widget = Color32::from_rgb(224, 224, 224);     // #e0e0e0
    let hovered = Color32::from_rgb(208, 208, 208);    // #d0d0d0
    let border = Color32::from_rgb(176, 176, 176);     // #b0b0b0
    let text = Color32::from_rgb(32, 32, 32);          // #202020

    visuals.panel_fill = background;
    visuals.window_fill = background;
    visuals.extreme_bg_color = Color32::WHITE; // editor and preview backgrounds

    style_widgets(&mut visuals, widget, hovered, border, text);
    visuals.widgets.active.bg_fill = border;

    visuals.selection.bg_fill = Color32::from_rgb(144, 176, 224);
    visuals.selection.stroke = Stroke::new(1.0, text);

    visuals
}

fn dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    let background = Color32::from_rgb(45, 45, 45);  // #2d2d2d
    let widget = Color32::from_rgb(85, 85, 85);      // #555555
    let hovered = Color32::from_rgb(102, 102, 102);  // #666666
    let border = Color32::from_rgb(119, 119, 119);   // #777777
    let text = Color32::from_rgb(224, 224, 224);     // #e0e0e0

    visuals.panel_fill = background;
    visuals.window_fill = background;
    visuals.extreme_bg_color = Color32::from_rgb(61, 61, 61); // #3d3d3d editors

    style_widgets(&mut visuals, widget, hovered, border, text);
    visuals.widgets.active.bg_fill = border;

    visuals.selection.bg_fill = Color32::from_rgb(70, 100, 150);
    visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);

    visuals
}

fn blue_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    let background = Color32::from_rgb(30, 58, 95);  // #1e3a5f
    let widget = Color32::from_rgb(58, 94, 140);     // #3a5e8c
    let hovered = Color32::from_rgb(74, 126, 176);   // #4a7eb0
    let panel = Color32::from_rgb(44, 76, 124);      // #2c4c7c
    let text = Color32::WHITE;

    visuals.panel_fill = background;
    visuals.window_fill = background;
    visuals.extreme_bg_color = panel; // editors keep the mid-blue fill

    style_widgets(&mut visuals, widget, hovered, hovered, text);
    visuals.widgets.active.bg_fill = hovered;

    visuals.selection.bg_fill = hovered;
    visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);

    visuals
}

fn style_widgets(
    visuals: &mut Visuals,
    widget: Color32,
    hovered: Color32,
    border: Color32,
    text: Color32,
) {
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text);
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, border);

    visuals.widgets.inactive.bg_fill = widget;
    visuals.widgets.inactive.weak_bg_fill = widget;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, border);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = hovered;
    visuals.widgets.hovered.weak_bg_fill = hovered;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.fg_stroke = Stroke::new(1.0, text);
    visuals.widgets.active.rounding = Rounding::same(4.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_light() {
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn test_theme_round_trips_through_config_json() {
        for theme in Theme::ALL {
            let json = serde_json::to_string(&theme).unwrap();
            let parsed: Theme = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, theme);
        }
    }

    #[test]
    fn test_labels_are_distinct() {
        assert_ne!(Theme::Light.label(), Theme::Dark.label());
        assert_ne!(Theme::Dark.label(), Theme::Blue.label());
    }
}
