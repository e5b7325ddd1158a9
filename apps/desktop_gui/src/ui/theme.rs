//! Light/dark display modes and the preferences persisted through eframe storage.

use eframe::egui;
use serde::{Deserialize, Serialize};

pub const SETTINGS_STORAGE_KEY: &str = "heroes_gui.settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Light,
    Dark,
}

impl DisplayMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                app_background: egui::Color32::WHITE,
                card_background: egui::Color32::from_rgb(245, 245, 245),
                row_divider: egui::Color32::from_rgb(212, 212, 212),
                accent: egui::Color32::from_rgb(13, 148, 136),
                muted_text: egui::Color32::from_rgb(100, 116, 139),
                body_text: egui::Color32::from_rgb(23, 23, 23),
                field_error: egui::Color32::from_rgb(244, 63, 94),
                banner_fill: egui::Color32::from_rgb(255, 228, 230),
                banner_text: egui::Color32::from_rgb(190, 18, 60),
                skeleton: egui::Color32::from_rgb(209, 213, 219),
            },
            Self::Dark => Palette {
                app_background: egui::Color32::from_rgb(23, 23, 23),
                card_background: egui::Color32::from_rgb(38, 38, 38),
                row_divider: egui::Color32::from_rgb(64, 64, 64),
                accent: egui::Color32::from_rgb(45, 212, 191),
                muted_text: egui::Color32::from_rgb(148, 163, 184),
                body_text: egui::Color32::from_rgb(245, 245, 245),
                field_error: egui::Color32::from_rgb(244, 63, 94),
                banner_fill: egui::Color32::from_rgb(255, 228, 230),
                banner_text: egui::Color32::from_rgb(190, 18, 60),
                skeleton: egui::Color32::from_rgb(55, 65, 81),
            },
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        let palette = self.palette();
        let mut visuals = match self {
            Self::Light => egui::Visuals::light(),
            Self::Dark => egui::Visuals::dark(),
        };
        visuals.override_text_color = Some(palette.body_text);
        visuals.panel_fill = palette.app_background;
        visuals.window_fill = palette.card_background;
        visuals.hyperlink_color = palette.accent;
        visuals.selection.bg_fill = palette.accent;
        visuals.widgets.active.bg_fill = palette.accent;
        visuals.widgets.hovered.bg_fill = palette.accent.gamma_multiply(0.85);
        visuals.window_corner_radius = egui::CornerRadius::same(6);
        visuals
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub app_background: egui::Color32,
    pub card_background: egui::Color32,
    pub row_divider: egui::Color32,
    pub accent: egui::Color32,
    pub muted_text: egui::Color32,
    pub body_text: egui::Color32,
    pub field_error: egui::Color32,
    pub banner_fill: egui::Color32,
    pub banner_text: egui::Color32,
    pub skeleton: egui::Color32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedGuiSettings {
    pub display_mode: DisplayMode,
    pub last_location: Option<String>,
}

impl PersistedGuiSettings {
    pub fn from_json(text: &str) -> Option<Self> {
        match serde_json::from_str(text) {
            Ok(settings) => Some(settings),
            Err(err) => {
                tracing::warn!("ignoring unreadable persisted gui settings: {err}");
                None
            }
        }
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}
