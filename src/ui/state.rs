//! Application state structures.
//!
//! The editor itself lives in [`EditorSession`]; this module adds the front-end
//! preferences that persist between runs and the app struct tying both together.

use crate::interaction::EditorSession;
use eframe::egui;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Storage key the settings are saved under.
pub const SETTINGS_KEY: &str = "editor_settings";

/// Front-end preferences remembered across restarts.
///
/// The project is not part of this; every run starts with an empty canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
    /// Remembered width of the properties panel
    pub properties_panel_width: f32,
    /// Whether the background grid is drawn
    pub show_grid: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            properties_panel_width: 260.0,
            show_grid: true,
        }
    }
}

impl EditorSettings {
    /// Serializes the settings to JSON.
    ///
    /// # Returns
    ///
    /// A JSON string, or an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes settings from JSON. Missing fields take their defaults.
    ///
    /// # Arguments
    ///
    /// * `json` - JSON string containing the serialized settings
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The main application structure.
///
/// Implements `eframe::App`; all editing goes through [`EditorSession`].
#[derive(Debug, Default)]
pub struct WireframerApp {
    /// Project plus interaction state
    pub session: EditorSession,
    /// Persisted preferences
    pub settings: EditorSettings,
    /// Top-left corner of the canvas on screen, refreshed every frame
    pub canvas_origin: egui::Pos2,
    /// Whether the "clear everything" confirmation dialog is showing
    pub pending_clear: bool,
}

impl WireframerApp {
    /// Creates the app, restoring settings from eframe storage when available.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = cc
            .storage
            .and_then(|storage| storage.get_string(SETTINGS_KEY))
            .and_then(|json| match EditorSettings::from_json(&json) {
                Ok(settings) => Some(settings),
                Err(err) => {
                    warn!("ignoring unreadable editor settings: {err}");
                    None
                }
            })
            .unwrap_or_default();
        debug!("starting with {settings:?}");
        Self {
            settings,
            ..Self::default()
        }
    }
}
