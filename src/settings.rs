//! Game settings and preferences
//!
//! Held in memory for the session only. The host may hand in JSON at
//! startup (a `data-settings` attribute on the web, a CLI argument natively).

use serde::{Deserialize, Serialize};

use crate::sim::PhysicsParams;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Physics values the tuning panel starts from
    pub physics: PhysicsParams,

    // === HUD ===
    /// Show the physics tuning panel
    pub show_tuning_panel: bool,
    /// Show the aim arrow and power bar while aiming
    pub show_aim_guide: bool,

    // === Accessibility ===
    /// Reduced motion (celebration text and clown stop blinking)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: PhysicsParams::default(),
            show_tuning_panel: true,
            show_aim_guide: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring invalid settings: {}", e);
                None
            }
        }
    }

    /// Settings from optional JSON supplied by the host, defaults otherwise.
    /// Nothing is written back; tuning lasts only for the session.
    pub fn from_host(json: Option<&str>) -> Self {
        match json.and_then(Self::from_json) {
            Some(settings) => {
                log::info!("Using host-supplied settings");
                settings
            }
            None => Self::default(),
        }
    }
}
