//! Match configuration
//!
//! Loaded from JSON; every field has a default, so a partial file only
//! overrides what it names.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::SimError;
use crate::input::KeyBindings;
use crate::sim::{CameraSettings, TerrainParams};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// Terrain seed; also seeds explosion streams
    pub seed: u64,
    pub terrain: TerrainParams,

    // === Players ===
    /// Spawn x per player slot; the player count for `GameState::new`
    pub spawn_xs: Vec<f32>,
    /// Key bindings per player slot
    pub bindings: Vec<KeyBindings>,
    /// Whether bombs hurt their own thrower
    pub self_damage: bool,

    // === View ===
    /// Viewport size in pixels
    pub viewport: Vec2,
    pub camera: CameraSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 12345,
            terrain: TerrainParams::default(),

            spawn_xs: vec![100.0, 200.0],
            bindings: KeyBindings::defaults(),
            self_damage: false,

            viewport: Vec2::new(1280.0, 720.0),
            camera: CameraSettings::default(),
        }
    }
}

impl Settings {
    /// Read and validate settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&text)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values that would leave the world in an undefined state
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.viewport.x > 0.0 && self.viewport.y > 0.0) {
            return Err(SimError::InvalidSettings("viewport must be positive"));
        }
        if self.terrain.columns == 0 || self.terrain.depth == 0 {
            return Err(SimError::InvalidSettings("terrain needs columns and depth"));
        }
        if !self.terrain.noise_scale.is_finite() {
            return Err(SimError::InvalidSettings("noise scale must be finite"));
        }
        if self.spawn_xs.iter().any(|x| !x.is_finite()) {
            return Err(SimError::InvalidSettings("spawn positions must be finite"));
        }
        self.camera.validate()
    }
}
