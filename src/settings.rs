//! Player settings and preferences
//!
//! Persisted separately from scores in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::sim::Difficulty;

/// Visual quality presets; the only knob they turn is the particle budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Particle pool cap for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 80,
            QualityPreset::Medium => 250,
            QualityPreset::High => 600,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Difficulty preselected on the start screen
    pub difficulty: Difficulty,

    /// Particle effects on/off (overrides the quality budget when off)
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when the window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (cuts the particle budget to a quarter)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            difficulty: Difficulty::Medium,
            particles: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective particle pool cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else if self.reduced_motion {
            self.quality.max_particles() / 4
        } else {
            self.quality.max_particles()
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "sky_pop_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
