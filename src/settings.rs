//! Match settings
//!
//! Every field is optional in JSON; missing fields take the defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How enemy contact drains player health
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ContactDamage {
    /// Fixed damage per simulation step while overlapping (frame-rate dependent)
    PerFrame { amount: f32 },
    /// Damage per second of overlap, scaled by wall-clock time between steps
    PerSecond { rate: f32 },
}

impl Default for ContactDamage {
    fn default() -> Self {
        ContactDamage::PerFrame { amount: 0.5 }
    }
}

impl ContactDamage {
    /// Damage for one step that took `elapsed_ms` of wall-clock time
    pub fn for_step(&self, elapsed_ms: f64) -> f32 {
        match *self {
            ContactDamage::PerFrame { amount } => amount,
            ContactDamage::PerSecond { rate } => rate * (elapsed_ms.max(0.0) / 1000.0) as f32,
        }
    }

    fn magnitude(&self) -> f32 {
        match *self {
            ContactDamage::PerFrame { amount } => amount,
            ContactDamage::PerSecond { rate } => rate,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Match tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Countdown start value (seconds)
    pub match_seconds: u32,
    /// Minimum time between accepted attacks
    pub attack_cooldown_ms: f64,
    /// Period of the enemy spawner
    pub spawn_interval_ms: f64,
    /// Enemies placed when a match starts
    pub initial_enemies: usize,
    /// The periodic spawner only adds enemies while fewer than this are alive
    pub max_enemies: usize,
    pub contact_damage: ContactDamage,
    /// Viewport rows reserved for the page header/footer
    pub chrome_height: f32,
    /// Fixed RNG seed (otherwise derived from the clock)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            match_seconds: 60,
            attack_cooldown_ms: 3000.0,
            spawn_interval_ms: 3000.0,
            initial_enemies: 5,
            max_enemies: 10,
            contact_damage: ContactDamage::default(),
            chrome_height: 150.0,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.match_seconds == 0 {
            return Err(SettingsError::Invalid {
                field: "match_seconds",
                reason: "must be at least 1",
            });
        }
        if !(self.spawn_interval_ms.is_finite() && self.spawn_interval_ms > 0.0) {
            return Err(SettingsError::Invalid {
                field: "spawn_interval_ms",
                reason: "must be a positive number",
            });
        }
        if !(self.attack_cooldown_ms.is_finite() && self.attack_cooldown_ms >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "attack_cooldown_ms",
                reason: "must be zero or positive",
            });
        }
        if self.max_enemies == 0 {
            return Err(SettingsError::Invalid {
                field: "max_enemies",
                reason: "must be at least 1",
            });
        }
        let damage = self.contact_damage.magnitude();
        if !(damage.is_finite() && damage >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "contact_damage",
                reason: "must be zero or positive",
            });
        }
        if !(self.chrome_height.is_finite() && self.chrome_height >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "chrome_height",
                reason: "must be zero or positive",
            });
        }
        Ok(())
    }

    /// DOM element holding optional settings JSON
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "arena-settings";

    /// Load settings from the page's inline JSON block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", Self::ELEMENT_ID);
                    return settings;
                }
                Err(e) => log::warn!("Ignoring #{}: {}", Self::ELEMENT_ID, e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from an optional JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }
}
