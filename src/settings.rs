//! Match settings and tuning
//!
//! Loaded from JSON. Missing fields fall back to the values in `consts`, so a
//! partial document like `{"mode": "3v3"}` is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::session::GameMode;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file could not be read: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown game mode: {0:?}")]
    UnknownMode(String),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Data-driven balance values for a match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Displacement per held direction per tick (human seat)
    pub human_step: f32,
    /// Displacement per axis per tick (autonomous seat)
    pub bot_step: f32,
    pub restitution: f32,
    pub friction: f32,
    pub contact_radius: f32,
    pub shot_gain: f32,
    pub match_seconds: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            human_step: HUMAN_STEP,
            bot_step: BOT_STEP,
            restitution: RESTITUTION,
            friction: FRICTION,
            contact_radius: CONTACT_RADIUS,
            shot_gain: SHOT_GAIN,
            match_seconds: MATCH_SECONDS,
        }
    }
}

impl Tuning {
    /// Check that every value keeps the simulation well-behaved
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(SettingsError::Invalid(format!(
                "restitution {} outside [0, 1]",
                self.restitution
            )));
        }
        // Zero friction would stop the ball dead on the first tick
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(SettingsError::Invalid(format!(
                "friction {} outside (0, 1]",
                self.friction
            )));
        }
        for (name, value) in [
            ("human_step", self.human_step),
            ("bot_step", self.bot_step),
            ("contact_radius", self.contact_radius),
            ("shot_gain", self.shot_gain),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::Invalid(format!("{name} must be >= 0, got {value}")));
            }
        }
        if self.match_seconds == 0 {
            return Err(SettingsError::Invalid("match_seconds must be > 0".into()));
        }
        // The clock counts ticks in a u32
        if self.match_seconds > u32::MAX / SIM_HZ {
            return Err(SettingsError::Invalid(format!(
                "match_seconds {} exceeds {}",
                self.match_seconds,
                u32::MAX / SIM_HZ
            )));
        }
        Ok(())
    }
}

/// Match configuration supplied by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Selected mode (does not change simulation behavior)
    pub mode: GameMode,
    pub tuning: Tuning,
}

impl Settings {
    /// Create default settings for a mode
    pub fn for_mode(mode: GameMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.tuning.validate()
    }
}
