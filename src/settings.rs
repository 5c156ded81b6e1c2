//! Game settings and tuning
//!
//! Defaults match the shipped game. A JSON document may override any subset of
//! fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning plus the few presentation switches the core cares about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Physics (per tick) ===
    /// Downward acceleration added to vertical velocity every tick
    pub gravity: f32,
    /// Horizontal velocity multiplier applied when no direction is held
    pub friction: f32,
    /// Horizontal speed while a direction is held
    pub player_speed: f32,
    /// Upward impulse applied on jump
    pub jump_power: f32,

    // === Run ===
    /// Lives at the start of a run
    pub start_lives: u8,
    /// Countdown seconds at the start of each level and after a life loss
    pub start_time: u32,

    // === Presentation cues ===
    /// Emit the screen shake cue on life loss
    pub screen_shake: bool,
    /// Reduced motion (suppresses shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,
            player_speed: PLAYER_SPEED,
            jump_power: PLAYER_JUMP_POWER,

            start_lives: START_LIVES,
            start_time: START_TIME,

            screen_shake: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling unspecified fields with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Parse settings if a document is given, logging and falling back to defaults on error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings overrides");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Invalid settings ({e}), using defaults");
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Clamp values that would break the simulation's invariants
    fn sanitized(mut self) -> Self {
        // Friction outside [0, 1) would stop decaying or flip sign
        if !(0.0..1.0).contains(&self.friction) {
            log::warn!("friction {} out of range, using {}", self.friction, FRICTION);
            self.friction = FRICTION;
        }
        self.start_lives = self.start_lives.max(1);
        self.start_time = self.start_time.max(1);
        self
    }
}
