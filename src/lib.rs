//! Retro Platformer - a single-screen platform game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (physics, collisions, game state machine)
//! - `platform`: Input mapping shared by the browser and native drivers
//! - `renderer`: Seam for whatever draws the state after a tick
//! - `settings`: Data-driven game balance
//! - `error`: Level authoring and phase transition errors

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{LevelError, TransitionError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// World dimensions (canvas size)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    /// Ground strip spanning the full world width
    pub const GROUND_HEIGHT: f32 = 32.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 400.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_JUMP_POWER: f32 = 12.0;

    /// Per-tick physics
    pub const GRAVITY: f32 = 0.5;
    pub const FRICTION: f32 = 0.8;

    /// Enemies are fixed-size squares
    pub const ENEMY_SIZE: f32 = 30.0;

    /// Goal flag dimensions
    pub const FLAG_WIDTH: f32 = 30.0;
    pub const FLAG_HEIGHT: f32 = 48.0;

    /// Pickup half-extents around the item point
    pub const STAR_HALF_EXTENT: f32 = 10.0;
    pub const GEM_HALF_EXTENT: f32 = 12.0;

    /// Scoring
    pub const STAR_VALUE: u64 = 100;
    pub const GEM_VALUE: u64 = 500;
    pub const TIME_BONUS_PER_SECOND: u64 = 10;
    pub const VICTORY_BONUS: u64 = 5000;

    /// Run defaults
    pub const START_LIVES: u8 = 3;
    pub const START_TIME: u32 = 999;
}
