//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the DOM,
//! draws, or reads the clock:
//! - One step per displayed frame, fixed per-tick physics constants
//! - Phase transitions only through `Game`
//! - Stable iteration order (authored order)

pub mod collision;
pub mod game;
pub mod level;
pub mod sched;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps, point_in_rect};
pub use game::Game;
pub use level::{EnemySpawn, LevelLayout, LoadedLevel, Platform, load_level};
pub use sched::{Countdown, FrameLoop, TimerHandle};
pub use state::{
    Enemy, Facing, GameEvent, GamePhase, GameState, Hazard, Item, ItemKind, LevelSummary, Player,
};
pub use tick::{TickInput, TickReport, tick};
