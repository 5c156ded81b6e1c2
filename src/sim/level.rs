//! Hand-authored level layouts
//!
//! Layouts live in an embedded JSON document and are validated on every load,
//! so authoring mistakes surface here rather than mid-simulation. Requesting a
//! level beyond the last authored one wraps to level 1 with a victory bonus.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::Facing;
use crate::consts::*;
use crate::error::LevelError;

/// Authored level document, compiled into the binary
const LEVELS_JSON: &str = include_str!("levels.json");

const GROUND_COLOR: &str = "#228B22";
const PLATFORM_COLOR: &str = "#8B4513";

/// A static platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Display colour, only meaningful to the renderer
    #[serde(default = "default_platform_color")]
    pub color: String,
}

fn default_platform_color() -> String {
    PLATFORM_COLOR.to_string()
}

impl Platform {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Where an enemy starts and how it patrols
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub direction: Facing,
}

/// One level as authored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub number: u32,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub stars: Vec<Vec2>,
    #[serde(default)]
    pub gems: Vec<Vec2>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    /// Top-left corner of the goal flag
    pub flag: Vec2,
}

impl LevelLayout {
    /// Goal flag rectangle
    pub fn flag_rect(&self) -> Rect {
        Rect::new(self.flag.x, self.flag.y, FLAG_WIDTH, FLAG_HEIGHT)
    }
}

#[derive(Debug, Deserialize)]
struct LevelDocument {
    levels: Vec<LevelLayout>,
}

/// Result of a level load
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedLevel {
    /// Level number actually loaded (1 after a victory loop)
    pub number: u32,
    /// Layout with the ground platform first
    pub layout: LevelLayout,
    /// Score the caller must add (non-zero only on a victory loop)
    pub victory_bonus: u64,
}

/// Load an authored level, wrapping to level 1 with a bonus past the last one
pub fn load_level(number: u32) -> Result<LoadedLevel, LevelError> {
    load_level_from(LEVELS_JSON, number)
}

/// Load a level from an arbitrary layout document
pub fn load_level_from(json: &str, number: u32) -> Result<LoadedLevel, LevelError> {
    let doc: LevelDocument = serde_json::from_str(json)?;

    let Some(mut layout) = doc.levels.into_iter().find(|l| l.number == number) else {
        if number == 1 {
            return Err(LevelError::Missing(1));
        }
        // Beyond the last authored level: wrap to level 1 with a victory bonus
        log::info!("Level {number} not authored, looping to level 1 with victory bonus");
        let mut looped = load_level_from(json, 1)?;
        looped.victory_bonus += VICTORY_BONUS;
        return Ok(looped);
    };

    validate(&layout)?;

    layout.platforms.insert(
        0,
        Platform {
            x: 0.0,
            y: WORLD_HEIGHT - GROUND_HEIGHT,
            w: WORLD_WIDTH,
            h: GROUND_HEIGHT,
            color: GROUND_COLOR.to_string(),
        },
    );

    log::debug!(
        "Loaded level {}: {} platforms, {} stars, {} gems, {} enemies",
        number,
        layout.platforms.len(),
        layout.stars.len(),
        layout.gems.len(),
        layout.enemies.len()
    );

    Ok(LoadedLevel {
        number,
        layout,
        victory_bonus: 0,
    })
}

fn validate(layout: &LevelLayout) -> Result<(), LevelError> {
    let level = layout.number;
    let world = Rect::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT);

    let check_rect = |what: &'static str, r: Rect| -> Result<(), LevelError> {
        if r.w <= 0.0 || r.h <= 0.0 {
            return Err(LevelError::BadSize { level, what });
        }
        if r.x < world.x || r.y < world.y || r.right() > world.right() || r.bottom() > world.bottom() {
            return Err(LevelError::OutOfWorld {
                level,
                what,
                x: r.x,
                y: r.y,
            });
        }
        Ok(())
    };

    for p in &layout.platforms {
        check_rect("platform", p.rect())?;
    }
    for e in &layout.enemies {
        check_rect("enemy", Rect::new(e.x, e.y, ENEMY_SIZE, ENEMY_SIZE))?;
    }
    check_rect("flag", layout.flag_rect())?;

    let items = layout
        .stars
        .iter()
        .map(|p| ("star", p))
        .chain(layout.gems.iter().map(|p| ("gem", p)));
    for (what, p) in items {
        if !(0.0..=WORLD_WIDTH).contains(&p.x) || !(0.0..=WORLD_HEIGHT).contains(&p.y) {
            return Err(LevelError::OutOfWorld {
                level,
                what,
                x: p.x,
                y: p.y,
            });
        }
    }

    Ok(())
}
