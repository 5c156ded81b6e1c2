//! Game state and core simulation types
//!
//! Everything the renderer draws and the step mutates lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::level::{EnemySpawn, LoadedLevel, Platform};
use super::sched::TimerHandle;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Start,
    /// Active gameplay
    Playing,
    /// Game is paused, all state retained
    Paused,
    /// Lives exhausted
    GameOver,
    /// Goal reached, waiting for next level
    LevelComplete,
}

/// Horizontal facing / patrol direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Horizontal speed while a direction is held
    pub speed: f32,
    /// Upward impulse on jump
    pub jump_power: f32,
    /// Resting on a platform (may jump)
    pub grounded: bool,
    pub facing: Facing,
}

impl Player {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::splat(PLAYER_SIZE),
            vel: Vec2::ZERO,
            speed: settings.player_speed,
            jump_power: settings.jump_power,
            grounded: false,
            facing: Facing::Right,
        }
    }

    /// Back to the level start position, at rest and airborne
    pub fn reset(&mut self) {
        self.pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        self.vel = Vec2::ZERO;
        self.grounded = false;
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    /// Speed magnitude per tick
    pub speed: f32,
    pub direction: Facing,
}

impl Enemy {
    pub fn from_spawn(spawn: &EnemySpawn) -> Self {
        Self {
            pos: Vec2::new(spawn.x, spawn.y),
            size: Vec2::splat(ENEMY_SIZE),
            speed: spawn.speed,
            direction: spawn.direction,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.size)
    }

    /// Move one tick, reflecting at the world's horizontal edges
    pub fn patrol(&mut self, world_width: f32) {
        self.pos.x += self.speed * self.direction.sign();

        let max_x = world_width - self.size.x;
        let at_left = self.pos.x <= 0.0 && self.direction == Facing::Left;
        let at_right = self.pos.x >= max_x && self.direction == Facing::Right;
        if at_left || at_right {
            self.direction = self.direction.flipped();
        }
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Collectible star
    Star,
    /// Power-up gem
    Gem,
}

impl ItemKind {
    pub fn value(self) -> u64 {
        match self {
            ItemKind::Star => STAR_VALUE,
            ItemKind::Gem => GEM_VALUE,
        }
    }

    /// Half size of the square the player's center must touch
    pub fn half_extent(self) -> f32 {
        match self {
            ItemKind::Star => STAR_HALF_EXTENT,
            ItemKind::Gem => GEM_HALF_EXTENT,
        }
    }
}

/// A pickup entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    /// Center point
    pub pos: Vec2,
    /// One-way: never resets within a level
    pub collected: bool,
}

impl Item {
    pub fn new(kind: ItemKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            collected: false,
        }
    }

    pub fn pickup_rect(&self) -> Rect {
        Rect::centered(self.pos, self.kind.half_extent())
    }
}

/// What cost the player a life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hazard {
    /// Touched an enemy
    Enemy,
    /// Fell below the world
    Fell,
    /// Countdown reached zero
    Timeout,
}

/// Score breakdown shown on the level complete screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub level: u32,
    pub score_before_bonus: u64,
    pub time_bonus: u64,
    pub final_score: u64,
}

/// Notifications for the UI/overlay driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    ScoreChanged(u64),
    LivesChanged(u8),
    LevelChanged(u32),
    TimeChanged(u32),
    ItemCollected { kind: ItemKind, value: u64 },
    LifeLost(Hazard),
    /// Transient shake cue after a non-fatal life loss
    ScreenShake,
    VictoryLoop { bonus: u64 },
    LevelCompleted(LevelSummary),
    GameOver { final_score: u64 },
    CountdownStarted(TimerHandle),
    CountdownStopped(TimerHandle),
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Score, persists across levels within a run
    pub score: u64,
    /// Player lives
    pub lives: u8,
    /// Current level number (1-based)
    pub level: u32,
    /// Countdown seconds remaining
    pub time: u32,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    /// Stars first, then gems, in authored order
    pub items: Vec<Item>,
    pub flag: Option<Rect>,
}

impl GameState {
    /// Fresh run state with an empty world
    pub fn new(settings: &Settings) -> Self {
        Self {
            phase: GamePhase::Start,
            score: 0,
            lives: settings.start_lives,
            level: 1,
            time: settings.start_time,
            player: Player::new(settings),
            platforms: Vec::new(),
            enemies: Vec::new(),
            items: Vec::new(),
            flag: None,
        }
    }

    /// Replace the world with a loaded level and put the player at the start
    pub fn apply_level(&mut self, loaded: &LoadedLevel) {
        let layout = &loaded.layout;
        self.level = loaded.number;
        self.platforms = layout.platforms.clone();
        self.enemies = layout.enemies.iter().map(Enemy::from_spawn).collect();
        self.items = layout
            .stars
            .iter()
            .map(|&p| Item::new(ItemKind::Star, p))
            .chain(layout.gems.iter().map(|&p| Item::new(ItemKind::Gem, p)))
            .collect();
        self.flag = Some(layout.flag_rect());
        self.player.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::load_level;
    use proptest::prelude::*;

    #[test]
    fn test_apply_level_populates_world() {
        let settings = Settings::default();
        let mut state = GameState::new(&settings);
        state.player.pos = Vec2::new(500.0, 10.0);
        state.player.vel = Vec2::new(3.0, -4.0);

        state.apply_level(&load_level(2).unwrap());

        assert_eq!(state.level, 2);
        assert_eq!(state.enemies.len(), 3);
        assert_eq!(state.items.len(), 7);
        assert!(state.items[..5].iter().all(|i| i.kind == ItemKind::Star));
        assert!(state.items[5..].iter().all(|i| i.kind == ItemKind::Gem));
        assert_eq!(state.flag, Some(Rect::new(720.0, 520.0, 30.0, 48.0)));
        assert_eq!(state.player.pos, Vec2::new(100.0, 400.0));
        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_enemy_flips_at_left_edge() {
        let mut enemy = Enemy::from_spawn(&EnemySpawn {
            x: 0.0,
            y: 100.0,
            speed: 2.0,
            direction: Facing::Left,
        });
        enemy.patrol(WORLD_WIDTH);
        assert_eq!(enemy.direction, Facing::Right);
        assert_eq!(enemy.pos.x, 0.0);

        enemy.patrol(WORLD_WIDTH);
        assert_eq!(enemy.pos.x, 2.0);
    }

    #[test]
    fn test_enemy_flips_at_right_edge() {
        let mut enemy = Enemy::from_spawn(&EnemySpawn {
            x: 768.0,
            y: 100.0,
            speed: 2.0,
            direction: Facing::Right,
        });
        enemy.patrol(WORLD_WIDTH);
        assert_eq!(enemy.pos.x, 770.0);
        assert_eq!(enemy.direction, Facing::Left);
    }

    #[test]
    fn test_item_pickup_rect() {
        let gem = Item::new(ItemKind::Gem, Vec2::new(300.0, 320.0));
        assert_eq!(gem.pickup_rect(), Rect::new(288.0, 308.0, 24.0, 24.0));
        assert_eq!(gem.kind.value(), 500);
        assert_eq!(ItemKind::Star.value(), 100);
    }

    proptest! {
        #[test]
        fn prop_enemy_stays_in_world(
            x in 0.0f32..770.0,
            speed in 0.5f32..40.0,
            left in any::<bool>(),
            ticks in 1usize..600,
        ) {
            let mut enemy = Enemy::from_spawn(&EnemySpawn {
                x,
                y: 100.0,
                speed,
                direction: if left { Facing::Left } else { Facing::Right },
            });
            for _ in 0..ticks {
                enemy.patrol(WORLD_WIDTH);
                prop_assert!(enemy.pos.x >= 0.0);
                prop_assert!(enemy.pos.x <= WORLD_WIDTH - ENEMY_SIZE);
            }
        }
    }
}
