//! Per-frame simulation step
//!
//! Advances the world by one tick. The step never changes phase itself; it
//! reports hazards and goal contact and leaves the transitions to the state
//! machine.

use super::collision::{overlaps, point_in_rect};
use super::state::{Facing, GamePhase, GameState, Hazard, ItemKind};
use crate::consts::*;
use crate::settings::Settings;

/// Held inputs sampled at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// False when the phase was not `Playing` and nothing was touched
    pub ran: bool,
    /// Life-losing condition; the tick stopped right after detecting it
    pub hazard: Option<Hazard>,
    /// Player touched the goal flag
    pub goal_reached: bool,
    /// Items collected this tick, score already added
    pub pickups: Vec<ItemKind>,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, settings: &Settings) -> TickReport {
    let mut report = TickReport::default();
    if state.phase != GamePhase::Playing {
        return report;
    }
    report.ran = true;

    let player = &mut state.player;

    // Horizontal input; friction only decays, never zeroes
    if input.left {
        player.vel.x = -player.speed;
        player.facing = Facing::Left;
    } else if input.right {
        player.vel.x = player.speed;
        player.facing = Facing::Right;
    } else {
        player.vel.x *= settings.friction;
    }

    // No jumping while airborne
    if input.jump && player.grounded {
        player.vel.y = -player.jump_power;
        player.grounded = false;
    }

    player.vel.y += settings.gravity;
    player.pos += player.vel;

    // Only landings from above are resolved; sides and undersides clip
    player.grounded = false;
    for platform in &state.platforms {
        let top = platform.y;
        let rect = player.rect();
        if overlaps(&rect, &platform.rect())
            && player.vel.y > 0.0
            && rect.bottom() - player.vel.y <= top
        {
            player.pos.y = top - player.size.y;
            player.vel.y = 0.0;
            player.grounded = true;
        }
    }

    player.pos.x = player.pos.x.clamp(0.0, WORLD_WIDTH - player.size.x);

    let fell = player.pos.y > WORLD_HEIGHT;

    // Enemies keep patrolling on the frame the player falls out
    for enemy in &mut state.enemies {
        enemy.patrol(WORLD_WIDTH);
    }
    if fell {
        report.hazard = Some(Hazard::Fell);
        return report;
    }
    let player_rect = state.player.rect();
    if state
        .enemies
        .iter()
        .any(|enemy| overlaps(&player_rect, &enemy.rect()))
    {
        report.hazard = Some(Hazard::Enemy);
        return report;
    }

    let center = state.player.center();
    for item in state.items.iter_mut().filter(|item| !item.collected) {
        if point_in_rect(center.x, center.y, &item.pickup_rect()) {
            item.collected = true;
            state.score += item.kind.value();
            report.pickups.push(item.kind);
        }
    }

    if let Some(flag) = &state.flag {
        report.goal_reached = overlaps(&player_rect, flag);
    }

    report
}
