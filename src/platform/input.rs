//! Held-key table shared by every input source
//!
//! Keyboard events, the virtual joystick, and the touch jump button all write
//! here; the simulation samples it once per tick through [`HeldKeys::tick_input`].

use std::collections::HashMap;

use glam::Vec2;

use crate::sim::TickInput;

pub const KEY_LEFT: &str = "ArrowLeft";
pub const KEY_RIGHT: &str = "ArrowRight";
/// `KeyboardEvent.key` reports the space bar as a literal space
pub const KEY_JUMP: &str = " ";
pub const KEY_JUMP_ALT: &str = "Space";
pub const KEY_PAUSE: &str = "Escape";

/// Knob travel limit, in CSS pixels
pub const JOYSTICK_MAX_DISTANCE: f32 = 35.0;
/// Horizontal knob offset needed to count as a direction
pub const JOYSTICK_THRESHOLD: f32 = 10.0;

/// Edge-triggered commands (as opposed to held keys)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Pause,
}

/// Map a key press to a one-shot command
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        KEY_PAUSE => Some(Command::Pause),
        _ => None,
    }
}

/// Logical key name -> held state
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    keys: HashMap<String, bool>,
    jump_button: bool,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, held: bool) {
        self.keys.insert(key.to_string(), held);
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// Touch jump button
    pub fn set_jump_button(&mut self, held: bool) {
        self.jump_button = held;
    }

    /// Feed the joystick's drag offset from its center
    ///
    /// Returns the clamped knob offset for the overlay to draw.
    pub fn apply_joystick(&mut self, delta: Vec2) -> Vec2 {
        let knob = delta.clamp_length_max(JOYSTICK_MAX_DISTANCE);
        self.set(KEY_LEFT, knob.x < -JOYSTICK_THRESHOLD);
        self.set(KEY_RIGHT, knob.x > JOYSTICK_THRESHOLD);
        knob
    }

    /// Joystick released or cancelled
    pub fn release_joystick(&mut self) {
        self.set(KEY_LEFT, false);
        self.set(KEY_RIGHT, false);
    }

    /// Drop everything (e.g. on window blur, where key-up events are lost)
    pub fn clear(&mut self) {
        self.keys.clear();
        self.jump_button = false;
    }

    /// Sample the table for one tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.is_held(KEY_LEFT),
            right: self.is_held(KEY_RIGHT),
            jump: self.is_held(KEY_JUMP) || self.is_held(KEY_JUMP_ALT) || self.jump_button,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_maps_to_tick_input() {
        let mut keys = HeldKeys::new();
        keys.set("ArrowLeft", true);
        keys.set(" ", true);
        assert_eq!(
            keys.tick_input(),
            TickInput {
                left: true,
                right: false,
                jump: true,
            }
        );

        keys.set("ArrowLeft", false);
        keys.set(" ", false);
        keys.set("Space", true);
        assert_eq!(
            keys.tick_input(),
            TickInput {
                left: false,
                right: false,
                jump: true,
            }
        );
    }

    #[test]
    fn test_unrelated_keys_ignored() {
        let mut keys = HeldKeys::new();
        keys.set("a", true);
        keys.set("ArrowUp", true);
        assert_eq!(keys.tick_input(), TickInput::default());
    }

    #[test]
    fn test_joystick_matches_arrow_keys() {
        let mut keys = HeldKeys::new();

        let knob = keys.apply_joystick(Vec2::new(-80.0, 0.0));
        assert_eq!(knob, Vec2::new(-35.0, 0.0));
        assert!(keys.tick_input().left);
        assert!(!keys.tick_input().right);

        // Inside the dead zone
        keys.apply_joystick(Vec2::new(8.0, 30.0));
        assert_eq!(keys.tick_input(), TickInput::default());

        keys.apply_joystick(Vec2::new(20.0, 0.0));
        assert!(keys.tick_input().right);
        keys.release_joystick();
        assert_eq!(keys.tick_input(), TickInput::default());
    }

    #[test]
    fn test_jump_button() {
        let mut keys = HeldKeys::new();
        keys.set_jump_button(true);
        assert!(keys.tick_input().jump);
        keys.clear();
        assert!(!keys.tick_input().jump);
    }

    #[test]
    fn test_escape_is_pause_command() {
        assert_eq!(command_for_key("Escape"), Some(Command::Pause));
        assert_eq!(command_for_key("ArrowLeft"), None);
    }
}
