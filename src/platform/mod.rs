//! Platform abstraction layer
//!
//! Browser and native drivers both feed input through here:
//! - Keyboard keys by logical name
//! - Virtual joystick and jump button (touch), folded into the same keys

pub mod input;

pub use input::{Command, HeldKeys, command_for_key};
