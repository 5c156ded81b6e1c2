//! Error types for level loading and phase transitions.
//!
//! Gameplay hazards are never errors; these only cover bad authored data and
//! driver calls that the current phase does not allow.

use std::fmt;

use crate::sim::GamePhase;

/// Problems found while loading authored level data.
#[derive(Debug)]
pub enum LevelError {
    /// The embedded layout document failed to parse.
    Malformed(serde_json::Error),
    /// The document parsed but has no entry for this level.
    Missing(u32),
    /// A rectangle has zero or negative width/height.
    BadSize {
        /// Level being loaded.
        level: u32,
        /// Which entity carried the bad size.
        what: &'static str,
    },
    /// An entity sits (partly) outside the world.
    OutOfWorld {
        /// Level being loaded.
        level: u32,
        /// Which entity is out of bounds.
        what: &'static str,
        x: f32,
        y: f32,
    },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Malformed(err) => write!(f, "malformed level data: {err}"),
            LevelError::Missing(level) => write!(f, "no layout authored for level {level}"),
            LevelError::BadSize { level, what } => {
                write!(f, "level {level}: {what} has a non-positive size")
            }
            LevelError::OutOfWorld { level, what, x, y } => {
                write!(f, "level {level}: {what} at ({x}, {y}) is outside the world")
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(err: serde_json::Error) -> Self {
        LevelError::Malformed(err)
    }
}

/// Driver-requested actions on the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Pause,
    Resume,
    NextLevel,
    Restart,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Start => "start",
            Action::Pause => "pause",
            Action::Resume => "resume",
            Action::NextLevel => "next level",
            Action::Restart => "restart",
        };
        f.write_str(name)
    }
}

/// Why a driver call on the state machine did not happen.
#[derive(Debug)]
pub enum TransitionError {
    /// The action is not allowed from the current phase.
    Illegal {
        /// Phase the game was in.
        from: GamePhase,
        /// What was requested.
        action: Action,
    },
    /// The target level could not be loaded; state is unchanged.
    Level(LevelError),
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::Illegal { from, action } => {
                write!(f, "cannot {action} while {from:?}")
            }
            TransitionError::Level(err) => write!(f, "level load failed: {err}"),
        }
    }
}

impl std::error::Error for TransitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransitionError::Level(err) => Some(err),
            TransitionError::Illegal { .. } => None,
        }
    }
}

impl From<LevelError> for TransitionError {
    fn from(err: LevelError) -> Self {
        TransitionError::Level(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_transition_message() {
        let err = TransitionError::Illegal {
            from: GamePhase::GameOver,
            action: Action::Pause,
        };
        assert_eq!(err.to_string(), "cannot pause while GameOver");
    }

    #[test]
    fn test_level_error_chains_source() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = TransitionError::from(LevelError::from(parse));
        let level = std::error::Error::source(&err).expect("level source");
        assert!(std::error::Error::source(level).is_some());
    }
}
