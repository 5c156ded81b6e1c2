//! Rendering seam
//!
//! The crate does not draw. After every executed tick the driver hands the
//! read-only state to a [`Renderer`]; in the browser that is a JSON snapshot
//! passed to the page's canvas code, natively a trace log.

use crate::sim::GameState;

pub trait Renderer {
    fn draw(&mut self, state: &GameState);
}

/// Serialize the full state for a page-side drawer
pub fn snapshot_json(state: &GameState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

/// Headless renderer: logs a one-line summary per frame
#[derive(Debug, Default)]
pub struct TraceRenderer {
    frames: u64,
}

impl TraceRenderer {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for TraceRenderer {
    fn draw(&mut self, state: &GameState) {
        self.frames += 1;
        log::trace!(
            "frame {}: {:?} player=({:.1}, {:.1}) score={} lives={} time={}",
            self.frames,
            state.phase,
            state.player.pos.x,
            state.player.pos.y,
            state.score,
            state.lives,
            state.time
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::load_level;

    #[test]
    fn test_snapshot_round_trips() {
        let mut state = GameState::new(&Settings::default());
        state.apply_level(&load_level(1).unwrap());

        let json = snapshot_json(&state).unwrap();
        assert!(json.contains("\"phase\":\"Start\""));
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_trace_renderer_counts_frames() {
        let state = GameState::new(&Settings::default());
        let mut renderer = TraceRenderer::default();
        renderer.draw(&state);
        renderer.draw(&state);
        assert_eq!(renderer.frames(), 2);
    }
}
