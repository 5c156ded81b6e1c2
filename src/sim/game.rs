//! Game state machine
//!
//! `Game` is the context the driver owns. It gates the simulation step on the
//! phase, applies tick reports, loads levels, and keeps the frame loop and
//! countdown handles in step with every transition.

use super::level::{self, LoadedLevel};
use super::sched::{Countdown, FrameLoop, TimerHandle};
use super::state::{GameEvent, GamePhase, GameState, Hazard, LevelSummary};
use super::tick::{TickInput, TickReport, tick};
use crate::consts::TIME_BONUS_PER_SECOND;
use crate::error::{Action, LevelError, TransitionError};
use crate::settings::Settings;

/// Simulation context owned by the driver loop
#[derive(Debug)]
pub struct Game {
    state: GameState,
    settings: Settings,
    frames: FrameLoop,
    countdown: Countdown,
    /// Pending notifications for the UI driver
    events: Vec<GameEvent>,
    last_summary: Option<LevelSummary>,
}

impl Game {
    /// New game on the start screen with level 1 loaded
    pub fn new(settings: Settings) -> Result<Self, LevelError> {
        let mut state = GameState::new(&settings);
        let loaded = level::load_level(1)?;
        state.apply_level(&loaded);
        log::info!("Game ready on level {}", state.level);

        Ok(Self {
            state,
            settings,
            frames: FrameLoop::default(),
            countdown: Countdown::default(),
            events: Vec::new(),
            last_summary: None,
        })
    }

    /// Read-only snapshot for the renderer
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Breakdown of the most recent level completion
    pub fn last_summary(&self) -> Option<LevelSummary> {
        self.last_summary
    }

    /// Take all notifications queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Frame chain the driver has to kick off, if a transition armed one
    pub fn take_frame_request(&mut self) -> Option<TimerHandle> {
        self.frames.take_request()
    }

    /// Handle of the live countdown, if any
    pub fn countdown_handle(&self) -> Option<TimerHandle> {
        self.countdown.handle()
    }

    // === Driver transitions ===

    /// Start -> Playing
    pub fn start_game(&mut self) -> Result<(), TransitionError> {
        self.require(GamePhase::Start, Action::Start)?;
        self.enter_playing();
        Ok(())
    }

    /// Playing -> Paused, keeping all entity state
    pub fn pause(&mut self) -> Result<(), TransitionError> {
        self.require(GamePhase::Playing, Action::Pause)?;
        self.set_phase(GamePhase::Paused);
        self.halt_schedulers();
        Ok(())
    }

    /// Paused -> Playing
    pub fn resume(&mut self) -> Result<(), TransitionError> {
        self.require(GamePhase::Paused, Action::Resume)?;
        self.enter_playing();
        Ok(())
    }

    /// LevelComplete -> Playing on the following level
    pub fn next_level(&mut self) -> Result<(), TransitionError> {
        self.require(GamePhase::LevelComplete, Action::NextLevel)?;
        let loaded = level::load_level(self.state.level + 1)?;

        self.set_time(self.settings.start_time);
        self.apply_loaded(loaded);
        self.enter_playing();
        Ok(())
    }

    /// Any phase -> Playing with a fresh run on level 1
    pub fn restart_game(&mut self) -> Result<(), TransitionError> {
        let loaded = level::load_level(1).map_err(|e| {
            log::error!("Cannot {} run: {e}", Action::Restart);
            e
        })?;

        self.state.score = 0;
        self.state.lives = self.settings.start_lives;
        self.last_summary = None;
        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::LivesChanged(self.state.lives));
        self.set_time(self.settings.start_time);
        self.apply_loaded(loaded);
        self.enter_playing();
        log::info!("Run restarted");
        Ok(())
    }

    // === Scheduler callbacks ===

    /// One display frame; returns whether the chain should re-arm
    pub fn frame(&mut self, handle: TimerHandle, input: &TickInput) -> bool {
        if !self.frames.is_current(handle) {
            log::debug!("Dropping frame from stale chain {handle:?}");
            return false;
        }
        if self.state.phase != GamePhase::Playing {
            self.frames.disarm();
            return false;
        }

        let report = tick(&mut self.state, input, &self.settings);
        self.apply_report(report);

        self.frames.is_armed()
    }

    /// One-second interval callback
    pub fn countdown_fired(&mut self, handle: TimerHandle) {
        if !self.countdown.is_current(handle) {
            log::warn!("Ignoring stale countdown {handle:?}");
            return;
        }
        if self.state.phase != GamePhase::Playing {
            return;
        }

        self.set_time(self.state.time.saturating_sub(1));
        if self.state.time == 0 {
            self.lose_life(Hazard::Timeout);
        }
    }

    /// Drive the countdown from elapsed real time instead of interval callbacks
    pub fn advance_clock(&mut self, dt: f32) {
        for _ in 0..self.countdown.accumulate(dt) {
            match self.countdown.handle() {
                Some(handle) => self.countdown_fired(handle),
                None => break,
            }
        }
    }

    /// Take a life; ignored unless playing, so repeated requests are harmless
    ///
    /// Returns whether a life was actually taken.
    pub fn lose_life(&mut self, cause: Hazard) -> bool {
        if self.state.phase != GamePhase::Playing {
            log::debug!("Ignoring life loss ({cause:?}) while {:?}", self.state.phase);
            return false;
        }

        self.state.lives = self.state.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost(cause));
        self.events.push(GameEvent::LivesChanged(self.state.lives));
        log::info!("Life lost ({cause:?}), {} left", self.state.lives);

        if self.state.lives == 0 {
            self.game_over();
        } else {
            self.state.player.reset();
            self.set_time(self.settings.start_time);
            if self.settings.effective_screen_shake() {
                self.events.push(GameEvent::ScreenShake);
            }
        }
        true
    }

    // === Internal transitions ===

    fn apply_report(&mut self, report: TickReport) {
        for &kind in &report.pickups {
            self.events.push(GameEvent::ItemCollected {
                kind,
                value: kind.value(),
            });
        }
        if !report.pickups.is_empty() {
            self.events.push(GameEvent::ScoreChanged(self.state.score));
        }

        // Hazards first; the step already skipped items and goal after one
        if let Some(cause) = report.hazard {
            self.lose_life(cause);
        } else if report.goal_reached {
            self.complete_level();
        }
    }

    /// Playing -> LevelComplete with the time bonus applied
    fn complete_level(&mut self) {
        self.set_phase(GamePhase::LevelComplete);
        self.halt_schedulers();

        let score_before_bonus = self.state.score;
        let time_bonus = u64::from(self.state.time) * TIME_BONUS_PER_SECOND;
        self.state.score += time_bonus;

        let summary = LevelSummary {
            level: self.state.level,
            score_before_bonus,
            time_bonus,
            final_score: self.state.score,
        };
        self.last_summary = Some(summary);
        self.events.push(GameEvent::LevelCompleted(summary));
        self.events.push(GameEvent::ScoreChanged(self.state.score));
        log::info!(
            "Level {} complete: {} + {} time bonus",
            summary.level,
            score_before_bonus,
            time_bonus
        );
    }

    /// Playing -> GameOver; the score is frozen from here on
    fn game_over(&mut self) {
        self.set_phase(GamePhase::GameOver);
        self.halt_schedulers();
        self.events.push(GameEvent::GameOver {
            final_score: self.state.score,
        });
        log::info!("Game over, final score {}", self.state.score);
    }

    fn enter_playing(&mut self) {
        self.set_phase(GamePhase::Playing);
        let (stopped, started) = self.countdown.restart();
        if let Some(handle) = stopped {
            self.events.push(GameEvent::CountdownStopped(handle));
        }
        self.events.push(GameEvent::CountdownStarted(started));
        self.frames.arm();
    }

    fn halt_schedulers(&mut self) {
        if let Some(handle) = self.countdown.stop() {
            self.events.push(GameEvent::CountdownStopped(handle));
        }
        self.frames.disarm();
    }

    fn apply_loaded(&mut self, loaded: LoadedLevel) {
        self.state.apply_level(&loaded);
        self.events.push(GameEvent::LevelChanged(self.state.level));
        if loaded.victory_bonus > 0 {
            self.state.score += loaded.victory_bonus;
            self.events.push(GameEvent::VictoryLoop {
                bonus: loaded.victory_bonus,
            });
            self.events.push(GameEvent::ScoreChanged(self.state.score));
        }
        log::info!("Level {} loaded", self.state.level);
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.state.phase;
        self.state.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
        log::info!("Phase {from:?} -> {to:?}");
    }

    fn set_time(&mut self, time: u32) {
        self.state.time = time;
        self.events.push(GameEvent::TimeChanged(time));
    }

    fn require(&self, phase: GamePhase, action: Action) -> Result<(), TransitionError> {
        if self.state.phase == phase {
            Ok(())
        } else {
            log::warn!("Rejected {action} while {:?}", self.state.phase);
            Err(TransitionError::Illegal {
                from: self.state.phase,
                action,
            })
        }
    }
}
