//! Frame loop and countdown scheduling handles
//!
//! Neither scheduler owns a real timer. They hand out generation-stamped
//! handles to the driver (requestAnimationFrame / setInterval in the browser,
//! an accumulator natively) and ignore callbacks carrying a handle that has
//! since been stopped. Starting always stops the previous handle first, so at
//! most one frame chain and one countdown are ever live.

use serde::{Deserialize, Serialize};

/// Identifies one armed frame chain or one running countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u32);

/// Generation counter with at most one live handle
#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    active: Option<TimerHandle>,
}

impl Slot {
    fn open(&mut self) -> TimerHandle {
        self.generation = self.generation.wrapping_add(1);
        let handle = TimerHandle(self.generation);
        self.active = Some(handle);
        handle
    }

    fn close(&mut self) -> Option<TimerHandle> {
        self.active.take()
    }

    fn is_current(&self, handle: TimerHandle) -> bool {
        self.active == Some(handle)
    }
}

/// Display-synchronised frame callback chain
///
/// The chain keeps its handle while it re-arms itself each frame; leaving
/// `Playing` disarms it and the next callback simply does not re-arm.
#[derive(Debug, Default)]
pub struct FrameLoop {
    slot: Slot,
    /// Handle the driver still has to request a first frame for
    pending: Option<TimerHandle>,
}

impl FrameLoop {
    /// Arm the loop; a no-op if a chain is already live
    pub fn arm(&mut self) {
        if self.slot.active.is_none() {
            self.pending = Some(self.slot.open());
        }
    }

    pub fn disarm(&mut self) {
        self.slot.close();
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.slot.active.is_some()
    }

    /// Whether a callback from this chain should run
    pub fn is_current(&self, handle: TimerHandle) -> bool {
        self.slot.is_current(handle)
    }

    /// New chain the driver must start, if any
    pub fn take_request(&mut self) -> Option<TimerHandle> {
        self.pending.take()
    }
}

/// One-second countdown cadence, independent of the frame rate
#[derive(Debug, Default)]
pub struct Countdown {
    slot: Slot,
    /// Seconds elapsed toward the next whole second (accumulator driving)
    accumulator: f32,
}

impl Countdown {
    /// Stop any running countdown, then start a fresh one
    ///
    /// Returns the stopped handle (if one was live) and the new handle.
    pub fn restart(&mut self) -> (Option<TimerHandle>, TimerHandle) {
        let stopped = self.stop();
        (stopped, self.slot.open())
    }

    /// Stop the countdown; returns the handle that was live
    pub fn stop(&mut self) -> Option<TimerHandle> {
        self.accumulator = 0.0;
        self.slot.close()
    }

    pub fn is_running(&self) -> bool {
        self.slot.active.is_some()
    }

    /// Whether a fired interval callback belongs to the live countdown
    pub fn is_current(&self, handle: TimerHandle) -> bool {
        self.slot.is_current(handle)
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.slot.active
    }

    /// Add elapsed real time; returns the number of whole seconds that passed
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        if !self.is_running() || dt <= 0.0 {
            return 0;
        }
        self.accumulator += dt;
        let seconds = self.accumulator.floor();
        self.accumulator -= seconds;
        seconds as u32
    }
}
