// src/progress.rs
//! Upload-progress state machine, decoupled from any clock.
//!
//! The bar is cosmetic: it creeps toward a ceiling while analysis runs and
//! snaps to 100 only when a result actually lands. The transitions live
//! here and the timers live in the drivers (CLI spinner, web page), so the
//! sequence is testable without sleeping.

use std::time::Duration;

/// Where the ticker currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    /// Creeping toward the ceiling.
    Running,
    /// Analysis finished, bar pinned at 100.
    Done,
    /// Bar dismissed, no further transitions.
    Hidden,
}

/// Cosmetic progress bar: appears at 10%, creeps by 10 to a 95% park, jumps
/// to 100% when a run completes, then hides. A failed run skips `complete`
/// and hides with the bar frozen where it was.
#[derive(Debug, Clone)]
pub struct ProgressTicker {
    percent: u8,
    state: ProgressState,
}

impl ProgressTicker {
    /// Percent shown the moment the bar appears.
    pub const START: u8 = 10;
    /// Added on every running tick.
    pub const STEP: u8 = 10;
    /// Running ticks park here; only `complete` goes higher.
    pub const CEILING: u8 = 95;
    /// How often drivers call `tick`.
    pub const TICK_INTERVAL: Duration = Duration::from_millis(200);
    /// How long drivers keep the bar on screen after the run ends.
    pub const HIDE_DELAY: Duration = Duration::from_millis(500);

    pub fn new() -> Self {
        Self {
            percent: Self::START,
            state: ProgressState::Running,
        }
    }

    /// Advance one cosmetic step, parking at [`Self::CEILING`]. Once the
    /// ticker is done or hidden this is a no-op.
    pub fn tick(&mut self) -> u8 {
        if self.state == ProgressState::Running {
            self.percent = (self.percent + Self::STEP).min(Self::CEILING);
        }
        self.percent
    }

    /// Pin the bar to 100 for a finished run. Ignored once hidden.
    pub fn complete(&mut self) {
        if self.state != ProgressState::Hidden {
            self.state = ProgressState::Done;
            self.percent = 100;
        }
    }

    /// Dismiss the bar. Terminal: every later transition is a no-op.
    pub fn hide(&mut self) {
        self.state = ProgressState::Hidden;
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }

    /// True until `hide` is called.
    pub fn is_visible(&self) -> bool {
        self.state != ProgressState::Hidden
    }
}

impl Default for ProgressTicker {
    fn default() -> Self {
        Self::new()
    }
}
