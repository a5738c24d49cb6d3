use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

use serde::{Deserialize, Serialize};

/// Playback state of a [`Clock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackState {
    Running,
    Paused,
}

/// Elapsed-time accumulator gated by start/stop signals.
///
/// The clock never reads the wall clock itself: the host feeds it frame
/// deltas through [`Clock::advance`]. While paused, deltas are dropped, so
/// resuming continues from the frozen elapsed time instead of jumping over
/// the pause or resetting to zero.
#[derive(Debug, Clone)]
pub struct Clock {
    elapsed: f32,
    state: PlaybackState,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Creates a running clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            state: PlaybackState::Running,
        }
    }

    /// Creates a paused clock at zero.
    #[must_use]
    pub fn paused() -> Self {
        Self {
            elapsed: 0.0,
            state: PlaybackState::Paused,
        }
    }

    /// Resumes accumulation. Returns `false` if the clock was already running.
    pub fn start(&mut self) -> bool {
        let changed = self.state == PlaybackState::Paused;
        self.state = PlaybackState::Running;
        changed
    }

    /// Freezes accumulation. Returns `false` if the clock was already paused.
    pub fn stop(&mut self) -> bool {
        let changed = self.state == PlaybackState::Running;
        self.state = PlaybackState::Paused;
        changed
    }

    /// Adds `dt` seconds while running and returns the delta actually applied.
    ///
    /// Non-finite or negative deltas are treated as zero.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.state == PlaybackState::Paused {
            return 0.0;
        }
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("Ignoring malformed frame delta: {dt}");
            return 0.0;
        }
        self.elapsed += dt;
        dt
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }
}

/// Wall-clock frame timer for native hosts that do not get a delta from
/// their redraw scheduler.
pub struct Timer {
    last_update: Instant,
    /// Time since last tick
    pub delta: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Creates a new timer starting from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Samples the wall clock and returns seconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta = now - self.last_update;
        self.last_update = now;
        self.frame_count += 1;
        self.dt_seconds()
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}
