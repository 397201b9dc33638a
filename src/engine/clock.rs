//! Frame and step bookkeeping.
//!
//! Unlike a fixed-timestep clock, `dt` here is a live parameter that can
//! change between frames (or go negative), so simulated time is accumulated
//! from whatever `dt` each frame actually used.

use serde::{Deserialize, Serialize};

/// Counts frames, integration steps and simulated time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameClock {
    /// Frames that performed work since construction.
    frames: u64,
    /// Integration steps per trajectory since the last reseed.
    steps: u64,
    /// Simulated time since the last reseed.
    sim_time: f64,
}

impl FrameClock {
    /// Create a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames that performed work.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Integration steps per trajectory since the last reseed.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time since the last reseed.
    #[must_use]
    pub const fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Record one frame of `steps` steps of length `dt`.
    #[allow(clippy::missing_const_for_fn)] // Mutable const not stable
    pub fn record_frame(&mut self, steps: u32, dt: f64) {
        self.frames += 1;
        self.steps += u64::from(steps);
        self.sim_time += f64::from(steps) * dt;
    }

    /// Zero steps and simulated time; the frame count is kept.
    #[allow(clippy::missing_const_for_fn)] // Mutable const not stable
    pub fn restart(&mut self) {
        self.steps = 0;
        self.sim_time = 0.0;
    }
}
