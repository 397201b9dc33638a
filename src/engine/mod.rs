//! Core simulation engine.
//!
//! Owns every trajectory together with the parameters, RNG, pause state and
//! frame clock, and exposes the per-frame protocol a renderer drives:
//! - [`SimulationEngine::advance_frame`] once per render tick
//! - read accessors for positions and visible windows
//! - mutators matching the user-facing controls
//!
//! All state lives in the engine value; there is nothing process-wide.

pub mod clock;
pub mod params;
pub mod rng;
pub mod run_state;
pub mod seeding;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

pub use clock::FrameClock;
pub use params::{ParameterPatch, Parameters};
pub use rng::SimRng;
pub use run_state::RunState;
pub use seeding::{generate_start_points, SeedPolicy};

use crate::config::EngineConfig;
use crate::dynamics::{Integrator, IntegratorKind, LorenzSystem, State};
use crate::error::{TraceError, TraceResult};
use crate::trace::{Trajectory, VisibleWindow};

/// What one call to [`SimulationEngine::advance_frame`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Integration steps performed per trajectory (0 when paused).
    pub steps: u32,
    /// Trajectories whose state became non-finite during this frame.
    pub newly_diverged: Vec<usize>,
}

/// Main simulation engine.
pub struct SimulationEngine {
    /// Trajectories in creation order; the index is the render index.
    trajectories: Vec<Trajectory>,
    /// Live parameters.
    params: Parameters,
    /// Construction-time parameters, restored by `reset_parameters`.
    defaults: Parameters,
    /// Stepping rule.
    integrator: Box<dyn Integrator + Send + Sync>,
    integrator_kind: IntegratorKind,
    /// Start-point source.
    rng: SimRng,
    seeding: SeedPolicy,
    trace_capacity: usize,
    max_visible: usize,
    run_state: RunState,
    clock: FrameClock,
}

impl std::fmt::Debug for SimulationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationEngine")
            .field("num_traces", &self.trajectories.len())
            .field("params", &self.params)
            .field("integrator", &self.integrator_kind)
            .field("seed", &self.rng.master_seed())
            .field("trace_capacity", &self.trace_capacity)
            .field("max_visible", &self.max_visible)
            .field("run_state", &self.run_state)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl SimulationEngine {
    /// Create an engine from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if configuration validation fails.
    pub fn new(config: EngineConfig) -> TraceResult<Self> {
        config.check()?;

        let mut rng = SimRng::from_optional_seed(config.seed);
        let starts = generate_start_points(&mut rng, config.num_traces, &config.seeding);
        let trajectories = Self::build_trajectories(&starts, config.trace_capacity)?;

        info!(
            "engine started: {} traces x {} points, integrator {:?}, seed {}",
            config.num_traces,
            config.trace_capacity,
            config.integrator,
            rng.master_seed()
        );

        Ok(Self {
            trajectories,
            params: config.parameters,
            defaults: config.parameters,
            integrator: config.integrator.build(),
            integrator_kind: config.integrator,
            rng,
            seeding: config.seeding,
            trace_capacity: config.trace_capacity,
            max_visible: config.max_visible,
            run_state: RunState::Running,
            clock: FrameClock::new(),
        })
    }

    fn build_trajectories(starts: &[State], capacity: usize) -> TraceResult<Vec<Trajectory>> {
        starts
            .iter()
            .map(|&start| Trajectory::new(start, capacity))
            .collect()
    }

    // ===== Per-frame stepping =====

    /// Advance every trajectory by `steps_per_frame` steps.
    ///
    /// Parameters are copied once at entry, so every trajectory and every
    /// sub-step of this frame sees the same values. Does nothing while
    /// paused.
    pub fn advance_frame(&mut self) -> FrameReport {
        if self.run_state.is_paused() {
            return FrameReport::default();
        }

        let params = self.params;
        let field = params.lorenz();
        let steps = params.steps_per_frame;

        let newly_diverged = self.step_all(&field, params.dt, steps);
        for &index in &newly_diverged {
            warn!(
                "trace {index} diverged to a non-finite state (sigma={}, rho={}, beta={}, dt={})",
                params.sigma, params.rho, params.beta, params.dt
            );
        }

        self.clock.record_frame(steps, params.dt);
        FrameReport {
            steps,
            newly_diverged,
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn step_all(&mut self, field: &LorenzSystem, dt: f64, steps: u32) -> Vec<usize> {
        let integrator = self.integrator.as_ref();
        self.trajectories
            .iter_mut()
            .enumerate()
            .filter_map(|(i, t)| Self::step_one(t, integrator, field, dt, steps).then_some(i))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn step_all(&mut self, field: &LorenzSystem, dt: f64, steps: u32) -> Vec<usize> {
        use rayon::prelude::*;

        let integrator = self.integrator.as_ref();
        self.trajectories
            .par_iter_mut()
            .enumerate()
            .filter_map(|(i, t)| Self::step_one(t, integrator, field, dt, steps).then_some(i))
            .collect()
    }

    /// Run `steps` cycles on one trajectory; true if it diverged during them.
    fn step_one(
        trajectory: &mut Trajectory,
        integrator: &(dyn Integrator + Send + Sync),
        field: &LorenzSystem,
        dt: f64,
        steps: u32,
    ) -> bool {
        let mut diverged = false;
        for _ in 0..steps {
            diverged |= trajectory.advance(integrator, field, dt);
        }
        diverged
    }

    // ===== Reconfiguration =====

    /// Replace all trajectories with `n` fresh ones.
    ///
    /// Always regenerates, even when `n` equals the current count.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InvalidTraceCount`] if `n` is zero; the
    /// current trajectories are left untouched.
    pub fn set_trace_count(&mut self, n: usize) -> TraceResult<()> {
        if n == 0 {
            return Err(TraceError::InvalidTraceCount { count: n });
        }

        let starts = generate_start_points(&mut self.rng, n, &self.seeding);
        self.trajectories = Self::build_trajectories(&starts, self.trace_capacity)?;
        self.clock.restart();

        info!("trace count set to {n}");
        Ok(())
    }

    /// Clear every buffer in place and reseed every trajectory around a
    /// new anchor. Buffers keep their allocation.
    pub fn clear_traces(&mut self) {
        let starts = generate_start_points(&mut self.rng, self.trajectories.len(), &self.seeding);
        for (trajectory, start) in self.trajectories.iter_mut().zip(starts) {
            trajectory.reseed(start);
        }
        self.clock.restart();

        info!("cleared {} traces", self.trajectories.len());
    }

    /// Merge `patch` into the live parameters. Takes effect next frame.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the patch sets `steps_per_frame` to
    /// zero; nothing is applied in that case.
    pub fn update_parameters(&mut self, patch: &ParameterPatch) -> TraceResult<()> {
        self.params.apply(patch)?;
        debug!("parameters updated: {:?}", self.params);
        Ok(())
    }

    /// Restore σ, ρ and β to their construction-time values.
    ///
    /// dt, steps per frame, trajectories and pause state are unchanged.
    pub fn reset_parameters(&mut self) {
        self.params.restore_shape(&self.defaults);
        info!(
            "parameters reset to sigma={}, rho={}, beta={}",
            self.params.sigma, self.params.rho, self.params.beta
        );
    }

    // ===== Pause =====

    /// Set the pause state.
    pub fn set_paused(&mut self, paused: bool) {
        let next = RunState::from_paused(paused);
        if next != self.run_state {
            info!("simulation {next}");
        }
        self.run_state = next;
    }

    /// Flip between running and paused. Returns the new state.
    pub fn toggle_paused(&mut self) -> RunState {
        self.run_state = self.run_state.toggled();
        info!("simulation {}", self.run_state);
        self.run_state
    }

    /// True while paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.run_state.is_paused()
    }

    /// Current pause state.
    #[must_use]
    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    // ===== Read accessors =====

    /// All trajectories in render order.
    #[must_use]
    pub fn trajectories(&self) -> &[Trajectory] {
        &self.trajectories
    }

    /// Trajectory at `index`.
    #[must_use]
    pub fn trajectory(&self, index: usize) -> Option<&Trajectory> {
        self.trajectories.get(index)
    }

    /// Number of trajectories.
    #[must_use]
    pub fn num_traces(&self) -> usize {
        self.trajectories.len()
    }

    /// Current positions in render order.
    #[must_use]
    pub fn positions(&self) -> Vec<State> {
        self.trajectories.iter().map(Trajectory::position).collect()
    }

    /// Visible window of trajectory `index` using the configured bound.
    #[must_use]
    pub fn visible_window(&self, index: usize) -> Option<VisibleWindow> {
        self.trajectory(index)
            .map(|t| t.visible_window(self.max_visible))
    }

    /// Configured visible window bound.
    #[must_use]
    pub const fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// Per-trajectory buffer capacity.
    #[must_use]
    pub const fn trace_capacity(&self) -> usize {
        self.trace_capacity
    }

    /// Live parameters.
    #[must_use]
    pub const fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Construction-time parameters.
    #[must_use]
    pub const fn default_parameters(&self) -> &Parameters {
        &self.defaults
    }

    /// Selected integrator.
    #[must_use]
    pub const fn integrator_kind(&self) -> IntegratorKind {
        self.integrator_kind
    }

    /// Master seed of the start-point RNG.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rng.master_seed()
    }

    /// Frame and step counters.
    #[must_use]
    pub const fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Indices of trajectories whose state is NaN or infinite.
    ///
    /// Diagnostic only: such values are never clamped or reset.
    #[must_use]
    pub fn diverged_traces(&self) -> Vec<usize> {
        self.trajectories
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_finite())
            .map(|(i, _)| i)
            .collect()
    }
}
