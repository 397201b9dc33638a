//! # lorenz-trace
//!
//! Simulation core for real-time Lorenz attractor visualizations.
//!
//! Advances N independent Lorenz trajectories with a fixed-step integrator
//! and records their recent history in fixed-capacity ring buffers that a
//! renderer can stream from every frame without reallocation:
//! - Deterministic stepping: same parameters and start point, same bits
//! - Seeded start points clustered around one anchor, so divergence shows
//! - Pause, clear, trace-count and parameter changes as plain method calls
//!
//! ## Example
//!
//! ```rust
//! use lorenz_trace::prelude::*;
//!
//! let config = EngineConfig::builder()
//!     .seed(42)
//!     .num_traces(4)
//!     .trace_capacity(1_000)
//!     .build();
//! let mut engine = SimulationEngine::new(config)?;
//!
//! engine.advance_frame();
//! for (i, trajectory) in engine.trajectories().iter().enumerate() {
//!     let window = trajectory.visible_window(engine.max_visible());
//!     assert_eq!(window.count, 1, "trace {i}");
//! }
//! # Ok::<(), lorenz_trace::TraceError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,  // Plain a*b + c keeps the textbook form of the equations
    clippy::imprecise_flops,
    clippy::float_cmp,         // Exact dt == 0.0 check is intentional
    clippy::missing_const_for_fn,
)]

pub mod cli;
pub mod config;
pub mod dynamics;
pub mod engine;
pub mod error;
pub mod trace;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{EngineConfig, EngineConfigBuilder};
    pub use crate::dynamics::{
        EulerIntegrator, Integrator, IntegratorKind, LorenzSystem, Rk4Integrator, State,
        VectorField,
    };
    pub use crate::engine::{
        FrameReport, ParameterPatch, Parameters, RunState, SeedPolicy, SimulationEngine,
    };
    pub use crate::error::{TraceError, TraceResult};
    pub use crate::trace::{TraceBuffer, Trajectory, VisibleWindow};
}

/// Re-export for public API
pub use error::{TraceError, TraceResult};
