//! Continuous dynamics: phase-space points, the Lorenz vector field and
//! fixed-step integrators.
//!
//! Integration follows the same split as a force-field/integrator pair:
//! a [`VectorField`] knows how to evaluate the derivative at a point, an
//! [`Integrator`] knows how to turn that derivative into a step. Neither
//! keeps any state between calls.

pub mod integrator;
pub mod lorenz;
pub mod state;

pub use integrator::{EulerIntegrator, Integrator, IntegratorKind, Rk4Integrator};
pub use lorenz::{LorenzSystem, VectorField};
pub use state::State;
