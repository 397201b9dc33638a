//! The Lorenz vector field.
//!
//! # Governing Equations
//!
//! ```text
//! dx/dt = σ·(y − x)
//! dy/dt = x·(ρ − z) − y
//! dz/dt = x·y − β·z
//! ```
//!
//! With σ = 10, ρ = 28, β = 8/3 the system is in its classic chaotic regime.

use serde::{Deserialize, Serialize};

use super::state::State;

/// Default Prandtl number σ.
pub const DEFAULT_SIGMA: f64 = 10.0;
/// Default Rayleigh number ρ.
pub const DEFAULT_RHO: f64 = 28.0;
/// Default geometric factor β.
pub const DEFAULT_BETA: f64 = 8.0 / 3.0;

/// Vector field trait for computing time derivatives.
pub trait VectorField {
    /// Evaluate the derivative at `state`.
    ///
    /// Implementations must be pure: the result depends only on `state`
    /// and the field's own parameters.
    fn derivative(&self, state: &State) -> State;
}

/// Lorenz system with its three shape parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LorenzSystem {
    /// σ: ratio of momentum to thermal diffusivity.
    pub sigma: f64,
    /// ρ: ratio of buoyancy to viscous forces.
    pub rho: f64,
    /// β: geometric aspect factor.
    pub beta: f64,
}

impl Default for LorenzSystem {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
            rho: DEFAULT_RHO,
            beta: DEFAULT_BETA,
        }
    }
}

impl LorenzSystem {
    /// Create a Lorenz system with explicit parameters.
    #[must_use]
    pub const fn new(sigma: f64, rho: f64, beta: f64) -> Self {
        Self { sigma, rho, beta }
    }

    /// Equilibria of the system.
    ///
    /// The origin is always a fixed point. For ρ > 1 the two convection
    /// points C± = (±√(β(ρ−1)), ±√(β(ρ−1)), ρ−1) appear as well.
    #[must_use]
    pub fn fixed_points(&self) -> Vec<State> {
        if self.rho <= 1.0 {
            return vec![State::zero()];
        }
        let c = (self.beta * (self.rho - 1.0)).sqrt();
        let z = self.rho - 1.0;
        vec![State::zero(), State::new(c, c, z), State::new(-c, -c, z)]
    }

    /// Divergence of the field, constant everywhere: −(σ + 1 + β).
    ///
    /// Negative for the usual parameter ranges, meaning phase-space volume
    /// contracts onto the attractor.
    #[must_use]
    pub fn divergence(&self) -> f64 {
        -(self.sigma + 1.0 + self.beta)
    }
}

impl VectorField for LorenzSystem {
    fn derivative(&self, state: &State) -> State {
        let State { x, y, z } = *state;
        State {
            x: self.sigma * (y - x),
            y: x * (self.rho - z) - y,
            z: x * y - self.beta * z,
        }
    }
}
