//! Simulation parameters and patch-style updates.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dynamics::lorenz::{DEFAULT_BETA, DEFAULT_RHO, DEFAULT_SIGMA};
use crate::dynamics::LorenzSystem;
use crate::error::{TraceError, TraceResult};

/// Default integration step.
pub const DEFAULT_DT: f64 = 0.005;
/// Default number of integration steps per rendered frame.
pub const DEFAULT_STEPS_PER_FRAME: u32 = 1;

/// Everything the stepping loop reads.
///
/// `Copy` on purpose: each frame takes one snapshot by value and uses it
/// for every trajectory and sub-step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Parameters {
    /// σ.
    #[serde(default = "default_sigma")]
    pub sigma: f64,
    /// ρ.
    #[serde(default = "default_rho")]
    pub rho: f64,
    /// β.
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Integration step. Zero freezes motion, negative runs backward.
    #[serde(default = "default_dt")]
    pub dt: f64,
    /// Integration steps per frame.
    #[validate(range(min = 1))]
    #[serde(default = "default_steps_per_frame")]
    pub steps_per_frame: u32,
}

const fn default_sigma() -> f64 {
    DEFAULT_SIGMA
}

const fn default_rho() -> f64 {
    DEFAULT_RHO
}

const fn default_beta() -> f64 {
    DEFAULT_BETA
}

const fn default_dt() -> f64 {
    DEFAULT_DT
}

const fn default_steps_per_frame() -> u32 {
    DEFAULT_STEPS_PER_FRAME
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
            rho: DEFAULT_RHO,
            beta: DEFAULT_BETA,
            dt: DEFAULT_DT,
            steps_per_frame: DEFAULT_STEPS_PER_FRAME,
        }
    }
}

impl Parameters {
    /// The vector field these parameters describe.
    #[must_use]
    pub const fn lorenz(&self) -> LorenzSystem {
        LorenzSystem::new(self.sigma, self.rho, self.beta)
    }

    /// Merge the fields set in `patch`; the rest stay as they are.
    ///
    /// Only `steps_per_frame == 0` is rejected. σ, ρ, β and dt are taken
    /// as given, including values that make the system blow up.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the patch sets `steps_per_frame`
    /// to zero. Nothing is applied in that case.
    pub fn apply(&mut self, patch: &ParameterPatch) -> TraceResult<()> {
        if patch.steps_per_frame == Some(0) {
            return Err(TraceError::config("steps_per_frame must be at least 1"));
        }

        if let Some(sigma) = patch.sigma {
            self.sigma = sigma;
        }
        if let Some(rho) = patch.rho {
            self.rho = rho;
        }
        if let Some(beta) = patch.beta {
            self.beta = beta;
        }
        if let Some(dt) = patch.dt {
            self.dt = dt;
        }
        if let Some(steps) = patch.steps_per_frame {
            self.steps_per_frame = steps;
        }
        Ok(())
    }

    /// Copy σ, ρ and β from `defaults`, keeping dt and steps per frame.
    pub fn restore_shape(&mut self, defaults: &Self) {
        self.sigma = defaults.sigma;
        self.rho = defaults.rho;
        self.beta = defaults.beta;
    }
}

/// Partial update of [`Parameters`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterPatch {
    /// New σ.
    #[serde(default)]
    pub sigma: Option<f64>,
    /// New ρ.
    #[serde(default)]
    pub rho: Option<f64>,
    /// New β.
    #[serde(default)]
    pub beta: Option<f64>,
    /// New dt.
    #[serde(default)]
    pub dt: Option<f64>,
    /// New steps per frame.
    #[serde(default)]
    pub steps_per_frame: Option<u32>,
}

impl ParameterPatch {
    /// Empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set σ.
    #[must_use]
    pub const fn sigma(mut self, sigma: f64) -> Self {
        self.sigma = Some(sigma);
        self
    }

    /// Set ρ.
    #[must_use]
    pub const fn rho(mut self, rho: f64) -> Self {
        self.rho = Some(rho);
        self
    }

    /// Set β.
    #[must_use]
    pub const fn beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    /// Set dt.
    #[must_use]
    pub const fn dt(mut self, dt: f64) -> Self {
        self.dt = Some(dt);
        self
    }

    /// Set steps per frame.
    #[must_use]
    pub const fn steps_per_frame(mut self, steps: u32) -> Self {
        self.steps_per_frame = Some(steps);
        self
    }

    /// True if the patch sets no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
