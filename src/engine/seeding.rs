//! Start-point generation.
//!
//! All trajectories of one batch start from a single random anchor plus a
//! tiny per-coordinate jitter. Starting nearly on top of each other makes
//! their later separation show sensitive dependence on initial conditions.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dynamics::State;
use crate::error::{TraceError, TraceResult};

use super::rng::SimRng;

/// Default upper bound (exclusive) of each anchor coordinate.
pub const DEFAULT_ANCHOR_EXTENT: f64 = 20.0;
/// Default upper bound (exclusive) of each per-coordinate jitter.
pub const DEFAULT_JITTER: f64 = 0.02;

/// Anchor and jitter extents for a batch of start points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SeedPolicy {
    /// Anchor coordinates are drawn from `[0, anchor_extent)`.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_anchor_extent")]
    pub anchor_extent: f64,
    /// Jitter per coordinate is drawn from `[0, jitter)`.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_jitter")]
    pub jitter: f64,
}

const fn default_anchor_extent() -> f64 {
    DEFAULT_ANCHOR_EXTENT
}

const fn default_jitter() -> f64 {
    DEFAULT_JITTER
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            anchor_extent: DEFAULT_ANCHOR_EXTENT,
            jitter: DEFAULT_JITTER,
        }
    }
}

impl SeedPolicy {
    /// Check that both extents are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the offending field.
    pub fn check(&self) -> TraceResult<()> {
        for (name, value) in [("anchor_extent", self.anchor_extent), ("jitter", self.jitter)] {
            if !value.is_finite() || value < 0.0 {
                return Err(TraceError::config(format!(
                    "seeding.{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Generate `n` start points around one fresh anchor.
///
/// Every call draws a new anchor, so repeated calls produce unrelated
/// batches while points within one batch stay within `policy.jitter` of
/// each other along every axis.
#[must_use]
pub fn generate_start_points(rng: &mut SimRng, n: usize, policy: &SeedPolicy) -> Vec<State> {
    let extent = policy.anchor_extent;
    let anchor = State::new(
        rng.gen_range_f64(0.0, extent),
        rng.gen_range_f64(0.0, extent),
        rng.gen_range_f64(0.0, extent),
    );

    (0..n)
        .map(|_| {
            anchor
                + State::new(
                    rng.gen_range_f64(0.0, policy.jitter),
                    rng.gen_range_f64(0.0, policy.jitter),
                    rng.gen_range_f64(0.0, policy.jitter),
                )
        })
        .collect()
}
