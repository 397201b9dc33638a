//! Engine configuration with YAML loading and validation.
//!
//! Implements mistake-proofing at the boundary:
//! - Type-safe configuration structs with defaults for every field
//! - Unknown keys rejected by serde
//! - Range checks via `validator`, then semantic checks that fail fast

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::dynamics::IntegratorKind;
use crate::engine::params::Parameters;
use crate::engine::seeding::SeedPolicy;
use crate::error::{TraceError, TraceResult};
use crate::trace::DEFAULT_TRACE_CAPACITY;

/// Trajectories started when no count is configured.
pub const DEFAULT_NUM_TRACES: usize = 10;

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Initial simulation parameters. σ, ρ and β here are also what
    /// `reset_parameters` restores.
    #[validate(nested)]
    #[serde(default)]
    pub parameters: Parameters,

    /// Number of trajectories.
    #[validate(range(min = 1))]
    #[serde(default = "default_num_traces")]
    pub num_traces: usize,

    /// Points retained per trajectory.
    #[validate(range(min = 1))]
    #[serde(default = "default_trace_capacity")]
    pub trace_capacity: usize,

    /// Upper bound on the visible window handed to renderers.
    #[validate(range(min = 1))]
    #[serde(default = "default_trace_capacity")]
    pub max_visible: usize,

    /// Stepping rule.
    #[serde(default)]
    pub integrator: IntegratorKind,

    /// Master seed for start points. Drawn from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Start-point anchor and jitter.
    #[validate(nested)]
    #[serde(default)]
    pub seeding: SeedPolicy,
}

const fn default_num_traces() -> usize {
    DEFAULT_NUM_TRACES
}

const fn default_trace_capacity() -> usize {
    DEFAULT_TRACE_CAPACITY
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parameters: Parameters::default(),
            num_traces: DEFAULT_NUM_TRACES,
            trace_capacity: DEFAULT_TRACE_CAPACITY,
            max_visible: DEFAULT_TRACE_CAPACITY,
            integrator: IntegratorKind::default(),
            seed: None,
            seeding: SeedPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> TraceResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> TraceResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> TraceResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Run schema and semantic validation.
    ///
    /// Trace count and capacity get their dedicated error variants so
    /// callers can tell them apart from other misconfiguration.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn check(&self) -> TraceResult<()> {
        if self.num_traces == 0 {
            return Err(TraceError::InvalidTraceCount {
                count: self.num_traces,
            });
        }
        if self.trace_capacity == 0 {
            return Err(TraceError::InvalidCapacity {
                capacity: self.trace_capacity,
            });
        }
        if self.parameters.steps_per_frame == 0 {
            return Err(TraceError::config("steps_per_frame must be at least 1"));
        }
        if self.max_visible == 0 {
            return Err(TraceError::config("max_visible must be at least 1"));
        }
        self.seeding.check()?;

        self.validate()?;
        Ok(())
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    parameters: Option<Parameters>,
    num_traces: Option<usize>,
    trace_capacity: Option<usize>,
    max_visible: Option<usize>,
    integrator: Option<IntegratorKind>,
    seed: Option<u64>,
    seeding: Option<SeedPolicy>,
}

impl EngineConfigBuilder {
    /// Set the initial parameters.
    #[must_use]
    pub const fn parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Set the number of trajectories.
    #[must_use]
    pub const fn num_traces(mut self, n: usize) -> Self {
        self.num_traces = Some(n);
        self
    }

    /// Set the per-trajectory buffer capacity.
    #[must_use]
    pub const fn trace_capacity(mut self, capacity: usize) -> Self {
        self.trace_capacity = Some(capacity);
        self
    }

    /// Set the visible window bound.
    #[must_use]
    pub const fn max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = Some(max_visible);
        self
    }

    /// Set the integrator.
    #[must_use]
    pub const fn integrator(mut self, kind: IntegratorKind) -> Self {
        self.integrator = Some(kind);
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the start-point policy.
    #[must_use]
    pub const fn seeding(mut self, policy: SeedPolicy) -> Self {
        self.seeding = Some(policy);
        self
    }

    /// Build the configuration.
    ///
    /// When only the capacity is set, `max_visible` follows it.
    #[must_use]
    pub fn build(self) -> EngineConfig {
        let mut config = EngineConfig::default();

        if let Some(parameters) = self.parameters {
            config.parameters = parameters;
        }
        if let Some(n) = self.num_traces {
            config.num_traces = n;
        }
        if let Some(capacity) = self.trace_capacity {
            config.trace_capacity = capacity;
            config.max_visible = capacity;
        }
        if let Some(max_visible) = self.max_visible {
            config.max_visible = max_visible;
        }
        if let Some(kind) = self.integrator {
            config.integrator = kind;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(policy) = self.seeding {
            config.seeding = policy;
        }

        config
    }
}
