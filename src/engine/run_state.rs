//! Running/paused state machine.

use serde::{Deserialize, Serialize};

/// Whether [`advance_frame`](super::SimulationEngine::advance_frame) does
/// any work. There is no terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// Frames advance the simulation.
    #[default]
    Running,
    /// Frames are ignored.
    Paused,
}

impl RunState {
    /// The other state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Running => Self::Paused,
            Self::Paused => Self::Running,
        }
    }

    /// State for a paused flag.
    #[must_use]
    pub const fn from_paused(paused: bool) -> Self {
        if paused {
            Self::Paused
        } else {
            Self::Running
        }
    }

    /// True when paused.
    #[must_use]
    pub const fn is_paused(self) -> bool {
        matches!(self, Self::Paused)
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Paused => write!(f, "paused"),
        }
    }
}
