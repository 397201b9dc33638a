//! A single simulated particle: live state plus its trace.

use crate::dynamics::{Integrator, State, VectorField};
use crate::error::TraceResult;

use super::buffer::{TraceBuffer, VisibleWindow};

/// One Lorenz trajectory.
///
/// Owns its state and its buffer exclusively, so trajectories can be
/// stepped independently of each other.
#[derive(Debug, Clone)]
pub struct Trajectory {
    state: State,
    start: State,
    buffer: TraceBuffer,
    diverged: bool,
}

impl Trajectory {
    /// Create a trajectory at `start` with an empty buffer of `capacity`
    /// points.
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is zero.
    pub fn new(start: State, capacity: usize) -> TraceResult<Self> {
        Ok(Self {
            state: start,
            start,
            buffer: TraceBuffer::new(capacity)?,
            diverged: false,
        })
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> State {
        self.state
    }

    /// Point this trajectory was (re)seeded at.
    #[must_use]
    pub const fn start(&self) -> State {
        self.start
    }

    /// Recorded history.
    #[must_use]
    pub const fn buffer(&self) -> &TraceBuffer {
        &self.buffer
    }

    /// Visible window of the recorded history.
    #[must_use]
    pub fn visible_window(&self, max_visible: usize) -> VisibleWindow {
        self.buffer.visible_window(max_visible)
    }

    /// True if the current state has any NaN or infinite component.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.state.is_finite()
    }

    /// Integrate one step and record the new position.
    ///
    /// Returns `true` the first time the state turns non-finite, so the
    /// caller can report it once. The value is stored regardless.
    pub fn advance(
        &mut self,
        integrator: &dyn Integrator,
        field: &dyn VectorField,
        dt: f64,
    ) -> bool {
        self.state = integrator.step(&self.state, field, dt);
        self.buffer.append(&self.state);

        if !self.diverged && !self.state.is_finite() {
            self.diverged = true;
            return true;
        }
        false
    }

    /// Clear the history in place and restart from `start`.
    pub fn reseed(&mut self, start: State) {
        self.buffer.clear();
        self.state = start;
        self.start = start;
        self.diverged = false;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dynamics::{EulerIntegrator, LorenzSystem};

    #[test]
    fn test_new_trajectory_is_empty() {
        let t = Trajectory::new(State::new(1.0, 2.0, 3.0), 16).unwrap();
        assert_eq!(t.position(), State::new(1.0, 2.0, 3.0));
        assert_eq!(t.start(), t.position());
        assert!(t.buffer().is_empty());
        assert_eq!(t.buffer().capacity(), 16);
    }

    #[test]
    fn test_new_rejects_zero_capacity() {
        assert!(Trajectory::new(State::zero(), 0).is_err());
    }

    #[test]
    fn test_advance_appends_new_position() {
        let mut t = Trajectory::new(State::new(0.1, 0.0, 0.0), 16).unwrap();
        let lorenz = LorenzSystem::default();

        t.advance(&EulerIntegrator::new(), &lorenz, 0.01);

        let pos = t.position();
        assert!((pos.x - 0.09).abs() < 1e-12);
        assert!((pos.y - 0.028).abs() < 1e-12);
        assert_eq!(t.buffer().written(), 1);
        assert_eq!(t.buffer().latest(), Some(pos.to_f32_array()));
    }

    #[test]
    fn test_reseed_keeps_buffer_capacity() {
        let mut t = Trajectory::new(State::new(1.0, 1.0, 1.0), 8).unwrap();
        let lorenz = LorenzSystem::default();
        for _ in 0..20 {
            t.advance(&EulerIntegrator::new(), &lorenz, 0.01);
        }
        let ptr = t.buffer().as_flat().as_ptr();

        t.reseed(State::new(5.0, 5.0, 5.0));

        assert_eq!(t.position(), State::new(5.0, 5.0, 5.0));
        assert_eq!(t.start(), State::new(5.0, 5.0, 5.0));
        assert!(t.buffer().is_empty());
        assert_eq!(t.buffer().capacity(), 8);
        assert_eq!(t.buffer().as_flat().as_ptr(), ptr);
    }

    #[test]
    fn test_divergence_reported_once() {
        let mut t = Trajectory::new(State::new(1.0, 1.0, 1.0), 8).unwrap();
        let runaway = LorenzSystem::new(1e300, 1e300, 1e300);
        let euler = EulerIntegrator::new();

        let mut reports = 0;
        for _ in 0..10 {
            if t.advance(&euler, &runaway, 1.0) {
                reports += 1;
            }
        }

        assert_eq!(reports, 1);
        assert!(!t.is_finite());
        // Non-finite values still land in the buffer.
        assert_eq!(t.buffer().written(), 8);
    }
}
