//! Trajectory history storage.
//!
//! A [`Trajectory`] couples one live state with one [`TraceBuffer`]; the
//! buffer is sized once and reused for the trajectory's whole lifetime.

pub mod buffer;
pub mod trajectory;

pub use buffer::{TraceBuffer, VisibleWindow, COMPONENTS, DEFAULT_TRACE_CAPACITY};
pub use trajectory::Trajectory;
