//! Error types for the simulation core.
//!
//! Configuration errors are reported synchronously at the call site with no
//! partial mutation; index errors likewise. Numerical degeneracies
//! (coincident centers, zero-length projection vectors) are handled inside
//! the algorithms and never surfaced.

use std::fmt;

/// Errors returned by the solver's configuration and population API.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// `set_sub_steps(0)`.
    ZeroSubSteps,
    /// `set_rate(0)`.
    ZeroRate,
    /// Frame interval not strictly positive (or NaN).
    NonPositiveFrameDt(f32),
    /// Particle radius not strictly positive (or NaN).
    NonPositiveRadius(f32),
    /// Disc constraint radius not strictly positive (or NaN).
    NonPositiveConstraintRadius(f32),
    /// Rectangular world size with a non-positive component.
    NonPositiveWorldSize(f32, f32),
    /// Response coefficient outside [0, 1].
    ResponseCoefOutOfRange(f32),
    /// Particle index past the end of the population.
    OutOfBounds { index: usize, len: usize },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::ZeroSubSteps => write!(f, "sub-step count must be positive"),
            SolverError::ZeroRate => write!(f, "simulation rate must be positive"),
            SolverError::NonPositiveFrameDt(dt) => {
                write!(f, "frame interval must be positive, got {}", dt)
            }
            SolverError::NonPositiveRadius(r) => {
                write!(f, "particle radius must be positive, got {}", r)
            }
            SolverError::NonPositiveConstraintRadius(r) => {
                write!(f, "constraint radius must be positive, got {}", r)
            }
            SolverError::NonPositiveWorldSize(w, h) => {
                write!(f, "world size must be positive, got {}x{}", w, h)
            }
            SolverError::ResponseCoefOutOfRange(c) => {
                write!(f, "response coefficient must be in [0, 1], got {}", c)
            }
            SolverError::OutOfBounds { index, len } => {
                write!(f, "particle index {} out of bounds (population {})", index, len)
            }
        }
    }
}

impl std::error::Error for SolverError {}
