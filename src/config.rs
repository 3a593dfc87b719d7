//! Solver configuration.

use serde::{Deserialize, Serialize};

/// The absolute tolerance used when checking whether a point lies on a
/// constraint's boundary.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Options controlling how a [`LinearProgram`](crate::LinearProgram) is
/// solved.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// How far a point may sit outside a constraint's boundary and still be
    /// considered feasible. Equality constraints are satisfied by anything
    /// within this distance of the bound. Must not be negative.
    pub tolerance: f64,
    /// The most constraints we'll enumerate vertices for. `None` means no
    /// limit.
    pub max_constraints: Option<usize>,
}

impl SolverConfig {
    pub fn new() -> Self { SolverConfig::default() }

    /// Set the feasibility tolerance.
    ///
    /// The tolerance must be zero or positive. A negative or `NaN` tolerance
    /// would make every `=` constraint unsatisfiable.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        debug_assert!(
            tolerance >= 0.0,
            "the tolerance must be non-negative, found {}",
            tolerance
        );
        self.tolerance = tolerance;
        self
    }

    /// Refuse to solve programs with more than `limit` constraints.
    pub fn with_max_constraints(mut self, limit: usize) -> Self {
        self.max_constraints = Some(limit);
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            tolerance: DEFAULT_TOLERANCE,
            max_constraints: None,
        }
    }
}
