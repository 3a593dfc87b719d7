//! Solve small linear programs in two variables, `x` and `y`.
//!
//! The objective is maximised by intersecting every pair of constraint lines,
//! throwing away intersections which lie outside the feasible region, and
//! picking the remaining vertex with the largest objective value.
//!
//! ```rust
//! let got = planar_lp::solve("3x + 5y", &["x <= 4", "2y <= 12", "3x + 2y <= 18", "x >= 0", "y >= 0"])?;
//!
//! assert_eq!(got.optimal_value, 36.0);
//! assert_eq!((got.optimal_point.x, got.optimal_point.y), (2.0, 6.0));
//! # Ok::<(), planar_lp::Error>(())
//! ```

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod config;
mod expr;
pub mod geometry;
mod parse;
mod program;
mod solve;

pub use config::SolverConfig;
pub use expr::{LinearExpression, Variable};
pub use geometry::Point;
pub use parse::{parse_expression, ParseError};
pub use program::{AxisIntercepts, Constraint, LinearProgram, Relation};
pub use solve::{optimize, SolveError, SolveResult};

/// Parse a single constraint (e.g. `"x + y <= 10"`).
pub fn parse_constraint(text: &str) -> Result<Constraint, ParseError> {
    text.parse()
}

/// Parse an objective and its constraints, then find the vertex which
/// maximises the objective.
pub fn solve<C, S>(objective: &str, constraints: C) -> Result<SolveResult, Error>
where
    C: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    solve_with(objective, constraints, &SolverConfig::default())
}

/// [`solve()`] with a custom [`SolverConfig`].
pub fn solve_with<C, S>(
    objective: &str,
    constraints: C,
    config: &SolverConfig,
) -> Result<SolveResult, Error>
where
    C: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let program = LinearProgram::from_text(objective, constraints)?;
    let result = program.solve_with(config)?;

    Ok(result)
}

/// Anything that can go wrong while solving a linear program from its text
/// form.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unable to parse the linear program")]
    Parse(#[from] ParseError),
    #[error("Unable to solve the linear program")]
    Solve(#[from] SolveError),
}
