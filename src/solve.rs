use crate::{
    config::SolverConfig,
    geometry::{self, Point},
    program::{Constraint, LinearProgram},
};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Find the vertex of the feasible region which maximises the objective.
///
/// Ties go to whichever vertex was found first, with vertices enumerated in
/// [`geometry::pairs()`] order.
pub fn optimize(
    program: &LinearProgram,
    config: &SolverConfig,
) -> Result<SolveResult, SolveError> {
    let constraints = program.constraints();

    if let Some(limit) = config.max_constraints {
        if constraints.len() > limit {
            return Err(SolveError::TooManyConstraints {
                count: constraints.len(),
                limit,
            });
        }
    }

    let vertices: Vec<Point> =
        geometry::vertices(constraints, config.tolerance).collect();

    let (optimal_point, optimal_value) =
        best_vertex(&vertices, |point| program.objective().evaluate(point))
            .ok_or(SolveError::Infeasible)?;

    tracing::debug!(
        constraints = constraints.len(),
        vertices = vertices.len(),
        x = optimal_point.x,
        y = optimal_point.y,
        value = optimal_value,
        "Solved the linear program"
    );

    Ok(SolveResult {
        constraints: constraints.to_vec(),
        vertices,
        optimal_point,
        optimal_value,
    })
}

/// Pick the point with the strictly largest value, so the first of several
/// equal points wins. A `NaN` value never replaces a real one.
fn best_vertex<F>(vertices: &[Point], mut objective: F) -> Option<(Point, f64)>
where
    F: FnMut(Point) -> f64,
{
    vertices
        .iter()
        .map(|&point| (point, objective(point)))
        .fold(None, |best, (point, value)| match best {
            Some((_, best_value)) if best_value >= value || value.is_nan() => {
                best
            },
            _ => Some((point, value)),
        })
}

/// The outcome of solving a [`LinearProgram`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// The constraints that were solved, in their original order.
    pub constraints: Vec<Constraint>,
    /// Every feasible vertex, in the order they were found.
    pub vertices: Vec<Point>,
    pub optimal_point: Point,
    pub optimal_value: f64,
}

impl Display for SolveResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Optimal Solution:")?;
        // `+ 0.0` so negative zero prints as "0.00"
        writeln!(
            f,
            "x = {:.2}, y = {:.2}",
            self.optimal_point.x + 0.0,
            self.optimal_point.y + 0.0
        )?;
        write!(
            f,
            "Maximum Value of Objective = {:.2}",
            self.optimal_value + 0.0
        )
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolveError {
    /// None of the constraint intersections satisfy every constraint.
    #[error("No feasible vertex found")]
    Infeasible,
    /// Reserved for detecting feasible regions which are unbounded in the
    /// direction of the objective. Vertex enumeration can't tell, so this is
    /// never returned at the moment.
    #[error("The objective is unbounded")]
    Unbounded,
    #[error("Refusing to solve {count} constraints (the limit is {limit})")]
    TooManyConstraints { count: usize, limit: usize },
}
