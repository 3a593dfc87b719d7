//! Intersecting constraint lines and checking candidate points against a
//! set of constraints.

use crate::{config::DEFAULT_TOLERANCE, program::Constraint};
use nalgebra::{Matrix2, Vector2};

pub type Point = euclid::Point2D<f64, euclid::UnknownUnit>;

/// Find the point where the boundary lines of two [`Constraint`]s cross.
///
/// Both constraints are treated as equalities, giving the system
///
/// ```text
/// | c1.coeff_x  c1.coeff_y | |x|   |c1.bound|
/// | c2.coeff_x  c2.coeff_y | |y| = |c2.bound|
/// ```
///
/// which we solve using Cramer's rule. Parallel (or identical) lines have a
/// determinant of zero and no unique intersection, so we return `None`.
///
/// See also: https://en.wikipedia.org/wiki/Cramer%27s_rule
pub fn intersect(c1: &Constraint, c2: &Constraint) -> Option<Point> {
    let coefficients =
        Matrix2::new(c1.coeff_x(), c1.coeff_y(), c2.coeff_x(), c2.coeff_y());
    let bounds = Vector2::new(c1.bound(), c2.bound());

    let determinant = coefficients.determinant();

    if determinant == 0.0 {
        return None;
    }

    let x = replace_column(coefficients, 0, &bounds).determinant();
    let y = replace_column(coefficients, 1, &bounds).determinant();

    Some(Point::new(x / determinant, y / determinant))
}

fn replace_column(
    mut matrix: Matrix2<f64>,
    column: usize,
    values: &Vector2<f64>,
) -> Matrix2<f64> {
    matrix.set_column(column, values);
    matrix
}

/// Does `point` satisfy every constraint, using the [`DEFAULT_TOLERANCE`]?
pub fn is_feasible<'a, C>(point: Point, constraints: C) -> bool
where
    C: IntoIterator<Item = &'a Constraint>,
{
    is_feasible_within(point, constraints, DEFAULT_TOLERANCE)
}

/// Does `point` satisfy every constraint to within some `tolerance`?
pub fn is_feasible_within<'a, C>(
    point: Point,
    constraints: C,
    tolerance: f64,
) -> bool
where
    C: IntoIterator<Item = &'a Constraint>,
{
    constraints
        .into_iter()
        .all(|constraint| constraint.is_satisfied_by(point, tolerance))
}

/// Every unordered pair of indices, `(i, j)` where `i < j < count`, in
/// ascending order.
pub fn pairs(count: usize) -> impl Iterator<Item = (usize, usize)> + Clone {
    (0..count).flat_map(move |i| (i + 1..count).map(move |j| (i, j)))
}

/// Enumerate the vertices of the feasible region.
///
/// In two dimensions every corner of the feasible polygon is where two of
/// its bounding lines cross, so we intersect each pair of constraints and
/// keep the points which satisfy the entire set. Points are yielded in
/// [`pairs()`] order.
pub fn vertices(
    constraints: &[Constraint],
    tolerance: f64,
) -> impl Iterator<Item = Point> + '_ {
    pairs(constraints.len()).filter_map(move |(i, j)| {
        let point = intersect(&constraints[i], &constraints[j])?;

        if is_feasible_within(point, constraints, tolerance) {
            Some(point)
        } else {
            tracing::trace!(
                first = i,
                second = j,
                x = point.x,
                y = point.y,
                "Rejected an infeasible intersection"
            );
            None
        }
    })
}
