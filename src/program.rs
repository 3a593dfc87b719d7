use crate::{
    config::SolverConfig,
    expr::LinearExpression,
    geometry::Point,
    parse::{parse_expression, ParseError},
    solve::{SolveError, SolveResult},
};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    iter::Extend,
    str::FromStr,
};

/// How a [`Constraint`]'s expression relates to its bound.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "=")]
    Equal,
}

impl Relation {
    /// The tokens we split a constraint on, in the order they are tried.
    const ALL: [Relation; 3] =
        [Relation::LessOrEqual, Relation::GreaterOrEqual, Relation::Equal];

    pub fn as_str(self) -> &'static str {
        match self {
            Relation::LessOrEqual => "<=",
            Relation::GreaterOrEqual => ">=",
            Relation::Equal => "=",
        }
    }

    /// Does `value` relate to `bound`, allowing `tolerance` of slack either
    /// side of the boundary?
    pub fn holds(self, value: f64, bound: f64, tolerance: f64) -> bool {
        let on_boundary =
            approx::abs_diff_eq!(value, bound, epsilon = tolerance);

        match self {
            Relation::LessOrEqual => value <= bound || on_boundary,
            Relation::GreaterOrEqual => value >= bound || on_boundary,
            Relation::Equal => on_boundary,
        }
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single linear constraint, `coeff_x*x + coeff_y*y <relation> bound`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    expression: LinearExpression,
    relation: Relation,
    bound: f64,
}

impl Constraint {
    pub fn new(
        expression: LinearExpression,
        relation: Relation,
        bound: f64,
    ) -> Self {
        Constraint {
            expression,
            relation,
            bound,
        }
    }

    pub fn expression(&self) -> LinearExpression { self.expression }

    pub fn coeff_x(&self) -> f64 { self.expression.x() }

    pub fn coeff_y(&self) -> f64 { self.expression.y() }

    pub fn relation(&self) -> Relation { self.relation }

    pub fn bound(&self) -> f64 { self.bound }

    /// Is this constraint satisfied at `point`?
    pub fn is_satisfied_by(&self, point: Point, tolerance: f64) -> bool {
        let value = self.expression.evaluate(point);
        self.relation.holds(value, self.bound, tolerance)
    }

    /// Where the constraint's boundary line crosses the x and y axes.
    ///
    /// A line parallel to an axis never crosses it, so the corresponding
    /// intercept is `None`.
    pub fn axis_intercepts(&self) -> AxisIntercepts {
        let on_x_axis = if self.coeff_x() != 0.0 {
            Some(Point::new(self.bound / self.coeff_x(), 0.0))
        } else {
            None
        };
        let on_y_axis = if self.coeff_y() != 0.0 {
            Some(Point::new(0.0, self.bound / self.coeff_y()))
        } else {
            None
        };

        AxisIntercepts {
            x: on_x_axis,
            y: on_y_axis,
        }
    }
}

/// The points a [`Constraint`]'s boundary line crosses each axis, used when
/// drawing the line.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisIntercepts {
    pub x: Option<Point>,
    pub y: Option<Point>,
}

impl FromStr for Constraint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (index, relation) =
            find_relation(s).ok_or_else(|| ParseError::MissingRelation {
                text: s.trim().into(),
            })?;

        let (left, right) = s.split_at(index);
        let right = right[relation.as_str().len()..].trim();

        let expression = parse_expression(left.trim())?;
        let bound = parse_bound(right)?;

        Ok(Constraint::new(expression, relation, bound))
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // `+ 0.0` turns a negative zero into a positive one
        write!(
            f,
            "{} {} {}",
            self.expression,
            self.relation,
            self.bound + 0.0
        )
    }
}

/// Find the left-most relational token, preferring `<=` and `>=` over a bare
/// `=`.
fn find_relation(s: &str) -> Option<(usize, Relation)> {
    s.char_indices().find_map(|(index, _)| {
        Relation::ALL
            .iter()
            .find(|relation| s[index..].starts_with(relation.as_str()))
            .map(|&relation| (index, relation))
    })
}

fn parse_bound(text: &str) -> Result<f64, ParseError> {
    match text.parse::<f64>() {
        Ok(bound) if bound.is_finite() => Ok(bound),
        _ => Err(ParseError::InvalidBound { text: text.into() }),
    }
}

/// An objective to maximise, subject to a list of [`Constraint`]s.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearProgram {
    objective: LinearExpression,
    constraints: Vec<Constraint>,
}

impl LinearProgram {
    pub fn new(objective: LinearExpression) -> Self {
        LinearProgram {
            objective,
            constraints: Vec::new(),
        }
    }

    /// Parse the objective and each constraint from their text form.
    pub fn from_text<C, S>(
        objective: &str,
        constraints: C,
    ) -> Result<Self, ParseError>
    where
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut program = LinearProgram::new(parse_expression(objective)?);

        for constraint in constraints {
            program.push(constraint.as_ref().parse()?);
        }

        Ok(program)
    }

    pub fn with(mut self, constraint: Constraint) -> Self {
        self.push(constraint);
        self
    }

    pub fn push(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn objective(&self) -> LinearExpression { self.objective }

    pub fn constraints(&self) -> &[Constraint] { &self.constraints }

    /// Find the vertex which maximises the objective, using the default
    /// [`SolverConfig`].
    pub fn solve(&self) -> Result<SolveResult, SolveError> {
        self.solve_with(&SolverConfig::default())
    }

    pub fn solve_with(
        &self,
        config: &SolverConfig,
    ) -> Result<SolveResult, SolveError> {
        crate::solve::optimize(self, config)
    }
}

impl Extend<Constraint> for LinearProgram {
    fn extend<T: IntoIterator<Item = Constraint>>(&mut self, iter: T) {
        self.constraints.extend(iter);
    }
}

impl<'a> IntoIterator for &'a LinearProgram {
    type IntoIter = <&'a [Constraint] as IntoIterator>::IntoIter;
    type Item = &'a Constraint;

    fn into_iter(self) -> Self::IntoIter { self.constraints.iter() }
}

impl IntoIterator for LinearProgram {
    type IntoIter = <Vec<Constraint> as IntoIterator>::IntoIter;
    type Item = Constraint;

    fn into_iter(self) -> Self::IntoIter { self.constraints.into_iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_a_simple_constraint() {
        let got: Constraint = "x + y <= 10".parse().unwrap();

        assert_eq!(got.coeff_x(), 1.0);
        assert_eq!(got.coeff_y(), 1.0);
        assert_eq!(got.bound(), 10.0);
        assert_eq!(got.relation(), Relation::LessOrEqual);
    }

    #[test]
    fn relations_are_not_mis_split_on_equals() {
        let inputs = vec![
            ("2x + 3y <= 12", Relation::LessOrEqual, 12.0),
            ("x >= 0", Relation::GreaterOrEqual, 0.0),
            ("x - y = 2", Relation::Equal, 2.0),
            ("  -y>=-4.5  ", Relation::GreaterOrEqual, -4.5),
        ];

        for (src, relation, bound) in inputs {
            let got: Constraint = src.parse().unwrap();

            assert_eq!(got.relation(), relation, "{}", src);
            assert_eq!(got.bound(), bound, "{}", src);
        }
    }

    #[test]
    fn the_leftmost_relation_wins() {
        // "=" comes before "<=" so the bound is "<= 3", which isn't a number
        let got = "x = <= 3".parse::<Constraint>().unwrap_err();

        assert_eq!(got, ParseError::InvalidBound { text: "<= 3".into() });
    }

    #[test]
    fn missing_relation() {
        let got = "x + y < 10".parse::<Constraint>().unwrap_err();

        assert_eq!(
            got,
            ParseError::MissingRelation {
                text: "x + y < 10".into()
            }
        );
    }

    #[test]
    fn invalid_bounds() {
        let inputs = vec!["", "ten", "10 - 2", "inf", "NaN", "1.2.3"];

        for bound in inputs {
            let src = format!("x + y <= {}", bound);

            let got = src.parse::<Constraint>().unwrap_err();

            assert_eq!(
                got,
                ParseError::InvalidBound { text: bound.into() },
                "{}",
                src
            );
        }
    }

    #[test]
    fn left_hand_side_must_have_terms() {
        let got = "5 <= 10".parse::<Constraint>().unwrap_err();

        assert_eq!(got, ParseError::MalformedExpression { text: "5".into() });
    }

    #[test]
    fn display() {
        let inputs = vec![
            ("x + y <= 10", "x + y <= 10"),
            ("2x-3.5y>=-1", "2x - 3.5y >= -1"),
            ("y = 0.5", "y = 0.5"),
            ("x <= -0", "x <= 0"),
        ];

        for (src, should_be) in inputs {
            let got: Constraint = src.parse().unwrap();

            assert_eq!(got.to_string(), should_be);
        }
    }

    #[test]
    fn relations_with_tolerance() {
        let tolerance = 1e-9;

        assert!(Relation::LessOrEqual.holds(9.0, 10.0, tolerance));
        assert!(Relation::LessOrEqual.holds(10.0 + 1e-12, 10.0, tolerance));
        assert!(!Relation::LessOrEqual.holds(10.1, 10.0, tolerance));

        assert!(Relation::GreaterOrEqual.holds(11.0, 10.0, tolerance));
        assert!(Relation::GreaterOrEqual.holds(10.0 - 1e-12, 10.0, tolerance));
        assert!(!Relation::GreaterOrEqual.holds(9.9, 10.0, tolerance));

        assert!(Relation::Equal.holds(0.1 + 0.2, 0.3, tolerance));
        assert!(!Relation::Equal.holds(0.3, 0.4, tolerance));
    }

    #[test]
    fn axis_intercepts() {
        let c: Constraint = "2x + 4y <= 8".parse().unwrap();
        let got = c.axis_intercepts();
        assert_eq!(got.x, Some(Point::new(4.0, 0.0)));
        assert_eq!(got.y, Some(Point::new(0.0, 2.0)));

        let vertical: Constraint = "x <= 3".parse().unwrap();
        let got = vertical.axis_intercepts();
        assert_eq!(got.x, Some(Point::new(3.0, 0.0)));
        assert_eq!(got.y, None);
    }

    #[test]
    fn build_a_program_from_text() {
        let got = LinearProgram::from_text(
            "3x + 2y",
            &["x + y <= 4", "x + 3y <= 6", "x >= 0", "y >= 0"],
        )
        .unwrap();

        assert_eq!(got.objective(), LinearExpression::new(3.0, 2.0));
        assert_eq!(got.constraints().len(), 4);
        assert_eq!(
            got.constraints()[1],
            "x + 3y <= 6".parse::<Constraint>().unwrap()
        );

        let round_tripped: Vec<_> =
            got.into_iter().map(|c| c.to_string()).collect();
        assert_eq!(
            round_tripped,
            vec!["x + y <= 4", "x + 3y <= 6", "x >= 0", "y >= 0"]
        );
    }

    #[test]
    fn building_a_program_reports_the_first_bad_constraint() {
        let got =
            LinearProgram::from_text("x + y", &["x >= 0", "y => 3", "y <= 1"])
                .unwrap_err();

        assert_eq!(got, ParseError::InvalidBound { text: "> 3".into() });
    }

    #[test]
    fn builder_and_extend() {
        let mut program = LinearProgram::new(LinearExpression::new(1.0, 1.0))
            .with("x >= 0".parse().unwrap());
        program.extend(vec!["y >= 0".parse::<Constraint>().unwrap()]);

        let relations: Vec<_> =
            (&program).into_iter().map(|c| c.relation()).collect();

        assert_eq!(
            relations,
            vec![Relation::GreaterOrEqual, Relation::GreaterOrEqual]
        );
    }
}
