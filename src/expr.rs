use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    ops::{Add, Index},
};

/// One of the two unknowns a [`LinearExpression`] can refer to.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub enum Variable {
    X,
    Y,
}

impl Variable {
    pub(crate) fn from_char(c: char) -> Option<Variable> {
        match c {
            'x' => Some(Variable::X),
            'y' => Some(Variable::Y),
            _ => None,
        }
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Variable::X => write!(f, "x"),
            Variable::Y => write!(f, "y"),
        }
    }
}

/// A linear expression over `x` and `y`, stored as one coefficient per
/// [`Variable`].
///
/// Variables which never appear in the source text have a coefficient of
/// `0`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearExpression {
    x: f64,
    y: f64,
}

impl LinearExpression {
    pub fn new(x: f64, y: f64) -> Self { LinearExpression { x, y } }

    /// An expression containing a single term, `coefficient * variable`.
    pub fn term(variable: Variable, coefficient: f64) -> Self {
        match variable {
            Variable::X => LinearExpression::new(coefficient, 0.0),
            Variable::Y => LinearExpression::new(0.0, coefficient),
        }
    }

    pub fn coefficient(&self, variable: Variable) -> f64 {
        match variable {
            Variable::X => self.x,
            Variable::Y => self.y,
        }
    }

    pub fn x(&self) -> f64 { self.x }

    pub fn y(&self) -> f64 { self.y }

    /// Evaluate the expression at a particular [`Point`].
    pub fn evaluate(&self, point: Point) -> f64 {
        self.x * point.x + self.y * point.y
    }

    fn terms(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        [Variable::X, Variable::Y]
            .iter()
            .map(move |&v| (v, self.coefficient(v)))
    }
}

impl Index<Variable> for LinearExpression {
    type Output = f64;

    fn index(&self, variable: Variable) -> &f64 {
        match variable {
            Variable::X => &self.x,
            Variable::Y => &self.y,
        }
    }
}

// terms are accumulated by adding expressions together
impl Add for LinearExpression {
    type Output = LinearExpression;

    fn add(self, rhs: LinearExpression) -> LinearExpression {
        LinearExpression::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Display for LinearExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut wrote_something = false;

        for (variable, coefficient) in self.terms() {
            if coefficient == 0.0 {
                continue;
            }

            let magnitude = coefficient.abs();

            match (wrote_something, coefficient.is_sign_negative()) {
                (false, false) => {},
                (false, true) => write!(f, "-")?,
                (true, false) => write!(f, " + ")?,
                (true, true) => write!(f, " - ")?,
            }

            if magnitude != 1.0 {
                write!(f, "{}", magnitude)?;
            }
            write!(f, "{}", variable)?;

            wrote_something = true;
        }

        if !wrote_something {
            // keep the text parseable, even for the zero expression
            write!(f, "0x")?;
        }

        Ok(())
    }
}
