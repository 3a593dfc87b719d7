use crate::expr::{LinearExpression, Variable};
use smol_str::SmolStr;
use std::ops::Range;

/// Parse a [`LinearExpression`] from some text.
///
/// The text is scanned for terms of the form
///
/// ```text
/// term := (SIGN WHITESPACE*)? NUMBER? VARIABLE
/// ```
///
/// (e.g. `+2.5x`, `- y` or `x`) and anything between terms is skipped. Terms
/// referring to the same variable are summed, so `2x - 3.5y + x` is the same
/// as `3x - 3.5y`.
pub fn parse_expression(src: &str) -> Result<LinearExpression, ParseError> {
    let mut terms = Terms::new(src).peekable();

    if terms.peek().is_none() {
        return Err(ParseError::MalformedExpression {
            text: src.trim().into(),
        });
    }

    terms.try_fold(LinearExpression::default(), |expr, term| {
        let coefficient = term.coefficient()?;
        Ok(expr + LinearExpression::term(term.variable, coefficient))
    })
}

/// Possible errors that may occur while parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The text didn't contain a single `x` or `y` term.
    #[error("\"{text}\" doesn't contain any terms in x or y")]
    MalformedExpression { text: SmolStr },
    /// A term's coefficient isn't a number (e.g. the `.` in `.x`).
    #[error("\"{text}\" is not a valid coefficient (at {span:?})")]
    InvalidCoefficient { text: SmolStr, span: Range<usize> },
    #[error("\"{text}\" doesn't contain one of \"<=\", \">=\" or \"=\"")]
    MissingRelation { text: SmolStr },
    #[error("\"{text}\" is not a valid bound")]
    InvalidBound { text: SmolStr },
}

#[derive(Debug, Clone, PartialEq)]
struct Terms<'a> {
    src: &'a str,
    cursor: usize,
}

impl<'a> Terms<'a> {
    fn new(src: &'a str) -> Self { Terms { src, cursor: 0 } }

    fn rest(&self) -> &'a str { &self.src[self.cursor..] }

    fn peek(&self) -> Option<char> { self.rest().chars().next() }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += c.len_utf8();
        Some(c)
    }

    fn skip_while<P>(&mut self, mut predicate: P)
    where
        P: FnMut(char) -> bool,
    {
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }

            self.advance();
        }
    }

    /// Try to read a term starting at the cursor, leaving the cursor where it
    /// was if there isn't one.
    fn chomp_term(&mut self) -> Option<Term<'a>> {
        let start = self.cursor;

        let negative = match self.peek() {
            Some(sign @ '+') | Some(sign @ '-') => {
                self.advance();
                self.skip_while(char::is_whitespace);
                sign == '-'
            },
            _ => false,
        };

        let number_start = self.cursor;
        self.skip_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') {
            // skip past the decimal
            self.advance();
            self.skip_while(|c| c.is_ascii_digit());
        }

        let number_end = self.cursor;

        match self.peek().and_then(Variable::from_char) {
            Some(variable) => {
                self.advance();

                Some(Term {
                    text: &self.src[start..number_end],
                    negative,
                    number: &self.src[number_start..number_end],
                    variable,
                    span: start..self.cursor,
                })
            },
            None => {
                self.cursor = start;
                None
            },
        }
    }
}

impl<'a> Iterator for Terms<'a> {
    type Item = Term<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(term) = self.chomp_term() {
                return Some(term);
            }

            // not the start of a term, try again from the next character
            self.advance()?;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Term<'a> {
    /// Everything before the variable, sign included.
    text: &'a str,
    negative: bool,
    number: &'a str,
    variable: Variable,
    span: Range<usize>,
}

impl<'a> Term<'a> {
    fn coefficient(&self) -> Result<f64, ParseError> {
        let invalid = || ParseError::InvalidCoefficient {
            text: self.text.into(),
            span: self.span.start..self.span.start + self.text.len(),
        };

        let magnitude = if self.number.is_empty() {
            1.0
        } else {
            self.number.parse::<f64>().map_err(|_| invalid())?
        };

        // too many digits overflows to infinity
        if !magnitude.is_finite() {
            return Err(invalid());
        }

        if self.negative {
            Ok(-magnitude)
        } else {
            Ok(magnitude)
        }
    }
}
