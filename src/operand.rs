//! Dynamic arithmetic over numbers, terms and polynomials.
//!
//! [Operand] is a closed union of the three kinds of values the algebra works
//! with. Operators are dispatched on the pair of operand kinds; a combination
//! without a meaning yields [Error::UnsupportedOperand].

use std::fmt;

use crate::domains::number::Number;
use crate::error::{Error, Result};
use crate::poly::{polynomial::LaurentPolynomial, term::Term};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Pow,
    FloorDiv,
    Mod,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Pow => "**",
            BinaryOperator::FloorDiv => "//",
            BinaryOperator::Mod => "%",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Neg,
    Abs,
    /// Negate every exponent.
    Invert,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    Number(Number),
    Term(Term),
    Polynomial(LaurentPolynomial),
}

impl Operand {
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Number(_) => "number",
            Operand::Term(_) => "term",
            Operand::Polynomial(_) => "polynomial",
        }
    }

    fn unsupported(&self, op: BinaryOperator, rhs: &Operand) -> Error {
        Error::UnsupportedOperand {
            op: op.symbol(),
            lhs: self.kind().to_owned(),
            rhs: rhs.kind().to_owned(),
        }
    }

    /// Convert to a polynomial. Numbers become constants and terms monomials.
    pub fn into_polynomial(self) -> LaurentPolynomial {
        match self {
            Operand::Number(n) => LaurentPolynomial::constant(n),
            Operand::Term(t) => LaurentPolynomial::from(t),
            Operand::Polynomial(p) => p,
        }
    }

    /// Apply `op` with `self` as left-hand side.
    ///
    /// Terms only combine additively with similar terms, and mixing a term with a
    /// polynomial promotes the term to a polynomial. Polynomials can only be raised
    /// to non-negative integer powers.
    pub fn apply(&self, op: BinaryOperator, rhs: &Operand) -> Result<Operand> {
        use BinaryOperator::*;

        match (self, rhs) {
            (Operand::Number(a), Operand::Number(b)) => match op {
                Add => Ok(Operand::Number(a + b)),
                Sub => Ok(Operand::Number(a - b)),
                Mul => Ok(Operand::Number(a * b)),
                Pow => a.checked_pow(b).map(Operand::Number),
                FloorDiv => a.floor_div(b).map(Operand::Number),
                Mod => {
                    let q = a.floor_div(b)?;
                    Ok(Operand::Number(a - &(&q * b)))
                }
            },
            (Operand::Term(a), Operand::Term(b)) => match op {
                Add => a.checked_add(b).map(Operand::Term),
                Sub => a.checked_sub(b).map(Operand::Term),
                Mul => Ok(Operand::Term(a * b)),
                FloorDiv => a.floor_div(b).map(Operand::Term),
                Pow | Mod => Err(self.unsupported(op, rhs)),
            },
            (Operand::Term(a), Operand::Number(b)) => match op {
                Add => a.checked_add(&Term::constant(b.clone())).map(Operand::Term),
                Sub => a.checked_sub(&Term::constant(b.clone())).map(Operand::Term),
                Mul => Ok(Operand::Term(a.mul_coeff(b))),
                FloorDiv => a.floor_div_coeff(b).map(Operand::Term),
                Pow => match b.to_i64() {
                    Some(n) => a.pow(n).map(Operand::Term),
                    None => Err(self.unsupported(op, rhs)),
                },
                Mod => Err(self.unsupported(op, rhs)),
            },
            (Operand::Number(a), Operand::Term(b)) => match op {
                Add => Term::constant(a.clone()).checked_add(b).map(Operand::Term),
                Sub => Term::constant(a.clone()).checked_sub(b).map(Operand::Term),
                Mul => Ok(Operand::Term(b.mul_coeff(a))),
                FloorDiv | Pow | Mod => Err(self.unsupported(op, rhs)),
            },
            (Operand::Polynomial(a), Operand::Polynomial(b)) => {
                polynomial_op(op, a, b).ok_or_else(|| self.unsupported(op, rhs))?
            }
            (Operand::Polynomial(a), Operand::Number(b)) => match op {
                Pow => match b.to_i64().and_then(|n| u32::try_from(n).ok()) {
                    Some(n) => Ok(Operand::Polynomial(a.pow(n))),
                    None => Err(self.unsupported(op, rhs)),
                },
                _ => polynomial_op(op, a, &LaurentPolynomial::constant(b.clone()))
                    .ok_or_else(|| self.unsupported(op, rhs))?,
            },
            (Operand::Number(a), Operand::Polynomial(b)) => {
                polynomial_op(op, &LaurentPolynomial::constant(a.clone()), b)
                    .ok_or_else(|| self.unsupported(op, rhs))?
            }
            (Operand::Polynomial(a), Operand::Term(b)) => {
                polynomial_op(op, a, &LaurentPolynomial::from(b.clone()))
                    .ok_or_else(|| self.unsupported(op, rhs))?
            }
            (Operand::Term(a), Operand::Polynomial(b)) => {
                polynomial_op(op, &LaurentPolynomial::from(a.clone()), b)
                    .ok_or_else(|| self.unsupported(op, rhs))?
            }
        }
    }

    pub fn apply_unary(&self, op: UnaryOperator) -> Operand {
        match (self, op) {
            (Operand::Number(n), UnaryOperator::Neg) => Operand::Number(-n),
            (Operand::Number(n), UnaryOperator::Abs) => Operand::Number(n.abs()),
            // a number has no exponents to negate
            (Operand::Number(n), UnaryOperator::Invert) => Operand::Number(n.clone()),
            (Operand::Term(t), UnaryOperator::Neg) => Operand::Term(-t),
            (Operand::Term(t), UnaryOperator::Abs) => Operand::Term(t.abs()),
            (Operand::Term(t), UnaryOperator::Invert) => Operand::Term(t.invert()),
            (Operand::Polynomial(p), UnaryOperator::Neg) => Operand::Polynomial(-p),
            (Operand::Polynomial(p), UnaryOperator::Abs) => Operand::Polynomial(p.abs()),
            (Operand::Polynomial(p), UnaryOperator::Invert) => Operand::Polynomial(p.invert()),
        }
    }
}

/// Binary operation between two polynomials; `None` when `op` does not apply.
fn polynomial_op(
    op: BinaryOperator,
    a: &LaurentPolynomial,
    b: &LaurentPolynomial,
) -> Option<Result<Operand>> {
    let r = match op {
        BinaryOperator::Add => Ok(a + b),
        BinaryOperator::Sub => Ok(a - b),
        BinaryOperator::Mul => Ok(a * b),
        BinaryOperator::FloorDiv => a.floor_div(b),
        BinaryOperator::Mod => a.rem(b),
        BinaryOperator::Pow => return None,
    };
    Some(r.map(Operand::Polynomial))
}

impl From<Number> for Operand {
    fn from(n: Number) -> Self {
        Operand::Number(n)
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Operand::Number(n.into())
    }
}

impl From<f64> for Operand {
    fn from(n: f64) -> Self {
        Operand::Number(n.into())
    }
}

impl From<Term> for Operand {
    fn from(t: Term) -> Self {
        Operand::Term(t)
    }
}

impl From<LaurentPolynomial> for Operand {
    fn from(p: LaurentPolynomial) -> Self {
        Operand::Polynomial(p)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::Number(n) => fmt::Display::fmt(n, f),
            Operand::Term(t) => fmt::Display::fmt(t, f),
            Operand::Polynomial(p) => fmt::Display::fmt(p, f),
        }
    }
}
