use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::{Mul, Neg};

use smallvec::SmallVec;

use crate::domains::number::Number;
use crate::error::{Error, Result};
use crate::parser;

use super::{exponent_of, normalize_degree, Degree, Variable};

/// A single term of a Laurent polynomial: a coefficient times a product of
/// variables raised to integer or float exponents.
///
/// A term is always in canonical form: the exponent map is sorted by variable,
/// contains no zero exponents, and is empty when the coefficient is zero.
/// Equality and ordering consider the exponent map first and the coefficient last.
#[derive(Clone, Debug)]
pub struct Term {
    coefficient: Number,
    degree: Degree,
}

impl Term {
    /// Create a term from a coefficient and `(variable, exponent)` pairs.
    /// Repeated variables are merged by adding their exponents.
    pub fn new<C, I, V, N>(coefficient: C, degree: I) -> Term
    where
        C: Into<Number>,
        I: IntoIterator<Item = (V, N)>,
        V: Into<Variable>,
        N: Into<Number>,
    {
        Term::from_parts(
            coefficient.into(),
            degree
                .into_iter()
                .map(|(v, e)| (v.into(), e.into()))
                .collect(),
        )
    }

    pub(crate) fn from_parts(coefficient: Number, degree: Degree) -> Term {
        let mut t = Term {
            coefficient,
            degree,
        };
        t.canonical();
        t
    }

    /// A term without variables.
    pub fn constant(coefficient: impl Into<Number>) -> Term {
        Term::from_parts(coefficient.into(), SmallVec::new())
    }

    #[inline]
    pub fn zero() -> Term {
        Term::constant(Number::zero())
    }

    #[inline]
    pub fn one() -> Term {
        Term::constant(Number::one())
    }

    /// Parse a single signed term such as `-2x^3y^-1` or `0.5z^0.25`.
    pub fn parse(input: &str) -> Result<Term> {
        parser::parse_term(input)
    }

    /// Restore the canonical form: a zero coefficient clears the exponent map,
    /// zero exponents are dropped and the variables are sorted.
    pub fn canonical(&mut self) {
        if self.coefficient.is_zero() {
            self.degree.clear();
        } else {
            normalize_degree(&mut self.degree);
        }
    }

    #[inline]
    pub fn coefficient(&self) -> &Number {
        &self.coefficient
    }

    /// The exponent map, sorted by variable.
    #[inline]
    pub fn degree(&self) -> &[(Variable, Number)] {
        &self.degree
    }

    /// The exponent of `var`, which is 0 when the variable does not occur.
    #[inline]
    pub fn exponent(&self, var: &str) -> Number {
        exponent_of(&self.degree, var)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.degree.iter().map(|(v, _)| v)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    /// Returns `true` if the term has no variables.
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.degree.is_empty()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.coefficient.is_one() && self.is_constant()
    }

    #[inline]
    pub fn is_minus_one(&self) -> bool {
        self.coefficient.is_minus_one() && self.is_constant()
    }

    /// Two terms are similar when their exponent maps are equal.
    #[inline]
    pub fn is_similar(&self, other: &Term) -> bool {
        self.degree == other.degree
    }

    fn incompatible(&self, other: &Term) -> Error {
        Error::IncompatibleTerms {
            lhs: self.to_string(),
            rhs: other.to_string(),
        }
    }

    /// Add a similar term.
    pub fn checked_add(&self, other: &Term) -> Result<Term> {
        if !self.is_similar(other) {
            return Err(self.incompatible(other));
        }

        Ok(Term::from_parts(
            &self.coefficient + &other.coefficient,
            self.degree.clone(),
        ))
    }

    /// Subtract a similar term.
    pub fn checked_sub(&self, other: &Term) -> Result<Term> {
        if !self.is_similar(other) {
            return Err(self.incompatible(other));
        }

        Ok(Term::from_parts(
            &self.coefficient - &other.coefficient,
            self.degree.clone(),
        ))
    }

    pub fn mul_coeff(&self, c: &Number) -> Term {
        Term::from_parts(&self.coefficient * c, self.degree.clone())
    }

    /// Raise the coefficient to `n` and multiply every exponent by `n`.
    /// A zero term has no negative powers.
    pub fn pow(&self, n: i64) -> Result<Term> {
        let e = Number::from(n);
        Ok(Term::from_parts(
            self.coefficient.checked_pow(&e)?,
            self.degree
                .iter()
                .map(|(v, d)| (v.clone(), d * &e))
                .collect(),
        ))
    }

    /// Floor-divide the coefficient by `other`'s coefficient and subtract the exponents.
    pub fn floor_div(&self, other: &Term) -> Result<Term> {
        let c = self.coefficient.floor_div(&other.coefficient)?;
        Ok(Term::from_parts(
            c,
            merge_degrees(&self.degree, &other.degree, |e| -e),
        ))
    }

    /// Floor-divide the coefficient by a number.
    pub fn floor_div_coeff(&self, c: &Number) -> Result<Term> {
        Ok(Term::from_parts(
            self.coefficient.floor_div(c)?,
            self.degree.clone(),
        ))
    }

    pub fn abs(&self) -> Term {
        Term {
            coefficient: self.coefficient.abs(),
            degree: self.degree.clone(),
        }
    }

    /// Replace every variable `v` by `v^-1`. The coefficient is unchanged.
    pub fn invert(&self) -> Term {
        Term {
            coefficient: self.coefficient.clone(),
            degree: self.degree.iter().map(|(v, e)| (v.clone(), -e)).collect(),
        }
    }

    pub(crate) fn set_coefficient(&mut self, coefficient: Number) {
        self.coefficient = coefficient;
        self.canonical();
    }

    pub(crate) fn into_parts(self) -> (Number, Degree) {
        (self.coefficient, self.degree)
    }
}

/// Merge two canonical exponent maps, transforming the exponents of `b` with `map_b`.
/// Exponents of a variable present in both maps are added.
fn merge_degrees(
    a: &[(Variable, Number)],
    b: &[(Variable, Number)],
    map_b: impl Fn(&Number) -> Number,
) -> Degree {
    let mut res: Degree = SmallVec::with_capacity(a.len() + b.len());
    let mut i = 0;
    let mut j = 0;

    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Less => {
                res.push(a[i].clone());
                i += 1;
            }
            Ordering::Greater => {
                res.push((b[j].0.clone(), map_b(&b[j].1)));
                j += 1;
            }
            Ordering::Equal => {
                let e = &a[i].1 + &map_b(&b[j].1);
                if !e.is_zero() {
                    res.push((a[i].0.clone(), e));
                }
                i += 1;
                j += 1;
            }
        }
    }

    res.extend(a[i..].iter().cloned());
    res.extend(b[j..].iter().map(|(v, e)| (v.clone(), map_b(e))));
    res
}

impl<'a, 'b> Mul<&'b Term> for &'a Term {
    type Output = Term;

    /// Multiply the coefficients and add the exponents variable-wise.
    fn mul(self, rhs: &'b Term) -> Term {
        Term::from_parts(
            &self.coefficient * &rhs.coefficient,
            merge_degrees(&self.degree, &rhs.degree, Number::clone),
        )
    }
}

impl Mul for Term {
    type Output = Term;

    #[inline]
    fn mul(self, rhs: Term) -> Term {
        &self * &rhs
    }
}

impl<'a, 'b> Mul<&'b Number> for &'a Term {
    type Output = Term;

    #[inline]
    fn mul(self, rhs: &'b Number) -> Term {
        self.mul_coeff(rhs)
    }
}

impl<'a> Neg for &'a Term {
    type Output = Term;

    fn neg(self) -> Term {
        Term {
            coefficient: -&self.coefficient,
            degree: self.degree.clone(),
        }
    }
}

impl Neg for Term {
    type Output = Term;

    fn neg(mut self) -> Term {
        self.coefficient = -self.coefficient;
        self
    }
}

impl From<Number> for Term {
    fn from(n: Number) -> Self {
        Term::constant(n)
    }
}

impl PartialEq for Term {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.degree == other.degree && self.coefficient == other.coefficient
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.degree.hash(state);
        self.coefficient.hash(state);
    }
}

impl PartialOrd for Term {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    /// Lexicographic over the sorted `(variable, exponent)` pairs, with the
    /// coefficient as the final tie-break.
    fn cmp(&self, other: &Self) -> Ordering {
        self.degree
            .as_slice()
            .cmp(other.degree.as_slice())
            .then_with(|| self.coefficient.cmp(&other.coefficient))
    }
}

#[cfg(test)]
mod test {
    use crate::domains::number::Number;
    use crate::error::Error;

    use super::Term;

    #[test]
    fn canonical_form() {
        let t = Term::new(3, [("y", 2), ("x", 1), ("z", 0)]);
        assert_eq!(t.degree().len(), 2);
        assert_eq!(t.degree()[0].0.as_str(), "x");
        assert_eq!(t.degree()[1].0.as_str(), "y");

        let z = Term::new(0, [("x", 5)]);
        assert!(z.is_zero());
        assert!(z.is_constant());

        let mut c = t.clone();
        c.canonical();
        assert_eq!(c, t);
    }

    #[test]
    fn queries() {
        assert!(Term::constant(1).is_one());
        assert!(Term::constant(1.0).is_one());
        assert!(Term::constant(-1).is_minus_one());
        assert!(!Term::new(1, [("x", 1)]).is_one());
        assert!(Term::constant(7).is_constant());
        assert!(Term::zero().is_zero());
        assert_eq!(Term::new(1, [("x", -2)]).exponent("x"), Number::from(-2));
        assert_eq!(Term::new(1, [("x", -2)]).exponent("y"), Number::zero());
    }

    #[test]
    fn similar_arithmetic() {
        let a = Term::new(2, [("x", 2), ("y", -3)]);
        let b = Term::new(5, [("y", -3), ("x", 2)]);
        assert!(a.is_similar(&b));
        assert_eq!(a.checked_add(&b).unwrap(), Term::new(7, [("x", 2), ("y", -3)]));
        assert_eq!(a.checked_sub(&b).unwrap(), Term::new(-3, [("x", 2), ("y", -3)]));

        let cancelled = a.checked_sub(&a).unwrap();
        assert!(cancelled.is_zero());
        assert!(cancelled.is_constant());

        let c = Term::new(1, [("x", 2)]);
        assert!(matches!(
            a.checked_add(&c),
            Err(Error::IncompatibleTerms { .. })
        ));
    }

    #[test]
    fn multiplication() {
        let a = Term::new(2, [("x", 2), ("y", -3)]);
        let b = Term::new(-3, [("y", 3), ("z", 1)]);
        assert_eq!(&a * &b, Term::new(-6, [("x", 2), ("z", 1)]));
        assert_eq!(&a * &Number::from(0.5), Term::new(1.0, [("x", 2), ("y", -3)]));
        assert!((&a * &Number::from(0)).is_constant());
    }

    #[test]
    fn power_and_inverse() {
        let a = Term::new(-2, [("x", 2), ("y", -1)]);
        assert_eq!(a.pow(3), Ok(Term::new(-8, [("x", 6), ("y", -3)])));
        assert_eq!(a.pow(0), Ok(Term::one()));
        assert_eq!(a.pow(-1), Ok(Term::new(-0.5, [("x", -2), ("y", 1)])));
        assert_eq!(Term::zero().pow(-1), Err(Error::DivisionByZero));
        assert_eq!(Term::zero().pow(2), Ok(Term::zero()));
        assert_eq!(a.invert(), Term::new(-2, [("x", -2), ("y", 1)]));
        assert_eq!(a.invert().invert(), a);
        assert_eq!(a.abs(), Term::new(2, [("x", 2), ("y", -1)]));
        assert_eq!(-&a, Term::new(2, [("x", 2), ("y", -1)]));
    }

    #[test]
    fn floor_division() {
        let a = Term::new(7, [("x", 2), ("y", -1)]);
        let b = Term::new(2, [("x", 3), ("z", 1)]);
        assert_eq!(
            a.floor_div(&b).unwrap(),
            Term::new(3, [("x", -1), ("y", -1), ("z", -1)])
        );
        assert_eq!(
            a.floor_div_coeff(&Number::from(-2)).unwrap(),
            Term::new(-4, [("x", 2), ("y", -1)])
        );
        assert_eq!(a.floor_div(&Term::zero()), Err(Error::DivisionByZero));
    }

    #[test]
    fn ordering_is_total() {
        let terms = [
            Term::constant(3),
            Term::new(1, [("x", 1)]),
            Term::new(2, [("x", 1)]),
            Term::new(1, [("x", 1), ("y", 1)]),
            Term::new(1, [("x", 2)]),
            Term::new(1, [("y", -1)]),
        ];

        for (i, a) in terms.iter().enumerate() {
            for (j, b) in terms.iter().enumerate() {
                // antisymmetric and consistent with the list order
                assert_eq!(a.cmp(b), i.cmp(&j), "{} vs {}", a, b);
                assert_eq!(a.cmp(b), b.cmp(a).reverse());
            }
        }
    }
}
