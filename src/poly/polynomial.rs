use std::collections::hash_map::Entry;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use ahash::HashMap;
use tracing::{debug, instrument, trace};

use crate::domains::number::Number;
use crate::error::{Error, Result};
use crate::parser;

use super::term::Term;
use super::{Degree, Variable};

/// A multivariate Laurent polynomial: a sum of [Term]s whose exponents may be
/// negative or fractional.
///
/// The polynomial is always in canonical form: no two terms have the same
/// exponent map, no term has a zero coefficient, and the terms are sorted
/// ascending by their exponent maps. The empty term list is the zero polynomial.
/// Every operation returns a new polynomial in canonical form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaurentPolynomial {
    terms: Vec<Term>,
}

impl LaurentPolynomial {
    /// The zero polynomial.
    #[inline]
    pub fn new() -> Self {
        LaurentPolynomial { terms: vec![] }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::new()
    }

    #[inline]
    pub fn one() -> Self {
        Self::constant(Number::one())
    }

    pub fn constant(c: impl Into<Number>) -> Self {
        Self::from_terms([Term::constant(c)])
    }

    /// Create a polynomial from a list of terms that may contain similar or zero terms.
    pub fn from_terms(terms: impl IntoIterator<Item = Term>) -> Self {
        let mut p = LaurentPolynomial {
            terms: terms.into_iter().collect(),
        };
        p.canonical();
        p
    }

    /// Parse a polynomial such as `x+2y^3 -4y^-1 + z^(-3)y**5`.
    pub fn parse(input: &str) -> Result<Self> {
        parser::parse_terms(input).map(Self::from_terms)
    }

    /// Bring the term list into canonical form: similar terms are added,
    /// zero terms are removed and the remaining terms are sorted.
    /// This is idempotent.
    pub fn canonical(&mut self) {
        if self.terms.len() <= 1 {
            self.terms.retain(|t| !t.is_zero());
            return;
        }

        let mut groups: HashMap<Degree, Number> = HashMap::default();
        for t in self.terms.drain(..) {
            let (c, d) = t.into_parts();
            match groups.entry(d) {
                Entry::Occupied(mut e) => {
                    let sum = &*e.get() + &c;
                    *e.get_mut() = sum;
                }
                Entry::Vacant(e) => {
                    e.insert(c);
                }
            }
        }

        self.terms = groups
            .into_iter()
            .filter(|(_, c)| !c.is_zero())
            .map(|(d, c)| Term::from_parts(c, d))
            .collect();
        self.terms.sort();
    }

    #[inline]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.terms.iter()
    }

    #[inline]
    pub fn nterms(&self) -> usize {
        self.terms.len()
    }

    /// The leading term used as the pivot in division.
    ///
    /// Note that this is the *first* term in canonical order, i.e. the term
    /// with the lexicographically smallest exponent map.
    #[inline]
    pub fn lterm(&self) -> Option<&Term> {
        self.terms.first()
    }

    /// All variables that occur in the polynomial, sorted.
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars: Vec<Variable> = self
            .terms
            .iter()
            .flat_map(|t| t.variables().cloned())
            .collect();
        vars.sort();
        vars.dedup();
        vars
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns `true` if the polynomial consists of exactly one term.
    #[inline]
    pub fn is_monomial(&self) -> bool {
        self.terms.len() == 1
    }

    /// Returns `true` if the polynomial is a single non-zero constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.is_monomial() && self.terms[0].is_constant()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.is_monomial() && self.terms[0].is_one()
    }

    #[inline]
    pub fn is_minus_one(&self) -> bool {
        self.is_monomial() && self.terms[0].is_minus_one()
    }

    /// The numeric value of a constant polynomial.
    pub fn as_number(&self) -> Option<Number> {
        if self.is_zero() {
            Some(Number::zero())
        } else if self.is_constant() {
            Some(self.terms[0].coefficient().clone())
        } else {
            None
        }
    }

    /// Multiply every coefficient by `c`.
    pub fn mul_coeff(&self, c: &Number) -> Self {
        Self::from_terms(self.terms.iter().map(|t| t.mul_coeff(c)))
    }

    /// Multiply by a single term.
    pub fn mul_term(&self, t: &Term) -> Self {
        Self::from_terms(self.terms.iter().map(|x| x * t))
    }

    /// Compute `self^n` by repeated multiplication, starting from 1.
    pub fn pow(&self, n: u32) -> Self {
        let mut res = Self::one();
        for _ in 0..n {
            res = &res * self;
        }
        res
    }

    /// Bounded pseudo-division with remainder.
    ///
    /// At most `self.nterms()` reduction steps are made, each dividing the
    /// leading term of the remainder by the leading term of `div` (see
    /// [lterm](Self::lterm)). The result is exact when the remainder reaches zero;
    /// otherwise the accumulated quotient and remainder are returned as they are.
    ///
    /// Dividing the zero polynomial yields `(0, div)`.
    #[instrument(level = "trace", skip_all, fields(nterms = self.nterms(), div_nterms = div.nterms()))]
    pub fn quot_rem(&self, div: &Self) -> Result<(Self, Self)> {
        let Some(pivot) = div.lterm() else {
            return Err(Error::DivisionByZero);
        };

        if self.is_zero() {
            return Ok((Self::zero(), div.clone()));
        }

        let mut q = Self::zero();
        let mut r = self.clone();

        for step in 0..self.nterms() {
            let Some(lead) = r.lterm() else {
                break;
            };

            let t = lead.floor_div(pivot)?;
            trace!(step, quotient_term = %t);

            r = &r - &div.mul_term(&t);
            q = q + Self::from(t);

            if r.is_zero() {
                return Ok((q, r));
            }
        }

        debug!(
            "Division of {} by {} stopped after {} steps with remainder {}",
            self,
            div,
            self.nterms(),
            r
        );
        Ok((q, r))
    }

    /// The quotient of [quot_rem](Self::quot_rem).
    pub fn floor_div(&self, div: &Self) -> Result<Self> {
        self.quot_rem(div).map(|(q, _)| q)
    }

    /// The remainder of [quot_rem](Self::quot_rem).
    pub fn rem(&self, div: &Self) -> Result<Self> {
        self.quot_rem(div).map(|(_, r)| r)
    }

    pub fn pow_assign(&mut self, n: u32) {
        *self = self.pow(n);
    }

    pub fn floor_div_assign(&mut self, div: &Self) -> Result<()> {
        *self = self.floor_div(div)?;
        Ok(())
    }

    pub fn rem_assign(&mut self, div: &Self) -> Result<()> {
        *self = self.rem(div)?;
        Ok(())
    }

    /// Replace every coefficient by its absolute value.
    pub fn abs(&self) -> Self {
        LaurentPolynomial {
            terms: self.terms.iter().map(Term::abs).collect(),
        }
    }

    /// Replace every variable `v` by `v^-1`.
    pub fn invert(&self) -> Self {
        Self::from_terms(self.terms.iter().map(Term::invert))
    }

    fn fold_exponents(&self, var: &str, f: fn(Number, Number) -> Number) -> Option<Number> {
        self.terms.iter().map(|t| t.exponent(var)).reduce(f)
    }

    /// The maximal exponent of `var`. Terms without `var` count as exponent 0.
    /// Returns `None` for the zero polynomial.
    pub fn max_degree(&self, var: &str) -> Option<Number> {
        self.fold_exponents(var, std::cmp::max)
    }

    /// The minimal exponent of `var`. Terms without `var` count as exponent 0.
    /// Returns `None` for the zero polynomial.
    pub fn min_degree(&self, var: &str) -> Option<Number> {
        self.fold_exponents(var, std::cmp::min)
    }

    pub fn min_max_degree(&self, var: &str) -> Option<(Number, Number)> {
        Some((self.min_degree(var)?, self.max_degree(var)?))
    }

    /// The difference between the maximal and minimal exponent of `var`.
    pub fn span(&self, var: &str) -> Option<Number> {
        let (min, max) = self.min_max_degree(var)?;
        Some(&max - &min)
    }

    fn map_variables(&self, f: impl Fn(&str) -> Option<Number>) -> HashMap<Variable, Number> {
        self.variables()
            .into_iter()
            .filter_map(|v| f(v.as_str()).map(|d| (v, d)))
            .collect()
    }

    /// The maximal exponent of every variable in the polynomial.
    pub fn max_degrees(&self) -> HashMap<Variable, Number> {
        self.map_variables(|v| self.max_degree(v))
    }

    /// The minimal exponent of every variable in the polynomial.
    pub fn min_degrees(&self) -> HashMap<Variable, Number> {
        self.map_variables(|v| self.min_degree(v))
    }

    pub fn min_max_degrees(&self) -> HashMap<Variable, (Number, Number)> {
        self.variables()
            .into_iter()
            .filter_map(|v| self.min_max_degree(&v).map(|d| (v, d)))
            .collect()
    }

    /// The span of every variable in the polynomial.
    pub fn spans(&self) -> HashMap<Variable, Number> {
        self.map_variables(|v| self.span(v))
    }
}

impl<'a> IntoIterator for &'a LaurentPolynomial {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl From<Term> for LaurentPolynomial {
    fn from(t: Term) -> Self {
        Self::from_terms([t])
    }
}

impl From<Number> for LaurentPolynomial {
    fn from(n: Number) -> Self {
        Self::constant(n)
    }
}

impl From<i64> for LaurentPolynomial {
    fn from(n: i64) -> Self {
        Self::constant(n)
    }
}

impl From<i32> for LaurentPolynomial {
    fn from(n: i32) -> Self {
        Self::constant(n)
    }
}

impl From<f64> for LaurentPolynomial {
    fn from(n: f64) -> Self {
        Self::constant(n)
    }
}

impl FromStr for LaurentPolynomial {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for LaurentPolynomial {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<'a, 'b> Add<&'b LaurentPolynomial> for &'a LaurentPolynomial {
    type Output = LaurentPolynomial;

    fn add(self, rhs: &'b LaurentPolynomial) -> LaurentPolynomial {
        if self.is_zero() {
            return rhs.clone();
        }
        if rhs.is_zero() {
            return self.clone();
        }

        LaurentPolynomial::from_terms(self.terms.iter().chain(&rhs.terms).cloned())
    }
}

impl<'a> Add<&'a LaurentPolynomial> for LaurentPolynomial {
    type Output = LaurentPolynomial;

    fn add(mut self, rhs: &'a LaurentPolynomial) -> LaurentPolynomial {
        self.terms.extend(rhs.terms.iter().cloned());
        self.canonical();
        self
    }
}

impl Add for LaurentPolynomial {
    type Output = LaurentPolynomial;

    fn add(mut self, rhs: LaurentPolynomial) -> LaurentPolynomial {
        self.terms.extend(rhs.terms);
        self.canonical();
        self
    }
}

impl<'a, 'b> Sub<&'b LaurentPolynomial> for &'a LaurentPolynomial {
    type Output = LaurentPolynomial;

    fn sub(self, rhs: &'b LaurentPolynomial) -> LaurentPolynomial {
        LaurentPolynomial::from_terms(
            self.terms
                .iter()
                .cloned()
                .chain(rhs.terms.iter().map(|t| -t)),
        )
    }
}

impl<'a> Sub<&'a LaurentPolynomial> for LaurentPolynomial {
    type Output = LaurentPolynomial;

    fn sub(mut self, rhs: &'a LaurentPolynomial) -> LaurentPolynomial {
        self.terms.extend(rhs.terms.iter().map(|t| -t));
        self.canonical();
        self
    }
}

impl Sub for LaurentPolynomial {
    type Output = LaurentPolynomial;

    #[inline]
    fn sub(self, rhs: LaurentPolynomial) -> LaurentPolynomial {
        self - &rhs
    }
}

impl<'a, 'b> Mul<&'b LaurentPolynomial> for &'a LaurentPolynomial {
    type Output = LaurentPolynomial;

    /// Multiply every pair of terms and bring the result into canonical form.
    // TODO: merge the sorted products instead of regrouping the full Cartesian product
    fn mul(self, rhs: &'b LaurentPolynomial) -> LaurentPolynomial {
        if self.is_zero() || rhs.is_zero() {
            return LaurentPolynomial::zero();
        }

        let mut terms = Vec::with_capacity(self.nterms() * rhs.nterms());
        for t0 in &self.terms {
            for t1 in &rhs.terms {
                terms.push(t0 * t1);
            }
        }

        LaurentPolynomial::from_terms(terms)
    }
}

impl<'a> Mul<&'a LaurentPolynomial> for LaurentPolynomial {
    type Output = LaurentPolynomial;

    #[inline]
    fn mul(self, rhs: &'a LaurentPolynomial) -> LaurentPolynomial {
        &self * rhs
    }
}

impl Mul for LaurentPolynomial {
    type Output = LaurentPolynomial;

    #[inline]
    fn mul(self, rhs: LaurentPolynomial) -> LaurentPolynomial {
        &self * &rhs
    }
}

impl<'a, 'b> Mul<&'b Term> for &'a LaurentPolynomial {
    type Output = LaurentPolynomial;

    #[inline]
    fn mul(self, rhs: &'b Term) -> LaurentPolynomial {
        self.mul_term(rhs)
    }
}

impl<'a> Add<Number> for &'a LaurentPolynomial {
    type Output = LaurentPolynomial;

    fn add(self, rhs: Number) -> LaurentPolynomial {
        self + &LaurentPolynomial::constant(rhs)
    }
}

impl<'a> Sub<Number> for &'a LaurentPolynomial {
    type Output = LaurentPolynomial;

    fn sub(self, rhs: Number) -> LaurentPolynomial {
        self - &LaurentPolynomial::constant(rhs)
    }
}

impl<'a> Mul<Number> for &'a LaurentPolynomial {
    type Output = LaurentPolynomial;

    #[inline]
    fn mul(self, rhs: Number) -> LaurentPolynomial {
        self.mul_coeff(&rhs)
    }
}

impl<'a> Neg for &'a LaurentPolynomial {
    type Output = LaurentPolynomial;

    fn neg(self) -> LaurentPolynomial {
        LaurentPolynomial {
            terms: self.terms.iter().map(|t| -t).collect(),
        }
    }
}

impl Neg for LaurentPolynomial {
    type Output = LaurentPolynomial;

    fn neg(self) -> LaurentPolynomial {
        LaurentPolynomial {
            terms: self.terms.into_iter().map(|t| -t).collect(),
        }
    }
}

impl<'a> AddAssign<&'a LaurentPolynomial> for LaurentPolynomial {
    fn add_assign(&mut self, rhs: &'a LaurentPolynomial) {
        *self = &*self + rhs;
    }
}

impl AddAssign for LaurentPolynomial {
    fn add_assign(&mut self, rhs: LaurentPolynomial) {
        *self = &*self + &rhs;
    }
}

impl<'a> SubAssign<&'a LaurentPolynomial> for LaurentPolynomial {
    fn sub_assign(&mut self, rhs: &'a LaurentPolynomial) {
        *self = &*self - rhs;
    }
}

impl SubAssign for LaurentPolynomial {
    fn sub_assign(&mut self, rhs: LaurentPolynomial) {
        *self = &*self - &rhs;
    }
}

impl<'a> MulAssign<&'a LaurentPolynomial> for LaurentPolynomial {
    fn mul_assign(&mut self, rhs: &'a LaurentPolynomial) {
        *self = &*self * rhs;
    }
}

impl MulAssign for LaurentPolynomial {
    fn mul_assign(&mut self, rhs: LaurentPolynomial) {
        *self = &*self * &rhs;
    }
}

#[cfg(test)]
mod test {
    use crate::domains::number::Number;
    use crate::error::Error;
    use crate::poly::term::Term;

    use super::LaurentPolynomial;

    fn p(s: &str) -> LaurentPolynomial {
        LaurentPolynomial::parse(s).unwrap()
    }

    #[test]
    fn canonical_merges_and_sorts() {
        let a = LaurentPolynomial::from_terms([
            Term::new(1, [("y", -1)]),
            Term::constant(3),
            Term::new(2, [("x", 1)]),
            Term::new(-1, [("y", -1)]),
            Term::new(0, [("z", 4)]),
            Term::constant(-1),
        ]);

        assert_eq!(a.nterms(), 2);
        assert_eq!(a.terms()[0], Term::constant(2));
        assert_eq!(a.terms()[1], Term::new(2, [("x", 1)]));

        let mut b = a.clone();
        b.canonical();
        assert_eq!(a, b);
    }

    #[test]
    fn int_and_float_exponents_are_similar() {
        let a = LaurentPolynomial::from_terms([
            Term::new(1, [("y", 2)]),
            Term::new(2, [("y", 2.0)]),
        ]);
        assert_eq!(a.nterms(), 1);
        assert_eq!(a.terms()[0].coefficient(), &Number::from(3));
    }

    #[test]
    fn addition() {
        assert_eq!(p("x^2y^-3 - y^-1") + p("1+3y^-1"), p("1 + x^2y^-3 + 2y^-1"));
        assert_eq!(&p("x") - &p("x"), LaurentPolynomial::zero());
        assert_eq!(&p("1+3y^-1") + Number::from(7), p("8+3y^-1"));
        assert_eq!(&p("x") - Number::from(1), p("x - 1"));
    }

    #[test]
    fn multiplication() {
        assert_eq!(
            &p("x^2y^-3 - y^-1") * &p("1+3y^-1"),
            p("3x^2y^-4 + x^2y^-3 - 3y^-2 - y^-1")
        );
        assert_eq!(&p("x^2y^-3 - y^-1") * Number::from(7), p("7x^2y^-3 - 7y^-1"));
        assert_eq!(&p("x + 1") * &LaurentPolynomial::zero(), LaurentPolynomial::zero());
        assert_eq!(&p("x + y^-1") * &Term::new(2, [("y", 1)]), p("2xy + 2"));
    }

    #[test]
    fn powers() {
        assert_eq!(p("x^2y^-3 - y^-1").pow(2), p("x^4y^-6 - 2x^2y^-4 + y^-2"));
        assert_eq!(p("x + y").pow(0), LaurentPolynomial::one());
        assert_eq!(p("x + x^-1").pow(3), p("x^3 + 3x + 3x^-1 + x^-3"));

        let mut a = p("1 + x");
        a.pow_assign(2);
        assert_eq!(a, p("1 + 2x + x^2"));
    }

    #[test]
    fn unary() {
        assert_eq!(-p("x^2y^-3 - y^-1"), p("-x^2y^-3 + y^-1"));
        assert_eq!(p("x^2y^-3 - y^-1").abs(), p("x^2y^-3 + y^-1"));
        assert_eq!(p("x^2y^-3 - y^-1").invert(), p("x^-2y^3 - y"));
    }

    #[test]
    fn queries() {
        assert!(!p("1").is_zero());
        assert!(p("0").is_zero());
        assert!(p("0x").is_zero());
        assert!(p("1").is_one());
        assert!(p("-1").is_minus_one());
        assert!(p("5").is_constant());
        assert!(!p("5x").is_constant());
        assert!(p("0.5").is_constant());
        assert!(p("5x").is_monomial());
        assert!(!p("x^2y^-3 - y^-1").is_monomial());
        assert!(!LaurentPolynomial::zero().is_constant());
        assert_eq!(p("5").as_number(), Some(Number::from(5)));
        assert_eq!(p("x").as_number(), None);
    }

    #[test]
    fn degrees() {
        let a = p("x^2y^-3 - y^-1");
        assert_eq!(a.max_degree("y"), Some(Number::from(-1)));
        assert_eq!(a.min_degree("y"), Some(Number::from(-3)));
        assert_eq!(a.span("y"), Some(Number::from(2)));
        assert_eq!(a.max_degree("x"), Some(Number::from(2)));
        assert_eq!(a.min_degree("x"), Some(Number::from(0)));
        assert_eq!(a.max_degree("z"), Some(Number::from(0)));
        assert_eq!(LaurentPolynomial::zero().max_degree("x"), None);

        let max = a.max_degrees();
        assert_eq!(max.len(), 2);
        assert_eq!(max["x"], Number::from(2));
        assert_eq!(max["y"], Number::from(-1));

        let spans = a.spans();
        assert_eq!(spans["x"], Number::from(2));
        assert_eq!(spans["y"], Number::from(2));

        let mm = a.min_max_degrees();
        assert_eq!(mm["y"], (Number::from(-3), Number::from(-1)));
        assert!(LaurentPolynomial::zero().max_degrees().is_empty());
    }

    #[test]
    fn division_univariate() {
        let a = p("x^2 - 1");
        let b = p("x - 1");
        let (q, r) = a.quot_rem(&b).unwrap();
        assert_eq!(q, p("x + 1"));
        assert!(r.is_zero());
        assert_eq!(&(&q * &b) + &r, a);
    }

    #[test]
    fn division_with_remainder() {
        let a = p("x^2 + 1");
        let b = p("x + 1");
        let (q, r) = a.quot_rem(&b).unwrap();
        // the pivot is the constant term 1, so the remainder keeps growing in degree
        assert_eq!(&(&q * &b) + &r, a);
        assert!(!r.is_zero());
    }

    #[test]
    fn division_edge_cases() {
        let a = p("x^2y^-3 - y^-1");
        assert_eq!(a.quot_rem(&LaurentPolynomial::zero()), Err(Error::DivisionByZero));

        let (q, r) = LaurentPolynomial::zero().quot_rem(&a).unwrap();
        assert!(q.is_zero());
        assert_eq!(r, a);

        let (q, r) = a.quot_rem(&a).unwrap();
        assert!(q.is_one());
        assert!(r.is_zero());

        let mut c = p("2x^2 + 4x");
        c.floor_div_assign(&p("2x")).unwrap();
        assert_eq!(c, p("x + 2"));

        let mut d = p("7x");
        d.rem_assign(&p("2")).unwrap();
        assert_eq!(d, p("x"));
    }

    #[test]
    fn compound_assignment() {
        let mut a = p("x");
        let b = a.clone();
        a += &p("y");
        a -= p("x");
        a *= &p("y");
        assert_eq!(a, p("y^2"));
        assert_eq!(b, p("x"));
    }

    #[test]
    fn ordering_follows_terms() {
        assert!(p("1") < p("x"));
        assert!(p("x") < p("x + y"));
        assert!(p("x") < p("2x"));
    }
}
