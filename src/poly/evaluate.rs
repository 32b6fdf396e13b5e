//! Partial evaluation of terms and polynomials.
//!
//! Bound variables are substituted by numbers and removed from the exponent maps;
//! unbound variables are kept, so evaluating a polynomial yields the residual
//! polynomial in the remaining variables, or a constant when every variable is bound.

use ahash::HashMap;
use smallvec::SmallVec;

use crate::domains::number::Number;
use crate::error::Result;

use super::polynomial::LaurentPolynomial;
use super::term::Term;
use super::{Degree, Variable};

impl Term {
    /// Substitute the variables in `values`.
    ///
    /// When the coefficient is an exact integer, every exponent of the term is
    /// integral and every substituted value is `1` or `-1`, only the sign of the
    /// coefficient can change and it stays an exact integer. Otherwise the result
    /// follows the usual promotion rules, e.g. a negative integer exponent gives a float.
    ///
    /// Substituting `0` for a variable with a negative exponent is a division by zero.
    pub fn evaluate(&self, values: &HashMap<Variable, Number>) -> Result<Term> {
        let mut degree: Degree = SmallVec::new();
        let mut substituted = vec![];

        for (v, e) in self.degree() {
            match values.get(v) {
                Some(x) => substituted.push((x, e)),
                None => degree.push((v.clone(), e.clone())),
            }
        }

        if substituted.is_empty() {
            return Ok(self.clone());
        }

        let exact = self.coefficient().is_integer()
            && self.degree().iter().all(|(_, e)| e.is_integral())
            && substituted.iter().all(|(x, _)| x.abs().is_one());

        let coefficient = if exact {
            let flips = substituted
                .iter()
                .filter(|(x, e)| x.is_negative() && e.is_odd())
                .count();
            if flips % 2 == 1 {
                -self.coefficient()
            } else {
                self.coefficient().clone()
            }
        } else {
            let mut c = self.coefficient().clone();
            for (x, e) in substituted {
                c = &c * &x.checked_pow(e)?;
            }
            c
        };

        Ok(Term::from_parts(coefficient, degree))
    }
}

impl LaurentPolynomial {
    /// Substitute variables by numbers, e.g. `p.evaluate([("x", 3), ("y", 4)])`.
    pub fn evaluate<I, K, N>(&self, values: I) -> Result<LaurentPolynomial>
    where
        I: IntoIterator<Item = (K, N)>,
        K: Into<Variable>,
        N: Into<Number>,
    {
        let map: HashMap<Variable, Number> = values
            .into_iter()
            .map(|(k, n)| (k.into(), n.into()))
            .collect();
        self.evaluate_map(&map)
    }

    /// Substitute the variables in `values` term by term.
    pub fn evaluate_map(&self, values: &HashMap<Variable, Number>) -> Result<LaurentPolynomial> {
        if values.is_empty() {
            return Ok(self.clone());
        }

        let terms = self
            .iter()
            .map(|t| t.evaluate(values))
            .collect::<Result<Vec<_>>>()?;
        Ok(LaurentPolynomial::from_terms(terms))
    }
}

#[cfg(test)]
mod test {
    use ahash::HashMap;

    use crate::domains::number::Number;
    use crate::error::Error;
    use crate::poly::polynomial::LaurentPolynomial;
    use crate::poly::term::Term;
    use crate::poly::Variable;

    fn p(s: &str) -> LaurentPolynomial {
        LaurentPolynomial::parse(s).unwrap()
    }

    fn values(v: &[(&str, Number)]) -> HashMap<Variable, Number> {
        v.iter().map(|(k, n)| ((*k).into(), n.clone())).collect()
    }

    #[test]
    fn full_substitution() {
        let r = p("x^2y^-3 - y^-1").evaluate([("x", 3), ("y", 4)]).unwrap();
        assert_eq!(r.as_number(), Some(Number::from(-0.109375)));
    }

    #[test]
    fn partial_substitution() {
        let r = p("x^2y^-3 - y^-1 + 2x").evaluate([("x", 2)]).unwrap();
        assert_eq!(r, p("4y^-3 - y^-1 + 4"));
        assert!(r.terms().iter().all(|t| t.coefficient().is_integer()));

        let unbound = p("x + y").evaluate([("z", 5)]).unwrap();
        assert_eq!(unbound, p("x + y"));
    }

    #[test]
    fn unit_values_stay_exact() {
        let r = p("3x^-2 - 2y^-1").evaluate([("x", -1), ("y", 1)]).unwrap();
        assert_eq!(r.as_number(), Some(Number::from(1)));
        assert!(r.as_number().unwrap().is_integer());

        let e = Term::new(5, [("x", -3)])
            .evaluate(&values(&[("x", Number::from(-1))]))
            .unwrap();
        assert!(e.coefficient().is_integer());
        assert_eq!(e.coefficient(), &Number::from(-5));
    }

    #[test]
    fn unit_values_keep_large_coefficients() {
        // 2^53 + 1 is not representable as a float
        let t = Term::parse("9007199254740993x^-1").unwrap();
        let e = t.evaluate(&values(&[("x", Number::from(-1))])).unwrap();
        assert_eq!(e, Term::parse("-9007199254740993").unwrap());
        assert!(e.coefficient().is_integer());

        let t = Term::parse("123456789012345678901234567891x^-3y^2").unwrap();
        let e = t
            .evaluate(&values(&[("x", Number::from(-1)), ("y", Number::from(-1.0))]))
            .unwrap();
        assert_eq!(e.to_string(), "-123456789012345678901234567891");

        let e = t.evaluate(&values(&[("x", Number::from(1))])).unwrap();
        assert_eq!(e.to_string(), "123456789012345678901234567891y^2");
    }

    #[test]
    fn fractional_exponents_disable_exactness() {
        let t = Term::parse("3x^0.5y^-1").unwrap();
        let e = t.evaluate(&values(&[("y", Number::from(-1))])).unwrap();
        assert!(!e.coefficient().is_integer());
        assert_eq!(e, Term::new(-3.0, [("x", 0.5)]));
    }

    #[test]
    fn promotion_on_substitution() {
        let r = p("x^-1").evaluate([("x", 2)]).unwrap();
        let n = r.as_number().unwrap();
        assert!(!n.is_integer());
        assert_eq!(n, Number::from(0.5));

        let r = p("x^0.5").evaluate([("x", 1)]).unwrap();
        assert!(!r.as_number().unwrap().is_integer());

        let r = p("x^2").evaluate([("x", 1.5)]).unwrap();
        assert_eq!(r.as_number(), Some(Number::from(2.25)));
    }

    #[test]
    fn zero_with_negative_exponent() {
        assert_eq!(
            p("x^-1 + 1").evaluate([("x", 0)]),
            Err(Error::DivisionByZero)
        );
        assert_eq!(
            p("x^-0.5y").evaluate([("x", 0.0)]),
            Err(Error::DivisionByZero)
        );
        assert_eq!(p("x^2 + 1").evaluate([("x", 0)]).unwrap(), p("1"));
    }

    #[test]
    fn cancellation_after_substitution() {
        let r = p("x - y").evaluate([("x", 7), ("y", 7)]).unwrap();
        assert!(r.is_zero());
    }
}
