use std::fmt::{self, Write};

use crate::poly::{polynomial::LaurentPolynomial, term::Term};

/// Options that control how terms and polynomials are written.
///
/// Every preset produces text that [LaurentPolynomial::parse] accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// Write ` + ` and ` - ` between terms instead of `+` and `-`.
    pub spaces_around_operators: bool,
    /// Write `**` instead of `^`.
    pub double_star_for_exponentiation: bool,
    /// Put an explicit operator between the coefficient and the variables.
    pub multiplication_operator: Option<char>,
}

impl PrintOptions {
    /// The canonical format, e.g. `-y^-1 + 2x^2y^-3`.
    pub const fn new() -> Self {
        Self {
            spaces_around_operators: true,
            double_star_for_exponentiation: false,
            multiplication_operator: None,
        }
    }

    /// Terms without surrounding spaces, e.g. `-y^-1+2x^2y^-3`.
    pub const fn compact() -> Self {
        Self {
            spaces_around_operators: false,
            double_star_for_exponentiation: false,
            multiplication_operator: None,
        }
    }

    /// Explicit operators, e.g. `-y**-1 + 2*x**2*y**-3`.
    pub const fn explicit() -> Self {
        Self {
            spaces_around_operators: true,
            double_star_for_exponentiation: true,
            multiplication_operator: Some('*'),
        }
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes a single term, with its sign attached.
pub struct TermPrinter<'a> {
    pub term: &'a Term,
    pub opts: PrintOptions,
}

impl<'a> TermPrinter<'a> {
    pub fn new(term: &'a Term, opts: PrintOptions) -> TermPrinter<'a> {
        TermPrinter { term, opts }
    }
}

impl<'a> fmt::Display for TermPrinter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.term.coefficient().is_negative() {
            f.write_char('-')?;
        }
        fmt_unsigned_term(self.term, &self.opts, f)
    }
}

/// Write a term without its sign. A coefficient of magnitude one is omitted
/// unless the term is a constant, and an exponent of one is omitted.
fn fmt_unsigned_term<W: Write>(
    term: &Term,
    opts: &PrintOptions,
    f: &mut W,
) -> fmt::Result {
    let c = term.coefficient().abs();

    if term.is_constant() {
        return write!(f, "{}", c);
    }

    let mut first = true;
    if !c.is_one() {
        write!(f, "{}", c)?;
        first = false;
    }

    let pow = if opts.double_star_for_exponentiation {
        "**"
    } else {
        "^"
    };

    for (v, e) in term.degree() {
        if !first {
            if let Some(op) = opts.multiplication_operator {
                f.write_char(op)?;
            }
        }
        first = false;

        f.write_str(v)?;
        if !e.is_one() {
            write!(f, "{}{}", pow, e)?;
        }
    }

    Ok(())
}

/// Writes a polynomial as a sum of terms in canonical order.
pub struct PolynomialPrinter<'a> {
    pub poly: &'a LaurentPolynomial,
    pub opts: PrintOptions,
}

impl<'a> PolynomialPrinter<'a> {
    pub fn new(poly: &'a LaurentPolynomial, opts: PrintOptions) -> PolynomialPrinter<'a> {
        PolynomialPrinter { poly, opts }
    }
}

impl<'a> fmt::Display for PolynomialPrinter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.poly.is_zero() {
            return f.write_char('0');
        }

        for (i, t) in self.poly.iter().enumerate() {
            let negative = t.coefficient().is_negative();
            if i == 0 {
                if negative {
                    f.write_char('-')?;
                }
            } else {
                let sign = if negative { '-' } else { '+' };
                if self.opts.spaces_around_operators {
                    write!(f, " {} ", sign)?;
                } else {
                    f.write_char(sign)?;
                }
            }

            fmt_unsigned_term(t, &self.opts, f)?;
        }

        Ok(())
    }
}

impl LaurentPolynomial {
    /// Format with the given options, e.g. `p.printer(PrintOptions::compact()).to_string()`.
    pub fn printer(&self, opts: PrintOptions) -> PolynomialPrinter<'_> {
        PolynomialPrinter::new(self, opts)
    }
}

impl Term {
    pub fn printer(&self, opts: PrintOptions) -> TermPrinter<'_> {
        TermPrinter::new(self, opts)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&TermPrinter::new(self, PrintOptions::new()), f)
    }
}

impl fmt::Display for LaurentPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&PolynomialPrinter::new(self, PrintOptions::new()), f)
    }
}

#[cfg(test)]
mod test {
    use crate::poly::{polynomial::LaurentPolynomial, term::Term};

    use super::PrintOptions;

    fn p(s: &str) -> LaurentPolynomial {
        LaurentPolynomial::parse(s).unwrap()
    }

    #[test]
    fn canonical_format() {
        assert_eq!(p("x^2y^-3 - y^-1").to_string(), "x^2y^-3 - y^-1");
        assert_eq!(p("1+3y^-1").to_string(), "1 + 3y^-1");
        assert_eq!(p("-y^-1 + 2").to_string(), "2 - y^-1");
        assert_eq!(p("-y^-1").to_string(), "-y^-1");
        assert_eq!(p("-1").to_string(), "-1");
        assert_eq!(p("x - x").to_string(), "0");
        assert_eq!(p("0.5z^0.25").to_string(), "0.5z^0.25");
        assert_eq!(p("2.0x").to_string(), "2.0x");
    }

    #[test]
    fn terms() {
        assert_eq!(Term::new(-2, [("x", 2), ("y", -3)]).to_string(), "-2x^2y^-3");
        assert_eq!(Term::new(-1, [("y", 1)]).to_string(), "-y");
        assert_eq!(Term::constant(5).to_string(), "5");
        assert_eq!(Term::constant(-1).to_string(), "-1");
        assert_eq!(Term::zero().to_string(), "0");
    }

    #[test]
    fn presets() {
        let a = p("x^2y^-3 - 3y^-1 + 1");
        assert_eq!(a.printer(PrintOptions::compact()).to_string(), "1+x^2y^-3-3y^-1");
        assert_eq!(
            a.printer(PrintOptions::explicit()).to_string(),
            "1 + x**2*y**-3 - 3*y**-1"
        );

        for opts in [
            PrintOptions::new(),
            PrintOptions::compact(),
            PrintOptions::explicit(),
        ] {
            assert_eq!(p(&a.printer(opts).to_string()), a);
        }
    }
}
