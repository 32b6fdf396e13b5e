use std::collections::hash_map::Entry;

use ahash::HashMap;
use smallvec::SmallVec;

use crate::{
    domains::number::Number,
    poly::{polynomial::LaurentPolynomial, term::Term, Degree},
    printer::PrintOptions,
};

impl LaurentPolynomial {
    /// Group the terms by their exponents in `vars`. The key is returned as a
    /// term with coefficient one, the coefficient as the polynomial in the other
    /// variables. Groups appear in the order in which their first term occurs.
    fn group_by_variables(&self, vars: &[&str]) -> Vec<(Term, LaurentPolynomial)> {
        let mut index: HashMap<Degree, usize> = HashMap::default();
        let mut groups: Vec<(Term, Vec<Term>)> = vec![];

        for t in self {
            let mut key: Degree = SmallVec::new();
            let mut rest: Degree = SmallVec::new();
            for (v, e) in t.degree() {
                if vars.contains(&v.as_str()) {
                    key.push((v.clone(), e.clone()));
                } else {
                    rest.push((v.clone(), e.clone()));
                }
            }

            let coeff = Term::from_parts(t.coefficient().clone(), rest);
            match index.entry(key) {
                Entry::Occupied(e) => groups[*e.get()].1.push(coeff),
                Entry::Vacant(e) => {
                    let monomial = Term::from_parts(Number::one(), e.key().clone());
                    e.insert(groups.len());
                    groups.push((monomial, vec![coeff]));
                }
            }
        }

        groups
            .into_iter()
            .map(|(m, c)| (m, LaurentPolynomial::from_terms(c)))
            .collect()
    }

    /// Collect the polynomial in `vars`, e.g.
    ///
    /// ```math
    /// coefficient_list(A + 2Ax + 2x - xy, [x, y]) = [(1, A), (x, 2 + 2A), (xy, -1)]
    /// ```
    ///
    /// Every entry is a monomial in `vars` and its coefficient, a polynomial in the
    /// remaining variables.
    pub fn coefficient_list(&self, vars: &[&str]) -> Vec<(LaurentPolynomial, LaurentPolynomial)> {
        self.group_by_variables(vars)
            .into_iter()
            .map(|(m, c)| (LaurentPolynomial::from(m), c))
            .collect()
    }

    /// Write the polynomial collected in `vars`, e.g. `A + (2 + 2A)x - xy`.
    /// The output is meant for display and does not parse back into the same polynomial.
    pub fn collect(&self, vars: &[&str]) -> String {
        self.collect_with_options(vars, PrintOptions::new())
    }

    pub fn collect_with_options(&self, vars: &[&str], opts: PrintOptions) -> String {
        if self.is_zero() {
            return "0".to_owned();
        }

        // (negative, body without sign)
        let mut pieces: Vec<(bool, String)> = vec![];
        for (monomial, coeff) in self.group_by_variables(vars) {
            if monomial.is_constant() || coeff.is_monomial() {
                for t in &coeff {
                    let t = t * &monomial;
                    let body = t.abs().printer(opts).to_string();
                    pieces.push((t.coefficient().is_negative(), body));
                }
            } else {
                let op = opts.multiplication_operator.map(String::from).unwrap_or_default();
                let body = format!("({}){}{}", coeff.printer(opts), op, monomial.printer(opts));
                pieces.push((false, body));
            }
        }

        let mut out = String::new();
        for (i, (negative, body)) in pieces.into_iter().enumerate() {
            if i == 0 {
                if negative {
                    out.push('-');
                }
            } else {
                out.push_str(match (negative, opts.spaces_around_operators) {
                    (true, true) => " - ",
                    (true, false) => "-",
                    (false, true) => " + ",
                    (false, false) => "+",
                });
            }
            out.push_str(&body);
        }

        out
    }
}

#[cfg(test)]
mod test {
    use crate::poly::polynomial::LaurentPolynomial;
    use crate::printer::PrintOptions;

    fn p(s: &str) -> LaurentPolynomial {
        LaurentPolynomial::parse(s).unwrap()
    }

    #[test]
    fn collect_in_two_variables() {
        let a = p("A^3x^2y - 2y^-1 +2x +2A x + 5A^1x^2y - yx +A");
        assert_eq!(a.to_string(), "A + 2Ax + 5Ax^2y + A^3x^2y + 2x - xy - 2y^-1");
        assert_eq!(
            a.collect(&["x", "y"]),
            "A + (2 + 2A)x + (5A + A^3)x^2y - xy - 2y^-1"
        );
        assert_eq!(
            a.collect_with_options(&["x", "y"], PrintOptions::explicit()),
            "A + (2 + 2*A)*x + (5*A + A**3)*x**2*y - x*y - 2*y**-1"
        );
    }

    #[test]
    fn coefficient_list() {
        let a = p("A + 2Ax + 2x - xy");
        let l = a.coefficient_list(&["x", "y"]);

        assert_eq!(l.len(), 3);
        assert_eq!(l[0], (p("1"), p("A")));
        assert_eq!(l[1], (p("x"), p("2 + 2A")));
        assert_eq!(l[2], (p("xy"), p("-1")));

        // the groups recombine into the original polynomial
        let sum = l
            .iter()
            .fold(LaurentPolynomial::zero(), |acc, (m, c)| acc + &(m * c));
        assert_eq!(sum, a);
    }

    #[test]
    fn collect_edge_cases() {
        assert_eq!(LaurentPolynomial::zero().collect(&["x"]), "0");
        assert_eq!(p("-y + y^2").collect(&["x"]), "-y + y^2");
        assert_eq!(p("-x - xy").collect(&["x"]), "(-1 - y)x");
        assert_eq!(p("x + y").collect(&[]), "x + y");
    }
}
