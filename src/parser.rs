//! Parser for the textual polynomial notation.
//!
//! The accepted grammar is a sequence of signed terms of the form
//! `[coefficient][variable[^exponent]]*`, for example `x+2y^3 -4y^-1 + z^(-3)y**5`.
//! Whitespace and brackets are ignored, an explicit `*` may precede a variable,
//! `**` is a synonym for `^`, every letter is a variable of its own, and numbers
//! containing a `.` are floats. Doubled signs such as `x+-y` are rejected.
//!
//! The input is first brought into an explicit form in which every term reads
//! `±coefficient*var^exponent*var^exponent...` and terms are separated by a space.
//! Each stage is a pure string transformation.

use smallvec::SmallVec;

use crate::domains::number::Number;
use crate::error::{Error, Result};
use crate::poly::term::Term;
use crate::poly::Degree;

#[inline]
fn is_sign(c: char) -> bool {
    c == '+' || c == '-'
}

#[inline]
fn is_number_start(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn normalize_exponentiation(s: &str) -> String {
    s.replace("**", "^")
}

/// Reject operators that the later stages would silently reinterpret: a `*`
/// that does not sit between a factor and a following variable, and two
/// adjacent signs. Must run after [normalize_exponentiation] and [strip_brackets].
fn check_operators(s: &str) -> Result<()> {
    let chars: Vec<char> = s.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        let prev = i.checked_sub(1).map(|j| chars[j]);
        let next = chars.get(i + 1).copied();

        if c == '*'
            && !(prev.is_some_and(|p| p.is_ascii_alphanumeric() || p == '.')
                && next.is_some_and(|n| n.is_ascii_alphabetic()))
        {
            return Err(Error::parse(s, "'*' must be followed by a variable"));
        }

        if is_sign(c) && next.is_some_and(is_sign) {
            return Err(Error::parse(s, "adjacent signs"));
        }
    }

    Ok(())
}

/// Remove explicit multiplication signs. Must run after [check_operators].
fn strip_multiplication(s: &str) -> String {
    s.replace('*', "")
}

fn strip_brackets(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '(' | ')' | '[' | ']' | '{' | '}'))
        .collect()
}

/// Prefix a `+` when the input starts with a variable or a number.
fn insert_leading_sign(s: &str) -> String {
    match s.chars().next() {
        Some(c) if c.is_alphanumeric() || c == '.' => format!("+{}", s),
        _ => s.to_owned(),
    }
}

/// Insert a coefficient `1` after a sign that does not start a number,
/// unless the sign belongs to an exponent.
fn insert_unit_coefficients(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        out.push(c);

        if is_sign(c)
            && (i == 0 || chars[i - 1] != '^')
            && chars.get(i + 1).is_some_and(|&n| !is_number_start(n))
        {
            out.push('1');
        }
    }

    out
}

/// Append `^1` to every variable that has no explicit exponent.
fn insert_unit_exponents(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        out.push(c);

        if c.is_ascii_alphabetic() && chars.get(i + 1) != Some(&'^') {
            out.push_str("^1");
        }
    }

    out
}

/// Separate terms with a space: a sign between a digit and the start of a
/// number begins a new term.
fn separate_terms(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if is_sign(c)
            && i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(|&n| is_number_start(n))
        {
            out.push(' ');
        }
        out.push(c);
    }

    out
}

/// Put a `*` in front of every variable.
fn insert_multiplication(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    for c in s.chars() {
        if c.is_ascii_alphabetic() {
            out.push('*');
        }
        out.push(c);
    }
    out
}

/// Rewrite the input into whitespace separated terms of the form
/// `±coefficient*var^exponent*...`.
pub fn normalize(input: &str) -> Result<String> {
    let s = strip_whitespace(input);
    let s = normalize_exponentiation(&s);
    let s = strip_brackets(&s);
    check_operators(&s)?;
    let s = strip_multiplication(&s);
    let s = insert_leading_sign(&s);
    let s = insert_unit_coefficients(&s);
    let s = insert_unit_exponents(&s);
    let s = separate_terms(&s);
    Ok(insert_multiplication(&s))
}

/// Parse one normalized term token, such as `-2*x^3*y^-1`.
fn parse_token(token: &str) -> Result<Term> {
    let mut parts = token.split(['*', '^']);

    let coeff = parts.next().unwrap_or_default();
    let coefficient = Number::parse(coeff)
        .ok_or_else(|| Error::parse(token, format!("invalid coefficient '{}'", coeff)))?;

    let mut degree: Degree = SmallVec::new();
    while let Some(var) = parts.next() {
        let mut chars = var.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {}
            _ => return Err(Error::parse(token, format!("invalid variable '{}'", var))),
        }

        let exp = parts
            .next()
            .ok_or_else(|| Error::parse(token, format!("missing exponent of '{}'", var)))?;
        let exponent = Number::parse(exp)
            .ok_or_else(|| Error::parse(token, format!("invalid exponent '{}'", exp)))?;

        degree.push((var.into(), exponent));
    }

    Ok(Term::from_parts(coefficient, degree))
}

/// Parse a polynomial into its raw list of terms. The terms are not combined.
pub fn parse_terms(input: &str) -> Result<Vec<Term>> {
    let normalized = normalize(input)?;
    if normalized.is_empty() {
        return Err(Error::parse(input, "empty input"));
    }

    normalized.split_whitespace().map(parse_token).collect()
}

/// Parse a single term, such as `-2x^3y^-1`.
pub fn parse_term(input: &str) -> Result<Term> {
    let normalized = normalize(input)?;

    let mut tokens = normalized.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(t), None) => parse_token(t),
        (None, _) => Err(Error::parse(input, "empty input")),
        (Some(_), Some(_)) => Err(Error::parse(input, "expected a single term")),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stages() {
        assert_eq!(strip_whitespace(" x +\t2 y "), "x+2y");
        assert_eq!(normalize_exponentiation("z**5y**-1"), "z^5y^-1");
        assert_eq!(strip_multiplication("2*x*y^3"), "2xy^3");
        assert_eq!(strip_brackets("z^(-3)[x]{y}"), "z^-3xy");
        assert!(check_operators("2*x^2*y^-3-.5*z").is_ok());
        assert!(check_operators("x*2").is_err());
        assert!(check_operators("2*-x").is_err());
        assert!(check_operators("x+-y").is_err());
        assert_eq!(insert_leading_sign("x+1"), "+x+1");
        assert_eq!(insert_leading_sign("3x"), "+3x");
        assert_eq!(insert_leading_sign("-x"), "-x");
        assert_eq!(insert_unit_coefficients("+x-y^-1+2z"), "+1x-1y^-1+2z");
        assert_eq!(insert_unit_coefficients("-.5x"), "-.5x");
        assert_eq!(insert_unit_exponents("+1xy^-1"), "+1x^1y^-1");
        assert_eq!(separate_terms("+1x^2y^-3-1y^-1"), "+1x^2y^-3 -1y^-1");
        assert_eq!(separate_terms("+2x^1.5-.5"), "+2x^1.5 -.5");
        assert_eq!(insert_multiplication("+1x^2y^-3"), "+1*x^2*y^-3");
    }

    #[test]
    fn normalized_form() {
        assert_eq!(
            normalize("x+2y^3 -4y^-1 + z^(-3)y**5").unwrap(),
            "+1*x^1 +2*y^3 -4*y^-1 +1*z^-3*y^5"
        );
        assert_eq!(normalize("x^2y^-3 - y^-1").unwrap(), "+1*x^2*y^-3 -1*y^-1");
        assert_eq!(normalize("2*x*y").unwrap(), "+2*x^1*y^1");
        assert_eq!(normalize("(2)*x").unwrap(), "+2*x^1");
    }

    #[test]
    fn terms() {
        let t = parse_terms("x+2y^3 -4y^-1 + z^(-3)y**5").unwrap();
        assert_eq!(t.len(), 4);
        assert_eq!(t[0], Term::new(1, [("x", 1)]));
        assert_eq!(t[1], Term::new(2, [("y", 3)]));
        assert_eq!(t[2], Term::new(-4, [("y", -1)]));
        assert_eq!(t[3], Term::new(1, [("y", 5), ("z", -3)]));
    }

    #[test]
    fn single_term() {
        assert_eq!(
            parse_term("-2x^3y^-1").unwrap(),
            Term::new(-2, [("x", 3), ("y", -1)])
        );
        assert_eq!(parse_term("7").unwrap(), Term::constant(7));
        assert_eq!(parse_term("xx").unwrap(), Term::new(1, [("x", 2)]));
        assert!(matches!(parse_term("x + y"), Err(Error::Parse { .. })));
    }

    #[test]
    fn floats() {
        let t = parse_term("0.5z^0.25").unwrap();
        assert!(!t.coefficient().is_integer());
        assert_eq!(t.exponent("z"), Number::from(0.25));

        let t = parse_term("-.5x").unwrap();
        assert_eq!(t.coefficient(), &Number::from(-0.5));

        let t = parse_term("3.0").unwrap();
        assert!(matches!(t.coefficient(), Number::Float(_)));
    }

    #[test]
    fn errors() {
        for input in [
            "", "   ", "x^", "x^y", "2x^a", "x+", "3é", "1.2.3x", "x^--1", "()", "x*2", "2*-x",
            "*x", "x*", "x^*y", "2**", "x+-y", "x - -y",
        ] {
            assert!(
                matches!(parse_terms(input), Err(Error::Parse { .. })),
                "input '{}' should be rejected",
                input
            );
        }
    }
}
