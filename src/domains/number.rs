use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
    ops::{Add, Mul, Neg, Sub},
};

use crate::error::{Error, Result};

use super::integer::Integer;

/// A coefficient or exponent: an exact integer or a float.
///
/// Arithmetic between two integers stays exact; as soon as a float is involved
/// the result is a float. Equality, ordering and hashing are numeric, so
/// `Number::from(2) == Number::from(2.0)`.
#[derive(Clone, Debug)]
pub enum Number {
    Integer(Integer),
    Float(f64),
}

impl Number {
    #[inline]
    pub fn zero() -> Number {
        Number::Integer(Integer::Natural(0))
    }

    #[inline]
    pub fn one() -> Number {
        Number::Integer(Integer::Natural(1))
    }

    /// Parse a number token. Tokens containing a `.` are floats, all others integers.
    pub fn parse(s: &str) -> Option<Number> {
        if s.contains('.') {
            // reject forms such as `inf`, `1e5` or `.`: only digits around a single point
            let digits = s.trim_start_matches(['+', '-']);
            if digits.is_empty()
                || digits == "."
                || digits.matches('.').count() != 1
                || !digits.chars().all(|c| c.is_ascii_digit() || c == '.')
                || s.len() - digits.len() > 1
            {
                return None;
            }
            s.parse::<f64>().ok().map(Number::Float)
        } else {
            let digits = s.trim_start_matches(['+', '-']);
            if digits.is_empty()
                || s.len() - digits.len() > 1
                || !digits.chars().all(|c| c.is_ascii_digit())
            {
                return None;
            }
            Integer::parse(s).map(Number::Integer)
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        match self {
            Number::Integer(i) => i.is_zero(),
            Number::Float(f) => *f == 0.,
        }
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        match self {
            Number::Integer(i) => i.is_one(),
            Number::Float(f) => *f == 1.,
        }
    }

    #[inline]
    pub fn is_minus_one(&self) -> bool {
        match self {
            Number::Integer(i) => *i == Integer::Natural(-1),
            Number::Float(f) => *f == -1.,
        }
    }

    /// Returns `true` if the number is stored as an exact integer.
    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if the value is a whole number, regardless of representation.
    pub fn is_integral(&self) -> bool {
        match self {
            Number::Integer(_) => true,
            Number::Float(f) => f.is_finite() && f.fract() == 0.,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Number::Integer(i) => i.is_negative(),
            Number::Float(f) => *f < 0.,
        }
    }

    pub fn abs(&self) -> Number {
        match self {
            Number::Integer(i) => Number::Integer(i.abs()),
            Number::Float(f) => Number::Float(f.abs()),
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => i.to_f64(),
            Number::Float(f) => *f,
        }
    }

    /// The value as a machine integer, if it is integral and fits.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => i.to_i64(),
            Number::Float(f) => Integer::from_f64(*f).and_then(|i| i.to_i64()),
        }
    }

    /// Division rounded towards negative infinity. Integer operands give an
    /// integer; otherwise the result is the floored float quotient.
    pub fn floor_div(&self, rhs: &Number) -> Result<Number> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }

        Ok(match (self, rhs) {
            (Number::Integer(a), Number::Integer(b)) => {
                Number::Integer(a.floor_div(b).ok_or(Error::DivisionByZero)?)
            }
            _ => Number::Float((self.to_f64() / rhs.to_f64()).floor()),
        })
    }

    /// Raise to an arbitrary numeric power. An integer raised to a non-negative
    /// integer stays exact; every other combination is computed in floating point.
    pub fn pow(&self, exp: &Number) -> Number {
        match (self, exp) {
            (Number::Integer(b), Number::Integer(e)) if !e.is_negative() => {
                if let Some(e) = e.to_i64().and_then(|e| u32::try_from(e).ok()) {
                    return Number::Integer(b.pow(e));
                }

                // only trivial bases survive such large powers exactly
                if b.is_zero() || b.is_one() {
                    return self.clone();
                }
                if *b == Integer::Natural(-1) {
                    return if e.is_even() { Number::one() } else { self.clone() };
                }
                Number::Float(b.to_f64().powf(e.to_f64()))
            }
            _ => {
                let b = self.to_f64();
                match exp {
                    Number::Integer(e) => match e.to_i64().and_then(|e| i32::try_from(e).ok()) {
                        Some(e) => Number::Float(b.powi(e)),
                        None => Number::Float(b.powf(e.to_f64())),
                    },
                    Number::Float(e) => Number::Float(b.powf(*e)),
                }
            }
        }
    }

    /// Like [pow](Self::pow), but raising zero to a negative power is an error
    /// instead of an infinite float.
    pub fn checked_pow(&self, exp: &Number) -> Result<Number> {
        if self.is_zero() && exp.is_negative() {
            return Err(Error::DivisionByZero);
        }
        Ok(self.pow(exp))
    }

    #[inline]
    pub fn powi(&self, n: i64) -> Number {
        self.pow(&Number::from(n))
    }

    /// Returns `true` for odd whole numbers.
    pub fn is_odd(&self) -> bool {
        match self {
            Number::Integer(i) => !i.is_even(),
            Number::Float(f) => f.is_finite() && f.rem_euclid(2.) == 1.,
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::zero()
    }
}

impl From<Integer> for Number {
    #[inline]
    fn from(i: Integer) -> Self {
        Number::Integer(i)
    }
}

impl From<i64> for Number {
    #[inline]
    fn from(n: i64) -> Self {
        Number::Integer(Integer::Natural(n))
    }
}

impl From<i32> for Number {
    #[inline]
    fn from(n: i32) -> Self {
        Number::Integer(Integer::Natural(n as i64))
    }
}

impl From<f64> for Number {
    #[inline]
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Integer(i) => i.fmt(f),
            Number::Float(x) => {
                // keep the decimal point so that the value reads back as a float
                if x.is_finite() && x.fract() == 0. {
                    write!(f, "{}.0", x)
                } else {
                    write!(f, "{}", x)
                }
            }
        }
    }
}

impl PartialEq for Number {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    /// Numeric comparison; NaN is larger than all other values.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a.cmp(b),
            (Number::Integer(a), Number::Float(b)) => a.cmp_f64(*b),
            (Number::Float(a), Number::Integer(b)) => b.cmp_f64(*a).reverse(),
            (Number::Float(a), Number::Float(b)) => a
                .partial_cmp(b)
                .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan())),
        }
    }
}

fn hash_integer<H: Hasher>(i: &Integer, state: &mut H) {
    match i {
        Integer::Natural(n) => {
            0u8.hash(state);
            n.hash(state);
        }
        Integer::Large(r) => {
            1u8.hash(state);
            r.to_f64().to_bits().hash(state);
        }
    }
}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Number::Integer(i) => hash_integer(i, state),
            Number::Float(f) => {
                if let Some(i) = Integer::from_f64(*f) {
                    hash_integer(&i, state);
                } else if f.is_nan() {
                    2u8.hash(state);
                } else {
                    1u8.hash(state);
                    f.to_bits().hash(state);
                }
            }
        }
    }
}

impl<'a, 'b> Add<&'b Number> for &'a Number {
    type Output = Number;

    fn add(self, rhs: &'b Number) -> Number {
        match (self, rhs) {
            (Number::Integer(a), Number::Integer(b)) => Number::Integer(a + b),
            _ => Number::Float(self.to_f64() + rhs.to_f64()),
        }
    }
}

impl<'a, 'b> Sub<&'b Number> for &'a Number {
    type Output = Number;

    fn sub(self, rhs: &'b Number) -> Number {
        match (self, rhs) {
            (Number::Integer(a), Number::Integer(b)) => Number::Integer(a - b),
            _ => Number::Float(self.to_f64() - rhs.to_f64()),
        }
    }
}

impl<'a, 'b> Mul<&'b Number> for &'a Number {
    type Output = Number;

    fn mul(self, rhs: &'b Number) -> Number {
        match (self, rhs) {
            (Number::Integer(a), Number::Integer(b)) => Number::Integer(a * b),
            _ => Number::Float(self.to_f64() * rhs.to_f64()),
        }
    }
}

impl Add for Number {
    type Output = Number;

    #[inline]
    fn add(self, rhs: Number) -> Number {
        &self + &rhs
    }
}

impl Sub for Number {
    type Output = Number;

    #[inline]
    fn sub(self, rhs: Number) -> Number {
        &self - &rhs
    }
}

impl Mul for Number {
    type Output = Number;

    #[inline]
    fn mul(self, rhs: Number) -> Number {
        &self * &rhs
    }
}

impl<'a> Neg for &'a Number {
    type Output = Number;

    fn neg(self) -> Number {
        match self {
            Number::Integer(i) => Number::Integer(-i),
            Number::Float(f) => Number::Float(-f),
        }
    }
}

impl Neg for Number {
    type Output = Number;

    #[inline]
    fn neg(self) -> Number {
        -&self
    }
}
