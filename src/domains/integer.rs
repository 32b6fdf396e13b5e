use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    ops::{Add, Mul, Neg, Sub},
};

use rug::{ops::Pow, Complete, Integer as MultiPrecisionInteger};

/// An integer that is stored in a machine word when possible and
/// in arbitrary precision otherwise. Every operation demotes the result
/// back to [`Integer::Natural`] when it fits.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Integer {
    Natural(i64),
    Large(MultiPrecisionInteger),
}

impl Integer {
    pub fn new(num: i64) -> Integer {
        Integer::Natural(num)
    }

    /// Parse a decimal integer with an optional sign.
    pub fn parse(s: &str) -> Option<Integer> {
        if let Ok(n) = s.parse::<i64>() {
            return Some(Integer::Natural(n));
        }

        MultiPrecisionInteger::parse(s)
            .ok()
            .map(|r| Integer::from(r.complete()))
    }

    /// Convert an integral float. Returns `None` for fractional or non-finite values.
    pub fn from_f64(f: f64) -> Option<Integer> {
        if !f.is_finite() || f.fract() != 0. {
            return None;
        }

        if f >= i64::MIN as f64 && f < i64::MAX as f64 {
            Some(Integer::Natural(f as i64))
        } else {
            MultiPrecisionInteger::from_f64(f).map(Integer::from)
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        match self {
            Integer::Natural(n) => *n == 0,
            Integer::Large(_) => false,
        }
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        match self {
            Integer::Natural(n) => *n == 1,
            Integer::Large(_) => false,
        }
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        match self {
            Integer::Natural(n) => *n < 0,
            Integer::Large(r) => r.cmp0() == Ordering::Less,
        }
    }

    pub fn abs(&self) -> Integer {
        match self {
            Integer::Natural(n) => {
                if let Some(a) = n.checked_abs() {
                    Integer::Natural(a)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*n).abs())
                }
            }
            Integer::Large(r) => Integer::from(r.clone().abs()),
        }
    }

    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Integer::Natural(n) => Some(*n),
            Integer::Large(r) => r.to_i64(),
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Integer::Natural(n) => *n as f64,
            Integer::Large(r) => r.to_f64(),
        }
    }

    pub fn to_multi_prec(&self) -> MultiPrecisionInteger {
        match self {
            Integer::Natural(n) => MultiPrecisionInteger::from(*n),
            Integer::Large(r) => r.clone(),
        }
    }

    pub fn pow(&self, e: u32) -> Integer {
        match self {
            Integer::Natural(n) => {
                if let Some(pn) = n.checked_pow(e) {
                    Integer::Natural(pn)
                } else {
                    Integer::from(MultiPrecisionInteger::from(*n).pow(e))
                }
            }
            Integer::Large(r) => Integer::from(r.pow(e).complete()),
        }
    }

    pub fn is_even(&self) -> bool {
        match self {
            Integer::Natural(n) => n % 2 == 0,
            Integer::Large(r) => r.is_even(),
        }
    }

    /// Division rounded towards negative infinity. Returns `None` for a zero divisor.
    pub fn floor_div(&self, rhs: &Integer) -> Option<Integer> {
        if rhs.is_zero() {
            return None;
        }

        if let (Integer::Natural(a), Integer::Natural(b)) = (self, rhs) {
            if let Some(q) = a.checked_div(*b) {
                return Some(if a % b != 0 && ((*a < 0) != (*b < 0)) {
                    Integer::Natural(q - 1)
                } else {
                    Integer::Natural(q)
                });
            }
        }

        let (q, _) = self.to_multi_prec().div_rem_floor(rhs.to_multi_prec());
        Some(Integer::from(q))
    }

    /// Compare with a float exactly, without rounding `self`.
    /// NaN is considered larger than every integer.
    pub fn cmp_f64(&self, f: f64) -> Ordering {
        if f.is_nan() || f == f64::INFINITY {
            return Ordering::Less;
        }
        if f == f64::NEG_INFINITY {
            return Ordering::Greater;
        }

        let floor = f.floor();
        // the conversion is exact as `floor` is integral and finite
        let Some(fl) = Integer::from_f64(floor) else {
            return Ordering::Less;
        };

        match self.cmp(&fl) {
            Ordering::Equal if floor != f => Ordering::Less,
            o => o,
        }
    }
}

impl From<i64> for Integer {
    #[inline]
    fn from(n: i64) -> Self {
        Integer::Natural(n)
    }
}

impl From<i32> for Integer {
    #[inline]
    fn from(n: i32) -> Self {
        Integer::Natural(n as i64)
    }
}

impl From<MultiPrecisionInteger> for Integer {
    #[inline]
    fn from(r: MultiPrecisionInteger) -> Self {
        if let Some(n) = r.to_i64() {
            Integer::Natural(n)
        } else {
            Integer::Large(r)
        }
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Integer::Natural(n) => n.fmt(f),
            Integer::Large(r) => r.fmt(f),
        }
    }
}

impl PartialOrd for Integer {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Integer::Natural(n1), Integer::Natural(n2)) => n1.cmp(n2),
            (Integer::Natural(n1), Integer::Large(r2)) => {
                MultiPrecisionInteger::from(*n1).cmp(r2)
            }
            (Integer::Large(r1), Integer::Natural(n2)) => {
                r1.cmp(&MultiPrecisionInteger::from(*n2))
            }
            (Integer::Large(r1), Integer::Large(r2)) => r1.cmp(r2),
        }
    }
}

impl<'a, 'b> Add<&'b Integer> for &'a Integer {
    type Output = Integer;

    fn add(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                if let Some(num) = n1.checked_add(*n2) {
                    Integer::Natural(num)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*n1) + *n2)
                }
            }
            (Integer::Natural(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Natural(n1)) => Integer::from((r2 + *n1).complete()),
            (Integer::Large(r1), Integer::Large(r2)) => Integer::from((r1 + r2).complete()),
        }
    }
}

impl<'a, 'b> Sub<&'b Integer> for &'a Integer {
    type Output = Integer;

    fn sub(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                if let Some(num) = n1.checked_sub(*n2) {
                    Integer::Natural(num)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*n1) - *n2)
                }
            }
            (Integer::Natural(n1), Integer::Large(r2)) => Integer::from((*n1 - r2).complete()),
            (Integer::Large(r1), Integer::Natural(n2)) => Integer::from((r1 - *n2).complete()),
            (Integer::Large(r1), Integer::Large(r2)) => Integer::from((r1 - r2).complete()),
        }
    }
}

impl<'a, 'b> Mul<&'b Integer> for &'a Integer {
    type Output = Integer;

    fn mul(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                if let Some(num) = n1.checked_mul(*n2) {
                    Integer::Natural(num)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*n1) * *n2)
                }
            }
            (Integer::Natural(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Natural(n1)) => Integer::from((r2 * *n1).complete()),
            (Integer::Large(r1), Integer::Large(r2)) => Integer::from((r1 * r2).complete()),
        }
    }
}

impl<'a> Neg for &'a Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        match self {
            Integer::Natural(n) => {
                if let Some(neg) = n.checked_neg() {
                    Integer::Natural(neg)
                } else {
                    Integer::Large(-MultiPrecisionInteger::from(*n))
                }
            }
            Integer::Large(r) => Integer::from(-r.clone()),
        }
    }
}

impl Neg for Integer {
    type Output = Integer;

    #[inline]
    fn neg(self) -> Integer {
        -&self
    }
}
