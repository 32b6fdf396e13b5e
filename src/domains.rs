//! Numeric domains used for coefficients and exponents.
//!
//! Coefficients and exponents of a Laurent polynomial are both a [Number](number::Number),
//! which is either an exact [Integer](integer::Integer) or a floating-point value.
//! Integers never overflow: they are stored in a machine word when possible and in
//! arbitrary precision otherwise. Mixing an integer with a float always yields a float.
pub mod integer;
pub mod number;
