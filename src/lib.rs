//! Laurent is a small symbolic engine for multivariate Laurent polynomials:
//! polynomials whose exponents may be negative or fractional, with exact integer
//! or floating-point coefficients.
//!
//! It can parse polynomials from text, keep them in a unique canonical form under
//! addition, subtraction, multiplication, powers and a bounded pseudo-division,
//! evaluate them under partial substitution and collect them in a set of variables.
//!
//! For example:
//!
//! ```
//! use laurent::LaurentPolynomial;
//!
//! let p = LaurentPolynomial::parse("x^2y^-3 - y^-1").unwrap();
//! let q = LaurentPolynomial::parse("1+3y^-1").unwrap();
//!
//! assert_eq!((&p + &q).to_string(), "1 + x^2y^-3 + 2y^-1");
//! assert_eq!(p.pow(2).to_string(), "-2x^2y^-4 + x^4y^-6 + y^-2");
//!
//! let v = p.evaluate([("x", 3), ("y", 4)]).unwrap();
//! assert_eq!(v.to_string(), "-0.109375");
//! ```

pub mod collect;
pub mod domains;
pub mod error;
pub mod operand;
pub mod parser;
pub mod poly;
pub mod printer;

pub use domains::{integer::Integer, number::Number};
pub use error::{Error, Result};
pub use operand::{BinaryOperator, Operand, UnaryOperator};
pub use poly::{polynomial::LaurentPolynomial, term::Term, Variable};
pub use printer::PrintOptions;
