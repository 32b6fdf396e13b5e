pub mod evaluate;
pub mod polynomial;
pub mod term;

use smallvec::SmallVec;
use smartstring::{LazyCompact, SmartString};

use crate::domains::number::Number;

/// Number of variables in a term that are stored inline.
pub const INLINED_EXPONENTS: usize = 6;

/// A variable symbol. Variables compare by exact name and order lexicographically.
pub type Variable = SmartString<LazyCompact>;

/// The exponent map of a term: `(variable, exponent)` pairs.
///
/// In canonical form the list is sorted by variable, every variable occurs
/// once and no exponent is zero.
pub type Degree = SmallVec<[(Variable, Number); INLINED_EXPONENTS]>;

/// Bring an exponent map into canonical form: sort by variable,
/// merge repeated variables by adding their exponents and drop zero exponents.
pub(crate) fn normalize_degree(degree: &mut Degree) {
    if degree.len() > 1 {
        degree.sort_by(|a, b| a.0.cmp(&b.0));

        let mut merged: Degree = SmallVec::with_capacity(degree.len());
        for (v, e) in degree.drain(..) {
            match merged.last_mut() {
                Some((lv, le)) if *lv == v => *le = &*le + &e,
                _ => merged.push((v, e)),
            }
        }
        *degree = merged;
    }

    degree.retain(|(_, e)| !e.is_zero());
}

/// Look up the exponent of `var` in a canonical exponent map.
/// Variables that do not appear have exponent 0.
pub(crate) fn exponent_of(degree: &[(Variable, Number)], var: &str) -> Number {
    degree
        .binary_search_by(|(v, _)| v.as_str().cmp(var))
        .map(|i| degree[i].1.clone())
        .unwrap_or_else(|_| Number::zero())
}
