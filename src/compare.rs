//! The compare module holds the total-order predicates over two currency
//! values.
//!
//! Ordering is lexicographic: keys dominate, metal breaks ties. A key is
//! always worth more than any amount of metal under any realistic rate, so
//! no conversion rate is consulted. Both sides are expected to be in
//! canonical form (which [Currency][crate::Currency] guarantees).

use crate::currency::Currency;
use std::cmp::Ordering;

/// Order two currencies: keys first, metal as the tiebreaker.
pub fn cmp(a: &Currency, b: &Currency) -> Ordering {
    a.keys()
        .cmp(&b.keys())
        .then_with(|| a.metal().cmp(&b.metal()))
}

/// Both denominations are identical.
pub fn is_equal(a: &Currency, b: &Currency) -> bool {
    cmp(a, b) == Ordering::Equal
}

pub fn is_bigger(a: &Currency, b: &Currency) -> bool {
    cmp(a, b) == Ordering::Greater
}

pub fn is_smaller(a: &Currency, b: &Currency) -> bool {
    cmp(a, b) == Ordering::Less
}

pub fn is_bigger_or_equal(a: &Currency, b: &Currency) -> bool {
    cmp(a, b) != Ordering::Less
}

pub fn is_smaller_or_equal(a: &Currency, b: &Currency) -> bool {
    cmp(a, b) != Ordering::Greater
}
