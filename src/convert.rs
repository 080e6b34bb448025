//! The convert module holds the primitives that map between metal (the
//! human-facing unit) and scrap (the internal accounting unit), and that
//! split a fractional key count into a keys/metal pair.
//!
//! One refined metal is 9 scrap; one scrap is 11 weapons, so a weapon is
//! worth half a scrap on the 2-decimal metal lattice. Everything here runs
//! on [Decimal][rust_decimal::Decimal] so repeated conversions never
//! accumulate binary floating point error.

use crate::{
    currency::Currency,
    error::{Error, Result},
    num,
};
use rust_decimal::{prelude::*, RoundingStrategy};

/// Round a value to `dp` decimal places, half away from zero.
///
/// Used wherever a rate or intermediate scrap value needs stabilizing.
pub fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a metal value to scrap.
///
/// The integer metal part scales by 9 and the fractional remainder scales by
/// 100/11, rounded to the nearest half scrap (weapon granularity). Exact
/// left-inverse of [to_refined] for every value that function can produce.
pub fn to_scrap(value: Decimal) -> Decimal {
    let metal = value.trunc();
    let weapons = value - metal;
    (metal * num!(9)) + round_half_scrap((weapons * num!(100)) / num!(11))
}

/// Convert a scrap value back to metal.
///
/// The metal part is `value / 9` truncated toward zero, leaving a remainder
/// in (-9, 9) scrap. The remainder scales by 11/100 with a magnitude-aware
/// tie-break: remainders of at least 5 scrap round away from zero, smaller
/// ones toward zero. Keeps every result on the canonical weapon lattice.
pub fn to_refined(value: Decimal) -> Decimal {
    let metal = (value / num!(9)).trunc();
    let scrap = value - (metal * num!(9));
    let strategy = if scrap.abs() >= num!(5) {
        RoundingStrategy::MidpointAwayFromZero
    } else {
        RoundingStrategy::MidpointTowardZero
    };
    let weapons = (scrap * num!(11) / num!(100)).round_dp_with_strategy(2, strategy);
    (metal + weapons).normalize()
}

/// Canonicalize an arbitrary metal value by round-tripping it through the
/// scrap conversion. Idempotent.
pub fn fix_metal(value: Decimal) -> Decimal {
    to_refined(to_scrap(value))
}

/// Split a fractional key count into a whole-key/metal currency.
///
/// The integer part truncates toward zero; the remainder is priced in scrap
/// at the given rate and converted back to metal. Fails with
/// [Error::MissingConversion] when the remainder is non-zero and no usable
/// rate was supplied.
pub fn keys_to_currency(value: Decimal, conversion: Option<Decimal>) -> Result<Currency> {
    let keys = value.trunc();
    let metal_in_keys = value - keys;
    let keys = key_count(keys);
    if metal_in_keys.is_zero() {
        return Ok(Currency::new(keys, Decimal::zero()));
    }
    let conversion_in_scrap = conversion_to_scrap(conversion);
    if conversion_in_scrap.is_zero() {
        return Err(Error::MissingConversion);
    }
    let metal = to_refined(round(metal_in_keys * conversion_in_scrap, 0));
    Ok(Currency::new(keys, metal))
}

/// The scrap value of one key at the given rate, or zero when the rate is
/// missing. Non-positive rates count as missing, as does a rate so small
/// its scrap value rounds to zero.
pub(crate) fn conversion_to_scrap(conversion: Option<Decimal>) -> Decimal {
    conversion
        .filter(|rate| rate.is_sign_positive() && !rate.is_zero())
        .map(to_scrap)
        .unwrap_or_else(Decimal::zero)
}

/// Convert an integral decimal into a key count, saturating at the i64
/// boundary.
pub(crate) fn key_count(value: Decimal) -> i64 {
    value.to_i64().unwrap_or_else(|| {
        if value.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}

/// Round a scrap value to the nearest half scrap.
fn round_half_scrap(value: Decimal) -> Decimal {
    (value * num!(2)).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero) / num!(2)
}
