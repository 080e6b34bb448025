//! The currency module holds the [Currency] value type, a keys/metal pair
//! with exact in-place arithmetic on the scrap lattice.
//!
//! Keys and metal never merge implicitly. Operations that have to price one
//! denomination in the other take a per-call conversion rate (metal per
//! key); the rate is never stored on the value.

use crate::{
    compare, convert,
    error::{Error, Result},
};
use derive_builder::Builder;
use getset::CopyGetters;
use rust_decimal::prelude::*;
use std::cmp::Ordering;
use std::fmt;

/// A currency amount: whole keys plus refined metal.
///
/// The metal field is kept canonical at all times: it always equals the
/// result of round-tripping its scrap value through
/// [to_refined][convert::to_refined], so two amounts holding the same weapon
/// count compare and serialize identically. Either field may be negative
/// (subtraction produces negative amounts naturally); only
/// [remove_scrap][Currency::remove_scrap] borrowing and
/// [remove_currency][Currency::remove_currency] enforce non-negativity.
#[derive(Clone, Debug, Default, PartialEq, Eq, CopyGetters, Builder)]
#[builder(pattern = "owned", setter(into), build_fn(skip))]
#[cfg_attr(
    feature = "with_serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize),
    serde(from = "CurrencyData")
)]
#[getset(get_copy = "pub")]
pub struct Currency {
    /// The number of keys. May be negative.
    keys: i64,
    /// The amount of refined metal, canonicalized to the weapon lattice.
    /// May be negative.
    metal: Decimal,
}

impl CurrencyBuilder {
    /// Build the currency. Unset fields default to zero; metal is
    /// canonicalized on the way in.
    pub fn build(self) -> Currency {
        Currency::new(
            self.keys.unwrap_or_default(),
            self.metal.unwrap_or_else(Decimal::zero),
        )
    }
}

impl Currency {
    /// Create a new currency amount. The metal value is canonicalized.
    pub fn new(keys: i64, metal: Decimal) -> Self {
        Self {
            keys,
            metal: convert::fix_metal(metal),
        }
    }

    pub fn builder() -> CurrencyBuilder {
        CurrencyBuilder::default()
    }

    /// Derive a currency from a raw scrap total.
    ///
    /// With a usable rate, whole keys are split off first (truncating toward
    /// zero, so the metal remainder keeps the sign of the input); without
    /// one the whole amount lands in metal.
    pub fn from_scrap(scrap: Decimal, conversion: Option<Decimal>) -> Self {
        let conversion_in_scrap = convert::conversion_to_scrap(conversion);
        let keys = if conversion_in_scrap.is_zero() {
            Decimal::zero()
        } else {
            (scrap / conversion_in_scrap).trunc()
        };
        let metal_in_scrap = scrap - (keys * conversion_in_scrap);
        Self::new(convert::key_count(keys), convert::to_refined(metal_in_scrap))
    }

    /// Derive a currency from a fractional key count, pricing the fraction
    /// in metal at the given rate.
    pub fn from_keys(value: Decimal, conversion: Option<Decimal>) -> Result<Self> {
        convert::keys_to_currency(value, conversion)
    }

    /// Test if we have an empty amount.
    pub fn is_empty(&self) -> bool {
        self.keys == 0 && self.metal.is_zero()
    }

    /// The total value expressed in scrap.
    ///
    /// Keys cannot be priced without a rate, so this fails with
    /// [Error::MissingConversion] when keys are present and no usable rate
    /// is given.
    pub fn to_scrap(&self, conversion: Option<Decimal>) -> Result<Decimal> {
        let conversion_in_scrap = convert::conversion_to_scrap(conversion);
        if self.keys != 0 && conversion_in_scrap.is_zero() {
            return Err(Error::MissingConversion);
        }
        let keys_in_scrap = Decimal::from(self.keys) * conversion_in_scrap;
        Ok(keys_in_scrap + convert::to_scrap(self.metal))
    }

    /// The total value expressed in fractional keys, rounded to two
    /// decimals.
    ///
    /// Fails with [Error::MissingConversion] when metal is present and no
    /// usable rate is given.
    pub fn to_keys(&self, conversion: Option<Decimal>) -> Result<Decimal> {
        let conversion_in_scrap = convert::conversion_to_scrap(conversion);
        if conversion_in_scrap.is_zero() {
            if !self.metal.is_zero() {
                return Err(Error::MissingConversion);
            }
            return Ok(Decimal::from(self.keys));
        }
        let metal_in_keys = convert::round(
            convert::to_scrap(self.metal) / conversion_in_scrap,
            2,
        );
        Ok(Decimal::from(self.keys) + metal_in_keys)
    }

    /// Add a scrap amount to the metal side of this currency.
    ///
    /// With a usable rate, every whole key's worth of the resulting scrap
    /// total carries into keys (truncating toward zero, so negative totals
    /// carry negatively). Without a rate the scrap accumulates purely in
    /// metal, which may then hold more than a key's worth.
    pub fn add_scrap(&mut self, value: Decimal, conversion: Option<Decimal>) {
        let mut total = convert::to_scrap(self.metal) + value;
        let conversion_in_scrap = convert::conversion_to_scrap(conversion);
        if !conversion_in_scrap.is_zero() {
            let carry = (total / conversion_in_scrap).trunc();
            if !carry.is_zero() {
                self.keys += convert::key_count(carry);
                total -= carry * conversion_in_scrap;
            }
        }
        self.metal = convert::to_refined(total);
    }

    /// Add a metal amount. Equivalent to adding its scrap value.
    pub fn add_metal(&mut self, value: Decimal, conversion: Option<Decimal>) {
        self.add_scrap(convert::to_scrap(value), conversion)
    }

    /// Add a fractional key amount. The fraction is priced in metal at the
    /// given rate, so a non-whole `value` without a usable rate fails with
    /// [Error::MissingConversion].
    pub fn add_keys(&mut self, value: Decimal, conversion: Option<Decimal>) -> Result<()> {
        let amount = convert::keys_to_currency(value, conversion)?;
        self.add_currency(&amount, conversion);
        Ok(())
    }

    /// Add another currency amount: its metal first (carrying into keys if
    /// a rate is given), then its keys directly.
    pub fn add_currency(&mut self, currency: &Currency, conversion: Option<Decimal>) {
        self.add_metal(currency.metal(), conversion);
        self.keys += currency.keys();
    }

    /// Remove a scrap amount from the metal side of this currency.
    ///
    /// When the removal overdraws the metal, keys are borrowed to cover the
    /// deficit: exactly as many as needed, each worth one key's scrap value
    /// at the given rate. Fails with [Error::MissingConversion] when
    /// overdrawn without a usable rate, and with [Error::InsufficientKeys]
    /// when fewer keys are held than the borrow requires. A failed removal
    /// leaves the value unchanged.
    pub fn remove_scrap(&mut self, value: Decimal, conversion: Option<Decimal>) -> Result<()> {
        let mut remainder = convert::to_scrap(self.metal) - value;
        if remainder < Decimal::zero() {
            let conversion_in_scrap = convert::conversion_to_scrap(conversion);
            if conversion_in_scrap.is_zero() {
                return Err(Error::MissingConversion);
            }
            let borrowed = (-remainder / conversion_in_scrap).ceil();
            let borrowed_keys = convert::key_count(borrowed);
            if self.keys < borrowed_keys {
                return Err(Error::InsufficientKeys);
            }
            self.keys -= borrowed_keys;
            remainder += borrowed * conversion_in_scrap;
        }
        self.metal = convert::to_refined(remainder);
        Ok(())
    }

    /// Remove a metal amount. No borrowing happens here: the metal side
    /// simply goes negative if overdrawn.
    pub fn remove_metal(&mut self, value: Decimal, conversion: Option<Decimal>) {
        self.add_metal(-value, conversion)
    }

    /// Remove a fractional key amount.
    pub fn remove_keys(&mut self, value: Decimal, conversion: Option<Decimal>) -> Result<()> {
        self.add_keys(-value, conversion)
    }

    /// Remove another currency amount. Fails with
    /// [Error::InsufficientKeys] when the removal would drive the key count
    /// negative, leaving the value unchanged.
    pub fn remove_currency(&mut self, currency: &Currency, conversion: Option<Decimal>) -> Result<()> {
        if self.keys < currency.keys() {
            return Err(Error::InsufficientKeys);
        }
        self.add_metal(-currency.metal(), conversion);
        self.keys -= currency.keys();
        Ok(())
    }
}

impl PartialOrd for Currency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Currency {
    fn cmp(&self, other: &Self) -> Ordering {
        compare::cmp(self, other)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "0 keys, 0 metal");
        }
        let mut wrote_keys = false;
        if self.keys != 0 {
            let unit = if self.keys.abs() == 1 { "key" } else { "keys" };
            write!(f, "{} {}", self.keys, unit)?;
            wrote_keys = true;
        }
        if !self.metal.is_zero() {
            if wrote_keys {
                write!(f, ", ")?;
            }
            write!(f, "{} metal", self.metal)?;
        }
        Ok(())
    }
}

/// Raw keys/metal input, straight off the wire. Missing fields default to
/// zero and the metal value is canonicalized when converted into a
/// [Currency].
#[cfg(feature = "with_serde")]
#[derive(serde_derive::Deserialize)]
struct CurrencyData {
    #[serde(default)]
    keys: i64,
    #[serde(default)]
    metal: Decimal,
}

#[cfg(feature = "with_serde")]
impl From<CurrencyData> for Currency {
    fn from(data: CurrencyData) -> Self {
        Currency::new(data.keys, data.metal)
    }
}
