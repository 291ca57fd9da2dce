//! Type-safe price representation using decimal arithmetic.
//!
//! The storefront sells in a single currency, so a [`Price`] is just an exact
//! decimal amount in the currency's standard unit. Arithmetic never goes
//! through floating point, which keeps repeated cart recalculation free of
//! rounding drift.
//!
//! On the wire a price is a plain JSON number (`89999`, `8999.9`), matching
//! the catalog API and the persisted cart snapshot. Whole amounts are written
//! as integers and are exact. Fractional amounts pass through `f64`, so they
//! round-trip exactly only up to about 15 significant digits; two-decimal
//! amounts below a billion are well inside that.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Currency symbol used when formatting prices for display.
pub const CURRENCY_SYMBOL: &str = "৳";

/// A monetary amount.
///
/// Negative amounts are allowed: a flat discount that outlives the items it
/// was computed for drives the cart total below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_major(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// This price multiplied by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// The given percentage of this price (e.g. `percent(10)` is 10%).
    #[must_use]
    pub fn percent(self, pct: u32) -> Self {
        Self(self.0 * Decimal::from(pct) / Decimal::ONE_HUNDRED)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    /// Formats as `৳179,998`, or `৳1,234.50` when there is a fractional part.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.0.abs().round_dp(2);
        let text = if rounded.fract().is_zero() {
            rounded.trunc().to_string()
        } else {
            format!("{rounded:.2}")
        };
        let (whole, fraction) = text
            .split_once('.')
            .map_or((text.as_str(), None), |(w, frac)| (w, Some(frac)));

        if self.0.is_sign_negative() && !rounded.is_zero() {
            f.write_str("-")?;
        }
        write!(f, "{CURRENCY_SYMBOL}{}", group_thousands(whole))?;
        if let Some(fraction) = fraction {
            write!(f, ".{fraction}")?;
        }
        Ok(())
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Whole amounts go out as integers so snapshots read `179998`, not `179998.0`
        if self.0.fract().is_zero()
            && let Some(units) = self.0.to_i64()
        {
            return serializer.serialize_i64(units);
        }
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Self)
    }
}

/// Insert `,` separators every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_whole_amount() {
        assert_eq!(Price::from_major(179_998).to_string(), "৳179,998");
        assert_eq!(Price::from_major(100).to_string(), "৳100");
        assert_eq!(Price::ZERO.to_string(), "৳0");
    }

    #[test]
    fn test_display_fractional_amount() {
        let price = Price::new(Decimal::new(123_450, 2));
        assert_eq!(price.to_string(), "৳1,234.50");
    }

    #[test]
    fn test_display_negative_amount() {
        assert_eq!(Price::from_major(-30).to_string(), "-৳30");
        assert_eq!(Price::from_major(-1_500).to_string(), "-৳1,500");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_arithmetic_is_exact() {
        let unit = Price::new(Decimal::new(1, 1)); // 0.1
        let total: Price = std::iter::repeat_n(unit, 10).sum();
        assert_eq!(total, Price::from_major(1));
        assert_eq!(unit.times(3), Price::new(Decimal::new(3, 1)));
    }

    #[test]
    fn test_percent() {
        assert_eq!(Price::from_major(300).percent(10), Price::from_major(30));
        assert_eq!(
            Price::from_major(89_999).percent(10),
            Price::new(Decimal::new(89_999, 1))
        );
    }

    #[test]
    fn test_subtraction_can_go_negative() {
        let total = Price::ZERO - Price::from_major(30);
        assert!(total < Price::ZERO);
        assert_eq!(total, Price::from_major(-30));
    }

    #[test]
    fn test_serializes_as_json_number() {
        assert_eq!(
            serde_json::to_string(&Price::from_major(179_998)).unwrap(),
            "179998"
        );
        let json = serde_json::to_string(&Price::new(Decimal::new(89_999, 1))).unwrap();
        assert_eq!(json, "8999.9");
    }

    #[test]
    fn test_deserializes_integers_and_floats() {
        let whole: Price = serde_json::from_str("89999").unwrap();
        assert_eq!(whole, Price::from_major(89_999));

        let fractional: Price = serde_json::from_str("8999.9").unwrap();
        assert_eq!(fractional, Price::new(Decimal::new(89_999, 1)));
    }

    #[test]
    fn test_two_decimal_amounts_round_trip_exactly() {
        for amount in [
            Decimal::new(1_799_980, 2),
            Decimal::new(16_199_820, 2),
            Decimal::new(-899_990, 2),
            Decimal::new(99_999_999_999, 2),
        ] {
            let price = Price::new(amount);
            let json = serde_json::to_string(&price).unwrap();
            let back: Price = serde_json::from_str(&json).unwrap();
            assert_eq!(back, price, "{json}");
        }
    }
}
