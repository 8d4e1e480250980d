//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are whole rubles, but amounts are kept as [`Decimal`] so
//! cart totals never go through floating point.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Deserializes either from a bare integer (whole rubles, as catalog files
/// write it) or from the full `{ amount, currency_code }` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "PriceRepr")]
pub struct Price {
    /// Amount in the currency's standard unit (rubles, not kopecks).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Rubles(i64),
    Full {
        amount: Decimal,
        #[serde(default)]
        currency_code: CurrencyCode,
    },
}

impl From<PriceRepr> for Price {
    fn from(repr: PriceRepr) -> Self {
        match repr {
            PriceRepr::Rubles(amount) => Self::rubles(amount),
            PriceRepr::Full {
                amount,
                currency_code,
            } => Self::new(amount, currency_code),
        }
    }
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in whole rubles.
    #[must_use]
    pub fn rubles(amount: i64) -> Self {
        Self::new(Decimal::from(amount), CurrencyCode::RUB)
    }

    /// A zero amount in rubles.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(Decimal::ZERO, CurrencyCode::RUB)
    }

    /// Multiply the price by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Price {
    type Output = Self;

    /// Adds two amounts. The left-hand currency wins; catalogs are
    /// single-currency.
    fn add(self, rhs: Self) -> Self {
        Self::new(self.amount + rhs.amount, self.currency_code)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.currency_code.symbol(), self.amount.normalize())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[allow(clippy::upper_case_acronyms)]
pub enum CurrencyCode {
    #[default]
    RUB,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::RUB => "₽",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_whole_rubles() {
        assert_eq!(Price::rubles(850).to_string(), "₽850");
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::rubles(850), Price::rubles(1200), Price::rubles(420)]
            .iter()
            .sum();
        assert_eq!(total, Price::rubles(2470));
    }

    #[test]
    fn test_sum_empty_is_zero() {
        let total: Price = core::iter::empty::<Price>().sum();
        assert_eq!(total, Price::zero());
        assert_eq!(total.to_string(), "₽0");
    }

    #[test]
    fn test_times() {
        assert_eq!(Price::rubles(420).times(3), Price::rubles(1260));
    }

    #[test]
    fn test_deserialize_bare_integer() {
        let price: Price = serde_json::from_str("1200").unwrap();
        assert_eq!(price, Price::rubles(1200));
    }

    #[test]
    fn test_deserialize_defaults_currency() {
        let price: Price = serde_json::from_str(r#"{"amount":"850"}"#).unwrap();
        assert_eq!(price, Price::rubles(850));
    }
}
