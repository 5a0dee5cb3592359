//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as the menu's unit (dollars, not cents) and serialized as
//! plain JSON numbers so stored carts stay readable by any page script that
//! shares the storage slot.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("price is not a number: {0}")]
    Invalid(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative price in the restaurant's currency.
///
/// ```
/// use bistro_core::Price;
///
/// let price = Price::parse("9.5").unwrap();
/// assert_eq!(price.display(), "$9.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
#[serde(transparent)]
pub struct Price(#[serde(serialize_with = "rust_decimal::serde::float::serialize")] Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_zero() {
            return Ok(Self::ZERO);
        }
        if amount.is_sign_negative() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Parse a price from text such as `"9.50"`. Surrounding whitespace and a
    /// leading `$` are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a decimal number or is negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let amount =
            Decimal::from_str(digits).map_err(|_| PriceError::Invalid(trimmed.to_owned()))?;
        Self::new(amount)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Round to cents, halves away from zero.
    #[must_use]
    pub fn round_to_cents(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// The amount rounded to cents, without a currency symbol (e.g. `"19.00"`).
    #[must_use]
    pub fn to_fixed(&self) -> String {
        format!("{:.2}", self.round_to_cents().0)
    }

    /// Format for display (e.g. `"$19.00"`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("${}", self.to_fixed())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl core::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl core::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| acc + p)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_dollar_sign() {
        assert_eq!(Price::parse("$12.25").unwrap(), Price::from_cents(1225));
        assert_eq!(Price::parse(" 7 ").unwrap().to_fixed(), "7.00");
    }

    #[test]
    fn test_parse_rejects_garbage_and_negative() {
        assert!(matches!(Price::parse("abc"), Err(PriceError::Invalid(_))));
        assert_eq!(Price::parse("-1.00"), Err(PriceError::Negative));
        assert_eq!(Price::parse("-0").unwrap().to_fixed(), "0.00");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(Price::parse("0.125").unwrap().to_fixed(), "0.13");
        assert_eq!(Price::parse("2.345").unwrap().to_fixed(), "2.35");
        assert_eq!(Price::parse("2.344").unwrap().to_fixed(), "2.34");
    }

    #[test]
    fn test_times_and_sum() {
        let burger = Price::parse("9.50").unwrap();
        let fries = Price::parse("3.25").unwrap();
        let total: Price = [burger.times(2), fries.times(3)].into_iter().sum();
        assert_eq!(total.display(), "$28.75");
    }

    #[test]
    fn test_serializes_as_number() {
        let price = Price::parse("9.5").unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "9.5");
        let back: Price = serde_json::from_str("12.99").unwrap();
        assert_eq!(back, Price::from_cents(1299));
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }
}
