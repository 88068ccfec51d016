//! Type-safe rupiah price representation using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a number: {0}")]
    Invalid(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// More than [`Price::MAX_SCALE`] fractional digits.
    #[error("price has at most {} decimal places", Price::MAX_SCALE)]
    TooPrecise,
    /// The amount does not fit a stored price.
    #[error("price must be below {}", Price::UPPER_BOUND)]
    TooLarge,
}

/// A price in Indonesian rupiah.
///
/// Stored as a `Decimal` so totals never pick up floating point drift.
/// Rendering follows the `id-ID` locale: `.` groups thousands and `,`
/// separates the fraction (`Rp 15.000`, `Rp 2.500,5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Fractional digits a stored price keeps (`NUMERIC(12, 2)`).
    pub const MAX_SCALE: u32 = 2;

    /// Exclusive upper bound on a stored price, in whole rupiah.
    pub const UPPER_BOUND: i64 = 10_000_000_000;

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of rupiah.
    #[must_use]
    pub fn from_rupiah(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// Parse a price typed into a form field.
    ///
    /// Surrounding whitespace is ignored. The amount must pass
    /// [`Price::storable`].
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a number, or not storable.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount =
            Decimal::from_str(trimmed).map_err(|_| PriceError::Invalid(trimmed.to_owned()))?;
        Self(amount).storable()
    }

    /// Check that this price fits a product's price column.
    ///
    /// Trailing zeros do not count towards the scale, so `1.500` passes.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative, has more than
    /// [`Price::MAX_SCALE`] decimal places, or reaches [`Price::UPPER_BOUND`].
    pub fn storable(self) -> Result<Self, PriceError> {
        if self.0.is_sign_negative() && !self.0.is_zero() {
            return Err(PriceError::Negative);
        }
        if self.0.normalize().scale() > Self::MAX_SCALE {
            return Err(PriceError::TooPrecise);
        }
        if self.0 >= Decimal::from(Self::UPPER_BOUND) {
            return Err(PriceError::TooLarge);
        }
        Ok(self)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Format for display, e.g. `Rp 15.000`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("Rp {}", group_id_locale(self.0))
    }
}

/// Format a decimal with `id-ID` separators.
fn group_id_locale(amount: Decimal) -> String {
    let normalized = amount.normalize();
    let text = normalized.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if normalized.is_sign_negative() && !normalized.is_zero() {
        "-"
    } else {
        ""
    };

    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{fraction}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::from_rupiah(15_000).display(), "Rp 15.000");
        assert_eq!(Price::from_rupiah(1_250_000).display(), "Rp 1.250.000");
        assert_eq!(Price::from_rupiah(500).display(), "Rp 500");
        assert_eq!(Price::ZERO.display(), "Rp 0");
    }

    #[test]
    fn test_display_fraction_uses_comma() {
        let price = Price::new(Decimal::new(25_005, 1));
        assert_eq!(price.display(), "Rp 2.500,5");
    }

    #[test]
    fn test_display_drops_trailing_zero_scale() {
        let price = Price::new(Decimal::new(1_500_000, 2));
        assert_eq!(price.display(), "Rp 15.000");
    }

    #[test]
    fn test_times_and_sum() {
        let unit = Price::from_rupiah(15_000);
        assert_eq!(unit.times(2), Price::from_rupiah(30_000));

        let total: Price = [unit.times(2), Price::from_rupiah(5_000)].into_iter().sum();
        assert_eq!(total, Price::from_rupiah(35_000));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Price::parse(" 15000 ").unwrap(), Price::from_rupiah(15_000));
        assert_eq!(
            Price::parse("2500.50").unwrap(),
            Price::new(Decimal::new(250_050, 2))
        );
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("-1"), Err(PriceError::Negative));
        assert!(matches!(Price::parse("abc"), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn test_parse_rejects_amounts_the_column_cannot_hold() {
        assert_eq!(Price::parse("99999999999999999"), Err(PriceError::TooLarge));
        assert_eq!(Price::parse("10000000000"), Err(PriceError::TooLarge));
        assert_eq!(
            Price::parse("9999999999.99").unwrap(),
            Price::new(Decimal::new(999_999_999_999, 2))
        );
    }

    #[test]
    fn test_parse_rejects_more_than_two_decimals() {
        assert_eq!(Price::parse("1.005"), Err(PriceError::TooPrecise));
        assert_eq!(Price::parse("1.500").unwrap(), Price::new(Decimal::new(15, 1)));
    }

    #[test]
    fn test_storable_checks_constructed_prices() {
        assert_eq!(Price::from_rupiah(-1).storable(), Err(PriceError::Negative));
        assert_eq!(
            Price::from_rupiah(Price::UPPER_BOUND).storable(),
            Err(PriceError::TooLarge)
        );
        assert!(Price::from_rupiah(15_000).storable().is_ok());
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::from_rupiah(15_000);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"15000\"");
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }
}
