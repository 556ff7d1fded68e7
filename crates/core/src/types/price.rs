//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are never negative and carry at most [`Price::SCALE`] decimal places.
//! They are stored as SQLite `REAL` values so that range comparisons and `SUM()`
//! work inside the database; values read back are rounded to the same scale,
//! which absorbs binary float error from sums.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price must not be negative")]
    Negative,
    /// The input is not a decimal number.
    #[error("price must be a decimal number")]
    Malformed,
    /// The amount has more decimal places than [`Price::SCALE`].
    #[error("price must have at most {max} decimal places")]
    TooPrecise {
        /// Maximum allowed decimal places.
        max: u32,
    },
}

/// A non-negative monetary amount in the store currency's standard unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Decimal places kept for every amount.
    pub const SCALE: u32 = 2;

    /// Create a price from a decimal amount.
    ///
    /// Trailing zeros do not count towards the scale, so `10.500` is accepted.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if the amount is below zero and
    /// `PriceError::TooPrecise` if it has more than [`Price::SCALE`] decimal places.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        let amount = amount.normalize();
        if amount.scale() > Self::SCALE {
            return Err(PriceError::TooPrecise { max: Self::SCALE });
        }
        Ok(Self(amount))
    }

    /// Parse a price from user input such as `"19.99"`.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Malformed` if the input is not a number, otherwise
    /// the errors of [`Price::new`].
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount = s
            .trim()
            .parse::<Decimal>()
            .map_err(|_| PriceError::Malformed)?;
        Self::new(amount)
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// SQLx support (with sqlite feature)
#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for Price {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <f64 as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <f64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
            || <i64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for Price {
    fn decode(
        value: <sqlx::Sqlite as sqlx::Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <f64 as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        let amount = Decimal::try_from(raw)?;
        // SUM() over REAL drifts in the last binary digits
        Ok(Self(amount.round_dp(Self::SCALE).normalize()))
    }
}

#[cfg(feature = "sqlite")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Sqlite as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        use rust_decimal::prelude::ToPrimitive;

        let raw = self
            .0
            .round_dp(Self::SCALE)
            .to_f64()
            .ok_or_else(|| format!("price {} does not fit in f64", self.0))?;
        <f64 as sqlx::Encode<sqlx::Sqlite>>::encode_by_ref(&raw, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Price::parse("19.99").unwrap().amount(), Decimal::new(1999, 2));
        assert_eq!(Price::parse(" 0 ").unwrap(), Price::ZERO);
        assert_eq!(Price::parse("10.50").unwrap(), Price::parse("10.5").unwrap());
    }

    #[test]
    fn test_parse_negative() {
        assert_eq!(Price::parse("-0.01"), Err(PriceError::Negative));
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(Price::parse("ten"), Err(PriceError::Malformed));
        assert_eq!(Price::parse(""), Err(PriceError::Malformed));
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(Price::parse("5").unwrap().to_string(), "5.00");
        assert_eq!(Price::parse("12.3").unwrap().to_string(), "12.30");
    }

    #[test]
    fn test_parse_caps_scale() {
        assert_eq!(
            Price::parse("0.1234567890123456789"),
            Err(PriceError::TooPrecise { max: 2 })
        );
        assert_eq!(Price::parse("12.346"), Err(PriceError::TooPrecise { max: 2 }));
        assert_eq!(
            Price::parse("12.346").unwrap_err().to_string(),
            "price must have at most 2 decimal places"
        );
        // Trailing zeros are not extra precision
        assert_eq!(Price::parse("10.500").unwrap(), Price::parse("10.5").unwrap());
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let ok: Price = serde_json::from_str("\"4.25\"").unwrap();
        assert_eq!(ok, Price::parse("4.25").unwrap());
        assert!(serde_json::from_str::<Price>("\"-4.25\"").is_err());
        assert!(serde_json::from_str::<Price>("\"4.255\"").is_err());
    }
}
