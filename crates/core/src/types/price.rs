//! Type-safe price representation in minor currency units.
//!
//! Catalog prices, order totals, and line-item snapshots are all stored as
//! integer centavos. Arithmetic is checked so a malicious quantity cannot
//! silently overflow a total.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in minor currency units (centavos).
///
/// `Price` is deliberately integer-based: every value that crosses the wire
/// or hits the database is an exact number of centavos. [`Decimal`] is used
/// only for display formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a price from minor currency units.
    #[must_use]
    pub const fn from_minor_units(units: i64) -> Self {
        Self(units)
    }

    /// Get the amount in minor currency units.
    #[must_use]
    pub const fn as_minor_units(&self) -> i64 {
        self.0
    }

    /// Checked addition; `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked multiplication by a quantity; `None` on overflow.
    #[must_use]
    pub const fn checked_mul(self, quantity: u32) -> Option<Self> {
        match self.0.checked_mul(quantity as i64) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// The amount as a decimal in standard units (e.g. `12.00`).
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Format for display in BRL, e.g. `R$ 12,00`.
    #[must_use]
    pub fn display_brl(&self) -> String {
        format!("R$ {}", self.as_decimal()).replace('.', ",")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_decimal())
    }
}

impl From<i64> for Price {
    fn from(units: i64) -> Self {
        Self(units)
    }
}

impl From<Price> for i64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i64 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let units = <i64 as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(Self(units))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i64 as sqlx::Encode<'_, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units_roundtrip() {
        let price = Price::from_minor_units(1200);
        assert_eq!(price.as_minor_units(), 1200);
        assert_eq!(i64::from(price), 1200);
    }

    #[test]
    fn test_checked_mul() {
        let price = Price::from_minor_units(1200);
        assert_eq!(price.checked_mul(2), Some(Price::from_minor_units(2400)));
        assert_eq!(Price::from_minor_units(i64::MAX).checked_mul(2), None);
    }

    #[test]
    fn test_checked_add() {
        let a = Price::from_minor_units(2400);
        let b = Price::from_minor_units(1500);
        assert_eq!(a.checked_add(b), Some(Price::from_minor_units(3900)));
    }

    #[test]
    fn test_display_brl() {
        assert_eq!(Price::from_minor_units(1200).display_brl(), "R$ 12,00");
        assert_eq!(Price::from_minor_units(1150).display_brl(), "R$ 11,50");
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::from_minor_units(1500);
        assert_eq!(serde_json::to_string(&price).expect("serialize"), "1500");
    }
}
