//! Decimal money amounts.
//!
//! The marketplace API serializes prices, shipping costs, and weights
//! inconsistently: sometimes as JSON numbers, sometimes as strings, and
//! occasionally as null. [`Money`] deserializes all three shapes and
//! clamps to zero on anything unparseable, matching how the rest of the
//! pipeline treats malformed upstream data (normalize, never error).

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A non-negative decimal amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Default)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a money amount. Negative inputs clamp to zero.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        if amount.is_sign_negative() {
            Self::ZERO
        } else {
            Self(amount)
        }
    }

    /// The underlying decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Line total: unit amount times a quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, std::ops::Add::add)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient_decimal(deserializer).map(Self::new)
    }
}

/// Deserialize a decimal from a number, numeric string, or null.
///
/// Unparseable or absent values become zero. Usable directly via
/// `#[serde(deserialize_with = "...")]` on non-money decimal fields
/// (weights, quantities) that the backend serializes just as loosely.
///
/// # Errors
///
/// Only fails when the input is not valid JSON at all; malformed values
/// degrade to zero instead.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    // Accept number, numeric string, or null; anything else is zero.
    // Numbers go through serde_json::Number so this works regardless of
    // which serde representation rust_decimal is compiled with.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(serde_json::Number),
        Text(String),
        Null(Option<()>),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n.to_string().parse::<Decimal>().unwrap_or(Decimal::ZERO),
        Raw::Text(s) => s.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO),
        Raw::Null(_) => Decimal::ZERO,
    })
}
