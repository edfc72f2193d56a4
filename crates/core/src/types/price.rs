//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog records carry prices in several raw shapes: a plain number, a
//! string with a currency prefix (`"$12.50"`), or the literal `"free"`
//! sentinel for giveaway items. [`Price`] normalizes all of them at the
//! boundary so the rest of the code never re-parses raw amounts.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A non-negative monetary amount, or the "free" giveaway sentinel.
///
/// Parsing is total: every raw input maps to some `Price`. Unparsable
/// input and negative amounts collapse to a zero amount rather than
/// erroring, which keeps cart totals computable no matter what the
/// catalog hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Price {
    /// Item is given away; contributes zero to any total.
    Free,
    /// Fixed amount in the store currency (USD), never negative.
    Amount(Decimal),
}

impl Price {
    /// A zero-amount price.
    pub const ZERO: Self = Self::Amount(Decimal::ZERO);

    /// Parse a raw price string.
    ///
    /// Accepts the `free` sentinel (case-insensitive), an optional
    /// currency prefix (`$`, `€`, `£`), and thousands separators.
    /// Anything else parses as zero.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("free") {
            return Self::Free;
        }

        let stripped: String = trimmed
            .trim_start_matches(['$', '€', '£'])
            .chars()
            .filter(|c| *c != ',')
            .collect();

        stripped
            .parse::<Decimal>()
            .map_or(Self::ZERO, Self::from_decimal)
    }

    /// Build a price from a decimal amount, clamping negatives to zero.
    #[must_use]
    pub fn from_decimal(amount: Decimal) -> Self {
        if amount.is_sign_negative() {
            Self::ZERO
        } else {
            Self::Amount(amount)
        }
    }

    /// Build a price from a floating-point amount.
    ///
    /// Non-finite values parse as zero.
    #[must_use]
    pub fn from_f64(amount: f64) -> Self {
        Decimal::from_f64(amount).map_or(Self::ZERO, Self::from_decimal)
    }

    /// The numeric amount, with [`Price::Free`] coercing to zero.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        match self {
            Self::Free => Decimal::ZERO,
            Self::Amount(amount) => *amount,
        }
    }

    /// Whether this is the giveaway sentinel.
    #[must_use]
    pub const fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "Free"),
            Self::Amount(amount) => write!(f, "${amount:.2}"),
        }
    }
}

// The wire form mirrors what the catalog sends: the sentinel stays the
// string "free", amounts are decimal strings to preserve precision.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Free => serializer.serialize_str("free"),
            Self::Amount(amount) => serializer.serialize_str(&amount.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PriceVisitor;

        impl Visitor<'_> for PriceVisitor {
            type Value = Price;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a price string, number, or the \"free\" sentinel")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Price, E> {
                Ok(Price::parse(value))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Price, E> {
                Ok(Price::from_f64(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Price, E> {
                Ok(Price::from_decimal(Decimal::from(value)))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Price, E> {
                Ok(Price::from_decimal(Decimal::from(value)))
            }
        }

        deserializer.deserialize_any(PriceVisitor)
    }
}
