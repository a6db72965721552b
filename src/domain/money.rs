use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};

/// Number of decimal places money is settled with (cent precision).
pub const CENT_SCALE: u32 = 2;

/// A settled monetary value in major currency units, always at cent precision.
///
/// Wraps `rust_decimal::Decimal` so that every amount leaving the payout
/// calculator has been rounded the same way. Arithmetic saturates instead of
/// panicking on overflow. Serializes as a JSON number with its cents intact
/// (`170.00`, not `170` or `"170.00"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wraps an already-settled value without rounding it.
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Rounds a raw amount half-up (away from zero on the midpoint) to cents.
    pub fn from_unrounded(value: Decimal) -> Self {
        let mut cents =
            value.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        cents.rescale(CENT_SCALE);
        Self(cents)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::arbitrary_precision::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::arbitrary_precision::deserialize(deserializer).map(Self)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
