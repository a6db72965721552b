use super::money::Money;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Fraction of the base payout the platform charges each side of a collaboration.
pub const PLATFORM_FEE_RATE: Decimal = dec!(0.15);

/// How a creator is compensated for a booking.
///
/// A percentage of the booking amount takes precedence over a flat amount when
/// both are present. Neither field is validated: negative amounts or rates
/// outside `[0, 1]` flow straight through the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompensationRule {
    pub percent_rate: Option<Decimal>,
    pub flat_amount: Option<Decimal>,
    pub max_payout: Option<Decimal>,
}

impl CompensationRule {
    pub fn percent(rate: Decimal) -> Self {
        Self {
            percent_rate: Some(rate),
            ..Self::default()
        }
    }

    pub fn flat(amount: Decimal) -> Self {
        Self {
            flat_amount: Some(amount),
            ..Self::default()
        }
    }

    pub fn with_cap(mut self, max_payout: Decimal) -> Self {
        self.max_payout = Some(max_payout);
        self
    }

    /// Commission owed for `booking_amount` before platform fees, after the cap.
    pub fn base_payout(&self, booking_amount: Decimal) -> Decimal {
        let base = match (self.percent_rate, self.flat_amount) {
            (Some(rate), _) => booking_amount.saturating_mul(rate),
            (None, Some(flat)) => flat,
            (None, None) => Decimal::ZERO,
        };

        match self.max_payout {
            Some(cap) if base > cap => cap,
            _ => base,
        }
    }
}

/// The three-way settlement of a base payout between host, creator and platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutBreakdown {
    /// What the creator actually receives.
    pub creator_payout: Money,
    /// Fee added on top of the host's charge.
    pub platform_fee_host: Money,
    /// Fee deducted from the creator's payout.
    pub platform_fee_creator: Money,
    /// What the host is charged.
    pub host_total: Money,
}

impl PayoutBreakdown {
    /// Platform revenue for this settlement.
    pub fn platform_revenue(&self) -> Money {
        self.platform_fee_host + self.platform_fee_creator
    }
}

/// Fee rates charged to each side of a collaboration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeePolicy {
    pub host_rate: Decimal,
    pub creator_rate: Decimal,
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self {
            host_rate: PLATFORM_FEE_RATE,
            creator_rate: PLATFORM_FEE_RATE,
        }
    }
}

impl FeePolicy {
    /// Unrounded `(host_fee, creator_fee)` for a base payout.
    pub fn fees(&self, base_payout: Decimal) -> (Decimal, Decimal) {
        (
            base_payout.saturating_mul(self.host_rate),
            base_payout.saturating_mul(self.creator_rate),
        )
    }

    /// Splits a base payout, rounding every settled amount to cents only at the end.
    pub fn split(&self, base_payout: Decimal) -> PayoutBreakdown {
        let (fee_host, fee_creator) = self.fees(base_payout);

        PayoutBreakdown {
            creator_payout: Money::from_unrounded(base_payout.saturating_sub(fee_creator)),
            platform_fee_host: Money::from_unrounded(fee_host),
            platform_fee_creator: Money::from_unrounded(fee_creator),
            host_total: Money::from_unrounded(base_payout.saturating_add(fee_host)),
        }
    }
}

/// Computes the payout split for a booking under the standard platform fee.
///
/// Total over its inputs: with neither `percent_rate` nor `flat_amount` the
/// result is all zeros rather than an error.
pub fn calculate_payout(
    booking_amount: Decimal,
    percent_rate: Option<Decimal>,
    flat_amount: Option<Decimal>,
    max_payout: Option<Decimal>,
) -> PayoutBreakdown {
    let rule = CompensationRule {
        percent_rate,
        flat_amount,
        max_payout,
    };
    FeePolicy::default().split(rule.base_payout(booking_amount))
}
