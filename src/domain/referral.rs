use super::attribution;
use super::money::Money;
use super::payout::{CompensationRule, PayoutBreakdown};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClickStatus {
    #[default]
    Active,
    Converted,
    Expired,
}

impl fmt::Display for ClickStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClickStatus::Active => "active",
            ClickStatus::Converted => "converted",
            ClickStatus::Expired => "expired",
        };
        f.write_str(s)
    }
}

/// A visit to a listing through a creator's referral link.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct ReferralClick {
    pub id: u32,
    pub creator_id: u32,
    pub listing_id: u32,
    pub clicked_at: DateTime<Utc>,
    pub window_days: i64,
    #[serde(default)]
    pub status: ClickStatus,
}

impl ReferralClick {
    pub fn new(
        id: u32,
        creator_id: u32,
        listing_id: u32,
        clicked_at: DateTime<Utc>,
        window_days: i64,
    ) -> Self {
        Self {
            id,
            creator_id,
            listing_id,
            clicked_at,
            window_days,
            status: ClickStatus::Active,
        }
    }

    pub fn window_end(&self) -> Option<DateTime<Utc>> {
        attribution::window_end(&self.clicked_at, self.window_days)
    }

    pub fn is_within_window_at(&self, now: DateTime<Utc>) -> bool {
        attribution::is_within_window_at(&self.clicked_at, self.window_days, now)
    }

    /// Marks an active click as expired once its window has closed.
    ///
    /// Returns `true` only when the status changed.
    pub fn expire_if_elapsed(&mut self, now: DateTime<Utc>) -> bool {
        if self.status == ClickStatus::Active && !self.is_within_window_at(now) {
            self.status = ClickStatus::Expired;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Expired,
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Declined => "declined",
            OfferStatus::Expired => "expired",
        };
        f.write_str(s)
    }
}

/// A host's proposal to a creator, open until `expires_at`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct CollaborationOffer {
    pub id: u32,
    pub host_id: u32,
    pub creator_id: u32,
    pub rule: CompensationRule,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub status: OfferStatus,
}

impl CollaborationOffer {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Marks a pending offer as expired once `expires_at` has passed.
    ///
    /// Returns `true` only when the status changed.
    pub fn expire_if_elapsed(&mut self, now: DateTime<Utc>) -> bool {
        if self.status == OfferStatus::Pending && self.is_expired_at(now) {
            self.status = OfferStatus::Expired;
            true
        } else {
            false
        }
    }
}

/// A booking credited to a referral click, with its settlement.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Attribution {
    pub click_id: u32,
    pub creator_id: u32,
    pub booking_id: u32,
    pub booking_amount: Money,
    pub breakdown: PayoutBreakdown,
    pub attributed_at: DateTime<Utc>,
}
