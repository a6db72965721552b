use crate::domain::money::Money;
use crate::domain::payout::{CompensationRule, FeePolicy};
use crate::domain::ports::{ClickStoreBox, ClockRef, OfferStoreBox};
use crate::domain::referral::{
    Attribution, ClickStatus, CollaborationOffer, OfferStatus, ReferralClick,
};
use crate::error::{PayoutError, Result};
use rust_decimal::Decimal;
use serde::Serialize;

/// Ids touched by one expiration sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub expired_clicks: Vec<u32>,
    pub expired_offers: Vec<u32>,
}

impl SweepReport {
    pub fn is_empty(&self) -> bool {
        self.expired_clicks.is_empty() && self.expired_offers.is_empty()
    }
}

/// Credits bookings to referral clicks and keeps click and offer state current.
///
/// Owns the storage backends and the clock. Every storage operation is awaited
/// before the next one starts, so a single call is sequentially consistent.
pub struct AttributionEngine {
    clicks: ClickStoreBox,
    offers: OfferStoreBox,
    clock: ClockRef,
    fees: FeePolicy,
}

impl AttributionEngine {
    /// Creates a new engine charging the standard platform fee.
    ///
    /// # Arguments
    ///
    /// * `clicks` - The store for referral clicks.
    /// * `offers` - The store for collaboration offers.
    /// * `clock` - Source of "now" for window checks and sweeps.
    pub fn new(clicks: ClickStoreBox, offers: OfferStoreBox, clock: ClockRef) -> Self {
        Self {
            clicks,
            offers,
            clock,
            fees: FeePolicy::default(),
        }
    }

    pub fn with_fee_policy(mut self, fees: FeePolicy) -> Self {
        self.fees = fees;
        self
    }

    /// Records a click so it can later be attributed or swept.
    pub async fn record_click(&self, click: ReferralClick) -> Result<()> {
        tracing::debug!(click = click.id, creator = click.creator_id, "recording click");
        self.clicks.store(click).await
    }

    /// Records an offer so it can later be accepted or swept.
    pub async fn record_offer(&self, offer: CollaborationOffer) -> Result<()> {
        tracing::debug!(offer = offer.id, host = offer.host_id, "recording offer");
        self.offers.store(offer).await
    }

    /// Records a click unless one with the same id is already stored.
    ///
    /// A stored click keeps its status, so reloading the same input never
    /// revives a converted or expired click. Returns `true` when the click was new.
    pub async fn import_click(&self, click: ReferralClick) -> Result<bool> {
        if let Some(stored) = self.clicks.get(click.id).await? {
            tracing::debug!(click = click.id, status = %stored.status, "click already stored");
            return Ok(false);
        }
        self.record_click(click).await?;
        Ok(true)
    }

    /// Records an offer unless one with the same id is already stored.
    ///
    /// Returns `true` when the offer was new.
    pub async fn import_offer(&self, offer: CollaborationOffer) -> Result<bool> {
        if let Some(stored) = self.offers.get(offer.id).await? {
            tracing::debug!(offer = offer.id, status = %stored.status, "offer already stored");
            return Ok(false);
        }
        self.record_offer(offer).await?;
        Ok(true)
    }

    /// Credits a booking to a click and computes its payout split.
    ///
    /// A click found outside its window is expired on the spot.
    pub async fn attribute_booking(
        &self,
        click_id: u32,
        booking_id: u32,
        booking_amount: Decimal,
        rule: CompensationRule,
    ) -> Result<Attribution> {
        let mut click = self
            .clicks
            .get(click_id)
            .await?
            .ok_or(PayoutError::ClickNotFound(click_id))?;

        if click.status != ClickStatus::Active {
            return Err(PayoutError::ClickNotAttributable {
                id: click_id,
                reason: format!("click is {}", click.status),
            });
        }

        let now = self.clock.now();
        if click.expire_if_elapsed(now) {
            tracing::info!(click = click_id, booking = booking_id, "click window closed");
            self.clicks.store(click).await?;
            return Err(PayoutError::ClickNotAttributable {
                id: click_id,
                reason: "attribution window has closed".to_string(),
            });
        }

        let breakdown = self.fees.split(rule.base_payout(booking_amount));
        click.status = ClickStatus::Converted;
        let attribution = Attribution {
            click_id,
            creator_id: click.creator_id,
            booking_id,
            booking_amount: Money::new(booking_amount),
            breakdown,
            attributed_at: now,
        };
        self.clicks.store(click).await?;

        tracing::info!(
            click = click_id,
            booking = booking_id,
            creator_payout = %breakdown.creator_payout,
            host_total = %breakdown.host_total,
            "booking attributed"
        );
        Ok(attribution)
    }

    /// Accepts a pending offer that has not yet expired.
    pub async fn accept_offer(&self, offer_id: u32) -> Result<CollaborationOffer> {
        let mut offer = self
            .offers
            .get(offer_id)
            .await?
            .ok_or(PayoutError::OfferNotFound(offer_id))?;

        if offer.status != OfferStatus::Pending {
            return Err(PayoutError::OfferNotPending {
                id: offer_id,
                reason: format!("offer is {}", offer.status),
            });
        }

        if offer.expire_if_elapsed(self.clock.now()) {
            self.offers.store(offer).await?;
            return Err(PayoutError::OfferExpired(offer_id));
        }

        offer.status = OfferStatus::Accepted;
        self.offers.store(offer.clone()).await?;
        Ok(offer)
    }

    /// Expires every active click whose window has closed. Returns their ids.
    pub async fn sweep_expired_clicks(&self) -> Result<Vec<u32>> {
        let now = self.clock.now();
        let mut expired = Vec::new();
        for mut click in self.clicks.get_all().await? {
            if click.expire_if_elapsed(now) {
                expired.push(click.id);
                self.clicks.store(click).await?;
            }
        }
        Ok(expired)
    }

    /// Expires every pending offer past its deadline. Returns their ids.
    pub async fn sweep_expired_offers(&self) -> Result<Vec<u32>> {
        let now = self.clock.now();
        let mut expired = Vec::new();
        for mut offer in self.offers.get_all().await? {
            if offer.expire_if_elapsed(now) {
                expired.push(offer.id);
                self.offers.store(offer).await?;
            }
        }
        Ok(expired)
    }

    /// Runs both sweeps.
    pub async fn sweep(&self) -> Result<SweepReport> {
        let report = SweepReport {
            expired_clicks: self.sweep_expired_clicks().await?,
            expired_offers: self.sweep_expired_offers().await?,
        };
        tracing::info!(
            clicks = report.expired_clicks.len(),
            offers = report.expired_offers.len(),
            "expiration sweep finished"
        );
        Ok(report)
    }

    /// Consumes the engine and returns the final state of all clicks.
    pub async fn into_clicks(self) -> Result<Vec<ReferralClick>> {
        self.clicks.get_all().await
    }
}
