use super::referral::{CollaborationOffer, ReferralClick};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Source of "now" for window checks, sweeps and rate limiting.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[async_trait]
pub trait ClickStore: Send + Sync {
    async fn store(&self, click: ReferralClick) -> Result<()>;
    async fn get(&self, click_id: u32) -> Result<Option<ReferralClick>>;
    /// Every stored click, ordered by id.
    async fn get_all(&self) -> Result<Vec<ReferralClick>>;
}

#[async_trait]
pub trait OfferStore: Send + Sync {
    async fn store(&self, offer: CollaborationOffer) -> Result<()>;
    async fn get(&self, offer_id: u32) -> Result<Option<CollaborationOffer>>;
    /// Every stored offer, ordered by id.
    async fn get_all(&self) -> Result<Vec<CollaborationOffer>>;
}

pub type ClickStoreBox = Box<dyn ClickStore>;
pub type OfferStoreBox = Box<dyn OfferStore>;
pub type ClockRef = Arc<dyn Clock>;
