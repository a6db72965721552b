use crate::domain::ports::{ClickStore, OfferStore};
use crate::domain::referral::{CollaborationOffer, ReferralClick};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for referral clicks.
///
/// Uses `Arc<RwLock<HashMap<u32, ReferralClick>>>` to allow shared concurrent access.
/// Ideal for batch runs and tests where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryClickStore {
    clicks: Arc<RwLock<HashMap<u32, ReferralClick>>>,
}

impl InMemoryClickStore {
    /// Creates a new, empty in-memory click store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClickStore for InMemoryClickStore {
    async fn store(&self, click: ReferralClick) -> Result<()> {
        let mut clicks = self.clicks.write().await;
        clicks.insert(click.id, click);
        Ok(())
    }

    async fn get(&self, click_id: u32) -> Result<Option<ReferralClick>> {
        let clicks = self.clicks.read().await;
        Ok(clicks.get(&click_id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<ReferralClick>> {
        let clicks = self.clicks.read().await;
        let mut all: Vec<_> = clicks.values().cloned().collect();
        all.sort_by_key(|click| click.id);
        Ok(all)
    }
}

/// A thread-safe in-memory store for collaboration offers.
#[derive(Default, Clone)]
pub struct InMemoryOfferStore {
    offers: Arc<RwLock<HashMap<u32, CollaborationOffer>>>,
}

impl InMemoryOfferStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OfferStore for InMemoryOfferStore {
    async fn store(&self, offer: CollaborationOffer) -> Result<()> {
        let mut offers = self.offers.write().await;
        offers.insert(offer.id, offer);
        Ok(())
    }

    async fn get(&self, offer_id: u32) -> Result<Option<CollaborationOffer>> {
        let offers = self.offers.read().await;
        Ok(offers.get(&offer_id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<CollaborationOffer>> {
        let offers = self.offers.read().await;
        let mut all: Vec<_> = offers.values().cloned().collect();
        all.sort_by_key(|offer| offer.id);
        Ok(all)
    }
}
