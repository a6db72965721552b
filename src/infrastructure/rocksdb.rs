use crate::domain::ports::{ClickStore, OfferStore};
use crate::domain::referral::{CollaborationOffer, ReferralClick};
use crate::error::{PayoutError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing referral clicks.
pub const CF_CLICKS: &str = "clicks";
/// Column Family for storing collaboration offers.
pub const CF_OFFERS: &str = "offers";

/// A persistent store implementation using RocksDB.
///
/// Keeps `ReferralClick` and `CollaborationOffer` entities in separate Column
/// Families, keyed by big-endian id so iteration yields them in id order.
/// Values are JSON.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families ("clicks" and "offers") exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_clicks = ColumnFamilyDescriptor::new(CF_CLICKS, Options::default());
        let cf_offers = ColumnFamilyDescriptor::new(CF_OFFERS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_clicks, cf_offers])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn handle(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            PayoutError::StorageError(
                format!("Column family '{}' not found", name).into(),
            )
        })
    }

    fn put<T: Serialize>(&self, cf_name: &str, id: u32, value: &T) -> Result<()> {
        let cf = self.handle(cf_name)?;
        let bytes = serde_json::to_vec(value)?;
        self.db.put_cf(cf, id.to_be_bytes(), bytes)?;
        Ok(())
    }

    fn fetch<T: DeserializeOwned>(&self, cf_name: &str, id: u32) -> Result<Option<T>> {
        let cf = self.handle(cf_name)?;
        match self.db.get_cf(cf, id.to_be_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn fetch_all<T: DeserializeOwned>(&self, cf_name: &str) -> Result<Vec<T>> {
        let cf = self.handle(cf_name)?;
        let mut values = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            values.push(serde_json::from_slice(&value)?);
        }
        Ok(values)
    }
}

#[async_trait]
impl ClickStore for RocksDBStore {
    async fn store(&self, click: ReferralClick) -> Result<()> {
        self.put(CF_CLICKS, click.id, &click)
    }

    async fn get(&self, click_id: u32) -> Result<Option<ReferralClick>> {
        self.fetch(CF_CLICKS, click_id)
    }

    async fn get_all(&self) -> Result<Vec<ReferralClick>> {
        self.fetch_all(CF_CLICKS)
    }
}

#[async_trait]
impl OfferStore for RocksDBStore {
    async fn store(&self, offer: CollaborationOffer) -> Result<()> {
        self.put(CF_OFFERS, offer.id, &offer)
    }

    async fn get(&self, offer_id: u32) -> Result<Option<CollaborationOffer>> {
        self.fetch(CF_OFFERS, offer_id)
    }

    async fn get_all(&self) -> Result<Vec<CollaborationOffer>> {
        self.fetch_all(CF_OFFERS)
    }
}
