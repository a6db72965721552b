use crate::domain::payout::CompensationRule;
use crate::domain::referral::{CollaborationOffer, OfferStatus};
use crate::error::{PayoutError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One offer row. The compensation terms are spread over three columns, any
/// of which may be blank.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct OfferRecord {
    pub id: u32,
    pub host_id: u32,
    pub creator_id: u32,
    pub percent_rate: Option<Decimal>,
    pub flat_amount: Option<Decimal>,
    pub max_payout: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub status: OfferStatus,
}

impl From<OfferRecord> for CollaborationOffer {
    fn from(record: OfferRecord) -> Self {
        CollaborationOffer {
            id: record.id,
            host_id: record.host_id,
            creator_id: record.creator_id,
            rule: CompensationRule {
                percent_rate: record.percent_rate,
                flat_amount: record.flat_amount,
                max_payout: record.max_payout,
            },
            created_at: record.created_at,
            expires_at: record.expires_at,
            status: record.status,
        }
    }
}

/// Reads collaboration offers from a CSV source.
///
/// Expects `id, host_id, creator_id, percent_rate, flat_amount, max_payout,
/// created_at, expires_at, status` with RFC 3339 timestamps.
pub struct OfferReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OfferReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn offers(self) -> impl Iterator<Item = Result<CollaborationOffer>> {
        self.reader
            .into_deserialize::<OfferRecord>()
            .map(|result| result.map(CollaborationOffer::from).map_err(PayoutError::from))
    }
}
