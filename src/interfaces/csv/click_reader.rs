use crate::domain::referral::ReferralClick;
use crate::error::{PayoutError, Result};
use std::io::Read;

/// Reads referral clicks from a CSV source.
///
/// Expects `id, creator_id, listing_id, clicked_at, window_days, status` with
/// RFC 3339 timestamps.
pub struct ClickReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ClickReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn clicks(self) -> impl Iterator<Item = Result<ReferralClick>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PayoutError::from))
    }
}
