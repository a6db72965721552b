use crate::domain::payout::{CompensationRule, PayoutBreakdown, calculate_payout};
use crate::error::{PayoutError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One booking row: the booking amount and the creator's compensation terms.
///
/// Empty rate, flat and cap columns deserialize to `None`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct BookingRecord {
    pub booking_id: u32,
    pub booking_amount: Decimal,
    pub percent_rate: Option<Decimal>,
    pub flat_amount: Option<Decimal>,
    pub max_payout: Option<Decimal>,
}

impl BookingRecord {
    pub fn rule(&self) -> CompensationRule {
        CompensationRule {
            percent_rate: self.percent_rate,
            flat_amount: self.flat_amount,
            max_payout: self.max_payout,
        }
    }

    pub fn payout(&self) -> PayoutBreakdown {
        calculate_payout(
            self.booking_amount,
            self.percent_rate,
            self.flat_amount,
            self.max_payout,
        )
    }
}

/// Reads bookings from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<BookingRecord>`.
/// It handles whitespace trimming and flexible record lengths automatically.
pub struct BookingReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> BookingReader<R> {
    /// Creates a new `BookingReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes bookings.
    pub fn bookings(self) -> impl Iterator<Item = Result<BookingRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PayoutError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use rust_decimal_macros::dec;

    const HEADER: &str = "booking_id, booking_amount, percent_rate, flat_amount, max_payout";

    #[test]
    fn test_reader_valid_stream() {
        let data = format!("{HEADER}\n1, 1000, 0.10, , \n2, 1000, , 50, \n3, 5000, 0.20, , 200");
        let reader = BookingReader::new(data.as_bytes());
        let results: Vec<Result<BookingRecord>> = reader.bookings().collect();

        assert_eq!(results.len(), 3);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.booking_id, 1);
        assert_eq!(first.percent_rate, Some(dec!(0.10)));
        assert_eq!(first.flat_amount, None);
        assert_eq!(first.max_payout, None);

        let capped = results[2].as_ref().unwrap();
        assert_eq!(capped.rule(), CompensationRule::percent(dec!(0.20)).with_cap(dec!(200)));
        assert_eq!(capped.payout().creator_payout, Money::new(dec!(170)));
    }

    #[test]
    fn test_reader_blank_terms_leave_rule_empty() {
        let data = format!("{HEADER}\n9, 250, , , ");
        let reader = BookingReader::new(data.as_bytes());
        let record = reader.bookings().next().unwrap().unwrap();

        assert_eq!(record.rule(), CompensationRule::default());
        assert_eq!(record.payout(), PayoutBreakdown::default());
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = format!("{HEADER}\nabc, 1000, 0.1, , \n2, lots, 0.1, , ");
        let reader = BookingReader::new(data.as_bytes());
        let results: Vec<Result<BookingRecord>> = reader.bookings().collect();

        assert!(results[0].is_err());
        assert!(results[1].is_err());
    }
}
