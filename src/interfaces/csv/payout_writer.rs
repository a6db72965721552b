use crate::domain::payout::PayoutBreakdown;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// One output row per booking.
///
/// Holds plain `Decimal`s: CSV cells carry the amount as text, while `Money`
/// serializes as a JSON number.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct PayoutRecord {
    pub booking_id: u32,
    pub creator_payout: Decimal,
    pub platform_fee_host: Decimal,
    pub platform_fee_creator: Decimal,
    pub host_total: Decimal,
}

impl PayoutRecord {
    pub fn new(booking_id: u32, breakdown: PayoutBreakdown) -> Self {
        Self {
            booking_id,
            creator_payout: breakdown.creator_payout.value(),
            platform_fee_host: breakdown.platform_fee_host.value(),
            platform_fee_creator: breakdown.platform_fee_creator.value(),
            host_total: breakdown.host_total.value(),
        }
    }
}

/// Writes payout splits as CSV, one row at a time.
pub struct PayoutWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PayoutWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write(&mut self, record: &PayoutRecord) -> Result<()> {
        self.writer.serialize(record)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payout::calculate_payout;
    use rust_decimal_macros::dec;

    #[test]
    fn test_writes_header_and_cent_precision() {
        let mut out = Vec::new();
        {
            let mut writer = PayoutWriter::new(&mut out);
            let breakdown = calculate_payout(dec!(1000), Some(dec!(0.10)), None, None);
            writer.write(&PayoutRecord::new(1, breakdown)).unwrap();
            let breakdown = calculate_payout(dec!(333), Some(dec!(0.11)), None, None);
            writer.write(&PayoutRecord::new(2, breakdown)).unwrap();
            writer.flush().unwrap();
        }

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "booking_id,creator_payout,platform_fee_host,platform_fee_creator,host_total",
                "1,85.00,15.00,15.00,115.00",
                "2,31.14,5.49,5.49,42.12",
            ]
        );
    }
}
