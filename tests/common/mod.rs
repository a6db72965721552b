use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const BOOKING_HEADER: [&str; 5] = [
    "booking_id",
    "booking_amount",
    "percent_rate",
    "flat_amount",
    "max_payout",
];

pub const CLICK_HEADER: [&str; 6] = [
    "id",
    "creator_id",
    "listing_id",
    "clicked_at",
    "window_days",
    "status",
];

/// Writes `rows` bookings alternating between percent, flat and capped terms.
pub fn generate_bookings_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(BOOKING_HEADER)?;

    for i in 1..=rows {
        let id = i.to_string();
        let amount = format!("{}.{:02}", 100 + i % 900, i % 100);
        match i % 3 {
            0 => wtr.write_record([id.as_str(), amount.as_str(), "0.12", "", ""])?,
            1 => wtr.write_record([id.as_str(), amount.as_str(), "", "45", ""])?,
            _ => wtr.write_record([id.as_str(), amount.as_str(), "0.25", "", "150"])?,
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `rows` active clicks, one per day starting at `first_day` (YYYY-MM-DD).
pub fn generate_clicks_csv(
    path: &Path,
    rows: usize,
    first_day: &str,
    window_days: u32,
) -> Result<(), Error> {
    let start = chrono::NaiveDate::parse_from_str(first_day, "%Y-%m-%d")
        .map_err(|e| Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(CLICK_HEADER)?;

    for (offset, i) in (1..=rows).enumerate() {
        let day = start + chrono::Days::new(offset as u64);
        wtr.write_record([
            i.to_string(),
            "1".to_string(),
            "1".to_string(),
            format!("{}T12:00:00Z", day),
            window_days.to_string(),
            "active".to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
