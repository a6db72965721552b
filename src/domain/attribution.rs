//! Attribution window arithmetic for referral clicks.
//!
//! A click stays creditable until `window_days` calendar days after it
//! happened, inclusive of that exact instant. Day addition is done in the
//! click's own time zone, so a window spanning a DST change still ends at the
//! same wall-clock time of day.

use super::ports::Clock;
use chrono::{DateTime, Days, TimeZone, Utc};

/// The last instant at which a click made at `clicked_at` is still attributable.
///
/// Negative `window_days` moves the end before the click. Returns `None` when
/// the end falls outside chrono's representable range.
pub fn window_end<Tz: TimeZone>(
    clicked_at: &DateTime<Tz>,
    window_days: i64,
) -> Option<DateTime<Tz>> {
    let days = Days::new(window_days.unsigned_abs());
    if window_days >= 0 {
        clicked_at.clone().checked_add_days(days)
    } else {
        clicked_at.clone().checked_sub_days(days)
    }
}

/// Whether a click is still inside its window at `now`.
///
/// A window end past the representable range never closes.
pub fn is_within_window_at<Tz: TimeZone>(
    clicked_at: &DateTime<Tz>,
    window_days: i64,
    now: DateTime<Utc>,
) -> bool {
    match window_end(clicked_at, window_days) {
        Some(end) => now <= end.with_timezone(&Utc),
        None => window_days >= 0,
    }
}

/// Whether a click is still inside its window according to `clock`.
pub fn is_within_window<Tz: TimeZone>(
    clicked_at: &DateTime<Tz>,
    window_days: i64,
    clock: &dyn Clock,
) -> bool {
    is_within_window_at(clicked_at, window_days, clock.now())
}
