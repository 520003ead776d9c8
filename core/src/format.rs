//! Customer-facing date formatting.
//!
//! The booking emails and admin listings use US-style dates. Keeping the
//! format strings in one place means the email and the API agree.

use chrono::{DateTime, NaiveDate, Utc};

/// Formats a date as `MM/DD/YYYY`.
#[must_use]
pub fn us_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Formats a timestamp as `MM/DD/YYYY at HH:MM AM/PM`.
#[must_use]
pub fn us_datetime(ts: DateTime<Utc>) -> String {
    ts.format("%m/%d/%Y at %I:%M %p").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn us_date_zero_pads() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(us_date(date), "03/07/2025");
    }

    #[test]
    fn us_datetime_twelve_hour_clock() {
        let ts = Utc.with_ymd_and_hms(2025, 11, 5, 14, 30, 0).unwrap();
        assert_eq!(us_datetime(ts), "11/05/2025 at 02:30 PM");
    }
}
