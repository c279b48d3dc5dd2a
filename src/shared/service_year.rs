//! Service-year helper.
//!
//! The organization's reporting year runs July 1 through June 30; emails and
//! the portal frontend display it as "YYYY-YYYY".

use chrono::{Datelike, NaiveDate, Utc};

/// Service year containing the given date, formatted "YYYY-YYYY".
///
/// June 30, 2025 falls in "2024-2025"; July 1, 2025 starts "2025-2026".
pub fn service_year_for(date: NaiveDate) -> String {
    let start = if date.month() >= 7 {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}-{}", start, start + 1)
}

/// Service year containing today's date (UTC).
pub fn current_service_year() -> String {
    service_year_for(Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_year_boundaries() {
        let june_30 = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert_eq!(service_year_for(june_30), "2024-2025");

        let july_1 = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert_eq!(service_year_for(july_1), "2025-2026");
    }

    #[test]
    fn test_service_year_mid_year() {
        let january = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        assert_eq!(service_year_for(january), "2025-2026");

        let october = NaiveDate::from_ymd_opt(2025, 10, 3).unwrap();
        assert_eq!(service_year_for(october), "2025-2026");
    }
}
