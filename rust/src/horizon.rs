//! Planning horizon estimation and month labels.

use chrono::{Datelike, Months, NaiveDate};

use crate::config::HorizonConfig;

/// Whole calendar months from `from` until `to` (negative if `to` is earlier).
fn whole_months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }
    months
}

/// Estimate how many months a learner has left before graduating.
///
/// The result is always within `[min_months, max_months]`. Without a
/// graduation date, `default_months` is used.
pub fn estimate_horizon_months(
    today: NaiveDate,
    expected_graduation: Option<NaiveDate>,
    config: &HorizonConfig,
) -> u32 {
    let raw = match expected_graduation {
        Some(graduation) => whole_months_between(today, graduation).max(0) as u32,
        None => config.default_months,
    };
    raw.max(config.min_months).min(config.max_months)
}

/// One display label per horizon month.
///
/// With a start date, labels are calendar months ("Oct 2026"); otherwise "Month N".
pub fn month_labels(horizon: u32, start_date: Option<NaiveDate>) -> Vec<String> {
    let first = start_date.and_then(|d| d.with_day(1));
    (0..horizon)
        .map(|offset| {
            match first.and_then(|d| d.checked_add_months(Months::new(offset))) {
                Some(month) => month.format("%b %Y").to_string(),
                None => format!("Month {}", offset + 1),
            }
        })
        .collect()
}
