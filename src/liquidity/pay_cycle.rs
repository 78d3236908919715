//! Biweekly paycheck date resolution

use chrono::{Duration, Local, NaiveDate};

/// Strict biweekly cycle length
pub const PAY_CYCLE_DAYS: i64 = 14;

/// Next paycheck strictly after `reference`, given any known payday `anchor`.
///
/// A reference before the anchor returns the anchor. A reference that falls
/// on a payday yields the following payday, never the same day.
pub fn next_paycheck(anchor: NaiveDate, reference: NaiveDate) -> NaiveDate {
    if reference < anchor {
        return anchor;
    }

    let days_since_anchor = (reference - anchor).num_days();
    let days_into_cycle = days_since_anchor % PAY_CYCLE_DAYS;
    reference + Duration::days(PAY_CYCLE_DAYS - days_into_cycle)
}

/// Next paycheck relative to today's local date
pub fn next_paycheck_from_today(anchor: NaiveDate) -> NaiveDate {
    next_paycheck(anchor, Local::now().date_naive())
}

/// Whole days from `reference` to `target` (negative when already past)
pub fn days_until(target: NaiveDate, reference: NaiveDate) -> i64 {
    (target - reference).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reference_on_anchor_moves_a_full_cycle() {
        assert_eq!(next_paycheck(date(2025, 11, 14), date(2025, 11, 14)), date(2025, 11, 28));
    }

    #[test]
    fn test_reference_before_anchor() {
        assert_eq!(next_paycheck(date(2025, 11, 14), date(2025, 11, 1)), date(2025, 11, 14));
        // The day before a payday still lands on that payday, strictly after the reference
        assert_eq!(next_paycheck(date(2025, 11, 14), date(2025, 11, 13)), date(2025, 11, 14));
    }

    #[test]
    fn test_mid_cycle() {
        let anchor = date(2025, 11, 14);
        assert_eq!(next_paycheck(anchor, date(2025, 11, 15)), date(2025, 11, 28));
        assert_eq!(next_paycheck(anchor, date(2025, 11, 27)), date(2025, 11, 28));
        // Later payday in the cycle is treated like the anchor
        assert_eq!(next_paycheck(anchor, date(2025, 11, 28)), date(2025, 12, 12));
        // Across a year boundary
        assert_eq!(next_paycheck(anchor, date(2026, 1, 1)), date(2026, 1, 9));
    }

    #[test]
    fn test_result_is_always_on_cycle() {
        let anchor = date(2025, 11, 14);
        let mut reference = anchor;
        for _ in 0..60 {
            let next = next_paycheck(anchor, reference);
            assert!(next > reference);
            assert!(days_until(next, reference) <= PAY_CYCLE_DAYS);
            assert_eq!(days_until(next, anchor) % PAY_CYCLE_DAYS, 0);
            reference = reference.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_days_until() {
        assert_eq!(days_until(date(2025, 12, 1), date(2025, 11, 14)), 17);
        assert_eq!(days_until(date(2025, 11, 1), date(2025, 11, 14)), -13);
    }

    #[test]
    fn test_from_today_is_in_future() {
        let today = Local::now().date_naive();
        assert!(next_paycheck_from_today(date(2025, 11, 14)) > today);
    }
}
