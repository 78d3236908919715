//! Payoff projection output structures

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::projector::CascadeModel;

/// One row per projected debt, in priority order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffTimelineEntry {
    pub debt_id: String,
    pub debt_name: String,

    /// Months until the balance clears (the cap when it never does)
    pub months_to_payoff: u32,

    /// Start date advanced by `months_to_payoff` calendar months
    pub payoff_date: NaiveDate,

    pub total_interest_paid: f64,

    /// False when the balance was still open at the cap
    pub converged: bool,
}

/// Snapshot taken each time a debt retires and its minimum rolls over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeStep {
    pub debt_id: String,

    /// Projection month of the retirement
    pub month: u32,

    /// Pooled extra capacity after absorbing the retired minimum
    pub remaining_extra: f64,

    /// Sum of minimums for debts still open
    pub outstanding_minimums: f64,
}

impl CascadeStep {
    /// Total monthly outlay this step accounts for
    pub fn committed_outlay(&self) -> f64 {
        self.remaining_extra + self.outstanding_minimums
    }
}

/// Complete multi-debt projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffProjection {
    pub model: CascadeModel,
    pub start_date: NaiveDate,
    pub monthly_extra: f64,

    /// Timeline rows in priority order
    pub entries: Vec<PayoffTimelineEntry>,

    /// Minimum rollovers in the order they happened
    pub cascade: Vec<CascadeStep>,
}

impl PayoffProjection {
    pub fn new(model: CascadeModel, start_date: NaiveDate, monthly_extra: f64) -> Self {
        Self {
            model,
            start_date,
            monthly_extra,
            entries: Vec::new(),
            cascade: Vec::new(),
        }
    }

    /// Add a timeline row
    pub fn add_entry(&mut self, entry: PayoffTimelineEntry) {
        self.entries.push(entry);
    }

    /// Months until every debt is cleared (0 when there are no debts)
    pub fn debt_free_months(&self) -> u32 {
        self.entries.iter().map(|e| e.months_to_payoff).max().unwrap_or(0)
    }

    /// Date the last debt clears. This is the last entry's date whenever
    /// debts retire in priority order.
    pub fn debt_free_date(&self) -> Option<NaiveDate> {
        self.entries.iter().map(|e| e.payoff_date).max()
    }

    pub fn total_interest(&self) -> f64 {
        self.entries.iter().map(|e| e.total_interest_paid).sum()
    }

    pub fn all_converged(&self) -> bool {
        self.entries.iter().all(|e| e.converged)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            debt_count: self.entries.len(),
            debt_free_months: self.debt_free_months(),
            debt_free_date: self.debt_free_date(),
            total_interest: self.total_interest(),
            non_convergent_count: self.entries.iter().filter(|e| !e.converged).count(),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub debt_count: usize,
    pub debt_free_months: u32,
    pub debt_free_date: Option<NaiveDate>,
    pub total_interest: f64,
    pub non_convergent_count: usize,
}

/// Advance `start` by whole months, clamping to the last day of shorter months
pub fn add_months(start: NaiveDate, months: u32) -> NaiveDate {
    start
        .checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, months: u32, interest: f64, start: NaiveDate) -> PayoffTimelineEntry {
        PayoffTimelineEntry {
            debt_id: id.to_string(),
            debt_name: id.to_uppercase(),
            months_to_payoff: months,
            payoff_date: add_months(start, months),
            total_interest_paid: interest,
            converged: months < 360,
        }
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        let jan31 = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert_eq!(add_months(jan31, 1), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(add_months(jan31, 0), jan31);
        assert_eq!(add_months(jan31, 12), NaiveDate::from_ymd_opt(2027, 1, 31).unwrap());
    }

    #[test]
    fn test_summary() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let mut projection = PayoffProjection::new(CascadeModel::Simultaneous, start, 100.0);
        projection.add_entry(entry("a", 14, 120.0, start));
        projection.add_entry(entry("b", 9, 30.5, start));
        projection.add_entry(entry("c", 360, 900.0, start));

        let summary = projection.summary();
        assert_eq!(summary.debt_count, 3);
        assert_eq!(summary.debt_free_months, 360);
        assert_eq!(summary.debt_free_date, Some(NaiveDate::from_ymd_opt(2056, 1, 15).unwrap()));
        assert!((summary.total_interest - 1_050.5).abs() < 1e-9);
        assert_eq!(summary.non_convergent_count, 1);
        assert!(!projection.all_converged());
    }

    #[test]
    fn test_empty_projection() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let projection = PayoffProjection::new(CascadeModel::Sequential, start, 0.0);
        assert_eq!(projection.debt_free_months(), 0);
        assert_eq!(projection.debt_free_date(), None);
        assert_eq!(projection.total_interest(), 0.0);
    }
}
