//! Multi-debt waterfall projection

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::debt::Debt;
use super::amortization::MAX_PAYOFF_MONTHS;
use super::state::DebtState;
use super::timeline::{add_months, CascadeStep, PayoffProjection, PayoffTimelineEntry};

/// How freed-up minimums cascade through the ordered debts
///
/// `Sequential` is the standard waterfall and the default. Because it hands
/// each later debt the rolled-over money from month one, total interest is not
/// monotone in the ordering: avalanche can cost more than snowball. Under
/// `Simultaneous` the freed money only arrives once a debt actually clears, and
/// avalanche ordering never pays more interest than snowball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CascadeModel {
    /// Each debt is simulated from the start date on its own, paying its
    /// minimum plus every earlier debt's minimum plus the extra
    #[default]
    Sequential,

    /// All debts run month by month together: every open debt accrues and
    /// receives its minimum, then the pooled extra and any freed minimums go
    /// to debts in priority order
    Simultaneous,
}

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectorConfig {
    pub model: CascadeModel,

    /// Months simulated before an open balance is declared non-convergent
    pub max_months: u32,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            model: CascadeModel::default(),
            max_months: MAX_PAYOFF_MONTHS,
        }
    }
}

impl ProjectorConfig {
    pub fn with_model(model: CascadeModel) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }
}

/// Payoff projection engine
#[derive(Debug, Clone, Default)]
pub struct PayoffProjector {
    config: ProjectorConfig,
}

impl PayoffProjector {
    pub fn new(config: ProjectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Project an already-ordered debt list. Settled debts are skipped.
    pub fn project<T: AsRef<Debt>>(
        &self,
        ordered: &[T],
        monthly_extra: f64,
        start_date: NaiveDate,
    ) -> PayoffProjection {
        let states: Vec<DebtState> = ordered
            .iter()
            .map(AsRef::as_ref)
            .filter(|d| d.is_active())
            .map(DebtState::from_debt)
            .collect();

        let mut projection = PayoffProjection::new(self.config.model, start_date, monthly_extra);
        let states = match self.config.model {
            CascadeModel::Sequential => self.run_sequential(states, &mut projection),
            CascadeModel::Simultaneous => self.run_simultaneous(states, &mut projection),
        };

        for state in &states {
            let months = state.retired_month.unwrap_or(self.config.max_months);
            projection.add_entry(PayoffTimelineEntry {
                debt_id: state.debt_id.clone(),
                debt_name: state.debt_name.clone(),
                months_to_payoff: months,
                payoff_date: add_months(start_date, months),
                total_interest_paid: state.total_interest,
                converged: state.retired_month.is_some(),
            });
        }

        log::debug!(
            "{:?} projection: {} debts, debt-free in {} months, interest {:.2}",
            self.config.model,
            projection.entries.len(),
            projection.debt_free_months(),
            projection.total_interest(),
        );

        projection
    }

    /// Each debt on its own from month one with the cascaded payment
    fn run_sequential(
        &self,
        mut states: Vec<DebtState>,
        projection: &mut PayoffProjection,
    ) -> Vec<DebtState> {
        let mut remaining_extra = projection.monthly_extra;
        let mut outstanding_minimums: f64 = states.iter().map(|s| s.min_payment).sum();

        for state in states.iter_mut() {
            let monthly_payment = state.min_payment + remaining_extra;

            let mut month = 0;
            while state.balance > 0.0 && month < self.config.max_months {
                month += 1;
                state.accrue();
                state.balance -= monthly_payment;
            }
            state.retire_if_cleared(month);

            // Debts still open at the cap roll their minimum forward too
            remaining_extra += state.min_payment;
            outstanding_minimums -= state.min_payment;
            projection.cascade.push(CascadeStep {
                debt_id: state.debt_id.clone(),
                month,
                remaining_extra,
                outstanding_minimums,
            });
        }

        states
    }

    /// All debts together, month by month
    fn run_simultaneous(
        &self,
        mut states: Vec<DebtState>,
        projection: &mut PayoffProjection,
    ) -> Vec<DebtState> {
        let mut remaining_extra = projection.monthly_extra;
        let mut outstanding_minimums: f64 = states.iter().map(|s| s.min_payment).sum();

        let mut month = 0;
        while month < self.config.max_months && states.iter().any(DebtState::is_open) {
            month += 1;

            for state in states.iter_mut().filter(|s| s.is_open()) {
                state.accrue();
            }

            // Minimums first; any part of a minimum not needed joins the pool
            let mut pool = remaining_extra;
            for state in states.iter_mut().filter(|s| s.is_open()) {
                let paid = state.pay(state.min_payment);
                pool += state.min_payment - paid;
            }

            for state in states.iter_mut().filter(|s| s.is_open()) {
                if pool <= 0.0 {
                    break;
                }
                pool -= state.pay(pool);
            }

            for state in states.iter_mut() {
                if state.retire_if_cleared(month) {
                    remaining_extra += state.min_payment;
                    outstanding_minimums -= state.min_payment;
                    projection.cascade.push(CascadeStep {
                        debt_id: state.debt_id.clone(),
                        month,
                        remaining_extra,
                        outstanding_minimums,
                    });
                }
            }
        }

        for state in states.iter().filter(|s| s.is_open()) {
            log::warn!(
                "debt {} ({}) still owes {:.2} after {} months",
                state.debt_id,
                state.debt_name,
                state.balance,
                self.config.max_months,
            );
        }

        states
    }
}
