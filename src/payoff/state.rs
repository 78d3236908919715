//! Per-debt state tracked during a payoff projection

use crate::debt::Debt;

/// Running state of one debt during projection
#[derive(Debug, Clone)]
pub struct DebtState {
    pub debt_id: String,
    pub debt_name: String,

    /// Current outstanding balance
    pub balance: f64,

    /// Contractual minimum payment
    pub min_payment: f64,

    /// Periodic rate as a fraction
    pub monthly_rate: f64,

    /// Interest accrued so far
    pub total_interest: f64,

    /// Projection month in which the balance reached zero
    pub retired_month: Option<u32>,
}

impl DebtState {
    /// Initialize state from a debt snapshot
    pub fn from_debt(debt: &Debt) -> Self {
        Self {
            debt_id: debt.id.clone(),
            debt_name: debt.name.clone(),
            balance: debt.balance,
            min_payment: debt.min_payment,
            monthly_rate: debt.monthly_rate(),
            total_interest: 0.0,
            retired_month: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.retired_month.is_none()
    }

    /// Add one month of interest to the balance
    pub fn accrue(&mut self) -> f64 {
        let interest = self.balance * self.monthly_rate;
        self.total_interest += interest;
        self.balance += interest;
        interest
    }

    /// Apply up to `amount`, never paying below zero. Returns the amount applied.
    pub fn pay(&mut self, amount: f64) -> f64 {
        let applied = amount.min(self.balance).max(0.0);
        self.balance -= applied;
        applied
    }

    /// Mark the debt retired once its balance is gone
    pub fn retire_if_cleared(&mut self, month: u32) -> bool {
        if self.is_open() && self.balance <= 0.0 {
            self.retired_month = Some(month);
            true
        } else {
            false
        }
    }
}
