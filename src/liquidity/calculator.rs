//! Short-horizon cash figures: safe-to-spend, overage, month-end estimate

use serde::{Deserialize, Serialize};

use super::status::{CashFlowStatus, HalfCheckingPolicy, StatusPolicy};

/// Default reserve kept out of safe-to-spend
pub const DEFAULT_EMERGENCY_BUFFER: f64 = 5_000.0;

/// A scheduled outflow in the next pay period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: f64,
}

impl ScheduledPayment {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Point-in-time account and obligation figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquiditySnapshot {
    pub checking_balance: f64,
    pub savings_balance: f64,
    pub upcoming_paycheck_amount: f64,
    #[serde(default)]
    pub auto_pays: Vec<ScheduledPayment>,
    #[serde(default)]
    pub irregular_expenses: Vec<ScheduledPayment>,
    #[serde(default = "default_emergency_buffer")]
    pub emergency_buffer_target: f64,
}

fn default_emergency_buffer() -> f64 {
    DEFAULT_EMERGENCY_BUFFER
}

impl LiquiditySnapshot {
    pub fn auto_pay_total(&self) -> f64 {
        self.auto_pays.iter().map(|p| p.amount).sum()
    }

    pub fn irregular_total(&self) -> f64 {
        self.irregular_expenses.iter().map(|p| p.amount).sum()
    }
}

/// Balances to keep in each account before anything counts as overage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountMinimums {
    pub checking_minimum: f64,
    pub savings_minimum: f64,
}

impl Default for AccountMinimums {
    fn default() -> Self {
        Self {
            checking_minimum: 5_000.0,
            savings_minimum: 3_500.0,
        }
    }
}

/// Safe to spend = (checking + paycheck) - (auto-pays + irregular + buffer), floored at zero
pub fn safe_to_spend(snapshot: &LiquiditySnapshot) -> f64 {
    let incoming = snapshot.checking_balance + snapshot.upcoming_paycheck_amount;
    let outgoing =
        snapshot.auto_pay_total() + snapshot.irregular_total() + snapshot.emergency_buffer_target;
    (incoming - outgoing).max(0.0)
}

/// Money above both account minimums after known expenses, floored at zero.
///
/// The two accounts pool: a shortfall in one is absorbed by the other.
pub fn calculate_overage(
    checking_balance: f64,
    savings_balance: f64,
    minimums: &AccountMinimums,
    known_upcoming_expenses: f64,
) -> f64 {
    let checking_overage = checking_balance - minimums.checking_minimum;
    let savings_overage = savings_balance - minimums.savings_minimum;
    (checking_overage + savings_overage - known_upcoming_expenses).max(0.0)
}

/// Half a month of budgeted spending plus debt minimums
pub fn biweekly_known_expenses(monthly_budget_total: f64, total_minimum_payments: f64) -> f64 {
    (monthly_budget_total + total_minimum_payments) / 2.0
}

/// Rough checking balance at month end: two paychecks in, two rounds of
/// auto-pays out, irregular expenses once, and the monthly budget.
pub fn month_end_estimate(snapshot: &LiquiditySnapshot, monthly_budget_total: f64) -> f64 {
    snapshot.checking_balance + snapshot.upcoming_paycheck_amount * 2.0
        - snapshot.auto_pay_total() * 2.0
        - snapshot.irregular_total()
        - monthly_budget_total
}

/// Bundled liquidity figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiquidityReport {
    pub safe_to_spend: f64,
    pub overage: f64,
    pub status: CashFlowStatus,
    pub month_end_estimate: f64,
}

impl LiquidityReport {
    /// Compute all figures with the default status policy
    pub fn build(
        snapshot: &LiquiditySnapshot,
        minimums: &AccountMinimums,
        known_upcoming_expenses: f64,
        monthly_budget_total: f64,
    ) -> Self {
        Self::build_with_policy(
            snapshot,
            minimums,
            known_upcoming_expenses,
            monthly_budget_total,
            &HalfCheckingPolicy,
        )
    }

    pub fn build_with_policy<P: StatusPolicy + ?Sized>(
        snapshot: &LiquiditySnapshot,
        minimums: &AccountMinimums,
        known_upcoming_expenses: f64,
        monthly_budget_total: f64,
        policy: &P,
    ) -> Self {
        let safe = safe_to_spend(snapshot);
        Self {
            safe_to_spend: safe,
            overage: calculate_overage(
                snapshot.checking_balance,
                snapshot.savings_balance,
                minimums,
                known_upcoming_expenses,
            ),
            status: policy.classify(safe, snapshot.checking_balance),
            month_end_estimate: month_end_estimate(snapshot, monthly_budget_total),
        }
    }
}
