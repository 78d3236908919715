//! End-to-end payoff planning: validate, amortize, order, project

use chrono::NaiveDate;
use serde::Serialize;

use crate::debt::{validate_debts, Debt};
use crate::error::EngineError;
use super::amortization::{amortize_debts, AmortizedDebt};
use super::projector::PayoffProjector;
use super::strategy::{order_debts, StrategyConfig};
use super::timeline::PayoffProjection;

/// Everything the debt screen needs for one set of inputs
#[derive(Debug, Clone, Serialize)]
pub struct PayoffPlan {
    pub strategy: StrategyConfig,
    pub monthly_extra: f64,

    /// Active debts in payoff priority, each with its isolated result
    pub ordered: Vec<AmortizedDebt>,

    /// Authoritative cascading projection
    pub projection: PayoffProjection,
}

impl PayoffPlan {
    /// Sum of each debt's isolated interest cost
    pub fn total_isolated_interest(&self) -> f64 {
        self.ordered.iter().map(|d| d.payoff.interest()).sum()
    }

    pub fn total_balance(&self) -> f64 {
        self.ordered.iter().map(|d| d.debt.balance).sum()
    }

    pub fn total_minimums(&self) -> f64 {
        self.ordered.iter().map(|d| d.debt.min_payment).sum()
    }

    /// Combined monthly amount sent to creditors
    pub fn monthly_outlay(&self) -> f64 {
        self.total_minimums() + self.monthly_extra
    }

    pub fn debt_free_date(&self) -> Option<NaiveDate> {
        self.projection.debt_free_date()
    }

    pub fn debt_free_months(&self) -> u32 {
        self.projection.debt_free_months()
    }
}

/// Reject a negative or non-finite extra payment
pub fn validate_extra(monthly_extra: f64) -> Result<(), EngineError> {
    if !monthly_extra.is_finite() {
        return Err(EngineError::NonFinite {
            field: "monthly_extra".to_string(),
        });
    }
    if monthly_extra < 0.0 {
        return Err(EngineError::NegativeExtraPayment(monthly_extra));
    }
    Ok(())
}

/// Build a payoff plan from a debt snapshot. Inputs are never mutated.
pub fn plan_payoff(
    debts: &[Debt],
    strategy: &StrategyConfig,
    monthly_extra: f64,
    start_date: NaiveDate,
    projector: &PayoffProjector,
) -> Result<PayoffPlan, EngineError> {
    validate_debts(debts)?;
    validate_extra(monthly_extra)?;

    let ordered = order_debts(amortize_debts(debts, monthly_extra), strategy);
    let projection = projector.project(&ordered, monthly_extra, start_date);

    log::debug!(
        "planned {} debts with {} strategy, extra {:.2}",
        ordered.len(),
        strategy.strategy.as_str(),
        monthly_extra,
    );

    Ok(PayoffPlan {
        strategy: strategy.clone(),
        monthly_extra,
        ordered,
        projection,
    })
}
