//! Scenario runner for strategy comparisons and what-if projections
//!
//! Holds one validated debt snapshot and re-plans it under different
//! strategies or extra-payment amounts. Independent runs are evaluated in
//! parallel.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::FinanceConfig;
use crate::debt::{validate_debts, Debt};
use crate::error::EngineError;
use crate::payoff::{
    order_debts, plan_payoff, validate_extra, PayoffPlan, PayoffProjector, ProjectionSummary,
    ProjectorConfig, Strategy, StrategyConfig,
};

/// Projection summary for one strategy
#[derive(Debug, Clone, Serialize)]
pub struct StrategyOutcome {
    pub strategy: Strategy,
    pub summary: ProjectionSummary,
}

/// Base plan versus a plan with more monthly money and/or a windfall
#[derive(Debug, Clone, Serialize)]
pub struct WhatIfResult {
    pub base: ProjectionSummary,
    pub scenario: ProjectionSummary,

    /// Months earlier the scenario becomes debt-free (never negative)
    pub months_saved: u32,

    pub interest_saved: f64,
}

/// Pre-validated runner for batch payoff projections
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    debts: Vec<Debt>,
    strategy: StrategyConfig,
    start_date: NaiveDate,
    projector: PayoffProjector,
}

impl ScenarioRunner {
    /// Create a runner over a debt snapshot with the default projector
    pub fn new(
        debts: Vec<Debt>,
        strategy: StrategyConfig,
        start_date: NaiveDate,
    ) -> Result<Self, EngineError> {
        validate_debts(&debts)?;
        Ok(Self {
            debts,
            strategy,
            start_date,
            projector: PayoffProjector::default(),
        })
    }

    /// Runner over the debts and strategy stored in a finance document
    pub fn from_config(config: &FinanceConfig, start_date: NaiveDate) -> Result<Self, EngineError> {
        Self::new(config.debts.clone(), config.strategy.clone(), start_date)
    }

    /// Use a different projector configuration
    pub fn with_projector(mut self, config: ProjectorConfig) -> Self {
        self.projector = PayoffProjector::new(config);
        self
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn strategy(&self) -> &StrategyConfig {
        &self.strategy
    }

    /// Plan with an explicit strategy
    pub fn run(
        &self,
        strategy: &StrategyConfig,
        monthly_extra: f64,
    ) -> Result<PayoffPlan, EngineError> {
        plan_payoff(&self.debts, strategy, monthly_extra, self.start_date, &self.projector)
    }

    /// Plan with the runner's configured strategy
    pub fn run_configured(&self, monthly_extra: f64) -> Result<PayoffPlan, EngineError> {
        self.run(&self.strategy, monthly_extra)
    }

    /// Every strategy side by side. Custom uses the configured order.
    pub fn compare_strategies(
        &self,
        monthly_extra: f64,
    ) -> Result<Vec<StrategyOutcome>, EngineError> {
        let strategies = [
            Strategy::Baseline,
            Strategy::Snowball,
            Strategy::Avalanche,
            Strategy::Custom,
        ];

        strategies
            .par_iter()
            .map(|&strategy| {
                let config = StrategyConfig {
                    strategy,
                    custom_order: self.strategy.custom_order.clone(),
                };
                let plan = self.run(&config, monthly_extra)?;
                Ok(StrategyOutcome {
                    strategy,
                    summary: plan.projection.summary(),
                })
            })
            .collect()
    }

    /// Plans for several extra-payment amounts, in input order
    pub fn sweep_extra(&self, extras: &[f64]) -> Result<Vec<PayoffPlan>, EngineError> {
        extras
            .par_iter()
            .map(|&extra| self.run_configured(extra))
            .collect()
    }

    /// Compare the configured plan against one with `extra_delta` more per
    /// month and a one-time payment applied to debts in priority order first
    pub fn what_if(
        &self,
        base_extra: f64,
        extra_delta: f64,
        one_time_payment: f64,
    ) -> Result<WhatIfResult, EngineError> {
        validate_extra(base_extra + extra_delta)?;
        validate_extra(one_time_payment)?;

        let base = self.run_configured(base_extra)?.projection.summary();

        let adjusted = apply_windfall(&self.debts, &self.strategy, one_time_payment);
        let scenario = plan_payoff(
            &adjusted,
            &self.strategy,
            base_extra + extra_delta,
            self.start_date,
            &self.projector,
        )?
        .projection
        .summary();

        Ok(WhatIfResult {
            months_saved: base.debt_free_months.saturating_sub(scenario.debt_free_months),
            interest_saved: base.total_interest - scenario.total_interest,
            base,
            scenario,
        })
    }
}

/// Reduce balances by `amount`, highest-priority debt first. Input order is kept.
pub fn apply_windfall(debts: &[Debt], strategy: &StrategyConfig, amount: f64) -> Vec<Debt> {
    let priority: Vec<String> = order_debts(debts.iter().collect::<Vec<_>>(), strategy)
        .into_iter()
        .map(|d| d.id.clone())
        .collect();

    let mut adjusted = debts.to_vec();
    let mut remaining = amount.max(0.0);

    for id in priority {
        if remaining <= 0.0 {
            break;
        }
        if let Some(debt) = adjusted.iter_mut().find(|d| d.id == id && d.is_active()) {
            let applied = remaining.min(debt.balance);
            debt.balance -= applied;
            remaining -= applied;
        }
    }

    adjusted
}
