//! Payoff Engine - debt payoff and short-horizon liquidity calculations
//!
//! This library provides:
//! - Isolated amortization of each debt (months and interest to payoff)
//! - Snowball, avalanche, baseline, and custom payoff ordering
//! - Cascading payoff projection with freed-minimum rollover
//! - Safe-to-spend, overage, cash-flow status, and biweekly paycheck timing
//! - Strategy comparison and what-if scenarios

pub mod config;
pub mod debt;
pub mod error;
pub mod liquidity;
pub mod memo;
pub mod payoff;
pub mod scenario;
pub mod summary;

// Re-export commonly used types
pub use config::FinanceConfig;
pub use debt::Debt;
pub use error::{EngineError, LoadError};
pub use liquidity::{CashFlowStatus, LiquidityReport, LiquiditySnapshot};
pub use memo::PlannerMemo;
pub use payoff::{
    plan_payoff, CascadeModel, PayoffPlan, PayoffProjection, PayoffProjector, Strategy,
    StrategyConfig,
};
pub use scenario::ScenarioRunner;
pub use summary::PortfolioSummary;
