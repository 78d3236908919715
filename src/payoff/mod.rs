//! Debt payoff engine: amortization, ordering, and waterfall projection

mod amortization;
mod planner;
mod projector;
mod state;
mod strategy;
mod timeline;

pub use amortization::{amortize, amortize_debts, AmortizedDebt, Payoff, MAX_PAYOFF_MONTHS};
pub use planner::{plan_payoff, validate_extra, PayoffPlan};
pub use projector::{CascadeModel, PayoffProjector, ProjectorConfig};
pub use state::DebtState;
pub use strategy::{baseline_cmp, order_debts, Strategy, StrategyConfig};
pub use timeline::{
    add_months, CascadeStep, PayoffProjection, PayoffTimelineEntry, ProjectionSummary,
};
