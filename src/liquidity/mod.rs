//! Near-term cash safety: safe-to-spend, overage, status, and paycheck timing

mod calculator;
mod pay_cycle;
mod status;

pub use calculator::{
    biweekly_known_expenses, calculate_overage, month_end_estimate, safe_to_spend,
    AccountMinimums, LiquidityReport, LiquiditySnapshot, ScheduledPayment,
    DEFAULT_EMERGENCY_BUFFER,
};
pub use pay_cycle::{days_until, next_paycheck, next_paycheck_from_today, PAY_CYCLE_DAYS};
pub use status::{cash_flow_status, CashFlowStatus, HalfCheckingPolicy, StatusPolicy};
