//! Single-debt amortization under a fixed monthly payment

use serde::{Deserialize, Serialize};

use crate::debt::Debt;

/// Hard cap on any payoff horizon (30 years)
pub const MAX_PAYOFF_MONTHS: u32 = 360;

/// Outcome of amortizing one balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payoff {
    /// The balance clears after `months` payments
    Converges { months: u32, interest: f64 },

    /// The payment never covers accruing interest.
    ///
    /// `interest_estimate` is the interest on the starting balance held for
    /// the full cap, not an exact projection.
    NonConvergent { interest_estimate: f64 },
}

impl Payoff {
    /// Months to payoff, with the cap standing in for "never"
    pub fn months(&self) -> u32 {
        match self {
            Payoff::Converges { months, .. } => *months,
            Payoff::NonConvergent { .. } => MAX_PAYOFF_MONTHS,
        }
    }

    /// Interest cost (an estimate when non-convergent)
    pub fn interest(&self) -> f64 {
        match self {
            Payoff::Converges { interest, .. } => *interest,
            Payoff::NonConvergent { interest_estimate } => *interest_estimate,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, Payoff::Converges { .. })
    }
}

/// Compute months-to-payoff and interest cost for one balance.
///
/// # Arguments
/// * `balance` - Starting balance (>= 0)
/// * `monthly_payment` - Fixed payment applied every month (>= 0)
/// * `monthly_rate` - Periodic rate as a fraction (APR / 100 / 12, >= 0)
///
/// The closed-form annuity formula gives the month count; interest is then
/// simulated for exactly that many months so the final partial month matches
/// the multi-debt projector.
pub fn amortize(balance: f64, monthly_payment: f64, monthly_rate: f64) -> Payoff {
    if balance <= 0.0 {
        return Payoff::Converges { months: 0, interest: 0.0 };
    }

    if monthly_rate == 0.0 {
        // Payment floor of 1 keeps a $0 minimum from dividing by zero
        let months = (balance / monthly_payment.max(1.0)).ceil();
        return Payoff::Converges {
            months: months as u32,
            interest: 0.0,
        };
    }

    let monthly_interest = balance * monthly_rate;
    if monthly_payment <= monthly_interest {
        return Payoff::NonConvergent {
            interest_estimate: monthly_interest * MAX_PAYOFF_MONTHS as f64,
        };
    }

    let months = ((monthly_payment / (monthly_payment - monthly_interest)).ln()
        / (1.0 + monthly_rate).ln())
    .ceil()
    .max(0.0) as u32;

    let mut remaining = balance;
    let mut interest = 0.0;
    for _ in 0..months {
        let accrued = remaining * monthly_rate;
        interest += accrued;
        remaining += accrued - monthly_payment;
    }

    Payoff::Converges {
        months,
        interest: interest.max(0.0),
    }
}

/// A debt together with its isolated amortization result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizedDebt {
    pub debt: Debt,

    /// Payment assumed for the isolated result (minimum + pooled extra)
    pub monthly_payment: f64,

    pub payoff: Payoff,

    /// Balance plus interest cost
    pub total_payment_needed: f64,
}

impl AmortizedDebt {
    /// Amortize `debt` alone, paying its minimum plus `monthly_extra` each month
    pub fn new(debt: Debt, monthly_extra: f64) -> Self {
        let monthly_payment = debt.min_payment + monthly_extra;
        let payoff = amortize(debt.balance, monthly_payment, debt.monthly_rate());
        if !payoff.is_converged() {
            log::warn!(
                "debt {} ({}) does not converge: payment {:.2} <= monthly interest {:.2}",
                debt.id,
                debt.name,
                monthly_payment,
                debt.balance * debt.monthly_rate(),
            );
        }
        let total_payment_needed = debt.balance + payoff.interest();

        Self {
            debt,
            monthly_payment,
            payoff,
            total_payment_needed,
        }
    }
}

/// Amortize every active debt in isolation, preserving input order
pub fn amortize_debts(debts: &[Debt], monthly_extra: f64) -> Vec<AmortizedDebt> {
    debts
        .iter()
        .filter(|d| d.is_active())
        .map(|d| AmortizedDebt::new(d.clone(), monthly_extra))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    #[test]
    fn test_zero_rate_scenario() {
        // 1000 at 0% paying 100 -> 10 months, no interest
        let payoff = amortize(1000.0, 100.0, 0.0);
        assert_eq!(payoff, Payoff::Converges { months: 10, interest: 0.0 });
    }

    #[test]
    fn test_zero_rate_zero_payment_uses_floor() {
        let payoff = amortize(250.5, 0.0, 0.0);
        assert_eq!(payoff.months(), 251);
        assert_eq!(payoff.interest(), 0.0);
    }

    #[test]
    fn test_zero_balance() {
        assert_eq!(amortize(0.0, 0.0, 0.02).months(), 0);
    }

    #[test]
    fn test_non_convergent_sentinel() {
        // 10,000 at 24% APR accrues 200/month; a 150 payment never catches up
        let payoff = amortize(10_000.0, 150.0, 0.02);
        assert!(!payoff.is_converged());
        assert_eq!(payoff.months(), MAX_PAYOFF_MONTHS);
        assert_abs_diff_eq!(payoff.interest(), 200.0 * 360.0, epsilon = 1e-9);

        // Payment exactly equal to interest is still non-convergent
        assert!(!amortize(10_000.0, 200.0, 0.02).is_converged());
    }

    #[test]
    fn test_standard_amortization() {
        // 10,000 at 12% APR, 500/month: 23 payments (last one partial)
        let payoff = amortize(10_000.0, 500.0, 0.01);
        assert_eq!(payoff.months(), 23);

        // Interest is accrued month by month over exactly 23 months
        let mut balance = 10_000.0;
        let mut expected = 0.0;
        for _ in 0..23 {
            let accrued = balance * 0.01;
            expected += accrued;
            balance += accrued - 500.0;
        }
        assert_abs_diff_eq!(payoff.interest(), expected, epsilon = 1e-9);
        assert!(payoff.interest() > 1_100.0 && payoff.interest() < 1_300.0);
    }

    #[test]
    fn test_amortize_debts_skips_settled() {
        let debts = vec![
            Debt::new("a", "Paid", 0.0, 25.0, 10.0),
            Debt::new("b", "Open", 600.0, 50.0, 0.0),
        ];
        let results = amortize_debts(&debts, 50.0);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].debt.id, "b");
        assert_eq!(results[0].monthly_payment, 100.0);
        assert_eq!(results[0].payoff.months(), 6);
        assert_abs_diff_eq!(results[0].total_payment_needed, 600.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_zero_rate_is_exact(balance in 0u32..1_000_000, payment in 1u32..50_000) {
            let balance = balance as f64 / 100.0;
            let payment = payment as f64 / 10.0;
            let payoff = amortize(balance, payment.max(1.0), 0.0);
            prop_assert_eq!(payoff.months(), (balance / payment.max(1.0)).ceil() as u32);
            prop_assert_eq!(payoff.interest(), 0.0);
        }

        #[test]
        fn prop_convergent_payoff_clears_balance(
            balance in 100u32..50_000,
            apr_bp in 1u32..3_000,
            cover_pct in 101u32..400,
        ) {
            let balance = balance as f64;
            let rate = apr_bp as f64 / 100.0 / 100.0 / 12.0;
            let payment = balance * rate * cover_pct as f64 / 100.0 + 10.0;
            let payoff = amortize(balance, payment, rate);
            prop_assert!(payoff.is_converged());
            prop_assert!(payoff.interest() >= 0.0);

            // Balance is cleared after the reported number of months
            let months = payoff.months();
            let mut remaining = balance;
            for _ in 0..months {
                remaining += remaining * rate - payment;
            }
            prop_assert!(remaining <= 1e-3);
        }
    }
}
