//! Last-input memoization for payoff plans
//!
//! Screens re-render far more often than the debt list or the extra payment
//! change. The memo keeps the inputs of the last solve next to its plan and
//! only re-plans when one of them differs.

use chrono::NaiveDate;

use crate::debt::Debt;
use crate::error::EngineError;
use crate::payoff::{plan_payoff, PayoffPlan, PayoffProjector, StrategyConfig};

/// Inputs captured at solve time, used to validate the cache
#[derive(Debug, Clone, PartialEq)]
struct PlanKey {
    debts: Vec<Debt>,
    strategy: StrategyConfig,
    monthly_extra: f64,
    start_date: NaiveDate,
}

impl PlanKey {
    fn matches(
        &self,
        debts: &[Debt],
        strategy: &StrategyConfig,
        monthly_extra: f64,
        start_date: NaiveDate,
    ) -> bool {
        self.monthly_extra == monthly_extra
            && self.start_date == start_date
            && self.strategy == *strategy
            && self.debts == debts
    }
}

/// Caches the most recent plan keyed by its inputs
#[derive(Debug, Clone, Default)]
pub struct PlannerMemo {
    projector: PayoffProjector,
    cached: Option<(PlanKey, PayoffPlan)>,
    hits: u64,
    misses: u64,
}

impl PlannerMemo {
    pub fn new(projector: PayoffProjector) -> Self {
        Self {
            projector,
            ..Self::default()
        }
    }

    /// Return the cached plan if the inputs are unchanged, otherwise re-plan
    pub fn plan(
        &mut self,
        debts: &[Debt],
        strategy: &StrategyConfig,
        monthly_extra: f64,
        start_date: NaiveDate,
    ) -> Result<&PayoffPlan, EngineError> {
        let entry = match self.cached.take() {
            Some((key, plan)) if key.matches(debts, strategy, monthly_extra, start_date) => {
                self.hits += 1;
                (key, plan)
            }
            previous => {
                let plan =
                    match plan_payoff(debts, strategy, monthly_extra, start_date, &self.projector) {
                        Ok(plan) => plan,
                        Err(err) => {
                            self.cached = previous;
                            return Err(err);
                        }
                    };
                self.misses += 1;
                let key = PlanKey {
                    debts: debts.to_vec(),
                    strategy: strategy.clone(),
                    monthly_extra,
                    start_date,
                };
                (key, plan)
            }
        };

        Ok(&self.cached.insert(entry).1)
    }

    /// Drop the cached plan
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// (hits, misses)
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payoff::Strategy;

    fn debts() -> Vec<Debt> {
        vec![
            Debt::new("a", "Card", 2_500.0, 80.0, 19.9),
            Debt::new("b", "Loan", 6_000.0, 150.0, 8.5),
        ]
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn test_memo_reuses_plan() {
        let mut memo = PlannerMemo::default();
        let strategy = StrategyConfig::default();

        let first = memo.plan(&debts(), &strategy, 200.0, start()).unwrap().debt_free_months();
        let second = memo.plan(&debts(), &strategy, 200.0, start()).unwrap().debt_free_months();

        assert_eq!(first, second);
        assert_eq!(memo.stats(), (1, 1));
    }

    #[test]
    fn test_memo_recomputes_on_change() {
        let mut memo = PlannerMemo::default();
        let strategy = StrategyConfig::default();

        let slow = memo.plan(&debts(), &strategy, 0.0, start()).unwrap().debt_free_months();
        let fast = memo.plan(&debts(), &strategy, 500.0, start()).unwrap().debt_free_months();
        assert!(fast < slow);

        let mut edited = debts();
        edited[0].balance = 100.0;
        memo.plan(&edited, &strategy, 500.0, start()).unwrap();

        memo.plan(&edited, &StrategyConfig::new(Strategy::Avalanche), 500.0, start())
            .unwrap();
        assert_eq!(memo.stats(), (0, 4));
    }

    #[test]
    fn test_invalidate_and_errors() {
        let mut memo = PlannerMemo::default();
        let strategy = StrategyConfig::default();

        memo.plan(&debts(), &strategy, 100.0, start()).unwrap();
        memo.invalidate();
        memo.plan(&debts(), &strategy, 100.0, start()).unwrap();
        assert_eq!(memo.stats(), (0, 2));

        assert!(memo.plan(&debts(), &strategy, -1.0, start()).is_err());
        // A failed solve leaves the previous plan in place
        memo.plan(&debts(), &strategy, 100.0, start()).unwrap();
        assert_eq!(memo.stats(), (1, 2));
    }
}
