//! Payoff ordering policies

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::debt::Debt;
use super::amortization::AmortizedDebt;

/// Which debt gets the pooled extra payment first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Promo debts by expiry, then highest rate, then smallest balance
    Baseline,
    /// Smallest balance first
    #[default]
    Snowball,
    /// Highest APR first
    Avalanche,
    /// User-defined id order
    Custom,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Baseline => "baseline",
            Strategy::Snowball => "snowball",
            Strategy::Avalanche => "avalanche",
            Strategy::Custom => "custom",
        }
    }
}

/// Strategy selection plus the optional user ordering
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StrategyConfig {
    #[serde(default)]
    pub strategy: Strategy,

    /// Debt ids, highest priority first (only used by `Custom`)
    #[serde(default, alias = "customDebtOrder")]
    pub custom_order: Vec<String>,
}

impl StrategyConfig {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            custom_order: Vec::new(),
        }
    }

    pub fn custom<I, S>(order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            strategy: Strategy::Custom,
            custom_order: order.into_iter().map(Into::into).collect(),
        }
    }
}

impl AsRef<Debt> for AmortizedDebt {
    fn as_ref(&self) -> &Debt {
        &self.debt
    }
}

impl AsRef<Debt> for Debt {
    fn as_ref(&self) -> &Debt {
        self
    }
}

/// Compound baseline priority:
/// 1. 0% APR before interest-bearing debts
/// 2. 0% debts by promo end date, undated last
/// 3. Interest-bearing debts by APR descending, then balance ascending
pub fn baseline_cmp(a: &Debt, b: &Debt) -> Ordering {
    match (a.is_zero_rate(), b.is_zero_rate()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => promo_key(a).cmp(&promo_key(b)),
        (false, false) => b
            .interest_rate
            .total_cmp(&a.interest_rate)
            .then_with(|| a.balance.total_cmp(&b.balance)),
    }
}

fn promo_key(debt: &Debt) -> (bool, Option<chrono::NaiveDate>) {
    (debt.promo_end.is_none(), debt.promo_end)
}

/// Order debts for payoff. Settled debts are dropped.
///
/// Snowball and avalanche sort on a single key; ties fall back to the
/// baseline priority. Custom ordering keeps unlisted debts after listed
/// ones in their input order. Sorting is stable throughout.
pub fn order_debts<T: AsRef<Debt>>(items: Vec<T>, config: &StrategyConfig) -> Vec<T> {
    let mut active: Vec<T> = items.into_iter().filter(|d| d.as_ref().is_active()).collect();

    match config.strategy {
        Strategy::Baseline => active.sort_by(|a, b| baseline_cmp(a.as_ref(), b.as_ref())),
        Strategy::Snowball => active.sort_by(|a, b| {
            let (a, b) = (a.as_ref(), b.as_ref());
            a.balance.total_cmp(&b.balance).then_with(|| baseline_cmp(a, b))
        }),
        Strategy::Avalanche => active.sort_by(|a, b| {
            let (a, b) = (a.as_ref(), b.as_ref());
            b.interest_rate
                .total_cmp(&a.interest_rate)
                .then_with(|| baseline_cmp(a, b))
        }),
        Strategy::Custom => {
            let ranks = custom_ranks(&config.custom_order, &active);
            active.sort_by_key(|d| {
                ranks
                    .get(d.as_ref().id.as_str())
                    .copied()
                    .unwrap_or(usize::MAX)
            });
        }
    }

    active
}

/// Build the id -> rank map once. Duplicate ids keep their first rank;
/// ids that match no debt are skipped.
fn custom_ranks<'a, T: AsRef<Debt>>(
    order: &'a [String],
    debts: &[T],
) -> HashMap<&'a str, usize> {
    let known: HashSet<&str> = debts.iter().map(|d| d.as_ref().id.as_str()).collect();
    let mut ranks = HashMap::with_capacity(order.len());

    for id in order {
        if !known.contains(id.as_str()) {
            log::warn!("custom order references unknown or settled debt {}", id);
            continue;
        }
        let next = ranks.len();
        ranks.entry(id.as_str()).or_insert(next);
    }

    ranks
}
