//! Portfolio totals and net worth

use serde::Serialize;

use crate::config::{BudgetConfig, FinanceConfig, Property};
use crate::debt::Debt;

pub fn total_debt_balance(debts: &[Debt]) -> f64 {
    debts.iter().map(|d| d.balance).sum()
}

pub fn total_minimum_payments(debts: &[Debt]) -> f64 {
    debts.iter().map(|d| d.min_payment).sum()
}

pub fn total_monthly_budget(budget: &BudgetConfig) -> f64 {
    budget.monthly_total()
}

pub fn total_property_value(properties: &[Property]) -> f64 {
    properties.iter().map(|p| p.estimated_value).sum()
}

pub fn total_mortgage_balance(properties: &[Property]) -> f64 {
    properties.iter().map(Property::mortgage_balance).sum()
}

pub fn total_property_equity(properties: &[Property]) -> f64 {
    properties.iter().map(Property::equity).sum()
}

/// Cash + savings + retirement + property equity - unsecured debt
pub fn net_worth(
    checking_balance: f64,
    savings_balance: f64,
    retirement_total: f64,
    property_equity: f64,
    total_debt: f64,
) -> f64 {
    checking_balance + savings_balance + retirement_total + property_equity - total_debt
}

/// Household balance sheet at a glance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_debt: f64,
    pub total_minimum_payments: f64,
    pub monthly_budget: f64,
    pub property_value: f64,
    pub mortgage_balance: f64,
    pub property_equity: f64,
    pub retirement_total: f64,
    pub net_worth: f64,
}

impl PortfolioSummary {
    /// Summarize a finance document given current cash balances
    pub fn from_config(
        config: &FinanceConfig,
        checking_balance: f64,
        savings_balance: f64,
    ) -> Self {
        let total_debt = total_debt_balance(&config.debts);
        let property_equity = total_property_equity(&config.properties);
        let retirement_total: f64 = config.retirement_accounts.values().sum();

        Self {
            total_debt,
            total_minimum_payments: total_minimum_payments(&config.debts),
            monthly_budget: total_monthly_budget(&config.budget),
            property_value: total_property_value(&config.properties),
            mortgage_balance: total_mortgage_balance(&config.properties),
            property_equity,
            retirement_total,
            net_worth: net_worth(
                checking_balance,
                savings_balance,
                retirement_total,
                property_equity,
                total_debt,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_net_worth() {
        assert_relative_eq!(net_worth(6_000.0, 4_000.0, 160_000.0, 196_300.0, 20_000.0), 346_300.0);
    }

    #[test]
    fn test_summary_from_config() {
        let mut config = FinanceConfig::default();
        config.debts = vec![
            Debt::new("a", "Card", 2_500.0, 80.0, 19.9),
            Debt::new("b", "Promo", 1_200.0, 50.0, 0.0),
        ];
        config.properties = vec![Property {
            name: "Home".into(),
            estimated_value: 600_000.0,
            primary_mortgage: 345_000.0,
            heloc_balance: 148_700.0,
        }];
        config.retirement_accounts.insert("roth_ira".into(), 40_000.0);
        config.budget.categories.insert("groceries".into(), 900.0);
        config.budget.debt_snowball_extra = 250.0;

        let summary = PortfolioSummary::from_config(&config, 6_000.0, 4_000.0);
        assert_relative_eq!(summary.total_debt, 3_700.0);
        assert_relative_eq!(summary.total_minimum_payments, 130.0);
        assert_relative_eq!(summary.monthly_budget, 1_150.0);
        assert_relative_eq!(summary.mortgage_balance, 493_700.0);
        assert_relative_eq!(summary.property_equity, 106_300.0);
        assert_relative_eq!(summary.net_worth, 6_000.0 + 4_000.0 + 40_000.0 + 106_300.0 - 3_700.0);
    }
}
