//! Typed finance-state document
//!
//! Every optional field is resolved to its default once, at load time, so
//! the engine only ever sees complete values.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::debt::{validate_debts, Debt};
use crate::error::LoadError;
use crate::liquidity::{AccountMinimums, DEFAULT_EMERGENCY_BUFFER};
use crate::payoff::StrategyConfig;

/// Paycheck anchor used when the document has none
pub fn default_paycheck_anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 14).unwrap_or_default()
}

fn default_emergency_buffer() -> f64 {
    DEFAULT_EMERGENCY_BUFFER
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayFrequency {
    #[default]
    Biweekly,
    Monthly,
}

/// Take-home pay details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeConfig {
    pub pay_frequency: PayFrequency,
    pub average_net_per_check: f64,
    pub monthly_take_home_estimate: f64,

    /// Any known payday; anchors the biweekly cycle
    pub last_paycheck_date: NaiveDate,
}

impl Default for IncomeConfig {
    fn default() -> Self {
        Self {
            pay_frequency: PayFrequency::default(),
            average_net_per_check: 0.0,
            monthly_take_home_estimate: 0.0,
            last_paycheck_date: default_paycheck_anchor(),
        }
    }
}

/// Monthly budget: free-form categories plus the pooled extra debt payment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Extra monthly amount poured into the payoff waterfall
    #[serde(default)]
    pub debt_snowball_extra: f64,

    #[serde(flatten)]
    pub categories: BTreeMap<String, f64>,
}

impl BudgetConfig {
    /// Sum of all categories, the extra payment included
    pub fn monthly_total(&self) -> f64 {
        self.categories.values().sum::<f64>() + self.debt_snowball_extra
    }
}

/// Property record as stored; older documents only carry `mortgage_balance`
#[derive(Debug, Deserialize)]
struct PropertyRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    estimated_value: f64,
    primary_mortgage: Option<f64>,
    heloc_balance: Option<f64>,
    mortgage_balance: Option<f64>,
}

/// Real-estate holding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PropertyRecord")]
pub struct Property {
    pub name: String,
    pub estimated_value: f64,
    pub primary_mortgage: f64,
    pub heloc_balance: f64,
}

impl From<PropertyRecord> for Property {
    fn from(record: PropertyRecord) -> Self {
        // Legacy records put all secured debt in mortgage_balance
        let primary_mortgage = record
            .primary_mortgage
            .or(record.mortgage_balance)
            .unwrap_or(0.0);
        let heloc_balance = if record.primary_mortgage.is_some() {
            record.heloc_balance.unwrap_or(0.0)
        } else {
            0.0
        };

        Self {
            name: record.name,
            estimated_value: record.estimated_value,
            primary_mortgage,
            heloc_balance,
        }
    }
}

impl Property {
    pub fn mortgage_balance(&self) -> f64 {
        self.primary_mortgage + self.heloc_balance
    }

    pub fn equity(&self) -> f64 {
        self.estimated_value - self.mortgage_balance()
    }
}

/// The whole planner document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceConfig {
    #[serde(default)]
    pub income: IncomeConfig,

    #[serde(default)]
    pub budget: BudgetConfig,

    #[serde(default)]
    pub debts: Vec<Debt>,

    #[serde(default)]
    pub properties: Vec<Property>,

    #[serde(default, alias = "retirementAccounts")]
    pub retirement_accounts: BTreeMap<String, f64>,

    #[serde(default, alias = "accountMinimums")]
    pub accounts: AccountMinimums,

    #[serde(default = "default_emergency_buffer")]
    pub emergency_buffer_target: f64,

    #[serde(default, alias = "debtStrategy")]
    pub strategy: StrategyConfig,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            income: IncomeConfig::default(),
            budget: BudgetConfig::default(),
            debts: Vec::new(),
            properties: Vec::new(),
            retirement_accounts: BTreeMap::new(),
            accounts: AccountMinimums::default(),
            emergency_buffer_target: DEFAULT_EMERGENCY_BUFFER,
            strategy: StrategyConfig::default(),
        }
    }
}

impl FinanceConfig {
    /// Load and resolve a JSON document from disk
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse and resolve a JSON document
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        let mut config: FinanceConfig = serde_json::from_str(text)?;
        config.assign_missing_ids();
        validate_debts(&config.debts)?;
        log::debug!(
            "loaded finance config: {} debts, {} properties",
            config.debts.len(),
            config.properties.len()
        );
        Ok(config)
    }

    /// Pooled monthly extra for the payoff waterfall
    pub fn monthly_extra(&self) -> f64 {
        self.budget.debt_snowball_extra
    }

    /// Debts without an id get a positional one so custom orders can name them
    fn assign_missing_ids(&mut self) {
        for (index, debt) in self.debts.iter_mut().enumerate() {
            if debt.id.trim().is_empty() {
                debt.id = format!("debt-{}", index + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payoff::Strategy;

    const DOCUMENT: &str = r#"{
        "income": { "average_net_per_check": 3800, "last_paycheck_date": "2025-12-12" },
        "budget": { "groceries": 900, "utilities": 300, "debt_snowball_extra": 250 },
        "debts": [
            { "id": "card", "name": "Card", "balance": 2500, "min_payment": 80, "interest_rate": 19.9 },
            { "name": "Promo", "balance": 1200, "min_payment": 50, "promo_end": "2026-04-01" }
        ],
        "properties": [
            { "name": "Home", "estimated_value": 600000, "primary_mortgage": 345000, "heloc_balance": 148700 },
            { "name": "Rental", "estimated_value": 300000, "mortgage_balance": 210000 }
        ],
        "retirementAccounts": { "roth_ira": 40000, "four_oh_one_k": 120000 },
        "accountMinimums": { "checking_minimum": 4000 },
        "debtStrategy": { "strategy": "avalanche" }
    }"#;

    #[test]
    fn test_document_resolves_defaults() {
        let config = FinanceConfig::from_json_str(DOCUMENT).unwrap();

        assert_eq!(config.income.pay_frequency, PayFrequency::Biweekly);
        let anchor = NaiveDate::from_ymd_opt(2025, 12, 12).unwrap();
        assert_eq!(config.income.last_paycheck_date, anchor);
        assert_eq!(config.monthly_extra(), 250.0);
        assert!((config.budget.monthly_total() - 1_450.0).abs() < 1e-9);

        assert_eq!(config.debts[1].id, "debt-2");
        assert_eq!(config.debts[1].interest_rate, 0.0);

        assert_eq!(config.accounts.checking_minimum, 4_000.0);
        assert_eq!(config.accounts.savings_minimum, 3_500.0);
        assert_eq!(config.emergency_buffer_target, DEFAULT_EMERGENCY_BUFFER);
        assert_eq!(config.strategy.strategy, Strategy::Avalanche);
        assert_eq!(config.retirement_accounts.len(), 2);
    }

    #[test]
    fn test_property_migration() {
        let config = FinanceConfig::from_json_str(DOCUMENT).unwrap();

        let home = &config.properties[0];
        assert!((home.mortgage_balance() - 493_700.0).abs() < 1e-9);
        assert!((home.equity() - 106_300.0).abs() < 1e-9);

        let rental = &config.properties[1];
        assert_eq!(rental.primary_mortgage, 210_000.0);
        assert_eq!(rental.heloc_balance, 0.0);
        assert!((rental.equity() - 90_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_document() {
        let config = FinanceConfig::from_json_str("{}").unwrap();
        assert_eq!(config, FinanceConfig::default());
        assert_eq!(config.income.last_paycheck_date, default_paycheck_anchor());
    }

    #[test]
    fn test_invalid_debt_rejected() {
        let document = r#"{"debts": [{"id": "x", "balance": -5}]}"#;
        let err = FinanceConfig::from_json_str(document).unwrap_err();
        assert!(matches!(err, LoadError::Invalid(_)));
    }
}
