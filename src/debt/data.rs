//! Debt records as supplied by the debt-management layer

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A single liability snapshot
///
/// Missing numeric fields deserialize as zero so that partially filled
/// records coming from forms are still usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Stable identifier, used by custom orderings
    #[serde(default)]
    pub id: String,

    /// Display label
    #[serde(default)]
    pub name: String,

    /// Outstanding balance (0 = paid off)
    #[serde(default)]
    pub balance: f64,

    /// Required monthly minimum payment
    #[serde(default)]
    pub min_payment: f64,

    /// APR as a percentage (18.74 = 18.74%/yr)
    #[serde(default)]
    pub interest_rate: f64,

    /// End of a 0% promotional period, if any
    #[serde(default)]
    pub promo_end: Option<NaiveDate>,
}

impl Debt {
    /// Create a debt with no promotional period
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        balance: f64,
        min_payment: f64,
        interest_rate: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance,
            min_payment,
            interest_rate,
            promo_end: None,
        }
    }

    /// Attach a promotional end date
    pub fn with_promo_end(mut self, promo_end: NaiveDate) -> Self {
        self.promo_end = Some(promo_end);
        self
    }

    /// Monthly periodic rate as a fraction (APR / 100 / 12)
    pub fn monthly_rate(&self) -> f64 {
        self.interest_rate / 100.0 / 12.0
    }

    /// Debts with a zero balance are settled and excluded from all computations
    pub fn is_active(&self) -> bool {
        self.balance > 0.0
    }

    pub fn is_zero_rate(&self) -> bool {
        self.interest_rate == 0.0
    }

    /// Whether a 0% promo has lapsed as of `today`
    ///
    /// Post-promo rates are not modeled; this only detects the expiry.
    pub fn promo_expired(&self, today: NaiveDate) -> bool {
        self.is_zero_rate() && self.promo_end.is_some_and(|end| end <= today)
    }

    /// Reject negative or non-finite amounts
    pub fn validate(&self) -> Result<(), EngineError> {
        for (field, value) in [
            ("balance", self.balance),
            ("min_payment", self.min_payment),
            ("interest_rate", self.interest_rate),
        ] {
            if !value.is_finite() {
                return Err(EngineError::NonFinite {
                    field: format!("debt {} {}", self.id, field),
                });
            }
        }

        if self.balance < 0.0 {
            return Err(EngineError::NegativeBalance {
                id: self.id.clone(),
                balance: self.balance,
            });
        }
        if self.min_payment < 0.0 {
            return Err(EngineError::NegativeMinPayment {
                id: self.id.clone(),
                min_payment: self.min_payment,
            });
        }
        if self.interest_rate < 0.0 {
            return Err(EngineError::NegativeRate {
                id: self.id.clone(),
                apr: self.interest_rate,
            });
        }

        Ok(())
    }
}

/// Validate every debt in a list, stopping at the first failure
pub fn validate_debts(debts: &[Debt]) -> Result<(), EngineError> {
    debts.iter().try_for_each(Debt::validate)
}
