//! Cash-flow status classification

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CashFlowStatus {
    Safe,
    Tight,
    Alert,
}

impl CashFlowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CashFlowStatus::Safe => "SAFE",
            CashFlowStatus::Tight => "TIGHT",
            CashFlowStatus::Alert => "ALERT",
        }
    }
}

/// Maps a safe-to-spend figure to a status
pub trait StatusPolicy {
    fn classify(&self, safe_to_spend: f64, checking_balance: f64) -> CashFlowStatus;
}

/// SAFE above half the checking balance, TIGHT above zero, otherwise ALERT.
///
/// Compares a dollar amount with a fraction of a balance; treat it as a
/// heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct HalfCheckingPolicy;

impl StatusPolicy for HalfCheckingPolicy {
    fn classify(&self, safe_to_spend: f64, checking_balance: f64) -> CashFlowStatus {
        if safe_to_spend > checking_balance * 0.5 {
            CashFlowStatus::Safe
        } else if safe_to_spend > 0.0 {
            CashFlowStatus::Tight
        } else {
            CashFlowStatus::Alert
        }
    }
}

/// Classify with the default policy
pub fn cash_flow_status(safe_to_spend: f64, checking_balance: f64) -> CashFlowStatus {
    HalfCheckingPolicy.classify(safe_to_spend, checking_balance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(cash_flow_status(4_100.0, 6_000.0), CashFlowStatus::Safe);
        assert_eq!(cash_flow_status(3_000.0, 6_000.0), CashFlowStatus::Tight);
        assert_eq!(cash_flow_status(0.01, 6_000.0), CashFlowStatus::Tight);
        assert_eq!(cash_flow_status(0.0, 6_000.0), CashFlowStatus::Alert);
    }

    #[test]
    fn test_zero_checking_with_positive_safe_amount() {
        assert_eq!(cash_flow_status(10.0, 0.0), CashFlowStatus::Safe);
    }

    #[test]
    fn test_custom_policy() {
        struct AlwaysAlert;
        impl StatusPolicy for AlwaysAlert {
            fn classify(&self, _: f64, _: f64) -> CashFlowStatus {
                CashFlowStatus::Alert
            }
        }
        assert_eq!(AlwaysAlert.classify(1e9, 0.0), CashFlowStatus::Alert);
        assert_eq!(serde_json::to_string(&CashFlowStatus::Tight).unwrap(), "\"TIGHT\"");
    }
}
