use serde::{Deserialize, Serialize};

/// Financial metrics the red-flag checks are computed from.
///
/// Each metric maps to an ordered list of XBRL concepts. Companies move between
/// equivalent concepts over time (e.g. revenue before and after ASC 606), so the
/// first listed concept is preferred and the rest are fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalMetric {
    Revenues,
    OperatingIncome,
    TotalAssets,
    CurrentAssets,
    CurrentLiabilities,
    LongTermDebt,
    CurrentDebt,
    OperatingCashFlow,
    StockholdersEquity,
}

impl CanonicalMetric {
    pub const ALL: [CanonicalMetric; 9] = [
        CanonicalMetric::Revenues,
        CanonicalMetric::OperatingIncome,
        CanonicalMetric::TotalAssets,
        CanonicalMetric::CurrentAssets,
        CanonicalMetric::CurrentLiabilities,
        CanonicalMetric::LongTermDebt,
        CanonicalMetric::CurrentDebt,
        CanonicalMetric::OperatingCashFlow,
        CanonicalMetric::StockholdersEquity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalMetric::Revenues => "Revenues",
            CanonicalMetric::OperatingIncome => "OperatingIncome",
            CanonicalMetric::TotalAssets => "TotalAssets",
            CanonicalMetric::CurrentAssets => "CurrentAssets",
            CanonicalMetric::CurrentLiabilities => "CurrentLiabilities",
            CanonicalMetric::LongTermDebt => "LongTermDebt",
            CanonicalMetric::CurrentDebt => "CurrentDebt",
            CanonicalMetric::OperatingCashFlow => "OperatingCashFlow",
            CanonicalMetric::StockholdersEquity => "StockholdersEquity",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }

    /// XBRL concepts in preference order
    pub fn concepts(&self) -> &'static [&'static str] {
        match self {
            CanonicalMetric::Revenues => &[
                "RevenueFromContractWithCustomerExcludingAssessedTax", // post-2018 (ASC 606)
                "Revenues",
                "SalesRevenueNet",
                "RevenueFromContractWithCustomerIncludingAssessedTax",
            ],
            CanonicalMetric::OperatingIncome => &[
                "OperatingIncomeLoss",
                "IncomeLossFromContinuingOperationsBeforeIncomeTaxesExtraordinaryItemsNoncontrollingInterest",
            ],
            CanonicalMetric::TotalAssets => &["Assets"],
            CanonicalMetric::CurrentAssets => &["AssetsCurrent"],
            CanonicalMetric::CurrentLiabilities => &["LiabilitiesCurrent"],
            CanonicalMetric::LongTermDebt => &["LongTermDebt", "LongTermDebtNoncurrent", "DebtLongTerm"],
            CanonicalMetric::CurrentDebt => &["LongTermDebtCurrent", "DebtCurrent", "ShortTermBorrowings"],
            CanonicalMetric::OperatingCashFlow => &[
                "NetCashProvidedByUsedInOperatingActivities",
                "CashProvidedByUsedInOperatingActivities",
            ],
            CanonicalMetric::StockholdersEquity => &[
                "StockholdersEquity",
                "StockholdersEquityIncludingPortionAttributableToNoncontrollingInterest",
            ],
        }
    }
}

/// Two-tier cutoff for a continuous quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub red: f64,
    pub yellow: f64,
}

/// Two-tier cutoff for a count of periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTier {
    pub red: usize,
    pub yellow: usize,
}

/// Severity cutoffs for the five checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// YoY revenue change (%), red below -15, yellow below -5
    pub revenue_decline: Tier,
    /// Operating margin change (pp), red below -5, yellow below -2
    pub margin_compression: Tier,
    /// Total debt change (%), red above +50, yellow above +20
    pub debt_explosion: Tier,
    /// Consecutive negative OCF quarters
    pub negative_cash_flow: CountTier,
    /// Current ratio, red below 1.0, yellow below 1.2
    pub liquidity_deterioration: Tier,
}

pub const DEFAULT_THRESHOLDS: Thresholds = Thresholds {
    revenue_decline: Tier { red: -15.0, yellow: -5.0 },
    margin_compression: Tier { red: -5.0, yellow: -2.0 },
    debt_explosion: Tier { red: 50.0, yellow: 20.0 },
    negative_cash_flow: CountTier { red: 3, yellow: 2 },
    liquidity_deterioration: Tier { red: 1.0, yellow: 1.2 },
};

impl Default for Thresholds {
    fn default() -> Self {
        DEFAULT_THRESHOLDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_round_trip() {
        for metric in CanonicalMetric::ALL {
            assert_eq!(CanonicalMetric::from_name(metric.as_str()), Some(metric));
            assert!(!metric.concepts().is_empty());
        }
        assert_eq!(CanonicalMetric::from_name("NetIncomeLoss"), None);
    }

    #[test]
    fn test_revenue_prefers_asc_606_concept() {
        assert_eq!(
            CanonicalMetric::Revenues.concepts()[0],
            "RevenueFromContractWithCustomerExcludingAssessedTax"
        );
    }
}
