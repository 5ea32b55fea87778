use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Severity assigned by a single red-flag check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Red,
    Yellow,
    Green,
    /// Check could not be computed
    Unknown,
}

impl Severity {
    pub fn to_label(&self) -> &'static str {
        match self {
            Severity::Red => "RED",
            Severity::Yellow => "YELLOW",
            Severity::Green => "GREEN",
            Severity::Unknown => "UNKNOWN",
        }
    }

    /// Colored circle shown next to a finding
    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::Red => "\u{1F534}",
            Severity::Yellow => "\u{1F7E1}",
            Severity::Green => "\u{1F7E2}",
            Severity::Unknown => "\u{26AA}",
        }
    }
}

/// Overall tri-state signal for a company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverallSignal {
    Red,
    Yellow,
    Green,
}

impl OverallSignal {
    pub fn to_label(&self) -> &'static str {
        match self {
            OverallSignal::Red => "RED",
            OverallSignal::Yellow => "YELLOW",
            OverallSignal::Green => "GREEN",
        }
    }
}

impl From<OverallSignal> for Severity {
    fn from(signal: OverallSignal) -> Self {
        match signal {
            OverallSignal::Red => Severity::Red,
            OverallSignal::Yellow => Severity::Yellow,
            OverallSignal::Green => Severity::Green,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingStatus {
    Ok,
    InsufficientData,
}

/// The five red flags, in evaluation and display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedFlag {
    RevenueDecline,
    MarginCompression,
    DebtExplosion,
    NegativeCashFlow,
    LiquidityDeterioration,
}

impl RedFlag {
    pub const ALL: [RedFlag; 5] = [
        RedFlag::RevenueDecline,
        RedFlag::MarginCompression,
        RedFlag::DebtExplosion,
        RedFlag::NegativeCashFlow,
        RedFlag::LiquidityDeterioration,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            RedFlag::RevenueDecline => "Revenue Decline",
            RedFlag::MarginCompression => "Margin Compression",
            RedFlag::DebtExplosion => "Debt Explosion",
            RedFlag::NegativeCashFlow => "Negative Cash Flow",
            RedFlag::LiquidityDeterioration => "Liquidity Deterioration",
        }
    }
}

/// Quantities that produced a finding's severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    PercentChange {
        current: f64,
        previous: f64,
        change_pct: f64,
    },
    MarginChange {
        current_margin: f64,
        previous_margin: f64,
        change_pp: f64,
    },
    NegativeStreak {
        negative_quarters: usize,
        latest_values: Vec<f64>,
    },
    Ratio {
        numerator: f64,
        denominator: f64,
        ratio: f64,
    },
}

/// Outcome of one red-flag check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub status: FindingStatus,
    pub severity: Severity,
    pub message: String,
    /// What was measured, e.g. "Revenue (YoY)"; the analysis area when data is missing
    pub metric: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Evidence>,
}

impl Finding {
    pub fn ok(severity: Severity, message: impl Into<String>, metric: &str, evidence: Evidence) -> Self {
        Self {
            status: FindingStatus::Ok,
            severity,
            message: message.into(),
            metric: metric.to_string(),
            evidence: Some(evidence),
        }
    }

    pub fn insufficient_data(area: &str) -> Self {
        Self {
            status: FindingStatus::InsufficientData,
            severity: Severity::Unknown,
            message: format!("Insufficient data for {} analysis", area),
            metric: area.to_string(),
            evidence: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == FindingStatus::Ok
    }
}

/// Per-severity counts; insufficient-data findings are not counted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveritySummary {
    pub red_count: usize,
    pub yellow_count: usize,
    pub green_count: usize,
}

/// Complete red-flag analysis of one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub entity_name: String,
    pub entity_id: String,
    pub findings: BTreeMap<RedFlag, Finding>,
    pub overall_assessment: OverallSignal,
    pub summary: SeveritySummary,
}

impl AnalysisResult {
    /// Findings in flag order
    pub fn iter_findings(&self) -> impl Iterator<Item = (RedFlag, &Finding)> {
        self.findings.iter().map(|(flag, finding)| (*flag, finding))
    }

    pub fn finding(&self, flag: RedFlag) -> Option<&Finding> {
        self.findings.get(&flag)
    }
}
