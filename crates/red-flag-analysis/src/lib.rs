pub mod aggregator;
pub mod checks;
pub mod comparator;
pub mod extractor;


pub use aggregator::aggregate;
pub use comparator::{latest_quarters, yoy, YearOverYear};
pub use extractor::{extract, extract_metric, MetricSeries};

use analysis_core::{
    AnalysisResult, CanonicalMetric, Finding, RawFacts, RedFlag, Thresholds, DEFAULT_THRESHOLDS,
};
use std::collections::BTreeMap;

/// Quarters considered by the negative cash flow check
const CASH_FLOW_QUARTERS: usize = 4;

/// Runs the red-flag checks over one company's facts.
///
/// Holds only borrowed, read-only state; every call recomputes from the raw facts.
pub struct RedFlagAnalyzer<'a> {
    facts: &'a RawFacts,
    thresholds: &'a Thresholds,
}

impl<'a> RedFlagAnalyzer<'a> {
    pub fn new(facts: &'a RawFacts) -> Self {
        Self::with_thresholds(facts, &DEFAULT_THRESHOLDS)
    }

    pub fn with_thresholds(facts: &'a RawFacts, thresholds: &'a Thresholds) -> Self {
        Self { facts, thresholds }
    }

    fn yoy(&self, metric: CanonicalMetric) -> YearOverYear {
        yoy(&extract_metric(self.facts, metric))
    }

    pub fn check_revenue_decline(&self) -> Finding {
        checks::revenue_decline(
            self.yoy(CanonicalMetric::Revenues),
            &self.thresholds.revenue_decline,
        )
    }

    pub fn check_margin_compression(&self) -> Finding {
        checks::margin_compression(
            self.yoy(CanonicalMetric::Revenues),
            self.yoy(CanonicalMetric::OperatingIncome),
            &self.thresholds.margin_compression,
        )
    }

    pub fn check_debt_explosion(&self) -> Finding {
        checks::debt_explosion(
            self.yoy(CanonicalMetric::LongTermDebt),
            self.yoy(CanonicalMetric::CurrentDebt),
            &self.thresholds.debt_explosion,
        )
    }

    pub fn check_negative_cash_flow(&self) -> Finding {
        let series = extract_metric(self.facts, CanonicalMetric::OperatingCashFlow);
        checks::negative_cash_flow(
            &latest_quarters(&series, CASH_FLOW_QUARTERS),
            &self.thresholds.negative_cash_flow,
        )
    }

    pub fn check_liquidity_deterioration(&self) -> Finding {
        checks::liquidity_deterioration(
            self.yoy(CanonicalMetric::CurrentAssets),
            self.yoy(CanonicalMetric::CurrentLiabilities),
            &self.thresholds.liquidity_deterioration,
        )
    }

    pub fn check(&self, flag: RedFlag) -> Finding {
        match flag {
            RedFlag::RevenueDecline => self.check_revenue_decline(),
            RedFlag::MarginCompression => self.check_margin_compression(),
            RedFlag::DebtExplosion => self.check_debt_explosion(),
            RedFlag::NegativeCashFlow => self.check_negative_cash_flow(),
            RedFlag::LiquidityDeterioration => self.check_liquidity_deterioration(),
        }
    }

    /// Run all five checks and aggregate them.
    ///
    /// `requested_id` is used as the entity id when the facts do not carry a CIK.
    pub fn analyze_all(&self, requested_id: &str) -> AnalysisResult {
        let findings: BTreeMap<RedFlag, Finding> = RedFlag::ALL
            .into_iter()
            .map(|flag| (flag, self.check(flag)))
            .collect();

        let (overall_assessment, summary) = aggregate(findings.values());

        tracing::debug!(
            "{}: {} red, {} yellow, {} green -> {}",
            self.facts.entity_name(),
            summary.red_count,
            summary.yellow_count,
            summary.green_count,
            overall_assessment.to_label()
        );

        AnalysisResult {
            entity_name: self.facts.entity_name().to_string(),
            entity_id: self
                .facts
                .entity_id()
                .unwrap_or_else(|| analysis_core::pad_cik(requested_id)),
            findings,
            overall_assessment,
            summary,
        }
    }
}
