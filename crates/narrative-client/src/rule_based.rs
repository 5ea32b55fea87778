use crate::error::NarrativeResult;
use crate::provider::NarrativeGenerator;
use analysis_core::{AnalysisResult, OverallSignal, Severity};
use async_trait::async_trait;

/// Yellow findings quoted when nothing is red
const MAX_WARNINGS_QUOTED: usize = 2;

/// Deterministic narrative built from the findings alone. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedNarrator;

impl RuleBasedNarrator {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, result: &AnalysisResult) -> String {
        let company = &result.entity_name;

        let intro = match result.overall_assessment {
            OverallSignal::Red => format!(
                "{} shows significant signs of financial stress with {} critical indicators.",
                company, result.summary.red_count
            ),
            OverallSignal::Yellow => format!(
                "{} displays some warning signs that warrant close monitoring.",
                company
            ),
            OverallSignal::Green => format!(
                "{} presents healthy financial indicators with no critical stress signals.",
                company
            ),
        };

        let critical = messages_with(result, Severity::Red);
        let warnings = messages_with(result, Severity::Yellow);

        let concerns = if !critical.is_empty() {
            list_paragraph("Key area of concern", "Key areas of concern", &critical)
        } else if !warnings.is_empty() {
            let quoted: Vec<&str> = warnings.into_iter().take(MAX_WARNINGS_QUOTED).collect();
            list_paragraph("Area to monitor", "Areas to monitor", &quoted)
        } else {
            "The company demonstrates stability across key financial metrics.".to_string()
        };

        let recommendation = match result.overall_assessment {
            OverallSignal::Red => {
                "Stakeholders should review the original filings and consider professional in-depth analysis."
            }
            OverallSignal::Yellow => {
                "We recommend monitoring the next quarterly reports to verify trends."
            }
            OverallSignal::Green => {
                "Continue monitoring through regular filings to identify early changes."
            }
        };

        format!("{}\n\n{}\n\n{}", intro, concerns, recommendation)
    }
}

fn messages_with(result: &AnalysisResult, severity: Severity) -> Vec<&str> {
    result
        .iter_findings()
        .filter(|(_, f)| f.severity == severity)
        .map(|(_, f)| f.message.as_str())
        .collect()
}

fn list_paragraph(singular: &str, plural: &str, messages: &[&str]) -> String {
    match messages {
        [only] => format!("{}: {}.", singular, only),
        many => {
            let bullets: Vec<String> = many.iter().map(|m| format!("\u{2022} {}", m)).collect();
            format!("{}:\n{}", plural, bullets.join("\n"))
        }
    }
}

#[async_trait]
impl NarrativeGenerator for RuleBasedNarrator {
    async fn generate(&self, result: &AnalysisResult) -> NarrativeResult<String> {
        Ok(self.render(result))
    }

    fn backend_name(&self) -> &'static str {
        "rule-based"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{Evidence, Finding, RedFlag, SeveritySummary};
    use std::collections::BTreeMap;

    fn finding(severity: Severity, message: &str) -> Finding {
        Finding::ok(
            severity,
            message,
            "Test",
            Evidence::Ratio { numerator: 1.0, denominator: 1.0, ratio: 1.0 },
        )
    }

    fn result(overall: OverallSignal, findings: Vec<(RedFlag, Finding)>) -> AnalysisResult {
        let mut summary = SeveritySummary::default();
        for (_, f) in &findings {
            match f.severity {
                Severity::Red => summary.red_count += 1,
                Severity::Yellow => summary.yellow_count += 1,
                Severity::Green => summary.green_count += 1,
                Severity::Unknown => {}
            }
        }
        AnalysisResult {
            entity_name: "Acme Corp".to_string(),
            entity_id: "0000000001".to_string(),
            findings: findings.into_iter().collect::<BTreeMap<_, _>>(),
            overall_assessment: overall,
            summary,
        }
    }

    #[test]
    fn test_red_lists_every_critical_finding() {
        let r = result(
            OverallSignal::Red,
            vec![
                (RedFlag::RevenueDecline, finding(Severity::Red, "Revenue declined 20.0% YoY")),
                (RedFlag::DebtExplosion, finding(Severity::Red, "Total debt increased 70.0%")),
                (RedFlag::NegativeCashFlow, finding(Severity::Yellow, "2 quarters with negative OCF")),
            ],
        );
        let text = RuleBasedNarrator::new().render(&r);
        assert!(text.starts_with("Acme Corp shows significant signs of financial stress with 2 critical indicators."));
        assert!(text.contains("Key areas of concern:\n\u{2022} Revenue declined 20.0% YoY\n\u{2022} Total debt increased 70.0%"));
        assert!(!text.contains("negative OCF"));
        assert!(text.ends_with("consider professional in-depth analysis."));
    }

    #[test]
    fn test_yellow_quotes_at_most_two_warnings() {
        let r = result(
            OverallSignal::Yellow,
            vec![
                (RedFlag::RevenueDecline, finding(Severity::Yellow, "first")),
                (RedFlag::MarginCompression, finding(Severity::Yellow, "second")),
                (RedFlag::DebtExplosion, finding(Severity::Yellow, "third")),
            ],
        );
        let text = RuleBasedNarrator::new().render(&r);
        assert!(text.contains("Areas to monitor:\n\u{2022} first\n\u{2022} second"));
        assert!(!text.contains("third"));
    }

    #[test]
    fn test_single_red_uses_singular_sentence() {
        let r = result(
            OverallSignal::Yellow,
            vec![(RedFlag::LiquidityDeterioration, finding(Severity::Red, "Current Ratio = 0.90 (< 1.0) - Liquidity risk"))],
        );
        let text = RuleBasedNarrator::new().render(&r);
        assert!(text.contains("Key area of concern: Current Ratio = 0.90 (< 1.0) - Liquidity risk."));
        assert!(text.contains("displays some warning signs"));
    }

    #[test]
    fn test_green_is_stable() {
        let r = result(
            OverallSignal::Green,
            vec![
                (RedFlag::RevenueDecline, finding(Severity::Green, "Revenue grew 4.0% YoY")),
                (RedFlag::DebtExplosion, Finding::insufficient_data("debt")),
            ],
        );
        let text = RuleBasedNarrator::new().render(&r);
        assert!(text.contains("presents healthy financial indicators"));
        assert!(text.contains("demonstrates stability"));
    }
}
