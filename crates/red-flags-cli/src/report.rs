use analysis_core::{Evidence, OverallSignal, Severity};
use analysis_orchestrator::AnalysisReport;
use edgar_client::filings_url;
use std::fmt::Write;

const RULE: &str = "────────────────────────────────────────────────────────";

const DISCLAIMER: &str = "This report flags accounting stress signals computed from public SEC filings. \
It is a transparency tool, NOT investment advice. Verify every finding against the original filings.";

fn signal_caption(signal: OverallSignal) -> &'static str {
    match signal {
        OverallSignal::Red => "Significant financial stress",
        OverallSignal::Yellow => "Warning signs, monitor closely",
        OverallSignal::Green => "No critical stress signals",
    }
}

/// Dollar amount scaled to B/M/K
pub fn format_usd(v: f64) -> String {
    let sign = if v < 0.0 { "-" } else { "" };
    let a = v.abs();
    if a >= 1_000_000_000.0 {
        format!("{}${:.2}B", sign, a / 1_000_000_000.0)
    } else if a >= 1_000_000.0 {
        format!("{}${:.1}M", sign, a / 1_000_000.0)
    } else if a >= 1_000.0 {
        format!("{}${:.1}K", sign, a / 1_000.0)
    } else {
        format!("{}${:.0}", sign, a)
    }
}

pub fn format_evidence(evidence: &Evidence) -> String {
    match evidence {
        Evidence::PercentChange { current, previous, change_pct } => format!(
            "{} vs {} a year earlier ({:+.1}%)",
            format_usd(*current),
            format_usd(*previous),
            change_pct
        ),
        Evidence::MarginChange { current_margin, previous_margin, change_pp } => format!(
            "margin {:.1}% vs {:.1}% a year earlier ({:+.1}pp)",
            current_margin, previous_margin, change_pp
        ),
        Evidence::NegativeStreak { negative_quarters, latest_values } => {
            let values: Vec<String> = latest_values.iter().map(|v| format_usd(*v)).collect();
            format!(
                "latest quarters (newest first): {}; {} negative in a row",
                values.join(", "),
                negative_quarters
            )
        }
        Evidence::Ratio { numerator, denominator, ratio } => format!(
            "{} / {} = {:.2}",
            format_usd(*numerator),
            format_usd(*denominator),
            ratio
        ),
    }
}

/// Human-readable terminal report
pub fn render_text(report: &AnalysisReport) -> String {
    let result = &report.result;
    let mut out = String::new();

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "SEC Red Flags: {} ({})", result.entity_name, report.ticker);
    let _ = writeln!(out, "CIK {}", result.entity_id);
    let _ = writeln!(out, "{}", RULE);

    let overall = result.overall_assessment;
    let _ = writeln!(
        out,
        "Overall signal: {} {} - {}",
        Severity::from(overall).emoji(),
        overall.to_label(),
        signal_caption(overall)
    );
    let _ = writeln!(
        out,
        "Red: {} | Yellow: {} | Green: {}",
        result.summary.red_count, result.summary.yellow_count, result.summary.green_count
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Summary");
    let _ = writeln!(out, "{}", report.narrative.text);
    if let Some(reason) = &report.narrative.fallback_reason {
        let _ = writeln!(out, "(Generated by the rule-based narrator; language model unavailable: {})", reason);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Breakdown");
    for (flag, finding) in result.iter_findings() {
        let _ = writeln!(out, "{} {}: {}", finding.severity.emoji(), flag.title(), finding.message);
        if !finding.is_ok() {
            let _ = writeln!(out, "   (informational: not counted in the overall signal)");
            continue;
        }
        if let Some(evidence) = &finding.evidence {
            let _ = writeln!(out, "   {}: {}", finding.metric, format_evidence(evidence));
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Evidence");
    let _ = writeln!(out, "  Filings:       {}", filings_url(&result.entity_id));
    if let Some(url) = &report.facts_url {
        let _ = writeln!(out, "  Company facts: {}", url);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", DISCLAIMER);
    out
}

pub fn render_json(report: &AnalysisReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// `--list` output
pub fn render_ticker_list(tickers: &[(&str, &str)]) -> String {
    let mut out = String::from("Available tickers:\n");
    for (ticker, cik) in tickers {
        let _ = writeln!(out, "  {:<6} CIK {}", ticker, cik);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{AnalysisResult, Finding, RedFlag, SeveritySummary};
    use narrative_client::Narrative;
    use std::collections::BTreeMap;

    fn report(fallback_reason: Option<String>) -> AnalysisReport {
        let mut findings = BTreeMap::new();
        findings.insert(
            RedFlag::RevenueDecline,
            Finding::ok(
                Severity::Red,
                "Revenue declined 20.0% YoY",
                "Revenue (YoY)",
                Evidence::PercentChange { current: 80_000_000.0, previous: 100_000_000.0, change_pct: -20.0 },
            ),
        );
        findings.insert(RedFlag::DebtExplosion, Finding::insufficient_data("debt"));

        let result = AnalysisResult {
            entity_name: "Acme Corp".to_string(),
            entity_id: "0000000042".to_string(),
            findings,
            overall_assessment: OverallSignal::Yellow,
            summary: SeveritySummary { red_count: 1, yellow_count: 0, green_count: 0 },
        };

        AnalysisReport {
            ticker: "ACME".to_string(),
            result,
            narrative: Narrative {
                text: "Acme Corp displays some warning signs.".to_string(),
                backend: if fallback_reason.is_some() { "rule-based" } else { "llm" },
                fallback_reason,
            },
            facts_url: Some("http://sec-mirror.internal/api/xbrl/companyfacts/CIK0000000042.json".to_string()),
        }
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(85_777_000_000.0), "$85.78B");
        assert_eq!(format_usd(-1_500_000.0), "-$1.5M");
        assert_eq!(format_usd(2_500.0), "$2.5K");
        assert_eq!(format_usd(12.0), "$12");
    }

    #[test]
    fn test_format_evidence() {
        let e = Evidence::Ratio { numerator: 90.0, denominator: 100.0, ratio: 0.9 };
        assert_eq!(format_evidence(&e), "$90 / $100 = 0.90");

        let e = Evidence::MarginChange { current_margin: 5.0, previous_margin: 10.0, change_pp: -5.0 };
        assert_eq!(format_evidence(&e), "margin 5.0% vs 10.0% a year earlier (-5.0pp)");
    }

    #[test]
    fn test_text_report_sections() {
        let text = render_text(&report(None));
        assert!(text.contains("SEC Red Flags: Acme Corp (ACME)"));
        assert!(text.contains("Overall signal: \u{1F7E1} YELLOW"));
        assert!(text.contains("Red: 1 | Yellow: 0 | Green: 0"));
        assert!(text.contains("\u{1F534} Revenue Decline: Revenue declined 20.0% YoY"));
        assert!(text.contains("Revenue (YoY): $80.0M vs $100.0M a year earlier (-20.0%)"));
        assert!(text.contains("\u{26AA} Debt Explosion: Insufficient data for debt analysis"));
        assert!(text.contains("informational"));
        assert!(text.contains("CIK=0000000042"));
        assert!(text.contains("Company facts: http://sec-mirror.internal/api/xbrl/companyfacts/CIK0000000042.json"));
        assert!(text.contains("NOT investment advice"));
        assert!(!text.contains("rule-based narrator"));
    }

    #[test]
    fn test_text_report_marks_fallback() {
        let text = render_text(&report(Some("Request timed out".to_string())));
        assert!(text.contains("language model unavailable: Request timed out"));
    }

    #[test]
    fn test_json_report() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&report(None)).unwrap()).unwrap();
        assert_eq!(json["ticker"], "ACME");
        assert_eq!(json["result"]["overall_assessment"], "YELLOW");
        assert_eq!(json["result"]["findings"]["revenue_decline"]["severity"], "RED");
        assert_eq!(json["result"]["findings"]["debt_explosion"]["status"], "INSUFFICIENT_DATA");
        assert_eq!(json["narrative"]["backend"], "llm");
    }

    #[test]
    fn test_ticker_list() {
        let text = render_ticker_list(&[("AAPL", "0000320193")]);
        assert!(text.contains("AAPL   CIK 0000320193"));
    }
}
