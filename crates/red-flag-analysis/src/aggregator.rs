use analysis_core::{Finding, OverallSignal, Severity, SeveritySummary};

/// Count findings per severity and derive the overall signal.
///
/// Two reds make the company RED; one red or three yellows make it YELLOW.
/// Green and insufficient-data findings never lower the signal.
pub fn aggregate<'a, I>(findings: I) -> (OverallSignal, SeveritySummary)
where
    I: IntoIterator<Item = &'a Finding>,
{
    let mut summary = SeveritySummary::default();
    for finding in findings {
        match finding.severity {
            Severity::Red => summary.red_count += 1,
            Severity::Yellow => summary.yellow_count += 1,
            Severity::Green => summary.green_count += 1,
            Severity::Unknown => {}
        }
    }

    let overall = if summary.red_count >= 2 {
        OverallSignal::Red
    } else if summary.red_count >= 1 || summary.yellow_count >= 3 {
        OverallSignal::Yellow
    } else {
        OverallSignal::Green
    };

    (overall, summary)
}
