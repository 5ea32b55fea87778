use analysis_core::AnalysisResult;

pub const SYSTEM_PROMPT: &str =
    "You are a financial transparency analyst helping non-experts understand company filings.";

/// User prompt describing the computed findings.
///
/// Insufficient-data findings are left out so the model only comments on measured signals.
pub fn build_analysis_prompt(result: &AnalysisResult) -> String {
    let findings_text = result
        .iter_findings()
        .filter(|(_, f)| f.is_ok())
        .map(|(_, f)| format!("{} {}", f.severity.emoji(), f.message))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a financial analyst explaining accounting stress signals to non-experts.

Company: {company}
Overall Signal: {overall}
Red Flags: {red} | Yellow: {yellow} | Green: {green}

Findings:
{findings_text}

Task: Write a brief 3-4 sentence analysis in clear language. Do NOT use asterisks or bold formatting. Do not mention the color of the signal.
Include the following points, each in one new paragraph:
1. Main takeaway (is this company showing stress?)
2. If there are multiple concerning signals, list them as bullet points using the \u{2022} symbol, each bullet should be in a new line
3. What potential investors should monitor

Keep it concise and accessible. This is NOT investment advice - it's a transparency tool.",
        company = result.entity_name,
        overall = result.overall_assessment.to_label(),
        red = result.summary.red_count,
        yellow = result.summary.yellow_count,
        green = result.summary.green_count,
    )
}
