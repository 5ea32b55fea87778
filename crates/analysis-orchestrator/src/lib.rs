use analysis_core::{AnalysisError, AnalysisResult, FactSource};
use edgar_client::{resolve_cik, EdgarClient};
use narrative_client::{Narrative, NarrativeService};
use red_flag_analysis::RedFlagAnalyzer;
use serde::Serialize;

/// Analysis result together with its narrative, ready for display
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub ticker: String,
    pub result: AnalysisResult,
    pub narrative: Narrative,
    /// Where the facts behind this result were read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facts_url: Option<String>,
}

/// Request pipeline: resolve ticker, fetch facts, evaluate red flags, narrate.
///
/// Each call works on its own freshly fetched facts; nothing is cached or shared
/// between analyses.
pub struct RedFlagOrchestrator<S: FactSource = EdgarClient> {
    source: S,
    narrator: NarrativeService,
}

impl<S: FactSource> RedFlagOrchestrator<S> {
    pub fn new(source: S, narrator: NarrativeService) -> Self {
        Self { source, narrator }
    }

    /// Fetch and evaluate a company by CIK
    pub async fn analyze_cik(&self, cik: &str) -> Result<AnalysisResult, AnalysisError> {
        let facts = self.source.fetch(cik).await?;
        let result = RedFlagAnalyzer::new(&facts).analyze_all(cik);

        tracing::info!(
            "Analyzed {} ({}): {} ({} red, {} yellow, {} green)",
            result.entity_name,
            result.entity_id,
            result.overall_assessment.to_label(),
            result.summary.red_count,
            result.summary.yellow_count,
            result.summary.green_count
        );
        Ok(result)
    }

    /// Resolve a ticker and evaluate it
    pub async fn analyze_ticker(&self, ticker: &str) -> Result<AnalysisResult, AnalysisError> {
        let cik = resolve_cik(ticker)
            .ok_or_else(|| AnalysisError::NotFound(ticker.trim().to_uppercase()))?;

        tracing::info!("Starting red flag analysis for {} (CIK {})", ticker, cik);
        self.analyze_cik(cik).await
    }

    /// Full report for a ticker. Narrative failures never fail the report.
    pub async fn report(&self, ticker: &str) -> Result<AnalysisReport, AnalysisError> {
        let result = self.analyze_ticker(ticker).await?;
        let narrative = self.narrator.narrate(&result).await;
        let facts_url = self.source.document_url(&result.entity_id);

        Ok(AnalysisReport {
            ticker: ticker.trim().to_uppercase(),
            result,
            narrative,
            facts_url,
        })
    }
}
