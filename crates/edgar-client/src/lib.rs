pub mod tickers;

pub use tickers::{available_tickers, resolve_cik};

use analysis_core::{pad_cik, AnalysisError, FactSource, RawFacts};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://data.sec.gov";
/// SEC requires an identifying User-Agent ("Company contact@email") on every request
pub const DEFAULT_USER_AGENT: &str = "SEC-RedFlags-App academic-research@example.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the SEC EDGAR XBRL API
#[derive(Debug, Clone)]
pub struct EdgarConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Fetches company facts from SEC EDGAR.
///
/// One request per call: no caching and no retries. A failed request is
/// reported to the caller as [`AnalysisError::Fetch`].
#[derive(Clone)]
pub struct EdgarClient {
    client: Client,
    base_url: String,
}

impl EdgarClient {
    pub fn new(config: EdgarConfig) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AnalysisError::Fetch(format!("Cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn company_facts_endpoint(&self, cik: &str) -> String {
        format!("{}/api/xbrl/companyfacts/CIK{}.json", self.base_url, pad_cik(cik))
    }

    /// Get all XBRL company facts for a CIK
    pub async fn get_company_facts(&self, cik: &str) -> Result<RawFacts, AnalysisError> {
        let url = self.company_facts_endpoint(cik);
        tracing::debug!("Fetching company facts from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AnalysisError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AnalysisError::Fetch(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::Fetch(e.to_string()))?;

        let facts = RawFacts::from_json(&body)
            .map_err(|e| AnalysisError::Fetch(format!("Malformed company facts: {}", e)))?;

        tracing::debug!(
            "Received facts for {} ({} taxonomies)",
            facts.entity_name(),
            facts.facts.len()
        );
        Ok(facts)
    }
}

#[async_trait]
impl FactSource for EdgarClient {
    async fn fetch(&self, company_id: &str) -> Result<RawFacts, AnalysisError> {
        self.get_company_facts(company_id).await
    }

    fn document_url(&self, company_id: &str) -> Option<String> {
        Some(self.company_facts_endpoint(company_id))
    }
}

/// EDGAR filing index (10-K/10-Q) for a company, for verifying findings by hand
pub fn filings_url(cik: &str) -> String {
    format!(
        "https://www.sec.gov/cgi-bin/browse-edgar?action=getcompany&CIK={}&type=10-&dateb=&owner=exclude&count=40",
        pad_cik(cik)
    )
}
