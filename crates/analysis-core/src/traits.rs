use async_trait::async_trait;
use crate::{AnalysisError, RawFacts};

/// Source of raw XBRL company facts, keyed by regulatory identifier (CIK)
#[async_trait]
pub trait FactSource: Send + Sync {
    async fn fetch(&self, company_id: &str) -> Result<RawFacts, AnalysisError>;

    /// Address of the document `fetch` reads, when the source has one
    fn document_url(&self, _company_id: &str) -> Option<String> {
        None
    }
}
