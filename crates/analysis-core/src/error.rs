use thiserror::Error;

/// Failures that abort an analysis before any finding is produced.
///
/// Missing or malformed financial data is not an error: it surfaces as
/// an insufficient-data [`Finding`](crate::Finding) instead.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Ticker '{0}' not found in database")]
    NotFound(String),

    #[error("Failed to fetch company facts: {0}")]
    Fetch(String),
}
