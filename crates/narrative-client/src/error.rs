use thiserror::Error;

#[derive(Error, Debug)]
pub enum NarrativeError {
    #[error("Narrative service not configured: {0}")]
    NotConfigured(String),

    #[error("Invalid API key")]
    Unauthorized,

    #[error("Insufficient credits on the narrative service account")]
    QuotaExceeded,

    #[error("Timeout")]
    Timeout,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(reqwest::Error),
}

impl From<reqwest::Error> for NarrativeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            NarrativeError::Timeout
        } else {
            NarrativeError::RequestFailed(e)
        }
    }
}

pub type NarrativeResult<T> = Result<T, NarrativeError>;
