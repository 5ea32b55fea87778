use crate::error::{NarrativeError, NarrativeResult};
use crate::prompt::{build_analysis_prompt, SYSTEM_PROMPT};
use crate::provider::NarrativeGenerator;
use analysis_core::AnalysisResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for an OpenAI-compatible chat completions endpoint
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 500,
            temperature: 0.7,
            timeout: Duration::from_secs(30),
        }
    }
}

impl LlmConfig {
    /// A blank key or the "sk-..." placeholder counts as unset
    pub fn is_configured(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != "sk-..."
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Narrative written by an external language model
#[derive(Clone)]
pub struct LlmNarrator {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmNarrator {
    pub fn new(config: LlmConfig) -> NarrativeResult<Self> {
        if !config.is_configured() {
            return Err(NarrativeError::NotConfigured("OPENAI_API_KEY is not set".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(NarrativeError::RequestFailed)?;

        Ok(Self { client, config })
    }

    async fn complete(&self, prompt: &str) -> NarrativeResult<String> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: prompt },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        tracing::debug!("Calling narrative model {} at {}", self.config.model, url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), &body));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| NarrativeError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| NarrativeError::InvalidResponse("empty completion".to_string()))
    }
}

/// Map an error status and body to the failure the user should see
pub(crate) fn classify_failure(status: u16, body: &str) -> NarrativeError {
    let lower = body.to_lowercase();
    if lower.contains("insufficient_quota") {
        return NarrativeError::QuotaExceeded;
    }
    match status {
        401 | 403 => NarrativeError::Unauthorized,
        408 | 504 => NarrativeError::Timeout,
        _ => {
            let snippet: String = body.chars().take(200).collect();
            NarrativeError::ServiceUnavailable(format!("HTTP {}: {}", status, snippet))
        }
    }
}

#[async_trait]
impl NarrativeGenerator for LlmNarrator {
    async fn generate(&self, result: &AnalysisResult) -> NarrativeResult<String> {
        let prompt = build_analysis_prompt(result);
        self.complete(&prompt).await
    }

    fn backend_name(&self) -> &'static str {
        "llm"
    }
}
