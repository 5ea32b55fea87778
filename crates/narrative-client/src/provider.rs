use crate::error::NarrativeResult;
use crate::rule_based::RuleBasedNarrator;
use analysis_core::AnalysisResult;
use async_trait::async_trait;
use serde::Serialize;

/// Backend-agnostic interface for turning findings into prose.
///
/// Implemented by the rule-based template and the language-model client.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, result: &AnalysisResult) -> NarrativeResult<String>;

    fn backend_name(&self) -> &'static str;
}

/// Narrative text plus where it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Narrative {
    pub text: String,
    pub backend: &'static str,
    /// Why the primary backend was not used, when it failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl Narrative {
    pub fn is_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Optional primary backend with the rule-based narrator behind it.
///
/// `narrate` always produces text: a failing primary is logged and replaced by
/// the template, and the analysis result is only ever read.
pub struct NarrativeService {
    primary: Option<Box<dyn NarrativeGenerator>>,
    fallback: RuleBasedNarrator,
}

impl NarrativeService {
    pub fn rule_based() -> Self {
        Self {
            primary: None,
            fallback: RuleBasedNarrator::new(),
        }
    }

    pub fn with_primary(primary: Box<dyn NarrativeGenerator>) -> Self {
        Self {
            primary: Some(primary),
            fallback: RuleBasedNarrator::new(),
        }
    }

    pub fn primary_backend(&self) -> Option<&'static str> {
        self.primary.as_ref().map(|p| p.backend_name())
    }

    pub async fn narrate(&self, result: &AnalysisResult) -> Narrative {
        let Some(primary) = &self.primary else {
            return Narrative {
                text: self.fallback.render(result),
                backend: self.fallback.backend_name(),
                fallback_reason: None,
            };
        };

        match primary.generate(result).await {
            Ok(text) => {
                tracing::info!(
                    "Narrative generated by {} ({} chars)",
                    primary.backend_name(),
                    text.len()
                );
                Narrative {
                    text,
                    backend: primary.backend_name(),
                    fallback_reason: None,
                }
            }
            Err(e) => {
                tracing::warn!(
                    "{} narrative failed: {}. Using rule-based fallback.",
                    primary.backend_name(),
                    e
                );
                Narrative {
                    text: self.fallback.render(result),
                    backend: self.fallback.backend_name(),
                    fallback_reason: Some(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NarrativeError;
    use crate::llm::{LlmConfig, LlmNarrator};
    use analysis_core::{OverallSignal, SeveritySummary};
    use std::collections::BTreeMap;
    use std::time::Duration;

    struct Failing;

    #[async_trait]
    impl NarrativeGenerator for Failing {
        async fn generate(&self, _result: &AnalysisResult) -> NarrativeResult<String> {
            Err(NarrativeError::QuotaExceeded)
        }

        fn backend_name(&self) -> &'static str {
            "failing"
        }
    }

    struct Canned;

    #[async_trait]
    impl NarrativeGenerator for Canned {
        async fn generate(&self, result: &AnalysisResult) -> NarrativeResult<String> {
            Ok(format!("{} looks fine.", result.entity_name))
        }

        fn backend_name(&self) -> &'static str {
            "canned"
        }
    }

    fn result() -> AnalysisResult {
        AnalysisResult {
            entity_name: "Acme Corp".to_string(),
            entity_id: "0000000001".to_string(),
            findings: BTreeMap::new(),
            overall_assessment: OverallSignal::Green,
            summary: SeveritySummary::default(),
        }
    }

    #[tokio::test]
    async fn test_rule_based_only() {
        let service = NarrativeService::rule_based();
        let narrative = service.narrate(&result()).await;
        assert_eq!(narrative.backend, "rule-based");
        assert!(!narrative.is_fallback());
        assert!(narrative.text.starts_with("Acme Corp presents healthy financial indicators"));
    }

    #[tokio::test]
    async fn test_primary_success() {
        let service = NarrativeService::with_primary(Box::new(Canned));
        let narrative = service.narrate(&result()).await;
        assert_eq!(narrative.backend, "canned");
        assert_eq!(narrative.text, "Acme Corp looks fine.");
    }

    #[tokio::test]
    async fn test_primary_failure_falls_back() {
        let service = NarrativeService::with_primary(Box::new(Failing));
        let r = result();
        let narrative = service.narrate(&r).await;
        assert_eq!(narrative.backend, "rule-based");
        assert!(narrative.fallback_reason.unwrap().contains("Insufficient credits"));
        assert_eq!(narrative.text, RuleBasedNarrator::new().render(&r));
    }

    #[tokio::test]
    async fn test_unreachable_llm_falls_back() {
        let llm = LlmNarrator::new(LlmConfig {
            api_key: "test-key".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(2),
            ..LlmConfig::default()
        })
        .unwrap();
        let service = NarrativeService::with_primary(Box::new(llm));
        assert_eq!(service.primary_backend(), Some("llm"));

        let narrative = service.narrate(&result()).await;
        assert!(narrative.is_fallback());
        assert_eq!(narrative.backend, "rule-based");
    }
}
