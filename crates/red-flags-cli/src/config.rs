use anyhow::{bail, Context, Result};
use edgar_client::EdgarConfig;
use narrative_client::LlmConfig;
use std::env;
use std::time::Duration;

/// Which narrative backend to try first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeBackend {
    Llm,
    Rules,
}

impl NarrativeBackend {
    fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "llm" => Ok(Self::Llm),
            "rules" | "rule-based" => Ok(Self::Rules),
            other => bail!("NARRATIVE_BACKEND must be 'llm' or 'rules', got '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub edgar: EdgarConfig,
    pub llm: LlmConfig,
    pub narrative_backend: NarrativeBackend,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build from any key/value source; unset keys take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let edgar_defaults = EdgarConfig::default();
        let llm_defaults = LlmConfig::default();

        let sec_timeout = parse_secs(&lookup, "SEC_TIMEOUT_SECS", edgar_defaults.timeout)?;
        let llm_timeout = parse_secs(&lookup, "LLM_TIMEOUT_SECS", llm_defaults.timeout)?;

        let narrative_backend = match lookup("NARRATIVE_BACKEND") {
            Some(v) => NarrativeBackend::parse(&v)?,
            None => NarrativeBackend::Llm,
        };

        Ok(Self {
            edgar: EdgarConfig {
                base_url: lookup("SEC_BASE_URL").unwrap_or(edgar_defaults.base_url),
                user_agent: lookup("SEC_USER_AGENT").unwrap_or(edgar_defaults.user_agent),
                timeout: sec_timeout,
            },
            llm: LlmConfig {
                api_key: lookup("OPENAI_API_KEY").unwrap_or_default(),
                base_url: lookup("OPENAI_BASE_URL").unwrap_or(llm_defaults.base_url),
                model: lookup("OPENAI_MODEL").unwrap_or(llm_defaults.model),
                timeout: llm_timeout,
                ..llm_defaults
            },
            narrative_backend,
        })
    }

    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("SEC_BASE_URL", &self.edgar.base_url),
            ("OPENAI_BASE_URL", &self.llm.base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!("{} must be an http(s) URL, got '{}'", name, url);
            }
        }
        if self.edgar.user_agent.trim().is_empty() {
            bail!("SEC_USER_AGENT must not be empty (SEC rejects anonymous requests)");
        }
        if self.edgar.timeout.is_zero() {
            bail!("SEC_TIMEOUT_SECS must be greater than 0");
        }
        if self.llm.timeout.is_zero() {
            bail!("LLM_TIMEOUT_SECS must be greater than 0");
        }
        if self.llm.model.trim().is_empty() {
            bail!("OPENAI_MODEL must not be empty");
        }
        Ok(())
    }

    pub fn wants_llm(&self) -> bool {
        self.narrative_backend == NarrativeBackend::Llm
    }
}

fn parse_secs<F>(lookup: &F, key: &str, default: Duration) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) => {
            let secs: u64 = v
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds, got '{}'", key, v))?;
            Ok(Duration::from_secs(secs))
        }
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.edgar.base_url, "https://data.sec.gov");
        assert_eq!(config.edgar.timeout, Duration::from_secs(10));
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.timeout, Duration::from_secs(30));
        assert!(!config.llm.is_configured());
        assert!(config.wants_llm());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SEC_TIMEOUT_SECS", "5"),
            ("OPENAI_API_KEY", "sk-live"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("NARRATIVE_BACKEND", "Rules"),
        ])
        .unwrap();
        assert_eq!(config.edgar.timeout, Duration::from_secs(5));
        assert!(config.llm.is_configured());
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.narrative_backend, NarrativeBackend::Rules);
    }

    #[test]
    fn test_malformed_timeout_is_rejected() {
        let err = config_from(&[("SEC_TIMEOUT_SECS", "ten")]).unwrap_err();
        assert!(err.to_string().contains("SEC_TIMEOUT_SECS"));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        assert!(config_from(&[("NARRATIVE_BACKEND", "gpt")]).is_err());
    }

    #[test]
    fn test_validate() {
        let config = config_from(&[("SEC_BASE_URL", "data.sec.gov")]).unwrap();
        assert!(config.validate().is_err());

        let config = config_from(&[("SEC_USER_AGENT", "  ")]).unwrap();
        assert!(config.validate().is_err());

        let config = config_from(&[("LLM_TIMEOUT_SECS", "0")]).unwrap();
        assert!(config.validate().is_err());
    }
}
