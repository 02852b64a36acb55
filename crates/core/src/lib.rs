pub mod advisor;
pub mod domain;
pub mod llm;
pub mod money;

pub use advisor::coach::FinanceCoach;

pub mod config {
    use crate::domain::risk::RiskTierPolicy;
    use crate::llm::Provider;
    use anyhow::{bail, Context};

    pub const DEFAULT_NARRATIVE_MAX_TOKENS: u32 = 300;
    pub const DEFAULT_NARRATIVE_TIMEOUT_SECS: u64 = 20;

    #[derive(Debug, Clone)]
    pub struct Settings {
        /// `None` means narrative generation is off and no backend is ever contacted.
        pub llm_backend: Option<Provider>,
        pub gemini_api_key: Option<String>,
        pub gemini_gateway_url: Option<String>,
        pub gemini_model: Option<String>,
        pub anthropic_api_key: Option<String>,
        pub anthropic_base_url: Option<String>,
        pub anthropic_model: Option<String>,
        pub narrative_max_tokens: u32,
        pub narrative_timeout_secs: u64,
        pub risk_tier_policy: RiskTierPolicy,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                llm_backend: None,
                gemini_api_key: None,
                gemini_gateway_url: None,
                gemini_model: None,
                anthropic_api_key: None,
                anthropic_base_url: None,
                anthropic_model: None,
                narrative_max_tokens: DEFAULT_NARRATIVE_MAX_TOKENS,
                narrative_timeout_secs: DEFAULT_NARRATIVE_TIMEOUT_SECS,
                risk_tier_policy: RiskTierPolicy::default(),
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        /// Builds settings from an arbitrary key lookup. Blank values count as unset.
        pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
        where
            F: Fn(&str) -> Option<String>,
        {
            let get = |key: &str| {
                lookup(key)
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
            };

            let llm_backend = parse_backend(get("LLM_BACKEND").as_deref())?;

            let narrative_max_tokens = match get("NARRATIVE_MAX_TOKENS") {
                Some(s) => s
                    .parse::<u32>()
                    .with_context(|| format!("NARRATIVE_MAX_TOKENS must be an integer (got {s})"))?,
                None => DEFAULT_NARRATIVE_MAX_TOKENS,
            };

            let narrative_timeout_secs = match get("NARRATIVE_TIMEOUT_SECS") {
                Some(s) => s.parse::<u64>().with_context(|| {
                    format!("NARRATIVE_TIMEOUT_SECS must be an integer (got {s})")
                })?,
                None => DEFAULT_NARRATIVE_TIMEOUT_SECS,
            };

            let risk_tier_policy = match get("RISK_TIER_POLICY") {
                Some(s) => s.parse::<RiskTierPolicy>()?,
                None => RiskTierPolicy::default(),
            };

            Ok(Self {
                llm_backend,
                gemini_api_key: get("GEMINI_API_KEY"),
                gemini_gateway_url: get("GEMINI_GATEWAY_URL"),
                gemini_model: get("GEMINI_MODEL"),
                anthropic_api_key: get("ANTHROPIC_API_KEY"),
                anthropic_base_url: get("ANTHROPIC_BASE_URL"),
                anthropic_model: get("ANTHROPIC_MODEL"),
                narrative_max_tokens,
                narrative_timeout_secs,
                risk_tier_policy,
                sentry_dsn: get("SENTRY_DSN"),
            })
        }

        pub fn require_gemini_api_key(&self) -> anyhow::Result<&str> {
            self.gemini_api_key
                .as_deref()
                .context("GEMINI_API_KEY is required when LLM_BACKEND=gemini")
        }

        pub fn require_anthropic_api_key(&self) -> anyhow::Result<&str> {
            self.anthropic_api_key
                .as_deref()
                .context("ANTHROPIC_API_KEY is required when LLM_BACKEND=anthropic")
        }
    }

    fn parse_backend(raw: Option<&str>) -> anyhow::Result<Option<Provider>> {
        let Some(raw) = raw else {
            return Ok(None);
        };
        match raw.to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(None),
            "gemini" => Ok(Some(Provider::Gemini)),
            "anthropic" => Ok(Some(Provider::Anthropic)),
            other => {
                bail!("unsupported LLM_BACKEND `{other}` (expected none, gemini or anthropic)")
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::collections::HashMap;

        fn settings(vars: &[(&str, &str)]) -> anyhow::Result<Settings> {
            let vars: HashMap<String, String> = vars
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            Settings::from_lookup(|key| vars.get(key).cloned())
        }

        #[test]
        fn defaults_to_disabled_backend() {
            let s = settings(&[]).unwrap();
            assert_eq!(s.llm_backend, None);
            assert_eq!(s.narrative_max_tokens, 300);
            assert_eq!(s.narrative_timeout_secs, 20);
            assert_eq!(s.risk_tier_policy, RiskTierPolicy::Lenient);
        }

        #[test]
        fn backend_is_case_insensitive() {
            let s = settings(&[("LLM_BACKEND", "Gemini")]).unwrap();
            assert_eq!(s.llm_backend, Some(Provider::Gemini));

            let s = settings(&[("LLM_BACKEND", "NONE")]).unwrap();
            assert_eq!(s.llm_backend, None);
        }

        #[test]
        fn rejects_unknown_backend() {
            let err = settings(&[("LLM_BACKEND", "gpt")]).unwrap_err();
            assert!(err.to_string().contains("unsupported LLM_BACKEND"));
        }

        #[test]
        fn blank_credentials_count_as_missing() {
            let s = settings(&[("LLM_BACKEND", "gemini"), ("GEMINI_API_KEY", "   ")]).unwrap();
            let err = s.require_gemini_api_key().unwrap_err();
            assert!(err.to_string().contains("GEMINI_API_KEY"));
        }

        #[test]
        fn parses_numeric_overrides_and_policy() {
            let s = settings(&[
                ("NARRATIVE_MAX_TOKENS", "512"),
                ("NARRATIVE_TIMEOUT_SECS", "5"),
                ("RISK_TIER_POLICY", "strict"),
            ])
            .unwrap();
            assert_eq!(s.narrative_max_tokens, 512);
            assert_eq!(s.narrative_timeout_secs, 5);
            assert_eq!(s.risk_tier_policy, RiskTierPolicy::Strict);
        }

        #[test]
        fn rejects_non_numeric_max_tokens() {
            assert!(settings(&[("NARRATIVE_MAX_TOKENS", "lots")]).is_err());
        }
    }
}
