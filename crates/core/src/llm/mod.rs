pub mod anthropic;
pub mod error;
pub mod gateway;
pub mod prompts;
pub mod text;

use crate::config::Settings;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Gemini,
    Anthropic,
}

/// A text-generation backend. `Ok(None)` means "nothing to say"; callers treat it the same
/// as a failure and keep their rule-based output.
#[async_trait::async_trait]
pub trait NarrativeGenerator: Send + Sync {
    fn provider(&self) -> Option<Provider>;

    async fn generate(&self, prompt: &str, max_tokens: u32) -> anyhow::Result<Option<String>>;
}

/// Backend used when narrative generation is switched off. Never touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;

#[async_trait::async_trait]
impl NarrativeGenerator for Disabled {
    fn provider(&self) -> Option<Provider> {
        None
    }

    async fn generate(&self, _prompt: &str, _max_tokens: u32) -> anyhow::Result<Option<String>> {
        Ok(None)
    }
}

/// Shared handle to the configured generator. Every failure degrades to `None`.
#[derive(Clone)]
pub struct Narrator {
    generator: Arc<dyn NarrativeGenerator>,
    max_tokens: u32,
}

impl Narrator {
    pub fn new(generator: Arc<dyn NarrativeGenerator>, max_tokens: u32) -> Self {
        Self {
            generator,
            max_tokens,
        }
    }

    pub fn disabled() -> Self {
        Self::new(Arc::new(Disabled), crate::config::DEFAULT_NARRATIVE_MAX_TOKENS)
    }

    /// Fails when a backend is selected but its credential is missing.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let generator: Arc<dyn NarrativeGenerator> = match settings.llm_backend {
            None => return Ok(Self::disabled()),
            Some(Provider::Gemini) => {
                Arc::new(gateway::GeminiGatewayClient::from_settings(settings)?)
            }
            Some(Provider::Anthropic) => {
                Arc::new(anthropic::AnthropicClient::from_settings(settings)?)
            }
        };
        Ok(Self::new(generator, settings.narrative_max_tokens))
    }

    pub fn provider(&self) -> Option<Provider> {
        self.generator.provider()
    }

    pub fn is_enabled(&self) -> bool {
        self.provider().is_some()
    }

    pub async fn narrate(&self, topic: &'static str, prompt: &str) -> Option<String> {
        match self.generator.generate(prompt, self.max_tokens).await {
            Ok(Some(raw)) => {
                let cleaned = text::clean_narrative(&raw);
                if cleaned.is_none() {
                    tracing::debug!(
                        topic,
                        provider = ?self.provider(),
                        "narrative was blank; using rules"
                    );
                }
                cleaned
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(
                    topic,
                    provider = ?self.provider(),
                    error = %format!("{err:#}"),
                    "narrative generation failed; using rules"
                );
                None
            }
        }
    }
}

impl fmt::Debug for Narrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Narrator")
            .field("provider", &self.provider())
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::Scripted;
    use super::*;

    #[tokio::test]
    async fn disabled_narrator_returns_nothing() {
        let narrator = Narrator::disabled();
        assert!(!narrator.is_enabled());
        assert_eq!(narrator.narrate("expenses", "prompt").await, None);
    }

    #[tokio::test]
    async fn failures_degrade_to_none() {
        let gen = Scripted::failing("connection refused");
        assert_eq!(gen.narrator().narrate("expenses", "prompt").await, None);
        assert_eq!(gen.call_count(), 1);
    }

    #[tokio::test]
    async fn blank_output_is_unavailable() {
        let gen = Scripted::replying("  \n ");
        assert_eq!(gen.narrator().narrate("goals", "prompt").await, None);
    }

    #[tokio::test]
    async fn fenced_output_is_unwrapped() {
        let gen = Scripted::replying("```json\n{\"tips\": []}\n```");
        assert_eq!(
            gen.narrator().narrate("expenses", "prompt").await.as_deref(),
            Some("{\"tips\": []}")
        );
    }

    #[test]
    fn gemini_without_key_is_a_config_error() {
        let settings = Settings {
            llm_backend: Some(Provider::Gemini),
            ..Settings::default()
        };
        let err = Narrator::from_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn anthropic_without_key_is_a_config_error() {
        let settings = Settings {
            llm_backend: Some(Provider::Anthropic),
            ..Settings::default()
        };
        let err = Narrator::from_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn configured_backend_reports_its_provider() {
        let settings = Settings {
            llm_backend: Some(Provider::Gemini),
            gemini_api_key: Some("key".to_string()),
            ..Settings::default()
        };
        let narrator = Narrator::from_settings(&settings).unwrap();
        assert_eq!(narrator.provider(), Some(Provider::Gemini));
    }
}
