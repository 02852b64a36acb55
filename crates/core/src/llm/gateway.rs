use crate::config::Settings;
use crate::llm::error::LlmDiagnosticsError;
use crate::llm::{NarrativeGenerator, Provider};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_GATEWAY_URL: &str = "https://api.your-gateway.example";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const TEMPERATURE: f32 = 0.2;

/// Client for an HTTP gateway exposing Gemini as `POST /v1/models/{model}:generate`.
#[derive(Debug, Clone)]
pub struct GeminiGatewayClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiGatewayClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_gemini_api_key()?;
        let base_url = settings
            .gemini_gateway_url
            .as_deref()
            .unwrap_or(DEFAULT_GATEWAY_URL);
        let model = settings.gemini_model.as_deref().unwrap_or(DEFAULT_MODEL);
        Self::new(
            api_key,
            base_url,
            model,
            Duration::from_secs(settings.narrative_timeout_secs),
        )
    }

    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1/models/{}:generate",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn diagnostics(stage: &'static str, detail: String, raw: Option<String>) -> anyhow::Error {
        LlmDiagnosticsError {
            provider: Provider::Gemini,
            stage,
            detail,
            raw_output: raw,
        }
        .into()
    }
}

#[async_trait::async_trait]
impl NarrativeGenerator for GeminiGatewayClient {
    fn provider(&self) -> Option<Provider> {
        Some(Provider::Gemini)
    }

    async fn generate(&self, prompt: &str, max_tokens: u32) -> anyhow::Result<Option<String>> {
        let req = GenerateRequest {
            prompt,
            max_tokens,
            temperature: TEMPERATURE,
        };

        let res = self
            .http
            .post(self.url())
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .context("Gemini gateway request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read Gemini gateway response body")?;
        if !status.is_success() {
            return Err(Self::diagnostics("http", format!("status={status}"), Some(text)));
        }

        let parsed = serde_json::from_str::<GenerateResponse>(&text)
            .map_err(|e| Self::diagnostics("decode", e.to_string(), Some(text.clone())))?;
        Ok(parsed.into_text())
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Default, Deserialize)]
struct Choice {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// `output_text` wins when non-empty; otherwise the first choice.
    fn into_text(self) -> Option<String> {
        self.output_text
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.choices.into_iter().next().and_then(|c| c.text))
            .filter(|s| !s.trim().is_empty())
    }
}
