//! Ollama generator adapter.
//!
//! Talks to a local Ollama server via its non-streaming generate endpoint.
//! Transport problems surface as `DomainError::GeneratorUnavailable`; the
//! loop treats them as "no actionable output this round".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::GeneratorConfig;
use crate::domain::ports::Generator;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// HTTP client for the Ollama generate API.
pub struct OllamaGenerator {
    http: reqwest::Client,
    base_url: String,
}

impl OllamaGenerator {
    /// Build a client from the generator configuration.
    pub fn new(config: &GeneratorConfig) -> DomainResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| DomainError::GeneratorUnavailable(err.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> DomainResult<String> {
        debug!(model, prompt_bytes = prompt.len(), "sending prompt to ollama");

        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(&GenerateRequest {
                model,
                prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(|err| DomainError::GeneratorUnavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::GeneratorUnavailable(format!(
                "ollama returned {status}: {body}"
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|err| DomainError::GeneratorResponseInvalid(err.to_string()))?;

        Ok(unescape_entities(&body.response))
    }
}

/// Decode HTML/XML entity escapes so generated Java and XML arrive clean.
///
/// Some models entity-escape angle brackets inside fenced blocks, which
/// would leave manifest fragments unparsable. JSON and unicode escapes are
/// already handled by the JSON deserializer.
fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
