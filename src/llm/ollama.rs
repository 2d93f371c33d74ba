use super::Generator;
use super::stream::ResponseAccumulator;
use crate::error::{DigestError, Result};
use crate::utils;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use url::Url;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Client for an Ollama-compatible `/api/generate` endpoint
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: Client,
    // Kept as a message so a bad base URL fails each request, not construction.
    endpoint: std::result::Result<Url, String>,
    model: String,
}

impl OllamaClient {
    /// Creates a client for the endpoint at `base_url`
    pub fn new(base_url: &str, model: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, model, None)
    }

    /// Creates a client with an optional request timeout
    pub fn with_timeout(
        base_url: &str,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut http = Client::builder();
        if let Some(timeout) = timeout {
            http = http.timeout(timeout);
        }

        Ok(Self {
            http: http.build()?,
            endpoint: parse_endpoint(base_url),
            model: model.into(),
        })
    }

    /// Full URL of the generate endpoint, if the base URL parsed
    pub fn endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref().ok()
    }
}

/// Resolves `{base_url}/api/generate`, keeping any path prefix of the base
fn parse_endpoint(base_url: &str) -> std::result::Result<Url, String> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }

    Url::parse(&base)
        .and_then(|url| url.join("api/generate"))
        .map_err(|e| format!("{base_url}: {e}"))
}

#[async_trait]
impl Generator for OllamaClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let endpoint = self
            .endpoint
            .as_ref()
            .map_err(|message| DigestError::InvalidUrl(message.clone()))?;

        ::log::debug!(
            "POST {} (model {}, prompt {} chars)",
            endpoint,
            self.model,
            prompt.chars().count()
        );

        let response = self
            .http
            .post(endpoint.clone())
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            ::log::warn!("Generation endpoint returned {}: {}", status, body);
            return Err(DigestError::Status {
                url: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let mut accumulator = ResponseAccumulator::new();
        let mut bytes = response.bytes_stream();
        while let Some(chunk) = bytes.next().await {
            accumulator.push(&chunk?)?;
        }

        let complete = accumulator.finish()?;
        ::log::debug!("Complete response: {}", utils::preview(&complete, 2000));
        Ok(complete)
    }
}
