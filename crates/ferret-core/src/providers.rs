//! Model backend — Ollama `/api/generate`, non-streaming.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::Config;
use crate::error::BackendError;

/// Anything that turns a prompt into a completion.
pub trait ModelBackend {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, BackendError>> + Send;
}

#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

fn build_client(timeout_secs: u64) -> Result<reqwest::Client, BackendError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| BackendError::Transport(e.to_string()))
}

impl OllamaBackend {
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        Ok(Self {
            client: build_client(config.request_timeout_secs)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout_secs: config.request_timeout_secs,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl ModelBackend for OllamaBackend {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        info!(
            "generate request: model={} prompt_chars={}",
            self.model,
            prompt.chars().count()
        );

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout(self.timeout_secs)
                } else {
                    BackendError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            let body: String = body.chars().take(400).collect();
            error!("Backend HTTP {}: {}", status, body);
            return Err(BackendError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response.json::<GenerateResponse>().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout(self.timeout_secs)
            } else {
                BackendError::Parse(e.to_string())
            }
        })?;
        Ok(parsed.response)
    }
}
