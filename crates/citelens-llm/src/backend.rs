//! Completion backend trait and the OpenAI-compatible implementation.
//!
//! The chat endpoint talks to any `/v1/chat/completions`-shaped API
//! (OpenAI, TogetherAI, Groq, vLLM, …). A missing credential is a
//! distinguished, recoverable condition — callers degrade to a canned
//! demo reply instead of failing the request.

use async_trait::async_trait;
use citelens_common::models::ChatMessage;
use thiserror::Error;
use tracing::debug;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Completion API credential is not configured")]
    MissingCredential,

    #[error("API error [{status}]: {message}")]
    Api { status: u16, message: String },
}

// ── Request / Response ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
}

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, req: CompletionRequest) -> Result<CompletionResponse, LlmError>;
    fn model_id(&self) -> &str;
}

// ── OpenAI-compatible backend ─────────────────────────────────────────────────

pub struct OpenAiCompatibleBackend {
    pub base_url: String,
    pub model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAiCompatibleBackend {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

async fn read_checked(resp: reqwest::Response) -> Result<serde_json::Value, LlmError> {
    let status = resp.status().as_u16();
    let body: serde_json::Value = resp.json().await?;
    if status >= 400 {
        let message = body["error"]["message"]
            .as_str()
            .or_else(|| body["message"].as_str())
            .unwrap_or("unknown API error")
            .to_string();
        return Err(LlmError::Api { status, message });
    }
    Ok(body)
}

#[async_trait]
impl CompletionBackend for OpenAiCompatibleBackend {
    async fn complete(&self, req: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(LlmError::MissingCredential);
        };

        let model = req.model.as_deref().unwrap_or(&self.model);
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        debug!(model, n_messages = req.messages.len(), "Sending completion request");

        let body = serde_json::json!({
            "model":       model,
            "messages":    req.messages,
            "temperature": req.temperature.unwrap_or(0.7),
            "max_tokens":  req.max_tokens.unwrap_or(500),
        });
        let resp = self.client.post(&url).bearer_auth(api_key).json(&body).send().await?;
        let json = read_checked(resp).await?;

        Ok(CompletionResponse {
            content: json["choices"][0]["message"]["content"]
                .as_str()
                .unwrap_or("")
                .to_string(),
            model: json["model"].as_str().unwrap_or(model).to_string(),
        })
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_credential_is_distinguished() {
        let backend = OpenAiCompatibleBackend::new("https://api.example.com/v1", "demo-model", None);
        let req = CompletionRequest {
            messages: vec![ChatMessage { role: "user".into(), content: "hi".into() }],
            model: None,
            temperature: None,
            max_tokens: None,
        };
        match backend.complete(req).await {
            Err(LlmError::MissingCredential) => {}
            other => panic!("expected MissingCredential, got {other:?}"),
        }
    }

    #[test]
    fn test_model_id() {
        let backend =
            OpenAiCompatibleBackend::new("https://api.example.com/v1", "demo-model", Some("k".into()));
        assert_eq!(backend.model_id(), "demo-model");
    }
}
