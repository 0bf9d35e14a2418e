//! LLM Client: the single point of entry for delegated text generation.
//!
//! Two backends sit behind the `TextGenerator` trait: the hosted Groq
//! chat-completions API and a local Ollama daemon. Both make exactly one
//! POST per call with a fixed request shape and a fixed timeout; there are
//! no retries.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

use crate::llm_client::prompts::RESUME_WRITER_SYSTEM;

pub const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_OLLAMA_MODEL: &str = "phi3:mini";

/// Upper bound for a single remote call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Every failure string handed back in place of generated text starts with this.
pub const FAILURE_MARKER: &str = "❌";

const GROQ_MAX_TOKENS: u32 = 300;
const GROQ_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0} is not set")]
    MissingApiKey(&'static str),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A remote text-generation capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Backend name used in logs and status-error strings.
    fn name(&self) -> &'static str;

    /// Prefix used when a call fails without a response status.
    fn failure_label(&self) -> &'static str {
        self.name()
    }

    /// Sends `prompt` and returns the generated text, trimmed.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Converts a backend failure into the user-facing sentinel string.
pub fn failure_message(backend: &dyn TextGenerator, err: &LlmError) -> String {
    match err {
        LlmError::Api { .. } => format!(
            "{FAILURE_MARKER} {} API error. Please try Smart/Local mode.",
            backend.name()
        ),
        other => format!("{FAILURE_MARKER} {} failed: {other}", backend.failure_label()),
    }
}

fn build_http_client(timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

async fn read_success_body(response: reqwest::Response) -> Result<String, LlmError> {
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        let message = response.text().await.unwrap_or_default();
        return Err(LlmError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.text().await?)
}

// ────────────────────────────────────────────────────────────────────────────
// Hosted backend (Groq, OpenAI-compatible chat completions)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

/// Hosted chat-completions backend. Authorised with a bearer token.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GroqClient {
    pub fn new(
        endpoint: String,
        model: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            endpoint,
            model,
            api_key,
        })
    }
}

#[async_trait]
impl TextGenerator for GroqClient {
    fn name(&self) -> &'static str {
        "Groq"
    }

    fn failure_label(&self) -> &'static str {
        "Groq API"
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingApiKey("GROQ_API_KEY"))?;

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: RESUME_WRITER_SYSTEM,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: GROQ_MAX_TOKENS,
            temperature: GROQ_TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let body = read_success_body(response).await?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(LlmError::EmptyContent)?;

        debug!("Groq call succeeded: {} chars", text.len());
        Ok(text.trim().to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Local daemon backend (Ollama)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

/// Sampling settings tuned for small local models.
#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    num_predict: u32,
    num_ctx: u32,
    stop: [&'static str; 3],
}

impl Default for OllamaOptions {
    fn default() -> Self {
        Self {
            temperature: 0.5,
            top_p: 0.8,
            top_k: 20,
            num_predict: 200,
            num_ctx: 1024,
            stop: ["###", "---", "\n\n\n"],
        }
    }
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    response: String,
}

/// Local inference daemon backend. No authentication.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaClient {
    pub fn new(endpoint: String, model: String, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            endpoint,
            model,
        })
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    fn name(&self) -> &'static str {
        "Ollama"
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: OllamaOptions::default(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await?;

        let body = read_success_body(response).await?;
        let parsed: OllamaResponse = serde_json::from_str(&body)?;

        debug!("Ollama call succeeded: {} chars", parsed.response.len());
        Ok(parsed.response.trim().to_string())
    }
}
