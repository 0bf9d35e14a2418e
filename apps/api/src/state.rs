use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::extraction::pdf::{DocumentTextSource, PdfTextSource};
use crate::extraction::sections::SectionRule;
use crate::generation::generator::ContentGenerator;
use crate::llm_client::{GroqClient, OllamaClient, REQUEST_TIMEOUT};

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-user data: every request carries its own resume and keywords.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Ordered anchor/terminator rules used by the section extractor.
    pub section_rules: Arc<Vec<SectionRule>>,
    pub text_source: Arc<dyn DocumentTextSource>,
    pub generator: ContentGenerator,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let section_rules = config.section_rules()?;

        let groq = GroqClient::new(
            config.groq_api_url.clone(),
            config.groq_model.clone(),
            config.groq_api_key.clone(),
            REQUEST_TIMEOUT,
        )?;
        let ollama = OllamaClient::new(
            config.ollama_url.clone(),
            config.ollama_model.clone(),
            REQUEST_TIMEOUT,
        )?;

        Ok(AppState {
            config,
            section_rules: Arc::new(section_rules),
            text_source: Arc::new(PdfTextSource),
            generator: ContentGenerator::new(Arc::new(groq), Arc::new(ollama)),
        })
    }
}

#[cfg(test)]
impl AppState {
    /// State with default rules and backends pointed at unroutable local ports.
    pub fn for_tests() -> Self {
        let config = Config {
            groq_api_key: None,
            groq_api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            groq_model: crate::llm_client::DEFAULT_GROQ_MODEL.to_string(),
            ollama_url: "http://127.0.0.1:9/api/generate".to_string(),
            ollama_model: crate::llm_client::DEFAULT_OLLAMA_MODEL.to_string(),
            section_rules_path: None,
            port: 0,
            rust_log: "debug".to_string(),
        };
        AppState::from_config(config).unwrap()
    }
}
