//! Content generation: dispatches a request to the strategy selected by
//! `GenerationMode`.
//!
//! Local mode assembles text from fixed templates. Hosted and daemon modes
//! build a prompt and hand it to a `TextGenerator`; any backend failure is
//! turned into a failure string here and never propagates further.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::local::{local_experience, local_summary};
use crate::generation::prompts::{experience_prompt, summary_prompt, PromptStyle};
use crate::llm_client::{failure_message, TextGenerator};
use crate::models::resume::{GeneratedContent, GenerationMode, SectionId};

/// One way of producing tailored text. Infallible by contract: failures are
/// reported inside the returned string.
#[async_trait]
pub trait ContentStrategy: Send + Sync {
    async fn summary(&self, current_summary: &str, keywords: &[String]) -> String;

    async fn experience(
        &self,
        company_name: &str,
        experience_text: &str,
        keywords: &[String],
    ) -> String;
}

/// Rule-based generation. Ignores the current text entirely.
pub struct LocalGenerator;

#[async_trait]
impl ContentStrategy for LocalGenerator {
    async fn summary(&self, _current_summary: &str, keywords: &[String]) -> String {
        local_summary(keywords)
    }

    async fn experience(
        &self,
        company_name: &str,
        _experience_text: &str,
        keywords: &[String],
    ) -> String {
        local_experience(company_name, keywords)
    }
}

/// Prompt-and-call generation through a remote backend.
pub struct DelegatedGenerator {
    backend: Arc<dyn TextGenerator>,
    style: PromptStyle,
}

impl DelegatedGenerator {
    pub fn new(backend: Arc<dyn TextGenerator>, style: PromptStyle) -> Self {
        Self { backend, style }
    }

    async fn call(&self, prompt: String) -> String {
        match self.backend.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("{} generation failed: {e}", self.backend.name());
                failure_message(self.backend.as_ref(), &e)
            }
        }
    }
}

#[async_trait]
impl ContentStrategy for DelegatedGenerator {
    async fn summary(&self, current_summary: &str, keywords: &[String]) -> String {
        self.call(summary_prompt(self.style, current_summary, keywords))
            .await
    }

    async fn experience(
        &self,
        company_name: &str,
        experience_text: &str,
        keywords: &[String],
    ) -> String {
        self.call(experience_prompt(
            self.style,
            company_name,
            experience_text,
            keywords,
        ))
        .await
    }
}

/// Holds one strategy per `GenerationMode`. Cheap to clone.
#[derive(Clone)]
pub struct ContentGenerator {
    local: Arc<dyn ContentStrategy>,
    hosted: Arc<dyn ContentStrategy>,
    daemon: Arc<dyn ContentStrategy>,
}

impl ContentGenerator {
    pub fn new(hosted: Arc<dyn TextGenerator>, daemon: Arc<dyn TextGenerator>) -> Self {
        Self {
            local: Arc::new(LocalGenerator),
            hosted: Arc::new(DelegatedGenerator::new(hosted, PromptStyle::Detailed)),
            daemon: Arc::new(DelegatedGenerator::new(daemon, PromptStyle::Compact)),
        }
    }

    fn strategy(&self, mode: GenerationMode) -> &dyn ContentStrategy {
        match mode {
            GenerationMode::Local => self.local.as_ref(),
            GenerationMode::Hosted => self.hosted.as_ref(),
            GenerationMode::Daemon => self.daemon.as_ref(),
        }
    }

    pub async fn generate_summary(
        &self,
        mode: GenerationMode,
        current_summary: &str,
        keywords: &[String],
    ) -> String {
        info!("Generating summary (mode={mode:?}, {} keywords)", keywords.len());
        self.strategy(mode).summary(current_summary, keywords).await
    }

    /// Generates bullets for one company section.
    ///
    /// The caller must have extracted text for the section: an empty
    /// `experience_text` is `SectionNotFound`.
    pub async fn generate_experience(
        &self,
        mode: GenerationMode,
        section: SectionId,
        experience_text: &str,
        keywords: &[String],
    ) -> Result<String, AppError> {
        if !section.is_company() {
            return Err(AppError::Validation(format!(
                "'{section}' is not an experience section"
            )));
        }
        if experience_text.is_empty() {
            return Err(AppError::SectionNotFound(section));
        }

        info!(
            "Generating {} experience (mode={mode:?}, {} keywords)",
            section,
            keywords.len()
        );
        Ok(self
            .strategy(mode)
            .experience(section.display_name(), experience_text, keywords)
            .await)
    }

    /// Generates the summary and every company section that has extracted
    /// text, in section order.
    pub async fn generate_all(
        &self,
        mode: GenerationMode,
        current_summary: &str,
        sections: &BTreeMap<SectionId, String>,
        keywords: Vec<String>,
    ) -> GeneratedContent {
        let mut content = GeneratedContent::new(mode, keywords);
        content.summary_text = self
            .generate_summary(mode, current_summary, &content.keywords)
            .await;

        for section in SectionId::COMPANIES {
            let text = sections.get(&section).map(String::as_str).unwrap_or("");
            match self
                .generate_experience(mode, section, text, &content.keywords)
                .await
            {
                Ok(generated) => {
                    content.experiences.insert(section, generated);
                }
                Err(e) => info!("Skipping {section}: {e}"),
            }
        }

        content
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use axum::{routing::post, Json, Router};
    use serde_json::json;

    use super::*;
    use crate::generation::local::SUMMARY_BASE;
    use crate::llm_client::{
        GroqClient, LlmError, OllamaClient, DEFAULT_GROQ_MODEL, DEFAULT_OLLAMA_MODEL,
        FAILURE_MARKER, REQUEST_TIMEOUT,
    };

    /// Records prompts and answers with a canned reply.
    struct EchoBackend {
        prompts: Mutex<Vec<String>>,
    }

    impl EchoBackend {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for EchoBackend {
        fn name(&self) -> &'static str {
            "Echo"
        }

        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(format!("generated #{}", self.prompts.lock().unwrap().len()))
        }
    }

    struct DownBackend;

    #[async_trait]
    impl TextGenerator for DownBackend {
        fn name(&self) -> &'static str {
            "Down"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 500,
                message: "internal".to_string(),
            })
        }
    }

    fn kws(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_local_mode_never_calls_backends() {
        let hosted = EchoBackend::new();
        let daemon = EchoBackend::new();
        let generator = ContentGenerator::new(hosted.clone(), daemon.clone());

        let summary = generator
            .generate_summary(GenerationMode::Local, "ignored", &kws(&["aws"]))
            .await;
        assert!(summary.starts_with(SUMMARY_BASE));
        assert!(hosted.prompts.lock().unwrap().is_empty());
        assert!(daemon.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_modes_use_their_prompt_style() {
        let hosted = EchoBackend::new();
        let daemon = EchoBackend::new();
        let generator = ContentGenerator::new(hosted.clone(), daemon.clone());
        let keywords = kws(&["python"]);

        generator
            .generate_summary(GenerationMode::Hosted, "Dev.", &keywords)
            .await;
        generator
            .generate_summary(GenerationMode::Daemon, "Dev.", &keywords)
            .await;

        assert!(hosted.prompts.lock().unwrap()[0].starts_with("Rewrite this professional summary"));
        assert!(daemon.prompts.lock().unwrap()[0]
            .starts_with("Rewrite professional summary for Software Developer"));
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_marked_string() {
        let generator = ContentGenerator::new(Arc::new(DownBackend), Arc::new(DownBackend));
        let text = generator
            .generate_experience(GenerationMode::Hosted, SectionId::Ipsos, "Ipsos\n", &[])
            .await
            .unwrap();
        assert!(text.starts_with(FAILURE_MARKER));
        assert_eq!(text, "❌ Down API error. Please try Smart/Local mode.");
    }

    /// A URL nothing is listening on.
    async fn closed_port_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn test_unreachable_backends_use_their_failure_prefix() {
        let url = closed_port_url().await;
        let hosted = GroqClient::new(
            url.clone(),
            DEFAULT_GROQ_MODEL.to_string(),
            Some("secret".to_string()),
            REQUEST_TIMEOUT,
        )
        .unwrap();
        let daemon =
            OllamaClient::new(url, DEFAULT_OLLAMA_MODEL.to_string(), REQUEST_TIMEOUT).unwrap();
        let generator = ContentGenerator::new(Arc::new(hosted), Arc::new(daemon));

        let hosted_text = generator
            .generate_summary(GenerationMode::Hosted, "Dev.", &[])
            .await;
        let daemon_text = generator
            .generate_summary(GenerationMode::Daemon, "Dev.", &[])
            .await;

        assert!(hosted_text.starts_with("❌ Groq API failed: "), "{hosted_text}");
        assert!(daemon_text.starts_with("❌ Ollama failed: "), "{daemon_text}");
    }

    #[tokio::test]
    async fn test_daemon_timeout_becomes_marked_string() {
        let app = Router::new().route(
            "/",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"response": "too late"}))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let daemon = OllamaClient::new(
            format!("http://{addr}/"),
            DEFAULT_OLLAMA_MODEL.to_string(),
            Duration::from_millis(200),
        )
        .unwrap();
        let generator = ContentGenerator::new(EchoBackend::new(), Arc::new(daemon));

        let text = generator
            .generate_experience(GenerationMode::Daemon, SectionId::Route, "Route Mobile\n", &[])
            .await
            .unwrap();
        assert!(text.starts_with(FAILURE_MARKER));
        assert!(text.starts_with("❌ Ollama failed: "), "{text}");
    }

    #[tokio::test]
    async fn test_empty_section_is_section_not_found() {
        let generator = ContentGenerator::new(EchoBackend::new(), EchoBackend::new());
        let result = generator
            .generate_experience(GenerationMode::Local, SectionId::Route, "", &[])
            .await;
        assert!(matches!(
            result,
            Err(AppError::SectionNotFound(SectionId::Route))
        ));
    }

    #[tokio::test]
    async fn test_summary_is_not_an_experience_section() {
        let generator = ContentGenerator::new(EchoBackend::new(), EchoBackend::new());
        let result = generator
            .generate_experience(GenerationMode::Local, SectionId::Summary, "text", &[])
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_experience_prompt_uses_display_name() {
        let hosted = EchoBackend::new();
        let generator = ContentGenerator::new(hosted.clone(), EchoBackend::new());
        generator
            .generate_experience(GenerationMode::Hosted, SectionId::Route, "Route Mobile\n", &[])
            .await
            .unwrap();
        assert!(hosted.prompts.lock().unwrap()[0].contains("Company: Route Mobile\n"));
    }

    #[tokio::test]
    async fn test_generate_all_skips_empty_sections() {
        let generator = ContentGenerator::new(EchoBackend::new(), EchoBackend::new());
        let mut sections = BTreeMap::new();
        sections.insert(SectionId::Ipsos, "Ipsos\nBuilt ETL\n".to_string());
        sections.insert(SectionId::Route, String::new());

        let content = generator
            .generate_all(GenerationMode::Local, "", &sections, kws(&["aws"]))
            .await;

        assert_eq!(content.mode, GenerationMode::Local);
        assert_eq!(content.keywords, vec!["aws"]);
        assert!(content.summary_text.starts_with(SUMMARY_BASE));
        assert_eq!(content.experiences.len(), 1);
        assert!(content.experiences[&SectionId::Ipsos].contains("AWS"));
    }

    #[tokio::test]
    async fn test_generate_all_produces_fresh_results() {
        let generator = ContentGenerator::new(EchoBackend::new(), EchoBackend::new());
        let sections = BTreeMap::new();
        let first = generator
            .generate_all(GenerationMode::Local, "", &sections, vec![])
            .await;
        let second = generator
            .generate_all(GenerationMode::Local, "", &sections, vec![])
            .await;
        assert_ne!(first.id, second.id);
        assert_eq!(first.summary_text, second.summary_text);
        assert!(first.experiences.is_empty());
    }
}
