use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::extraction::sections::{default_section_rules, SectionRule};
use crate::llm_client::{
    DEFAULT_GROQ_MODEL, DEFAULT_GROQ_URL, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL,
};

/// Application configuration loaded from environment variables.
/// Every variable has a default except the Groq key, which stays unset
/// (hosted generation then reports a failure string).
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub groq_api_url: String,
    pub groq_model: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub section_rules_path: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: optional_env("GROQ_API_KEY"),
            groq_api_url: env_or("GROQ_API_URL", DEFAULT_GROQ_URL),
            groq_model: env_or("GROQ_MODEL", DEFAULT_GROQ_MODEL),
            ollama_url: env_or("OLLAMA_URL", DEFAULT_OLLAMA_URL),
            ollama_model: env_or("OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL),
            section_rules_path: optional_env("SECTION_RULES_PATH").map(PathBuf::from),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Section rules from `SECTION_RULES_PATH`, or the built-in rules.
    pub fn section_rules(&self) -> Result<Vec<SectionRule>> {
        match &self.section_rules_path {
            Some(path) => load_section_rules(path),
            None => Ok(default_section_rules()),
        }
    }
}

/// Reads an ordered JSON list of section rules.
pub fn load_section_rules(path: &Path) -> Result<Vec<SectionRule>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read section rules from {}", path.display()))?;
    let rules: Vec<SectionRule> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid section rules in {}", path.display()))?;
    validate_section_rules(&rules)?;
    Ok(rules)
}

fn validate_section_rules(rules: &[SectionRule]) -> Result<()> {
    if rules.is_empty() {
        bail!("Section rules must not be empty");
    }
    for rule in rules {
        if !rule.section.is_company() {
            bail!("Section rules may only target experience sections, got '{}'", rule.section);
        }
        if rule.anchors.is_empty() || rule.anchors.iter().any(|a| a.is_empty()) {
            bail!("Rule for '{}' needs at least one non-empty anchor", rule.section);
        }
        if rule.terminators.iter().any(|t| t.is_empty()) {
            bail!("Rule for '{}' has an empty terminator", rule.section);
        }
    }
    Ok(())
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
