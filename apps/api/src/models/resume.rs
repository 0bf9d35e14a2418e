use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of resume sections the extractor knows about.
///
/// Variant order is the section order: `BTreeMap<SectionId, _>` iterates
/// summary first, then the two experience blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Summary,
    Ipsos,
    Route,
}

impl SectionId {
    /// Experience sections only, in priority order.
    pub const COMPANIES: [SectionId; 2] = [SectionId::Ipsos, SectionId::Route];

    /// Human-facing company (or section) name, as written on the resume.
    pub fn display_name(self) -> &'static str {
        match self {
            SectionId::Summary => "Summary",
            SectionId::Ipsos => "Ipsos",
            SectionId::Route => "Route Mobile",
        }
    }

    pub fn is_company(self) -> bool {
        !matches!(self, SectionId::Summary)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How tailored text is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Rule-based template assembly, no network.
    #[default]
    Local,
    /// Hosted chat-completions API (Groq).
    Hosted,
    /// Local inference daemon (Ollama).
    Daemon,
}

/// A decoded resume with its extracted sections.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResumeDocument {
    pub raw_text: String,
    pub summary: String,
    /// Always carries every `SectionId`; sections whose anchor never appeared are empty.
    pub sections: BTreeMap<SectionId, String>,
}

impl ResumeDocument {
    pub fn section(&self, id: SectionId) -> &str {
        self.sections.get(&id).map(String::as_str).unwrap_or("")
    }
}

/// A job description and the vocabulary keywords found in it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobDescription {
    pub raw_text: String,
    /// Vocabulary declaration order, not order of appearance.
    pub keywords: Vec<String>,
}

/// Result of one generation request. Never merged with a previous result;
/// the caller keeps whichever value it wants to retain.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedContent {
    pub id: Uuid,
    pub mode: GenerationMode,
    pub generated_at: DateTime<Utc>,
    pub keywords: Vec<String>,
    pub summary_text: String,
    pub experiences: BTreeMap<SectionId, String>,
}

impl GeneratedContent {
    pub fn new(mode: GenerationMode, keywords: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            generated_at: Utc::now(),
            keywords,
            summary_text: String::new(),
            experiences: BTreeMap::new(),
        }
    }
}
