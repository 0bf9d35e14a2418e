//! Section extractor: a single forward pass over resume lines that attributes
//! each line to at most one experience section.
//!
//! Anchors are matched case-sensitively, terminators case-insensitively.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::models::resume::SectionId;

/// Terminators shared by both built-in rules.
pub const DEFAULT_TERMINATORS: [&str; 3] = ["skills", "education", "project"];

/// One entry of the ordered rule list. Earlier rules win when a line
/// matches anchors from several rules.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectionRule {
    pub section: SectionId,
    pub anchors: Vec<String>,
    #[serde(default = "default_terminators")]
    pub terminators: Vec<String>,
}

fn default_terminators() -> Vec<String> {
    DEFAULT_TERMINATORS.iter().map(|t| t.to_string()).collect()
}

impl SectionRule {
    fn opens(&self, line: &str) -> bool {
        self.anchors.iter().any(|a| line.contains(a.as_str()))
    }

    fn closes(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.terminators
            .iter()
            .any(|t| lower.contains(&t.to_lowercase()))
    }
}

/// Built-in rules: Ipsos before Route Mobile.
pub fn default_section_rules() -> Vec<SectionRule> {
    vec![
        SectionRule {
            section: SectionId::Ipsos,
            anchors: vec!["Ipsos".to_string(), "Software Engineer".to_string()],
            terminators: default_terminators(),
        },
        SectionRule {
            section: SectionId::Route,
            anchors: vec!["Route Mobile".to_string(), "Software Developer".to_string()],
            terminators: default_terminators(),
        },
    ]
}

/// Splits `text` into experience sections according to `rules`.
///
/// The result always contains every company `SectionId` (and every section a
/// rule names), with an empty string for sections that never opened. Each
/// attributed line is stored trimmed and followed by a newline.
pub fn extract_sections(text: &str, rules: &[SectionRule]) -> BTreeMap<SectionId, String> {
    let mut sections: BTreeMap<SectionId, String> = SectionId::COMPANIES
        .iter()
        .chain(rules.iter().map(|r| &r.section))
        .map(|id| (*id, String::new()))
        .collect();

    // Index into `rules` of the section currently accumulating.
    let mut current: Option<usize> = None;

    for raw_line in text.split('\n') {
        let line = raw_line.trim();

        if let Some(idx) = rules.iter().position(|rule| rule.opens(line)) {
            current = Some(idx);
            append_line(&mut sections, rules[idx].section, line);
            continue;
        }

        let Some(idx) = current else {
            continue;
        };
        if line.is_empty() {
            continue;
        }

        let rule = &rules[idx];
        append_line(&mut sections, rule.section, line);
        if rule.closes(line) {
            current = None;
        }
    }

    sections
}

fn append_line(sections: &mut BTreeMap<SectionId, String>, id: SectionId, line: &str) {
    let buffer = sections.entry(id).or_default();
    buffer.push_str(line);
    buffer.push('\n');
}
