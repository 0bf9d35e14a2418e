//! Keyword matcher: finds vocabulary terms in a raw job description.
//!
//! Plain substring matching over the lower-cased text: no stemming and no
//! word boundaries, so "java" also fires for "javascript" and "ai" for
//! "maintain". Downstream rules are written against this behaviour.

use crate::models::resume::JobDescription;

/// Tech vocabulary in declaration order. Result order follows this list.
pub const TECH_VOCABULARY: [&str; 35] = [
    "python",
    "django",
    "flask",
    "fastapi",
    "api",
    "rest",
    "sql",
    "postgresql",
    "mysql",
    "aws",
    "docker",
    "kubernetes",
    "redis",
    "celery",
    "git",
    "ci/cd",
    "machine learning",
    "ml",
    "ai",
    "javascript",
    "react",
    "microservices",
    "cloud",
    "backend",
    "frontend",
    "database",
    "nosql",
    "mongodb",
    "java",
    "spring",
    "nodejs",
    "vue",
    "angular",
    "jenkins",
    "devops",
];

/// Returns every vocabulary term present in `jd_text`, in vocabulary order.
pub fn match_keywords(jd_text: &str) -> Vec<String> {
    if jd_text.is_empty() {
        return Vec::new();
    }

    let jd_lower = jd_text.to_lowercase();
    TECH_VOCABULARY
        .iter()
        .filter(|kw| jd_lower.contains(*kw))
        .map(|kw| kw.to_string())
        .collect()
}

/// Wraps the raw text with its matched keywords.
pub fn parse_job_description(jd_text: &str) -> JobDescription {
    JobDescription {
        raw_text: jd_text.to_string(),
        keywords: match_keywords(jd_text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_matches_nothing() {
        assert!(match_keywords("").is_empty());
    }

    #[test]
    fn test_result_follows_vocabulary_order() {
        assert_eq!(
            match_keywords("We use AWS and REST API heavily"),
            vec!["api", "rest", "aws"]
        );
    }

    #[test]
    fn test_java_matches_inside_javascript() {
        let keywords = match_keywords("Strong JavaScript skills");
        assert!(keywords.contains(&"javascript".to_string()));
        assert!(keywords.contains(&"java".to_string()));
    }

    #[test]
    fn test_multi_word_and_symbol_terms() {
        let keywords = match_keywords("Machine Learning pipelines with CI/CD on Kubernetes");
        assert_eq!(keywords, vec!["kubernetes", "ci/cd", "machine learning"]);
    }

    #[test]
    fn test_each_term_reported_once() {
        let keywords = match_keywords("docker docker DOCKER");
        assert_eq!(keywords, vec!["docker"]);
    }

    #[test]
    fn test_vocabulary_has_no_duplicates() {
        let mut sorted = TECH_VOCABULARY.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), TECH_VOCABULARY.len());
    }

    #[test]
    fn test_parse_job_description_keeps_raw_text() {
        let jd = parse_job_description("Python backend role");
        assert_eq!(jd.raw_text, "Python backend role");
        assert_eq!(jd.keywords, vec!["python", "backend"]);
    }
}
