// Prompt construction for delegated generation.
// The hosted backend gets the full text and every keyword; the local daemon
// runs small models with a 1k context, so its prompts are compact and truncated.

const COMPACT_SUMMARY_KEYWORDS: usize = 5;
const COMPACT_SUMMARY_CHARS: usize = 200;
const COMPACT_EXPERIENCE_KEYWORDS: usize = 3;
const COMPACT_EXPERIENCE_CHARS: usize = 300;

/// Prompt shape expected by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    Detailed,
    Compact,
}

/// First `max_chars` characters of `text`, never splitting a code point.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

fn join_keywords(keywords: &[String], limit: Option<usize>) -> String {
    let take = limit.unwrap_or(keywords.len());
    keywords
        .iter()
        .take(take)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prompt asking for a rewritten professional summary.
pub fn summary_prompt(style: PromptStyle, current_summary: &str, keywords: &[String]) -> String {
    match style {
        PromptStyle::Detailed => format!(
            "Rewrite this professional summary to match the job requirements. Keep it 3-4 sentences and ATS-friendly:\n\n\
             Current Summary: {}\n\n\
             Job Keywords: {}\n\n\
             Focus on: Python, Django, Flask, and relevant skills from the job keywords.",
            current_summary,
            join_keywords(keywords, None)
        ),
        PromptStyle::Compact => format!(
            "Rewrite professional summary for Software Developer. Include these keywords: {}. Current: {}",
            join_keywords(keywords, Some(COMPACT_SUMMARY_KEYWORDS)),
            truncate_chars(current_summary, COMPACT_SUMMARY_CHARS)
        ),
    }
}

/// Prompt asking for rewritten experience bullets for one company.
pub fn experience_prompt(
    style: PromptStyle,
    company_name: &str,
    experience_text: &str,
    keywords: &[String],
) -> String {
    match style {
        PromptStyle::Detailed => format!(
            "Rewrite this work experience with 4-5 bullet points. Make it ATS-friendly and highlight skills relevant to the job:\n\n\
             Company: {}\n\
             Experience: {}\n\
             Job Keywords: {}\n\n\
             Focus on technical achievements and quantifiable results.",
            company_name,
            experience_text,
            join_keywords(keywords, None)
        ),
        PromptStyle::Compact => format!(
            "Rewrite {} experience in 4 bullet points. Include: {}. Text: {}",
            company_name,
            join_keywords(keywords, Some(COMPACT_EXPERIENCE_KEYWORDS)),
            truncate_chars(experience_text, COMPACT_EXPERIENCE_CHARS)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kws(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_truncate_chars_respects_code_points() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_detailed_summary_prompt_embeds_everything() {
        let keywords = kws(&["python", "api", "rest", "sql", "aws", "docker"]);
        let prompt = summary_prompt(PromptStyle::Detailed, "Backend dev.", &keywords);
        assert!(prompt.starts_with("Rewrite this professional summary"));
        assert!(prompt.contains("\n\nCurrent Summary: Backend dev.\n\n"));
        assert!(prompt.contains("Job Keywords: python, api, rest, sql, aws, docker\n\n"));
        assert!(prompt.ends_with("relevant skills from the job keywords."));
    }

    #[test]
    fn test_compact_summary_prompt_truncates() {
        let keywords = kws(&["python", "api", "rest", "sql", "aws", "docker"]);
        let long_summary = "x".repeat(500);
        let prompt = summary_prompt(PromptStyle::Compact, &long_summary, &keywords);
        assert_eq!(
            prompt,
            format!(
                "Rewrite professional summary for Software Developer. Include these keywords: python, api, rest, sql, aws. Current: {}",
                "x".repeat(200)
            )
        );
    }

    #[test]
    fn test_detailed_experience_prompt_layout() {
        let prompt = experience_prompt(
            PromptStyle::Detailed,
            "Ipsos",
            "Built ETL",
            &kws(&["aws"]),
        );
        assert!(prompt.contains("\n\nCompany: Ipsos\nExperience: Built ETL\nJob Keywords: aws\n\n"));
    }

    #[test]
    fn test_compact_experience_prompt_truncates() {
        let text = "y".repeat(301);
        let prompt = experience_prompt(
            PromptStyle::Compact,
            "Route Mobile",
            &text,
            &kws(&["api", "rest", "aws", "docker"]),
        );
        assert_eq!(
            prompt,
            format!(
                "Rewrite Route Mobile experience in 4 bullet points. Include: api, rest, aws. Text: {}",
                "y".repeat(300)
            )
        );
    }

    #[test]
    fn test_prompts_do_not_reinterpret_braces_in_user_text() {
        let prompt = summary_prompt(PromptStyle::Detailed, "uses {keywords} literally", &[]);
        assert!(prompt.contains("Current Summary: uses {keywords} literally"));
    }
}
