//! Summary extractor. Independent of the section rules: it has its own
//! anchors and its own stop words, and stops for good at the first stop line.

const SUMMARY_ANCHORS: [&str; 3] = ["summary", "objective", "profile"];
const SUMMARY_STOP_WORDS: [&str; 3] = ["experience", "skills", "education"];

fn contains_any(line: &str, needles: &[&str]) -> bool {
    let lower = line.to_lowercase();
    needles.iter().any(|n| lower.contains(n))
}

/// Returns the professional summary as a single space-joined paragraph,
/// or an empty string when no summary heading is present.
///
/// Heading lines are dropped, even when they reappear inside the summary.
pub fn extract_summary(text: &str) -> String {
    let mut summary = String::new();
    let mut in_summary = false;

    for raw_line in text.split('\n') {
        let line = raw_line.trim();

        if contains_any(line, &SUMMARY_ANCHORS) {
            in_summary = true;
            continue;
        }
        if !in_summary || line.is_empty() {
            continue;
        }
        if contains_any(line, &SUMMARY_STOP_WORDS) {
            break;
        }
        summary.push_str(line);
        summary.push(' ');
    }

    summary.trim().to_string()
}
