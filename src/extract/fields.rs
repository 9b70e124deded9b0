use regex::Regex;

use crate::extract::markers::FieldPatterns;

/// Raw field values pulled out of one segment, before assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    /// `None` when the prompt delimiters were not found; may be empty otherwise.
    pub prompt: Option<String>,
    /// Texts of the option slots that matched, in slot order.
    pub answers: Vec<String>,
    pub correct_answer_statement: Option<String>,
    pub explanation: Option<String>,
    pub reference: Option<String>,
}

/// Extract every field of `segment`. Each field re-scans the whole segment.
#[must_use]
pub fn extract_fields(segment: &str, patterns: &FieldPatterns) -> RawFields {
    RawFields {
        prompt: capture(&patterns.prompt, segment),
        answers: patterns
            .options
            .iter()
            .filter_map(|slot| capture(slot, segment))
            .collect(),
        correct_answer_statement: non_empty(capture(&patterns.correct_answer, segment)),
        explanation: non_empty(capture(&patterns.explanation, segment)),
        reference: non_empty(capture(&patterns.reference, segment)),
    }
}

/// Trimmed first capture group, if the pattern matched.
fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
