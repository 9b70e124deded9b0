use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};

/// Number of lettered answer slots (a to d).
pub const OPTION_SLOTS: usize = 4;

/// The fixed phrases that delimit the fields of a quiz transcript.
///
/// Every phrase is matched literally and case-insensitively. The defaults
/// are the Vietnamese markers produced by the quiz export this tool reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerTable {
    /// Starts a new question segment ("question-text paragraph").
    pub boundary: String,
    /// Ends the prompt.
    pub select_one: String,
    /// Lettered option markers, in slot order.
    pub options: Vec<String>,
    /// Feedback section header, ends the last option.
    pub response: String,
    /// Introduces the correct-answer statement.
    pub correct_answer: String,
    /// Introduces the explanation, ends the correct-answer statement.
    pub because: String,
    /// Introduces the reference, ends the explanation.
    pub reference: String,
    /// Guards explanation and reference against running into the next item.
    pub question: String,
}

impl Default for MarkerTable {
    fn default() -> Self {
        Self {
            boundary: "Đoạn văn câu hỏi".into(),
            select_one: "Select one".into(),
            options: vec!["a.".into(), "b.".into(), "c.".into(), "d.".into()],
            response: "Phản hồi".into(),
            correct_answer: "Đáp án đúng là:".into(),
            because: "Vì:".into(),
            reference: "Tham khảo:".into(),
            question: "Câu hỏi".into(),
        }
    }
}

impl MarkerTable {
    /// Named phrases, for validation and display.
    fn named(&self) -> Vec<(&'static str, &str)> {
        let mut named = vec![
            ("boundary", self.boundary.as_str()),
            ("select_one", self.select_one.as_str()),
            ("response", self.response.as_str()),
            ("correct_answer", self.correct_answer.as_str()),
            ("because", self.because.as_str()),
            ("reference", self.reference.as_str()),
            ("question", self.question.as_str()),
        ];
        for option in &self.options {
            named.push(("options", option.as_str()));
        }
        named
    }

    /// Reject tables the extractor cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.options.len() != OPTION_SLOTS {
            return Err(QuizError::InvalidMarkers {
                detail: format!(
                    "expected {OPTION_SLOTS} option markers, got {}",
                    self.options.len()
                ),
            });
        }
        for (name, phrase) in self.named() {
            if phrase.trim().is_empty() {
                return Err(QuizError::InvalidMarkers {
                    detail: format!("marker `{name}` is empty"),
                });
            }
        }
        Ok(())
    }

    /// Compile the table into the per-field patterns.
    pub fn compile(&self) -> Result<FieldPatterns> {
        self.validate()?;

        let boundary = lit(&self.boundary);
        let select_one = lit(&self.select_one);
        let response = lit(&self.response);
        let correct = lit(&self.correct_answer);
        let because = lit(&self.because);
        let reference = lit(&self.reference);
        let question = lit(&self.question);
        // Terminators match the phrase without its trailing colon.
        let correct_stem = lit(stem(&self.correct_answer));
        let reference_stem = lit(stem(&self.reference));

        let mut options = Vec::with_capacity(OPTION_SLOTS);
        for slot in 0..OPTION_SLOTS {
            let open = lit(&self.options[slot]);
            let close = match self.options.get(slot + 1) {
                Some(next) => lit(next),
                None => format!("(?:{response}|{correct_stem})"),
            };
            options.push(field(&format!(r"{open}\s*(.*?){close}"))?);
        }

        Ok(FieldPatterns {
            boundary: Regex::new(&format!("(?i){boundary}"))?,
            prompt: field(&format!(r"{boundary}\s*[:\-]?\s*(.*?){select_one}"))?,
            options,
            correct_answer: field(&format!(r"{correct}\s*(.*?)(?:{because}|$)"))?,
            explanation: field(&format!(
                r"{because}\s*(.*?)(?:{reference_stem}|{question}|$)"
            ))?,
            reference: field(&format!(r"{reference}\s*(.*?)(?:{question}|$)"))?,
        })
    }
}

/// Compiled patterns, one per extracted field. Each captures its value in group 1.
#[derive(Debug, Clone)]
pub struct FieldPatterns {
    pub boundary: Regex,
    pub prompt: Regex,
    pub options: Vec<Regex>,
    pub correct_answer: Regex,
    pub explanation: Regex,
    pub reference: Regex,
}

fn lit(phrase: &str) -> String {
    regex::escape(phrase.trim())
}

fn stem(phrase: &str) -> &str {
    phrase.trim().trim_end_matches(':').trim_end()
}

/// Case-insensitive, `.` spans newlines, `$` is end of text.
fn field(body: &str) -> Result<Regex> {
    Ok(Regex::new(&format!("(?is){body}"))?)
}
