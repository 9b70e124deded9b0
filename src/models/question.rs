use serde::{Deserialize, Serialize};

/// One lettered option within a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Option body, trimmed, without its `a.`..`d.` marker.
    pub text: String,
    /// Set for at most one answer per question.
    #[serde(rename = "isCorrect", default)]
    pub is_correct: bool,
}

impl Answer {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_correct: false,
        }
    }
}

/// One parsed quiz item.
///
/// Serialized with the field names of the external JSON format
/// (`question`, `correctAnswer`, `explain`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    pub answers: Vec<Answer>,
    /// Raw "correct answer" text as found in the source.
    #[serde(
        rename = "correctAnswer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub correct_answer_statement: Option<String>,
    #[serde(rename = "explain", default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Question {
    /// Index of the answer marked correct, if any.
    #[must_use]
    pub fn correct_index(&self) -> Option<usize> {
        self.answers.iter().position(|a| a.is_correct)
    }
}

/// Serialized form plus count, the packaging consumers expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
    pub count: usize,
}

impl From<Vec<Question>> for QuestionSet {
    fn from(questions: Vec<Question>) -> Self {
        let count = questions.len();
        Self { questions, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question {
            prompt: "What is 2+2?".into(),
            answers: vec![
                Answer::new("3"),
                Answer {
                    text: "4".into(),
                    is_correct: true,
                },
            ],
            correct_answer_statement: Some("b".into()),
            explanation: None,
            reference: Some("Arithmetic 101".into()),
        }
    }

    #[test]
    fn serializes_with_external_field_names() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"question\":\"What is 2+2?\""));
        assert!(json.contains("\"isCorrect\":true"));
        assert!(json.contains("\"correctAnswer\":\"b\""));
        assert!(json.contains("\"reference\":\"Arithmetic 101\""));
        assert!(!json.contains("explain"));
    }

    #[test]
    fn deserializes_missing_is_correct_as_false() {
        let q: Question =
            serde_json::from_str(r#"{"question":"Q","answers":[{"text":"x"}]}"#).unwrap();
        assert!(!q.answers[0].is_correct);
        assert!(q.correct_answer_statement.is_none());
    }

    #[test]
    fn correct_index_finds_marked_answer() {
        assert_eq!(sample().correct_index(), Some(1));
    }

    #[test]
    fn question_set_counts() {
        let set = QuestionSet::from(vec![sample(), sample()]);
        assert_eq!(set.count, 2);
    }
}
