use serde::Serialize;

use crate::models::question::Question;
use crate::operations::stats::TextStats;

/// Processing outcome of one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    /// Text was read and the extractor ran (zero questions is still completed).
    Completed,
    /// The text could not be obtained or strict extraction rejected it.
    Failed,
}

/// Result of processing one document: identity, statistics and questions.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    /// SHA-256 of the document text (empty when the text could not be read).
    pub id: String,
    /// Path of the source file, `-` for stdin.
    pub source: String,
    pub status: ProcessingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<TextStats>,
    pub question_count: usize,
    pub questions: Vec<Question>,
    pub conversion_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentReport {
    /// Report for a document whose processing failed.
    #[must_use]
    pub fn failed(source: impl Into<String>, error: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            id: String::new(),
            source: source.into(),
            status: ProcessingStatus::Failed,
            stats: None,
            question_count: 0,
            questions: Vec::new(),
            conversion_time_ms: elapsed_ms,
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == ProcessingStatus::Completed
    }
}
