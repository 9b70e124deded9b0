//! Question extraction from quiz transcript text.
//!
//! The pipeline is segmentation (`segmenter`), per-segment field extraction
//! (`fields`), correctness resolution (`resolver`) and assembly (here).
//! Extraction is a pure function of the input text and the marker table.

pub mod fields;
pub mod markers;
pub mod resolver;
pub mod segmenter;

use serde::Serialize;
use tracing::debug;

use crate::error::{QuizError, Result};
use crate::models::question::{Answer, Question};

pub use markers::{FieldPatterns, MarkerTable};

/// Why a segment produced no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentIssue {
    /// The prompt delimiters (boundary ... select-one) were not found.
    MissingPrompt,
    /// The prompt delimiters were found but enclose only whitespace.
    EmptyPrompt,
    /// None of the four option slots matched.
    NoAnswers,
}

impl SegmentIssue {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingPrompt => "missing_prompt",
            Self::EmptyPrompt => "empty_prompt",
            Self::NoAnswers => "no_answers",
        }
    }
}

/// A segment that was dropped, with its 0-based position among all segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSegment {
    pub index: usize,
    pub reason: SegmentIssue,
}

/// Emitted questions plus the segments that were dropped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionOutcome {
    pub questions: Vec<Question>,
    pub skipped: Vec<SkippedSegment>,
}

/// Converts transcript text into questions using a marker table.
#[derive(Debug, Clone)]
pub struct Extractor {
    markers: MarkerTable,
    patterns: FieldPatterns,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// Extractor for the default (Vietnamese) marker table.
    #[must_use]
    pub fn new() -> Self {
        let markers = MarkerTable::default();
        let patterns = markers
            .compile()
            .expect("default marker table must compile");
        Self { markers, patterns }
    }

    /// Extractor for a custom marker table.
    pub fn with_markers(markers: MarkerTable) -> Result<Self> {
        let patterns = markers.compile()?;
        Ok(Self { markers, patterns })
    }

    #[must_use]
    pub fn markers(&self) -> &MarkerTable {
        &self.markers
    }

    /// Extract every well-formed question, silently dropping the rest.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<Question> {
        self.extract_detailed(text).questions
    }

    /// Like [`Extractor::extract`], also reporting which segments were dropped.
    #[must_use]
    pub fn extract_detailed(&self, text: &str) -> ExtractionOutcome {
        let mut outcome = ExtractionOutcome::default();

        for (index, segment) in segmenter::segments(text, &self.patterns.boundary)
            .into_iter()
            .enumerate()
        {
            match self.assemble(segment) {
                Ok(question) => outcome.questions.push(question),
                Err(reason) => {
                    debug!(index, reason = reason.as_str(), "dropping segment");
                    outcome.skipped.push(SkippedSegment { index, reason });
                }
            }
        }

        outcome
    }

    /// Validating variant: the first malformed segment is an error.
    pub fn extract_strict(&self, text: &str) -> Result<Vec<Question>> {
        let outcome = self.extract_detailed(text);
        match outcome.skipped.first() {
            Some(skipped) => Err(QuizError::MalformedSegment {
                index: skipped.index,
                reason: skipped.reason.as_str().to_string(),
            }),
            None => Ok(outcome.questions),
        }
    }

    fn assemble(&self, segment: &str) -> std::result::Result<Question, SegmentIssue> {
        let raw = fields::extract_fields(segment, &self.patterns);

        let prompt = raw.prompt.ok_or(SegmentIssue::MissingPrompt)?;
        if prompt.is_empty() {
            return Err(SegmentIssue::EmptyPrompt);
        }
        if raw.answers.is_empty() {
            return Err(SegmentIssue::NoAnswers);
        }

        let mut answers: Vec<Answer> = raw.answers.into_iter().map(Answer::new).collect();
        let statement = raw.correct_answer_statement;
        if statement.is_some()
            && resolver::resolve_correct(statement.as_deref(), &mut answers).is_none()
        {
            debug!(statement = ?statement, "correct answer not resolved");
        }

        Ok(Question {
            prompt,
            answers,
            correct_answer_statement: statement,
            explanation: raw.explanation,
            reference: raw.reference,
        })
    }
}

/// Extract questions with the default marker table.
#[must_use]
pub fn extract_questions(text: &str) -> Vec<Question> {
    Extractor::new().extract(text)
}
