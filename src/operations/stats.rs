//! Text statistics reported alongside extracted questions.

use std::path::Path;

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::ingest::reader;

/// Estimated words per printed page.
const WORDS_PER_PAGE: usize = 250;

/// Size statistics of a document's text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextStats {
    /// Whitespace-separated tokens.
    pub word_count: usize,
    /// Unicode scalar values.
    pub character_count: usize,
    /// Estimated from the word count.
    pub page_count: usize,
}

impl TextStats {
    #[must_use]
    pub fn compute(text: &str) -> Self {
        let word_count = text.split_whitespace().count();
        Self {
            word_count,
            character_count: text.chars().count(),
            page_count: word_count.div_ceil(WORDS_PER_PAGE),
        }
    }
}

/// Statistics for one transcript file.
pub fn file_stats(path: &Path, config: &Config) -> Result<TextStats> {
    let text = reader::read_text(path, config.settings.scan.max_file_size_bytes())?;
    Ok(TextStats::compute(&text))
}
