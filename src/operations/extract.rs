//! Document processing around the question extractor.
//!
//! Reads transcript text, runs the extractor, and packages the result with
//! statistics and a processing status. A document that cannot be read is a
//! `failed` report, never an abort of the whole batch.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::extract::Extractor;
use crate::ingest::{hasher, reader, Scanner};
use crate::models::document::{DocumentReport, ProcessingStatus};
use crate::models::question::QuestionSet;
use crate::operations::stats::TextStats;

/// Source name used for standard input.
pub const STDIN_SOURCE: &str = "-";

/// Reports for a batch of documents.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractOutput {
    pub documents: Vec<DocumentReport>,
    pub summary: ExtractSummary,
}

/// Totals over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractSummary {
    pub documents: usize,
    pub completed: usize,
    pub failed: usize,
    pub questions: usize,
}

impl ExtractSummary {
    #[must_use]
    pub fn from_reports(reports: &[DocumentReport]) -> Self {
        let completed = reports.iter().filter(|r| r.is_completed()).count();
        Self {
            documents: reports.len(),
            completed,
            failed: reports.len() - completed,
            questions: reports.iter().map(|r| r.question_count).sum(),
        }
    }
}

/// Extract questions from already-decoded text.
#[must_use]
pub fn process_text(
    source: &str,
    text: &str,
    extractor: &Extractor,
    strict: bool,
) -> DocumentReport {
    let started = Instant::now();
    let id = hasher::document_id(text);
    let stats = TextStats::compute(text);

    let extracted = if strict {
        extractor.extract_strict(text)
    } else {
        Ok(extractor.extract(text))
    };

    let elapsed = elapsed_ms(started);
    match extracted {
        Ok(questions) => {
            info!(
                source,
                questions = questions.len(),
                elapsed_ms = elapsed,
                "document processed"
            );
            DocumentReport {
                id,
                source: source.to_string(),
                status: ProcessingStatus::Completed,
                stats: Some(stats),
                question_count: questions.len(),
                questions,
                conversion_time_ms: elapsed,
                error: None,
            }
        }
        Err(e) => {
            warn!(source, "strict extraction failed: {e}");
            DocumentReport {
                id,
                stats: Some(stats),
                ..DocumentReport::failed(source, e.to_string(), elapsed)
            }
        }
    }
}

/// Read and process one transcript file.
#[must_use]
pub fn process_file(
    path: &Path,
    config: &Config,
    extractor: &Extractor,
    strict: bool,
) -> DocumentReport {
    let started = Instant::now();
    let source = display_path(path);
    match reader::read_text(path, config.settings.scan.max_file_size_bytes()) {
        Ok(text) => process_text(&source, &text, extractor, strict),
        Err(e) => {
            warn!(source = %source, "document processing failed: {e}");
            DocumentReport::failed(source, e.to_string(), elapsed_ms(started))
        }
    }
}

/// Read and process standard input.
#[must_use]
pub fn process_stdin(config: &Config, extractor: &Extractor, strict: bool) -> DocumentReport {
    let started = Instant::now();
    match reader::read_stdin(config.settings.scan.max_file_size_bytes()) {
        Ok(text) => process_text(STDIN_SOURCE, &text, extractor, strict),
        Err(e) => DocumentReport::failed(STDIN_SOURCE, e.to_string(), elapsed_ms(started)),
    }
}

/// Expand the given paths: files are kept as given, directories are scanned.
pub fn collect_inputs(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for path in paths {
        if path.is_dir() {
            let scanner = Scanner::new(path, &config.settings.scan);
            inputs.extend(scanner.scan()?.into_iter().map(|f| f.path));
        } else {
            inputs.push(path.clone());
        }
    }
    Ok(inputs)
}

/// Process every input in parallel. Reports are ordered by source.
pub fn process_paths(
    paths: &[PathBuf],
    config: &Config,
    extractor: &Extractor,
    strict: bool,
) -> Result<ExtractOutput> {
    let inputs = collect_inputs(paths, config)?;
    info!(documents = inputs.len(), "processing documents");

    let mut documents: Vec<DocumentReport> = inputs
        .par_iter()
        .map(|path| process_file(path, config, extractor, strict))
        .collect();
    documents.sort_by(|a, b| a.source.cmp(&b.source));

    let summary = ExtractSummary::from_reports(&documents);
    Ok(ExtractOutput { documents, summary })
}

/// Write a completed document's questions as `<stem>.json` into `out_dir`.
///
/// Returns `None` for failed documents.
pub fn export_questions(
    report: &DocumentReport,
    out_dir: &Path,
    pretty: bool,
) -> Result<Option<PathBuf>> {
    if !report.is_completed() {
        return Ok(None);
    }
    std::fs::create_dir_all(out_dir)?;

    let set = QuestionSet::from(report.questions.clone());
    let json = if pretty {
        serde_json::to_string_pretty(&set)?
    } else {
        serde_json::to_string(&set)?
    };
    let target = out_dir.join(export_file_name(&report.source));
    std::fs::write(&target, json)?;
    info!(path = %target.display(), count = set.count, "questions exported");
    Ok(Some(target))
}

fn export_file_name(source: &str) -> String {
    if source == STDIN_SOURCE {
        return "stdin.json".into();
    }
    let stem = Path::new(source)
        .file_stem()
        .map_or_else(|| "questions".into(), |s| s.to_string_lossy().into_owned());
    format!("{stem}.json")
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const QUIZ: &str = "Đoạn văn câu hỏi: What is 2+2?Select one a. 3b. 4c. 5d. 6\
                        Đáp án đúng là: bVì: Basic additionTham khảo: Arithmetic 101";

    fn config(tmp: &TempDir) -> Config {
        Config::new(tmp.path())
    }

    #[test]
    fn process_text_packages_questions_and_stats() {
        let report = process_text("quiz.txt", QUIZ, &Extractor::new(), false);
        assert!(report.is_completed());
        assert_eq!(report.question_count, 1);
        assert_eq!(report.questions.len(), 1);
        assert_eq!(report.id, hasher::document_id(QUIZ));
        assert!(report.stats.unwrap().word_count > 0);
        assert!(report.error.is_none());
    }

    #[test]
    fn zero_questions_is_still_completed() {
        let report = process_text("empty.txt", "no markers here", &Extractor::new(), false);
        assert_eq!(report.status, ProcessingStatus::Completed);
        assert_eq!(report.question_count, 0);
    }

    #[test]
    fn strict_failure_is_a_failed_report() {
        let text = format!("{QUIZ}\nĐoạn văn câu hỏi: broken");
        let report = process_text("quiz.txt", &text, &Extractor::new(), true);
        assert_eq!(report.status, ProcessingStatus::Failed);
        assert!(report.questions.is_empty());
        assert!(report.stats.is_some());
        assert!(report.error.unwrap().contains("missing_prompt"));
    }

    #[test]
    fn unreadable_file_is_a_failed_report() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.txt");
        fs::write(&path, [0xffu8, 0xfe, 0xfd]).unwrap();
        let report = process_file(&path, &config(&tmp), &Extractor::new(), false);
        assert_eq!(report.status, ProcessingStatus::Failed);
        assert!(report.error.unwrap().contains("UTF-8"));
    }

    #[test]
    fn process_paths_scans_directories() {
        let tmp = TempDir::new().unwrap();
        let docs = tmp.path().join("docs");
        fs::create_dir(&docs).unwrap();
        fs::write(docs.join("a.txt"), QUIZ).unwrap();
        fs::write(docs.join("b.txt"), format!("{QUIZ}\n{QUIZ}")).unwrap();
        fs::write(docs.join("ignored.md"), QUIZ).unwrap();

        let out = process_paths(&[docs], &config(&tmp), &Extractor::new(), false).unwrap();
        assert_eq!(out.documents.len(), 2);
        assert!(out.documents[0].source.ends_with("a.txt"));
        assert_eq!(
            out.summary,
            ExtractSummary {
                documents: 2,
                completed: 2,
                failed: 0,
                questions: 3,
            }
        );
    }

    #[test]
    fn export_writes_question_set() {
        let tmp = TempDir::new().unwrap();
        let report = process_text("dir/quiz.txt", QUIZ, &Extractor::new(), false);
        let out_dir = tmp.path().join("out");
        let path = export_questions(&report, &out_dir, false).unwrap().unwrap();
        assert_eq!(path, out_dir.join("quiz.json"));

        let set: QuestionSet = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(set.count, 1);
        assert_eq!(set.questions[0].prompt, "What is 2+2?");
    }

    #[test]
    fn export_skips_failed_reports() {
        let tmp = TempDir::new().unwrap();
        let report = DocumentReport::failed("x.txt", "nope", 0);
        let exported = export_questions(&report, tmp.path(), false).unwrap();
        assert!(exported.is_none());
    }

    #[test]
    fn stdin_export_name() {
        assert_eq!(export_file_name(STDIN_SOURCE), "stdin.json");
        assert_eq!(export_file_name("a/b/quiz.txt"), "quiz.json");
    }
}
