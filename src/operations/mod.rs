//! Operations behind the CLI commands.
//!
//! Kept out of `main.rs` so they can be exercised from tests and other
//! front ends.

pub mod extract;
pub mod files;
pub mod stats;

pub use extract::{
    collect_inputs, export_questions, process_file, process_paths, process_stdin, process_text,
    ExtractOutput, ExtractSummary,
};
pub use files::{list_files, FilesFilter, FilesResult, FilesSummary};
pub use stats::{file_stats, TextStats};
