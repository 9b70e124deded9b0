// Pedantic lint configuration for the crate.
// - missing_errors_doc: Error handling is self-evident from Result types
// - missing_panics_doc: The only panic is the built-in marker table failing to compile
// - module_name_repetitions: `extract::Extractor` reads better than the alternatives
// - needless_pass_by_value: Sometimes clearer semantically
// - fn_params_excessive_bools: CLI flags are naturally boolean
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::needless_pass_by_value,
    clippy::fn_params_excessive_bools
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod models;
pub mod operations;

pub use error::{QuizError, Result};
pub use extract::{extract_questions, Extractor, MarkerTable};
pub use models::{Answer, Question, QuestionSet};
