pub mod document;
pub mod question;

pub use document::{DocumentReport, ProcessingStatus};
pub use question::{Answer, Question, QuestionSet};
