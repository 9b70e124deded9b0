use crate::models::question::Answer;

const LETTERS: [char; 4] = ['a', 'b', 'c', 'd'];

/// Map the first character of a correct-answer statement to a slot index.
#[must_use]
pub fn letter_index(statement: &str) -> Option<usize> {
    let first = statement.trim().chars().next()?;
    let lower = first.to_lowercase().next()?;
    LETTERS.iter().position(|&l| l == lower)
}

/// Mark the answer named by `statement` as correct.
///
/// Only the first character is considered. An absent statement, a leading
/// character outside a to d, or an index past the extracted answers leaves
/// every answer unmarked. Returns the marked index.
pub fn resolve_correct(statement: Option<&str>, answers: &mut [Answer]) -> Option<usize> {
    let index = letter_index(statement?)?;
    let answer = answers.get_mut(index)?;
    answer.is_correct = true;
    Some(index)
}
