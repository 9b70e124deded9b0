use regex::Regex;

/// Split `text` into question segments.
///
/// Each segment starts at an occurrence of `boundary` and runs up to the next
/// occurrence or the end of the text. Text before the first occurrence is
/// preamble and is dropped.
#[must_use]
pub fn segments<'t>(text: &'t str, boundary: &Regex) -> Vec<&'t str> {
    let starts: Vec<usize> = boundary.find_iter(text).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}
