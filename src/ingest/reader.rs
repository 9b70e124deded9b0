use std::io::Read;
use std::path::Path;

use crate::error::{QuizError, Result};

const BOM: char = '\u{feff}';

/// Read a transcript file as UTF-8 text.
///
/// `max_bytes` of 0 disables the size check. A leading byte-order mark is
/// dropped.
pub fn read_text(path: &Path, max_bytes: u64) -> Result<String> {
    let display = path.to_string_lossy().into_owned();
    if !path.is_file() {
        return Err(QuizError::FileNotFound { path: display });
    }

    check_size(&display, path.metadata()?.len(), max_bytes)?;
    let bytes = std::fs::read(path)?;
    decode(bytes, &display)
}

/// Read all of stdin as UTF-8 text, under the same size limit as files.
pub fn read_stdin(max_bytes: u64) -> Result<String> {
    read_from(std::io::stdin().lock(), "-", max_bytes)
}

/// Read a UTF-8 stream.
///
/// At most `max_bytes + 1` bytes are buffered, so an oversized stream reports
/// that count as its size.
pub fn read_from(mut reader: impl Read, source: &str, max_bytes: u64) -> Result<String> {
    let mut bytes = Vec::new();
    if max_bytes > 0 {
        reader.take(max_bytes + 1).read_to_end(&mut bytes)?;
    } else {
        reader.read_to_end(&mut bytes)?;
    }
    let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
    check_size(source, size, max_bytes)?;
    decode(bytes, source)
}

fn check_size(path: &str, size: u64, max_bytes: u64) -> Result<()> {
    if max_bytes > 0 && size > max_bytes {
        return Err(QuizError::TooLarge {
            path: path.into(),
            size,
            limit: max_bytes,
        });
    }
    Ok(())
}

fn decode(bytes: Vec<u8>, path: &str) -> Result<String> {
    let text = String::from_utf8(bytes).map_err(|_| QuizError::NonUtf8 { path: path.into() })?;
    Ok(match text.strip_prefix(BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    })
}
