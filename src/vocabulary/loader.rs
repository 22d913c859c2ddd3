//! Word list file formats
//!
//! - Base list: one word per line, case-insensitive, whitespace-trimmed.
//!   Anything that is not exactly 5 letters is skipped.
//! - Addition log: one `<timestamp>: WORD` entry per line. Malformed lines
//!   are skipped.

use super::WordListError;
use crate::core::Word;
use chrono::{DateTime, Local};
use rustc_hash::FxHashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

const LOG_SEPARATOR: &str = ": ";

/// Parse the contents of a base word list
#[must_use]
pub fn parse_base_list(content: &str) -> FxHashSet<String> {
    content
        .lines()
        .filter_map(|line| Word::new(line).ok())
        .map(Word::into_string)
        .collect()
}

/// Parse the contents of an addition log
#[must_use]
pub fn parse_addition_log(content: &str) -> FxHashSet<String> {
    content
        .lines()
        .filter_map(|line| line.split_once(LOG_SEPARATOR))
        .filter_map(|(_, word)| Word::new(word).ok())
        .map(Word::into_string)
        .collect()
}

/// Format one addition log entry (without trailing newline)
#[must_use]
pub fn format_log_entry(word: &str, at: DateTime<Local>) -> String {
    format!("{}{LOG_SEPARATOR}{word}", at.to_rfc3339())
}

/// Load and validate the base word list
///
/// # Errors
///
/// - `WordListError::BaseFileNotFound` if the file does not exist
/// - `WordListError::Empty` if no line is a valid 5-letter word
/// - `WordListError::Io` for any other read failure
pub fn load_base_list(path: &Path) -> Result<FxHashSet<String>, WordListError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => WordListError::BaseFileNotFound(path.to_path_buf()),
        _ => WordListError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let words = parse_base_list(&content);
    if words.is_empty() {
        return Err(WordListError::Empty(path.to_path_buf()));
    }
    Ok(words)
}

/// Load previously added words; a missing or unreadable log yields nothing
#[must_use]
pub fn load_addition_log(path: &Path) -> FxHashSet<String> {
    match fs::read_to_string(path) {
        Ok(content) => parse_addition_log(&content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => FxHashSet::default(),
        Err(e) => {
            log::error!("Could not read added words log {}: {e}", path.display());
            FxHashSet::default()
        }
    }
}

/// Append one entry to the addition log, creating parent directories
///
/// # Errors
///
/// Returns an I/O error if the directory or file cannot be written.
pub fn append_to_log(path: &Path, word: &str) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", format_log_entry(word, Local::now()))
}
