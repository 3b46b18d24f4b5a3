//! Quote-aware splitting of delimited lines.
//!
//! Header extraction and row parsing both split already-delimited text, and
//! both must leave delimiter characters inside quoted spans alone. The
//! scanner lives here once instead of being duplicated at each call site.

use grc_model::Delimiter;

/// Splits one line on `delimiter`, honoring double-quoted spans.
///
/// Each cell is trimmed, surrounding quotes are stripped, and doubled quotes
/// inside a quoted span collapse to a literal quote.
#[must_use]
pub fn split_delimited(line: &str, delimiter: Delimiter) -> Vec<String> {
    let sep = delimiter.as_char();
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
            current.push(ch);
        } else if ch == sep && !in_quotes {
            cells.push(clean_cell(&current));
            current.clear();
        } else {
            current.push(ch);
        }
    }
    cells.push(clean_cell(&current));
    cells
}

/// Splits `text` into logical records: a newline inside a quoted span
/// belongs to the cell, not the record boundary. Excel exports routinely
/// carry such cells for multi-line descriptions. Trailing `\r` is trimmed
/// from each record.
#[must_use]
pub fn split_records(text: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (index, ch) in text.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '\n' if !in_quotes => {
                records.push(text[start..index].trim_end_matches('\r'));
                start = index + 1;
            }
            _ => {}
        }
    }
    if start < text.len() {
        records.push(text[start..].trim_end_matches('\r'));
    }
    records
}

/// Counts occurrences of `needle` outside quoted spans.
#[must_use]
pub(crate) fn count_outside_quotes(line: &str, needle: char) -> usize {
    let mut count = 0;
    let mut in_quotes = false;
    for ch in line.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == needle && !in_quotes {
            count += 1;
        }
    }
    count
}

fn clean_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };
    unquoted.replace("\"\"", "\"").trim().to_string()
}
