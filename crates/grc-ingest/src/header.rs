//! Header extraction and delimiter detection for delimited text.

use grc_model::Delimiter;
use tracing::debug;

use crate::split::{count_outside_quotes, split_delimited, split_records};

/// The parsed header row of a delimited text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Column names in file order. Empty when the file has no usable header,
    /// which callers treat as an invalid file.
    pub headers: Vec<String>,
    pub delimiter: Delimiter,
}

/// Picks the delimiter of `text` by counting commas and semicolons outside
/// quoted spans on the first non-blank line. Ties go to comma.
#[must_use]
pub fn detect_delimiter(text: &str) -> Delimiter {
    let Some(line) = first_non_blank_line(text) else {
        return Delimiter::Comma;
    };
    let commas = count_outside_quotes(line, ',');
    let semicolons = count_outside_quotes(line, ';');
    if semicolons > commas {
        Delimiter::Semicolon
    } else {
        Delimiter::Comma
    }
}

/// Parses the header row of `text`, reporting the delimiter actually used.
///
/// Completely empty input, and a first line that yields no non-empty cells,
/// both produce an empty `headers` list.
#[must_use]
pub fn extract_headers(text: &str) -> HeaderInfo {
    let delimiter = detect_delimiter(text);
    let Some(line) = first_non_blank_line(text) else {
        return HeaderInfo {
            headers: Vec::new(),
            delimiter,
        };
    };

    let headers: Vec<String> = split_delimited(line, delimiter)
        .into_iter()
        .filter(|cell| !cell.is_empty())
        .collect();
    debug!(
        count = headers.len(),
        delimiter = delimiter.display_name(),
        "extracted headers"
    );
    HeaderInfo { headers, delimiter }
}

fn first_non_blank_line(text: &str) -> Option<&str> {
    split_records(text)
        .into_iter()
        .find(|line| !line.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_wins_ties() {
        assert_eq!(detect_delimiter("a,b;c,d;e"), Delimiter::Comma);
        assert_eq!(detect_delimiter("a,b"), Delimiter::Comma);
    }

    #[test]
    fn semicolon_majority_wins() {
        assert_eq!(detect_delimiter("a;b;c,d"), Delimiter::Semicolon);
    }

    #[test]
    fn quoted_delimiters_do_not_count() {
        // Three quoted semicolons, two real commas.
        assert_eq!(detect_delimiter(r#""a;b;c;",x,y"#), Delimiter::Comma);
    }

    #[test]
    fn headers_are_trimmed_and_unquoted() {
        let info = extract_headers("\"Código\" ; Nome ;Peso\nA1;Um;3\n");
        assert_eq!(info.delimiter, Delimiter::Semicolon);
        assert_eq!(info.headers, vec!["Código", "Nome", "Peso"]);
    }

    #[test]
    fn empty_input_yields_no_headers() {
        assert!(extract_headers("").headers.is_empty());
        assert!(extract_headers("\n  \n").headers.is_empty());
    }

    #[test]
    fn all_blank_cells_yield_no_headers() {
        assert!(extract_headers(",,,\n").headers.is_empty());
    }

    #[test]
    fn skips_leading_blank_lines() {
        let info = extract_headers("\n\ncodigo,nome\n");
        assert_eq!(info.headers, vec!["codigo", "nome"]);
    }
}
