use proptest::prelude::*;

use grc_ingest::{detect_delimiter, extract_headers, split_delimited};
use grc_model::Delimiter;

#[test]
fn semicolon_file_with_quoted_commas() {
    let text = "\"Nome, completo\";Código;Peso\nx;y;z\n";
    let info = extract_headers(text);
    assert_eq!(info.delimiter, Delimiter::Semicolon);
    assert_eq!(info.headers, vec!["Nome, completo", "Código", "Peso"]);
}

#[test]
fn crlf_line_endings_are_handled() {
    let info = extract_headers("codigo,nome\r\nA1,Um\r\n");
    assert_eq!(info.headers, vec!["codigo", "nome"]);
}

proptest! {
    /// With more unquoted semicolons than commas on the first line, the
    /// detected delimiter is always the semicolon; ties go to the comma.
    #[test]
    fn detection_follows_the_majority(
        semicolons in 0usize..6,
        commas in 0usize..6,
    ) {
        let mut line = String::from("h");
        for _ in 0..semicolons {
            line.push_str(";x");
        }
        for _ in 0..commas {
            line.push_str(",y");
        }

        let detected = detect_delimiter(&line);
        if semicolons > commas {
            prop_assert_eq!(detected, Delimiter::Semicolon);
        } else {
            prop_assert_eq!(detected, Delimiter::Comma);
        }
    }

    /// Splitting a line built from quote-free cells recovers the cells.
    #[test]
    fn split_recovers_plain_cells(
        cells in proptest::collection::vec("[a-zA-Z0-9 ]{1,8}", 1..6)
    ) {
        let line = cells.join(",");
        let split = split_delimited(&line, Delimiter::Comma);
        let trimmed: Vec<String> = cells.iter().map(|cell| cell.trim().to_string()).collect();
        prop_assert_eq!(split, trimmed);
    }
}
