//! Source Reader: normalizes the three input modalities into delimited text.

use std::io::Cursor;

use calamine::{Reader, open_workbook_auto_from_rs};
use tracing::debug;

use crate::error::IngestError;

/// Delimited text plus a human name for where it came from.
///
/// The delimiter is not known yet at this point; header extraction detects it.
#[derive(Debug, Clone)]
pub struct SourceText {
    pub name: String,
    pub text: String,
}

/// Passes decoded CSV text through unchanged.
pub fn read_csv_text(name: &str, text: &str) -> Result<SourceText, IngestError> {
    let text = text.trim_start_matches('\u{feff}');
    if text.trim().is_empty() {
        return Err(IngestError::EmptySource(name.to_string()));
    }
    Ok(SourceText {
        name: name.to_string(),
        text: text.to_string(),
    })
}

/// Reads the first worksheet of an Excel workbook and serializes it to
/// comma-delimited text, preserving cell order.
pub fn read_excel(name: &str, bytes: &[u8]) -> Result<SourceText, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|err| IngestError::InvalidWorkbook(err.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let Some(first_sheet) = sheet_names.first().cloned() else {
        return Err(IngestError::EmptySource(name.to_string()));
    };
    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|err| IngestError::InvalidWorkbook(err.to_string()))?;
    if range.is_empty() {
        return Err(IngestError::EmptySource(name.to_string()));
    }

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    let mut rows_written = 0usize;
    for row in range.rows() {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        writer.write_record(&cells)?;
        rows_written += 1;
    }
    if rows_written == 0 {
        return Err(IngestError::EmptySource(name.to_string()));
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| IngestError::InvalidWorkbook(err.to_string()))?;
    debug!(sheet = %first_sheet, rows = rows_written, "serialized worksheet");
    Ok(SourceText {
        name: name.to_string(),
        text: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// Dispatches on the file extension.
///
/// Unsupported extensions are rejected before any parsing is attempted.
pub fn read_source(file_name: &str, bytes: &[u8]) -> Result<SourceText, IngestError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => {
            let text = String::from_utf8_lossy(bytes);
            read_csv_text(file_name, &text)
        }
        "xlsx" | "xls" => read_excel(file_name, bytes),
        _ => Err(IngestError::UnsupportedExtension(file_name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_text_passes_through() {
        let source = read_csv_text("controls.csv", "codigo,nome\nA1,Um\n").unwrap();
        assert_eq!(source.name, "controls.csv");
        assert_eq!(source.text, "codigo,nome\nA1,Um\n");
    }

    #[test]
    fn csv_bom_is_stripped() {
        let source = read_csv_text("controls.csv", "\u{feff}codigo,nome\n").unwrap();
        assert!(source.text.starts_with("codigo"));
    }

    #[test]
    fn blank_csv_is_empty_source() {
        assert!(matches!(
            read_csv_text("controls.csv", "  \n \n"),
            Err(IngestError::EmptySource(_))
        ));
    }

    #[test]
    fn unknown_extension_rejected_before_parsing() {
        assert!(matches!(
            read_source("controls.pdf", b"%PDF-1.4"),
            Err(IngestError::UnsupportedExtension(_))
        ));
        assert!(matches!(
            read_source("controls", b""),
            Err(IngestError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn garbage_excel_bytes_fail_as_invalid_workbook() {
        assert!(matches!(
            read_source("controls.xlsx", b"not a zip archive"),
            Err(IngestError::InvalidWorkbook(_))
        ));
    }
}
