//! Public Google Sheets ingestion via the CSV export endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::IngestError;
use crate::source::SourceText;

/// HTTP request timeout for the export fetch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A parsed reference to a Google Sheet: the spreadsheet ID and the tab GID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRef {
    pub sheet_id: String,
    pub gid: String,
}

impl SheetRef {
    /// Parses a Sheets URL of the form
    /// `https://docs.google.com/spreadsheets/d/<id>/...` with an optional
    /// `gid=` in the query or fragment (defaults to `0`).
    pub fn parse(url: &str) -> Result<Self, IngestError> {
        let marker = "/spreadsheets/d/";
        let start = url
            .find(marker)
            .ok_or_else(|| IngestError::InvalidSheetUrl(url.to_string()))?
            + marker.len();
        let rest = &url[start..];
        let sheet_id: String = rest
            .chars()
            .take_while(|ch| ch.is_ascii_alphanumeric() || *ch == '-' || *ch == '_')
            .collect();
        if sheet_id.is_empty() {
            return Err(IngestError::InvalidSheetUrl(url.to_string()));
        }

        let gid = url
            .split("gid=")
            .nth(1)
            .map(|tail| {
                tail.chars()
                    .take_while(|ch| ch.is_ascii_digit())
                    .collect::<String>()
            })
            .filter(|digits| !digits.is_empty())
            .unwrap_or_else(|| "0".to_string());

        Ok(Self { sheet_id, gid })
    }

    /// The CSV export endpoint for this sheet.
    #[must_use]
    pub fn export_url(&self) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/export?format=csv&gid={}",
            self.sheet_id, self.gid
        )
    }
}

/// Fetches a public Google Sheet as CSV text.
///
/// The sheet must be shared as "anyone with the link can view"; a private
/// sheet redirects to an HTML sign-in page, which is reported as
/// [`IngestError::AccessDenied`].
pub fn fetch_google_sheet(url: &str) -> Result<SourceText, IngestError> {
    let sheet = SheetRef::parse(url)?;
    let export_url = sheet.export_url();
    debug!(sheet_id = %sheet.sheet_id, gid = %sheet.gid, "fetching sheet export");

    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|err| IngestError::FetchFailed(err.to_string()))?;
    let response = client
        .get(&export_url)
        .send()
        .map_err(|err| IngestError::FetchFailed(err.to_string()))?;

    if !response.status().is_success() {
        return Err(IngestError::FetchFailed(format!(
            "status {}",
            response.status()
        )));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(String::from);
    let body = response
        .text()
        .map_err(|err| IngestError::FetchFailed(err.to_string()))?;

    ensure_csv_response(content_type.as_deref(), &body)?;

    let name = format!("Google Sheet {}", sheet.sheet_id);
    Ok(SourceText { name, text: body })
}

/// A link-restricted sheet answers the export URL with an HTML sign-in page
/// instead of CSV.
fn ensure_csv_response(content_type: Option<&str>, body: &str) -> Result<(), IngestError> {
    if let Some(kind) = content_type
        && kind.contains("csv")
    {
        return Ok(());
    }
    if body.trim_start().starts_with('<') {
        return Err(IngestError::AccessDenied);
    }
    match content_type {
        Some(kind) if kind.contains("html") => Err(IngestError::AccessDenied),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_url_with_gid_fragment() {
        let sheet = SheetRef::parse(
            "https://docs.google.com/spreadsheets/d/1AbC-_9xYz/edit#gid=1234",
        )
        .unwrap();
        assert_eq!(sheet.sheet_id, "1AbC-_9xYz");
        assert_eq!(sheet.gid, "1234");
        assert_eq!(
            sheet.export_url(),
            "https://docs.google.com/spreadsheets/d/1AbC-_9xYz/export?format=csv&gid=1234"
        );
    }

    #[test]
    fn gid_defaults_to_zero() {
        let sheet =
            SheetRef::parse("https://docs.google.com/spreadsheets/d/1AbC/edit").unwrap();
        assert_eq!(sheet.gid, "0");
    }

    #[test]
    fn rejects_non_sheet_urls() {
        assert!(SheetRef::parse("https://example.com/file.csv").is_err());
        assert!(SheetRef::parse("https://docs.google.com/spreadsheets/d/").is_err());
    }

    #[test]
    fn html_body_is_access_denied() {
        let err = ensure_csv_response(Some("text/html; charset=utf-8"), "<!DOCTYPE html>")
            .unwrap_err();
        assert!(matches!(err, IngestError::AccessDenied));
    }

    #[test]
    fn csv_content_type_is_accepted() {
        assert!(ensure_csv_response(Some("text/csv"), "a,b\n1,2\n").is_ok());
    }

    #[test]
    fn missing_content_type_falls_back_to_body_sniff() {
        assert!(ensure_csv_response(None, "a,b\n1,2\n").is_ok());
        assert!(ensure_csv_response(None, "  <html>").is_err());
    }
}
