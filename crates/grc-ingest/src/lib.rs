#![deny(unsafe_code)]

pub mod error;
pub mod header;
pub mod sheets;
pub mod source;
pub mod split;
pub mod template;

pub use error::IngestError;
pub use header::{HeaderInfo, detect_delimiter, extract_headers};
pub use sheets::{SheetRef, fetch_google_sheet};
pub use source::{SourceText, read_csv_text, read_excel, read_source};
pub use split::{split_delimited, split_records};
pub use template::template_csv;
