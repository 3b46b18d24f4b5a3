//! The normalized intermediate form every source is converted to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The cell delimiter detected in (or chosen for) a delimited text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
}

impl Delimiter {
    #[must_use]
    pub fn as_char(&self) -> char {
        match self {
            Self::Comma => ',',
            Self::Semicolon => ';',
        }
    }

    /// Human name, used when reporting the detection back to the operator.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Comma => "vírgula",
            Self::Semicolon => "ponto e vírgula",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Delimited text plus the delimiter it uses and a human name for where it
/// came from (file name or sheet title).
///
/// Row 0 of the text is the header row. Rows may be ragged relative to the
/// header; that is tolerated here and resolved during validation.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub source_name: String,
    pub delimiter: Delimiter,
    pub text: String,
}

impl RawTable {
    pub fn new(source_name: impl Into<String>, delimiter: Delimiter, text: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            delimiter,
            text: text.into(),
        }
    }
}
