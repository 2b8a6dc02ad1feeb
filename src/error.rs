//! Unified error hierarchy for tcxflat
//!
//! A conversion can fail in exactly one way: the input bytes do not form a
//! well-formed XML document. Missing optional elements are never errors and
//! degrade to empty field values instead.

use thiserror::Error;

/// Top-level error type for all tcxflat operations
#[derive(Debug, Error)]
pub enum TcxError {
    /// Malformed or non-XML input. Fatal to the whole conversion; no
    /// partial output is produced.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// CSV serialization errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO errors (reading the input file, writing the output tables)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for TcxError {
    fn from(err: quick_xml::Error) -> Self {
        TcxError::Parse(err.to_string())
    }
}

/// Result type alias for tcxflat operations
pub type Result<T> = std::result::Result<T, TcxError>;

impl TcxError {
    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            TcxError::Parse(reason) => {
                format!("The file does not look like a valid TCX document: {}", reason)
            }
            _ => self.to_string(),
        }
    }
}
