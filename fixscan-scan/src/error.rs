/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for binding and scanning.
//!
//! Bind errors surface immediately to the caller before any row is
//! produced. Scan errors are fatal file-level failures that abort the
//! current batch. Per-row problems never appear here; they ride along in
//! the `parse_error` column instead.

use fixscan_dictionary::DictionaryError;
use thiserror::Error;

/// Errors raised while validating options and building bind state.
#[derive(Debug, Error)]
pub enum BindError {
    /// The glob pattern itself was malformed.
    #[error("invalid glob pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why it failed to parse.
        reason: String,
    },

    /// The pattern expanded to no files.
    #[error("no files matched pattern `{0}`")]
    EmptyGlob(String),

    /// The dictionary failed to load.
    #[error("failed to load FIX dictionary: {0}")]
    Dictionary(#[from] DictionaryError),

    /// The delimiter option was not a single character or `\x01`.
    #[error("delimiter must be a single character or '\\x01' for SOH, got `{0}`")]
    InvalidDelimiter(String),

    /// A name in the custom-tag name list is unknown to the dictionary.
    /// Names are user-typed and error-prone, so unknown names are rejected;
    /// unknown tag NUMBERS are accepted and named `Tag<N>`.
    #[error("invalid tag name in rtags: `{0}`; tag not found in FIX dictionary")]
    UnknownTagName(String),

    /// I/O failure during bind (e.g. reading the dictionary file).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fatal errors raised while scanning.
#[derive(Debug, Error)]
pub enum ScanError {
    /// I/O failure reading a log file after open. End of file is not an
    /// error; it advances to the next file.
    #[error("failed to read `{path}`: {source}")]
    Read {
        /// The file being read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Arrow batch assembly failure.
    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_wording() {
        let err = BindError::UnknownTagName("TransactTimw".to_string());
        assert_eq!(
            err.to_string(),
            "invalid tag name in rtags: `TransactTimw`; tag not found in FIX dictionary"
        );

        let err = BindError::EmptyGlob("logs/*.fix".to_string());
        assert_eq!(err.to_string(), "no files matched pattern `logs/*.fix`");
    }
}
