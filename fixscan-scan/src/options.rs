/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Scan options.
//!
//! The user-facing surface of a scan: a path pattern plus named options,
//! validated at bind time. Defaults mirror the table-function contract:
//! pipe delimiter, embedded FIX 4.4 dictionary, no custom columns.

use crate::error::BindError;
use std::path::PathBuf;

/// Default field delimiter: pipe, the common choice for human-readable logs.
pub const DEFAULT_DELIMITER: &str = "|";

/// Options for one scan, built fluently and validated by
/// [`bind`](crate::bind::bind).
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Path or glob pattern for the input logs.
    pub pattern: String,
    /// Dictionary XML path; the embedded FIX 4.4 dictionary when `None`.
    pub dictionary: Option<PathBuf>,
    /// Optional overlay XML applied on top of the base dictionary.
    pub overlay: Option<PathBuf>,
    /// Field delimiter: a single character, or the literal token `\x01`
    /// for the canonical SOH byte.
    pub delimiter: String,
    /// Custom tag columns by field name; unknown names are a bind error.
    pub rtags: Vec<String>,
    /// Custom tag columns by tag number; unknown numbers are accepted and
    /// named `Tag<N>`.
    pub tag_ids: Vec<u32>,
}

impl ScanOptions {
    /// Creates options for a path pattern with all defaults.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            dictionary: None,
            overlay: None,
            delimiter: DEFAULT_DELIMITER.to_string(),
            rtags: Vec::new(),
            tag_ids: Vec::new(),
        }
    }

    /// Sets the dictionary XML path.
    #[must_use]
    pub fn with_dictionary(mut self, path: impl Into<PathBuf>) -> Self {
        self.dictionary = Some(path.into());
        self
    }

    /// Sets an overlay XML applied on top of the base dictionary.
    #[must_use]
    pub fn with_overlay(mut self, path: impl Into<PathBuf>) -> Self {
        self.overlay = Some(path.into());
        self
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Adds custom tag columns by field name.
    #[must_use]
    pub fn with_rtags<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rtags.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds custom tag columns by tag number.
    #[must_use]
    pub fn with_tag_ids(mut self, tags: impl IntoIterator<Item = u32>) -> Self {
        self.tag_ids.extend(tags);
        self
    }

    /// Resolves the delimiter option to its byte.
    ///
    /// # Errors
    /// Returns [`BindError::InvalidDelimiter`] unless the option is exactly
    /// one byte or the token `\x01`.
    pub(crate) fn delimiter_byte(&self) -> Result<u8, BindError> {
        let bytes = self.delimiter.as_bytes();
        if bytes.len() == 1 {
            Ok(bytes[0])
        } else if self.delimiter == "\\x01" {
            Ok(fixscan_tagvalue::SOH)
        } else {
            Err(BindError::InvalidDelimiter(self.delimiter.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delimiter_is_pipe() {
        let options = ScanOptions::new("logs/*.fix");
        assert_eq!(options.delimiter_byte().unwrap(), b'|');
    }

    #[test]
    fn test_single_character_delimiter() {
        let options = ScanOptions::new("x").with_delimiter(";");
        assert_eq!(options.delimiter_byte().unwrap(), b';');
    }

    #[test]
    fn test_soh_token() {
        let options = ScanOptions::new("x").with_delimiter("\\x01");
        assert_eq!(options.delimiter_byte().unwrap(), 0x01);
    }

    #[test]
    fn test_invalid_delimiters_rejected() {
        for bad in ["", "||", "ab"] {
            let options = ScanOptions::new("x").with_delimiter(bad);
            assert!(
                matches!(options.delimiter_byte(), Err(BindError::InvalidDelimiter(_))),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn test_builder_accumulates_custom_tags() {
        let options = ScanOptions::new("x")
            .with_rtags(["TransactTime", "TradeDate"])
            .with_tag_ids([9999]);
        assert_eq!(options.rtags, vec!["TransactTime", "TradeDate"]);
        assert_eq!(options.tag_ids, vec![9999]);
    }
}
