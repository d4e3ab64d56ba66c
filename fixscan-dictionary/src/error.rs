/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for dictionary loading.
//!
//! A load failure discards the whole dictionary; there are no partially
//! loaded dialects.

use thiserror::Error;

/// Errors raised while loading or overlaying a FIX dictionary.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The XML document could not be parsed.
    #[error("failed to parse dictionary xml: {0}")]
    Xml(#[from] xmltree::ParseError),

    /// A required attribute was absent.
    #[error("no `{attribute}` attribute in `{element}` element")]
    MissingAttribute {
        /// The element name.
        element: String,
        /// The missing attribute name.
        attribute: String,
    },

    /// An attribute that must be a tag number was not one.
    #[error("invalid tag number `{value}` in `{element}` element")]
    InvalidTagNumber {
        /// The element name.
        element: String,
        /// The offending attribute value.
        value: String,
    },

    /// A group, component, or message referenced a field name that the
    /// `<fields>` section does not define.
    #[error("unknown field name `{name}` referenced by {referenced_by}")]
    UnknownFieldName {
        /// The unresolved field name.
        name: String,
        /// Where the reference occurred (for diagnostics).
        referenced_by: String,
    },

    /// I/O failure reading a dictionary file.
    #[error("failed to read dictionary file: {0}")]
    Io(#[from] std::io::Error),
}
