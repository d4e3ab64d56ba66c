/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Structural parse errors.
//!
//! A structural error describes why a log line could not be tokenized into a
//! well-formed FIX message. Unlike most error types in this workspace it is
//! never propagated as `Err`: the scan emits the row anyway and surfaces the
//! message in the `parse_error` column. The `Display` wording is part of the
//! observable output (downstream users filter and group on it) and must
//! not change casually.

use thiserror::Error;

/// Why a line failed structural tokenization.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StructuralError {
    /// The input buffer was empty.
    #[error("Empty message")]
    EmptyMessage,

    /// A segment had no `=` separating tag from value.
    #[error("Invalid tag format (missing '=')")]
    MissingEquals,

    /// The bytes before `=` were not a decimal tag number.
    #[error("Failed to parse tag")]
    InvalidTag,

    /// The line contained delimiters but no tag=value segments.
    #[error("No valid tags found")]
    NoTags,

    /// Tag 35 (MsgType) was absent or empty.
    #[error("Missing required tag 35 (MsgType)")]
    MissingMsgType,
}
