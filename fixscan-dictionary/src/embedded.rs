/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Embedded FIX 4.4 dictionary.
//!
//! The base FIX 4.4 specification is compiled into the binary as a byte
//! array so a scan works without any runtime file dependency. It is loaded
//! through the same byte-level code path as a file-backed dictionary.

use crate::error::DictionaryError;
use crate::loader::load_base;
use crate::schema::Dictionary;

/// The embedded FIX 4.4 dictionary XML.
pub static EMBEDDED_FIX44_XML: &[u8] = include_bytes!("../dialects/FIX44.xml");

/// Loads the embedded FIX 4.4 dictionary.
///
/// # Errors
/// Returns [`DictionaryError`] if the embedded XML fails to parse; this
/// indicates a broken build rather than a user error.
pub fn embedded_fix44() -> Result<Dictionary, DictionaryError> {
    load_base(EMBEDDED_FIX44_XML)
}
