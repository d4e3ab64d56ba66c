/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Bind layer.
//!
//! Runs once per query: expand the path pattern, resolve the dictionary,
//! parse the delimiter, resolve custom tag columns, and construct the
//! output schema. Every validation failure is a [`BindError`] surfaced
//! before the first row; past this point the dictionary and file list are
//! immutable and shared by reference across workers.

use crate::error::BindError;
use crate::fs::{LocalFileSystem, LogFileSystem};
use crate::options::ScanOptions;
use crate::schema::scan_schema;
use arrow::datatypes::SchemaRef;
use fixscan_dictionary::{apply_overlay_file, embedded_fix44, load_file, Dictionary};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// One user-declared custom tag column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomTag {
    /// Output column name: the dictionary field name, or `Tag<N>` for tag
    /// numbers the dictionary does not define.
    pub name: String,
    /// The tag number pulled from each message.
    pub tag: u32,
}

/// Immutable per-query state produced by [`bind`].
#[derive(Debug)]
pub struct BindData {
    /// Expanded input files, in scan order.
    pub files: Vec<PathBuf>,
    /// The bound dictionary, shared read-only.
    pub dictionary: Arc<Dictionary>,
    /// The field delimiter byte.
    pub delimiter: u8,
    /// Custom tag columns, deduplicated, in declaration order.
    pub custom_tags: Vec<CustomTag>,
    /// The full output schema (fixed columns + custom columns).
    pub schema: SchemaRef,
}

/// Binds scan options against the local file system.
///
/// # Errors
/// Returns [`BindError`] for an empty glob, an unreadable or unparseable
/// dictionary, an invalid delimiter, or an unknown name in `rtags`.
pub fn bind(options: &ScanOptions) -> Result<BindData, BindError> {
    bind_with(&LocalFileSystem, options)
}

/// Binds scan options against a caller-provided file system.
///
/// # Errors
/// See [`bind`].
pub fn bind_with(
    fs: &dyn LogFileSystem,
    options: &ScanOptions,
) -> Result<BindData, BindError> {
    let files = fs.expand(&options.pattern)?;
    if files.is_empty() {
        return Err(BindError::EmptyGlob(options.pattern.clone()));
    }

    let mut dictionary = match &options.dictionary {
        Some(path) => load_file(path)?,
        None => embedded_fix44()?,
    };
    if let Some(path) = &options.overlay {
        apply_overlay_file(&mut dictionary, path)?;
    }

    let delimiter = options.delimiter_byte()?;
    let custom_tags = resolve_custom_tags(&dictionary, options)?;
    let schema = scan_schema(&custom_tags);

    info!(
        files = files.len(),
        custom_tags = custom_tags.len(),
        delimiter = delimiter,
        "bound FIX log scan"
    );

    Ok(BindData {
        files,
        dictionary: Arc::new(dictionary),
        delimiter,
        custom_tags,
        schema,
    })
}

/// Resolves `rtags` names and `tag_ids` numbers into custom columns,
/// deduplicated by tag number with first-seen order preserved.
///
/// Unknown names are rejected, unknown numbers accepted as `Tag<N>`: names
/// are user-typed and error-prone, numbers are authoritative on the wire.
fn resolve_custom_tags(
    dictionary: &Dictionary,
    options: &ScanOptions,
) -> Result<Vec<CustomTag>, BindError> {
    let mut seen: HashSet<u32> = HashSet::new();
    let mut custom = Vec::new();

    for name in &options.rtags {
        let tag = dictionary
            .tag_by_name(name)
            .ok_or_else(|| BindError::UnknownTagName(name.clone()))?;
        if seen.insert(tag) {
            custom.push(CustomTag {
                name: name.clone(),
                tag,
            });
        }
    }

    for &tag in &options.tag_ids {
        if seen.insert(tag) {
            custom.push(CustomTag {
                name: dictionary.column_name(tag),
                tag,
            });
        }
    }

    Ok(custom)
}
