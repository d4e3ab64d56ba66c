/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # Fixscan Scan
//!
//! The scan driver for the fixscan FIX log reader.
//!
//! This crate turns globbed log files into Arrow record batches:
//! - **Line framer**: buffered line reading with multi-file advance
//! - **Bind layer**: option validation, dictionary resolution, custom tag
//!   columns, output schema construction
//! - **Group parser**: dictionary-driven repeating-group reconstruction
//! - **Driver**: per-row assembly with functional projection pushdown
//! - **Catalogs**: dictionary introspection as record batches
//!
//! ## Projection Pushdown
//!
//! Projection is the primary performance lever: when the `tags` or `groups`
//! column is not requested, the corresponding materialization is skipped
//! entirely and the group parser is never invoked. [`ScanMetrics`] makes
//! the bypass observable.

pub mod bind;
pub mod catalog;
pub mod driver;
pub mod error;
pub mod fs;
pub mod groups;
pub mod options;
pub mod reader;
pub mod schema;

pub use bind::{bind, bind_with, BindData, CustomTag};
pub use catalog::{fields_batch, groups_batch, message_fields_batch};
pub use driver::{Scanner, ScanMetrics, BATCH_CAPACITY};
pub use error::{BindError, ScanError};
pub use fs::{LocalFileSystem, LogFileSystem};
pub use groups::{parse_groups, GroupValues, MAX_GROUP_COUNT};
pub use options::ScanOptions;
pub use reader::{FileCursor, LineReader};
pub use schema::scan_schema;
