/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # Fixscan Dictionary
//!
//! FIX specification parsing and dictionary management for the fixscan
//! log reader.
//!
//! This crate provides:
//! - **Schema definitions**: Field, message, component, and group definitions
//! - **Dictionary parsing**: QuickFIX XML format loader with overlay merging
//! - **Embedded dictionary**: a compiled-in FIX 4.4 specification
//! - **Introspection**: flat catalogs over fields, per-message usage, and groups
//!
//! The dictionary is built once per query and shared read-only afterwards.
//! Group definitions drive repeating-group reconstruction during scanning;
//! the name→tag index drives custom-column resolution at bind time.

pub mod embedded;
pub mod error;
pub mod introspect;
pub mod loader;
pub mod schema;

pub use embedded::{embedded_fix44, EMBEDDED_FIX44_XML};
pub use error::DictionaryError;
pub use loader::{apply_overlay, apply_overlay_file, load_base, load_file};
pub use schema::{ComponentDef, Dictionary, EnumValue, FieldDef, GroupDef, MessageDef};
