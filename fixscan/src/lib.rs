/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # Fixscan
//!
//! A table-valued reader for line-delimited FIX protocol logs.
//!
//! Fixscan turns raw FIX logs into Arrow record batches: one row per
//! message, with 19 high-frequency fields promoted to typed columns, an
//! overflow map for the remaining scalar tags, and a nested column for
//! repeating groups shaped by a QuickFIX-style dictionary.
//!
//! ## Features
//!
//! - **Zero-copy tokenization**: field values reference the line buffer
//! - **Dictionary-driven groups**: repeating groups reconstructed from the
//!   ordered tag sequence using per-message group definitions
//! - **Lenient coercion**: numeric and timestamp failures become per-row
//!   diagnostics, never scan aborts
//! - **Functional projection pushdown**: unprojected `tags`/`groups`
//!   columns are never materialized
//! - **Embedded FIX 4.4 dictionary**, with file-based dialects and
//!   right-biased overlays
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fixscan::prelude::*;
//! use std::sync::Arc;
//!
//! let options = ScanOptions::new("logs/*.fix").with_rtags(["TransactTime"]);
//! let bound = Arc::new(bind(&options)?);
//! let mut scanner = Scanner::new(bound);
//! while let Some(batch) = scanner.next_batch()? {
//!     println!("{} rows", batch.num_rows());
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Hot-tag catalog, zero-copy parsed message, structural errors
//! - [`tagvalue`]: Tokenization and lenient type coercion
//! - [`dictionary`]: Dictionary model, QuickFIX XML loader, introspection
//! - [`scan`]: Line framing, bind layer, group parsing, the scan driver

pub mod core {
    //! Hot-tag catalog, zero-copy parsed message, and structural errors.
    pub use fixscan_core::*;
}

pub mod dictionary {
    //! Dictionary model, QuickFIX XML loader, and introspection catalogs.
    pub use fixscan_dictionary::*;
}

pub mod tagvalue {
    //! Zero-copy tokenization and lenient type coercion.
    pub use fixscan_tagvalue::*;
}

pub mod scan {
    //! Line framing, bind layer, group parsing, and the scan driver.
    pub use fixscan_scan::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use fixscan_core::{HotSlot, ParsedMessage, StructuralError, TagRef, HOT_TAGS};

    // Dictionary
    pub use fixscan_dictionary::{
        apply_overlay, embedded_fix44, load_base, load_file, Dictionary, DictionaryError,
        FieldDef, GroupDef, MessageDef,
    };

    // Tag-value
    pub use fixscan_tagvalue::{tokenize, RowErrors, SOH};

    // Scan
    pub use fixscan_scan::{
        bind, BindData, BindError, ScanError, ScanMetrics, ScanOptions, Scanner,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let dict = embedded_fix44().unwrap();
        assert_eq!(dict.tag_by_name("MsgType"), Some(35));

        let msg = tokenize(b"35=D|55=AAPL", b'|');
        assert!(msg.error().is_none());
        assert_eq!(msg.hot(HotSlot::Symbol), Some(&b"AAPL"[..]));
    }

    #[test]
    fn test_hot_tag_catalog_size() {
        assert_eq!(HOT_TAGS.len(), 19);
    }
}
