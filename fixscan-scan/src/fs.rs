/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! File-system seam.
//!
//! The scan reads through a small trait so the host can supply globbing and
//! byte sources for remote URIs. The default implementation covers local
//! paths with `glob`-style patterns.

use crate::error::BindError;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Abstraction over pattern expansion and sequential reads.
pub trait LogFileSystem: Send + Sync {
    /// Expands a path or glob pattern into a list of files.
    ///
    /// # Errors
    /// Returns [`BindError::InvalidPattern`] when the pattern is malformed.
    /// An empty expansion is NOT an error here; the bind layer decides.
    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>, BindError>;

    /// Opens a file for sequential reading.
    ///
    /// # Errors
    /// Returns the underlying I/O error.
    fn open(&self, path: &Path) -> std::io::Result<Box<dyn Read + Send>>;
}

/// Local file system with glob expansion.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LogFileSystem for LocalFileSystem {
    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>, BindError> {
        let entries = glob::glob(pattern).map_err(|e| BindError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        Ok(files)
    }

    fn open(&self, path: &Path) -> std::io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(path)?))
    }
}
