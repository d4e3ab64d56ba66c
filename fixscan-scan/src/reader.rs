/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Buffered line framing across multiple files.
//!
//! [`LineReader`] reads an opaque byte source in fixed-size chunks and
//! yields lines terminated by `\n`, stripping one preceding `\r` when
//! present. A final unterminated line at end of file IS emitted. A lone
//! `\r` is NOT treated as a terminator, so classic-Mac logs will be
//! mis-framed. Known limitation.
//!
//! [`FileCursor`] hands out file indices under a mutex so several workers
//! can drain one file list without claiming the same file twice. The
//! current driver is single-threaded per query, but the claiming contract
//! already supports multi-worker scans.

use crate::fs::LogFileSystem;
use memchr::memchr;
use parking_lot::Mutex;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read chunk size in bytes.
const CHUNK_SIZE: usize = 8 * 1024;

/// Shared next-file cursor.
///
/// The only mutable state shared between scan workers.
#[derive(Debug, Default)]
pub struct FileCursor {
    next: Mutex<usize>,
}

impl FileCursor {
    /// Creates a cursor positioned at the first file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the next unclaimed index, or `None` when `total` files have
    /// all been claimed.
    pub fn claim(&self, total: usize) -> Option<usize> {
        let mut next = self.next.lock();
        if *next >= total {
            return None;
        }
        let claimed = *next;
        *next += 1;
        Some(claimed)
    }
}

/// Buffered line reader over one file at a time.
pub struct LineReader {
    source: Option<Box<dyn Read + Send>>,
    path: Option<PathBuf>,
    buffer: Vec<u8>,
    buffer_pos: usize,
    file_done: bool,
    line_number: u64,
}

impl std::fmt::Debug for LineReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineReader")
            .field("path", &self.path)
            .field("line_number", &self.line_number)
            .field("file_done", &self.file_done)
            .finish_non_exhaustive()
    }
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReader {
    /// Creates a reader with no file open.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            path: None,
            buffer: Vec::new(),
            buffer_pos: 0,
            file_done: false,
            line_number: 0,
        }
    }

    /// Claims and opens the next file from the shared cursor.
    ///
    /// Any previously open file is closed first.
    ///
    /// # Returns
    /// `Ok(false)` when every file has been claimed.
    ///
    /// # Errors
    /// Returns the I/O error from opening the claimed file.
    pub fn open_next(
        &mut self,
        fs: &dyn LogFileSystem,
        files: &[PathBuf],
        cursor: &FileCursor,
    ) -> std::io::Result<bool> {
        self.close();

        let Some(index) = cursor.claim(files.len()) else {
            return Ok(false);
        };

        let path = files[index].clone();
        debug!(path = %path.display(), "opening log file");
        // Record the path before the open so failures carry context.
        self.path = Some(path.clone());
        self.source = Some(fs.open(&path)?);
        Ok(true)
    }

    /// Reads the next line into `line` (cleared first), without the
    /// terminator.
    ///
    /// # Returns
    /// `Ok(false)` at end of file.
    ///
    /// # Errors
    /// Returns the underlying I/O error from a chunk read.
    pub fn read_line(&mut self, line: &mut Vec<u8>) -> std::io::Result<bool> {
        let Some(source) = self.source.as_mut() else {
            return Ok(false);
        };

        line.clear();
        let mut found = false;

        while !self.file_done {
            if self.buffer_pos >= self.buffer.len() {
                self.buffer.resize(CHUNK_SIZE, 0);
                let bytes_read = source.read(&mut self.buffer)?;
                if bytes_read == 0 {
                    self.file_done = true;
                    if !line.is_empty() {
                        found = true;
                        self.line_number += 1;
                    }
                    break;
                }
                self.buffer.truncate(bytes_read);
                self.buffer_pos = 0;
            }

            match memchr(b'\n', &self.buffer[self.buffer_pos..]) {
                Some(offset) => {
                    let end = self.buffer_pos + offset;
                    line.extend_from_slice(&self.buffer[self.buffer_pos..end]);
                    self.buffer_pos = end + 1;
                    found = true;
                    self.line_number += 1;
                    break;
                }
                None => {
                    line.extend_from_slice(&self.buffer[self.buffer_pos..]);
                    self.buffer_pos = self.buffer.len();
                }
            }
        }

        if !found {
            return Ok(false);
        }

        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Ok(true)
    }

    /// Closes the current file, if any.
    pub fn close(&mut self) {
        if let Some(path) = self.path.take() {
            debug!(path = %path.display(), lines = self.line_number, "closing log file");
        }
        self.source = None;
        self.buffer.clear();
        self.buffer_pos = 0;
        self.file_done = false;
        self.line_number = 0;
    }

    /// Returns true if a file is open.
    #[inline]
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// Returns the path of the open file.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the 1-based number of the last line read.
    #[inline]
    #[must_use]
    pub const fn line_number(&self) -> u64 {
        self.line_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFileSystem;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::File::create(&path)
            .unwrap()
            .write_all(content)
            .unwrap();
        path
    }

    fn read_all_lines(files: &[PathBuf]) -> Vec<String> {
        let cursor = FileCursor::new();
        let mut reader = LineReader::new();
        let mut line = Vec::new();
        let mut out = Vec::new();

        while reader
            .open_next(&LocalFileSystem, files, &cursor)
            .unwrap()
        {
            while reader.read_line(&mut line).unwrap() {
                out.push(String::from_utf8(line.clone()).unwrap());
            }
        }
        out
    }

    #[test]
    fn test_lf_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "a.fix", b"first\nsecond\nthird\n");
        assert_eq!(read_all_lines(&[path]), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_crlf_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "a.fix", b"first\r\nsecond\r\n");
        assert_eq!(read_all_lines(&[path]), vec!["first", "second"]);
    }

    #[test]
    fn test_final_unterminated_line_is_emitted() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "a.fix", b"first\nlast-no-newline");
        assert_eq!(read_all_lines(&[path]), vec!["first", "last-no-newline"]);
    }

    #[test]
    fn test_lone_cr_is_not_a_terminator() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "a.fix", b"one\rtwo\n");
        assert_eq!(read_all_lines(&[path]), vec!["one\rtwo"]);
    }

    #[test]
    fn test_line_longer_than_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let long = "x".repeat(3 * CHUNK_SIZE + 17);
        let content = format!("{long}\nshort\n");
        let path = write_file(&dir, "a.fix", content.as_bytes());

        let lines = read_all_lines(&[path]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], long);
        assert_eq!(lines[1], "short");
    }

    #[test]
    fn test_multi_file_advance_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(&dir, "a.fix", b"a1\na2\n");
        let b = write_file(&dir, "b.fix", b"b1\n");
        assert_eq!(read_all_lines(&[a, b]), vec!["a1", "a2", "b1"]);
    }

    #[test]
    fn test_cursor_claims_each_index_once() {
        let cursor = FileCursor::new();
        assert_eq!(cursor.claim(2), Some(0));
        assert_eq!(cursor.claim(2), Some(1));
        assert_eq!(cursor.claim(2), None);
    }

    #[test]
    fn test_empty_file_yields_no_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "a.fix", b"");
        assert!(read_all_lines(&[path]).is_empty());
    }
}
