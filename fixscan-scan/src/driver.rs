/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! The scan driver.
//!
//! [`Scanner`] streams lines across the bound files and assembles Arrow
//! record batches: tokenize, coerce projected hot columns, materialize the
//! `tags` and `groups` containers when projected, carry `raw_message` and
//! the `parse_error` accumulator, then the custom columns.
//!
//! Projection pushdown is functional, not cosmetic: a column outside the
//! projection gets no builder at all, so skipping `tags`/`groups` skips
//! their materialization entirely and the group parser is never invoked.
//! [`ScanMetrics`] exposes that bypass.
//!
//! The driver is single-threaded per query, but files are claimed through
//! the shared [`FileCursor`] so additional workers can join later without
//! changing the contract: hand each worker the same `Arc<BindData>` and
//! cursor, and rows from one file stay in file order.

use crate::bind::BindData;
use crate::error::ScanError;
use crate::fs::{LocalFileSystem, LogFileSystem};
use crate::groups::{parse_groups, GroupValues};
use crate::reader::{FileCursor, LineReader};
use crate::schema::{
    HotKind, HotSlotKind, COL_GROUPS, COL_PARSE_ERROR, COL_RAW_MESSAGE, COL_TAGS, FIXED_COLUMNS,
};
use arrow::array::{
    ArrayRef, Float64Builder, Int32Builder, Int64Builder, ListBuilder, MapBuilder, StringBuilder,
    TimestampMicrosecondBuilder,
};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use fixscan_core::hot::{HotSlot, NUM_HOT_TAGS};
use fixscan_core::message::ParsedMessage;
use fixscan_tagvalue::{
    parse_float64, parse_int64, parse_utc_timestamp_micros, tokenize, RowErrors,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Rows per output batch.
pub const BATCH_CAPACITY: usize = 1024;

/// Counters exposing what the scan actually did.
///
/// `group_parses` in particular makes projection pushdown observable: it
/// stays at zero whenever the `groups` column is not projected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanMetrics {
    /// Rows written to output batches.
    pub rows_emitted: u64,
    /// Empty input lines skipped.
    pub lines_skipped: u64,
    /// Invocations of the repeating-group parser.
    pub group_parses: u64,
}

type TagsBuilder = MapBuilder<Int32Builder, StringBuilder>;
type GroupsBuilder = MapBuilder<Int32Builder, ListBuilder<TagsBuilder>>;

enum ColumnBuilder {
    Str(StringBuilder),
    Int(Int64Builder),
    Float(Float64Builder),
    Timestamp(TimestampMicrosecondBuilder),
    Tags(TagsBuilder),
    Groups(GroupsBuilder),
}

impl ColumnBuilder {
    fn for_column(schema_idx: usize) -> Self {
        if schema_idx < NUM_HOT_TAGS {
            match HotSlot::ALL[schema_idx].kind() {
                HotKind::Str => Self::Str(StringBuilder::new()),
                HotKind::Int64 => Self::Int(Int64Builder::new()),
                HotKind::Float64 => Self::Float(Float64Builder::new()),
                HotKind::Timestamp => {
                    Self::Timestamp(TimestampMicrosecondBuilder::new().with_timezone("UTC"))
                }
            }
        } else if schema_idx == COL_TAGS {
            Self::Tags(MapBuilder::new(None, Int32Builder::new(), StringBuilder::new()))
        } else if schema_idx == COL_GROUPS {
            Self::Groups(MapBuilder::new(
                None,
                Int32Builder::new(),
                ListBuilder::new(MapBuilder::new(
                    None,
                    Int32Builder::new(),
                    StringBuilder::new(),
                )),
            ))
        } else {
            Self::Str(StringBuilder::new())
        }
    }

    fn finish(self) -> ArrayRef {
        match self {
            Self::Str(mut b) => Arc::new(b.finish()),
            Self::Int(mut b) => Arc::new(b.finish()),
            Self::Float(mut b) => Arc::new(b.finish()),
            Self::Timestamp(mut b) => Arc::new(b.finish()),
            Self::Tags(mut b) => Arc::new(b.finish()),
            Self::Groups(mut b) => Arc::new(b.finish()),
        }
    }
}

/// Builders for the projected columns of one batch, kept in ascending
/// schema order so typed coercions run before `parse_error` is written.
struct BatchBuilders {
    columns: Vec<(usize, ColumnBuilder)>,
}

impl BatchBuilders {
    fn new(projection: &[usize]) -> Self {
        let mut indices: Vec<usize> = projection.to_vec();
        indices.sort_unstable();
        let columns = indices
            .into_iter()
            .map(|idx| (idx, ColumnBuilder::for_column(idx)))
            .collect();
        Self { columns }
    }

    fn append_row(
        &mut self,
        bind: &BindData,
        msg: &ParsedMessage<'_>,
        metrics: &mut ScanMetrics,
    ) -> Result<(), ScanError> {
        let mut errors = RowErrors::new();
        errors.seed(msg.error());

        for (schema_idx, builder) in &mut self.columns {
            let idx = *schema_idx;
            match builder {
                ColumnBuilder::Str(b) => {
                    if idx < NUM_HOT_TAGS {
                        append_string(b, msg.hot(HotSlot::ALL[idx]).unwrap_or(b""));
                    } else if idx == COL_RAW_MESSAGE {
                        b.append_value(String::from_utf8_lossy(msg.raw()));
                    } else if idx == COL_PARSE_ERROR {
                        b.append_option(errors.message());
                    } else {
                        let tag = bind.custom_tags[idx - FIXED_COLUMNS].tag;
                        append_string(b, msg.get(tag).unwrap_or(b""));
                    }
                }
                ColumnBuilder::Int(b) => {
                    let slot = HotSlot::ALL[idx];
                    let value = msg.hot(slot).unwrap_or(b"");
                    b.append_option(parse_int64(value, slot.name(), &mut errors));
                }
                ColumnBuilder::Float(b) => {
                    let slot = HotSlot::ALL[idx];
                    let value = msg.hot(slot).unwrap_or(b"");
                    b.append_option(parse_float64(value, slot.name(), &mut errors));
                }
                ColumnBuilder::Timestamp(b) => {
                    let slot = HotSlot::ALL[idx];
                    let value = msg.hot(slot).unwrap_or(b"");
                    b.append_option(parse_utc_timestamp_micros(value, slot.name(), &mut errors));
                }
                ColumnBuilder::Tags(b) => append_tags(b, msg)?,
                ColumnBuilder::Groups(b) => {
                    metrics.group_parses += 1;
                    append_groups(b, parse_groups(msg, &bind.dictionary))?;
                }
            }
        }

        Ok(())
    }

    fn finish(
        self,
        bind: &BindData,
        projection: &[usize],
        rows: usize,
    ) -> Result<RecordBatch, ScanError> {
        let mut built: Vec<(usize, ArrayRef)> = self
            .columns
            .into_iter()
            .map(|(idx, builder)| (idx, builder.finish()))
            .collect();

        // Restore the caller's output order.
        let mut arrays = Vec::with_capacity(projection.len());
        let mut fields = Vec::with_capacity(projection.len());
        for &schema_idx in projection {
            let pos = built
                .iter()
                .position(|(idx, _)| *idx == schema_idx)
                .expect("projection index lost during batch assembly");
            let (_, array) = built.remove(pos);
            fields.push(Field::new(
                bind.schema.field(schema_idx).name().as_str(),
                array.data_type().clone(),
                true,
            ));
            arrays.push(array);
        }

        let options = RecordBatchOptions::new().with_row_count(Some(rows));
        let batch =
            RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), arrays, &options)?;
        Ok(batch)
    }
}

fn append_string(builder: &mut StringBuilder, value: &[u8]) {
    if value.is_empty() {
        builder.append_null();
    } else {
        builder.append_value(String::from_utf8_lossy(value));
    }
}

/// Materializes the overflow map, sorted by tag for deterministic output.
fn append_tags(builder: &mut TagsBuilder, msg: &ParsedMessage<'_>) -> Result<(), ScanError> {
    if msg.overflow().is_empty() {
        builder.append(false)?;
        return Ok(());
    }

    let mut entries: Vec<(u32, &[u8])> = msg.overflow().iter().map(|(k, v)| (*k, *v)).collect();
    entries.sort_unstable_by_key(|(tag, _)| *tag);

    for (tag, value) in entries {
        builder.keys().append_value(tag as i32);
        builder.values().append_value(String::from_utf8_lossy(value));
    }
    builder.append(true)?;
    Ok(())
}

fn append_groups(
    builder: &mut GroupsBuilder,
    groups: Option<GroupValues<'_>>,
) -> Result<(), ScanError> {
    let Some(values) = groups else {
        builder.append(false)?;
        return Ok(());
    };

    for (count_tag, instances) in &values.groups {
        builder.keys().append_value(*count_tag as i32);
        let list = builder.values();
        for instance in instances {
            let entry = list.values();
            for (tag, value) in instance {
                entry.keys().append_value(*tag as i32);
                entry.values().append_value(String::from_utf8_lossy(value));
            }
            entry.append(true)?;
        }
        list.append(true);
    }
    builder.append(true)?;
    Ok(())
}

/// Streams record batches from the bound files.
pub struct Scanner {
    bind: Arc<BindData>,
    fs: Arc<dyn LogFileSystem>,
    cursor: Arc<FileCursor>,
    reader: LineReader,
    projection: Vec<usize>,
    cancel: Option<Arc<AtomicBool>>,
    metrics: ScanMetrics,
    line: Vec<u8>,
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("projection", &self.projection)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl Scanner {
    /// Creates a scanner over all columns, reading through the local file
    /// system with a private file cursor.
    #[must_use]
    pub fn new(bind: Arc<BindData>) -> Self {
        let projection = (0..bind.schema.fields().len()).collect();
        Self {
            bind,
            fs: Arc::new(LocalFileSystem),
            cursor: Arc::new(FileCursor::new()),
            reader: LineReader::new(),
            projection,
            cancel: None,
            metrics: ScanMetrics::default(),
            line: Vec::new(),
        }
    }

    /// Restricts output to the given schema column indices, in the given
    /// order. Unprojected columns are never materialized.
    #[must_use]
    pub fn with_projection(mut self, projection: Vec<usize>) -> Self {
        self.projection = projection;
        self
    }

    /// Reads through a caller-provided file system.
    #[must_use]
    pub fn with_file_system(mut self, fs: Arc<dyn LogFileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Shares a file cursor with other workers so each file is claimed by
    /// exactly one of them.
    #[must_use]
    pub fn with_cursor(mut self, cursor: Arc<FileCursor>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Installs a cancellation flag, checked between rows. A cancelled scan
    /// returns its partial batch.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Returns a snapshot of the scan counters.
    #[inline]
    #[must_use]
    pub const fn metrics(&self) -> ScanMetrics {
        self.metrics
    }

    /// Produces the next batch, or `None` when every file is exhausted.
    ///
    /// # Errors
    /// Returns [`ScanError`] on an I/O failure after open or on batch
    /// assembly failure. End of file is not an error.
    pub fn next_batch(&mut self) -> Result<Option<RecordBatch>, ScanError> {
        if !self.reader.is_open() && !self.open_next_file()? {
            return Ok(None);
        }

        let mut builders = BatchBuilders::new(&self.projection);
        let mut rows = 0usize;

        while rows < BATCH_CAPACITY {
            if self.is_cancelled() {
                debug!(rows, "scan cancelled, emitting partial batch");
                break;
            }

            match self.read_next_line()? {
                ReadOutcome::Line => {}
                ReadOutcome::Exhausted => break,
            }

            if self.line.is_empty() {
                self.metrics.lines_skipped += 1;
                continue;
            }

            let msg = tokenize(&self.line, self.bind.delimiter);
            builders.append_row(&self.bind, &msg, &mut self.metrics)?;
            self.metrics.rows_emitted += 1;
            rows += 1;
        }

        if rows == 0 {
            return Ok(None);
        }
        builders.finish(&self.bind, &self.projection, rows).map(Some)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn open_next_file(&mut self) -> Result<bool, ScanError> {
        match self
            .reader
            .open_next(self.fs.as_ref(), &self.bind.files, &self.cursor)
        {
            Ok(opened) => Ok(opened),
            Err(source) => Err(self.wrap_io(source)),
        }
    }

    fn read_next_line(&mut self) -> Result<ReadOutcome, ScanError> {
        loop {
            let got_line = {
                let Self { reader, line, .. } = self;
                match reader.read_line(line) {
                    Ok(got) => got,
                    Err(source) => {
                        let path = path_label(reader);
                        return Err(ScanError::Read { path, source });
                    }
                }
            };

            if got_line {
                return Ok(ReadOutcome::Line);
            }

            self.reader.close();
            if !self.open_next_file()? {
                return Ok(ReadOutcome::Exhausted);
            }
        }
    }

    fn wrap_io(&self, source: std::io::Error) -> ScanError {
        ScanError::Read {
            path: path_label(&self.reader),
            source,
        }
    }
}

enum ReadOutcome {
    Line,
    Exhausted,
}

fn path_label(reader: &LineReader) -> String {
    reader
        .path()
        .map_or_else(|| "<input>".to_string(), |p| p.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::bind_with;
    use crate::error::BindError;
    use crate::options::ScanOptions;
    use arrow::array::{Array, StringArray};
    use std::io::Read;
    use std::path::{Path, PathBuf};

    /// In-memory file system: one synthetic log per named file.
    struct MemoryFs {
        files: Vec<(PathBuf, Vec<u8>)>,
    }

    impl MemoryFs {
        fn new(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(name, content)| (PathBuf::from(name), content.as_bytes().to_vec()))
                    .collect(),
            }
        }
    }

    impl LogFileSystem for MemoryFs {
        fn expand(&self, _pattern: &str) -> Result<Vec<PathBuf>, BindError> {
            Ok(self.files.iter().map(|(path, _)| path.clone()).collect())
        }

        fn open(&self, path: &Path) -> std::io::Result<Box<dyn Read + Send>> {
            let (_, content) = self
                .files
                .iter()
                .find(|(p, _)| p == path)
                .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))?;
            Ok(Box::new(std::io::Cursor::new(content.clone())))
        }
    }

    fn sender_values(batch: &RecordBatch) -> Vec<String> {
        let senders = batch
            .column(1)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        (0..batch.num_rows())
            .filter(|&i| !senders.is_null(i))
            .map(|i| senders.value(i).to_string())
            .collect()
    }

    #[test]
    fn test_scanner_over_memory_file_system() {
        let fs = Arc::new(MemoryFs::new(&[
            ("a.fix", "35=0|49=A1\n35=0|49=A2\n"),
            ("b.fix", "35=0|49=B1\n"),
        ]));
        let bound = Arc::new(bind_with(fs.as_ref(), &ScanOptions::new("*")).unwrap());

        let mut scanner = Scanner::new(bound).with_file_system(fs);
        let batch = scanner.next_batch().unwrap().unwrap();

        assert_eq!(batch.num_rows(), 3);
        assert_eq!(sender_values(&batch), vec!["A1", "A2", "B1"]);
        assert!(scanner.next_batch().unwrap().is_none());
    }

    #[test]
    fn test_shared_cursor_hands_each_file_to_one_worker() {
        let fs = Arc::new(MemoryFs::new(&[
            ("a.fix", "35=0|49=A1\n"),
            ("b.fix", "35=0|49=B1\n"),
        ]));
        let bound = Arc::new(bind_with(fs.as_ref(), &ScanOptions::new("*")).unwrap());
        let cursor = Arc::new(FileCursor::new());

        let mut first = Scanner::new(bound.clone())
            .with_file_system(fs.clone())
            .with_cursor(cursor.clone());
        let mut second = Scanner::new(bound)
            .with_file_system(fs)
            .with_cursor(cursor);

        // The first worker drains the whole list through the shared cursor;
        // nothing is left for the second to claim, and no file is read twice.
        let batch_a = first.next_batch().unwrap().unwrap();
        assert_eq!(sender_values(&batch_a), vec!["A1", "B1"]);
        assert!(second.next_batch().unwrap().is_none());
    }

    #[test]
    fn test_missing_file_surfaces_read_error() {
        let fs = Arc::new(MemoryFs::new(&[("a.fix", "35=0\n")]));
        let bound = Arc::new(bind_with(fs.as_ref(), &ScanOptions::new("*")).unwrap());

        // Scan through a file system that no longer has the bound file.
        let empty_fs = Arc::new(MemoryFs::new(&[]));
        let mut scanner = Scanner::new(bound).with_file_system(empty_fs);
        assert!(matches!(
            scanner.next_batch(),
            Err(ScanError::Read { .. })
        ));
    }
}
